//! 导航按钮状态

use crate::app::error::types::Result;
use crate::core::scrubber::model::NavigationListener;

/// 导航动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    First,
    Previous,
    Next,
    Last,
    /// 打开页码选择器
    PageSelector,
}

/// 导航按钮启用状态，由当前页与总页数推导
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    current_page: usize,
    total_pages: usize,
}

impl NavigationState {
    /// 创建新的导航状态
    pub fn new(current_page: usize, total_pages: usize) -> Self {
        Self {
            current_page,
            total_pages,
        }
    }

    /// 首页 / 上一页
    pub fn can_go_back(&self) -> bool {
        self.total_pages > 0 && self.current_page > 1
    }

    /// 下一页 / 末页
    pub fn can_go_forward(&self) -> bool {
        self.total_pages > 0 && self.current_page < self.total_pages
    }

    /// 指定动作是否可用
    pub fn is_enabled(&self, action: NavAction) -> bool {
        match action {
            NavAction::First | NavAction::Previous => self.can_go_back(),
            NavAction::Next | NavAction::Last => self.can_go_forward(),
            NavAction::PageSelector => self.total_pages > 0,
        }
    }

    /// 触发动作；按钮禁用时不通知，返回是否已通知
    pub fn trigger(
        &self,
        action: NavAction,
        listener: &mut dyn NavigationListener,
    ) -> Result<bool> {
        if !self.is_enabled(action) {
            tracing::trace!(?action, "navigation disabled");
            return Ok(false);
        }

        match action {
            NavAction::First => listener.on_first_page()?,
            NavAction::Previous => listener.on_previous_page()?,
            NavAction::Next => listener.on_next_page()?,
            NavAction::Last => listener.on_last_page()?,
            NavAction::PageSelector => {
                listener.on_page_selector_tap()?
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Calls(Vec<&'static str>);

    impl NavigationListener for Calls {
        fn on_first_page(&mut self) -> Result<()> {
            self.0.push("first");
            Ok(())
        }

        fn on_previous_page(&mut self) -> Result<()> {
            self.0.push("previous");
            Ok(())
        }

        fn on_next_page(&mut self) -> Result<()> {
            self.0.push("next");
            Ok(())
        }

        fn on_last_page(&mut self) -> Result<()> {
            self.0.push("last");
            Ok(())
        }

        fn on_page_selector_tap(&mut self) -> Result<()> {
            self.0.push("selector");
            Ok(())
        }
    }

    #[test]
    fn bounds_disable_buttons() {
        let first = NavigationState::new(1, 5);
        assert!(!first.is_enabled(NavAction::First));
        assert!(!first.is_enabled(NavAction::Previous));
        assert!(first.is_enabled(NavAction::Next));

        let last = NavigationState::new(5, 5);
        assert!(last.is_enabled(NavAction::Previous));
        assert!(!last.is_enabled(NavAction::Last));
    }

    #[test]
    fn empty_document_disables_everything() {
        let empty = NavigationState::new(0, 0);
        for action in [
            NavAction::First,
            NavAction::Previous,
            NavAction::Next,
            NavAction::Last,
            NavAction::PageSelector,
        ] {
            assert!(!empty.is_enabled(action));
        }
    }

    #[test]
    fn trigger_only_calls_enabled_actions() {
        let mut calls = Calls::default();
        let state = NavigationState::new(1, 3);
        assert!(!state.trigger(NavAction::Previous, &mut calls).unwrap());
        assert!(state.trigger(NavAction::Next, &mut calls).unwrap());
        assert!(state.trigger(NavAction::PageSelector, &mut calls).unwrap());
        assert_eq!(calls.0, vec!["next", "selector"]);
    }
}
