//! 宿主提供的页面快照与对外回调接口

use std::collections::BTreeSet;

use crate::app::error::types::Result;

/// 宿主文档查看器在每次渲染时提供的只读快照
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageSnapshot {
    /// 当前页（从 1 开始）
    pub current_page: usize,
    /// 总页数
    pub total_pages: usize,
    /// 已缓存/已渲染的页，可能包含越界页码
    pub cached_pages: BTreeSet<usize>,
}

impl PageSnapshot {
    pub fn new(
        current_page: usize,
        total_pages: usize,
        cached_pages: impl IntoIterator<Item = usize>,
    ) -> Self {
        Self {
            current_page,
            total_pages,
            cached_pages: cached_pages.into_iter().collect(),
        }
    }

    /// 是否有可用页面
    pub fn has_pages(&self) -> bool {
        self.total_pages > 0
    }

    /// 将当前页夹紧到 [1, total_pages]，无页面时保持原值
    pub fn normalized(mut self) -> Self {
        if self.has_pages() {
            self.current_page =
                self.current_page.clamp(1, self.total_pages);
        }
        self
    }

    /// 只返回范围内的缓存页
    pub fn visible_cached_pages(
        &self,
    ) -> impl Iterator<Item = usize> + '_ {
        // total_pages 为 0 时 BTreeSet::range(1..=0) 会 panic，这里逐个过滤
        self.cached_pages
            .iter()
            .copied()
            .filter(|page| self.contains(*page))
    }

    pub fn contains(&self, page: usize) -> bool {
        (1..=self.total_pages).contains(&page)
    }
}

/// 拖动过程与提交的对外通知
pub trait PageListener {
    /// 拖动中预览页变化（实时反馈，可能频繁）
    fn on_page_changed(&mut self, page: usize) -> Result<()>;

    /// 手势结束且目标页与当前页不同（立即跳转）
    fn on_page_selected(&mut self, page: usize) -> Result<()>;
}

/// 导航按钮触发的通知
pub trait NavigationListener {
    fn on_first_page(&mut self) -> Result<()>;

    fn on_previous_page(&mut self) -> Result<()>;

    fn on_next_page(&mut self) -> Result<()>;

    fn on_last_page(&mut self) -> Result<()>;

    /// 打开外部页码选择器
    fn on_page_selector_tap(&mut self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_cached_pages_drops_out_of_range() {
        let snapshot = PageSnapshot::new(3, 10, [0, 2, 5, 9, 11]);
        let visible: Vec<_> = snapshot.visible_cached_pages().collect();
        assert_eq!(visible, vec![2, 5, 9]);
    }

    #[test]
    fn normalized_clamps_current_page() {
        assert_eq!(PageSnapshot::new(0, 5, []).normalized().current_page, 1);
        assert_eq!(PageSnapshot::new(9, 5, []).normalized().current_page, 5);
        assert_eq!(PageSnapshot::new(0, 0, []).normalized().current_page, 0);
    }

    #[test]
    fn empty_document_has_no_visible_cache() {
        let snapshot = PageSnapshot::new(1, 0, [1, 2]);
        assert!(!snapshot.has_pages());
        assert_eq!(snapshot.visible_cached_pages().count(), 0);
    }
}
