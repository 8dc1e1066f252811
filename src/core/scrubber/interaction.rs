//! 拖动交互状态机
//!
//! `Idle → Dragging(preview) → Idle`，轻点视为同一位置的按下加抬起。
//! 预览页变化时通知 `on_page_changed`，抬起且目标页与当前页不同时
//! 通知一次 `on_page_selected`。

use crate::app::error::types::Result;
use crate::core::scrubber::model::{PageListener, PageSnapshot};
use crate::core::scrubber::position::page_from_offset;

/// 交互状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// 指针按下中，`preview_page` 为尚未提交的目标页
    Dragging { preview_page: usize },
    /// 正在通知提交回调
    Committing,
}

/// 相对轨道左边缘的指针事件
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { dx: f64 },
    Move { dx: f64 },
    Up,
    /// 指针离开可交互区域或手势被打断
    Leave,
}

/// 拖动交互控制器
#[derive(Debug, Default)]
pub struct ScrubController {
    state: InteractionState,
    last_notified: Option<usize>,
    /// 按下时的当前页，抬起时据此判断是否提交
    origin_page: Option<usize>,
}

impl ScrubController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, InteractionState::Dragging { .. })
    }

    pub fn preview_page(&self) -> Option<usize> {
        match self.state {
            InteractionState::Dragging { preview_page } => Some(preview_page),
            _ => None,
        }
    }

    /// 滑块应显示的页：拖动中为预览页，否则为当前页
    pub fn display_page(&self, current_page: usize) -> usize {
        self.preview_page().unwrap_or(current_page)
    }

    /// 分发指针事件
    pub fn handle(
        &mut self,
        event: PointerEvent,
        track_width: f64,
        snapshot: &PageSnapshot,
        listener: &mut dyn PageListener,
    ) {
        match event {
            PointerEvent::Down { dx } => {
                self.drag_start(dx, track_width, snapshot, listener)
            }
            PointerEvent::Move { dx } => {
                self.drag_update(dx, track_width, snapshot, listener)
            }
            PointerEvent::Up => self.drag_end(snapshot, listener),
            PointerEvent::Leave => self.cancel(),
        }
    }

    /// 指针在轨道上按下
    pub fn drag_start(
        &mut self,
        dx: f64,
        track_width: f64,
        snapshot: &PageSnapshot,
        listener: &mut dyn PageListener,
    ) {
        let Some(page) =
            page_from_offset(dx, track_width, snapshot.total_pages)
        else {
            tracing::trace!(
                dx,
                track_width,
                total_pages = snapshot.total_pages,
                "ignore drag start on degenerate track"
            );
            return;
        };

        tracing::debug!(page, "drag start");
        self.origin_page = Some(snapshot.current_page);
        self.state = InteractionState::Dragging { preview_page: page };
        self.notify_changed(page, listener);
    }

    /// 按下状态下移动指针
    pub fn drag_update(
        &mut self,
        dx: f64,
        track_width: f64,
        snapshot: &PageSnapshot,
        listener: &mut dyn PageListener,
    ) {
        let InteractionState::Dragging { preview_page } = self.state else {
            tracing::trace!(dx, "ignore drag update without drag start");
            return;
        };
        let Some(page) =
            page_from_offset(dx, track_width, snapshot.total_pages)
        else {
            return;
        };

        if page != preview_page {
            self.state = InteractionState::Dragging { preview_page: page };
            self.notify_changed(page, listener);
        }
    }

    /// 抬起：预览页与按下时的当前页不同则提交，随后总是回到 `Idle`
    pub fn drag_end(
        &mut self,
        snapshot: &PageSnapshot,
        listener: &mut dyn PageListener,
    ) {
        if let Some(page) = self.preview_page() {
            let origin = self.origin_page.unwrap_or(snapshot.current_page);
            if page != origin {
                tracing::debug!(page, "commit page");
                self.state = InteractionState::Committing;
                report(listener.on_page_selected(page), "on_page_selected");
            }
        }
        self.reset();
    }

    /// 轻点：同一位置按下后立即抬起
    pub fn tap(
        &mut self,
        dx: f64,
        track_width: f64,
        snapshot: &PageSnapshot,
        listener: &mut dyn PageListener,
    ) {
        self.drag_start(dx, track_width, snapshot, listener);
        self.drag_end(snapshot, listener);
    }

    /// 取消手势，不提交
    pub fn cancel(&mut self) {
        if self.is_dragging() {
            tracing::debug!("drag cancelled");
        }
        self.reset();
    }

    /// 控件销毁时清空状态
    pub fn dispose(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.state = InteractionState::Idle;
        self.last_notified = None;
        self.origin_page = None;
    }

    fn notify_changed(
        &mut self,
        page: usize,
        listener: &mut dyn PageListener,
    ) {
        if self.last_notified == Some(page) {
            return;
        }
        self.last_notified = Some(page);
        report(listener.on_page_changed(page), "on_page_changed");
    }
}

/// 回调失败只记录日志，不影响状态机
fn report(result: Result<()>, callback: &str) {
    if let Err(e) = result {
        tracing::warn!(callback, error = %e, "listener failed");
    }
}
