//! 演示用的宿主文档会话
//!
//! 持有当前页、总页数与缓存页集合，响应定位条与导航按钮的通知。
//! 跳转后把目标页及其前后 `prefetch` 页标记为已缓存，模拟渲染缓存。

use std::collections::BTreeSet;

use crate::app::error::types::{Result, ScrubberError};
use crate::core::scrubber::model::{
    NavigationListener, PageListener, PageSnapshot,
};

/// 预取页数上限
pub const MAX_PREFETCH: usize = 64;

/// 文档会话
#[derive(Debug, Clone)]
pub struct DocumentSession {
    current_page: usize,
    total_pages: usize,
    cached_pages: BTreeSet<usize>,
    prefetch: usize,
    /// 拖动中最近一次预览页
    live_preview: Option<usize>,
    /// 页码选择器输入缓冲，`Some` 表示选择器已打开
    picker: Option<String>,
}

impl DocumentSession {
    /// 越界的缓存页在保存前丢弃，`prefetch` 夹紧到 [`MAX_PREFETCH`]
    pub fn new(
        total_pages: usize,
        current_page: usize,
        mut cached_pages: BTreeSet<usize>,
        prefetch: usize,
    ) -> Self {
        cached_pages.retain(|page| (1..=total_pages).contains(page));
        let mut session = Self {
            current_page: 0,
            total_pages,
            cached_pages,
            prefetch: prefetch.min(MAX_PREFETCH),
            live_preview: None,
            picker: None,
        };
        if total_pages > 0 {
            session.jump_to(current_page.clamp(1, total_pages));
        }
        session
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn cached_pages(&self) -> &BTreeSet<usize> {
        &self.cached_pages
    }

    pub fn live_preview(&self) -> Option<usize> {
        self.live_preview
    }

    pub fn clear_live_preview(&mut self) {
        self.live_preview = None;
    }

    /// 当前状态的只读快照
    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            current_page: self.current_page,
            total_pages: self.total_pages,
            cached_pages: self.cached_pages.clone(),
        }
    }

    /// 跳转到指定页（夹紧到有效范围）
    pub fn jump_to(&mut self, page: usize) {
        if self.total_pages == 0 {
            return;
        }
        let page = page.clamp(1, self.total_pages);
        if page != self.current_page {
            tracing::info!(from = self.current_page, to = page, "jump");
        }
        self.current_page = page;

        let first = page.saturating_sub(self.prefetch).max(1);
        let last = page.saturating_add(self.prefetch).min(self.total_pages);
        self.cached_pages.extend(first..=last);
    }

    pub fn picker_input(&self) -> Option<&str> {
        self.picker.as_deref()
    }

    pub fn is_picker_open(&self) -> bool {
        self.picker.is_some()
    }

    /// 向页码选择器追加一位数字
    pub fn picker_push(&mut self, digit: char) {
        if let Some(input) = self.picker.as_mut() {
            if digit.is_ascii_digit() && input.len() < 9 {
                input.push(digit);
            }
        }
    }

    pub fn picker_backspace(&mut self) {
        if let Some(input) = self.picker.as_mut() {
            input.pop();
        }
    }

    pub fn picker_cancel(&mut self) {
        self.picker = None;
    }

    /// 确认选择器输入并跳转；输入为空时只关闭选择器
    pub fn picker_confirm(&mut self) -> Result<()> {
        let Some(input) = self.picker.take() else {
            return Ok(());
        };
        if input.is_empty() {
            return Ok(());
        }
        let page: usize = input.parse()?;
        self.select(page)
    }

    fn select(&mut self, page: usize) -> Result<()> {
        if !(1..=self.total_pages).contains(&page) {
            return Err(ScrubberError::OutOfRangeIndex {
                page,
                total_pages: self.total_pages,
            }
            .into());
        }
        self.jump_to(page);
        Ok(())
    }
}

impl PageListener for DocumentSession {
    fn on_page_changed(&mut self, page: usize) -> Result<()> {
        tracing::trace!(page, "live preview");
        self.live_preview = Some(page);
        Ok(())
    }

    fn on_page_selected(&mut self, page: usize) -> Result<()> {
        self.live_preview = None;
        self.select(page)
    }
}

impl NavigationListener for DocumentSession {
    fn on_first_page(&mut self) -> Result<()> {
        self.jump_to(1);
        Ok(())
    }

    fn on_previous_page(&mut self) -> Result<()> {
        self.jump_to(self.current_page.saturating_sub(1));
        Ok(())
    }

    fn on_next_page(&mut self) -> Result<()> {
        self.jump_to(self.current_page.saturating_add(1));
        Ok(())
    }

    fn on_last_page(&mut self) -> Result<()> {
        self.jump_to(self.total_pages);
        Ok(())
    }

    fn on_page_selector_tap(&mut self) -> Result<()> {
        self.picker = Some(String::new());
        Ok(())
    }
}
