//! 轨道绘制
//!
//! 由后到前依次绘制：背景、缓存页高亮、进度填充、当前页标记、分页刻度；
//! 滑块与预览框在轨道层之上单独绘制。

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::app::error::types::ScrubberError;
use crate::core::scrubber::canvas::{Canvas, Color, Rect};
use crate::core::scrubber::layout::{
    page_end_offset, segment_bounds, LayoutCalculator, TrackGeometry,
};
use crate::core::scrubber::model::PageSnapshot;

/// 颜色配置
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrackStyle {
    /// 进度、当前页、预览框
    pub primary_color: Color,
    /// 缓存页高亮（半透明）
    pub cached_color: Color,
    /// 轨道底色
    pub background_color: Color,
    pub thumb_color: Color,
    /// 预览框文字与刻度
    pub label_color: Color,
}

impl Default for TrackStyle {
    fn default() -> Self {
        Self {
            primary_color: Color::rgb(0x21, 0x96, 0xF3),
            cached_color: Color::rgba(0x90, 0xCA, 0xF9, 0x80),
            background_color: Color::rgb(0x42, 0x42, 0x42),
            thumb_color: Color::rgb(0xFF, 0xFF, 0xFF),
            label_color: Color::rgb(0xFF, 0xFF, 0xFF),
        }
    }
}

const PROGRESS_OPACITY: f64 = 0.55;
const GLOW_OPACITY: f64 = 0.3;
const TICK_OPACITY: f64 = 0.35;
const TICK_WIDTH: f64 = 1.0;
const PREVIEW_RADIUS: f64 = 4.0;

/// 决定轨道层是否需要重绘的四个字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepaintKey {
    pub current_page: usize,
    pub total_pages: usize,
    pub cached_pages: BTreeSet<usize>,
    pub compact: bool,
}

impl RepaintKey {
    pub fn new(snapshot: &PageSnapshot, compact: bool) -> Self {
        Self {
            current_page: snapshot.current_page,
            total_pages: snapshot.total_pages,
            cached_pages: snapshot.cached_pages.clone(),
            compact,
        }
    }

    /// 与上一次绘制的键不同（或从未绘制）时需要重绘
    pub fn should_repaint(&self, previous: Option<&RepaintKey>) -> bool {
        previous != Some(self)
    }
}

/// 预览框文字
pub fn preview_label(page: usize, total_pages: usize) -> String {
    format!("{page} / {total_pages}")
}

/// 轨道绘制器
#[derive(Debug, Clone, Default)]
pub struct TrackRenderer {
    layout: LayoutCalculator,
    style: TrackStyle,
}

impl TrackRenderer {
    pub fn new(layout: LayoutCalculator, style: TrackStyle) -> Self {
        Self { layout, style }
    }

    pub fn layout(&self) -> &LayoutCalculator {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut LayoutCalculator {
        &mut self.layout
    }

    pub fn style(&self) -> &TrackStyle {
        &self.style
    }

    pub fn repaint_key(&self, snapshot: &PageSnapshot) -> RepaintKey {
        RepaintKey::new(snapshot, self.layout.is_compact())
    }

    /// 绘制轨道层
    ///
    /// 宽或高非正时静默跳过；单个元素几何异常时只跳过该元素。
    pub fn paint_track(
        &self,
        canvas: &mut dyn Canvas,
        snapshot: &PageSnapshot,
        track_width: f64,
    ) {
        let height = self.layout.track_height();
        if !is_positive(track_width) || !is_positive(height) {
            tracing::debug!(
                track_width,
                height,
                "skip painting degenerate track"
            );
            return;
        }

        canvas.fill_rounded_rect(
            Rect::new(0.0, 0.0, track_width, height),
            height / 2.0,
            self.style.background_color,
        );

        if !snapshot.has_pages() {
            return;
        }

        self.paint_cached(canvas, snapshot, track_width, height);

        if let Err(e) = self.paint_progress(canvas, snapshot, track_width, height)
        {
            tracing::debug!(error = %e, "skip progress fill");
        }

        if let Err(e) = self.paint_current(canvas, snapshot, track_width, height)
        {
            tracing::debug!(error = %e, "skip current page marker");
        }

        if self.layout.shows_ticks(snapshot.total_pages) {
            self.paint_ticks(canvas, snapshot.total_pages, track_width, height);
        }
    }

    /// 在轨道层之上绘制滑块与预览框
    pub fn paint_thumb(
        &self,
        canvas: &mut dyn Canvas,
        geometry: &TrackGeometry,
        label: Option<&str>,
    ) {
        let thumb = geometry.thumb;
        canvas.fill_rounded_rect(thumb, thumb.width / 2.0, self.style.thumb_color);

        let (Some(preview), Some(label)) = (geometry.preview, label)
        else {
            return;
        };

        canvas.fill_rounded_rect(preview, PREVIEW_RADIUS, self.style.primary_color);
        let text_width = canvas.measure_text(label);
        let text_x = (preview.center_x() - text_width / 2.0).max(preview.x);
        canvas.draw_text(text_x, preview.center_y(), label, self.style.label_color);
    }

    fn paint_cached(
        &self,
        canvas: &mut dyn Canvas,
        snapshot: &PageSnapshot,
        track_width: f64,
        height: f64,
    ) {
        let mut painted = 0;
        for page in snapshot.visible_cached_pages() {
            match segment_bounds(page, track_width, snapshot.total_pages) {
                Ok(segment) => {
                    canvas.fill_rect(
                        Rect::new(segment.x, 0.0, segment.width, height),
                        self.style.cached_color,
                    );
                    painted += 1;
                }
                Err(e) => tracing::trace!(page, error = %e, "skip cached page"),
            }
        }

        let ignored = snapshot.cached_pages.len() - painted;
        if ignored > 0 {
            tracing::trace!(ignored, "cached pages outside document");
        }
    }

    fn paint_progress(
        &self,
        canvas: &mut dyn Canvas,
        snapshot: &PageSnapshot,
        track_width: f64,
        height: f64,
    ) -> Result<(), ScrubberError> {
        let end = page_end_offset(
            snapshot.current_page,
            track_width,
            snapshot.total_pages,
        )?;
        canvas.fill_rect(
            Rect::new(0.0, 0.0, end, height),
            self.style.primary_color.with_alpha(PROGRESS_OPACITY),
        );
        Ok(())
    }

    fn paint_current(
        &self,
        canvas: &mut dyn Canvas,
        snapshot: &PageSnapshot,
        track_width: f64,
        height: f64,
    ) -> Result<(), ScrubberError> {
        let segment = segment_bounds(
            snapshot.current_page,
            track_width,
            snapshot.total_pages,
        )?;
        let mid = height / 2.0;
        let from = (segment.x, mid);
        let to = (segment.right(), mid);

        if self.layout.shows_glow(segment.width) {
            canvas.draw_line(
                from,
                to,
                height + self.layout.metrics().glow_extra_width,
                self.style.primary_color.with_alpha(GLOW_OPACITY),
            );
        }
        canvas.draw_line(from, to, height, self.style.primary_color);
        Ok(())
    }

    fn paint_ticks(
        &self,
        canvas: &mut dyn Canvas,
        total_pages: usize,
        track_width: f64,
        height: f64,
    ) {
        let color = self.style.label_color.with_alpha(TICK_OPACITY);
        for boundary in 1..total_pages {
            let x = boundary as f64 * track_width / total_pages as f64;
            canvas.draw_line((x, 0.0), (x, height), TICK_WIDTH, color);
        }
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
