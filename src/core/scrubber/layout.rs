//! 轨道几何计算
//!
//! 根据轨道宽度、总页数和交互状态推导分段、滑块与预览框的像素位置。
//! 每次布局都重新计算，不保留跨帧状态。

use serde::Deserialize;

use crate::app::error::types::ScrubberError;
use crate::core::scrubber::canvas::Rect;
use crate::core::scrubber::position::progress_from_page;

type LayoutResult<T> = std::result::Result<T, ScrubberError>;

/// 尺寸参数（像素）
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutMetrics {
    pub thumb_size: f64,
    pub compact_thumb_size: f64,
    /// 拖动时滑块放大的增量
    pub drag_thumb_increment: f64,
    pub track_height: f64,
    pub compact_track_height: f64,
    pub preview_width: f64,
    pub preview_height: f64,
    pub compact_preview_width: f64,
    pub compact_preview_height: f64,
    /// 预览框底边与轨道顶边的间距
    pub preview_margin: f64,
    /// 当前页光晕比轨道高出的描边宽度
    pub glow_extra_width: f64,
    /// 紧凑模式下分段窄于该值时不画光晕
    pub glow_min_segment_width: f64,
    /// 总页数低于该值时画分页刻度
    pub tick_limit: usize,
    pub compact_tick_limit: usize,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            thumb_size: 16.0,
            compact_thumb_size: 12.0,
            drag_thumb_increment: 4.0,
            track_height: 16.0,
            compact_track_height: 12.0,
            preview_width: 64.0,
            preview_height: 32.0,
            compact_preview_width: 48.0,
            compact_preview_height: 24.0,
            preview_margin: 8.0,
            glow_extra_width: 6.0,
            glow_min_segment_width: 4.0,
            tick_limit: 50,
            compact_tick_limit: 20,
        }
    }
}

/// 单页在轨道上的水平区间
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x: f64,
    pub width: f64,
}

impl Segment {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// 一次布局所需的输入
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutInput {
    pub track_width: f64,
    pub total_pages: usize,
    /// 当前页，拖动时为预览页
    pub display_page: usize,
    pub is_dragging: bool,
}

/// 一次布局的完整输出
#[derive(Debug, Clone, PartialEq)]
pub struct TrackGeometry {
    pub track_width: f64,
    pub track_height: f64,
    pub segment_width: f64,
    pub thumb: Rect,
    /// 仅在拖动时存在
    pub preview: Option<Rect>,
}

/// 布局计算器
#[derive(Debug, Clone, Default)]
pub struct LayoutCalculator {
    metrics: LayoutMetrics,
    compact: bool,
}

impl LayoutCalculator {
    pub fn new(metrics: LayoutMetrics, compact: bool) -> Self {
        Self { metrics, compact }
    }

    pub fn metrics(&self) -> &LayoutMetrics {
        &self.metrics
    }

    pub fn is_compact(&self) -> bool {
        self.compact
    }

    pub fn set_compact(&mut self, compact: bool) {
        self.compact = compact;
    }

    pub fn track_height(&self) -> f64 {
        if self.compact {
            self.metrics.compact_track_height
        } else {
            self.metrics.track_height
        }
    }

    /// 滑块边长：紧凑模式更小，拖动时放大
    pub fn thumb_size(&self, is_dragging: bool) -> f64 {
        let base = if self.compact {
            self.metrics.compact_thumb_size
        } else {
            self.metrics.thumb_size
        };
        if is_dragging {
            base + self.metrics.drag_thumb_increment
        } else {
            base
        }
    }

    pub fn preview_size(&self) -> (f64, f64) {
        if self.compact {
            (
                self.metrics.compact_preview_width,
                self.metrics.compact_preview_height,
            )
        } else {
            (self.metrics.preview_width, self.metrics.preview_height)
        }
    }

    /// 是否绘制分页刻度
    pub fn shows_ticks(&self, total_pages: usize) -> bool {
        let limit = if self.compact {
            self.metrics.compact_tick_limit
        } else {
            self.metrics.tick_limit
        };
        total_pages > 1 && total_pages < limit
    }

    /// 是否绘制当前页光晕
    pub fn shows_glow(&self, segment_width: f64) -> bool {
        !(self.compact
            && segment_width < self.metrics.glow_min_segment_width)
    }

    /// 滑块左边缘，始终位于 [0, track_width - thumb_size]，轨道过窄时为 0
    pub fn thumb_offset(
        &self,
        track_width: f64,
        total_pages: usize,
        display_page: usize,
        thumb_size: f64,
    ) -> LayoutResult<f64> {
        let travel = (track_width - thumb_size).max(0.0);
        let offset = (progress_from_page(display_page, total_pages)
            * travel)
            .clamp(0.0, travel);
        finite(offset, "thumb offset")
    }

    /// 预览框：水平居中于滑块并限制在轨道内，位于轨道上方固定间距处
    pub fn preview_box(
        &self,
        thumb: &Rect,
        track_width: f64,
    ) -> LayoutResult<Rect> {
        let (width, height) = self.preview_size();
        let max_x = (track_width - width).max(0.0);
        let x = (thumb.center_x() - width / 2.0).clamp(0.0, max_x);
        let y = -(self.metrics.preview_margin + height);
        drawable(Rect::new(x, y, width, height), "preview box")
    }

    /// 计算整条轨道的几何
    pub fn geometry(
        &self,
        input: &LayoutInput,
    ) -> LayoutResult<TrackGeometry> {
        check_track(input.track_width, input.total_pages)?;

        let track_height = self.track_height();
        let segment_width = finite(
            input.track_width / input.total_pages as f64,
            "segment width",
        )?;

        let size = self.thumb_size(input.is_dragging);
        let offset = self.thumb_offset(
            input.track_width,
            input.total_pages,
            input.display_page,
            size,
        )?;
        let thumb = drawable(
            Rect::new(
                offset,
                track_height / 2.0 - size / 2.0,
                size,
                size,
            ),
            "thumb",
        )?;

        let preview = if input.is_dragging {
            Some(self.preview_box(&thumb, input.track_width)?)
        } else {
            None
        };

        Ok(TrackGeometry {
            track_width: input.track_width,
            track_height,
            segment_width,
            thumb,
            preview,
        })
    }
}

/// 第 `page` 页的分段区间
///
/// 右边缘被夹紧到 `track_width`，末段因浮点误差可能被截短。
pub fn segment_bounds(
    page: usize,
    track_width: f64,
    total_pages: usize,
) -> LayoutResult<Segment> {
    check_track(track_width, total_pages)?;
    if !(1..=total_pages).contains(&page) {
        return Err(ScrubberError::OutOfRangeIndex { page, total_pages });
    }

    let segment_width = track_width / total_pages as f64;
    let x = ((page - 1) as f64 * segment_width).clamp(0.0, track_width);
    let width = segment_width.clamp(0.0, track_width - x);

    Ok(Segment {
        x: finite(x, "segment x")?,
        width: finite(width, "segment width")?,
    })
}

/// 第 `page` 页末尾对应的像素位置（进度填充的右端）
pub fn page_end_offset(
    page: usize,
    track_width: f64,
    total_pages: usize,
) -> LayoutResult<f64> {
    segment_bounds(page, track_width, total_pages).map(|s| s.right())
}

fn check_track(track_width: f64, total_pages: usize) -> LayoutResult<()> {
    if total_pages == 0 {
        return Err(ScrubberError::DegenerateLayout(
            "document has no pages".into(),
        ));
    }
    if !track_width.is_finite() || track_width <= 0.0 {
        return Err(ScrubberError::DegenerateLayout(format!(
            "track width {track_width}"
        )));
    }
    Ok(())
}

fn finite(value: f64, what: &str) -> LayoutResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ScrubberError::DegenerateLayout(format!("{what} is {value}")))
    }
}

fn drawable(rect: Rect, what: &str) -> LayoutResult<Rect> {
    if rect.is_drawable() {
        Ok(rect)
    } else {
        Err(ScrubberError::DegenerateLayout(format!("{what} {rect:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calculator(compact: bool) -> LayoutCalculator {
        LayoutCalculator::new(LayoutMetrics::default(), compact)
    }

    #[test]
    fn thumb_grows_while_dragging() {
        let desktop = calculator(false);
        let compact = calculator(true);
        assert_eq!(desktop.thumb_size(false), 16.0);
        assert_eq!(desktop.thumb_size(true), 20.0);
        assert_eq!(compact.thumb_size(false), 12.0);
        assert_eq!(compact.thumb_size(true), 16.0);
    }

    #[test]
    fn thumb_spans_first_to_last_page() {
        let calc = calculator(false);
        assert_eq!(calc.thumb_offset(200.0, 10, 1, 16.0).unwrap(), 0.0);
        assert_eq!(calc.thumb_offset(200.0, 10, 10, 16.0).unwrap(), 184.0);
    }

    #[test]
    fn thumb_never_negative_on_narrow_track() {
        let calc = calculator(false);
        assert_eq!(calc.thumb_offset(10.0, 10, 10, 16.0).unwrap(), 0.0);
    }

    #[test]
    fn single_page_thumb_stays_at_origin() {
        let calc = calculator(false);
        let input = LayoutInput {
            track_width: 200.0,
            total_pages: 1,
            display_page: 1,
            is_dragging: true,
        };
        let geometry = calc.geometry(&input).unwrap();
        assert_eq!(geometry.thumb.x, 0.0);
        assert_eq!(geometry.segment_width, 200.0);
    }

    #[test]
    fn preview_is_clamped_inside_track_and_above_it() {
        let calc = calculator(false);
        let at_start = Rect::new(0.0, 0.0, 20.0, 20.0);
        let at_end = Rect::new(180.0, 0.0, 20.0, 20.0);

        let left = calc.preview_box(&at_start, 200.0).unwrap();
        assert_eq!(left.x, 0.0);
        assert_eq!(left.bottom(), -8.0);

        let right = calc.preview_box(&at_end, 200.0).unwrap();
        assert_eq!(right.right(), 200.0);
    }

    #[test]
    fn preview_only_while_dragging() {
        let calc = calculator(true);
        let mut input = LayoutInput {
            track_width: 300.0,
            total_pages: 30,
            display_page: 15,
            is_dragging: false,
        };
        assert!(calc.geometry(&input).unwrap().preview.is_none());
        input.is_dragging = true;
        let preview = calc.geometry(&input).unwrap().preview.unwrap();
        assert_eq!(preview.width, 48.0);
        assert_eq!(preview.height, 24.0);
    }

    #[test]
    fn degenerate_inputs_are_rejected() {
        let calc = calculator(false);
        let mut input = LayoutInput {
            track_width: 0.0,
            total_pages: 10,
            display_page: 1,
            is_dragging: false,
        };
        assert!(matches!(
            calc.geometry(&input),
            Err(ScrubberError::DegenerateLayout(_))
        ));
        input.track_width = 100.0;
        input.total_pages = 0;
        assert!(calc.geometry(&input).is_err());
    }

    #[test]
    fn segments_tile_the_track() {
        let first = segment_bounds(1, 200.0, 10).unwrap();
        let last = segment_bounds(10, 200.0, 10).unwrap();
        assert_eq!(first, Segment { x: 0.0, width: 20.0 });
        assert_eq!(last.right(), 200.0);
    }

    #[test]
    fn out_of_range_segment_is_an_error() {
        assert!(matches!(
            segment_bounds(0, 200.0, 10),
            Err(ScrubberError::OutOfRangeIndex { page: 0, .. })
        ));
        assert!(matches!(
            segment_bounds(11, 200.0, 10),
            Err(ScrubberError::OutOfRangeIndex { page: 11, .. })
        ));
    }

    #[test]
    fn tick_density_depends_on_mode() {
        assert!(calculator(false).shows_ticks(30));
        assert!(!calculator(true).shows_ticks(30));
        assert!(!calculator(false).shows_ticks(1));
    }

    #[test]
    fn glow_hidden_only_for_narrow_compact_segments() {
        assert!(calculator(false).shows_glow(1.0));
        assert!(!calculator(true).shows_glow(1.0));
        assert!(calculator(true).shows_glow(10.0));
    }
}
