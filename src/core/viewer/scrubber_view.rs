//! 定位条视图：把交互控制器、绘制器与导航按钮组合到终端画布上
//!
//! 轨道层按 [`RepaintKey`] 缓存，滑块与预览框每帧叠加绘制。
//! 宿主快照进入视图时先夹紧当前页。

use crate::core::scrubber::canvas::Color;
use crate::core::scrubber::interaction::{PointerEvent, ScrubController};
use crate::core::scrubber::layout::LayoutInput;
use crate::core::scrubber::model::{PageListener, PageSnapshot};
use crate::core::scrubber::renderer::{
    preview_label, RepaintKey, TrackRenderer,
};
use crate::core::viewer::navigation::NavigationState;
use crate::core::viewer::terminal_canvas::{CellSize, TerminalCanvas};

#[derive(Debug)]
struct TrackLayer {
    key: RepaintKey,
    columns: usize,
    canvas: TerminalCanvas,
}

/// 定位条视图
#[derive(Debug)]
pub struct ScrubberView {
    controller: ScrubController,
    renderer: TrackRenderer,
    cell: CellSize,
    backdrop: Color,
    track_layer: Option<TrackLayer>,
    track_repaints: u64,
}

impl ScrubberView {
    pub fn new(
        renderer: TrackRenderer,
        cell: CellSize,
        backdrop: Color,
    ) -> Self {
        Self {
            controller: ScrubController::new(),
            renderer,
            cell,
            backdrop,
            track_layer: None,
            track_repaints: 0,
        }
    }

    pub fn controller(&self) -> &ScrubController {
        &self.controller
    }

    pub fn is_compact(&self) -> bool {
        self.renderer.layout().is_compact()
    }

    pub fn set_compact(&mut self, compact: bool) {
        self.renderer.layout_mut().set_compact(compact);
    }

    /// 轨道层累计重绘次数
    pub fn track_repaints(&self) -> u64 {
        self.track_repaints
    }

    /// 轨道像素宽度
    pub fn track_width(&self, columns: usize) -> f64 {
        columns as f64 * self.cell.width
    }

    /// 预览框及间距占用的行数
    pub fn rows_above_track(&self) -> usize {
        let layout = self.renderer.layout();
        let (_, preview_height) = layout.preview_size();
        let above = layout.metrics().preview_margin + preview_height;
        (above / self.cell.height).ceil().max(0.0) as usize
    }

    pub fn track_rows(&self) -> usize {
        let track_height = self.renderer.layout().track_height();
        let rows = (track_height / self.cell.height).ceil();
        rows.max(1.0) as usize
    }

    pub fn total_rows(&self) -> usize {
        self.rows_above_track() + self.track_rows()
    }

    pub fn handle_pointer(
        &mut self,
        event: PointerEvent,
        columns: usize,
        snapshot: &PageSnapshot,
        listener: &mut dyn PageListener,
    ) {
        let track_width = self.track_width(columns);
        let snapshot = snapshot.clone().normalized();
        self.controller.handle(event, track_width, &snapshot, listener);
    }

    /// 作废当前手势（终端尺寸变化等）
    pub fn cancel_gesture(&mut self) {
        self.controller.cancel();
    }

    pub fn navigation(&self, snapshot: &PageSnapshot) -> NavigationState {
        NavigationState::new(snapshot.current_page, snapshot.total_pages)
    }

    /// 绘制一帧
    pub fn frame(
        &mut self,
        snapshot: &PageSnapshot,
        columns: usize,
    ) -> TerminalCanvas {
        let snapshot = &snapshot.clone().normalized();
        let track_width = self.track_width(columns);
        let key = self.renderer.repaint_key(snapshot);

        let reusable = self.track_layer.as_ref().is_some_and(|layer| {
            layer.columns == columns && !key.should_repaint(Some(&layer.key))
        });

        if !reusable {
            let mut canvas = TerminalCanvas::new(
                columns,
                self.total_rows(),
                self.cell,
                (0.0, -(self.rows_above_track() as f64 * self.cell.height)),
                self.backdrop,
            );
            self.renderer.paint_track(&mut canvas, snapshot, track_width);
            self.track_repaints += 1;
            tracing::trace!(
                columns,
                repaints = self.track_repaints,
                "repaint track layer"
            );
            self.track_layer = Some(TrackLayer {
                key,
                columns,
                canvas,
            });
        }

        let mut canvas = match &self.track_layer {
            Some(layer) => layer.canvas.clone(),
            None => {
                return TerminalCanvas::new(
                    0,
                    0,
                    self.cell,
                    (0.0, 0.0),
                    self.backdrop,
                )
            }
        };

        if !snapshot.has_pages() {
            return canvas;
        }

        let input = LayoutInput {
            track_width,
            total_pages: snapshot.total_pages,
            display_page: self.controller.display_page(snapshot.current_page),
            is_dragging: self.controller.is_dragging(),
        };
        match self.renderer.layout().geometry(&input) {
            Ok(geometry) => {
                let label = self
                    .controller
                    .preview_page()
                    .map(|page| preview_label(page, snapshot.total_pages));
                self.renderer.paint_thumb(
                    &mut canvas,
                    &geometry,
                    label.as_deref(),
                );
            }
            Err(e) => tracing::debug!(error = %e, "skip thumb"),
        }

        canvas
    }

    /// 视图销毁：清空交互状态与缓存层
    pub fn dispose(&mut self) {
        self.controller.dispose();
        self.track_layer = None;
    }
}
