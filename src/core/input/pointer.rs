//! 鼠标事件 → 轨道指针事件

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::core::scrubber::interaction::PointerEvent;

/// 指针偏离轨道超过该行数视为离开
const LEAVE_ROWS: u16 = 3;

/// 列号（相对轨道左边缘）→ 指针像素偏移
///
/// 首列映射到 0，末列映射到轨道右边缘，两端的页总能点中；
/// 轨道外的列按同一比例外推。
pub fn column_offset(column: i32, columns: usize, cell_width: f64) -> f64 {
    let track_width = columns as f64 * cell_width;
    if columns <= 1 {
        return if column > 0 { track_width } else { 0.0 };
    }
    column as f64 / (columns - 1) as f64 * track_width
}

/// 轨道在终端中的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackRegion {
    pub left: u16,
    pub row: u16,
    pub columns: u16,
}

impl TrackRegion {
    fn contains(&self, column: u16, row: u16) -> bool {
        row == self.row
            && column >= self.left
            && column < self.left.saturating_add(self.columns)
    }

    fn is_near(&self, row: u16) -> bool {
        row.abs_diff(self.row) <= LEAVE_ROWS
    }
}

/// 鼠标事件映射器
#[derive(Debug)]
pub struct PointerHandler {
    region: TrackRegion,
    cell_width: f64,
    pressed: bool,
}

impl PointerHandler {
    pub fn new(region: TrackRegion, cell_width: f64) -> Self {
        Self {
            region,
            cell_width,
            pressed: false,
        }
    }

    /// 终端尺寸变化后更新轨道位置
    pub fn set_region(&mut self, region: TrackRegion) {
        self.region = region;
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// 转换鼠标事件；与轨道无关的事件返回 `None`
    pub fn map(&mut self, event: &MouseEvent) -> Option<PointerEvent> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left)
                if self.region.contains(event.column, event.row) =>
            {
                self.pressed = true;
                Some(PointerEvent::Down {
                    dx: self.offset(event.column),
                })
            }
            MouseEventKind::Drag(MouseButton::Left) if self.pressed => {
                if self.region.is_near(event.row) {
                    Some(PointerEvent::Move {
                        dx: self.offset(event.column),
                    })
                } else {
                    self.pressed = false;
                    Some(PointerEvent::Leave)
                }
            }
            MouseEventKind::Up(MouseButton::Left) if self.pressed => {
                self.pressed = false;
                Some(PointerEvent::Up)
            }
            _ => None,
        }
    }

    fn offset(&self, column: u16) -> f64 {
        column_offset(
            i32::from(column) - i32::from(self.region.left),
            usize::from(self.region.columns),
            self.cell_width,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scrubber::position::page_from_offset;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn handler() -> PointerHandler {
        PointerHandler::new(
            TrackRegion {
                left: 2,
                row: 10,
                columns: 20,
            },
            8.0,
        )
    }

    fn down(column: u16, row: u16) -> MouseEvent {
        mouse(MouseEventKind::Down(MouseButton::Left), column, row)
    }

    fn drag(column: u16, row: u16) -> MouseEvent {
        mouse(MouseEventKind::Drag(MouseButton::Left), column, row)
    }

    fn up(column: u16, row: u16) -> MouseEvent {
        mouse(MouseEventKind::Up(MouseButton::Left), column, row)
    }

    #[test]
    fn press_on_track_starts_drag() {
        let mut handler = handler();
        let event = handler.map(&down(2, 10));
        assert_eq!(event, Some(PointerEvent::Down { dx: 0.0 }));
        assert!(handler.is_pressed());
    }

    #[test]
    fn press_off_track_is_ignored() {
        let mut handler = handler();
        assert_eq!(handler.map(&down(2, 9)), None);
        assert_eq!(handler.map(&up(2, 10)), None);
    }

    #[test]
    fn end_cells_reach_track_edges() {
        let mut handler = handler();
        assert_eq!(
            handler.map(&down(21, 10)),
            Some(PointerEvent::Down { dx: 160.0 })
        );
        assert_eq!(
            handler.map(&drag(2, 10)),
            Some(PointerEvent::Move { dx: 0.0 })
        );
    }

    #[test]
    fn end_cells_select_first_and_last_page() {
        // 76 列 × 8px，页数远多于列数
        let width = 76.0 * 8.0;
        let first = column_offset(0, 76, 8.0);
        let last = column_offset(75, 76, 8.0);
        assert_eq!(page_from_offset(first, width, 1000), Some(1));
        assert_eq!(page_from_offset(last, width, 1000), Some(1000));
    }

    #[test]
    fn single_column_track() {
        assert_eq!(column_offset(0, 1, 8.0), 0.0);
        assert_eq!(column_offset(3, 1, 8.0), 8.0);
        assert_eq!(column_offset(-1, 1, 8.0), 0.0);
    }

    #[test]
    fn drag_past_edges_keeps_moving() {
        let mut handler = handler();
        handler.map(&down(5, 10));
        let Some(PointerEvent::Move { dx }) = handler.map(&drag(0, 11)) else {
            panic!("expected move");
        };
        assert!(dx < 0.0);
    }

    #[test]
    fn drag_far_away_leaves() {
        let mut handler = handler();
        handler.map(&down(5, 10));
        assert_eq!(handler.map(&drag(5, 2)), Some(PointerEvent::Leave));
        assert!(!handler.is_pressed());
        assert_eq!(handler.map(&up(5, 10)), None);
    }
}
