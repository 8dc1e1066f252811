//! 终端字符网格画布
//!
//! 像素坐标按单元格尺寸映射到终端行列：矩形覆盖单元格中心即填充该格，
//! 窄于一格的矩形至少占据其中点所在的格。半透明颜色叠加在格子现有背景上。

use std::io::Write;
use std::ops::Range;

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{
        Color as TermColor, Print, ResetColor, SetBackgroundColor,
        SetForegroundColor,
    },
};

use crate::core::scrubber::canvas::{Canvas, Color, Rect};

const TICK_GLYPH: char = '│';

/// 单元格像素尺寸
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSize {
    pub width: f64,
    pub height: f64,
}

impl Default for CellSize {
    fn default() -> Self {
        Self {
            width: 8.0,
            height: 16.0,
        }
    }
}

/// 终端单元格
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
    /// `None` 表示保留终端原有背景
    pub bg: Option<Color>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: None,
            bg: None,
        }
    }
}

/// 终端画布
#[derive(Debug, Clone)]
pub struct TerminalCanvas {
    columns: usize,
    rows: usize,
    cell: CellSize,
    /// 第 (0, 0) 格左上角的像素坐标
    origin: (f64, f64),
    /// 透明格子叠加半透明颜色时使用的底色
    backdrop: Color,
    cells: Vec<Cell>,
}

impl TerminalCanvas {
    pub fn new(
        columns: usize,
        rows: usize,
        cell: CellSize,
        origin: (f64, f64),
        backdrop: Color,
    ) -> Self {
        Self {
            columns,
            rows,
            cell,
            origin,
            backdrop,
            cells: vec![Cell::default(); columns * rows],
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell_at(&self, column: usize, row: usize) -> Option<&Cell> {
        if column < self.columns && row < self.rows {
            self.cells.get(row * self.columns + column)
        } else {
            None
        }
    }

    /// 像素坐标所在的行号
    pub fn row_of(&self, y: f64) -> Option<usize> {
        index_of(y - self.origin.1, self.cell.height, self.rows)
    }

    /// 输出到终端，`(left, top)` 为画布左上角的终端坐标
    pub fn render<W: Write>(
        &self,
        out: &mut W,
        left: u16,
        top: u16,
    ) -> std::io::Result<()> {
        for row in 0..self.rows {
            queue!(out, MoveTo(left, top + row as u16))?;
            for column in 0..self.columns {
                let cell = self.cells[row * self.columns + column];
                queue!(out, ResetColor)?;
                if let Some(bg) = cell.bg {
                    queue!(out, SetBackgroundColor(term_color(bg)))?;
                }
                if let Some(fg) = cell.fg {
                    queue!(out, SetForegroundColor(term_color(fg)))?;
                }
                queue!(out, Print(cell.ch))?;
            }
            queue!(out, ResetColor)?;
        }
        Ok(())
    }

    fn column_span(&self, x0: f64, x1: f64) -> Range<usize> {
        span(x0 - self.origin.0, x1 - self.origin.0, self.cell.width, self.columns)
    }

    fn row_span(&self, y0: f64, y1: f64) -> Range<usize> {
        span(y0 - self.origin.1, y1 - self.origin.1, self.cell.height, self.rows)
    }

    fn blend_bg(&mut self, column: usize, row: usize, color: Color) {
        let backdrop = self.backdrop;
        let cell = &mut self.cells[row * self.columns + column];
        let below = cell.bg.unwrap_or(backdrop);
        cell.bg = Some(color.over(below));
    }
}

impl Canvas for TerminalCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if !rect.is_drawable() {
            return;
        }
        let columns = self.column_span(rect.x, rect.right());
        let rows = self.row_span(rect.y, rect.bottom());
        for row in rows {
            for column in columns.clone() {
                self.blend_bg(column, row, color);
            }
        }
    }

    /// 水平线按矩形填充，其余线按竖线字符绘制
    fn draw_line(
        &mut self,
        from: (f64, f64),
        to: (f64, f64),
        width: f64,
        color: Color,
    ) {
        let (x0, x1) = (from.0.min(to.0), from.0.max(to.0));
        let (y0, y1) = (from.1.min(to.1), from.1.max(to.1));

        if y0 == y1 {
            let half = width / 2.0;
            self.fill_rect(Rect::new(x0, y0 - half, x1 - x0, width), color);
            return;
        }

        let Some(column) =
            index_of((x0 + x1) / 2.0 - self.origin.0, self.cell.width, self.columns)
        else {
            return;
        };
        let backdrop = self.backdrop;
        for row in self.row_span(y0, y1) {
            let cell = &mut self.cells[row * self.columns + column];
            cell.ch = TICK_GLYPH;
            cell.fg = Some(color.over(cell.bg.unwrap_or(backdrop)));
        }
    }

    fn draw_text(&mut self, x: f64, y: f64, text: &str, color: Color) {
        let Some(row) = self.row_of(y) else {
            return;
        };
        let Some(start) =
            index_of(x - self.origin.0, self.cell.width, self.columns)
        else {
            return;
        };
        for (column, ch) in (start..self.columns).zip(text.chars()) {
            let cell = &mut self.cells[row * self.columns + column];
            cell.ch = ch;
            cell.fg = Some(color);
        }
    }

    fn measure_text(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.cell.width
    }
}

fn term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// 坐标所在的格子
fn index_of(offset: f64, size: f64, count: usize) -> Option<usize> {
    if !offset.is_finite() || offset < 0.0 {
        return None;
    }
    let index = (offset / size).floor() as usize;
    (index < count).then_some(index)
}

/// 中心落在 [a, b) 内的格子；若没有且区间与网格相交，取中点所在格
fn span(a: f64, b: f64, size: f64, count: usize) -> Range<usize> {
    if !(a.is_finite() && b.is_finite()) || b <= a || size <= 0.0 {
        return 0..0;
    }
    let first = ((a / size) - 0.5).ceil().max(0.0) as usize;
    let end = (((b / size) - 0.5).ceil().max(0.0) as usize).min(count);
    if first < end {
        return first..end;
    }
    match index_of((a + b) / 2.0, size, count) {
        Some(index) => index..index + 1,
        None => 0..0,
    }
}
