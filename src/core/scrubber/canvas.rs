//! 绘制表面抽象
//!
//! 渲染器只通过 [`Canvas`] 输出图形，终端、测试记录器等
//! 具体表面各自实现该 trait。

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::app::error::types::ScrubberError;

/// RGBA 颜色，分量均为 0-255
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// 以 0.0-1.0 的不透明度替换 alpha
    pub fn with_alpha(self, opacity: f64) -> Self {
        let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { a, ..self }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// 将自身按 alpha 叠加到不透明的 `below` 上（source-over）
    pub fn over(self, below: Color) -> Color {
        let alpha = self.a as u32;
        let inv = 255 - alpha;
        let mix = |top: u8, bottom: u8| -> u8 {
            ((top as u32 * alpha + bottom as u32 * inv + 127)
                / 255) as u8
        };
        Color::rgb(
            mix(self.r, below.r),
            mix(self.g, below.g),
            mix(self.b, below.b),
        )
    }
}

impl FromStr for Color {
    type Err = ScrubberError;

    /// 解析 `#RRGGBB` 或 `#RRGGBBAA`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ScrubberError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
            return Err(invalid());
        }

        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| invalid())
        };
        let alpha = if hex.len() == 8 { channel(6)? } else { 255 };

        Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
    }
}

impl TryFrom<String> for Color {
    type Error = ScrubberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)?;
        if !self.is_opaque() {
            write!(f, "{:02X}", self.a)?;
        }
        Ok(())
    }
}

/// 轴对齐矩形（像素坐标，y 轴向下）
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// 所有分量有限且宽高非负
    pub fn is_drawable(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width >= 0.0
            && self.height >= 0.0
    }
}

/// 绘制表面
pub trait Canvas {
    /// 填充矩形
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// 填充圆角矩形；不支持圆角的表面可退化为 `fill_rect`
    fn fill_rounded_rect(
        &mut self,
        rect: Rect,
        _radius: f64,
        color: Color,
    ) {
        self.fill_rect(rect, color);
    }

    /// 绘制线段，`width` 为描边宽度
    fn draw_line(
        &mut self,
        from: (f64, f64),
        to: (f64, f64),
        width: f64,
        color: Color,
    );

    /// 绘制单行文本，`y` 为文本垂直中线
    fn draw_text(&mut self, x: f64, y: f64, text: &str, color: Color);

    /// 文本绘制宽度
    fn measure_text(&self, text: &str) -> f64;
}
