//! 文档页面拖动定位条
//!
//! 核心在 [`core::scrubber`]：指针位置与页码的换算、轨道布局、
//! 轨道绘制以及拖动交互状态机。[`cli`] 提供终端演示宿主。

pub mod app;
pub mod cli;
pub mod core;
