//! 输入处理

pub mod keyboard;
pub mod pointer;
