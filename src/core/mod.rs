//! 核心模块

pub mod input;
pub mod scrubber;
pub mod viewer;
