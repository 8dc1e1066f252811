//! 错误类型定义

use std::path::PathBuf;

use thiserror::Error;

/// 拖动定位条错误类型
#[derive(Error, Debug)]
pub enum ScrubberError {
    /// 轨道宽高非正、结果非有限值，或文档没有页面
    #[error("Degenerate layout: {0}")]
    DegenerateLayout(String),

    /// 页码超出 [1, total_pages]
    #[error("Page {page} out of range 1..={total_pages}")]
    OutOfRangeIndex { page: usize, total_pages: usize },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Config error in {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// 应用程序通用结果类型
pub type Result<T> = anyhow::Result<T>;
