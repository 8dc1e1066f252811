//! TOML 配置加载
//!
//! ```toml
//! compact_mode = false
//!
//! [colors]
//! primary_color = "#2196F3"
//! cached_color = "#90CAF980"
//! background_color = "#424242"
//!
//! [layout]
//! thumb_size = 16.0
//!
//! [terminal]
//! cell_width = 8.0
//! cell_height = 16.0
//! ```

use std::path::{Path, PathBuf};

use path_absolutize::Absolutize;
use serde::Deserialize;

use crate::app::error::types::{Result, ScrubberError};
use crate::core::scrubber::canvas::Color;
use crate::core::scrubber::layout::LayoutMetrics;
use crate::core::scrubber::renderer::TrackStyle;
use crate::core::viewer::terminal_canvas::CellSize;

const APP_DIR: &str = "page-scrubber";
const CONFIG_FILE: &str = "config.toml";

/// 终端相关配置
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TerminalSettings {
    /// 单元格像素宽度
    pub cell_width: f64,
    /// 单元格像素高度
    pub cell_height: f64,
    /// 轨道左右留白列数
    pub margin_columns: usize,
    /// 终端底色，用于半透明颜色混合
    pub backdrop_color: Color,
}

impl Default for TerminalSettings {
    fn default() -> Self {
        Self {
            cell_width: 8.0,
            cell_height: 16.0,
            margin_columns: 2,
            backdrop_color: Color::rgb(0, 0, 0),
        }
    }
}

impl TerminalSettings {
    pub fn cell_size(&self) -> CellSize {
        CellSize {
            width: self.cell_width,
            height: self.cell_height,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub compact_mode: bool,
    pub colors: TrackStyle,
    pub layout: LayoutMetrics,
    pub terminal: TerminalSettings,
}

impl Settings {
    /// 默认配置文件路径
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// 加载配置
    ///
    /// 显式指定的文件必须存在；默认位置没有文件时使用默认值。
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => {
                let path = path.absolutize()?.into_owned();
                Self::from_file(&path)
            }
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => {
                    tracing::debug!("no config file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ScrubberError::Config {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;
        let settings = Self::parse(&text, path)?;
        tracing::info!(path = %path.display(), "config loaded");
        Ok(settings)
    }

    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        let settings: Self =
            toml::from_str(text).map_err(|e| ScrubberError::Config {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        settings.validate(path)?;
        Ok(settings)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        let cell = &self.terminal;
        if !(cell.cell_width > 0.0 && cell.cell_height > 0.0) {
            return Err(ScrubberError::Config {
                path: path.to_path_buf(),
                message: format!(
                    "cell size must be positive, got {}x{}",
                    cell.cell_width, cell.cell_height
                ),
            }
            .into());
        }
        Ok(())
    }
}
