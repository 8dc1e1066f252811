//! 终端管理模块

use crate::app::error::types::Result;
use crossterm::{
    cursor::{Hide, Show},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        self, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io;

/// 终端管理器
pub struct TerminalManager {
    is_raw_mode: bool,
}

impl TerminalManager {
    /// 创建新的终端管理器
    pub fn new() -> Self {
        Self { is_raw_mode: false }
    }

    /// 进入原始模式并捕获鼠标
    pub fn enter_raw_mode(&mut self) -> Result<()> {
        if !self.is_raw_mode {
            terminal::enable_raw_mode()?;
            execute!(
                io::stdout(),
                EnterAlternateScreen,
                EnableMouseCapture,
                Hide
            )?;
            self.is_raw_mode = true;
            tracing::debug!("terminal raw mode on");
        }
        Ok(())
    }

    /// 退出原始模式
    pub fn exit_raw_mode(&mut self) -> Result<()> {
        if self.is_raw_mode {
            execute!(
                io::stdout(),
                Show,
                DisableMouseCapture,
                LeaveAlternateScreen
            )?;
            terminal::disable_raw_mode()?;
            self.is_raw_mode = false;
            tracing::debug!("terminal raw mode off");
        }
        Ok(())
    }

    /// 清空屏幕
    pub fn clear_screen(&self) -> Result<()> {
        execute!(io::stdout(), Clear(ClearType::All))?;
        Ok(())
    }

    /// 获取终端尺寸（列, 行）
    pub fn get_size(&self) -> (usize, usize) {
        terminal::size()
            .map(|(w, h)| (w as usize, h as usize))
            .unwrap_or((80, 24))
    }

    /// 计算轨道可用列数（两侧各留 `margin` 列）
    pub fn calculate_track_columns(&self, margin: usize) -> usize {
        let (width, _) = self.get_size();
        width.saturating_sub(margin * 2)
    }
}

impl Default for TerminalManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalManager {
    fn drop(&mut self) {
        let _ = self.exit_raw_mode();
    }
}
