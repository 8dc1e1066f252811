//! 键盘输入处理

use crossterm::event::KeyCode;
use std::time::{Duration, Instant};

use crate::core::viewer::navigation::NavAction;

/// 键盘命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Navigate(NavAction),
    ToggleCompact,
    Quit,
}

/// 普通模式下的按键映射
pub fn map_key(code: KeyCode) -> Option<KeyCommand> {
    let command = match code {
        KeyCode::Esc | KeyCode::Char('q') => KeyCommand::Quit,
        KeyCode::Left => KeyCommand::Navigate(NavAction::Previous),
        KeyCode::Right => KeyCommand::Navigate(NavAction::Next),
        KeyCode::Home => KeyCommand::Navigate(NavAction::First),
        KeyCode::End => KeyCommand::Navigate(NavAction::Last),
        KeyCode::Char('g') => KeyCommand::Navigate(NavAction::PageSelector),
        KeyCode::Char('c') => KeyCommand::ToggleCompact,
        _ => return None,
    };
    Some(command)
}

/// 键盘输入处理器
pub struct KeyboardHandler {
    last_key_time: Instant,
    last_key_code: Option<KeyCode>,
    debounce: Duration,
}

impl KeyboardHandler {
    /// 创建新的键盘处理器
    pub fn new(debounce_duration_ms: u64) -> Self {
        Self {
            last_key_time: Instant::now(),
            last_key_code: None,
            debounce: Duration::from_millis(debounce_duration_ms),
        }
    }

    /// 判断是否应该处理按键（防抖处理）
    pub fn should_process_key(&mut self, code: &KeyCode) -> bool {
        self.should_process_key_at(code, Instant::now())
    }

    fn should_process_key_at(
        &mut self,
        code: &KeyCode,
        now: Instant,
    ) -> bool {
        let is_same_key = self.last_key_code.as_ref() == Some(code);

        // 同一个键必须间隔指定时间
        if is_same_key
            && now.duration_since(self.last_key_time) < self.debounce
        {
            return false;
        }

        self.last_key_code = Some(*code);
        self.last_key_time = now;
        true
    }
}

impl Default for KeyboardHandler {
    /// 150ms 防抖
    fn default() -> Self {
        Self::new(150)
    }
}
