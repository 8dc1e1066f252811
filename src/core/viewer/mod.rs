//! 视图与宿主会话

pub mod display_utils;
pub mod navigation;
pub mod scrubber_view;
pub mod session;
pub mod terminal;
pub mod terminal_canvas;
