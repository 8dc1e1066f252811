//! 交互式定位条查看器

use colored::*;
use crossterm::{
    cursor::MoveTo,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};

use crate::app::config::settings::Settings;
use crate::app::error::types::Result;
use crate::cli::args::CliArgs;
use crate::core::input::keyboard::{map_key, KeyCommand, KeyboardHandler};
use crate::core::input::pointer::{PointerHandler, TrackRegion};
use crate::core::scrubber::interaction::InteractionState;
use crate::core::scrubber::layout::LayoutCalculator;
use crate::core::scrubber::renderer::{RepaintKey, TrackRenderer};
use crate::core::viewer::display_utils::{format_page_ranges, format_status};
use crate::core::viewer::navigation::{NavAction, NavigationState};
use crate::core::viewer::scrubber_view::ScrubberView;
use crate::core::viewer::session::DocumentSession;
use crate::core::viewer::terminal::TerminalManager;

/// 标题与状态行
const HEADER_ROWS: u16 = 2;

/// 决定是否重绘的帧特征
#[derive(Debug, Clone, PartialEq)]
struct FrameSignature {
    key: RepaintKey,
    state: InteractionState,
    columns: usize,
    live_preview: Option<usize>,
    picker: Option<String>,
}

/// 定位条查看器
pub struct ScrubberViewer {
    args: CliArgs,
    session: DocumentSession,
    view: ScrubberView,
    // 模块化组件
    terminal_manager: TerminalManager,
    keyboard_handler: KeyboardHandler,
    pointer_handler: PointerHandler,
    margin_columns: usize,
    // 状态管理
    last_frame: Option<FrameSignature>, // 上次绘制的帧特征，用于检测是否需要重绘
}

impl ScrubberViewer {
    /// 创建新的查看器
    pub fn new(args: CliArgs, settings: Settings) -> Result<Self> {
        let session = DocumentSession::new(
            args.total_pages,
            args.current_page,
            args.cached_pages.clone(),
            args.prefetch,
        );

        let compact = args.compact || settings.compact_mode;
        let renderer = TrackRenderer::new(
            LayoutCalculator::new(settings.layout.clone(), compact),
            settings.colors.clone(),
        );
        let cell = settings.terminal.cell_size();
        let view = ScrubberView::new(
            renderer,
            cell,
            settings.terminal.backdrop_color,
        );

        let terminal_manager = TerminalManager::new();
        let margin_columns = settings.terminal.margin_columns;
        let pointer_handler = PointerHandler::new(
            Self::track_region(&view, &terminal_manager, margin_columns),
            cell.width,
        );

        tracing::info!(
            total_pages = args.total_pages,
            current_page = session.current_page(),
            compact,
            "viewer created"
        );

        Ok(Self {
            args,
            session,
            view,
            terminal_manager,
            keyboard_handler: KeyboardHandler::default(),
            pointer_handler,
            margin_columns,
            last_frame: None,
        })
    }

    /// 运行查看器
    pub fn run(&mut self) -> Result<()> {
        if self.args.no_color {
            colored::control::set_override(false);
        }

        let result = self.interactive_mode();

        // 恢复终端（由 TerminalManager 的 Drop trait 兜底）
        self.view.dispose();
        self.terminal_manager.exit_raw_mode()?;
        result
    }

    /// 交互模式
    fn interactive_mode(&mut self) -> Result<()> {
        self.terminal_manager.enter_raw_mode()?;
        self.terminal_manager.clear_screen()?;

        loop {
            let frame = self.frame_signature();
            if self.last_frame.as_ref() != Some(&frame) {
                self.draw()?;
                self.last_frame = Some(frame);
            }

            match event::read()? {
                Event::Key(KeyEvent { code, kind, .. }) => {
                    if kind == KeyEventKind::Release {
                        continue;
                    }
                    if self.session.is_picker_open() {
                        self.handle_picker_key(code);
                        continue;
                    }
                    if !self.keyboard_handler.should_process_key(&code) {
                        continue;
                    }
                    match map_key(code) {
                        Some(KeyCommand::Quit) => break,
                        Some(KeyCommand::Navigate(action)) => {
                            self.navigate(action)
                        }
                        Some(KeyCommand::ToggleCompact) => {
                            let compact = !self.view.is_compact();
                            self.view.set_compact(compact);
                            self.update_region();
                            self.terminal_manager.clear_screen()?;
                            self.last_frame = None;
                        }
                        None => {}
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(pointer) = self.pointer_handler.map(&mouse) {
                        let snapshot = self.session.snapshot();
                        let columns = self.track_columns();
                        self.view.handle_pointer(
                            pointer,
                            columns,
                            &snapshot,
                            &mut self.session,
                        );
                        if !self.view.controller().is_dragging() {
                            self.session.clear_live_preview();
                        }
                    }
                }
                Event::Resize(_, _) => {
                    // 尺寸变化：手势作废并强制重绘
                    self.view.cancel_gesture();
                    self.update_region();
                    self.terminal_manager.clear_screen()?;
                    self.last_frame = None;
                }
                _ => continue,
            }
        }

        Ok(())
    }

    fn navigate(&mut self, action: NavAction) {
        let snapshot = self.session.snapshot();
        let navigation = self.view.navigation(&snapshot);
        if let Err(e) = navigation.trigger(action, &mut self.session) {
            tracing::warn!(?action, error = %e, "navigation failed");
        }
    }

    fn handle_picker_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) => self.session.picker_push(c),
            KeyCode::Backspace => self.session.picker_backspace(),
            KeyCode::Esc => self.session.picker_cancel(),
            KeyCode::Enter => {
                if let Err(e) = self.session.picker_confirm() {
                    tracing::warn!(error = %e, "page picker input rejected");
                }
            }
            _ => {}
        }
    }

    fn track_columns(&self) -> usize {
        self.terminal_manager
            .calculate_track_columns(self.margin_columns)
    }

    fn track_region(
        view: &ScrubberView,
        terminal_manager: &TerminalManager,
        margin_columns: usize,
    ) -> TrackRegion {
        let columns =
            terminal_manager.calculate_track_columns(margin_columns);
        TrackRegion {
            left: margin_columns as u16,
            row: HEADER_ROWS + view.rows_above_track() as u16,
            columns: columns as u16,
        }
    }

    fn update_region(&mut self) {
        let region = Self::track_region(
            &self.view,
            &self.terminal_manager,
            self.margin_columns,
        );
        self.pointer_handler.set_region(region);
    }

    fn frame_signature(&self) -> FrameSignature {
        let snapshot = self.session.snapshot();
        FrameSignature {
            key: RepaintKey::new(&snapshot, self.view.is_compact()),
            state: self.view.controller().state(),
            columns: self.track_columns(),
            live_preview: self.session.live_preview(),
            picker: self.session.picker_input().map(str::to_string),
        }
    }

    /// 绘制整屏
    fn draw(&mut self) -> Result<()> {
        let snapshot = self.session.snapshot();
        let columns = self.track_columns();
        let margin = self.margin_columns as u16;
        let mut out = io::stdout();

        queue!(out, MoveTo(0, 0), Clear(ClearType::CurrentLine))?;
        queue!(out, Print("页面定位条".bright_white().bold()))?;

        queue!(out, MoveTo(0, 1), Clear(ClearType::CurrentLine))?;
        let status = format_status(
            snapshot.current_page,
            snapshot.total_pages,
            self.session.live_preview(),
        );
        queue!(out, Print(status.bright_cyan()))?;

        let canvas = self.view.frame(&snapshot, columns);
        canvas.render(&mut out, margin, HEADER_ROWS)?;

        let mut row = HEADER_ROWS + canvas.rows() as u16 + 1;
        queue!(out, MoveTo(margin, row), Clear(ClearType::CurrentLine))?;
        queue!(out, Print(Self::format_buttons(self.view.navigation(&snapshot))))?;
        row += 1;

        queue!(out, MoveTo(margin, row), Clear(ClearType::CurrentLine))?;
        if let Some(input) = self.session.picker_input() {
            queue!(
                out,
                Print(format!("跳转到页码: {}_", input).bright_yellow())
            )?;
        }
        row += 1;

        if self.args.verbose {
            queue!(out, MoveTo(margin, row), Clear(ClearType::CurrentLine))?;
            queue!(
                out,
                Print(
                    format!(
                        "已缓存: {}",
                        format_page_ranges(self.session.cached_pages())
                    )
                    .bright_black()
                )
            )?;
            row += 1;
        }

        queue!(out, MoveTo(0, row), Clear(ClearType::CurrentLine))?;
        queue!(out, Print("=".repeat(80)))?;
        queue!(out, MoveTo(0, row + 1), Clear(ClearType::CurrentLine))?;
        queue!(
            out,
            Print(
                "导航: 鼠标拖动/点击轨道 | ←→ 翻页 | Home/End 首页/末页 | g 跳转 | c 紧凑 | ESC/q 退出"
                    .bright_black()
            )
        )?;

        out.flush()?;
        Ok(())
    }

    /// 导航按钮行，禁用的按钮置灰
    fn format_buttons(navigation: NavigationState) -> String {
        [
            (NavAction::First, "⏮ 首页"),
            (NavAction::Previous, "◀ 上一页"),
            (NavAction::PageSelector, "# 选页"),
            (NavAction::Next, "下一页 ▶"),
            (NavAction::Last, "末页 ⏭"),
        ]
        .iter()
        .map(|&(action, label)| {
            let button = format!("[{}]", label);
            if navigation.is_enabled(action) {
                button.bright_white().to_string()
            } else {
                button.bright_black().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
    }
}
