//! The console application: owns the orchestrator and all UI state, maps
//! keys to actions, and lays out the frame.

pub mod code_actions;
pub mod code_buffer;
pub mod script_control;

use crate::clipboard::Clipboard;
use crate::config::{Config, ThemeName};
use crate::docs::{DocsTab, INITIAL_SCRIPT};
use crate::model::{LightKind, ObjectKind, SceneState};
use crate::services::{ExecutionOrchestrator, Timer, ToastQueue};
use crate::view::theme::Theme;
use crate::view::ui;
use code_buffer::CodeBuffer;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

/// Zoom slider step for the toolbar keys
pub const ZOOM_STEP: u32 = 5;

/// Console rows moved per Alt+Up/Down
const CONSOLE_SCROLL_STEP: usize = 3;

/// Key press that types `ch` into the editor. Carriage returns type nothing.
pub fn typed_key(ch: char) -> Option<KeyCode> {
    match ch {
        '\r' => None,
        '\n' => Some(KeyCode::Enter),
        '\t' => Some(KeyCode::Tab),
        _ => Some(KeyCode::Char(ch)),
    }
}

/// Tabs of the right-hand pane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaneTab {
    #[default]
    Editor,
    ApiReference,
    Settings,
}

impl PaneTab {
    pub const ALL: [PaneTab; 3] = [PaneTab::Editor, PaneTab::ApiReference, PaneTab::Settings];

    pub fn title(self) -> &'static str {
        match self {
            PaneTab::Editor => "Code Editor",
            PaneTab::ApiReference => "API Reference",
            PaneTab::Settings => "Settings",
        }
    }

    pub fn next(self) -> Self {
        match self {
            PaneTab::Editor => PaneTab::ApiReference,
            PaneTab::ApiReference => PaneTab::Settings,
            PaneTab::Settings => PaneTab::Editor,
        }
    }
}

/// Toolbar widgets that live only in the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolbarState {
    pub zoom: u32,
    pub light: LightKind,
}

/// Open documentation dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocsDialog {
    pub tab: DocsTab,
    pub scroll: usize,
}

pub struct Console<T: Timer> {
    config: Config,
    orchestrator: ExecutionOrchestrator<T, ToastQueue>,
    code: CodeBuffer,
    /// File the code was loaded from; Ctrl+S writes back to it
    source_path: Option<PathBuf>,
    toolbar: ToolbarState,
    pane: PaneTab,
    docs: Option<DocsDialog>,
    theme: ThemeName,
    clipboard: Clipboard,
    working_dir: PathBuf,
    width: u16,
    height: u16,
    /// Rows scrolled up from the tail of the console log
    console_scroll_back: usize,
    /// Set by the log observer when an entry is appended
    new_tail: Rc<Cell<bool>>,
    tick: u64,
    should_quit: bool,
}

impl<T: Timer> Console<T> {
    pub fn new(
        config: Config,
        width: u16,
        height: u16,
        timer: T,
        working_dir: PathBuf,
        clipboard: Clipboard,
    ) -> Self {
        let toasts = ToastQueue::new(
            Duration::from_millis(config.console.toast_duration_ms),
            config.console.max_visible_toasts,
        );
        let mut orchestrator =
            ExecutionOrchestrator::new(timer, toasts, config.execution.latency());

        let new_tail = Rc::new(Cell::new(false));
        let flag = Rc::clone(&new_tail);
        orchestrator.subscribe_log(move |_| flag.set(true));

        tracing::info!(
            "console started ({}x{}, latency {:?})",
            width,
            height,
            orchestrator.latency()
        );

        Self {
            toolbar: ToolbarState {
                zoom: config.editor.initial_zoom,
                light: LightKind::default(),
            },
            theme: config.theme,
            config,
            orchestrator,
            code: CodeBuffer::new(INITIAL_SCRIPT),
            source_path: None,
            pane: PaneTab::default(),
            docs: None,
            clipboard,
            working_dir,
            width,
            height,
            console_scroll_back: 0,
            new_tail,
            tick: 0,
            should_quit: false,
        }
    }

    /// Replace the code buffer with the contents of `path`
    pub fn load_code_file(&mut self, path: &Path) -> io::Result<()> {
        let text = std::fs::read_to_string(path)?;
        self.code = CodeBuffer::new(&text);
        self.source_path = Some(path.to_path_buf());
        tracing::info!("loaded code from {}", path.display());
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn orchestrator(&self) -> &ExecutionOrchestrator<T, ToastQueue> {
        &self.orchestrator
    }

    pub fn orchestrator_mut(&mut self) -> &mut ExecutionOrchestrator<T, ToastQueue> {
        &mut self.orchestrator
    }

    pub fn timer_mut(&mut self) -> &mut T {
        self.orchestrator.timer_mut()
    }

    pub fn scene(&self) -> SceneState {
        self.orchestrator.scene()
    }

    pub fn code(&self) -> &CodeBuffer {
        &self.code
    }

    pub fn toolbar(&self) -> ToolbarState {
        self.toolbar
    }

    pub fn pane(&self) -> PaneTab {
        self.pane
    }

    pub fn docs(&self) -> Option<DocsDialog> {
        self.docs
    }

    pub fn theme(&self) -> ThemeName {
        self.theme
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn toasts(&self) -> &ToastQueue {
        self.orchestrator.sink()
    }

    pub fn console_scroll_back(&self) -> usize {
        self.console_scroll_back
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Apply timer completions and expire toasts. Returns true if anything
    /// visible changed.
    pub fn process_async_messages(&mut self) -> bool {
        let completed = self.orchestrator.process_timers();
        let now = self.orchestrator.timer().now();
        let expired = self.orchestrator.sink_mut().expire(now);
        self.follow_tail();
        completed || expired
    }

    /// Advance the preview animation by one frame
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Submit the current code buffer for execution
    pub fn run_code(&mut self) {
        let text = self.code.text();
        tracing::debug!("submitting {} bytes of code", text.len());
        self.orchestrator.submit(text);
        self.follow_tail();
    }

    fn follow_tail(&mut self) {
        if self.new_tail.replace(false) {
            self.console_scroll_back = 0;
        }
    }

    fn docs_page_height(&self) -> usize {
        let area = ui::dialog_area(Rect::new(0, 0, self.width, self.height));
        (area.height as usize).saturating_sub(5).max(1)
    }

    fn editor_page_height(&self) -> usize {
        (self.height as usize).saturating_sub(8).max(1)
    }

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> io::Result<()> {
        tracing::trace!("key {:?} {:?}", code, modifiers);

        if self.docs.is_some() {
            self.handle_docs_key(code);
            return Ok(());
        }

        let ctrl = modifiers.contains(KeyModifiers::CONTROL);
        let alt = modifiers.contains(KeyModifiers::ALT);

        match (code, ctrl, alt) {
            (KeyCode::Char('q'), true, _) => self.quit(),
            (KeyCode::Char('r'), true, _) | (KeyCode::F(5), _, _) => self.run_code(),
            (KeyCode::F(1), _, _) => self.toggle_docs(),
            (KeyCode::F(2), _, _) => self.pane = self.pane.next(),
            (KeyCode::Char('t'), true, _) => self.toggle_theme(),
            (KeyCode::Char('s'), true, _) => self.save_code(),
            (KeyCode::Char('k'), true, _) => self.copy_code(),
            (KeyCode::Char('d'), true, _) => {
                // Failures are reported as a toast
                let _ = self.download_code();
            }
            (KeyCode::Char('v'), true, _) => self.paste(),

            (KeyCode::Char(c @ '1'..='3'), _, true) => {
                let idx = (c as usize) - ('1' as usize);
                self.add_object(ObjectKind::ALL[idx]);
            }
            (KeyCode::Char('r'), _, true) => self.rotate_camera(),
            (KeyCode::Char('=') | KeyCode::Char('+'), _, true) => self.zoom_by(ZOOM_STEP as i32),
            (KeyCode::Char('-'), _, true) => self.zoom_by(-(ZOOM_STEP as i32)),
            (KeyCode::Char('l'), _, true) => self.cycle_light_kind(),
            (KeyCode::Up, _, true) => {
                let total = self.orchestrator.log().len();
                self.console_scroll_back =
                    (self.console_scroll_back + CONSOLE_SCROLL_STEP).min(total);
            }
            (KeyCode::Down, _, true) => {
                self.console_scroll_back =
                    self.console_scroll_back.saturating_sub(CONSOLE_SCROLL_STEP);
            }
            (KeyCode::Esc, _, _) => self.orchestrator.sink_mut().dismiss_all(),

            _ if self.pane == PaneTab::Editor && !ctrl && !alt => self.handle_editor_key(code),
            _ => {}
        }
        self.follow_tail();
        Ok(())
    }

    fn handle_docs_key(&mut self, code: KeyCode) {
        let page = self.docs_page_height();
        let Some(docs) = self.docs.as_mut() else {
            return;
        };
        match code {
            KeyCode::Esc | KeyCode::F(1) => self.docs = None,
            KeyCode::Tab | KeyCode::Right => {
                docs.tab = docs.tab.next();
                docs.scroll = 0;
            }
            KeyCode::BackTab | KeyCode::Left => {
                docs.tab = docs.tab.prev();
                docs.scroll = 0;
            }
            KeyCode::Up => docs.scroll = docs.scroll.saturating_sub(1),
            KeyCode::Down => docs.scroll += 1,
            KeyCode::PageUp => docs.scroll = docs.scroll.saturating_sub(page),
            KeyCode::PageDown => docs.scroll += page,
            KeyCode::Home => docs.scroll = 0,
            _ => {}
        }
        if let Some(docs) = self.docs.as_mut() {
            docs.scroll = docs
                .scroll
                .min(ui::docs_dialog::max_scroll(docs.tab, page));
        }
    }

    fn handle_editor_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) => self.code.insert_char(c),
            KeyCode::Enter => self.code.insert_newline(),
            KeyCode::Tab => self.code.insert_tab(self.config.editor.tab_size),
            KeyCode::Backspace => self.code.backspace(),
            KeyCode::Delete => self.code.delete(),
            KeyCode::Left => self.code.move_left(),
            KeyCode::Right => self.code.move_right(),
            KeyCode::Up => self.code.move_up(),
            KeyCode::Down => self.code.move_down(),
            KeyCode::Home => self.code.move_home(),
            KeyCode::End => self.code.move_end(),
            KeyCode::PageUp => self.code.page_up(self.editor_page_height()),
            KeyCode::PageDown => self.code.page_down(self.editor_page_height()),
            _ => {}
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        self.follow_tail();
        let theme = Theme::for_name(self.theme);
        let screen = frame.area();
        frame.render_widget(
            ratatui::widgets::Block::default().style(theme.base()),
            screen,
        );

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Min(4),
                Constraint::Length(1),
            ])
            .split(screen);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[2]);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[0]);

        ui::render_header(frame, rows[0], &theme);
        ui::render_toolbar(
            frame,
            rows[1],
            self.toolbar.zoom,
            self.toolbar.light,
            &theme,
        );
        ui::render_scene(frame, left[0], self.orchestrator.scene(), self.tick, &theme);
        ui::render_console(
            frame,
            left[1],
            self.orchestrator.snapshot(),
            self.console_scroll_back,
            &theme,
        );
        let cursor = ui::render_code_pane(frame, columns[1], self.pane, &mut self.code, &theme);
        let status = self
            .orchestrator
            .pending()
            .map(|p| format!("Running {}... (^R restarts)", p.ticket));
        ui::render_footer(frame, rows[3], status.as_deref(), &theme);

        if let Some(docs) = self.docs {
            ui::render_docs_dialog(frame, screen, docs.tab, docs.scroll, &theme);
        } else if let Some(position) = cursor {
            frame.set_cursor_position(position);
        }
        ui::render_toasts(frame, screen, self.orchestrator.sink().visible(), &theme);
    }
}
