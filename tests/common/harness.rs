// Test harness: a Console on a ratatui TestBackend with a virtual clock

#![allow(dead_code)]

use crossterm::event::{KeyCode, KeyModifiers};
use dreamscape::app::{typed_key, Console};
use dreamscape::clipboard::Clipboard;
use dreamscape::config::Config;
use dreamscape::model::ObjectKind;
use dreamscape::services::VirtualTimer;
use ratatui::{backend::TestBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

pub struct ConsoleTestHarness {
    console: Console<VirtualTimer>,
    terminal: Terminal<TestBackend>,
    /// Working directory for downloads, removed with the harness
    _temp_dir: Option<TempDir>,
}

impl ConsoleTestHarness {
    /// Console with default config in a fresh temporary working directory
    pub fn new(width: u16, height: u16) -> io::Result<Self> {
        Self::with_config(Config::default(), width, height)
    }

    pub fn with_config(config: Config, width: u16, height: u16) -> io::Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let dir = temp_dir.path().to_path_buf();
        let mut harness = Self::build(config, width, height, dir)?;
        harness._temp_dir = Some(temp_dir);
        Ok(harness)
    }

    /// Console whose downloads go to `dir`
    pub fn with_working_dir(dir: &Path, width: u16, height: u16) -> io::Result<Self> {
        Self::build(Config::default(), width, height, dir.to_path_buf())
    }

    fn build(config: Config, width: u16, height: u16, dir: PathBuf) -> io::Result<Self> {
        let terminal = Terminal::new(TestBackend::new(width, height))?;
        let console = Console::new(
            config,
            width,
            height,
            VirtualTimer::new(),
            dir,
            Clipboard::internal_only(),
        );
        let mut harness = Self {
            console,
            terminal,
            _temp_dir: None,
        };
        harness.render()?;
        Ok(harness)
    }

    pub fn console(&self) -> &Console<VirtualTimer> {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut Console<VirtualTimer> {
        &mut self.console
    }

    pub fn load_code_file(&mut self, path: &Path) -> io::Result<()> {
        self.console.load_code_file(path)?;
        self.render()
    }

    pub fn render(&mut self) -> io::Result<()> {
        self.console.process_async_messages();
        self.terminal.draw(|frame| self.console.render(frame))?;
        Ok(())
    }

    pub fn send_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> io::Result<()> {
        self.console.handle_key(code, modifiers)?;
        self.render()
    }

    pub fn type_text(&mut self, text: &str) -> io::Result<()> {
        for code in text.chars().filter_map(typed_key) {
            self.console.handle_key(code, KeyModifiers::NONE)?;
        }
        self.render()
    }

    pub fn resize(&mut self, width: u16, height: u16) -> io::Result<()> {
        self.terminal.backend_mut().resize(width, height);
        self.console.resize(width, height);
        self.render()
    }

    /// Run the code buffer (Ctrl+R)
    pub fn run_code(&mut self) -> io::Result<()> {
        self.send_key(KeyCode::Char('r'), KeyModifiers::CONTROL)
    }

    /// Run `code` without touching the code buffer
    pub fn submit(&mut self, code: &str) -> io::Result<()> {
        self.console.orchestrator_mut().submit(code);
        self.render()
    }

    pub fn add_object(&mut self, kind: ObjectKind) -> io::Result<()> {
        self.console.add_object(kind);
        self.render()
    }

    pub fn rotate_camera(&mut self) -> io::Result<()> {
        self.console.rotate_camera();
        self.render()
    }

    pub fn set_zoom(&mut self, percent: u32) -> io::Result<()> {
        self.console.set_zoom(percent);
        self.render()
    }

    /// Move the virtual clock forward and apply whatever completed
    pub fn advance(&mut self, ms: u64) -> io::Result<()> {
        self.console
            .timer_mut()
            .advance(Duration::from_millis(ms));
        self.render()
    }

    /// Texts of all console log entries, in order
    pub fn log_texts(&self) -> Vec<String> {
        self.console
            .orchestrator()
            .snapshot()
            .iter()
            .map(|e| e.text.clone())
            .collect()
    }

    pub fn screen_to_string(&self) -> String {
        let buffer = self.terminal.backend().buffer();
        let (width, height) = (buffer.area.width, buffer.area.height);
        let mut result = String::new();
        for y in 0..height {
            for x in 0..width {
                result.push_str(buffer[(x, y)].symbol());
            }
            if y + 1 < height {
                result.push('\n');
            }
        }
        result
    }

    pub fn assert_screen_contains(&self, text: &str) {
        let screen = self.screen_to_string();
        assert!(
            screen.contains(text),
            "Expected screen to contain {:?}\nScreen:\n{}",
            text,
            screen
        );
    }

    pub fn assert_screen_not_contains(&self, text: &str) {
        let screen = self.screen_to_string();
        assert!(
            !screen.contains(text),
            "Expected screen not to contain {:?}\nScreen:\n{}",
            text,
            screen
        );
    }

    pub fn should_quit(&self) -> bool {
        self.console.should_quit()
    }
}
