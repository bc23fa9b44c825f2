//! Script Control Mode
//!
//! Provides a run mode where the console accepts JSON commands on stdin and
//! answers with JSON lines on stdout. Time is virtual: execution latency only
//! elapses through `advance` and `wait_for`, so scripted sessions (including
//! LLM-driven ones) are deterministic and can be exported as Rust tests.

use super::{typed_key, Console, PaneTab};
use crate::clipboard::Clipboard;
use crate::config::{Config, ThemeName};
use crate::model::{LightKind, LogEntry, ObjectKind, SceneState};
use crate::services::{Timer, VirtualTimer};
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};
use serde::{Deserialize, Serialize};
use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    time::Duration,
};

/// Commands that can be sent to the console via stdin
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptCommand {
    /// Render the current screen state
    Render,

    /// Send a keyboard event
    Key {
        /// Key code (e.g., "a", "Enter", "Backspace", "Left", "F1")
        code: String,
        /// Modifiers (e.g., ["ctrl"], ["shift", "alt"])
        #[serde(default)]
        modifiers: Vec<String>,
    },

    /// Type a string of text (convenience for multiple key presses)
    TypeText {
        /// Text to type
        text: String,
    },

    /// Resize the terminal
    Resize {
        /// New width
        width: u16,
        /// New height
        height: u16,
    },

    /// Get console status (scene, pending run, toolbar, ...)
    Status,

    /// Get console log entries
    GetLog {
        /// Only the last `tail` entries
        #[serde(default)]
        tail: Option<usize>,
    },

    /// Get the code buffer content
    GetCode,

    /// Run code. Without `code`, runs the code buffer.
    Submit {
        #[serde(default)]
        code: Option<String>,
    },

    /// Add a primitive to the scene
    AddObject { kind: ObjectKind },

    /// Rotate the camera
    Rotate,

    /// Set the camera zoom (not clamped)
    Zoom { percent: u32 },

    /// Advance virtual time
    Advance { ms: u64 },

    /// Advance virtual time until a condition holds or the timeout passes
    WaitFor {
        /// Condition to wait for
        condition: WaitCondition,
        /// Virtual timeout in milliseconds (default: 5000)
        #[serde(default = "default_wait_timeout")]
        timeout_ms: u64,
        /// Virtual time advanced per poll in milliseconds (default: 100)
        #[serde(default = "default_poll_interval")]
        poll_interval_ms: u64,
    },

    /// Quit the console
    Quit,

    /// Export the interaction history as Rust test code
    ExportTest {
        /// Name for the generated test
        test_name: String,
    },
}

/// Conditions that can be waited for
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WaitCondition {
    /// Scene reached the given state
    SceneIs { scene: SceneState },
    /// Some log entry contains the text
    LogContains { text: String },
    /// Screen contains the text
    ScreenContains { text: String },
    /// No run is pending
    Idle,
}

fn default_wait_timeout() -> u64 {
    5000
}

fn default_poll_interval() -> u64 {
    100
}

/// Upper bound on condition checks within one `wait_for`
const MAX_WAIT_POLLS: u64 = 1_000;

/// Response sent back to stdout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptResponse {
    /// Screen render output
    Screen {
        /// The screen content as a string
        content: String,
        /// Terminal width
        width: u16,
        /// Terminal height
        height: u16,
        /// Cursor position (x, y)
        cursor: (u16, u16),
    },

    /// Console status
    Status {
        scene: SceneState,
        /// Ticket of the pending run, if any
        pending: Option<u64>,
        log_len: usize,
        zoom: u32,
        light: LightKind,
        pane: PaneTab,
        theme: ThemeName,
        docs_open: bool,
        /// Code buffer length in bytes
        code_len: usize,
        is_modified: bool,
        /// Titles of toasts on screen, oldest first
        toasts: Vec<String>,
        /// Virtual clock in milliseconds
        now_ms: u64,
    },

    /// Log entries
    Log { entries: Vec<LogEntry> },

    /// Code buffer content
    Code {
        /// The actual text content
        content: String,
    },

    /// Success response
    Ok {
        /// Optional message
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// Error response
    Error {
        /// Error message
        message: String,
    },

    /// Generated test code
    TestCode {
        /// The Rust test code
        code: String,
    },
}

/// Tracks interactions for test generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionRecord {
    /// The command that was executed
    pub command: ScriptCommand,
    /// Virtual time when the command arrived
    pub timestamp_ms: u64,
}

/// Script Control Mode runner
pub struct ScriptControlMode {
    console: Console<VirtualTimer>,
    terminal: Terminal<TestBackend>,
    interactions: Vec<InteractionRecord>,
}

impl ScriptControlMode {
    /// Create a new script control mode instance
    pub fn new(config: Config, width: u16, height: u16, working_dir: PathBuf) -> io::Result<Self> {
        let backend = TestBackend::new(width, height);
        let terminal = Terminal::new(backend)?;
        let console = Console::new(
            config,
            width,
            height,
            VirtualTimer::new(),
            working_dir,
            Clipboard::internal_only(),
        );

        Ok(Self {
            console,
            terminal,
            interactions: Vec::new(),
        })
    }

    pub fn console(&self) -> &Console<VirtualTimer> {
        &self.console
    }

    /// Load code before running the control loop
    pub fn load_code_file(&mut self, path: &std::path::Path) -> io::Result<()> {
        self.console.load_code_file(path)?;
        self.render_to_terminal()
    }

    /// Run the script control loop
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        // Initial render
        self.render_to_terminal()?;

        let ready_response = ScriptResponse::Ok {
            message: Some("Script Control Mode ready. Send JSON commands to stdin.".to_string()),
        };
        writeln!(stdout, "{}", serde_json::to_string(&ready_response)?)?;
        stdout.flush()?;

        for line in stdin.lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    let response = ScriptResponse::Error {
                        message: format!("Failed to read line: {}", e),
                    };
                    writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
                    stdout.flush()?;
                    continue;
                }
            };

            if line.trim().is_empty() {
                continue;
            }

            let response = self.handle_line(&line)?;
            writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
            stdout.flush()?;

            if self.console.should_quit() {
                break;
            }
        }

        Ok(())
    }

    /// Parse and execute one JSON command line
    pub fn handle_line(&mut self, line: &str) -> io::Result<ScriptResponse> {
        let command: ScriptCommand = match serde_json::from_str(line) {
            Ok(cmd) => cmd,
            Err(e) => {
                return Ok(ScriptResponse::Error {
                    message: format!("Failed to parse command: {}", e),
                });
            }
        };

        tracing::trace!(
            "script_control: received command {:?}",
            std::mem::discriminant(&command)
        );

        self.record_interaction(command.clone());
        self.execute_command(command)
    }

    fn record_interaction(&mut self, command: ScriptCommand) {
        let timestamp_ms = self.now_ms();
        self.interactions.push(InteractionRecord {
            command,
            timestamp_ms,
        });
    }

    fn now_ms(&self) -> u64 {
        let now = self.console.orchestrator().timer().now();
        u64::try_from(now.as_millis()).unwrap_or(u64::MAX)
    }

    /// Execute a single command
    pub fn execute_command(&mut self, command: ScriptCommand) -> io::Result<ScriptResponse> {
        match command {
            ScriptCommand::Render => self.handle_render(),
            ScriptCommand::Key { code, modifiers } => self.handle_key(&code, &modifiers),
            ScriptCommand::TypeText { text } => self.handle_type_text(&text),
            ScriptCommand::Resize { width, height } => self.handle_resize(width, height),
            ScriptCommand::Status => Ok(self.handle_status()),
            ScriptCommand::GetLog { tail } => Ok(self.handle_get_log(tail)),
            ScriptCommand::GetCode => Ok(ScriptResponse::Code {
                content: self.console.code().text(),
            }),
            ScriptCommand::Submit { code } => {
                match code {
                    Some(code) => self.console.orchestrator_mut().submit(code),
                    None => self.console.run_code(),
                }
                self.after_action()
            }
            ScriptCommand::AddObject { kind } => {
                self.console.add_object(kind);
                self.after_action()
            }
            ScriptCommand::Rotate => {
                self.console.rotate_camera();
                self.after_action()
            }
            ScriptCommand::Zoom { percent } => {
                self.console.set_zoom(percent);
                self.after_action()
            }
            ScriptCommand::Advance { ms } => self.handle_advance(ms),
            ScriptCommand::WaitFor {
                condition,
                timeout_ms,
                poll_interval_ms,
            } => self.handle_wait_for(condition, timeout_ms, poll_interval_ms),
            ScriptCommand::Quit => {
                self.console.quit();
                Ok(ScriptResponse::Ok {
                    message: Some("Quitting console".to_string()),
                })
            }
            ScriptCommand::ExportTest { test_name } => Ok(ScriptResponse::TestCode {
                code: self.generate_test_code(&test_name),
            }),
        }
    }

    fn after_action(&mut self) -> io::Result<ScriptResponse> {
        self.console.process_async_messages();
        self.render_to_terminal()?;
        Ok(ScriptResponse::Ok { message: None })
    }

    /// Render to the virtual terminal
    fn render_to_terminal(&mut self) -> io::Result<()> {
        self.terminal.draw(|frame| {
            self.console.render(frame);
        })?;
        Ok(())
    }

    /// Get screen as string
    pub fn screen_to_string(&self) -> String {
        let buffer = self.terminal.backend().buffer();
        let (width, height) = (buffer.area.width, buffer.area.height);
        let mut result = String::new();

        for y in 0..height {
            for x in 0..width {
                let pos = buffer.index_of(x, y);
                if let Some(cell) = buffer.content.get(pos) {
                    result.push_str(cell.symbol());
                }
            }
            if y + 1 < height {
                result.push('\n');
            }
        }

        result
    }

    fn handle_render(&mut self) -> io::Result<ScriptResponse> {
        self.render_to_terminal()?;
        let content = self.screen_to_string();
        let pos = self.terminal.get_cursor_position()?;
        let size = self.terminal.size()?;

        Ok(ScriptResponse::Screen {
            content,
            width: size.width,
            height: size.height,
            cursor: (pos.x, pos.y),
        })
    }

    /// Parse key code string to KeyCode
    pub fn parse_key_code(code: &str) -> Result<KeyCode, String> {
        match code.to_lowercase().as_str() {
            "backspace" => Ok(KeyCode::Backspace),
            "enter" | "return" => Ok(KeyCode::Enter),
            "left" => Ok(KeyCode::Left),
            "right" => Ok(KeyCode::Right),
            "up" => Ok(KeyCode::Up),
            "down" => Ok(KeyCode::Down),
            "home" => Ok(KeyCode::Home),
            "end" => Ok(KeyCode::End),
            "pageup" | "page_up" => Ok(KeyCode::PageUp),
            "pagedown" | "page_down" => Ok(KeyCode::PageDown),
            "tab" => Ok(KeyCode::Tab),
            "backtab" => Ok(KeyCode::BackTab),
            "delete" | "del" => Ok(KeyCode::Delete),
            "escape" | "esc" => Ok(KeyCode::Esc),
            "space" => Ok(KeyCode::Char(' ')),
            s if s.len() > 1 && s.starts_with('f') => s[1..]
                .parse::<u8>()
                .ok()
                .filter(|n| (1..=12).contains(n))
                .map(KeyCode::F)
                .ok_or_else(|| format!("Unknown key code: {}", code)),
            _ => {
                // Single characters keep their case
                let mut chars = code.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Ok(KeyCode::Char(ch)),
                    _ => Err(format!("Unknown key code: {}", code)),
                }
            }
        }
    }

    /// Parse modifier strings to KeyModifiers
    pub fn parse_modifiers(modifiers: &[String]) -> KeyModifiers {
        let mut result = KeyModifiers::NONE;
        for modifier in modifiers {
            match modifier.to_lowercase().as_str() {
                "ctrl" | "control" => result |= KeyModifiers::CONTROL,
                "alt" => result |= KeyModifiers::ALT,
                "shift" => result |= KeyModifiers::SHIFT,
                "super" | "meta" => result |= KeyModifiers::SUPER,
                _ => {}
            }
        }
        result
    }

    fn handle_key(&mut self, code: &str, modifiers: &[String]) -> io::Result<ScriptResponse> {
        let key_code = match Self::parse_key_code(code) {
            Ok(k) => k,
            Err(e) => {
                return Ok(ScriptResponse::Error { message: e });
            }
        };
        let key_modifiers = Self::parse_modifiers(modifiers);

        self.console.handle_key(key_code, key_modifiers)?;
        self.after_action()
    }

    fn handle_type_text(&mut self, text: &str) -> io::Result<ScriptResponse> {
        for code in text.chars().filter_map(typed_key) {
            self.console.handle_key(code, KeyModifiers::NONE)?;
        }
        self.after_action()
    }

    fn handle_resize(&mut self, width: u16, height: u16) -> io::Result<ScriptResponse> {
        self.terminal.backend_mut().resize(width, height);
        self.console.resize(width, height);
        self.render_to_terminal()?;
        Ok(ScriptResponse::Ok { message: None })
    }

    fn handle_status(&self) -> ScriptResponse {
        let console = &self.console;
        let toolbar = console.toolbar();
        ScriptResponse::Status {
            scene: console.scene(),
            pending: console.orchestrator().pending().map(|p| p.ticket.0),
            log_len: console.orchestrator().log().len(),
            zoom: toolbar.zoom,
            light: toolbar.light,
            pane: console.pane(),
            theme: console.theme(),
            docs_open: console.docs().is_some(),
            code_len: console.code().len(),
            is_modified: console.code().is_modified(),
            toasts: console
                .toasts()
                .visible()
                .map(|t| t.notification.title.clone())
                .collect(),
            now_ms: self.now_ms(),
        }
    }

    fn handle_get_log(&self, tail: Option<usize>) -> ScriptResponse {
        let log = self.console.orchestrator().log();
        let entries = match tail {
            Some(n) => log.tail(n),
            None => log.snapshot(),
        };
        ScriptResponse::Log {
            entries: entries.to_vec(),
        }
    }

    fn handle_advance(&mut self, ms: u64) -> io::Result<ScriptResponse> {
        self.console.timer_mut().advance(Duration::from_millis(ms));
        let completed = self.console.orchestrator_mut().process_timers();
        self.console.process_async_messages();
        self.render_to_terminal()?;
        Ok(ScriptResponse::Ok {
            message: completed.then(|| "Execution completed".to_string()),
        })
    }

    fn handle_wait_for(
        &mut self,
        condition: WaitCondition,
        timeout_ms: u64,
        poll_interval_ms: u64,
    ) -> io::Result<ScriptResponse> {
        // Long timeouts with short intervals poll at a coarser step
        let interval = poll_interval_ms
            .max(1)
            .max(timeout_ms.div_ceil(MAX_WAIT_POLLS));
        let step = Duration::from_millis(interval);
        let mut waited = Duration::ZERO;
        let timeout = Duration::from_millis(timeout_ms);

        loop {
            tracing::trace!("wait_for: polling at +{:?}", waited);
            self.console.process_async_messages();
            self.render_to_terminal()?;

            if self.check_wait_condition(&condition) {
                return Ok(ScriptResponse::Ok {
                    message: Some(format!("Condition met after {}ms", waited.as_millis())),
                });
            }

            if waited >= timeout {
                return Ok(ScriptResponse::Error {
                    message: format!(
                        "Timeout after {}ms waiting for condition: {:?}",
                        timeout_ms, condition
                    ),
                });
            }

            self.console.timer_mut().advance(step);
            waited += step;
        }
    }

    fn check_wait_condition(&self, condition: &WaitCondition) -> bool {
        match condition {
            WaitCondition::SceneIs { scene } => self.console.scene() == *scene,
            WaitCondition::LogContains { text } => self
                .console
                .orchestrator()
                .snapshot()
                .iter()
                .any(|e| e.text.contains(text.as_str())),
            WaitCondition::ScreenContains { text } => self.screen_to_string().contains(text),
            WaitCondition::Idle => self.console.orchestrator().pending().is_none(),
        }
    }

    /// Generate Rust test code from recorded interactions
    pub fn generate_test_code(&self, test_name: &str) -> String {
        let (width, height) = self.console.size();
        let mut code = format!(
            r#"#[test]
fn {}() -> std::io::Result<()> {{
    let mut harness = ConsoleTestHarness::new({}, {})?;
    harness.render()?;

"#,
            test_name, width, height
        );

        for interaction in &self.interactions {
            match &interaction.command {
                ScriptCommand::Render => {
                    code.push_str("    harness.render()?;\n");
                }
                ScriptCommand::Key {
                    code: key,
                    modifiers,
                } => {
                    let key_code = key_code_to_rust_code(key);
                    let mods = modifiers_to_rust_code(modifiers);
                    code.push_str(&format!("    harness.send_key({}, {})?;\n", key_code, mods));
                }
                ScriptCommand::TypeText { text } => {
                    code.push_str(&format!("    harness.type_text({:?})?;\n", text));
                }
                ScriptCommand::Resize { width, height } => {
                    code.push_str(&format!("    harness.resize({}, {})?;\n", width, height));
                }
                ScriptCommand::Submit { code: None } => {
                    code.push_str("    harness.run_code()?;\n");
                }
                ScriptCommand::Submit { code: Some(text) } => {
                    code.push_str(&format!("    harness.submit({:?})?;\n", text));
                }
                ScriptCommand::AddObject { kind } => {
                    code.push_str(&format!(
                        "    harness.add_object(ObjectKind::{})?;\n",
                        kind.label()
                    ));
                }
                ScriptCommand::Rotate => {
                    code.push_str("    harness.rotate_camera()?;\n");
                }
                ScriptCommand::Zoom { percent } => {
                    code.push_str(&format!("    harness.set_zoom({})?;\n", percent));
                }
                ScriptCommand::Advance { ms } => {
                    code.push_str(&format!("    harness.advance({})?;\n", ms));
                }
                ScriptCommand::WaitFor {
                    condition: WaitCondition::ScreenContains { text },
                    ..
                } => {
                    code.push_str(&format!("    harness.assert_screen_contains({:?});\n", text));
                }
                _ => {
                    // Queries and other waits do not change state
                }
            }
        }

        code.push_str(
            r#"
    Ok(())
}
"#,
        );

        code
    }
}

/// Convert key code string to Rust KeyCode expression
fn key_code_to_rust_code(code: &str) -> String {
    match ScriptControlMode::parse_key_code(code) {
        Ok(KeyCode::Char(ch)) => format!("KeyCode::Char({:?})", ch),
        Ok(KeyCode::F(n)) => format!("KeyCode::F({})", n),
        Ok(other) => format!("KeyCode::{:?}", other),
        Err(_) => format!("KeyCode::Char({:?})", code.chars().next().unwrap_or('?')),
    }
}

/// Convert modifier strings to Rust KeyModifiers expression
fn modifiers_to_rust_code(modifiers: &[String]) -> String {
    let parts: Vec<&str> = modifiers
        .iter()
        .filter_map(|m| match m.to_lowercase().as_str() {
            "ctrl" | "control" => Some("KeyModifiers::CONTROL"),
            "alt" => Some("KeyModifiers::ALT"),
            "shift" => Some("KeyModifiers::SHIFT"),
            "super" | "meta" => Some("KeyModifiers::SUPER"),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        "KeyModifiers::NONE".to_string()
    } else {
        parts.join(" | ")
    }
}

/// Schema information for LLM consumption
pub fn get_command_schema() -> String {
    serde_json::json!({
        "time": "Virtual. Execution latency only elapses through 'advance' and 'wait_for'.",
        "commands": [
            {
                "type": "render",
                "description": "Render the current screen state and return it",
                "example": {"type": "render"}
            },
            {
                "type": "key",
                "description": "Send a keyboard event",
                "parameters": {
                    "code": "Key code (e.g., 'a', 'Enter', 'Backspace', 'Left', 'F1')",
                    "modifiers": "Optional array of modifiers: 'ctrl', 'alt', 'shift', 'super'"
                },
                "examples": [
                    {"type": "key", "code": "r", "modifiers": ["ctrl"]},
                    {"type": "key", "code": "1", "modifiers": ["alt"]},
                    {"type": "key", "code": "F1"}
                ]
            },
            {
                "type": "type_text",
                "description": "Type text into the code editor",
                "parameters": {"text": "Text to type ('\\n' presses Enter)"},
                "example": {"type": "type_text", "text": "scene.render()"}
            },
            {
                "type": "resize",
                "description": "Resize the terminal",
                "parameters": {"width": "New width", "height": "New height"},
                "example": {"type": "resize", "width": 120, "height": 40}
            },
            {
                "type": "status",
                "description": "Get console status (scene, pending run, toolbar, toasts, virtual time)",
                "example": {"type": "status"}
            },
            {
                "type": "get_log",
                "description": "Get console log entries in order",
                "parameters": {"tail": "Optional: only the last N entries"},
                "example": {"type": "get_log", "tail": 5}
            },
            {
                "type": "get_code",
                "description": "Get the code buffer content",
                "example": {"type": "get_code"}
            },
            {
                "type": "submit",
                "description": "Run code; a pending run is cancelled and restarted",
                "parameters": {"code": "Optional: code to run instead of the code buffer"},
                "examples": [
                    {"type": "submit"},
                    {"type": "submit", "code": "scene.render()"}
                ]
            },
            {
                "type": "add_object",
                "description": "Add a primitive to the scene",
                "parameters": {"kind": "'cube', 'sphere' or 'cylinder'"},
                "example": {"type": "add_object", "kind": "sphere"}
            },
            {
                "type": "rotate",
                "description": "Rotate the camera by 45 degrees",
                "example": {"type": "rotate"}
            },
            {
                "type": "zoom",
                "description": "Set camera zoom percent (passed through without clamping)",
                "parameters": {"percent": "Zoom percent"},
                "example": {"type": "zoom", "percent": 75}
            },
            {
                "type": "advance",
                "description": "Advance virtual time and apply completed runs",
                "parameters": {"ms": "Milliseconds"},
                "example": {"type": "advance", "ms": 1500}
            },
            {
                "type": "wait_for",
                "description": "Advance virtual time until a condition holds",
                "parameters": {
                    "condition": "Condition object to wait for",
                    "timeout_ms": "Optional virtual timeout in milliseconds (default: 5000)",
                    "poll_interval_ms": "Optional virtual step in milliseconds (default: 100)"
                },
                "condition_types": [
                    {"type": "scene_is", "scene": "active"},
                    {"type": "log_contains", "text": "Rendering complete!"},
                    {"type": "screen_contains", "text": "Scene rendered successfully"},
                    {"type": "idle"}
                ],
                "example": {"type": "wait_for", "condition": {"type": "scene_is", "scene": "active"}}
            },
            {
                "type": "quit",
                "description": "Quit the console",
                "example": {"type": "quit"}
            },
            {
                "type": "export_test",
                "description": "Export the interaction history as Rust test code",
                "parameters": {"test_name": "Name for the generated test function"},
                "example": {"type": "export_test", "test_name": "test_run_and_rotate"}
            }
        ]
    })
    .to_string()
}
