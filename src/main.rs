use clap::Parser;
use crossterm::{
    cursor::SetCursorStyle,
    event::{
        poll as event_poll, read as event_read, Event as CrosstermEvent, KeyEvent, KeyEventKind,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use dreamscape::{
    app::script_control::ScriptControlMode,
    app::Console,
    clipboard::Clipboard,
    config::Config,
    services::{signal_handler, Timer, TokioTimer},
};
use ratatui::Terminal;
use std::{
    io::{self, stdout},
    path::PathBuf,
    time::{Duration, Instant},
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Terminal console for editing, running and previewing 3D scene scripts
#[derive(Parser, Debug)]
#[command(name = "dreamscape")]
#[command(about = "PyDreamscape Renderer demo console", long_about = None)]
#[command(version)]
struct Args {
    /// Script to load into the code editor
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to log file for console diagnostics
    #[arg(long, value_name = "PATH", default_value = "/tmp/dreamscape.log")]
    log_file: PathBuf,

    /// Simulated execution latency in milliseconds (overrides the config)
    #[arg(long, value_name = "MS")]
    latency_ms: Option<u64>,

    /// Enable script control mode (accepts JSON commands via stdin, outputs to stdout)
    #[arg(long)]
    script_mode: bool,

    /// Terminal width for script control mode (default: 100)
    #[arg(long, default_value = "100")]
    script_width: u16,

    /// Terminal height for script control mode (default: 30)
    #[arg(long, default_value = "30")]
    script_height: u16,

    /// Print script control mode command schema and exit
    #[arg(long)]
    script_schema: bool,

    /// Print the configuration JSON Schema and exit
    #[arg(long)]
    print_config_schema: bool,
}

/// Animation frame interval for the scene preview
const TICK_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> io::Result<()> {
    let args = Args::parse();

    if args.script_schema {
        println!("{}", dreamscape::app::script_control::get_command_schema());
        return Ok(());
    }

    if args.print_config_schema {
        println!("{}", Config::json_schema());
        return Ok(());
    }

    if args.script_mode {
        // Log to stderr so it doesn't interfere with JSON output on stdout
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr))
            .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
            .init();

        return run_script_control_mode(&args);
    }

    // Log to a file to avoid interfering with the terminal UI.
    // Fall back to no logging if the log file can't be created
    if let Ok(log_file) = std::fs::File::create(&args.log_file) {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::sync::Arc::new(log_file)))
            .with(EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()))
            .init();
    }

    tracing::info!(
        "Console starting at {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    signal_handler::install_signal_handlers();
    tracing::info!("Signal handlers installed");

    // Set up panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = stdout().execute(SetCursorStyle::DefaultUserShape);
        let _ = stdout().execute(PopKeyboardEnhancementFlags);
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
        original_hook(panic);
    }));

    let config = load_config(&args)?;

    // One worker is plenty: it only runs the execution timer
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("dreamscape-timer")
        .enable_time()
        .build()?;

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;

    // Kitty keyboard protocol so Alt+digit and friends arrive unambiguously
    let keyboard_flags = KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
        | KeyboardEnhancementFlags::REPORT_ALTERNATE_KEYS;
    let _ = stdout().execute(PushKeyboardEnhancementFlags(keyboard_flags));
    let _ = stdout().execute(SetCursorStyle::BlinkingBar);

    let backend = ratatui::backend::CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let size = terminal.size()?;
    tracing::info!("Terminal size: {}x{}", size.width, size.height);

    let working_dir = std::env::current_dir()?;
    let mut console = Console::new(
        config,
        size.width,
        size.height,
        TokioTimer::new(runtime.handle().clone()),
        working_dir,
        Clipboard::new(),
    );

    let result = match &args.file {
        Some(path) => console
            .load_code_file(path)
            .and_then(|()| run_event_loop(&mut console, &mut terminal)),
        None => run_event_loop(&mut console, &mut terminal),
    };

    // Clean up terminal
    let _ = stdout().execute(SetCursorStyle::DefaultUserShape);
    let _ = stdout().execute(PopKeyboardEnhancementFlags);
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    runtime.shutdown_timeout(Duration::from_millis(100));
    tracing::info!("Console stopped");
    result
}

/// Config from --config (errors are fatal) or the default location, with
/// --latency-ms applied on top
fn load_config(args: &Args) -> io::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path).map_err(|e| {
            eprintln!("Error: {}", e);
            io::Error::new(io::ErrorKind::InvalidData, e.to_string())
        })?,
        None => Config::load_or_default(),
    };
    if let Some(ms) = args.latency_ms {
        config.execution.latency_ms = ms;
    }
    Ok(config)
}

/// Run the console in script control mode
fn run_script_control_mode(args: &Args) -> io::Result<()> {
    let config = load_config(args)?;
    let working_dir = std::env::current_dir()?;
    let mut control =
        ScriptControlMode::new(config, args.script_width, args.script_height, working_dir)?;
    if let Some(path) = &args.file {
        control.load_code_file(path)?;
    }
    control.run()
}

/// Main event loop
fn run_event_loop<T: Timer>(
    console: &mut Console<T>,
    terminal: &mut Terminal<ratatui::backend::CrosstermBackend<io::Stdout>>,
) -> io::Result<()> {
    const FRAME_DURATION: Duration = Duration::from_millis(16); // 60fps
    let mut last_render = Instant::now();
    let mut last_tick = Instant::now();
    let mut needs_render = true;

    loop {
        if console.process_async_messages() {
            needs_render = true;
        }

        if last_tick.elapsed() >= TICK_INTERVAL {
            console.tick();
            last_tick = Instant::now();
            needs_render = true;
        }

        if signal_handler::shutdown_requested() {
            tracing::info!("Termination signal received, shutting down");
            console.quit();
        }

        if console.should_quit() {
            break;
        }

        // Render at most 60fps
        if needs_render && last_render.elapsed() >= FRAME_DURATION {
            terminal.draw(|frame| console.render(frame))?;
            last_render = Instant::now();
            needs_render = false;
        }

        let timeout = if needs_render {
            FRAME_DURATION.saturating_sub(last_render.elapsed())
        } else {
            Duration::from_millis(50)
        };
        if !event_poll(timeout)? {
            continue;
        }

        match event_read()? {
            CrosstermEvent::Key(key_event) => {
                // Only process key press events to avoid duplicate events on Windows
                if key_event.kind == KeyEventKind::Press {
                    handle_key_event(console, key_event)?;
                    needs_render = true;
                }
            }
            CrosstermEvent::Resize(w, h) => {
                console.resize(w, h);
                needs_render = true;
            }
            _ => {}
        }
    }

    Ok(())
}

fn handle_key_event<T: Timer>(console: &mut Console<T>, key_event: KeyEvent) -> io::Result<()> {
    tracing::debug!(
        "Key event received: code={:?}, modifiers={:?}",
        key_event.code,
        key_event.modifiers
    );
    console.handle_key(key_event.code, key_event.modifiers)
}
