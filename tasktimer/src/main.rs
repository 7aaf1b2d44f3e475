use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tasktimer_core::input::{MAX_HOURS, MAX_MINUTES, MAX_SECONDS, MAX_WARNING_PERIOD};
use tasktimer_core::{Controller, Settings};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod app;
mod clock;
mod config;
mod event;
mod notifications;
mod summary;
mod ui;

use app::App;
use clock::TokioClock;
use config::Config;
use event::AppEvent;
use notifications::DesktopNotifier;

#[derive(Parser, Debug)]
#[command(name = "tasktimer")]
#[command(about = "A countdown timer for focused task sessions", long_about = None)]
struct Cli {
    /// Task name to start with
    #[arg(short, long)]
    task: Option<String>,
    /// Hours of the initial duration
    #[arg(long)]
    hours: Option<u64>,
    /// Minutes of the initial duration
    #[arg(short, long)]
    minutes: Option<u64>,
    /// Seconds of the initial duration
    #[arg(short, long)]
    seconds: Option<u64>,
    /// Seconds before the end at which the warning starts
    #[arg(short, long)]
    warning: Option<u64>,
    /// Start in dark mode
    #[arg(long)]
    dark: bool,
    /// Never send desktop notifications
    #[arg(long)]
    no_notify: bool,
    /// Print the completed-task summary as JSON on exit
    #[arg(long)]
    json: bool,
    /// Config file to use instead of the platform default
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Where to write the log
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(task) = &self.task {
            config.timer.task = task.clone();
        }
        if let Some(hours) = self.hours {
            config.timer.hours = hours.min(MAX_HOURS);
        }
        if let Some(minutes) = self.minutes {
            config.timer.minutes = minutes.min(MAX_MINUTES);
        }
        if let Some(seconds) = self.seconds {
            config.timer.seconds = seconds.min(MAX_SECONDS);
        }
        if let Some(warning) = self.warning {
            config.timer.warning_period = warning.min(MAX_WARNING_PERIOD);
        }
        if self.dark {
            config.dark_mode = true;
        }
        if self.no_notify {
            config.notifications.enabled = false;
        }
    }
}

/// The TUI owns stdout, so logs go to a file.
fn init_logging(path: Option<PathBuf>) -> Result<()> {
    let Some(path) = path.or_else(config::default_log_path) else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory {:?}", parent))?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = config::load_config(cli.config.as_deref())?;
    cli.apply(&mut config);
    init_logging(cli.log_file.clone())?;
    info!("Starting tasktimer");

    let (tx, mut rx) = mpsc::unbounded_channel();
    let settings = Settings {
        tick_interval: Duration::from_millis(config.timer.tick_interval_ms.max(1)),
        warning_period: config.timer.warning_period,
        icon: config.notifications.icon.clone(),
    };
    let controller = Controller::new(
        TokioClock::new(tx.clone()),
        DesktopNotifier::new(&config.notifications),
        settings,
    );
    let mut app = App::new(controller, config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    event::spawn_input_reader(tx);
    let res = run_app(&mut terminal, &mut app, &mut rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.controller.shutdown();
    rx.close();
    info!(
        "Exiting with {} completed tasks",
        app.controller.log().len()
    );

    summary::finish(&mut io::stdout(), app.controller.log(), cli.json, res)
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App<TokioClock, DesktopNotifier>,
    rx: &mut UnboundedReceiver<AppEvent>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let Some(event) = rx.recv().await else {
            return Ok(());
        };
        match event {
            AppEvent::Tick(generation) => {
                if app.controller.scheduler().is_current(generation) {
                    app.on_tick();
                } else {
                    debug!("Dropping stale tick from source {}", generation);
                }
            }
            AppEvent::Key(key) => app.handle_key(key),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
