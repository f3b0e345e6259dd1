mod app;
mod async_ops;
pub mod config;
mod theme;
mod ui;
mod views;

use anyhow::Result;
use app::App;
use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use std::io::stdout;
use std::sync::mpsc;
use std::time::Duration;

use async_ops::CommandResult;

/// Install a tracing subscriber writing to the config-dir log file.
///
/// Only active when `WORKLENS_LOG` is set (the value is the env filter) —
/// the terminal itself belongs to the UI.
pub fn init_logging() {
    let Ok(filter) = std::env::var("WORKLENS_LOG") else {
        return;
    };
    let Ok(path) = config::log_file_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let Ok(file) = std::fs::OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .init();
}

/// Launch the dashboard.
pub fn run() -> Result<()> {
    let config = config::load_config();
    tracing::info!(url = %config.server.url, "starting worklens");

    let mut app = App::new(config);
    app.start();

    // Terminal setup
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    let (tx, rx) = mpsc::channel::<CommandResult>();

    loop {
        // ── Apply completed async work ───────────────────────────────
        while let Ok(result) = rx.try_recv() {
            app.apply_command_result(result);
        }

        // ── Dispatch queued commands without blocking the UI ─────────
        // Results come back over the channel; if the loop has exited by
        // then, the send fails and the late response is simply dropped.
        for cmd in app.take_pending_commands() {
            let tx = tx.clone();
            let config = app.config.clone();
            rt.spawn(async move {
                let _ = tx.send(async_ops::execute(cmd, &config).await);
            });
        }

        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if app.handle_key(key.code) {
                    break;
                }
            }
        }
    }
    Ok(())
}
