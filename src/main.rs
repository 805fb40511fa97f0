mod app;
mod client;
mod config;
mod controllers;
mod logging;
mod signals;
mod ui;

use crate::app::core::Core;
use crate::app::event::AppEvent;
use crate::client::offline::Catalog;
use crate::client::{Executor, OfflineClient};
use anyhow::Result;
use crossterm::{
    event::EventStream,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

/// Notice expiry is counted in ticks of this length.
const TICK: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> Result<()> {
    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    // Load config
    let cfg = config::load_config()?;
    if let Some(path) = logging::init(&cfg.logging)? {
        tracing::info!(path = %path.display(), "logging to file");
    }

    let executor = build_executor(&cfg)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, executor, cfg).await;

    // Restore terminal
    restore_terminal()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

fn build_executor(cfg: &config::AppConfig) -> Result<Arc<dyn Executor>> {
    let mut catalog = match &cfg.client.catalog {
        Some(path) => Catalog::load(&config::expand_home(path))?,
        None => Catalog::sample(),
    };
    if !cfg.auth.accounts.is_empty() {
        catalog.accounts = cfg.auth.accounts.clone();
    }
    tracing::info!(
        projects = catalog.projects.len(),
        latency_ms = cfg.client.latency_ms,
        "offline client ready"
    );
    Ok(Arc::new(OfflineClient::new(
        catalog,
        Duration::from_millis(cfg.client.latency_ms),
        Handle::current(),
    )))
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    executor: Arc<dyn Executor>,
    cfg: config::AppConfig,
) -> Result<()> {
    let authenticated = cfg.auth.is_authenticated();
    let mut core = Core::new(executor, cfg, authenticated);

    // Spawn terminal input task
    let term_tx = core.sender();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            if term_tx.send(AppEvent::Terminal(event)).is_err() {
                break;
            }
        }
    });

    // Spawn tick task
    let tick_tx = core.sender();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(TICK);
        loop {
            interval.tick().await;
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    // Initial render
    terminal.draw(|f| ui::render(f, &core))?;
    core.take_dirty();

    // Main event loop
    while let Some(event) = core.next_event().await {
        core.handle_event(event);
        // Drain whatever queued up meanwhile so one redraw covers it
        core.pump();
        if core.should_quit() {
            break;
        }
        if core.take_dirty() {
            terminal.draw(|f| ui::render(f, &core))?;
        }
    }

    tracing::info!(state = %core.state(), "shutting down");
    Ok(())
}
