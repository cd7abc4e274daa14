mod config;
mod controller;
mod debounce;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use config::Config;
use controller::AppController;
use model::{AppModel, ChordClient};
use view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    // Held until exit so buffered log lines are flushed
    let _log_guard = match logging::init_logging(&config.log_dir) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {}", e);
            None
        }
    };

    tracing::info!("=== Chord Scraper Client Starting ===");
    let client = ChordClient::new(&config.api_url, config.request_timeout())?;
    tracing::info!(api_url = client.base_url(), debounce_ms = config.debounce_ms, "Configuration loaded");
    let model = Arc::new(AppModel::new());
    let controller = AppController::new(model.clone(), client, config.controller_settings());

    controller.spawn_health_monitor(config.health_interval());

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("Chord Scraper Client shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<AppModel>,
    controller: AppController,
) -> Result<()> {
    loop {
        model.expire_notifications().await;

        // Snapshot every slot so no lock is held while drawing
        let ui_state = model.get_ui_state().await;
        let search = model.get_search_state().await;
        let preview = model.get_preview_state().await;
        let notification = model.current_notification().await;

        terminal.draw(|f| {
            AppView::render(f, &ui_state, &search, &preview, notification.as_ref());
        })?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = controller.handle_key_event(key).await {
                    tracing::warn!(error = %e, "Key handling failed");
                }
            }
        }

        if model.should_quit().await {
            break;
        }
    }

    Ok(())
}
