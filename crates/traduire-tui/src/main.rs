//! traduire: translate text in the terminal with the MyMemory API and
//! keep a history of past translations.
//!
//! The UI task owns `App` and is the only place state changes. Terminal
//! input, ticks and translate completions all arrive on one channel
//! (`tui::EventHandler`) and are applied in order by `handler`.

mod app;
mod handler;
mod logging;
mod tui;
mod ui;

use anyhow::{Context, Result};
use traduire_core::{Config, FileSettings, HistoryStore};

use app::App;
use tui::{EventHandler, Tui};

#[tokio::main]
async fn main() -> Result<()> {
    match logging::init() {
        Ok(path) => log::info!("traduire {} starting, logging to {:?}", env!("CARGO_PKG_VERSION"), path),
        Err(e) => eprintln!("warning: logging disabled: {:#}", e),
    }

    let config_path = Config::default_path()?;
    let config = Config::load_from(&config_path).unwrap_or_else(|e| {
        log::warn!("ignoring unreadable config {:?}: {:#}", config_path, e);
        Config::new()
    });

    let settings = FileSettings::open_default().context("Failed to open settings storage")?;
    log::debug!("settings at {:?}", settings.path());
    let history = HistoryStore::new(Box::new(settings));

    let mut app = App::new(config, Some(config_path), history);
    log::info!("using endpoint {}", app.client.endpoint());

    tui::install_panic_hook();
    let mut terminal = tui::init()?;

    let result = run(&mut terminal, &mut app).await;

    // Restore the terminal whether or not the loop failed
    tui::restore()?;

    if let Err(e) = &result {
        log::error!("exiting with error: {:#}", e);
    }
    result
}

async fn run(terminal: &mut Tui, app: &mut App) -> Result<()> {
    let mut events = EventHandler::new();
    let tx = events.sender();

    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event, &tx),
            None => break,
        }
    }

    Ok(())
}
