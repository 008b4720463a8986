mod app;
mod demo;

use anyhow::Result;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io;
use std::time::Duration;

use termfold_config::Config;
use termfold_core::EventHandler;
use termfold_logger::{self as logger, LogLevel};

use app::App;

const TICK_RATE: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let config = Config::load().unwrap_or_default();

    let min_level = config
        .logging
        .min_level
        .parse::<LogLevel>()
        .unwrap_or(LogLevel::Info);
    logger::init(
        config.log_file_path().ok(),
        config.logging.max_entries,
        min_level,
    );
    logger::info("termfold starting");

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let mut app = App::new(&config, Rect::new(0, 0, size.width, size.height));
    let result = app.run(&mut terminal, &EventHandler::new(TICK_RATE));

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        logger::error(format!("termfold stopped: {:?}", err));
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
