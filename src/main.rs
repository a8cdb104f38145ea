//! LexisLore - explore untranslatable words of the world
//!
//! A terminal vocabulary explorer with favorites, speech synthesis, and a
//! daily word quiz.

mod catalog;
mod config;
mod models;
mod quiz;
mod speech;
mod store;
mod ui;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use catalog::Catalog;
use store::{FileStore, Profile};
use ui::App;

// ══════════════════════════════════════════════════════════════════════════
// CLI Arguments
// ══════════════════════════════════════════════════════════════════════════

#[derive(Parser, Debug)]
#[command(name = "lexislore")]
#[command(author, version, about = "Explore untranslatable words of the world", long_about = None)]
struct Args {
    /// Directory for favorites, saved words, and quiz history
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// List the supported languages and exit
    #[arg(long)]
    list_languages: bool,
}

// ══════════════════════════════════════════════════════════════════════════
// Main Entry Point
// ══════════════════════════════════════════════════════════════════════════

fn main() -> Result<()> {
    let args = Args::parse();

    let catalog = Catalog::load()?;

    if args.list_languages {
        for lang in catalog.languages() {
            println!(
                "{} {} ({} words)",
                lang.flag,
                lang.name,
                catalog.words(&lang.name).len()
            );
        }
        return Ok(());
    }

    // Initialize storage
    let data_dir = args.data_dir.unwrap_or_else(FileStore::default_path);
    let store = FileStore::new(data_dir)?;
    let profile = Profile::load(Box::new(store));

    run_tui(catalog, profile)
}

fn run_tui(catalog: Catalog, profile: Profile) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Load config
    let config = config::Config::load().unwrap_or_default();

    // Create app
    let mut app = App::new(catalog, profile, config);

    // Run main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {}", err);
        return Err(err);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| app.render(frame))?;
        app.handle_events()?;
    }
    Ok(())
}
