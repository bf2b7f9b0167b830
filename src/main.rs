//! wanderplan - Plan trips day by day from the terminal
//!
//! Without a subcommand this opens the interactive planner; with one it runs
//! a single planner operation against the trip in progress and exits.

use std::io;
use std::panic;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use wanderplan::app::App;
use wanderplan::cli::Cli;
use wanderplan::commands::{self, StdinConfirm};
use wanderplan::config::Settings;
use wanderplan::{logging, ui};

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

fn run_planner(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let export_dir = std::env::current_dir()?;
    let mut app = App::new(
        Some(settings.store()),
        settings.autosave_interval,
        export_dir,
    );
    info!(data_dir = %settings.data_dir.display(), "planner started");

    // Main event loop
    loop {
        // Render UI
        terminal.draw(|f| ui::render(f, &app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        app.tick(Instant::now());

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    // Keep the last edits in the autosave slot
    app.planner.auto_save();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match Settings::from_cli(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init(&settings) {
        eprintln!("Warning: could not open log file: {}", e);
    }

    match cli.command {
        Some(command) => {
            let mut stdout = io::stdout();
            match commands::run(command, &settings, &mut stdout, &mut StdinConfirm) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    error!(%e, "command failed");
                    eprintln!("Error: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        None => match run_planner(&settings) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!(%e, "planner exited with an error");
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}
