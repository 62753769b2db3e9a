mod app;
mod clock;
mod domain;
mod input;
mod notifications;
mod persistence;
mod reminders;
mod ui;

use anyhow::Result;
use app::AppState;
use clap::{Parser, Subcommand};
use clock::SystemClock;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use notifications::{Notifier, SystemNotifier};
use persistence::{ensure_nudge_dir, init_local_nudge, meta_file, tasks_file, FileStore, Store};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

#[derive(Parser)]
#[command(name = "nudge")]
#[command(about = "A minimal terminal to-do list with timed reminder notifications", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .nudge directory in the current directory
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let nudge_dir = init_local_nudge()?;
            println!("Initialized nudge directory: {}", nudge_dir.display());
            println!();
            println!("Nudge will now use this local directory for task storage.");
            println!("Run 'nudge' to start managing tasks.");
            Ok(())
        }
        None => run_tui(),
    }
}

fn run_tui() -> Result<()> {
    // Ensure nudge directory exists
    let nudge_dir = ensure_nudge_dir()?;
    eprintln!("Using nudge directory: {}", nudge_dir.display());

    // Wire up the ports and load the snapshot
    let store = FileStore::new(tasks_file()?);
    let notifier = SystemNotifier::from_meta(meta_file()?);
    let mut app = AppState::new(store, notifier, SystemClock)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Print any errors
    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app<S: Store, N: Notifier>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState<S, N, SystemClock>,
) -> Result<()> {
    let tick_rate = clock::tick_duration();

    loop {
        // Render
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    let should_quit = input::handle_key(app, key)?;
                    if should_quit {
                        return Ok(());
                    }
                }
            }
        }

        // Fire due reminders
        app.tick_reminders();
    }
}
