mod app;
mod handlers;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use handlers::handle_key_event;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
    sync::Mutex,
};
use threadline::{SeedConfig, Store, wire};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::ui;

#[derive(Parser)]
#[command(name = "threadline-chat")]
#[command(about = "A terminal chat client backed by a Threadline store")]
#[command(version)]
struct Args {
    /// JSON seed file describing the initial threads
    #[arg(long, env = "THREADLINE_SEED", value_name = "PATH")]
    seed: Option<PathBuf>,

    /// Apply a JSON array of actions, print the resulting state and exit
    #[arg(long, env = "THREADLINE_REPLAY", value_name = "PATH")]
    replay: Option<PathBuf>,

    /// Write logs to this file while the interface is running
    #[arg(long, env = "THREADLINE_LOG_FILE", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(short, long)]
    verbose: bool,
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }))
}

/// Installs the global subscriber.
///
/// The interface owns the terminal, so without a log file nothing is logged
/// there. Replay mode logs to stderr, keeping stdout for the state.
fn init_tracing(args: &Args) -> Result<()> {
    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(env_filter(args.verbose))
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if args.replay.is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter(args.verbose))
            .with_writer(io::stderr)
            .init();
    }
    Ok(())
}

fn open_store(seed: Option<&Path>) -> Result<Store> {
    let Some(path) = seed else {
        return Ok(Store::new());
    };
    let seed = SeedConfig::load(path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    let store = Store::from_seed(seed)
        .with_context(|| format!("Invalid seed file {}", path.display()))?;
    info!(path = %path.display(), "Loaded seed");
    Ok(store)
}

/// Dispatches every action of the script and returns the final state as JSON.
fn replay(store: &Store, script: &Path) -> Result<String> {
    let input = std::fs::read_to_string(script)
        .with_context(|| format!("Failed to read replay script {}", script.display()))?;
    let actions = wire::decode_actions(&input)
        .with_context(|| format!("Invalid replay script {}", script.display()))?;
    info!(actions = actions.len(), "Replaying script");
    store.dispatch_all(actions);
    Ok(wire::encode_state(&store.state())?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args)?;

    // The one store for this process
    let store = open_store(args.seed.as_deref())?;

    if let Some(script) = &args.replay {
        println!("{}", replay(&store, script)?);
        return Ok(());
    }

    let mut app = App::new(store);

    // Setup terminal for TUI
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("Terminal interface failed")
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        // Only redraw after the store or the input field changed
        if app.take_dirty() {
            terminal.draw(|f| ui(f, app))?;
        }

        // Process all available events without blocking
        let mut handled_event = false;
        while event::poll(std::time::Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handled_event = true;
                    handle_key_event(app, key.code, key.modifiers);
                }
                Event::Resize(_, _) => app.mark_dirty(),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }

        if !handled_event {
            // Small delay to prevent busy waiting
            tokio::time::sleep(tokio::time::Duration::from_millis(30)).await;
        }
    }
    Ok(())
}
