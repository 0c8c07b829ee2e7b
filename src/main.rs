//! Gloomveil - Entry Point
//!
//! Initializes the terminal, builds a dungeon from a generated or loaded
//! layout, and runs the main loop.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};

use gloomveil::game::{Game, GameState};
use gloomveil::ui::App;
use gloomveil::world::generation::generate_layout;
use gloomveil::{Config, RawLayout};

/// Target frames per second for the game loop
const TARGET_FPS: u64 = 60;
const FRAME_TIME: Duration = Duration::from_millis(1000 / TARGET_FPS);

/// Walk a fog-shrouded tile dungeon in the terminal
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RON config file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON layout to load instead of generating one
    #[arg(short, long)]
    layout: Option<PathBuf>,

    /// Seed for the layout generator and spawn room
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging to file (to avoid interfering with TUI)
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("gloomveil.log")
        .context("opening gloomveil.log")?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    log::info!("Starting Gloomveil v{}", env!("CARGO_PKG_VERSION"));

    let config_path = args.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load_or_default(&config_path);
    if args.seed.is_some() {
        config.dungeon.seed = args.seed;
    }

    let layout = match &args.layout {
        Some(path) => load_layout(path)?,
        None => generate_layout(&config.dungeon),
    };
    let mut game = Game::new(&config, &layout).context("building dungeon")?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();

    // Run the game loop
    let result = run_game_loop(&mut terminal, &mut app, &mut game);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Report any errors
    if let Err(ref e) = result {
        log::error!("Game exited with error: {}", e);
        eprintln!("Error: {}", e);
    }

    log::info!("Gloomveil shut down cleanly");
    result
}

/// Read a layout produced by an external generator
fn load_layout(path: &Path) -> Result<RawLayout> {
    let content = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let layout: RawLayout =
        serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
    log::info!("Loaded {}x{} layout from {}", layout.width, layout.height, path.display());
    Ok(layout)
}

/// Main game loop
fn run_game_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    game: &mut Game,
) -> Result<()> {
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();
        let delta = frame_start.duration_since(last_frame);
        last_frame = frame_start;

        // Handle input
        if event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events, not releases
                if key.kind == KeyEventKind::Press {
                    match app.handle_input(key, game) {
                        Ok(should_quit) if should_quit => break,
                        Ok(_) => {}
                        Err(e) => log::warn!("Input handling error: {}", e),
                    }
                }
            }
        }

        // Fog follows what is on screen
        let size = terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);
        game.set_viewport(app.map_viewport(area, game.player()));

        // Update game state
        game.update(delta);

        // Render
        terminal.draw(|frame| {
            app.render(frame, game);
        })?;

        // Check if game wants to quit
        if matches!(game.state(), GameState::Quit) {
            break;
        }

        // Frame rate limiting
        let frame_time = frame_start.elapsed();
        if frame_time < FRAME_TIME {
            std::thread::sleep(FRAME_TIME - frame_time);
        }
    }

    Ok(())
}
