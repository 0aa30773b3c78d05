//! Dragonfire entry point
//!
//! Loads settings, sets up the terminal and runs one session.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use dragonfire::audio::{AudioManager, LogBackend};
use dragonfire::platform::{Engine, FrameLimiter, TerminalGuard, TerminalInput};
use dragonfire::renderer::TerminalCanvas;
use dragonfire::settings::DEFAULT_SETTINGS_FILE;
use dragonfire::{HighScore, Session, Settings};

#[derive(Parser, Debug)]
#[command(name = "dragonfire", version, about = "Dodge fireballs, steal the dragon's treasure")]
struct Args {
    /// Settings file (JSON), created with defaults if missing
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,

    /// High score file, overriding the settings
    #[arg(long)]
    high_score_file: Option<PathBuf>,

    /// Seed for treasure placement
    #[arg(long)]
    seed: Option<u64>,

    /// Create a zeroed high score file if none exists
    #[arg(long)]
    init_high_score: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = Settings::load_or_create(&args.settings);
    if let Some(path) = args.high_score_file {
        settings.high_score_path = path;
    }
    if args.seed.is_some() {
        settings.seed = args.seed;
    }

    if args.init_high_score {
        HighScore::create_if_missing(&settings.high_score_path)
            .context("initialising high score file")?;
    }

    let mut session = Session::start(&settings).context("loading high score")?;

    let guard = TerminalGuard::enter().context("preparing terminal")?;
    let mut engine = Engine::new(
        TerminalCanvas::stdout(),
        TerminalInput::spawn(guard.keyboard_enhanced()),
        AudioManager::from_settings(&settings, Box::new(LogBackend)),
        FrameLimiter::new(),
    );

    let result = session.run(&mut engine);
    engine.shutdown(Duration::from_millis(settings.fadeout_ms));
    drop(guard);

    let summary = result.context("running game")?;
    println!(
        "Final score: {} (level {}, {} stage pairs cleared){}",
        summary.score,
        summary.level,
        summary.pairs_completed,
        if summary.new_high_score {
            " - new high score!"
        } else {
            ""
        }
    );
    Ok(())
}
