//! Planet Breaker headless runner
//!
//! Drives one session at the target tick rate with the demo autopilot, then
//! records the result on the high score board.
//!
//! Usage:
//!   RUST_LOG=info cargo run -- --seed 7 --seconds 120

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use planet_breaker::consts::TICK_MS;
use planet_breaker::sim::{GameEvent, Session, autopilot_input};
use planet_breaker::highscores::HighScoreEntry;
use planet_breaker::{HighScores, SessionConfig};

#[derive(Parser)]
#[command(name = "planet-breaker")]
#[command(about = "Run a headless Planet Breaker session with the demo pilot")]
struct Args {
    /// Session config JSON (viewport, seed, tuning)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the config seed
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many simulated seconds if the ship survives
    #[arg(long, default_value_t = 300)]
    seconds: u32,
    /// Leaderboard file
    #[arg(long, default_value = "highscores.json")]
    highscores: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("failed to load config: {}", path.display()))?,
        None => SessionConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let mut session = Session::start(&config).context("failed to start session")?;
    let max_ticks = u64::from(args.seconds) * u64::from(planet_breaker::consts::TICK_RATE);

    let mut shots = 0u64;
    let mut kills = 0u64;
    for _ in 0..max_ticks {
        let input = autopilot_input(session.state());
        session.tick(&input, TICK_MS);

        for event in session.drain_events() {
            match event {
                GameEvent::Fired { .. } => shots += 1,
                GameEvent::HostileDestroyed { .. } => kills += 1,
                GameEvent::PlayerDamaged { health } => {
                    log::info!("Ship hit! {} health left", health);
                }
                GameEvent::SessionEnded { final_score } => {
                    log::info!("Game over, final score {}", final_score);
                }
                GameEvent::HostileSpawned { .. } => {}
            }
        }

        if session.final_score().is_some() {
            break;
        }
    }

    let survived_ms = session.state().elapsed_ms as u64;
    let score = session.terminate();

    let mut scores = HighScores::load(&args.highscores).with_context(|| {
        format!("failed to read high scores: {}", args.highscores.display())
    })?;
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let rank = scores.record(HighScoreEntry {
        score,
        survived_ms,
        timestamp,
    });
    scores
        .save(&args.highscores)
        .with_context(|| format!("failed writing high scores: {}", args.highscores.display()))?;

    println!("=== SESSION RESULTS ===");
    println!("  Seed:       {}", config.seed);
    println!("  Score:      {}", score);
    println!("  Survived:   {:.1}s", survived_ms as f64 / 1000.0);
    println!("  Shots:      {}", shots);
    println!("  Destroyed:  {}", kills);
    println!("  High score: {}", scores.best());
    if let Some(rank) = rank {
        println!("  Leaderboard rank #{}", rank);
    }
    Ok(())
}
