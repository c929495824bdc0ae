//! Pong Sim headless runner
//!
//! Plays a match with both paddles on autopilot and reports what happened.
//!
//! Usage:
//!   pong-sim --seed 42 --frames 7200
//!   RUST_LOG=debug pong-sim --config match.json --json

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use pong_sim::MatchConfig;
use pong_sim::autopilot::steer;
use pong_sim::sim::{FrameInput, GameEvent, MatchState, Side, tick};

#[derive(Parser)]
#[command(name = "pong-sim")]
#[command(about = "Run the Pong simulation headless with both paddles on autopilot")]
struct Args {
    /// Match config (JSON); defaults are used when omitted
    #[arg(long)]
    config: Option<String>,

    /// Serve RNG seed
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Frames to simulate
    #[arg(long, default_value_t = 3600)]
    frames: u64,

    /// Frame delta in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Print every event as a JSON line
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct EventLine<'a> {
    frame: u64,
    event: &'a GameEvent,
}

#[derive(Debug, Default)]
struct Tally {
    left_hits: u32,
    right_hits: u32,
    boosts: u32,
    wall_bounces: u32,
    left_points: u32,
    right_points: u32,
}

impl Tally {
    fn record(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::WallBounce => self.wall_bounces += 1,
            GameEvent::PaddleHit { side, boosted } => {
                match side {
                    Side::Left => self.left_hits += 1,
                    Side::Right => self.right_hits += 1,
                }
                if boosted {
                    self.boosts += 1;
                }
            }
            // Leaving through one end is a point for the other side
            GameEvent::Score { side } => match side.opposite() {
                Side::Left => self.left_points += 1,
                Side::Right => self.right_points += 1,
            },
            GameEvent::Serve { .. } => {}
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            MatchConfig::load(path).with_context(|| format!("failed to load config {path}"))?
        }
        None => MatchConfig::default(),
    };

    let mut state = MatchState::new(config, args.seed).context("invalid match config")?;
    log::info!(
        "Simulating {} frames at dt = {:.4}s (seed {})",
        args.frames,
        args.dt,
        args.seed
    );

    let mut tally = Tally::default();
    for _ in 0..args.frames {
        let input = FrameInput::new(
            steer(&state.left, &state.ball, state.config(), state.frame),
            steer(&state.right, &state.ball, state.config(), state.frame),
        );

        for event in tick(&mut state, &input, args.dt) {
            tally.record(&event);
            if args.json {
                let line = EventLine {
                    frame: state.frame,
                    event: &event,
                };
                println!("{}", serde_json::to_string(&line)?);
            }
        }
    }

    let snapshot = state.snapshot();
    println!();
    println!("=== MATCH SUMMARY ===");
    println!("  Frames:       {}", snapshot.frame);
    println!("  Serves:       {}", state.serves);
    println!("  Points:       left {} / right {}", tally.left_points, tally.right_points);
    println!("  Paddle hits:  left {} / right {}", tally.left_hits, tally.right_hits);
    println!("  Power hits:   {}", tally.boosts);
    println!("  Wall bounces: {}", tally.wall_bounces);
    println!(
        "  Ball:         pos ({:.2}, {:.2})  vel ({:.2}, {:.2})",
        snapshot.ball_pos.x, snapshot.ball_pos.z, snapshot.ball_vel.x, snapshot.ball_vel.z
    );

    Ok(())
}
