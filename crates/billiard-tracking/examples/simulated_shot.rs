//! Simulated shot: the cue ball strikes a red, both roll to rest
//!
//! Run with `RUST_LOG=billiard_tracking=debug` to see every transition and
//! resolver decision, or `=trace` for per-frame detail.

use anyhow::Context;
use billiard_core::{BallObservation, Vec2};
use billiard_tracking::{
    FnListener, StabilizationChange, StabilizationEngine, StabilizationParameters,
};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::Normal;
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(33);

struct Ball {
    id: &'static str,
    ball_type: &'static str,
    position: Vec2,
    velocity: Vec2,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let params = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading parameters from {path}"))?;
            StabilizationParameters::from_json(&json)?
        }
        None => StabilizationParameters::default(),
    };

    println!("=== Simulated Shot ===\n");
    println!("Parameters:\n{}\n", params.to_json()?);

    let mut engine = StabilizationEngine::with_listener(
        params,
        FnListener::new(|change: &StabilizationChange| println!("  >> {change}")),
    );
    engine.set_tracking(true);

    let mut balls = vec![
        Ball { id: "WHITE1", ball_type: "WHITE", position: Vec2::new(0.0, 0.0), velocity: Vec2::zeros() },
        Ball { id: "RED1", ball_type: "RED", position: Vec2::new(300.0, 0.0), velocity: Vec2::zeros() },
        Ball { id: "BLUE1", ball_type: "BLUE", position: Vec2::new(-400.0, -250.0), velocity: Vec2::zeros() },
    ];

    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let jitter = Normal::new(0.0, 0.8)?;
    let friction = 0.93;

    let mut timestamp = Duration::ZERO;
    let mut collided = false;
    for frame in 0..400 {
        match frame {
            60 => {
                println!("  cue strike");
                balls[0].velocity = Vec2::new(30.0, 0.0);
            }
            f if f > 60 && !collided && balls[0].position.x > 270.0 => {
                println!("  collision");
                collided = true;
                balls[1].velocity = balls[0].velocity * 0.9;
                balls[0].velocity *= 0.1;
            }
            _ => {}
        }

        for ball in &mut balls {
            ball.position += ball.velocity;
            ball.velocity *= friction;
            if ball.velocity.norm() < 0.05 {
                ball.velocity = Vec2::zeros();
            }
        }

        let observations: Vec<BallObservation> = balls
            .iter()
            .map(|ball| {
                let noise = Vec2::new(jitter.sample(&mut rng), jitter.sample(&mut rng));
                BallObservation::new(ball.id, ball.ball_type, ball.position + noise)
            })
            .collect();

        // Round trip through the detector wire format
        let wire = serde_json::to_string(&observations)?;
        let observations = BallObservation::frame_from_json(&wire)?;

        let status = engine.frame_at(timestamp, &observations);
        if frame % 50 == 0 {
            let metrics = engine.metrics();
            println!(
                "frame {frame:>3} t={:>5.2}s {status:<13} lost={} stable={}/{} unstable={:?}",
                timestamp.as_secs_f64(),
                metrics.total_lost_ball_count,
                metrics.stable_ball_count,
                metrics.current_ball_count,
                metrics.unstable_ball_ids,
            );
        }
        timestamp += FRAME;
    }

    println!("\nFinal status: {}", engine.status());
    Ok(())
}
