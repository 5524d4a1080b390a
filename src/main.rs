//! Point Blank headless simulation host
//!
//! Runs one match on the fixed-rate frame loop with the autopilot at the
//! controls and logs a summary when it finishes.

use std::time::Duration;

use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use pointblank_sim::config::Config;
use pointblank_sim::game::{Autopilot, GamePhase, MatchCommand, MatchRunner};
use pointblank_sim::util::time::Timer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    init_tracing(&config.log_level);

    let seed = config.seed.unwrap_or_else(rand::random);
    info!("Starting Point Blank headless simulation");
    info!(
        map = %config.map_id,
        mode = %config.mode_id,
        seed,
        tick_rate = config.tick_rate,
        "Match configuration"
    );

    let (runner, handle) = MatchRunner::new(
        Uuid::new_v4(),
        seed,
        config.gameplay,
        config.tick_rate,
        config.snapshot_rate,
    );
    let mut snapshots = handle.subscribe();
    let runner_task = tokio::spawn(runner.run());

    handle
        .command(MatchCommand::Start {
            map_id: config.map_id.clone(),
            mode_id: config.mode_id.clone(),
        })
        .await?;

    let wall = Timer::new();
    let mut autopilot = Autopilot::new();
    let deadline = tokio::time::sleep(Duration::from_secs(config.run_secs));
    tokio::pin!(deadline);
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut deadline => {
                info!("Run time elapsed");
                break;
            }
            _ = &mut shutdown => break,
            received = snapshots.recv() => match received {
                Ok(snapshot) => {
                    if snapshot.phase == GamePhase::GameOver {
                        break;
                    }
                    handle.send_input(autopilot.steer(&snapshot)).await?;
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Autopilot fell behind on snapshots");
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    // The runner may already have stopped on its own
    handle.shutdown().await.ok();
    let summary = runner_task.await?;

    info!(
        match_id = %summary.match_id,
        phase = ?summary.phase,
        frames = summary.frames,
        score = summary.score,
        kills = summary.kills,
        deaths = summary.deaths,
        end_reason = ?summary.end_reason,
        wall_ms = wall.elapsed_ms(),
        "Match summary"
    );

    if let Some(snapshot) = handle.latest() {
        debug!(snapshot = %serde_json::to_string(&snapshot)?, "Final snapshot");
    }
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, stopping match");
        }
        _ = terminate => {
            info!("Received terminate signal, stopping match");
        }
    }
}
