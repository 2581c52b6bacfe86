use anyhow::Result;
use clap::Parser;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use live_scoreboard::config::Config;
use live_scoreboard::console::{Console, Outcome, HELP};
use live_scoreboard::scoreboard::Scoreboard;
use live_scoreboard::simulation::{log_event, FeedSimulator};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    config.validate()?;

    let limits = config.limits();
    info!(
        "Scoreboard ready (max score {}, max increase per update {})",
        limits.max_score, limits.max_delta
    );

    let mut console = Console::new(Scoreboard::with_limits(limits), config.json);
    let mut simulator = FeedSimulator::new(config.seed);
    if config.simulate {
        info!("Simulated live feed enabled (tick {}ms)", config.tick_millis);
    }
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(Duration::from_millis(config.tick_millis.max(1)));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("Input closed, shutting down");
                    break;
                };
                match console.handle_line(&line) {
                    Ok(Some(Outcome::Output(text))) => println!("{}", text),
                    Ok(Some(Outcome::Quit)) => break,
                    Ok(None) => {}
                    Err(e) => {
                        warn!("Command failed: {}", e);
                        println!("Error: {}", e);
                    }
                }
            }
            _ = ticker.tick(), if config.simulate => {
                let event = simulator.step(console.board_mut());
                log_event(&event);
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, shutting down");
                break;
            }
        }
    }

    Ok(())
}
