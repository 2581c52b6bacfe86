use clap::Parser;

use crate::scoreboard::validator::{DEFAULT_MAX_DELTA, DEFAULT_MAX_SCORE};
use crate::scoreboard::ScoreLimits;

/// Live sports scoreboard console
#[derive(Parser, Debug, Clone)]
#[command(name = "live-scoreboard", version, about)]
pub struct Config {
    /// Highest score a single team may reach
    #[arg(long, env = "MAX_SCORE", default_value_t = DEFAULT_MAX_SCORE)]
    pub max_score: i32,

    /// Largest increase of a single team's score in one update
    #[arg(long, env = "MAX_DELTA", default_value_t = DEFAULT_MAX_DELTA)]
    pub max_delta: i32,

    /// Drive the board with a simulated live feed
    #[arg(long, env = "SIMULATE", default_value = "false")]
    pub simulate: bool,

    /// Simulated feed tick interval in milliseconds
    #[arg(long, env = "TICK_MILLIS", default_value = "1000")]
    pub tick_millis: u64,

    /// Seed for the simulated feed (random when omitted)
    #[arg(long, env = "SEED")]
    pub seed: Option<u64>,

    /// Print summaries as JSON
    #[arg(long, env = "JSON_OUTPUT", default_value = "false")]
    pub json: bool,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_score <= 0 {
            anyhow::bail!("max_score must be positive");
        }
        if self.max_delta <= 0 {
            anyhow::bail!("max_delta must be positive");
        }
        if self.max_delta > self.max_score {
            anyhow::bail!(
                "max_delta ({}) must not exceed max_score ({})",
                self.max_delta,
                self.max_score
            );
        }
        if self.simulate && self.tick_millis == 0 {
            anyhow::bail!("tick_millis must be positive when simulating");
        }
        Ok(())
    }

    pub fn limits(&self) -> ScoreLimits {
        ScoreLimits {
            max_score: self.max_score,
            max_delta: self.max_delta,
        }
    }
}
