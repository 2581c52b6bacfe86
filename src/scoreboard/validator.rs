//! Business rules for starting matches and changing scores.
//!
//! Validators hold no state of their own: the scoreboard passes in the live
//! matches and the proposed change, and gets back `Ok(())` or the first rule
//! that was broken.

use serde::Serialize;

use super::errors::{ScoreboardError, ScoreboardResult, Side};
use super::models::{Match, Score};

/// Default ceiling for a single team's score.
pub const DEFAULT_MAX_SCORE: i32 = 30;
/// Default largest increase of a single team's score in one update.
pub const DEFAULT_MAX_DELTA: i32 = 5;

/// Rule checks the scoreboard runs before every mutation.
pub trait MatchValidator {
    /// Check that `home` vs `away` may start given the currently live matches.
    fn validate_new_match(
        &self,
        home: Option<&str>,
        away: Option<&str>,
        live_matches: &[Match],
    ) -> ScoreboardResult<()>;

    /// Check that `current` may move to `new_score`.
    fn validate_score_update(&self, current: &Match, new_score: Score) -> ScoreboardResult<()>;
}

/// Score ceiling and per-update increase limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreLimits {
    pub max_score: i32,
    pub max_delta: i32,
}

impl Default for ScoreLimits {
    fn default() -> Self {
        ScoreLimits {
            max_score: DEFAULT_MAX_SCORE,
            max_delta: DEFAULT_MAX_DELTA,
        }
    }
}

/// Football rules: one live match per team, scores never go down, bounded
/// ceiling and bounded jump per update.
#[derive(Debug, Clone, Default)]
pub struct FootballMatchValidator {
    limits: ScoreLimits,
}

impl FootballMatchValidator {
    pub fn new(limits: ScoreLimits) -> Self {
        FootballMatchValidator { limits }
    }
}

impl MatchValidator for FootballMatchValidator {
    fn validate_new_match(
        &self,
        home: Option<&str>,
        away: Option<&str>,
        live_matches: &[Match],
    ) -> ScoreboardResult<()> {
        let home = home.ok_or(ScoreboardError::MissingTeam(Side::Home))?;
        let away = away.ok_or(ScoreboardError::MissingTeam(Side::Away))?;

        if home.trim().is_empty() || away.trim().is_empty() {
            return Err(ScoreboardError::BlankTeamName);
        }
        if home == away {
            return Err(ScoreboardError::SameTeam(home.to_string()));
        }

        // Home is checked across every live match before away.
        for team in [home, away] {
            if live_matches.iter().any(|m| m.involves(team)) {
                return Err(ScoreboardError::TeamAlreadyPlaying(team.to_string()));
            }
        }
        Ok(())
    }

    fn validate_score_update(&self, current: &Match, new_score: Score) -> ScoreboardResult<()> {
        let old = current.score();

        if new_score.home() < old.home() || new_score.away() < old.away() {
            return Err(ScoreboardError::ScoreDecreased {
                from: old,
                to: new_score,
            });
        }

        let max = self.limits.max_score;
        if new_score.home() > max || new_score.away() > max {
            return Err(ScoreboardError::ScoreAboveMaximum {
                score: new_score,
                max,
            });
        }

        let max = self.limits.max_delta;
        if new_score.home() - old.home() > max || new_score.away() - old.away() > max {
            return Err(ScoreboardError::IncreaseAboveMaximum {
                from: old,
                to: new_score,
                max,
            });
        }
        Ok(())
    }
}
