use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use super::errors::{ScoreboardError, ScoreboardResult};

/// Opaque identifier the scoreboard assigns when a match starts.
/// It never changes across score updates and is never reused by the same board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MatchId(u64);

impl MatchId {
    pub(crate) fn new(raw: u64) -> Self {
        MatchId(raw)
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Goals scored by each side. Both components are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Score {
    home: i32,
    away: i32,
}

impl Score {
    /// Build a score, rejecting negative components.
    pub fn new(home: i32, away: i32) -> ScoreboardResult<Self> {
        if home < 0 || away < 0 {
            return Err(ScoreboardError::NegativeScore { home, away });
        }
        Ok(Score { home, away })
    }

    /// 0-0, the score every match starts with.
    pub fn nil() -> Self {
        Score::default()
    }

    pub fn home(&self) -> i32 {
        self.home
    }

    pub fn away(&self) -> i32 {
        self.away
    }

    /// Total goals scored in the match. Widened so two `i32::MAX` components
    /// still add up.
    pub fn total(&self) -> i64 {
        i64::from(self.home) + i64::from(self.away)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}

/// Immutable snapshot of a live match.
///
/// A score change never mutates a `Match`; the scoreboard hands out a new
/// snapshot carrying the same id, teams and start time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    id: MatchId,
    home_team: String,
    away_team: String,
    score: Score,
    started_at: DateTime<Utc>,
}

impl Match {
    pub(crate) fn new(
        id: MatchId,
        home_team: impl Into<String>,
        away_team: impl Into<String>,
        score: Score,
        started_at: DateTime<Utc>,
    ) -> Self {
        Match {
            id,
            home_team: home_team.into(),
            away_team: away_team.into(),
            score,
            started_at,
        }
    }

    /// Copy of this snapshot with a different score.
    pub(crate) fn with_score(&self, score: Score) -> Self {
        Match {
            score,
            ..self.clone()
        }
    }

    pub fn id(&self) -> MatchId {
        self.id
    }

    pub fn home_team(&self) -> &str {
        &self.home_team
    }

    pub fn away_team(&self) -> &str {
        &self.away_team
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn home_score(&self) -> i32 {
        self.score.home()
    }

    pub fn away_score(&self) -> i32 {
        self.score.away()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Whether `team` plays on either side of this match (exact comparison).
    pub fn involves(&self, team: &str) -> bool {
        self.home_team == team || self.away_team == team
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} - {} {}",
            self.home_team, self.score.home, self.away_team, self.score.away
        )
    }
}
