//! Scoreboard error types.

use thiserror::Error;

use super::models::{MatchId, Score};

/// Coarse failure class of a [`ScoreboardError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required value was not supplied
    NullInput,
    /// A value breaks a structural or business rule
    InvalidArgument,
    /// The request clashes with the current live matches
    ConflictingState,
    /// The addressed match is not live
    NotFound,
}

/// Which side of a fixture a team name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Home => f.write_str("Home"),
            Side::Away => f.write_str("Away"),
        }
    }
}

/// Scoreboard errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreboardError {
    /// Team name not supplied
    #[error("{0} team must not be null")]
    MissingTeam(Side),

    /// Team name empty or whitespace only
    #[error("Team names must not be blank")]
    BlankTeamName,

    /// A team cannot play itself
    #[error("Home and away team must be different: {0}")]
    SameTeam(String),

    /// Team is already in a live match
    #[error("Team {0} has a match in progress")]
    TeamAlreadyPlaying(String),

    /// Score component below zero
    #[error("Scores may not be negative: {home}-{away}")]
    NegativeScore { home: i32, away: i32 },

    /// Either component went down
    #[error("Scores may not go down during a game: {from} to {to}")]
    ScoreDecreased { from: Score, to: Score },

    /// Either component above the ceiling
    #[error("Score {score} exceeds maximum allowed score of {max}")]
    ScoreAboveMaximum { score: Score, max: i32 },

    /// Either component jumped by more than the allowed delta
    #[error("Score increase from {from} to {to} exceeds maximum score increase of {max}")]
    IncreaseAboveMaximum { from: Score, to: Score, max: i32 },

    /// Match is not live on this board
    #[error("Match not found: {0}")]
    MatchNotFound(MatchId),
}

impl ScoreboardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScoreboardError::MissingTeam(_) => ErrorKind::NullInput,
            ScoreboardError::BlankTeamName
            | ScoreboardError::SameTeam(_)
            | ScoreboardError::NegativeScore { .. }
            | ScoreboardError::ScoreDecreased { .. }
            | ScoreboardError::ScoreAboveMaximum { .. }
            | ScoreboardError::IncreaseAboveMaximum { .. } => ErrorKind::InvalidArgument,
            ScoreboardError::TeamAlreadyPlaying(_) => ErrorKind::ConflictingState,
            ScoreboardError::MatchNotFound(_) => ErrorKind::NotFound,
        }
    }
}

/// Result type for scoreboard operations
pub type ScoreboardResult<T> = Result<T, ScoreboardError>;
