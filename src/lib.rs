//! Scoreboard for concurrently live sports matches.
//!
//! The core is [`scoreboard::Scoreboard`]: start a match, update its score,
//! finish it and list the live matches ranked by total goals. Rules live in a
//! pluggable [`scoreboard::MatchValidator`]. The [`console`] and
//! [`simulation`] modules are callers of that core used by the binary.
//!
//! ```
//! use live_scoreboard::scoreboard::{Score, Scoreboard};
//!
//! let mut board = Scoreboard::new();
//! let m = board.start_match("Mexico", "Canada").unwrap();
//! board.update_match_score(&m, Score::new(0, 5).unwrap()).unwrap();
//! assert_eq!(board.summary()[0].to_string(), "Mexico 0 - Canada 5");
//! ```

pub mod config;
pub mod console;
pub mod events;
pub mod scoreboard;
pub mod simulation;

pub use scoreboard::{ErrorKind, Match, MatchId, Score, Scoreboard, ScoreboardError};
