//! Random live feed for demoing the scoreboard without a real data source.
//!
//! Every tick either kicks off a match between two idle teams, scores a goal
//! in a live match, or blows the final whistle on one. All changes go through
//! the public [`Scoreboard`] operations, so the usual rules apply.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::events::{classify_change, ScoreChange};
use crate::scoreboard::{Match, MatchValidator, Score, Scoreboard, ScoreboardError};

pub const DEFAULT_TEAMS: &[&str] = &[
    "Mexico",
    "Canada",
    "Spain",
    "Brazil",
    "Germany",
    "France",
    "Uruguay",
    "Italy",
    "Argentina",
    "Australia",
    "Bosnia and Herzegovina",
    "Norway",
];

/// Chance per tick of starting a match while idle teams remain.
const START_PROBABILITY: f64 = 0.25;
/// Chance per tick of finishing a live match.
const FINISH_PROBABILITY: f64 = 0.08;

/// What one simulation tick did.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    Started(Match),
    Goal { updated: Match, change: ScoreChange },
    Finished(Match),
    Rejected(ScoreboardError),
    Idle,
}

pub struct FeedSimulator {
    rng: StdRng,
    teams: Vec<String>,
}

impl FeedSimulator {
    /// Seeded simulators replay the same sequence of events.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        FeedSimulator {
            rng,
            teams: DEFAULT_TEAMS.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn with_teams(mut self, teams: Vec<String>) -> Self {
        self.teams = teams;
        self
    }

    /// Run one tick against `board`.
    pub fn step<V: MatchValidator>(&mut self, board: &mut Scoreboard<V>) -> SimEvent {
        let idle: Vec<&String> = self
            .teams
            .iter()
            .filter(|t| !board.matches_in_progress().iter().any(|m| m.involves(t)))
            .collect();

        if (board.is_empty() || self.rng.gen_bool(START_PROBABILITY)) && idle.len() >= 2 {
            let pair: Vec<String> = idle
                .choose_multiple(&mut self.rng, 2)
                .map(|t| t.to_string())
                .collect();
            return match board.start_match(pair[0].as_str(), pair[1].as_str()) {
                Ok(m) => SimEvent::Started(m),
                Err(e) => SimEvent::Rejected(e),
            };
        }

        let Some(target) = board.matches_in_progress().choose(&mut self.rng).cloned() else {
            return SimEvent::Idle;
        };

        if self.rng.gen_bool(FINISH_PROBABILITY) {
            board.finish_match(&target);
            return SimEvent::Finished(target);
        }

        let current = target.score();
        let next = if self.rng.gen_bool(0.5) {
            Score::new(current.home() + 1, current.away())
        } else {
            Score::new(current.home(), current.away() + 1)
        };
        let result = next.and_then(|score| board.update_match_score(&target, score));
        match result {
            Ok(updated) => match classify_change(&target, &updated) {
                Some(change) => SimEvent::Goal { updated, change },
                None => SimEvent::Idle,
            },
            Err(e) => SimEvent::Rejected(e),
        }
    }
}

/// Log a simulation event the way the console reports it.
pub fn log_event(event: &SimEvent) {
    match event {
        SimEvent::Started(m) => info!("Kick-off: {}", m),
        SimEvent::Goal { updated, change } => info!("{}: {}", change.kind, updated),
        SimEvent::Finished(m) => info!("Full time: {}", m),
        SimEvent::Rejected(e) => warn!("Feed update rejected: {}", e),
        SimEvent::Idle => debug!("Feed idle"),
    }
}
