//! Live match bookkeeping.
//!
//! [`Scoreboard`] owns the live matches and is the only thing that mutates
//! them. Every mutation is checked by a [`MatchValidator`] first, so an
//! operation either fully applies or leaves the board untouched.

pub mod errors;
pub mod models;
pub mod validator;

pub use errors::{ErrorKind, ScoreboardError, ScoreboardResult, Side};
pub use models::{Match, MatchId, Score};
pub use validator::{FootballMatchValidator, MatchValidator, ScoreLimits};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

/// Live matches in start order, plus the rules that guard them.
#[derive(Debug)]
pub struct Scoreboard<V: MatchValidator = FootballMatchValidator> {
    validator: V,
    matches: Vec<Match>,
    next_id: u64,
    last_started_at: Option<DateTime<Utc>>,
}

impl Scoreboard {
    /// Board with football rules and default limits.
    pub fn new() -> Self {
        Scoreboard::with_validator(FootballMatchValidator::default())
    }

    /// Board with football rules and custom limits.
    pub fn with_limits(limits: ScoreLimits) -> Self {
        Scoreboard::with_validator(FootballMatchValidator::new(limits))
    }
}

impl Default for Scoreboard {
    fn default() -> Self {
        Scoreboard::new()
    }
}

impl<V: MatchValidator> Scoreboard<V> {
    pub fn with_validator(validator: V) -> Self {
        Scoreboard {
            validator,
            matches: Vec::new(),
            next_id: 1,
            last_started_at: None,
        }
    }

    pub fn validator(&self) -> &V {
        &self.validator
    }

    /// Start a 0-0 match between `home` and `away`.
    ///
    /// Accepts plain `&str` as well as `Option<&str>`; a `None` name fails
    /// with [`ErrorKind::NullInput`].
    pub fn start_match<'a>(
        &mut self,
        home: impl Into<Option<&'a str>>,
        away: impl Into<Option<&'a str>>,
    ) -> ScoreboardResult<Match> {
        let (home, away) = (home.into(), away.into());
        if let Err(e) = self.validator.validate_new_match(home, away, &self.matches) {
            warn!("Rejected new match {:?} vs {:?}: {}", home, away, e);
            return Err(e);
        }
        let (Some(home), Some(away)) = (home, away) else {
            // A validator that lets absent names through still cannot start a match.
            let side = if home.is_none() { Side::Home } else { Side::Away };
            return Err(ScoreboardError::MissingTeam(side));
        };

        let id = MatchId::new(self.next_id);
        self.next_id += 1;
        let started_at = self.next_start_time();

        let started = Match::new(id, home, away, Score::nil(), started_at);
        info!("Match {} started: {} vs {}", id, home, away);
        self.matches.push(started.clone());
        Ok(started)
    }

    /// Replace the score of the live match `handle` refers to.
    ///
    /// Setting the score it already has is a no-op that skips validation and
    /// returns the stored snapshot.
    pub fn update_match_score(&mut self, handle: &Match, new_score: Score) -> ScoreboardResult<Match> {
        let idx = self
            .position(handle.id())
            .ok_or(ScoreboardError::MatchNotFound(handle.id()))?;
        let current = &self.matches[idx];

        if current.score() == new_score {
            debug!("Match {} already at {}, nothing to update", current.id(), new_score);
            return Ok(current.clone());
        }

        if let Err(e) = self.validator.validate_score_update(current, new_score) {
            warn!("Rejected score update for match {}: {}", current.id(), e);
            return Err(e);
        }

        let updated = current.with_score(new_score);
        info!(
            "Match {} score {} -> {}: {}",
            updated.id(),
            current.score(),
            new_score,
            updated
        );
        self.matches[idx] = updated.clone();
        Ok(updated)
    }

    /// Remove the match `handle` refers to. Unknown or already finished
    /// matches are ignored. Returns whether a match was removed.
    pub fn finish_match(&mut self, handle: &Match) -> bool {
        match self.position(handle.id()) {
            Some(idx) => {
                let finished = self.matches.remove(idx);
                info!("Match {} finished: {}", finished.id(), finished);
                true
            }
            None => {
                debug!("Match {} is not live, nothing to finish", handle.id());
                false
            }
        }
    }

    /// Live matches ranked by total goals, highest first. Equal totals put the
    /// most recently started match first.
    pub fn summary(&self) -> Vec<Match> {
        let mut ranked = self.matches.clone();
        // stable: insertion order breaks any remaining tie
        ranked.sort_by(|a, b| {
            b.score()
                .total()
                .cmp(&a.score().total())
                .then_with(|| b.started_at().cmp(&a.started_at()))
        });
        ranked
    }

    /// Live matches in the order they were started.
    pub fn matches_in_progress(&self) -> &[Match] {
        &self.matches
    }

    /// Current snapshot of the live match with this id.
    pub fn get(&self, id: MatchId) -> Option<&Match> {
        self.matches.iter().find(|m| m.id() == id)
    }

    /// Live match with exactly these home and away teams.
    pub fn find_by_teams(&self, home: &str, away: &str) -> Option<&Match> {
        self.matches
            .iter()
            .find(|m| m.home_team() == home && m.away_team() == away)
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    fn position(&self, id: MatchId) -> Option<usize> {
        self.matches.iter().position(|m| m.id() == id)
    }

    /// Wall-clock now, bumped past the previous start if the clock has not
    /// moved, so start times are strictly increasing.
    fn next_start_time(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let started_at = match self.last_started_at {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_started_at = Some(started_at);
        started_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn score(h: i32, a: i32) -> Score {
        Score::new(h, a).unwrap()
    }

    #[test]
    fn test_start_match_adds_match() {
        let mut board = Scoreboard::new();
        let m = board.start_match("Bosnia and Herzegovina", "Norway").unwrap();

        let live = board.matches_in_progress();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0], m);
        assert_eq!(live[0].home_team(), "Bosnia and Herzegovina");
        assert_eq!(live[0].away_team(), "Norway");
        assert_eq!(live[0].score(), Score::nil());
    }

    #[test]
    fn test_start_match_rejections_leave_board_untouched() {
        let mut board = Scoreboard::new();
        board.start_match("Spain", "Brazil").unwrap();

        let err = board.start_match(None, "Italy").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NullInput);
        let err = board.start_match("Italy", " ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let err = board.start_match("Italy", "Italy").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let err = board.start_match("Brazil", "Italy").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConflictingState);

        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut board = Scoreboard::new();
        let a = board.start_match("A", "B").unwrap();
        board.finish_match(&a);
        let b = board.start_match("A", "B").unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_start_times_strictly_increase() {
        let mut board = Scoreboard::new();
        let mut previous: Option<DateTime<Utc>> = None;
        for i in 0..20 {
            let home = format!("Home {}", i);
            let away = format!("Away {}", i);
            let m = board.start_match(home.as_str(), away.as_str()).unwrap();
            if let Some(p) = previous {
                assert!(m.started_at() > p);
            }
            previous = Some(m.started_at());
        }
    }

    #[test]
    fn test_update_match_score() {
        let mut board = Scoreboard::new();
        let m = board.start_match("Bosnia and Herzegovina", "Norway").unwrap();

        let updated = board.update_match_score(&m, score(1, 0)).unwrap();
        assert_eq!(updated.id(), m.id());
        assert_eq!(updated.started_at(), m.started_at());
        assert_eq!(board.matches_in_progress()[0].score(), score(1, 0));
    }

    #[test]
    fn test_update_with_stale_handle_uses_live_score() {
        let mut board = Scoreboard::new();
        let m = board.start_match("Spain", "Brazil").unwrap();
        board.update_match_score(&m, score(2, 0)).unwrap();

        // the old handle still addresses the same match; rules use the live score
        let err = board.update_match_score(&m, score(1, 0)).unwrap_err();
        assert!(matches!(err, ScoreboardError::ScoreDecreased { .. }));
        let updated = board.update_match_score(&m, score(3, 0)).unwrap();
        assert_eq!(updated.score(), score(3, 0));
    }

    #[test]
    fn test_update_keeps_position() {
        let mut board = Scoreboard::new();
        let a = board.start_match("A", "B").unwrap();
        let c = board.start_match("C", "D").unwrap();
        let e = board.start_match("E", "F").unwrap();

        board.update_match_score(&c, score(4, 4)).unwrap();

        let ids: Vec<MatchId> = board.matches_in_progress().iter().map(|m| m.id()).collect();
        assert_eq!(ids, vec![a.id(), c.id(), e.id()]);
    }

    #[test]
    fn test_update_unknown_match_is_not_found() {
        let mut board = Scoreboard::new();
        let m = board.start_match("Spain", "Brazil").unwrap();
        board.finish_match(&m);

        let err = board.update_match_score(&m, score(1, 0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(board.is_empty());
    }

    #[test]
    fn test_rejected_update_leaves_board_untouched() {
        let mut board = Scoreboard::new();
        let m = board.start_match("Spain", "Brazil").unwrap();
        assert!(board.update_match_score(&m, score(6, 0)).is_err());
        assert_eq!(board.matches_in_progress()[0].score(), Score::nil());
    }

    #[test]
    fn test_finish_match() {
        let mut board = Scoreboard::new();
        let first = board.start_match("Bosnia and Herzegovina", "Norway").unwrap();
        let second = board.start_match("Spain", "Mexico").unwrap();

        assert!(board.finish_match(&first));
        assert_eq!(board.matches_in_progress(), &[second.clone()]);

        // finishing again is silent
        assert!(!board.finish_match(&first));
        assert_eq!(board.matches_in_progress(), &[second]);
    }

    #[test]
    fn test_finished_teams_can_play_again() {
        let mut board = Scoreboard::new();
        let m = board.start_match("Spain", "Brazil").unwrap();
        board.finish_match(&m);
        assert!(board.start_match("Brazil", "Spain").is_ok());
    }

    #[test]
    fn test_summary_order() {
        let mut board = Scoreboard::new();
        let a = board.start_match("A", "B").unwrap();
        let b = board.start_match("C", "D").unwrap();
        let c = board.start_match("E", "F").unwrap();
        board.update_match_score(&a, score(1, 0)).unwrap();
        board.update_match_score(&b, score(1, 0)).unwrap();
        board.update_match_score(&c, score(2, 3)).unwrap();

        let ids: Vec<MatchId> = board.summary().iter().map(|m| m.id()).collect();
        assert_eq!(ids, vec![c.id(), b.id(), a.id()]);
        // summary does not reorder the live list
        assert_eq!(board.matches_in_progress()[0].id(), a.id());
    }

    #[test]
    fn test_find_by_teams() {
        let mut board = Scoreboard::new();
        let m = board.start_match("Spain", "Brazil").unwrap();
        assert_eq!(board.find_by_teams("Spain", "Brazil"), Some(&m));
        assert_eq!(board.find_by_teams("Brazil", "Spain"), None);
        assert_eq!(board.get(m.id()), Some(&m));
    }

    /// Records calls and accepts everything.
    #[derive(Default)]
    struct SpyValidator {
        calls: RefCell<Vec<String>>,
    }

    impl MatchValidator for SpyValidator {
        fn validate_new_match(
            &self,
            home: Option<&str>,
            away: Option<&str>,
            live: &[Match],
        ) -> ScoreboardResult<()> {
            self.calls
                .borrow_mut()
                .push(format!("new {:?} {:?} {}", home, away, live.len()));
            Ok(())
        }

        fn validate_score_update(&self, current: &Match, new_score: Score) -> ScoreboardResult<()> {
            self.calls
                .borrow_mut()
                .push(format!("update {} {}", current.score(), new_score));
            Ok(())
        }
    }

    #[test]
    fn test_injected_validator() {
        let mut board = Scoreboard::with_validator(SpyValidator::default());
        let m = board.start_match("Spain", "Brazil").unwrap();
        // the permissive validator allows what football rules would not
        board.start_match("Spain", "Brazil").unwrap();
        board.update_match_score(&m, score(20, 0)).unwrap();
        board.update_match_score(&m, score(20, 0)).unwrap();

        let calls = board.validator().calls.borrow();
        assert_eq!(
            *calls,
            vec![
                "new Some(\"Spain\") Some(\"Brazil\") 0".to_string(),
                "new Some(\"Spain\") Some(\"Brazil\") 1".to_string(),
                "update 0-0 20-0".to_string(),
            ]
        );
    }

    #[test]
    fn test_summary_ranks_largest_scores() {
        let mut board = Scoreboard::with_validator(SpyValidator::default());
        let small = board.start_match("A", "B").unwrap();
        let huge = board.start_match("C", "D").unwrap();
        board
            .update_match_score(&huge, score(i32::MAX, 1))
            .unwrap();
        board.update_match_score(&small, score(1, 0)).unwrap();

        let ids: Vec<MatchId> = board.summary().iter().map(|m| m.id()).collect();
        assert_eq!(ids, vec![huge.id(), small.id()]);
    }

    #[test]
    fn test_permissive_validator_cannot_start_without_names() {
        let mut board = Scoreboard::with_validator(SpyValidator::default());
        let err = board.start_match("Spain", None).unwrap_err();
        assert_eq!(err, ScoreboardError::MissingTeam(Side::Away));
        assert!(board.is_empty());
    }
}
