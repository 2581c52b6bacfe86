use serde::Serialize;
use std::fmt;

use crate::scoreboard::Match;

/// What kind of scoring happened between two snapshots of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    HomeGoal,
    AwayGoal,
    BothScored,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChangeKind::HomeGoal => "goal_home",
            ChangeKind::AwayGoal => "goal_away",
            ChangeKind::BothScored => "goal_both",
        };
        f.write_str(s)
    }
}

/// A detected score change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreChange {
    pub home_goals: i32,
    pub away_goals: i32,
    pub kind: ChangeKind,
}

/// Compare two snapshots of the same match.
/// Returns `None` when the scoreline is unchanged.
pub fn classify_change(prev: &Match, curr: &Match) -> Option<ScoreChange> {
    let home_goals = curr.home_score() - prev.home_score();
    let away_goals = curr.away_score() - prev.away_score();

    let kind = match (home_goals > 0, away_goals > 0) {
        (true, true) => ChangeKind::BothScored,
        (true, false) => ChangeKind::HomeGoal,
        (false, true) => ChangeKind::AwayGoal,
        (false, false) => return None,
    };
    Some(ScoreChange {
        home_goals,
        away_goals,
        kind,
    })
}
