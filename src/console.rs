//! Line-oriented console for driving a [`Scoreboard`] by hand.
//!
//! Commands:
//!
//! ```text
//! start Mexico vs Canada
//! score Mexico vs Canada 0-5
//! finish Mexico vs Canada
//! summary
//! live
//! help
//! quit
//! ```

use thiserror::Error;
use tracing::{debug, info};

use crate::events::classify_change;
use crate::scoreboard::{Match, MatchValidator, Score, Scoreboard, ScoreboardError};

pub const HELP: &str = "\
Commands:
  start <home> vs <away>          start a 0-0 match
  score <home> vs <away> <h>-<a>  set the score of a live match
  finish <home> vs <away>         finish a live match
  summary                         live matches ranked by total goals
  live                            live matches in start order
  help                            show this help
  quit                            exit";

/// Console errors
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Unknown command: {0} (try `help`)")]
    UnknownCommand(String),

    #[error("Missing {0}")]
    MissingArgument(&'static str),

    #[error("Invalid score `{0}`, expected <home>-<away>")]
    InvalidScore(String),

    #[error("No live match {home} vs {away}")]
    NoLiveMatch { home: String, away: String },

    #[error(transparent)]
    Scoreboard(#[from] ScoreboardError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A parsed console command. Team names are `None` when omitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start {
        home: Option<String>,
        away: Option<String>,
    },
    Score {
        home: String,
        away: String,
        home_score: i32,
        away_score: i32,
    },
    Finish {
        home: String,
        away: String,
    },
    Summary,
    Live,
    Help,
    Quit,
}

/// Result of running a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Output(String),
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let cmd = match verb.to_lowercase().as_str() {
        "start" => {
            let (home, away) = split_teams(rest);
            Command::Start { home, away }
        }
        "score" => {
            let (teams, raw_score) = rest
                .rsplit_once(char::is_whitespace)
                .ok_or(CommandError::MissingArgument("score"))?;
            let (home_score, away_score) = parse_score(raw_score)?;
            let (home, away) = require_teams(teams)?;
            Command::Score {
                home,
                away,
                home_score,
                away_score,
            }
        }
        "finish" => {
            let (home, away) = require_teams(rest)?;
            Command::Finish { home, away }
        }
        "summary" => Command::Summary,
        "live" => Command::Live,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::UnknownCommand(other.to_string())),
    };
    Ok(Some(cmd))
}

/// `Home Team vs Away Team` into its two names, trimmed. Without a `vs`
/// separator the away team is absent, and so is the home team when there is
/// no text at all. Blank names around a separator stay `Some("")` so the
/// validator can reject them.
fn split_teams(text: &str) -> (Option<String>, Option<String>) {
    let text = text.trim();
    if text.is_empty() {
        return (None, None);
    }
    let padded = format!(" {} ", text);
    match padded.split_once(" vs ") {
        Some((home, away)) => (
            Some(home.trim().to_string()),
            Some(away.trim().to_string()),
        ),
        None => (Some(text.to_string()), None),
    }
}

fn require_teams(text: &str) -> Result<(String, String), CommandError> {
    let (home, away) = split_teams(text);
    let home = home
        .filter(|h| !h.is_empty())
        .ok_or(CommandError::MissingArgument("home team"))?;
    let away = away
        .filter(|a| !a.is_empty())
        .ok_or(CommandError::MissingArgument("away team"))?;
    Ok((home, away))
}

/// `3-1` into `(3, 1)`. A leading minus is kept so negative input reaches
/// score validation instead of failing here.
fn parse_score(raw: &str) -> Result<(i32, i32), CommandError> {
    let invalid = || CommandError::InvalidScore(raw.to_string());
    let sep = raw
        .char_indices()
        .skip(1)
        .find(|&(_, c)| c == '-')
        .map(|(i, _)| i)
        .ok_or_else(invalid)?;
    let home = raw[..sep].parse().map_err(|_| invalid())?;
    let away = raw[sep + 1..].parse().map_err(|_| invalid())?;
    Ok((home, away))
}

/// Numbered summary, one match per line.
pub fn render_summary(matches: &[Match]) -> String {
    if matches.is_empty() {
        return "No matches in progress".to_string();
    }
    matches
        .iter()
        .enumerate()
        .map(|(i, m)| format!("{}. {}", i + 1, m))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Owns a scoreboard and applies console commands to it.
pub struct Console<V: MatchValidator> {
    board: Scoreboard<V>,
    json: bool,
}

impl<V: MatchValidator> Console<V> {
    pub fn new(board: Scoreboard<V>, json: bool) -> Self {
        Console { board, json }
    }

    pub fn board(&self) -> &Scoreboard<V> {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Scoreboard<V> {
        &mut self.board
    }

    /// Parse and run one input line.
    pub fn handle_line(&mut self, line: &str) -> Result<Option<Outcome>, CommandError> {
        match parse_command(line)? {
            Some(cmd) => self.execute(cmd).map(Some),
            None => Ok(None),
        }
    }

    pub fn execute(&mut self, cmd: Command) -> Result<Outcome, CommandError> {
        debug!("Executing {:?}", cmd);
        let out = match cmd {
            Command::Start { home, away } => {
                let m = self.board.start_match(home.as_deref(), away.as_deref())?;
                format!("Started {}", m)
            }
            Command::Score {
                home,
                away,
                home_score,
                away_score,
            } => {
                let current = self.live_match(&home, &away)?;
                let score = Score::new(home_score, away_score)?;
                let updated = self.board.update_match_score(&current, score)?;
                match classify_change(&current, &updated) {
                    Some(change) => {
                        info!("{} in {}", change.kind, updated);
                        format!("Updated {}", updated)
                    }
                    None => format!("Unchanged {}", updated),
                }
            }
            Command::Finish { home, away } => match self.board.find_by_teams(&home, &away) {
                Some(m) => {
                    let m = m.clone();
                    self.board.finish_match(&m);
                    format!("Finished {}", m)
                }
                None => format!("No live match {} vs {}, nothing to finish", home, away),
            },
            Command::Summary => self.render(&self.board.summary())?,
            Command::Live => self.render(self.board.matches_in_progress())?,
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Outcome::Quit),
        };
        Ok(Outcome::Output(out))
    }

    fn live_match(&self, home: &str, away: &str) -> Result<Match, CommandError> {
        self.board
            .find_by_teams(home, away)
            .cloned()
            .ok_or_else(|| CommandError::NoLiveMatch {
                home: home.to_string(),
                away: away.to_string(),
            })
    }

    fn render(&self, matches: &[Match]) -> Result<String, CommandError> {
        if self.json {
            Ok(serde_json::to_string_pretty(matches)?)
        } else {
            Ok(render_summary(matches))
        }
    }
}
