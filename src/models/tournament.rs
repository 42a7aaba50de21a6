//! Tournament session: team list, chosen format, and the current bracket.

use crate::models::bracket::{Bracket, Format, BYE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Fewer than 2 teams when generating a bracket.
    InsufficientTeams,
    /// A team with this name already exists (names are unique, case-insensitive).
    DuplicateTeamName,
    /// Empty team name, or the reserved BYE sentinel.
    InvalidTeamName,
    /// Team name not found in the entry list.
    TeamNotFound,
    /// No bracket has been generated yet.
    NoBracket,
    /// Section/round/match indexes do not point at a match in this bracket.
    InvalidMatchLocation,
    /// Declared winner is not one of the match's entrants, or is the BYE slot.
    InvalidWinner,
    /// The match already has a winner.
    MatchAlreadyDecided,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InsufficientTeams => write!(f, "Need at least 2 teams to generate a bracket"),
            TournamentError::DuplicateTeamName => write!(f, "A team with this name already exists"),
            TournamentError::InvalidTeamName => write!(f, "Team name is empty or reserved"),
            TournamentError::TeamNotFound => write!(f, "Team not found"),
            TournamentError::NoBracket => write!(f, "No bracket has been generated"),
            TournamentError::InvalidMatchLocation => write!(f, "No such match in the bracket"),
            TournamentError::InvalidWinner => write!(f, "Winner is not one of the match's teams"),
            TournamentError::MatchAlreadyDecided => write!(f, "Match already has a winner"),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament session.
pub type TournamentId = Uuid;

/// Full session state owned by the caller: entry-ordered teams, format, and
/// whatever bracket is currently generated. The bracket logic itself holds no
/// state between calls.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    /// Team names in entry order. Order is meaningful: it drives first-round
    /// pairing and the round-robin tie-break.
    pub teams: Vec<String>,
    pub format: Format,
    /// Current bracket, if one has been generated.
    pub bracket: Option<Bracket>,
    /// Set once the terminal match is decided (elimination) or every match is
    /// decided (round robin).
    pub champion: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Create a new session with no teams and no bracket.
    pub fn new(format: Format) -> Self {
        Self {
            id: Uuid::new_v4(),
            teams: Vec::new(),
            format,
            bracket: None,
            champion: None,
            created_at: Utc::now(),
        }
    }

    /// Create a session with initial teams (e.g. from tests).
    pub fn with_teams(teams: Vec<String>, format: Format) -> Self {
        Self {
            teams,
            ..Self::new(format)
        }
    }

    /// Add a team. Names are trimmed and must be unique (case-insensitive);
    /// the BYE sentinel is reserved.
    pub fn add_team(&mut self, name: impl Into<String>) -> Result<(), TournamentError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(BYE) {
            return Err(TournamentError::InvalidTeamName);
        }
        let is_duplicate = self
            .teams
            .iter()
            .any(|t| t.eq_ignore_ascii_case(trimmed));
        if is_duplicate {
            return Err(TournamentError::DuplicateTeamName);
        }
        self.teams.push(trimmed.to_string());
        Ok(())
    }

    /// Remove a team by exact name.
    pub fn remove_team(&mut self, name: &str) -> Result<(), TournamentError> {
        let idx = self
            .teams
            .iter()
            .position(|t| t == name)
            .ok_or(TournamentError::TeamNotFound)?;
        self.teams.remove(idx);
        Ok(())
    }

    /// Switch format. Takes effect on the next generate; an existing bracket
    /// keeps its own shape until then.
    pub fn set_format(&mut self, format: Format) {
        self.format = format;
    }

    /// Drop the current bracket and champion, keeping the team list.
    pub fn reset(&mut self) {
        self.bracket = None;
        self.champion = None;
    }
}
