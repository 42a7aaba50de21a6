//! Bracket structures: matches, rounds, and the format-specific bracket shapes.

use serde::{Deserialize, Serialize};

/// Sentinel filling empty slots when the field is padded to a power of two
/// (or to an even count for round robin). A BYE can never win a match.
pub const BYE: &str = "BYE";

/// Tournament format, chosen before generating a bracket.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Format {
    #[default]
    Single,
    Double,
    RoundRobin,
}

/// One match: two slots and an optional winner.
///
/// Slots are `None` until a team advances into them. Once `winner` is set the
/// match is decided and immutable; `winner` always equals one of the slots.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketMatch {
    pub team1: Option<String>,
    pub team2: Option<String>,
    pub winner: Option<String>,
}

impl BracketMatch {
    pub fn new(team1: Option<String>, team2: Option<String>) -> Self {
        Self {
            team1,
            team2,
            winner: None,
        }
    }

    /// True if `team` occupies one of the two slots.
    pub fn contains(&self, team: &str) -> bool {
        self.team1.as_deref() == Some(team) || self.team2.as_deref() == Some(team)
    }

    /// The slot opposite `team`, if `team` is in the match and the other slot
    /// is filled.
    pub fn opponent_of(&self, team: &str) -> Option<&str> {
        if self.team1.as_deref() == Some(team) {
            self.team2.as_deref()
        } else if self.team2.as_deref() == Some(team) {
            self.team1.as_deref()
        } else {
            None
        }
    }

    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }
}

/// One level of an elimination bracket, or one scheduling day of round robin.
/// Position within a round is meaningful: advancement targets are computed
/// from match indexes.
pub type Round = Vec<BracketMatch>;

/// Which part of the bracket a match lives in. `Main` is the only section for
/// single elimination and round robin; double elimination uses the other three.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    #[default]
    Main,
    Winners,
    Losers,
    Finals,
}

/// Identifies one match inside a bracket.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchLocation {
    #[serde(default)]
    pub section: Section,
    pub round: usize,
    pub match_index: usize,
}

impl MatchLocation {
    pub fn new(section: Section, round: usize, match_index: usize) -> Self {
        Self {
            section,
            round,
            match_index,
        }
    }
}

/// The three sections of a double-elimination bracket.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DoubleBracket {
    /// Shaped like a single-elimination bracket, down to one match.
    pub winners: Vec<Round>,
    /// Minor/major round pairs; empty for a two-entrant field.
    pub losers: Vec<Round>,
    /// Grand finals. Match 1 is only populated after a bracket reset.
    pub finals: [BracketMatch; 2],
}

/// Bracket state for one generated tournament, tagged by format.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Bracket {
    Single { rounds: Vec<Round> },
    Double(DoubleBracket),
    RoundRobin { rounds: Vec<Round> },
}

impl Bracket {
    /// The format this bracket was built for.
    pub fn format(&self) -> Format {
        match self {
            Bracket::Single { .. } => Format::Single,
            Bracket::Double(_) => Format::Double,
            Bracket::RoundRobin { .. } => Format::RoundRobin,
        }
    }
}
