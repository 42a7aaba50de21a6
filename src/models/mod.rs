//! Data structures for the bracket scheduler: matches, brackets, sessions.

mod bracket;
mod tournament;

pub use bracket::{
    Bracket, BracketMatch, DoubleBracket, Format, MatchLocation, Round, Section, BYE,
};
pub use tournament::{Tournament, TournamentError, TournamentId};
