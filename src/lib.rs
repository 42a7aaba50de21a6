//! Tournament bracket scheduler: library with models and bracket logic.

pub mod logic;
pub mod models;

pub use logic::{
    all_decided, build, champion, compute_standings, declare_winner, generate_bracket,
    is_complete, report_winner, StandingsRow,
};
pub use models::{
    Bracket, BracketMatch, DoubleBracket, Format, MatchLocation, Round, Section, Tournament,
    TournamentError, TournamentId, BYE,
};
