//! Bracket logic: generation, winner propagation, and standings.

mod advance;
mod builder;
mod standings;

pub use advance::{declare_winner, report_winner};
pub use builder::{build, generate_bracket};
pub use standings::{all_decided, champion, compute_standings, is_complete, StandingsRow};
