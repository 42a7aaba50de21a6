//! Round-robin points table and tournament completion queries.

use crate::models::{Bracket, DoubleBracket, Round};
use serde::Serialize;

/// One row of the round-robin points table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct StandingsRow {
    pub team: String,
    pub played: u32,
    pub wins: u32,
    pub points: u32,
}

/// Tally played/wins/points for every decided match. Rows come back in team
/// entry order; one point per win, no draws.
pub fn compute_standings(teams: &[String], rounds: &[Round]) -> Vec<StandingsRow> {
    let mut rows: Vec<StandingsRow> = teams
        .iter()
        .map(|t| StandingsRow {
            team: t.clone(),
            played: 0,
            wins: 0,
            points: 0,
        })
        .collect();

    for round in rounds {
        for m in round {
            let Some(winner) = m.winner.as_deref() else {
                continue;
            };
            for entrant in [m.team1.as_deref(), m.team2.as_deref()].into_iter().flatten() {
                if let Some(row) = rows.iter_mut().find(|r| r.team == entrant) {
                    row.played += 1;
                }
            }
            if let Some(row) = rows.iter_mut().find(|r| r.team == winner) {
                row.wins += 1;
                row.points += 1;
            }
        }
    }
    rows
}

/// True when every match in every round has a winner.
pub fn all_decided(rounds: &[Round]) -> bool {
    rounds.iter().all(|r| r.iter().all(|m| m.winner.is_some()))
}

/// True when the tournament has run to termination: the final is decided
/// (single), the grand finals have produced a champion (double), or every
/// match is decided (round robin).
pub fn is_complete(bracket: &Bracket) -> bool {
    match bracket {
        Bracket::Single { rounds } => final_winner(rounds).is_some(),
        Bracket::Double(double) => double_champion(double).is_some(),
        Bracket::RoundRobin { rounds } => all_decided(rounds),
    }
}

/// Tournament winner, or None while undecided.
///
/// Round robin: once every match is decided, the team with the most points;
/// ties go to the team entered first.
pub fn champion(teams: &[String], bracket: &Bracket) -> Option<String> {
    match bracket {
        Bracket::Single { rounds } => final_winner(rounds).map(str::to_owned),
        Bracket::Double(double) => double_champion(double).map(str::to_owned),
        Bracket::RoundRobin { rounds } => {
            if !all_decided(rounds) {
                return None;
            }
            compute_standings(teams, rounds)
                .into_iter()
                .reduce(|best, row| if row.points > best.points { row } else { best })
                .map(|row| row.team)
        }
    }
}

fn final_winner(rounds: &[Round]) -> Option<&str> {
    rounds.last()?.first()?.winner.as_deref()
}

/// Grand finals outcome. The winners-bracket champion holds slot 1 of match 0:
/// if they won it, the tournament is over; otherwise the bracket was reset and
/// match 1 decides.
fn double_champion(double: &DoubleBracket) -> Option<&str> {
    let first = &double.finals[0];
    let winner = first.winner.as_deref()?;
    if first.team1.as_deref() == Some(winner) {
        Some(winner)
    } else {
        double.finals[1].winner.as_deref()
    }
}
