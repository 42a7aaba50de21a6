//! Bracket generation: one builder per format, all pure functions.

use crate::models::{
    Bracket, BracketMatch, DoubleBracket, Format, Round, Tournament, TournamentError, BYE,
};

/// Build an initial bracket for `format` from `teams`, in entry order.
/// Requires at least 2 teams. The result shares nothing with the input or
/// with any previously built bracket.
pub fn build(format: Format, teams: &[String]) -> Result<Bracket, TournamentError> {
    if teams.len() < 2 {
        return Err(TournamentError::InsufficientTeams);
    }
    Ok(match format {
        Format::Single => Bracket::Single {
            rounds: single_elimination(teams),
        },
        Format::Double => Bracket::Double(double_elimination(teams)),
        Format::RoundRobin => Bracket::RoundRobin {
            rounds: round_robin(teams),
        },
    })
}

/// Build a bracket for the session's current format and team list, replacing
/// any existing bracket and clearing the champion.
pub fn generate_bracket(tournament: &mut Tournament) -> Result<(), TournamentError> {
    let bracket = build(tournament.format, &tournament.teams)?;
    tournament.bracket = Some(bracket);
    tournament.champion = None;
    Ok(())
}

/// Pad the field to the next power of two with BYE slots.
fn pad_to_power_of_two(teams: &[String]) -> Vec<String> {
    let mut padded = teams.to_vec();
    padded.resize(teams.len().next_power_of_two(), BYE.to_string());
    padded
}

/// Round 0 pairs consecutive entries of the padded field; every later round
/// halves the match count, all slots empty, down to a single final.
fn single_elimination(teams: &[String]) -> Vec<Round> {
    let padded = pad_to_power_of_two(teams);
    let first: Round = padded
        .chunks_exact(2)
        .map(|pair| BracketMatch::new(Some(pair[0].clone()), Some(pair[1].clone())))
        .collect();

    let mut size = first.len();
    let mut rounds = vec![first];
    while size > 1 {
        size /= 2;
        rounds.push(vec![BracketMatch::default(); size]);
    }
    rounds
}

fn double_elimination(teams: &[String]) -> DoubleBracket {
    DoubleBracket {
        winners: single_elimination(teams),
        losers: losers_schedule(teams.len().next_power_of_two()),
        finals: [BracketMatch::default(), BracketMatch::default()],
    }
}

/// Losers-bracket schedule for a field of `padded` (a power of two) entrants.
///
/// Rounds come in minor/major pairs of equal size: minor round 2i pairs up
/// losers-bracket survivors, major round 2i+1 pits them against the losers
/// dropping from winners round i+1. Sizes run n/4, n/4, n/8, n/8, .., 1, 1.
/// A two-entrant field has no losers rounds at all; its lone loser goes
/// straight to the grand finals.
fn losers_schedule(padded: usize) -> Vec<Round> {
    let mut rounds = Vec::new();
    let mut size = padded / 4;
    while size >= 1 {
        rounds.push(vec![BracketMatch::default(); size]);
        rounds.push(vec![BracketMatch::default(); size]);
        size /= 2;
    }
    rounds
}

/// Circle method: fix position 0, pair position i with position n-1-i, rotate
/// positions 1..n left by one between days. An odd field gains one BYE and
/// pairings against it are dropped.
fn round_robin(teams: &[String]) -> Vec<Round> {
    let mut order = teams.to_vec();
    if order.len() % 2 != 0 {
        order.push(BYE.to_string());
    }
    let n = order.len();

    let mut rounds = Vec::with_capacity(n - 1);
    for _ in 0..n - 1 {
        let day: Round = (0..n / 2)
            .filter_map(|i| {
                let (a, b) = (&order[i], &order[n - 1 - i]);
                (a != BYE && b != BYE)
                    .then(|| BracketMatch::new(Some(a.clone()), Some(b.clone())))
            })
            .collect();
        rounds.push(day);
        order[1..].rotate_left(1);
    }
    rounds
}
