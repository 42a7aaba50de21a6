//! Advancement engine: apply a declared winner and propagate it through the
//! bracket. Every function takes the bracket by reference and returns a new
//! value; a failed precondition leaves nothing half-applied.

use crate::logic::standings;
use crate::models::{
    Bracket, BracketMatch, DoubleBracket, MatchLocation, Round, Section, Tournament,
    TournamentError, BYE,
};

/// Set `winner` on the match at `location` and propagate.
///
/// Preconditions, checked before any write: the location points at a match in
/// the right section for this bracket, `winner` occupies one of the match's
/// filled slots and is not BYE, and the match is undecided. The returned
/// bracket differs from the input only in the target match and the slots the
/// winner (and, for double elimination, the loser) advances into.
pub fn declare_winner(
    bracket: &Bracket,
    location: MatchLocation,
    winner: &str,
) -> Result<Bracket, TournamentError> {
    match bracket {
        Bracket::Single { rounds } => {
            if location.section != Section::Main {
                return Err(TournamentError::InvalidMatchLocation);
            }
            let mut rounds = rounds.clone();
            decide(&mut rounds, location.round, location.match_index, winner)?;
            if location.round + 1 < rounds.len() {
                let target = &mut rounds[location.round + 1][location.match_index / 2];
                set_slot(target, location.match_index % 2 == 0, winner);
            }
            Ok(Bracket::Single { rounds })
        }
        Bracket::RoundRobin { rounds } => {
            if location.section != Section::Main {
                return Err(TournamentError::InvalidMatchLocation);
            }
            // No propagation: a day's result only feeds the points table.
            let mut rounds = rounds.clone();
            decide(&mut rounds, location.round, location.match_index, winner)?;
            Ok(Bracket::RoundRobin { rounds })
        }
        Bracket::Double(double) => declare_double_winner(double, location, winner),
    }
}

/// Declare a winner on the session's current bracket. The new bracket is
/// swapped in, and the champion refreshed, only when every precondition held.
pub fn report_winner(
    tournament: &mut Tournament,
    location: MatchLocation,
    winner: &str,
) -> Result<(), TournamentError> {
    let bracket = tournament
        .bracket
        .as_ref()
        .ok_or(TournamentError::NoBracket)?;
    let updated = declare_winner(bracket, location, winner)?;
    tournament.champion = standings::champion(&tournament.teams, &updated);
    tournament.bracket = Some(updated);
    Ok(())
}

fn declare_double_winner(
    double: &DoubleBracket,
    location: MatchLocation,
    winner: &str,
) -> Result<Bracket, TournamentError> {
    let mut double = double.clone();
    match location.section {
        Section::Winners => {
            decide(&mut double.winners, location.round, location.match_index, winner)?;
            let loser = double.winners[location.round][location.match_index]
                .opponent_of(winner)
                .map(str::to_owned);

            if location.round + 1 < double.winners.len() {
                let target =
                    &mut double.winners[location.round + 1][location.match_index / 2];
                set_slot(target, location.match_index % 2 == 0, winner);
            } else {
                // Winners-bracket champion takes grand finals slot 1.
                double.finals[0].team1 = Some(winner.to_string());
            }

            if let Some(loser) = loser.filter(|l| l != BYE) {
                drop_loser(&mut double, location.round, location.match_index, &loser);
            }
        }
        Section::Losers => {
            decide(&mut double.losers, location.round, location.match_index, winner)?;
            let dest = location.round + 1;
            if dest >= double.losers.len() {
                // Losers-bracket champion takes grand finals slot 2.
                double.finals[0].team2 = Some(winner.to_string());
            } else if dest % 2 == 1 {
                // Minor -> major: same index, survivors take slot 1; slot 2 is
                // reserved for the loser dropping from the winners bracket.
                double.losers[dest][location.match_index].team1 = Some(winner.to_string());
            } else {
                // Major -> next minor: indexes fold in half.
                let target = &mut double.losers[dest][location.match_index / 2];
                set_slot(target, location.match_index % 2 == 0, winner);
            }
        }
        Section::Finals => {
            if location.round != 0 || location.match_index >= double.finals.len() {
                return Err(TournamentError::InvalidMatchLocation);
            }
            decide_match(&mut double.finals[location.match_index], winner)?;
            if location.match_index == 0 && double.finals[0].winner == double.finals[0].team2 {
                // Bracket reset: the losers-bracket champion took the first
                // grand final, so both finalists replay once, decisively.
                double.finals[1].team1 = double.finals[0].team1.clone();
                double.finals[1].team2 = double.finals[0].team2.clone();
            }
        }
        Section::Main => return Err(TournamentError::InvalidMatchLocation),
    }
    Ok(Bracket::Double(double))
}

/// Route a winners-bracket loser into the losers bracket. Round 0 losers pair
/// up in losers round 0; a loser from winners round r (r >= 1) becomes slot 2
/// of the same-index match in losers round 2r-1. With no losers rounds at all
/// (two entrants) the loser goes straight to grand finals slot 2.
fn drop_loser(double: &mut DoubleBracket, round: usize, match_index: usize, loser: &str) {
    if double.losers.is_empty() {
        double.finals[0].team2 = Some(loser.to_string());
    } else if round == 0 {
        let target = &mut double.losers[0][match_index / 2];
        set_slot(target, match_index % 2 == 0, loser);
    } else {
        double.losers[2 * round - 1][match_index].team2 = Some(loser.to_string());
    }
}

/// Bounds-check `rounds[round][match_index]` and set its winner.
fn decide(
    rounds: &mut [Round],
    round: usize,
    match_index: usize,
    winner: &str,
) -> Result<(), TournamentError> {
    let target = rounds
        .get_mut(round)
        .and_then(|r| r.get_mut(match_index))
        .ok_or(TournamentError::InvalidMatchLocation)?;
    decide_match(target, winner)
}

fn decide_match(target: &mut BracketMatch, winner: &str) -> Result<(), TournamentError> {
    if target.is_decided() {
        return Err(TournamentError::MatchAlreadyDecided);
    }
    if winner == BYE || !target.contains(winner) {
        return Err(TournamentError::InvalidWinner);
    }
    target.winner = Some(winner.to_string());
    Ok(())
}

fn set_slot(target: &mut BracketMatch, first: bool, team: &str) {
    if first {
        target.team1 = Some(team.to_string());
    } else {
        target.team2 = Some(team.to_string());
    }
}
