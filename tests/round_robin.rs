//! Integration tests for round robin: circle-method schedule, standings,
//! completion, and the entry-order tie-break.

use std::collections::HashSet;
use tournament_scheduler_web::{
    all_decided, build, champion, compute_standings, declare_winner, is_complete, Bracket,
    BracketMatch, Format, MatchLocation, Section,
};

fn teams(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn rr_rounds(bracket: &Bracket) -> &Vec<Vec<BracketMatch>> {
    match bracket {
        Bracket::RoundRobin { rounds } => rounds,
        _ => panic!("expected round robin bracket"),
    }
}

fn at(round: usize, match_index: usize) -> MatchLocation {
    MatchLocation::new(Section::Main, round, match_index)
}

/// Unordered pairings across the whole schedule.
fn pairings(rounds: &[Vec<BracketMatch>]) -> Vec<(String, String)> {
    rounds
        .iter()
        .flatten()
        .map(|m| {
            let mut pair = [m.team1.clone().unwrap(), m.team2.clone().unwrap()];
            pair.sort();
            (pair[0].clone(), pair[1].clone())
        })
        .collect()
}

#[test]
fn four_teams_meet_once_each_over_three_rounds() {
    let names = teams(&["A", "B", "C", "D"]);
    let bracket = build(Format::RoundRobin, &names).unwrap();
    let rounds = rr_rounds(&bracket);

    assert_eq!(rounds.len(), 3);
    assert!(rounds.iter().all(|r| r.len() == 2));

    let pairs = pairings(rounds);
    let unique: HashSet<_> = pairs.iter().cloned().collect();
    assert_eq!(pairs.len(), 6);
    assert_eq!(unique.len(), 6, "some pairing repeats");
}

#[test]
fn odd_field_pads_with_a_bye_and_sits_one_team_per_round() {
    let names = teams(&["A", "B", "C", "D", "E"]);
    let bracket = build(Format::RoundRobin, &names).unwrap();
    let rounds = rr_rounds(&bracket);

    // 5 teams pad to 6: five rounds, the BYE pairing dropped from each.
    assert_eq!(rounds.len(), 5);
    let total: usize = rounds.iter().map(|r| r.len()).sum();
    assert_eq!(total, 5 * 4 / 2);

    let pairs = pairings(rounds);
    let unique: HashSet<_> = pairs.iter().cloned().collect();
    assert_eq!(unique.len(), 10);
    for name in &names {
        let appearances = pairs
            .iter()
            .filter(|(a, b)| a == name || b == name)
            .count();
        assert_eq!(appearances, 4, "{name} must play every other team once");
    }
}

#[test]
fn results_do_not_propagate_anywhere() {
    let names = teams(&["A", "B", "C", "D"]);
    let bracket = build(Format::RoundRobin, &names).unwrap();
    let snapshot = bracket.clone();

    let first = rr_rounds(&bracket)[0][0].clone();
    let winner = first.team1.clone().unwrap();
    let updated = declare_winner(&bracket, at(0, 0), &winner).unwrap();

    assert_eq!(bracket, snapshot);
    let before = rr_rounds(&bracket);
    let after = rr_rounds(&updated);
    assert_eq!(after[0][0].winner.as_deref(), Some(winner.as_str()));
    assert_eq!(after[0][1], before[0][1]);
    assert_eq!(after[1], before[1]);
    assert_eq!(after[2], before[2]);
}

#[test]
fn standings_count_played_wins_and_points() {
    let names = teams(&["A", "B", "C", "D"]);
    let mut bracket = build(Format::RoundRobin, &names).unwrap();

    // Every match goes to team1. Schedule: (A-D, B-C), (A-B, C-D), (A-C, D-B).
    for r in 0..3 {
        for m in 0..2 {
            let winner = rr_rounds(&bracket)[r][m].team1.clone().unwrap();
            bracket = declare_winner(&bracket, at(r, m), &winner).unwrap();
        }
    }

    assert!(is_complete(&bracket));
    let rows = compute_standings(&names, rr_rounds(&bracket));
    for row in &rows {
        assert_eq!(row.played, 3, "{} played every round", row.team);
        assert_eq!(row.points, row.wins);
    }
    assert_eq!(rows[0].team, "A");
    assert_eq!(rows[0].points, 3); // A wins all three as team1
}

#[test]
fn champion_undefined_until_every_match_is_decided() {
    let names = teams(&["A", "B", "C", "D"]);
    let mut bracket = build(Format::RoundRobin, &names).unwrap();

    for r in 0..3 {
        for m in 0..2 {
            assert!(!is_complete(&bracket));
            assert_eq!(champion(&names, &bracket), None);
            let winner = rr_rounds(&bracket)[r][m].team1.clone().unwrap();
            bracket = declare_winner(&bracket, at(r, m), &winner).unwrap();
        }
    }

    assert!(all_decided(rr_rounds(&bracket)));
    assert_eq!(champion(&names, &bracket), Some("A".to_string()));
}

#[test]
fn tie_on_points_goes_to_the_team_entered_first() {
    let names = teams(&["A", "B", "C", "D"]);
    let mut bracket = build(Format::RoundRobin, &names).unwrap();

    // Schedule: (A-D, B-C), (A-B, C-D), (A-C, D-B).
    // A beats D, B beats C, B beats A, C beats D, A beats C, D beats B:
    // A and B finish on 2 points; A entered first.
    for (r, m, w) in [
        (0, 0, "A"),
        (0, 1, "B"),
        (1, 0, "B"),
        (1, 1, "C"),
        (2, 0, "A"),
        (2, 1, "D"),
    ] {
        bracket = declare_winner(&bracket, at(r, m), w).unwrap();
    }

    let rows = compute_standings(&names, rr_rounds(&bracket));
    assert_eq!(rows[0].points, 2); // A
    assert_eq!(rows[1].points, 2); // B
    assert_eq!(champion(&names, &bracket), Some("A".to_string()));
}

#[test]
fn two_team_round_robin_is_a_single_match() {
    let names = teams(&["A", "B"]);
    let bracket = build(Format::RoundRobin, &names).unwrap();
    let rounds = rr_rounds(&bracket);
    assert_eq!(rounds.len(), 1);
    assert_eq!(rounds[0].len(), 1);

    let bracket = declare_winner(&bracket, at(0, 0), "B").unwrap();
    assert_eq!(champion(&names, &bracket), Some("B".to_string()));
}
