//! Integration tests for the session context: team entry, bracket generation,
//! and winner reporting through the Tournament wrapper.

use tournament_scheduler_web::{
    generate_bracket, report_winner, Bracket, Format, MatchLocation, Section, Tournament,
    TournamentError,
};

#[test]
fn team_names_are_trimmed_and_unique_case_insensitively() {
    let mut t = Tournament::new(Format::Single);
    t.add_team("  Alpha  ").unwrap();
    assert_eq!(t.teams, vec!["Alpha"]);

    assert_eq!(t.add_team("alpha"), Err(TournamentError::DuplicateTeamName));
    assert_eq!(t.add_team("   "), Err(TournamentError::InvalidTeamName));
    assert_eq!(t.add_team("bye"), Err(TournamentError::InvalidTeamName));

    t.add_team("Beta").unwrap();
    t.remove_team("Alpha").unwrap();
    assert_eq!(t.teams, vec!["Beta"]);
    assert_eq!(t.remove_team("Alpha"), Err(TournamentError::TeamNotFound));
}

#[test]
fn generate_requires_two_teams_and_leaves_state_untouched_on_failure() {
    let mut t = Tournament::new(Format::Single);
    t.add_team("Alpha").unwrap();
    assert_eq!(generate_bracket(&mut t), Err(TournamentError::InsufficientTeams));
    assert!(t.bracket.is_none());
}

#[test]
fn generate_discards_previous_bracket_and_champion() {
    let mut t = Tournament::with_teams(
        vec!["A".into(), "B".into()],
        Format::Single,
    );
    generate_bracket(&mut t).unwrap();
    report_winner(&mut t, MatchLocation::new(Section::Main, 0, 0), "A").unwrap();
    assert_eq!(t.champion.as_deref(), Some("A"));

    t.add_team("C").unwrap();
    generate_bracket(&mut t).unwrap();
    assert_eq!(t.champion, None);
    match t.bracket.as_ref().unwrap() {
        Bracket::Single { rounds } => {
            assert_eq!(rounds.len(), 2); // three teams pad to four
            assert!(rounds[0].iter().all(|m| m.winner.is_none()));
        }
        _ => panic!("expected single elimination bracket"),
    }
}

#[test]
fn report_winner_needs_a_bracket_and_keeps_it_on_error() {
    let mut t = Tournament::with_teams(vec!["A".into(), "B".into()], Format::Single);
    assert_eq!(
        report_winner(&mut t, MatchLocation::new(Section::Main, 0, 0), "A"),
        Err(TournamentError::NoBracket)
    );

    generate_bracket(&mut t).unwrap();
    let before = t.bracket.clone();
    assert_eq!(
        report_winner(&mut t, MatchLocation::new(Section::Main, 3, 0), "A"),
        Err(TournamentError::InvalidMatchLocation)
    );
    assert_eq!(t.bracket, before);
    assert_eq!(t.champion, None);
}

#[test]
fn format_switch_applies_on_next_generate() {
    let mut t = Tournament::with_teams(
        vec!["A".into(), "B".into(), "C".into(), "D".into()],
        Format::Single,
    );
    generate_bracket(&mut t).unwrap();
    t.set_format(Format::RoundRobin);
    assert_eq!(t.bracket.as_ref().unwrap().format(), Format::Single);

    generate_bracket(&mut t).unwrap();
    assert_eq!(t.bracket.as_ref().unwrap().format(), Format::RoundRobin);
}

#[test]
fn reset_keeps_teams_but_drops_bracket_and_champion() {
    let mut t = Tournament::with_teams(vec!["A".into(), "B".into()], Format::RoundRobin);
    generate_bracket(&mut t).unwrap();
    report_winner(&mut t, MatchLocation::new(Section::Main, 0, 0), "B").unwrap();
    assert_eq!(t.champion.as_deref(), Some("B"));

    t.reset();
    assert_eq!(t.teams, vec!["A", "B"]);
    assert!(t.bracket.is_none());
    assert!(t.champion.is_none());
}
