use std::collections::HashMap;
use std::path::Path;

use quidditch::roster::Team;
use quidditch::sim::{MatchReport, Rng, TeamStats};
use quidditch::tournament::{
    bracket_order, play_group, run_house_cup, run_world_cup, PointRules, Standings,
    TournamentError, GROUP_SCHEDULE,
};

const NO_CSV: &str = "/nonexistent/world_population.csv";

fn report(home: &str, away: &str, score: [u32; 2], catcher: Option<&str>) -> MatchReport {
    MatchReport {
        teams: [home.to_string(), away.to_string()],
        score,
        snitch_catcher: catcher.map(String::from),
        minutes: 60,
        factors: Vec::new(),
        highlights: Vec::new(),
        stats: [TeamStats::default(), TeamStats::default()],
    }
}

#[test]
fn schedule_covers_all_pairings_once() {
    let mut seen: Vec<(usize, usize)> = GROUP_SCHEDULE
        .iter()
        .map(|&(a, b)| (a.min(b), a.max(b)))
        .collect();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 6);
}

#[test]
fn bracket_order_for_eight_slots() {
    assert_eq!(bracket_order(8), vec![0, 7, 3, 4, 1, 6, 2, 5]);
}

#[test]
fn fifa_standings_rank_by_points_then_diff() {
    let mut standings = Standings::new(["A", "B", "C", "D"]);
    standings.record(PointRules::Fifa, &report("A", "B", [200, 30], Some("A")));
    standings.record(PointRules::Fifa, &report("C", "D", [100, 90], Some("C")));
    standings.record(PointRules::Fifa, &report("A", "C", [60, 60], None));

    let ranked = standings.ranked(PointRules::Fifa);
    assert_eq!(ranked[0].team, "A");
    assert_eq!(ranked[1].team, "C");
}

#[test]
fn cannon_standings_reward_big_margins_and_catches() {
    let mut standings = Standings::new(["A", "B"]);
    // Win by 160: 2 points plus a 5-point bonus.
    standings.record(PointRules::Cannon, &report("A", "B", [180, 20], Some("A")));
    assert_eq!(standings.row("A").unwrap().points, 7.0);
    assert_eq!(standings.row("A").unwrap().snitches, 1);
    assert_eq!(standings.row("B").unwrap().points, 0.0);
}

#[test]
fn group_distributes_fifa_points_conservatively() {
    let mut rng = Rng::new(303);
    let names: Vec<String> = (1..=4).map(|i| format!("Team {i}")).collect();
    let teams: HashMap<String, Team> = names
        .iter()
        .map(|name| (name.clone(), Team::random(name, &mut rng)))
        .collect();

    let outcome =
        play_group(&names, &teams, PointRules::Fifa, &mut rng).expect("group should complete");
    let total: f64 = outcome
        .standings
        .entries()
        .iter()
        .map(|entry| entry.row.points)
        .sum();
    assert_eq!(total, 6.0);
    assert_eq!(outcome.qualified.len(), 2);
}

#[test]
fn house_cup_replays_identically_per_seed() {
    let first = run_house_cup(&mut Rng::new(41)).expect("house cup should run");
    let second = run_house_cup(&mut Rng::new(41)).expect("house cup should run");
    assert_eq!(first.reports, second.reports);
    assert_eq!(first.qualified, second.qualified);
}

#[test]
fn fifa_world_cup_32_runs_the_full_bracket() {
    let mut rng = Rng::new(7);
    let outcome = run_world_cup(32, PointRules::Fifa, Path::new(NO_CSV), &mut rng)
        .expect("world cup should complete");

    assert_eq!(outcome.groups.len(), 8);
    let titles: Vec<&str> = outcome.rounds.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Round of 16", "Quarterfinals", "Semifinals", "Finals"]
    );
    // Every champion must have come through its group as a qualifier.
    let qualified: Vec<&String> = outcome.groups.iter().flat_map(|g| &g.qualified).collect();
    assert!(qualified.iter().any(|name| **name == outcome.champion));
}

#[test]
fn cannon_world_cup_16_seeds_four_group_winners() {
    let mut rng = Rng::new(8);
    let outcome = run_world_cup(16, PointRules::Cannon, Path::new(NO_CSV), &mut rng)
        .expect("world cup should complete");

    assert_eq!(outcome.groups.len(), 4);
    let titles: Vec<&str> = outcome.rounds.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Semifinals", "Finals"]);
}

#[test]
fn unsupported_field_sizes_are_rejected() {
    for size in [0, 4, 12, 20, 128] {
        let mut rng = Rng::new(9);
        let result = run_world_cup(size, PointRules::Fifa, Path::new(NO_CSV), &mut rng);
        assert!(
            matches!(result, Err(TournamentError::UnsupportedFieldSize(n)) if n == size),
            "field size {size} should be rejected"
        );
    }
}
