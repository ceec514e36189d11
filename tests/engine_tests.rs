use quidditch::roster::{Player, Role, Team};
use quidditch::sim::{simulate_match, MatchConfig, MatchError, MatchReport, Rng};

fn run_match(seed: u64, time_limit: Option<u32>) -> MatchReport {
    let mut rng = Rng::new(seed);
    let home = Team::random("Falcons", &mut rng);
    let away = Team::random("Harpies", &mut rng);
    simulate_match(&home, &away, MatchConfig { time_limit }, &mut rng)
        .expect("random rosters should simulate")
}

#[test]
fn same_seed_yields_an_identical_report() {
    let first = run_match(99, None);
    let second = run_match(99, None);
    assert_eq!(first, second);
}

#[test]
fn different_seeds_diverge() {
    let baseline = run_match(1, None);
    let diverged = (2..7).map(|seed| run_match(seed, None)).any(|r| r != baseline);
    assert!(diverged, "five different seeds should not all replay seed 1");
}

#[test]
fn score_is_fully_accounted_for() {
    for seed in 0..60 {
        let report = run_match(seed, Some(180));
        for side in [0, 1] {
            let stats = &report.stats[side];
            let snitch_bonus = match &report.snitch_catcher {
                Some(catcher) if *catcher == report.teams[side] => 150,
                _ => 0,
            };
            assert_eq!(
                report.score[side],
                10 * (stats.goals + stats.penalties_scored) + snitch_bonus,
                "seed {seed}, side {side}"
            );
        }
    }
}

#[test]
fn every_attack_ends_in_a_goal_or_a_save() {
    for seed in 0..60 {
        let report = run_match(seed, Some(180));
        for side in [0, 1] {
            let stats = &report.stats[side];
            let opposing = &report.stats[1 - side];
            assert_eq!(
                stats.attacks,
                stats.goals + opposing.saves,
                "seed {seed}, side {side}"
            );
            assert!(stats.penalties_scored <= stats.penalties_awarded);
        }
    }
}

#[test]
fn untimed_matches_always_end_with_a_catch() {
    // Statistical termination check over a large seed sweep.
    for seed in 0..10_000 {
        let report = run_match(seed, None);
        assert!(
            report.snitch_catcher.is_some(),
            "seed {seed} ended without a catch"
        );
        assert!(report.minutes > 0);
    }
}

#[test]
fn timed_matches_respect_the_clock() {
    for seed in 0..100 {
        let report = run_match(seed, Some(120));
        assert!(report.minutes <= 120, "seed {seed} overran the clock");
    }
}

#[test]
fn iteration_landing_exactly_on_the_limit_still_resolves() {
    // With a 5-minute limit and time steps of at most 5 minutes, the first
    // step can never pass the clock, so the opening iteration always plays
    // even when it lands exactly on the limit: either the snitch is caught
    // or an attack resolves.
    for seed in 0..200 {
        let report = run_match(seed, Some(5));
        assert!(report.minutes <= 5, "seed {seed} overran the clock");
        let total_attacks = report.stats[0].attacks + report.stats[1].attacks;
        assert!(
            report.snitch_catcher.is_some() || total_attacks >= 1,
            "seed {seed} ended at minute {} without playing the first iteration",
            report.minutes
        );
    }
}

#[test]
fn snitch_catcher_is_one_of_the_teams() {
    for seed in 0..50 {
        let report = run_match(seed, None);
        let catcher = report.snitch_catcher.expect("untimed match should end");
        assert!(report.teams.contains(&catcher));
    }
}

#[test]
fn undersized_roster_is_rejected() {
    let mut rng = Rng::new(3);
    let away = Team::random("Harpies", &mut rng);
    let home = Team {
        name: "Shorthanded".to_string(),
        players: vec![Player {
            name: "Lone Keeper".to_string(),
            role: Role::Keeper,
            skill: 5,
        }],
    };
    let result = simulate_match(&home, &away, MatchConfig::default(), &mut rng);
    assert!(matches!(result, Err(MatchError::InvalidRoster(_))));
}

#[test]
fn identical_team_names_are_rejected() {
    let mut rng = Rng::new(4);
    let home = Team::random("Falcons", &mut rng);
    let away = Team::random("Falcons", &mut rng);
    let result = simulate_match(&home, &away, MatchConfig::default(), &mut rng);
    assert!(matches!(result, Err(MatchError::DuplicateTeamName(_))));
}

#[test]
fn highlights_are_stamped_with_minutes() {
    let report = run_match(17, None);
    assert!(!report.highlights.is_empty());
    for highlight in &report.highlights {
        let (stamp, _) = highlight
            .split_once("': ")
            .expect("highlight should carry a minute stamp");
        stamp.parse::<u32>().expect("stamp should be numeric");
    }
}

#[test]
fn factors_cover_every_category() {
    // Weather, crowd, brooms, referee, injuries, bludgers and coaches all
    // report something every match, even when inactive.
    for seed in 0..20 {
        let report = run_match(seed, Some(90));
        assert_eq!(report.factors.len(), 9, "seed {seed}");
        assert!(report.factors[0].starts_with("Weather: "));
    }
}
