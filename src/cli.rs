use std::path::Path;

use crate::roster::{load_teams, Team, DEFAULT_WORLD_POPULATION_PATH};
use crate::sim::{simulate_match, MatchConfig, MatchReport, Rng};
use crate::tournament::{run_house_cup, run_world_cup, PointRules, Standings, WorldCupOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Simulate,
    Roster,
    Validate,
    Tournament,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("simulate") => Some(Command::Simulate),
        Some("roster") => Some(Command::Roster),
        Some("validate") => Some(Command::Validate),
        Some("tournament") => Some(Command::Tournament),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Simulate) => handle_simulate(args),
        Some(Command::Roster) => handle_roster(args),
        Some(Command::Validate) => handle_validate(args),
        Some(Command::Tournament) => handle_tournament(args),
        None => {
            eprintln!("usage: quidditch <simulate|roster|validate|tournament>");
            2
        }
    }
}

fn handle_simulate(args: &[String]) -> i32 {
    let positionals = positional_args(args);
    let seed = parse_u64_arg(positionals.first().copied(), "seed", os_seed());
    let time_limit = parse_limit_arg(positionals.get(1).copied());
    let as_json = args.iter().any(|arg| arg == "--json");

    let mut rng = Rng::new(seed);
    let home = Team::random("Gryffindor", &mut rng);
    let away = Team::random("Slytherin", &mut rng);

    match simulate_match(&home, &away, MatchConfig { time_limit }, &mut rng) {
        Ok(report) => {
            if as_json {
                match serde_json::to_string_pretty(&report) {
                    Ok(payload) => println!("{payload}"),
                    Err(err) => {
                        eprintln!("failed to serialize match report: {err}");
                        return 1;
                    }
                }
            } else {
                print_match_report(&report);
            }
            0
        }
        Err(err) => {
            eprintln!("simulation failed: {err}");
            1
        }
    }
}

fn handle_roster(args: &[String]) -> i32 {
    let Some(name) = args.get(2) else {
        eprintln!("usage: quidditch roster <name> [seed]");
        return 2;
    };
    let seed = parse_u64_arg(args.get(3), "seed", os_seed());

    let mut rng = Rng::new(seed);
    let team = Team::random(name, &mut rng);
    match serde_json::to_string_pretty(&team) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize roster: {err}");
            1
        }
    }
}

fn handle_validate(args: &[String]) -> i32 {
    let Some(path) = args.get(2) else {
        eprintln!("usage: quidditch validate <path-to-teams.json>");
        return 2;
    };

    let teams = match load_teams(Path::new(path)) {
        Ok(teams) => teams,
        Err(err) => {
            eprintln!("failed to load {path}: {err}");
            return 1;
        }
    };

    let issues: Vec<String> = teams
        .iter()
        .filter_map(|team| {
            team.validate()
                .err()
                .map(|err| format!("{}: {err}", team.name))
        })
        .collect();

    if issues.is_empty() {
        println!("validation passed: {path} ({} teams)", teams.len());
        0
    } else {
        eprintln!("validation failed: {} issue(s)", issues.len());
        for issue in issues {
            eprintln!("- {issue}");
        }
        1
    }
}

fn handle_tournament(args: &[String]) -> i32 {
    let positionals = positional_args(args);
    let Some(field_size) = positionals.first().and_then(|raw| raw.parse::<usize>().ok()) else {
        eprintln!("usage: quidditch tournament <4|16|32|64> [seed] [--cannon]");
        return 2;
    };
    let seed = parse_u64_arg(positionals.get(1).copied(), "seed", os_seed());
    let rules = if args.iter().any(|arg| arg == "--cannon") {
        PointRules::Cannon
    } else {
        PointRules::Fifa
    };

    let mut rng = Rng::new(seed);
    if field_size == 4 {
        match run_house_cup(&mut rng) {
            Ok(outcome) => {
                println!("Starting a 4-team Quidditch tournament!");
                for report in &outcome.reports {
                    print_score_line(report);
                }
                println!("\n=== Final Standings ===");
                print_standings(&outcome.standings, PointRules::Fifa);
                0
            }
            Err(err) => {
                eprintln!("tournament failed: {err}");
                1
            }
        }
    } else {
        let csv_path = Path::new(DEFAULT_WORLD_POPULATION_PATH);
        match run_world_cup(field_size, rules, csv_path, &mut rng) {
            Ok(outcome) => {
                print_world_cup(&outcome);
                0
            }
            Err(err) => {
                eprintln!("tournament failed: {err}");
                1
            }
        }
    }
}

fn print_match_report(report: &MatchReport) {
    println!("\n--- Random Factors Applied ---");
    for factor in &report.factors {
        println!("{factor}");
    }

    println!("\n--- Match Result ---");
    println!(
        "{}: {} - {}: {}",
        report.teams[0], report.score[0], report.teams[1], report.score[1]
    );
    match &report.snitch_catcher {
        Some(catcher) => println!("Snitch caught by: {catcher}"),
        None => println!("Snitch was not caught (time ran out)."),
    }
    println!("Total match time: {} minutes", report.minutes);

    println!("\n--- Match Statistics ---");
    for side in [0, 1] {
        // A team's misses are the saves made by the opposing Keeper.
        println!(
            "{}: {} attacks, {} goals, {} misses",
            report.teams[side],
            report.stats[side].attacks,
            report.stats[side].goals,
            report.stats[1 - side].saves
        );
    }

    println!("\n--- Penalty Statistics ---");
    for side in [0, 1] {
        println!(
            "{}: {} awarded, {} scored",
            report.teams[side],
            report.stats[side].penalties_awarded,
            report.stats[side].penalties_scored
        );
    }

    println!("\n--- Match Highlights ---");
    for highlight in &report.highlights {
        println!("{highlight}");
    }
}

fn print_score_line(report: &MatchReport) {
    match &report.snitch_catcher {
        Some(catcher) => println!(
            "  {} {} - {} {}  (Snitch: {catcher})",
            report.teams[0], report.score[0], report.score[1], report.teams[1]
        ),
        None => println!(
            "  {} {} - {} {}  (Match is concluded with no snitch caught)",
            report.teams[0], report.score[0], report.score[1], report.teams[1]
        ),
    }
}

fn print_standings(standings: &Standings, rules: PointRules) {
    println!(
        "{:<12} {:<6} {:<8} {:<8} {:<8}",
        "Team", "Points", "Scored", "Conceded", "Diff"
    );
    for entry in standings.ranked(rules) {
        println!(
            "{:<12} {:<6} {:<8} {:<8} {:<8}",
            entry.team,
            entry.row.points,
            entry.row.scored,
            entry.row.conceded,
            entry.row.diff()
        );
    }
}

fn print_world_cup(outcome: &WorldCupOutcome) {
    for (index, group) in outcome.groups.iter().enumerate() {
        let members: Vec<&str> = group
            .standings
            .entries()
            .iter()
            .map(|entry| entry.team.as_str())
            .collect();
        println!("\n===== GROUP {} ({}) =====", index + 1, members.join(", "));
        for report in &group.reports {
            print_score_line(report);
        }
        print_standings(&group.standings, outcome.rules);
    }

    for round in &outcome.rounds {
        println!("\n=== {} ===", round.title.to_uppercase());
        for played in &round.matches {
            print_score_line(&played.report);
            println!("    Winner: {}", played.winner);
        }
    }

    println!("\n=== CHAMPION: {} ===", outcome.champion);
}

/// Arguments after the subcommand, with `--` flags stripped out.
fn positional_args(args: &[String]) -> Vec<&String> {
    args.iter()
        .skip(2)
        .filter(|arg| !arg.starts_with("--"))
        .collect()
}

fn parse_u64_arg(raw: Option<&String>, name: &str, default: u64) -> u64 {
    raw.and_then(|value| value.parse::<u64>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                eprintln!("invalid {name} '{value}', defaulting to {default}");
            }
            default
        })
}

fn parse_limit_arg(raw: Option<&String>) -> Option<u32> {
    let value = raw?;
    match value.parse::<u32>() {
        Ok(limit) => Some(limit),
        Err(_) => {
            eprintln!("invalid time limit '{value}', playing without a clock");
            None
        }
    }
}

fn os_seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(err) => {
            eprintln!("os entropy unavailable ({err}), using a fixed seed");
            0x5eed
        }
    }
}
