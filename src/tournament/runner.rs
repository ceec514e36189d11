//! Full tournament drivers.
//!
//! Two formats: a four-team house cup (single FIFA round robin, no playoffs)
//! and a world cup for 16, 32 or 64 national teams with a group stage feeding
//! a knockout bracket. Both are fully deterministic for a given seed.

use std::collections::HashMap;
use std::path::Path;

use log::debug;

use crate::roster::{pick_team_names, Team};
use crate::sim::{simulate_match, MatchConfig, MatchReport, Rng};
use crate::tournament::bracket::{ranked_pairs, round_names, split_bracket_pairs};
use crate::tournament::group::{play_group, GroupOutcome, TournamentError, GROUP_SIZE};
use crate::tournament::standings::{PointRules, StandingRow};

pub const HOUSE_TEAM_NAMES: [&str; 4] = ["Gryffindor", "Slytherin", "Hufflepuff", "Ravenclaw"];

#[derive(Debug, Clone)]
pub struct PlayoffMatch {
    pub report: MatchReport,
    pub winner: String,
}

#[derive(Debug, Clone)]
pub struct PlayoffRound {
    pub title: String,
    pub matches: Vec<PlayoffMatch>,
}

#[derive(Debug, Clone)]
pub struct WorldCupOutcome {
    pub rules: PointRules,
    pub groups: Vec<GroupOutcome>,
    pub rounds: Vec<PlayoffRound>,
    pub champion: String,
}

/// Round robin between the four house teams under FIFA rules.
pub fn run_house_cup(rng: &mut Rng) -> Result<GroupOutcome, TournamentError> {
    let names: Vec<String> = HOUSE_TEAM_NAMES.iter().map(|n| n.to_string()).collect();
    let teams: HashMap<String, Team> = names
        .iter()
        .map(|name| (name.clone(), Team::random(name, rng)))
        .collect();
    play_group(&names, &teams, PointRules::Fifa, rng)
}

/// Group stage plus knockout for a field of 16, 32 or 64 teams.
pub fn run_world_cup(
    field_size: usize,
    rules: PointRules,
    country_csv: &Path,
    rng: &mut Rng,
) -> Result<WorldCupOutcome, TournamentError> {
    if !matches!(field_size, 16 | 32 | 64) {
        return Err(TournamentError::UnsupportedFieldSize(field_size));
    }

    let mut names = pick_team_names(field_size, country_csv, rng);
    rng.shuffle(&mut names);
    let teams: HashMap<String, Team> = names
        .iter()
        .map(|name| (name.clone(), Team::random(name, rng)))
        .collect();

    let mut groups = Vec::with_capacity(field_size / GROUP_SIZE);
    for group_names in names.chunks(GROUP_SIZE) {
        let outcome = play_group(group_names, &teams, rules, rng)?;
        debug!(
            "group {} finished, qualified: {:?}",
            groups.len() + 1,
            outcome.qualified
        );
        groups.push(outcome);
    }

    let pairs = match rules {
        PointRules::Fifa => fifa_pairs(&groups),
        PointRules::Cannon => cannon_pairs(&groups, rules),
    };
    let titles =
        round_names(pairs.len()).ok_or(TournamentError::UnsupportedFieldSize(field_size))?;

    let (rounds, champion) = play_knockout(pairs, titles, &teams, rng)?;
    Ok(WorldCupOutcome {
        rules,
        groups,
        rounds,
        champion,
    })
}

/// Group winners against neighbouring runners-up.
fn fifa_pairs(groups: &[GroupOutcome]) -> Vec<(String, String)> {
    let winners: Vec<String> = groups.iter().map(|g| g.qualified[0].clone()).collect();
    let runners_up: Vec<String> = groups.iter().map(|g| g.qualified[1].clone()).collect();
    split_bracket_pairs(&winners, &runners_up)
}

/// Group winners seeded across the whole field by their group-stage rows.
fn cannon_pairs(groups: &[GroupOutcome], rules: PointRules) -> Vec<(String, String)> {
    let mut seeded: Vec<(String, StandingRow)> = groups
        .iter()
        .map(|g| {
            let name = g.qualified[0].clone();
            let row = g.standings.row(&name).copied().unwrap_or_default();
            (name, row)
        })
        .collect();
    seeded.sort_by(|a, b| rules.compare(&a.1, &b.1));
    let ranked: Vec<String> = seeded.into_iter().map(|(name, _)| name).collect();
    ranked_pairs(&ranked)
}

fn play_knockout(
    mut pairs: Vec<(String, String)>,
    titles: &[&str],
    teams: &HashMap<String, Team>,
    rng: &mut Rng,
) -> Result<(Vec<PlayoffRound>, String), TournamentError> {
    let mut rounds = Vec::with_capacity(titles.len());
    loop {
        let title = titles
            .get(rounds.len())
            .map(|t| t.to_string())
            .unwrap_or_else(|| format!("Round {}", rounds.len() + 1));
        let mut matches = Vec::with_capacity(pairs.len());
        let mut winners = Vec::with_capacity(pairs.len());
        for (home, away) in &pairs {
            let played = play_elimination_match(home, away, teams, rng)?;
            winners.push(played.winner.clone());
            matches.push(played);
        }
        debug!("{title}: advancing {winners:?}");
        rounds.push(PlayoffRound { title, matches });
        if winners.len() == 1 {
            return Ok((rounds, winners.remove(0)));
        }
        pairs = winners
            .chunks(2)
            .map(|pair| (pair[0].clone(), pair[1].clone()))
            .collect();
    }
}

fn play_elimination_match(
    home: &str,
    away: &str,
    teams: &HashMap<String, Team>,
    rng: &mut Rng,
) -> Result<PlayoffMatch, TournamentError> {
    let home_team = teams
        .get(home)
        .ok_or_else(|| TournamentError::UnknownTeam(home.to_string()))?;
    let away_team = teams
        .get(away)
        .ok_or_else(|| TournamentError::UnknownTeam(away.to_string()))?;
    // No clock in elimination rounds: play until the snitch is caught.
    let report = simulate_match(home_team, away_team, MatchConfig::default(), rng)?;
    let winner = if report.score[0] > report.score[1] {
        report.teams[0].clone()
    } else if report.score[1] > report.score[0] {
        report.teams[1].clone()
    } else {
        // Scores can tie even with the catch bonus; the catcher goes through.
        report
            .snitch_catcher
            .clone()
            .unwrap_or_else(|| report.teams[0].clone())
    };
    Ok(PlayoffMatch { report, winner })
}
