//! Four-team group stage.
//!
//! Every group plays a fixed six-match round robin in a fixed order so that a
//! seeded run replays identically. Qualification depends on the point rules in
//! effect.

use std::collections::HashMap;
use std::fmt;

use crate::roster::Team;
use crate::sim::{simulate_match, MatchConfig, MatchError, MatchReport, Rng};
use crate::tournament::standings::{PointRules, Standings};

/// Fixture order inside a group, as indexes into the group's team list.
pub const GROUP_SCHEDULE: [(usize, usize); 6] = [(0, 1), (2, 3), (3, 1), (0, 2), (2, 1), (0, 3)];

pub const GROUP_SIZE: usize = 4;

#[derive(Debug)]
pub enum TournamentError {
    Match(MatchError),
    /// Field or group sizes the bracket math cannot pair up.
    UnsupportedFieldSize(usize),
    /// A scheduled team has no roster in the team map.
    UnknownTeam(String),
}

impl fmt::Display for TournamentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TournamentError::Match(err) => write!(f, "match failed: {err}"),
            TournamentError::UnsupportedFieldSize(size) => {
                write!(f, "unsupported field size: {size}")
            }
            TournamentError::UnknownTeam(name) => write!(f, "unknown team: {name}"),
        }
    }
}

impl std::error::Error for TournamentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TournamentError::Match(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MatchError> for TournamentError {
    fn from(err: MatchError) -> Self {
        TournamentError::Match(err)
    }
}

#[derive(Debug, Clone)]
pub struct GroupOutcome {
    pub standings: Standings,
    /// Best-first, `rules.qualifier_count()` entries.
    pub qualified: Vec<String>,
    pub reports: Vec<MatchReport>,
}

/// Plays one group to completion and returns the table plus qualifiers.
pub fn play_group(
    names: &[String],
    teams: &HashMap<String, Team>,
    rules: PointRules,
    rng: &mut Rng,
) -> Result<GroupOutcome, TournamentError> {
    if names.len() != GROUP_SIZE {
        return Err(TournamentError::UnsupportedFieldSize(names.len()));
    }

    let config = MatchConfig {
        time_limit: rules.match_limit(),
    };
    let mut standings = Standings::new(names.iter().cloned());
    let mut reports = Vec::with_capacity(GROUP_SCHEDULE.len());

    for (home, away) in GROUP_SCHEDULE {
        let home_team = lookup(teams, &names[home])?;
        let away_team = lookup(teams, &names[away])?;
        let report = simulate_match(home_team, away_team, config, rng)?;
        standings.record(rules, &report);
        reports.push(report);
    }

    let qualified = standings
        .ranked(rules)
        .into_iter()
        .take(rules.qualifier_count())
        .map(|entry| entry.team.clone())
        .collect();

    Ok(GroupOutcome {
        standings,
        qualified,
        reports,
    })
}

fn lookup<'a>(
    teams: &'a HashMap<String, Team>,
    name: &str,
) -> Result<&'a Team, TournamentError> {
    teams
        .get(name)
        .ok_or_else(|| TournamentError::UnknownTeam(name.to_string()))
}
