//! Time-stepped match loop.
//!
//! `simulate_match` validates both rosters, snapshots them, applies the pre-match
//! factor pass, folds the accumulated deltas into clamped effective skills once,
//! then advances the match in randomized time steps until the Snitch is caught or
//! an optional time limit expires. The caller's teams are never mutated and every
//! random draw goes through the injected [Rng], so a fixed seed yields an
//! identical [MatchReport].

use std::fmt;

use log::debug;
use serde::Serialize;

use crate::roster::{Role, RosterError, Team, MAX_SKILL, MIN_SKILL};
use crate::sim::factors::{
    sample_factors, AppliedFactors, Pacing, REFEREE_PENALTY_BIAS, REFEREE_STEAL_CHANCE,
};
use crate::sim::rng::Rng;
use crate::sim::snapshot::{RosterSnapshot, Side};
use crate::sim::valuation::{attack_value, defense_value, seeker_skill};

pub const GOAL_POINTS: u32 = 10;
pub const SNITCH_POINTS: u32 = 150;
/// Snitch catch probability per iteration is this factor times total seeker skill.
pub const SNITCH_CHANCE_PER_SKILL: f64 = 0.001;

#[derive(Debug, Clone, Copy, Default)]
pub struct MatchConfig {
    /// Wall-clock minutes after which the match is cut off. When absent the
    /// match always ends with a Snitch catch.
    pub time_limit: Option<u32>,
}

/// Per-team match statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TeamStats {
    pub attacks: u32,
    pub goals: u32,
    pub saves: u32,
    pub penalties_awarded: u32,
    pub penalties_scored: u32,
}

/// Immutable result of one simulated match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport {
    pub teams: [String; 2],
    pub score: [u32; 2],
    /// Name of the team whose Seeker caught the Snitch; `None` when the match
    /// ended at the time limit.
    pub snitch_catcher: Option<String>,
    pub minutes: u32,
    /// One line per pre-match factor, in sampling order.
    pub factors: Vec<String>,
    /// Timestamped play-by-play, each line prefixed `"<minute>': "`.
    pub highlights: Vec<String>,
    pub stats: [TeamStats; 2],
}

#[derive(Debug)]
pub enum MatchError {
    InvalidRoster(RosterError),
    /// Both teams share one name; bookkeeping keyed by team name would collide.
    DuplicateTeamName(String),
    /// Zero total seeker skill and no time limit: no iteration could ever end
    /// the match.
    NoTerminationPossible,
    /// A penalty was awarded to a team with no Chasers. Unreachable for
    /// validated rosters, but surfaced rather than skipped.
    NoEligibleChaser { team: String },
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::InvalidRoster(err) => write!(f, "invalid roster: {err}"),
            MatchError::DuplicateTeamName(name) => {
                write!(f, "both teams are named '{name}'")
            }
            MatchError::NoTerminationPossible => write!(
                f,
                "no seeker can catch the snitch and no time limit is configured"
            ),
            MatchError::NoEligibleChaser { team } => {
                write!(f, "penalty awarded to '{team}' but it has no chasers")
            }
        }
    }
}

impl std::error::Error for MatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MatchError::InvalidRoster(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RosterError> for MatchError {
    fn from(err: RosterError) -> Self {
        MatchError::InvalidRoster(err)
    }
}

/// A temporary additive skill bonus for one side over a closed inclusive window
/// of attack indices. Applied during valuation only; stored skill is untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boost {
    pub side: Side,
    pub magnitude: i32,
    pub start_attack: u32,
    pub end_attack: u32,
}

impl Boost {
    pub fn contains(&self, attack: u32) -> bool {
        self.start_attack <= attack && attack <= self.end_attack
    }
}

/// Summed magnitude of all boosts active for `side` at `attack`.
pub fn active_boost(boosts: &[Boost], side: Side, attack: u32) -> i32 {
    boosts
        .iter()
        .filter(|boost| boost.side == side && boost.contains(attack))
        .map(|boost| boost.magnitude)
        .sum()
}

/// The +2 caller / +1 opponent boost pair of a strategic timeout, both windows
/// starting at the attack after `attack`.
pub(crate) fn timeout_boosts(
    caller: Side,
    attack: u32,
    caller_window: u32,
    opponent_window: u32,
) -> [Boost; 2] {
    [
        Boost {
            side: caller,
            magnitude: 2,
            start_attack: attack + 1,
            end_attack: attack + caller_window,
        },
        Boost {
            side: caller.other(),
            magnitude: 1,
            start_attack: attack + 1,
            end_attack: attack + opponent_window,
        },
    ]
}

/// Folds each player's accumulated deltas into a clamped effective skill.
/// Applied exactly once, before the loop starts.
pub(crate) fn resolve_skills(snapshot: &mut RosterSnapshot, deltas: &[Vec<i32>]) {
    for id in snapshot.ids().collect::<Vec<_>>() {
        let sum: i32 = deltas[id.0].iter().sum();
        let effective = i32::from(snapshot.player(id).skill) + sum;
        snapshot.player_mut(id).skill =
            effective.clamp(i32::from(MIN_SKILL), i32::from(MAX_SKILL)) as u8;
    }
}

pub(crate) fn ensure_terminable(
    total_seeker_skill: u32,
    time_limit: Option<u32>,
) -> Result<(), MatchError> {
    if total_seeker_skill == 0 && time_limit.is_none() {
        return Err(MatchError::NoTerminationPossible);
    }
    Ok(())
}

struct MatchState {
    minutes: u32,
    score: [u32; 2],
    stats: [TeamStats; 2],
    attack_counter: u32,
    boosts: Vec<Boost>,
    next_timeout_attack: u32,
    timeout_count: u32,
    next_penalty_attack: u32,
    highlights: Vec<String>,
}

impl MatchState {
    fn highlight(&mut self, line: String) {
        self.highlights.push(format!("{}': {line}", self.minutes));
    }
}

/// Simulates one match between two validated 7-player rosters.
pub fn simulate_match(
    home: &Team,
    away: &Team,
    config: MatchConfig,
    rng: &mut Rng,
) -> Result<MatchReport, MatchError> {
    home.validate()?;
    away.validate()?;
    if home.name == away.name {
        return Err(MatchError::DuplicateTeamName(home.name.clone()));
    }

    let mut snapshot = RosterSnapshot::new(home, away);
    let factors = sample_factors(&snapshot, rng);
    resolve_skills(&mut snapshot, &factors.deltas);
    debug!(
        "{} vs {}: {} pre-match factors applied, pacing {:?}",
        home.name,
        away.name,
        factors.descriptions.len(),
        factors.pacing.step_minutes
    );

    run_match_loop(snapshot, factors, config, rng)
}

fn run_match_loop(
    snapshot: RosterSnapshot,
    factors: AppliedFactors,
    config: MatchConfig,
    rng: &mut Rng,
) -> Result<MatchReport, MatchError> {
    let pacing = factors.pacing;
    let (min_step, max_step) = pacing.step_minutes;

    let seeker_skills = [
        seeker_skill(snapshot.team(Side::Home)),
        seeker_skill(snapshot.team(Side::Away)),
    ];
    let total_seeker_skill = seeker_skills[0] + seeker_skills[1];
    ensure_terminable(total_seeker_skill, config.time_limit)?;

    let mut state = MatchState {
        minutes: 0,
        score: [0, 0],
        stats: [TeamStats::default(), TeamStats::default()],
        attack_counter: 0,
        boosts: Vec::new(),
        next_timeout_attack: rng.range_u32(10, 20),
        timeout_count: 0,
        next_penalty_attack: rng.range_u32(1, 10),
        highlights: Vec::new(),
    };
    let mut snitch_catcher: Option<Side> = None;

    loop {
        state.minutes += rng.range_u32(min_step, max_step);

        // A step landing exactly on the limit still plays out; the match ends
        // only once the clock has passed it.
        if let Some(limit) = config.time_limit {
            if state.minutes > limit {
                state.minutes = limit;
                break;
            }
        }

        if total_seeker_skill > 0
            && rng.chance(SNITCH_CHANCE_PER_SKILL * f64::from(total_seeker_skill))
        {
            let winner_roll = rng.range_u32(1, total_seeker_skill);
            let catcher = if winner_roll <= seeker_skills[0] {
                Side::Home
            } else {
                Side::Away
            };
            state.score[catcher.index()] += SNITCH_POINTS;
            state.highlight(format!(
                "{}'s Seeker catches the Snitch! (+{SNITCH_POINTS} points)",
                snapshot.team(catcher).name
            ));
            snitch_catcher = Some(catcher);
            break;
        }

        resolve_weather_break(&pacing, config.time_limit, &mut state, rng);
        resolve_attack(&snapshot, &pacing, &mut state, rng);
        resolve_strategic_timeout(&snapshot, config.time_limit, &mut state, rng);
        resolve_penalty(&snapshot, &pacing, &mut state, rng)?;
    }

    debug!(
        "match finished after {} attacks in {} minutes",
        state.attack_counter, state.minutes
    );
    Ok(MatchReport {
        teams: [
            snapshot.team(Side::Home).name.clone(),
            snapshot.team(Side::Away).name.clone(),
        ],
        score: state.score,
        snitch_catcher: snitch_catcher.map(|side| snapshot.team(side).name.clone()),
        minutes: state.minutes,
        factors: factors.descriptions,
        highlights: state.highlights,
        stats: state.stats,
    })
}

/// Periodic weather pause: fires when the attack counter is a positive multiple
/// of the rule's interval, the pause would not push past a configured limit, and
/// the weather-specific chance succeeds.
fn resolve_weather_break(
    pacing: &Pacing,
    time_limit: Option<u32>,
    state: &mut MatchState,
    rng: &mut Rng,
) {
    let Some(rule) = pacing.break_rule else {
        return;
    };
    if state.attack_counter == 0 || state.attack_counter % rule.interval_attacks != 0 {
        return;
    }
    if let Some(limit) = time_limit {
        if state.minutes + rule.break_minutes >= limit {
            return;
        }
    }
    if rng.chance(rule.weather.break_chance()) {
        state.minutes += rule.break_minutes;
        state.highlight(format!(
            "{} for {} min ({}).",
            rule.weather.break_label(),
            rule.break_minutes,
            rule.weather.as_str()
        ));
    }
}

/// One attack: uniform side selection, optional referee steal, then the
/// valuation duel against a uniform threshold in [-25, 35].
fn resolve_attack(snapshot: &RosterSnapshot, pacing: &Pacing, state: &mut MatchState, rng: &mut Rng) {
    let mut attacker = if rng.coin() { Side::Home } else { Side::Away };
    state.stats[attacker.index()].attacks += 1;
    state.attack_counter += 1;

    if let Some(favored) = pacing.favored {
        if attacker != favored && rng.chance(REFEREE_STEAL_CHANCE) {
            // The attack statistic follows the post-steal attacker.
            state.stats[attacker.index()].attacks -= 1;
            state.stats[favored.index()].attacks += 1;
            attacker = favored;
            state.highlight(format!(
                "Referee bias! {} steals the attack.",
                snapshot.team(favored).name
            ));
        }
    }
    let defender = attacker.other();

    let attacker_boost = active_boost(&state.boosts, attacker, state.attack_counter);
    let defender_boost = active_boost(&state.boosts, defender, state.attack_counter);
    let diff = attack_value(snapshot.team(attacker), attacker_boost)
        - defense_value(snapshot.team(defender), defender_boost);
    let threshold = f64::from(rng.range_i32(-25, 35));

    if diff > threshold {
        state.score[attacker.index()] += GOAL_POINTS;
        state.stats[attacker.index()].goals += 1;
        state.highlight(format!(
            "{} scores a goal! ({}-{})",
            snapshot.team(attacker).name,
            state.score[0],
            state.score[1]
        ));
    } else {
        state.stats[defender.index()].saves += 1;
        state.highlight(format!(
            "{} makes a big save!",
            snapshot.team(defender).name
        ));
    }
}

/// Strategic timeout: only in untimed matches, only on the scheduled attack
/// index, 20% chance. The trailing team calls it 75% of the time (uniform on a
/// tie); both sides get windowed boosts and play pauses with a doubling cap.
fn resolve_strategic_timeout(
    snapshot: &RosterSnapshot,
    time_limit: Option<u32>,
    state: &mut MatchState,
    rng: &mut Rng,
) {
    if time_limit.is_some() || state.attack_counter != state.next_timeout_attack {
        return;
    }
    if rng.chance(0.20) {
        state.timeout_count += 1;

        let caller = if state.score[0] == state.score[1] {
            if rng.coin() {
                Side::Home
            } else {
                Side::Away
            }
        } else {
            let trailing = if state.score[0] < state.score[1] {
                Side::Home
            } else {
                Side::Away
            };
            if rng.chance(0.75) {
                trailing
            } else {
                trailing.other()
            }
        };
        let opponent = caller.other();

        let caller_window = rng.range_u32(5, 10);
        let opponent_window = rng.range_u32(5, 10);
        state.boosts.extend(timeout_boosts(
            caller,
            state.attack_counter,
            caller_window,
            opponent_window,
        ));

        let max_skip = if state.timeout_count > 6 {
            600
        } else {
            (15u32 << (state.timeout_count - 1)).min(600)
        };
        let skip_minutes = rng.range_u32(5, max_skip);
        state.minutes += skip_minutes;
        state.highlight(format!(
            "Strategic timeout! {caller_name} calls it. Boosts: {caller_name} (+2 for {caller_window} attacks), {opponent_name} (+1 for {opponent_window} attacks). Play resumed after {skip_minutes} min.",
            caller_name = snapshot.team(caller).name,
            opponent_name = snapshot.team(opponent).name,
        ));
    }
    state.next_timeout_attack += rng.range_u32(10, 20);
}

/// Penalty kick: only on the scheduled attack index, 20% chance. The favored
/// team (if any) is awarded 75% of penalties; the best-boosted Chaser shoots
/// against the opposing Keeper.
fn resolve_penalty(
    snapshot: &RosterSnapshot,
    pacing: &Pacing,
    state: &mut MatchState,
    rng: &mut Rng,
) -> Result<(), MatchError> {
    if state.attack_counter != state.next_penalty_attack {
        return Ok(());
    }
    if rng.chance(0.20) {
        let awarded = match pacing.favored {
            Some(favored) => {
                if rng.chance(REFEREE_PENALTY_BIAS) {
                    favored
                } else {
                    favored.other()
                }
            }
            None => {
                if rng.chance(0.5) {
                    Side::Home
                } else {
                    Side::Away
                }
            }
        };
        let defending = awarded.other();

        let awarded_boost = active_boost(&state.boosts, awarded, state.attack_counter);
        let defending_boost = active_boost(&state.boosts, defending, state.attack_counter);

        // Boost is uniform across the team, so the best shooter is the highest
        // base-skill Chaser; ties go to roster order.
        let chaser = snapshot
            .team(awarded)
            .players_in(Role::Chaser)
            .reduce(|best, p| if p.skill > best.skill { p } else { best })
            .ok_or_else(|| MatchError::NoEligibleChaser {
                team: snapshot.team(awarded).name.clone(),
            })?;
        let keeper = snapshot
            .team(defending)
            .players_in(Role::Keeper)
            .next()
            .ok_or(MatchError::InvalidRoster(RosterError::RoleCount {
                team: snapshot.team(defending).name.clone(),
                role: Role::Keeper,
                expected: 1,
                actual: 0,
            }))?;

        let chaser_skill =
            i32::from(MAX_SKILL).min(i32::from(chaser.skill) + awarded_boost) as u32;
        let keeper_skill =
            i32::from(MAX_SKILL).min(i32::from(keeper.skill) + defending_boost) as u32;

        state.stats[awarded.index()].penalties_awarded += 1;
        let roll = rng.range_u32(1, chaser_skill + keeper_skill);
        if roll <= chaser_skill {
            state.score[awarded.index()] += GOAL_POINTS;
            state.stats[awarded.index()].penalties_scored += 1;
            state.highlight(format!(
                "Penalty for {}! {} vs {}: GOAL! ({}-{})",
                snapshot.team(awarded).name,
                chaser.name,
                keeper.name,
                state.score[0],
                state.score[1]
            ));
        } else {
            state.highlight(format!(
                "Penalty for {}! {} vs {}: SAVED by {}!",
                snapshot.team(awarded).name,
                chaser.name,
                keeper.name,
                keeper.name
            ));
        }
    }
    state.next_penalty_attack += rng.range_u32(1, 10);
    Ok(())
}
