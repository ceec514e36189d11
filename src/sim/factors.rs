//! Pre-match random factors.
//!
//! Each factor perturbs player effectiveness and/or match pacing and yields one
//! human-readable description. Factors are sampled in a fixed order; together with
//! the seeded [Rng](crate::sim::Rng) that makes the whole pre-match setup
//! reproducible. Per-player deltas accumulate as signed lists keyed by
//! [PlayerId]; summation is commutative, so factor order never changes the final
//! clamped skill.

use crate::roster::Role;
use crate::sim::rng::Rng;
use crate::sim::snapshot::{PlayerId, RosterSnapshot, Side};

/// Per-attack steal chance of the referee's favored team.
pub const REFEREE_STEAL_CHANCE: f64 = 0.20;
/// Chance the favored team receives an awarded penalty.
pub const REFEREE_PENALTY_BIAS: f64 = 0.75;

const COMBINED_ROSTER_SIZE: u32 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weather {
    Cloudy,
    Sunny,
    Windy,
    Rainy,
    Foggy,
}

impl Weather {
    const DISTRIBUTION: [(Weather, f64); 5] = [
        (Weather::Cloudy, 0.4),
        (Weather::Sunny, 0.3),
        (Weather::Windy, 0.1),
        (Weather::Rainy, 0.1),
        (Weather::Foggy, 0.1),
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Weather::Cloudy => "Cloudy",
            Weather::Sunny => "Sunny",
            Weather::Windy => "Windy",
            Weather::Rainy => "Rainy",
            Weather::Foggy => "Foggy",
        }
    }

    /// Uniform skill delta applied to every player on both teams.
    pub const fn skill_delta(self) -> i32 {
        match self {
            Weather::Cloudy => 1,
            Weather::Sunny => 0,
            Weather::Windy => -1,
            Weather::Rainy => -2,
            Weather::Foggy => -1,
        }
    }

    /// Break length range in minutes for the weathers that pause play.
    pub const fn break_minutes(self) -> Option<(u32, u32)> {
        match self {
            Weather::Cloudy => Some((10, 30)),
            Weather::Sunny => Some((5, 15)),
            Weather::Rainy => Some((5, 60)),
            Weather::Windy | Weather::Foggy => None,
        }
    }

    /// Chance that a scheduled break actually happens.
    pub const fn break_chance(self) -> f64 {
        match self {
            Weather::Cloudy => 0.05,
            Weather::Sunny => 0.20,
            Weather::Rainy => 0.10,
            Weather::Windy | Weather::Foggy => 0.0,
        }
    }

    pub const fn break_label(self) -> &'static str {
        match self {
            Weather::Cloudy => "Fan interference timeout",
            Weather::Sunny => "Water break",
            Weather::Rainy => "Lightning risk timeout",
            Weather::Windy | Weather::Foggy => "",
        }
    }

    fn sample(rng: &mut Rng) -> Weather {
        let roll = rng.next_f64();
        let mut cumulative = 0.0;
        for (weather, probability) in Weather::DISTRIBUTION {
            cumulative += probability;
            if roll < cumulative {
                return weather;
            }
        }
        Weather::Foggy
    }
}

/// A periodic weather-driven pause: every `interval_attacks` attacks, roll the
/// weather's break chance; on success the match pauses for `break_minutes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakRule {
    pub interval_attacks: u32,
    pub break_minutes: u32,
    pub weather: Weather,
}

/// Match pacing parameters produced by the factor pass.
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    /// Inclusive minutes advanced per attack. (1, 5) normally, (1, 3) under
    /// bludger mayhem.
    pub step_minutes: (u32, u32),
    /// Referee-favored side, if bias triggered.
    pub favored: Option<Side>,
    pub break_rule: Option<BreakRule>,
}

/// Everything the factor pass feeds into the match loop.
#[derive(Debug, Clone)]
pub struct AppliedFactors {
    /// Signed skill deltas per player handle, summed and clamped once by the
    /// skill resolver.
    pub deltas: Vec<Vec<i32>>,
    pub pacing: Pacing,
    /// One line per factor, in sampling order.
    pub descriptions: Vec<String>,
}

/// Samples every pre-match factor in fixed order. The draw order is part of the
/// determinism contract: a given seed always produces the same factor set.
pub fn sample_factors(snapshot: &RosterSnapshot, rng: &mut Rng) -> AppliedFactors {
    let mut deltas: Vec<Vec<i32>> = vec![Vec::new(); snapshot.player_count()];
    let mut descriptions = Vec::new();

    let weather = sample_weather(snapshot, &mut deltas, &mut descriptions, rng);
    let break_rule = sample_weather_effect(weather, snapshot, &mut deltas, &mut descriptions, rng);
    sample_crowd_support(snapshot, &mut deltas, &mut descriptions, rng);
    sample_faulty_brooms(snapshot, &mut deltas, &mut descriptions, rng);
    let favored = sample_referee_bias(snapshot, &mut descriptions, rng);
    sample_injuries(snapshot, &mut deltas, &mut descriptions, rng);
    let step_minutes = sample_bludger_mayhem(&mut descriptions, rng);
    sample_coach_strategy(snapshot, &mut deltas, &mut descriptions, rng);

    AppliedFactors {
        deltas,
        pacing: Pacing {
            step_minutes,
            favored,
            break_rule,
        },
        descriptions,
    }
}

fn sample_weather(
    snapshot: &RosterSnapshot,
    deltas: &mut [Vec<i32>],
    descriptions: &mut Vec<String>,
    rng: &mut Rng,
) -> Weather {
    let weather = Weather::sample(rng);
    let delta = weather.skill_delta();
    for id in snapshot.ids() {
        deltas[id.0].push(delta);
    }
    let sign = if delta >= 0 { "+" } else { "" };
    descriptions.push(format!(
        "Weather: {} (all players skill {sign}{delta})",
        weather.as_str()
    ));
    weather
}

/// Exactly one of a periodic break rule (Cloudy/Sunny/Rainy) or a role debuff
/// (Windy/Foggy) per match. The interval draw is consumed for every weather so
/// the stream of draws does not depend on which branch is taken.
fn sample_weather_effect(
    weather: Weather,
    snapshot: &RosterSnapshot,
    deltas: &mut [Vec<i32>],
    descriptions: &mut Vec<String>,
    rng: &mut Rng,
) -> Option<BreakRule> {
    let interval_attacks = rng.range_u32(10, 100);

    if let Some((min, max)) = weather.break_minutes() {
        let break_minutes = rng.range_u32(min, max);
        descriptions.push(match weather {
            Weather::Sunny => format!(
                "{}: {break_minutes} minutes after every {interval_attacks} attacks (Sunny)",
                weather.break_label()
            ),
            _ => format!(
                "{}: {break_minutes} minutes every {interval_attacks} attacks ({})",
                weather.break_label(),
                weather.as_str()
            ),
        });
        return Some(BreakRule {
            interval_attacks,
            break_minutes,
            weather,
        });
    }

    match weather {
        Weather::Windy => {
            for id in snapshot.ids() {
                if snapshot.player(id).role == Role::Beater {
                    deltas[id.0].push(-1);
                }
            }
            descriptions.push("All Beaters suffer -1 skill for the whole match (Windy)".to_string());
        }
        Weather::Foggy => {
            for id in snapshot.ids() {
                if snapshot.player(id).role == Role::Seeker {
                    deltas[id.0].push(-2);
                }
            }
            descriptions.push("Both Seekers suffer -2 skill for the whole match (Foggy)".to_string());
        }
        _ => unreachable!("break weathers return above"),
    }
    None
}

fn sample_crowd_support(
    snapshot: &RosterSnapshot,
    deltas: &mut [Vec<i32>],
    descriptions: &mut Vec<String>,
    rng: &mut Rng,
) {
    for side in Side::BOTH {
        let team_name = &snapshot.team(side).name;
        if rng.chance(0.25) {
            for id in snapshot.ids_on(side) {
                deltas[id.0].push(1);
            }
            descriptions.push(format!(
                "{team_name} received massive crowd support (+1 to all players)"
            ));
        } else {
            descriptions.push(format!("{team_name} did not receive extra crowd support"));
        }
    }
}

fn sample_faulty_brooms(
    snapshot: &RosterSnapshot,
    deltas: &mut [Vec<i32>],
    descriptions: &mut Vec<String>,
    rng: &mut Rng,
) {
    let affected = rng.geometric_capped(0.5, COMBINED_ROSTER_SIZE) as usize;
    if affected == 0 {
        descriptions.push("No players received faulty brooms.".to_string());
        return;
    }
    let picks = rng.sample_distinct(snapshot.player_count(), affected);
    let mut named = Vec::with_capacity(picks.len());
    for &index in &picks {
        let id = PlayerId(index);
        deltas[index].push(-2);
        let player = snapshot.player(id);
        named.push(format!(
            "{} ({}, {})",
            player.name,
            snapshot.team(snapshot.side_of(id)).name,
            player.role
        ));
    }
    descriptions.push(format!(
        "{affected} player(s) received faulty brooms (skill -2): {}",
        named.join(", ")
    ));
}

fn sample_referee_bias(
    snapshot: &RosterSnapshot,
    descriptions: &mut Vec<String>,
    rng: &mut Rng,
) -> Option<Side> {
    if !rng.chance(0.10) {
        descriptions.push("No referee bias in this match.".to_string());
        return None;
    }
    let favored = if rng.coin() { Side::Home } else { Side::Away };
    descriptions.push(format!(
        "Referee bias: {} has a 20% chance to steal the attack each time step.",
        snapshot.team(favored).name
    ));
    Some(favored)
}

fn sample_injuries(
    snapshot: &RosterSnapshot,
    deltas: &mut [Vec<i32>],
    descriptions: &mut Vec<String>,
    rng: &mut Rng,
) {
    let injuries = rng.geometric_capped(0.75, COMBINED_ROSTER_SIZE);
    if injuries == 0 {
        descriptions.push("No injuries occurred this match.".to_string());
        return;
    }

    let severities: [i32; 3] = [-1, -2, -3];
    let severity_weights: [u32; 3] = [5, 3, 2];

    let mut injured = vec![false; snapshot.player_count()];
    let mut notes = Vec::new();
    for _ in 0..injuries {
        let candidates: Vec<PlayerId> = snapshot.ids().filter(|id| !injured[id.0]).collect();
        if candidates.is_empty() {
            break;
        }
        let weights: Vec<u32> = candidates
            .iter()
            .map(|&id| snapshot.player(id).role.injury_weight())
            .collect();
        let id = candidates[rng.weighted_index(&weights)];
        injured[id.0] = true;
        let severity = severities[rng.weighted_index(&severity_weights)];
        deltas[id.0].push(severity);
        let player = snapshot.player(id);
        notes.push(format!(
            "{} ({}, {}) injured: {severity}",
            player.name,
            snapshot.team(snapshot.side_of(id)).name,
            player.role
        ));
    }
    descriptions.push(format!("Injuries: {}", notes.join("; ")));
}

fn sample_bludger_mayhem(descriptions: &mut Vec<String>, rng: &mut Rng) -> (u32, u32) {
    if rng.chance(0.10) {
        descriptions.push(
            "Bludger Mayhem: The match is chaotic and fast! Time steps reduced to 1-3 minutes."
                .to_string(),
        );
        (1, 3)
    } else {
        descriptions.push("No bludger mayhem: Normal match pace.".to_string());
        (1, 5)
    }
}

fn sample_coach_strategy(
    snapshot: &RosterSnapshot,
    deltas: &mut [Vec<i32>],
    descriptions: &mut Vec<String>,
    rng: &mut Rng,
) {
    let mut notes = Vec::with_capacity(2);
    for side in Side::BOTH {
        let team_name = &snapshot.team(side).name;
        if !rng.chance(0.25) {
            notes.push(format!("{team_name} coach's strategy: No special effect"));
            continue;
        }
        let targets_own = rng.coin();
        if targets_own {
            let boost = [1, 2][rng.weighted_index(&[7, 3])];
            for id in snapshot.ids_on(side) {
                if snapshot.player(id).role != Role::Seeker {
                    deltas[id.0].push(boost);
                }
            }
            notes.push(format!(
                "{team_name} coach's offensive strategy: All non-Seeker players gain +{boost}"
            ));
        } else {
            let penalty = [-1, -2][rng.weighted_index(&[7, 3])];
            for id in snapshot.ids_on(side.other()) {
                if snapshot.player(id).role != Role::Seeker {
                    deltas[id.0].push(penalty);
                }
            }
            notes.push(format!(
                "{team_name} coach's defensive strategy: Opponent's non-Seeker players suffer {penalty}"
            ));
        }
    }
    descriptions.push(notes.join("; "));
}
