//! Role-weighted attack and defense valuation.
//!
//! Pure functions over a team's current effective skills plus a transient boost.
//! The boost is the summed magnitude of the active timeout windows for that team;
//! it caps each contribution at the skill ceiling and never touches stored skill.

use crate::roster::{Role, Team, MAX_SKILL};

pub const ATTACK_WEIGHTS: (f64, f64, f64) = (0.75, 0.5, 0.25);
pub const DEFENSE_WEIGHTS: (f64, f64, f64) = (0.25, 0.5, 0.75);

fn boosted(skill: u8, boost: i32) -> f64 {
    i32::from(MAX_SKILL).min(i32::from(skill) + boost) as f64
}

fn role_sum(team: &Team, role: Role, boost: i32) -> f64 {
    team.players_in(role).map(|p| boosted(p.skill, boost)).sum()
}

/// `0.75·Σ chasers + 0.5·Σ beaters + 0.25·keeper`, each term capped at 10.
pub fn attack_value(team: &Team, boost: i32) -> f64 {
    let (chaser, beater, keeper) = ATTACK_WEIGHTS;
    chaser * role_sum(team, Role::Chaser, boost)
        + beater * role_sum(team, Role::Beater, boost)
        + keeper * role_sum(team, Role::Keeper, boost)
}

/// `0.25·Σ chasers + 0.5·Σ beaters + 0.75·keeper`, each term capped at 10.
pub fn defense_value(team: &Team, boost: i32) -> f64 {
    let (chaser, beater, keeper) = DEFENSE_WEIGHTS;
    chaser * role_sum(team, Role::Chaser, boost)
        + beater * role_sum(team, Role::Beater, boost)
        + keeper * role_sum(team, Role::Keeper, boost)
}

/// Effective skill of the team's Seeker; 0 for a (invalid) seekerless roster.
pub fn seeker_skill(team: &Team) -> u32 {
    team.players_in(Role::Seeker)
        .map(|p| u32::from(p.skill))
        .sum()
}
