pub mod engine;
pub mod factors;
pub mod rng;
pub mod snapshot;
pub mod valuation;

pub use engine::{
    active_boost, simulate_match, Boost, MatchConfig, MatchError, MatchReport, TeamStats,
    GOAL_POINTS, SNITCH_CHANCE_PER_SKILL, SNITCH_POINTS,
};
pub use factors::{
    sample_factors, AppliedFactors, BreakRule, Pacing, Weather, REFEREE_PENALTY_BIAS,
    REFEREE_STEAL_CHANCE,
};
pub use rng::Rng;
pub use snapshot::{PlayerId, RosterSnapshot, Side};
pub use valuation::{attack_value, defense_value, seeker_skill, ATTACK_WEIGHTS, DEFENSE_WEIGHTS};
