pub mod bracket;
pub mod group;
pub mod runner;
pub mod standings;

pub use bracket::{bracket_order, ranked_pairs, round_names, split_bracket_pairs};
pub use group::{play_group, GroupOutcome, TournamentError, GROUP_SCHEDULE, GROUP_SIZE};
pub use runner::{
    run_house_cup, run_world_cup, PlayoffMatch, PlayoffRound, WorldCupOutcome, HOUSE_TEAM_NAMES,
};
pub use standings::{PointRules, StandingEntry, StandingRow, Standings};
