pub mod countries;
pub mod store;
pub mod team;

pub use countries::{
    allocation, load_country_table, pick_team_names, Country, CountryTable,
    DEFAULT_WORLD_POPULATION_PATH,
};
pub use store::{load_teams, save_teams, StoreError};
pub use team::{Player, Role, RosterError, Team, MAX_SKILL, MIN_SKILL, TEAM_SIZE};
