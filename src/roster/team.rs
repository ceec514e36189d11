//! Teams, players and roster validation.
//!
//! A valid match roster is exactly 7 players with fixed role quotas: three
//! Chasers, two Beaters, one Keeper, one Seeker. The match engine assumes these
//! invariants unconditionally, so they are checked up front and violations are
//! fatal for the match call.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sim::Rng;

pub const TEAM_SIZE: usize = 7;

pub const MIN_SKILL: u8 = 1;
pub const MAX_SKILL: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Chaser,
    Beater,
    Keeper,
    Seeker,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Chaser, Role::Beater, Role::Keeper, Role::Seeker];

    /// How many players of this role a valid 7-player roster carries.
    pub const fn quota(self) -> usize {
        match self {
            Role::Chaser => 3,
            Role::Beater => 2,
            Role::Keeper => 1,
            Role::Seeker => 1,
        }
    }

    /// Relative likelihood of picking up an injury.
    pub const fn injury_weight(self) -> u32 {
        match self {
            Role::Chaser => 4,
            Role::Beater => 3,
            Role::Keeper => 2,
            Role::Seeker => 1,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Chaser => "Chaser",
            Role::Beater => "Beater",
            Role::Keeper => "Keeper",
            Role::Seeker => "Seeker",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Round-trips as `{ "name", "role", "skill" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub role: Role,
    pub skill: u8,
}

/// Round-trips as `{ "name", "players": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub players: Vec<Player>,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            players: Vec::with_capacity(TEAM_SIZE),
        }
    }

    /// A full random roster: quotas filled in role order, `"<Role> <i>"` names,
    /// uniform skills in `[1, 10]`.
    pub fn random(name: impl Into<String>, rng: &mut Rng) -> Self {
        let mut team = Team::new(name);
        for role in Role::ALL {
            for i in 1..=role.quota() {
                team.players.push(Player {
                    name: format!("{role} {i}"),
                    role,
                    skill: rng.range_u32(u32::from(MIN_SKILL), u32::from(MAX_SKILL)) as u8,
                });
            }
        }
        team
    }

    pub fn role_count(&self, role: Role) -> usize {
        self.players.iter().filter(|p| p.role == role).count()
    }

    pub fn players_in(&self, role: Role) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(move |p| p.role == role)
    }

    /// Checks the fixed-quota invariants the match engine relies on.
    pub fn validate(&self) -> Result<(), RosterError> {
        if self.players.len() != TEAM_SIZE {
            return Err(RosterError::WrongSize {
                team: self.name.clone(),
                count: self.players.len(),
            });
        }
        for role in Role::ALL {
            let actual = self.role_count(role);
            if actual != role.quota() {
                return Err(RosterError::RoleCount {
                    team: self.name.clone(),
                    role,
                    expected: role.quota(),
                    actual,
                });
            }
        }
        for player in &self.players {
            if !(MIN_SKILL..=MAX_SKILL).contains(&player.skill) {
                return Err(RosterError::SkillOutOfRange {
                    team: self.name.clone(),
                    player: player.name.clone(),
                    skill: player.skill,
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    WrongSize {
        team: String,
        count: usize,
    },
    RoleCount {
        team: String,
        role: Role,
        expected: usize,
        actual: usize,
    },
    SkillOutOfRange {
        team: String,
        player: String,
        skill: u8,
    },
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::WrongSize { team, count } => {
                write!(f, "team '{team}' has {count} players, expected {TEAM_SIZE}")
            }
            RosterError::RoleCount {
                team,
                role,
                expected,
                actual,
            } => write!(
                f,
                "team '{team}' has {actual} {role}(s), expected {expected}"
            ),
            RosterError::SkillOutOfRange {
                team,
                player,
                skill,
            } => write!(
                f,
                "player '{player}' on team '{team}' has skill {skill}, expected {MIN_SKILL}-{MAX_SKILL}"
            ),
        }
    }
}

impl std::error::Error for RosterError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_team() -> Team {
        let mut rng = Rng::new(7);
        Team::random("Falcons", &mut rng)
    }

    #[test]
    fn random_team_is_valid() {
        for seed in 0..50 {
            let mut rng = Rng::new(seed);
            let team = Team::random("Falcons", &mut rng);
            assert_eq!(team.players.len(), TEAM_SIZE);
            team.validate().expect("random team should satisfy quotas");
            assert!(team
                .players
                .iter()
                .all(|p| (MIN_SKILL..=MAX_SKILL).contains(&p.skill)));
        }
    }

    #[test]
    fn validate_rejects_wrong_size() {
        let mut team = valid_team();
        team.players.pop();
        assert!(matches!(
            team.validate(),
            Err(RosterError::WrongSize { count: 6, .. })
        ));
    }

    #[test]
    fn validate_rejects_broken_role_quota() {
        let mut team = valid_team();
        // Turn the Seeker into a fourth Chaser.
        let seeker = team
            .players
            .iter_mut()
            .find(|p| p.role == Role::Seeker)
            .expect("random team has a seeker");
        seeker.role = Role::Chaser;
        assert!(matches!(
            team.validate(),
            Err(RosterError::RoleCount {
                role: Role::Chaser,
                expected: 3,
                actual: 4,
                ..
            })
        ));
    }

    #[test]
    fn validate_rejects_out_of_range_skill() {
        let mut team = valid_team();
        team.players[0].skill = 11;
        assert!(matches!(
            team.validate(),
            Err(RosterError::SkillOutOfRange { skill: 11, .. })
        ));
    }

    #[test]
    fn player_records_round_trip_through_json() {
        let team = valid_team();
        let json = serde_json::to_string(&team).expect("team serializes");
        let back: Team = serde_json::from_str(&json).expect("team deserializes");
        assert_eq!(team, back);
    }
}
