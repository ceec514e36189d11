//! Engine-private working copy of the two rosters.
//!
//! The engine never touches caller-owned teams: `RosterSnapshot::new` clones both
//! rosters and hands out stable [PlayerId] handles (indices into the concatenated
//! player list). All modifier bookkeeping keys off these handles.

use crate::roster::{Player, Team};

/// One of the two sides of a match. `Home` is the first team passed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Home, Side::Away];

    pub const fn index(self) -> usize {
        match self {
            Side::Home => 0,
            Side::Away => 1,
        }
    }

    pub const fn other(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

/// Stable per-match player handle: index into `[home players..., away players...]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub usize);

#[derive(Debug, Clone)]
pub struct RosterSnapshot {
    teams: [Team; 2],
    split: usize,
}

impl RosterSnapshot {
    pub fn new(home: &Team, away: &Team) -> Self {
        Self {
            teams: [home.clone(), away.clone()],
            split: home.players.len(),
        }
    }

    pub fn team(&self, side: Side) -> &Team {
        &self.teams[side.index()]
    }

    pub(crate) fn team_mut(&mut self, side: Side) -> &mut Team {
        &mut self.teams[side.index()]
    }

    pub fn player_count(&self) -> usize {
        self.teams[0].players.len() + self.teams[1].players.len()
    }

    pub fn ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.player_count()).map(PlayerId)
    }

    pub fn ids_on(&self, side: Side) -> impl Iterator<Item = PlayerId> {
        let (start, end) = match side {
            Side::Home => (0, self.split),
            Side::Away => (self.split, self.player_count()),
        };
        (start..end).map(PlayerId)
    }

    pub fn side_of(&self, id: PlayerId) -> Side {
        if id.0 < self.split {
            Side::Home
        } else {
            Side::Away
        }
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        let side = self.side_of(id);
        let offset = id.0 - side.index() * self.split;
        &self.teams[side.index()].players[offset]
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        let side = self.side_of(id);
        let offset = id.0 - side.index() * self.split;
        &mut self.teams[side.index()].players[offset]
    }
}
