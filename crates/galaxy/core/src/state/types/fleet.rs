//! Fleets and routes.

use std::collections::VecDeque;

use super::common::{FleetId, RealmId, Sector, ShipId};
use super::ship::{Ship, ShipRole};

/// Standing movement order of a fleet.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Route {
    /// Remaining sectors to visit, nearest first.
    Travel { path: VecDeque<Sector> },
    /// Stay in place and repair (FIX order).
    Repair,
}

impl Route {
    /// Straight-line route from `from` to `to`, one sector per step.
    pub fn travel(from: Sector, to: Sector) -> Self {
        let mut path = VecDeque::new();
        let mut cursor = from;
        while cursor != to {
            cursor = cursor.step_toward(to);
            path.push_back(cursor);
        }
        Self::Travel { path }
    }

    pub fn next_step(&self) -> Option<Sector> {
        match self {
            Self::Travel { path } => path.front().copied(),
            Self::Repair => None,
        }
    }

    pub fn destination(&self) -> Option<Sector> {
        match self {
            Self::Travel { path } => path.back().copied(),
            Self::Repair => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        match self {
            Self::Travel { path } => path.is_empty(),
            Self::Repair => false,
        }
    }

    pub const fn is_repair(&self) -> bool {
        matches!(self, Self::Repair)
    }

    fn advance(&mut self) {
        if let Self::Travel { path } = self {
            path.pop_front();
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fleet {
    pub id: FleetId,
    pub name: String,
    pub owner: RealmId,
    pub sector: Sector,
    pub ships: Vec<Ship>,
    pub route: Option<Route>,
    pub moves_left: u32,
    /// Privateers never trigger border contact.
    pub privateer: bool,
}

impl Fleet {
    pub fn new(id: FleetId, name: impl Into<String>, owner: RealmId, sector: Sector) -> Self {
        Self {
            id,
            name: name.into(),
            owner,
            sector,
            ships: Vec::new(),
            route: None,
            moves_left: 0,
            privateer: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    /// Slowest ship speed; an empty fleet does not move.
    pub fn speed(&self) -> u32 {
        self.ships.iter().map(|ship| ship.speed).min().unwrap_or(0)
    }

    /// The most specialised role present, in `ShipRole` order.
    pub fn role(&self) -> ShipRole {
        self.ships
            .iter()
            .map(Ship::role)
            .min()
            .unwrap_or(ShipRole::Freighter)
    }

    pub fn has_role(&self, role: ShipRole) -> bool {
        self.ships.iter().any(|ship| ship.role() == role)
    }

    pub fn is_military(&self) -> bool {
        self.ships.iter().any(|ship| ship.role().is_military())
    }

    pub fn is_fully_repaired(&self) -> bool {
        self.ships.iter().all(Ship::is_fully_repaired)
    }

    pub fn can_invade(&self) -> bool {
        self.ships.iter().any(Ship::can_invade)
    }

    pub fn colonists(&self) -> u32 {
        self.ships.iter().map(|ship| ship.cargo.colonists).sum()
    }

    pub fn scanner_range(&self) -> u32 {
        self.ships.iter().map(Ship::scanner_range).max().unwrap_or(1)
    }

    pub fn firepower(&self) -> u32 {
        self.ships.iter().map(Ship::firepower).sum()
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.iter().find(|ship| ship.id == id)
    }

    pub fn ship_mut(&mut self, id: ShipId) -> Option<&mut Ship> {
        self.ships.iter_mut().find(|ship| ship.id == id)
    }

    pub fn remove_ship(&mut self, id: ShipId) -> Option<Ship> {
        let index = self.ships.iter().position(|ship| ship.id == id)?;
        Some(self.ships.remove(index))
    }

    /// Moves one sector along the route, consuming one move.
    ///
    /// Returns the new sector, or `None` when the route has no next step or no
    /// moves remain.
    pub fn step_along_route(&mut self) -> Option<Sector> {
        if self.moves_left == 0 {
            return None;
        }
        let route = self.route.as_mut()?;
        let next = route.next_step()?;
        route.advance();
        self.sector = next;
        self.moves_left -= 1;
        Some(next)
    }

    pub fn reset_moves(&mut self) {
        self.moves_left = self.speed();
    }
}
