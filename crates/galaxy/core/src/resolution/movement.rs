//! Route plotting and route stepping.

use std::collections::{HashMap, VecDeque};

use crate::env::MapOracle;
use crate::error::EngineError;
use crate::state::{FleetId, GalaxyState, Message, MessageKind, Route, Sector};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// No travel route.
    Idle,
    /// Moved without reaching the destination.
    Moved { steps: u32 },
    Arrived { sector: Sector },
}

/// Plots a route around map obstacles.
///
/// Breadth-first search over the eight neighbours of each sector. When the
/// destination cannot be reached, falls back to a straight line, which will
/// stop at the first obstacle.
pub fn plot_route<M>(map: &M, from: Sector, to: Sector) -> Route
where
    M: MapOracle + ?Sized,
{
    if from == to {
        return Route::Travel {
            path: VecDeque::new(),
        };
    }
    if !map.is_open(to) {
        return Route::travel(from, to);
    }

    let mut came_from: HashMap<Sector, Sector> = HashMap::new();
    let mut frontier = VecDeque::from([from]);
    came_from.insert(from, from);

    while let Some(sector) = frontier.pop_front() {
        if sector == to {
            break;
        }
        for (dx, dy) in NEIGHBOURS {
            let next = sector.offset(dx, dy);
            if came_from.contains_key(&next) || !map.is_open(next) {
                continue;
            }
            came_from.insert(next, sector);
            frontier.push_back(next);
        }
    }

    if !came_from.contains_key(&to) {
        return Route::travel(from, to);
    }

    let mut path = VecDeque::new();
    let mut cursor = to;
    while cursor != from {
        path.push_front(cursor);
        cursor = came_from[&cursor];
    }
    Route::Travel { path }
}

// Straight moves first so ties prefer them.
const NEIGHBOURS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Steps a fleet along its travel route while it has moves left.
///
/// # Errors
///
/// `BlockedMovement` when the next sector is an obstacle or held by another
/// realm. The route is cancelled and the owner notified before returning.
pub fn advance_fleet<M>(
    state: &mut GalaxyState,
    map: &M,
    id: FleetId,
) -> Result<MoveOutcome, EngineError>
where
    M: MapOracle + ?Sized,
{
    let mut steps = 0;
    loop {
        let fleet = state.fleet(id).ok_or(EngineError::invalid_fleet(id))?;
        let owner = fleet.owner;
        let next = match &fleet.route {
            Some(route @ Route::Travel { .. }) => route.next_step(),
            _ => return Ok(MoveOutcome::Idle),
        };

        let Some(next) = next else {
            return Ok(arrive(state, id));
        };
        if fleet.moves_left == 0 {
            return Ok(MoveOutcome::Moved { steps });
        }

        if state.is_blocked(map, next, owner) {
            let name = fleet.name.clone();
            if let Some(fleet) = state.fleet_mut(id) {
                fleet.route = None;
            }
            state.notify(
                owner,
                Message::new(MessageKind::Fleet, format!("{name}: route blocked")).at(next),
            );
            return Err(EngineError::BlockedMovement {
                fleet: id,
                sector: next,
            });
        }

        if let Some(fleet) = state.fleet_mut(id) {
            fleet.step_along_route();
            steps += 1;
            if fleet.route.as_ref().is_some_and(Route::is_finished) {
                return Ok(arrive(state, id));
            }
        }
    }
}

fn arrive(state: &mut GalaxyState, id: FleetId) -> MoveOutcome {
    let Some(fleet) = state.fleet_mut(id) else {
        return MoveOutcome::Idle;
    };
    fleet.route = None;
    let (owner, sector, name) = (fleet.owner, fleet.sector, fleet.name.clone());
    state.notify(
        owner,
        Message::new(MessageKind::Fleet, format!("{name} reached its destination")).at(sector),
    );
    MoveOutcome::Arrived { sector }
}
