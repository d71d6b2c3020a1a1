//! Fleet repairs (FIX orders).

use crate::error::EngineError;
use crate::state::{
    BuildingKind, FleetId, GalaxyState, Message, MessageKind, RealmId, Route, Sector,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RepairKind {
    /// Every pool restored at a space port.
    Full,
    /// One point per pool and component.
    Partial,
}

/// True when `realm` owns a planet with a space port at `sector`.
pub fn has_repair_dock(state: &GalaxyState, realm: RealmId, sector: Sector) -> bool {
    state.planets.values().any(|planet| {
        planet.sector == sector
            && planet.is_owned_by(realm)
            && planet.has_building(BuildingKind::SpacePort)
    })
}

/// Repairs every ship of a fleet for one turn.
///
/// A finished repair order is cleared and the owner notified.
pub fn repair_fleet(state: &mut GalaxyState, id: FleetId) -> Result<RepairKind, EngineError> {
    let (owner, sector) = {
        let fleet = state.fleet(id).ok_or(EngineError::invalid_fleet(id))?;
        (fleet.owner, fleet.sector)
    };
    let kind = if has_repair_dock(state, owner, sector) {
        RepairKind::Full
    } else {
        RepairKind::Partial
    };

    let Some(fleet) = state.fleet_mut(id) else {
        return Err(EngineError::invalid_fleet(id));
    };
    for ship in &mut fleet.ships {
        match kind {
            RepairKind::Full => ship.repair_full(),
            RepairKind::Partial => ship.repair_partial(),
        }
    }

    if fleet.is_fully_repaired() && fleet.route.as_ref().is_some_and(Route::is_repair) {
        fleet.route = None;
        let name = fleet.name.clone();
        state.notify(
            owner,
            Message::new(MessageKind::Fleet, format!("{name} completed repairs")).at(sector),
        );
    }
    Ok(kind)
}
