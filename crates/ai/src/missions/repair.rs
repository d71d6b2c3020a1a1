//! FIX orders for damaged fleets.

use galaxy_core::resolution::{has_repair_dock, plot_route};
use galaxy_core::{BuildingKind, FleetId, GalaxyState, MapOracle, Route};

use super::MissionOutcome;

/// Puts a damaged fleet on a repair route.
///
/// Returns `None` when every ship is intact. A fleet already at one of its
/// realm's space ports, or with no space port to go to, repairs in place.
/// Otherwise it travels to the nearest space port first.
pub(super) fn coerce_repair<M>(
    state: &mut GalaxyState,
    map: &M,
    fleet: FleetId,
) -> Option<MissionOutcome>
where
    M: MapOracle + ?Sized,
{
    let current = state.fleet(fleet)?;
    if current.is_fully_repaired() {
        return None;
    }
    let (owner, sector) = (current.owner, current.sector);

    let route = if has_repair_dock(state, owner, sector) {
        Route::Repair
    } else {
        let dock = state
            .nearest_planet(sector, |planet| {
                planet.is_owned_by(owner) && planet.has_building(BuildingKind::SpacePort)
            })
            .map(|planet| planet.sector);
        match dock {
            Some(dock) => {
                let heading = current.route.as_ref().and_then(Route::destination);
                if heading == Some(dock) {
                    return Some(MissionOutcome::Repairing);
                }
                plot_route(map, sector, dock)
            }
            None => Route::Repair,
        }
    };

    tracing::debug!("{} is damaged, repair route {:?}", fleet, route);
    if let Some(current) = state.fleet_mut(fleet) {
        current.route = Some(route);
    }
    Some(MissionOutcome::Repairing)
}
