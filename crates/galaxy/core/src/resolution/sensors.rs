//! Fog of war: per-realm visibility, planet discovery and exploration.

use crate::env::{ConfigOracle, MapOracle};
use crate::state::{FleetId, GalaxyState, RealmId, Sector};

/// Clears every realm's visibility and transient messages.
pub fn reset_visibility(state: &mut GalaxyState) {
    for realm in &mut state.realms {
        realm.visible.clear();
        realm.messages.clear();
    }
}

/// Reveals the sectors around a fleet and explores the system it stands in.
pub fn scan_fleet<M>(state: &mut GalaxyState, map: &M, id: FleetId)
where
    M: MapOracle + ?Sized,
{
    let Some(fleet) = state.fleet(id) else {
        return;
    };
    let (owner, sector, range) = (fleet.owner, fleet.sector, fleet.scanner_range());
    let explored: Vec<_> = state
        .systems
        .values()
        .filter(|system| system.sector == sector)
        .map(|system| system.id)
        .collect();

    reveal(state, map, owner, sector, range);
    if let Some(realm) = state.realm_mut(owner) {
        realm.explored_systems.extend(explored);
    }
}

/// Reveals the sectors around every owned planet.
pub fn scan_planets<M, C>(state: &mut GalaxyState, map: &M, config: &C)
where
    M: MapOracle + ?Sized,
    C: ConfigOracle + ?Sized,
{
    let range = config.planet_scan_range();
    let sources: Vec<(RealmId, Sector)> = state
        .planets
        .values()
        .filter_map(|planet| planet.owner.map(|owner| (owner, planet.sector)))
        .collect();
    for (owner, sector) in sources {
        reveal(state, map, owner, sector, range);
    }
}

/// Marks sectors within `range` of `center` visible and records any planet
/// found there as known.
pub fn reveal<M>(state: &mut GalaxyState, map: &M, realm: RealmId, center: Sector, range: u32)
where
    M: MapOracle + ?Sized,
{
    let range = range as i32;
    let sectors: Vec<Sector> = (-range..=range)
        .flat_map(|dx| (-range..=range).map(move |dy| center.offset(dx, dy)))
        .filter(|&sector| map.contains(sector))
        .collect();
    let found: Vec<_> = state
        .planets
        .values()
        .filter(|planet| planet.sector.distance(center) <= range as u32)
        .map(|planet| planet.id)
        .collect();

    if let Some(realm) = state.realm_mut(realm) {
        realm.visible.extend(sectors);
        realm.known_planets.extend(found);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GalaxyConfig;
    use crate::env::{MapDimensions, StaticMap};
    use crate::state::{
        Attitude, Component, ComponentKind, Controller, HullClass, Race, Ship, ShipId,
    };

    #[test]
    fn scouts_explore_and_discover() {
        let map = StaticMap::new(MapDimensions::new(20, 20));
        let mut state = GalaxyState::new(1);
        let realm = state.add_realm("Humans", Controller::Ai, Attitude::Logical, Race::new("Human", 10));
        let system = state.add_system("Rigel", Sector::new(6, 6));
        let near = state.add_planet(system, "Rigel I", 8).unwrap();
        let far_system = state.add_system("Deneb", Sector::new(15, 15));
        let far = state.add_planet(far_system, "Deneb I", 8).unwrap();

        let probe = Ship::new(
            ShipId(1),
            "Probe",
            HullClass::Probe,
            vec![Component::new(ComponentKind::Scanner, 3)],
            4,
            1,
        );
        let fleet = state.spawn_fleet(realm, "Pathfinder", Sector::new(6, 6), vec![probe]);
        scan_fleet(&mut state, &map, fleet);

        let humans = &state.realms[0];
        assert!(humans.explored_systems.contains(&system));
        assert!(humans.known_planets.contains(&near));
        assert!(!humans.known_planets.contains(&far));
        assert!(humans.can_see(Sector::new(9, 9)));
        assert!(!humans.can_see(Sector::new(10, 9)));
    }

    #[test]
    fn owned_planets_watch_their_surroundings() {
        let map = StaticMap::new(MapDimensions::new(20, 20));
        let mut state = GalaxyState::new(1);
        let realm = state.add_realm("Humans", Controller::Ai, Attitude::Logical, Race::new("Human", 10));
        let system = state.add_system("Sol", Sector::new(0, 0));
        let earth = state.add_planet(system, "Earth", 12).unwrap();
        state.settle_home_world(earth, realm, 8);

        scan_planets(&mut state, &map, &GalaxyConfig::default());
        assert!(state.realms[0].can_see(Sector::new(2, 2)));
        assert!(!state.realms[0].can_see(Sector::new(3, 0)));
        assert!(!state.realms[0].can_see(Sector::new(-1, 0)));
    }
}
