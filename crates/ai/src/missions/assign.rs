//! Mission assignment for fleets without orders.

use galaxy_core::{
    ComponentKind, EngineError, FleetId, GalaxyEnv, GalaxyState, MapOracle, MissionId,
    MissionKind, MissionPhase, RealmId, Sector, ShipRole,
};

use super::{MissionPlanner, head_for, promote};

impl MissionPlanner {
    /// Returns the fleet's mission, inferring one from its role if it has none.
    ///
    /// Role inference order:
    ///
    /// - Scout: EXPLORE the nearest unexplored system
    /// - Colony: take the oldest unassigned COLONIZE order, load colonists
    ///   and head out
    /// - Spy: ESPIONAGE against the nearest known foreign planet
    /// - Assault, Bomber, Trooper: the oldest matching GATHER order, else an
    ///   ATTACK waiting at this sector, else DEFEND an undefended planet
    /// - Freighter: none
    pub fn assign_if_absent(
        state: &mut GalaxyState,
        env: &GalaxyEnv<'_>,
        fleet: FleetId,
    ) -> Result<Option<MissionId>, EngineError> {
        if let Some(existing) = state.mission_for_fleet(fleet) {
            return Ok(Some(existing));
        }

        let map = env.map()?;
        let current = state.fleet(fleet).ok_or(EngineError::invalid_fleet(fleet))?;
        let (realm, sector, role) = (current.owner, current.sector, current.role());

        let assigned = match role {
            ShipRole::Scout => explore(state, map, realm, fleet, sector),
            ShipRole::Colony => colonize(state, map, realm, fleet)?,
            ShipRole::Spy => spy(state, map, realm, fleet, sector),
            ShipRole::Trooper | ShipRole::Bomber | ShipRole::Assault => {
                military(state, realm, fleet, sector)
            }
            ShipRole::Freighter => None,
        };

        if let Some(mission) = assigned {
            let kind = state.mission(mission).map(|m| m.kind.as_str()).unwrap_or("?");
            tracing::debug!("{} ({:?}) assigned {} mission {}", fleet, role, kind, mission);
        }
        Ok(assigned)
    }
}

fn create_and_assign(
    state: &mut GalaxyState,
    realm: RealmId,
    fleet: FleetId,
    kind: MissionKind,
    phase: MissionPhase,
    target: Sector,
) -> Option<MissionId> {
    let mission = state.add_mission(realm, kind, phase, target);
    if state.assign_mission(mission, fleet) {
        Some(mission)
    } else {
        state.clear_mission(mission);
        None
    }
}

fn explore<M>(
    state: &mut GalaxyState,
    map: &M,
    realm: RealmId,
    fleet: FleetId,
    sector: Sector,
) -> Option<MissionId>
where
    M: MapOracle + ?Sized,
{
    let owner = state.realm(realm)?;
    let target = state.nearest_system(sector, |system| {
        !owner.explored_systems.contains(&system.id)
            && !state
                .missions_of(realm)
                .any(|m| m.kind == MissionKind::Explore { system: system.id })
    })?;
    let (system, target) = (target.id, target.sector);

    let mission = create_and_assign(
        state,
        realm,
        fleet,
        MissionKind::Explore { system },
        MissionPhase::Trekking,
        target,
    )?;
    head_for(state, map, fleet, target);
    Some(mission)
}

fn colonize<M>(
    state: &mut GalaxyState,
    map: &M,
    realm: RealmId,
    fleet: FleetId,
) -> Result<Option<MissionId>, EngineError>
where
    M: MapOracle + ?Sized,
{
    let order = state.missions_of(realm).find_map(|m| match m.kind {
        MissionKind::Colonize { planet }
            if m.is_unassigned()
                && m.phase() == MissionPhase::Planning
                && state.planet(planet).is_some_and(|p| p.owner.is_none()) =>
        {
            Some(m.id)
        }
        _ => None,
    });
    let Some(mission) = order else {
        return Ok(None);
    };
    if !state.assign_mission(mission, fleet) {
        return Ok(None);
    }
    load_colonists(state, map, mission, fleet)?;
    Ok(Some(mission))
}

/// Takes a colony fleet from PLANNING through LOADING to TREKKING.
///
/// An empty colony fleet resting on a friendly planet with more than two
/// workers takes one of them aboard, and a second one when the planet had
/// more than three.
pub(super) fn load_colonists<M>(
    state: &mut GalaxyState,
    map: &M,
    mission: MissionId,
    fleet: FleetId,
) -> Result<(), EngineError>
where
    M: MapOracle + ?Sized,
{
    promote(state, mission, MissionPhase::Loading)?;

    let current = state.fleet(fleet).ok_or(EngineError::invalid_fleet(fleet))?;
    let source = state
        .planets
        .values()
        .find(|p| p.sector == current.sector && p.is_owned_by(current.owner))
        .map(|p| (p.id, p.population));

    if current.colonists() == 0
        && let Some((planet, population)) = source
        && population > 2
    {
        let loaded = if population > 3 { 2 } else { 1 };
        if let Some(source) = state.planet_mut(planet) {
            source.population -= loaded;
        }
        if let Some(current) = state.fleet_mut(fleet) {
            let hold = current
                .ships
                .iter()
                .position(|ship| ship.has_working(ComponentKind::ColonyModule))
                .unwrap_or(0);
            if let Some(ship) = current.ships.get_mut(hold) {
                ship.cargo.colonists += loaded;
            }
        }
        tracing::debug!("{} loaded {} colonists from {}", fleet, loaded, planet);
    }

    promote(state, mission, MissionPhase::Trekking)?;
    let target = state
        .mission(mission)
        .ok_or(EngineError::invalid_mission(mission))?
        .target;
    head_for(state, map, fleet, target);
    Ok(())
}

fn spy<M>(
    state: &mut GalaxyState,
    map: &M,
    realm: RealmId,
    fleet: FleetId,
    sector: Sector,
) -> Option<MissionId>
where
    M: MapOracle + ?Sized,
{
    let owner = state.realm(realm)?;
    let target = state.nearest_planet(sector, |planet| {
        owner.known_planets.contains(&planet.id)
            && planet.owner.is_some_and(|other| other != realm)
            && !state
                .missions_of(realm)
                .any(|m| m.kind == MissionKind::Espionage { planet: planet.id })
    })?;
    let (planet, target) = (target.id, target.sector);

    let mission = create_and_assign(
        state,
        realm,
        fleet,
        MissionKind::Espionage { planet },
        MissionPhase::Trekking,
        target,
    )?;
    head_for(state, map, fleet, target);
    Some(mission)
}

fn military(
    state: &mut GalaxyState,
    realm: RealmId,
    fleet: FleetId,
    sector: Sector,
) -> Option<MissionId> {
    let current = state.fleet(fleet)?;

    let gather = state.missions_of(realm).find_map(|m| match m.kind {
        MissionKind::Gather { role, .. } if m.is_unassigned() && current.has_role(role) => {
            Some(m.id)
        }
        _ => None,
    });
    let staged = || {
        state.missions_of(realm).find_map(|m| match m.kind {
            MissionKind::Attack { .. }
                if m.is_unassigned()
                    && m.phase() == MissionPhase::Planning
                    && m.target == sector =>
            {
                Some(m.id)
            }
            _ => None,
        })
    };

    if let Some(mission) = gather.or_else(staged) {
        return state.assign_mission(mission, fleet).then_some(mission);
    }

    let defended = state.nearest_planet(sector, |planet| {
        planet.is_owned_by(realm)
            && !state
                .missions_of(realm)
                .any(|m| m.kind == MissionKind::Defend { planet: planet.id })
    })?;
    let (planet, target) = (defended.id, defended.sector);
    create_and_assign(
        state,
        realm,
        fleet,
        MissionKind::Defend { planet },
        MissionPhase::Planning,
        target,
    )
}
