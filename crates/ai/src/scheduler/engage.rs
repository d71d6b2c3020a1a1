//! Combat and sieges started by AI fleets.

use galaxy_core::{
    CombatSession, EngineError, FleetId, GalaxyEnv, GalaxyState, MissionId, PlanetId,
    SiegeSession, SiegeStatus,
};

use super::HumanPrompt;

/// Merges co-located, missionless military fleets of the same owner into
/// `fleet`. Returns the absorbed fleets.
pub(super) fn merge_colocated(state: &mut GalaxyState, fleet: FleetId) -> Vec<FleetId> {
    let Some(current) = state.fleet(fleet) else {
        return Vec::new();
    };
    if !current.is_military() {
        return Vec::new();
    }
    let (owner, sector) = (current.owner, current.sector);

    let absorbed: Vec<FleetId> = state
        .fleets_of(owner)
        .filter(|other| {
            other.id != fleet
                && other.sector == sector
                && other.is_military()
                && state.mission_for_fleet(other.id).is_none()
        })
        .map(|other| other.id)
        .collect();

    for &id in &absorbed {
        let Some(other) = state.remove_fleet(id) else {
            continue;
        };
        if let Some(current) = state.fleet_mut(fleet) {
            current.moves_left = current.moves_left.min(other.moves_left);
            current.ships.extend(other.ships);
        }
        tracing::debug!("{} absorbed {} at {}", fleet, id, sector);
    }
    absorbed
}

/// Besieges `planet` with `fleet`.
///
/// Sieges against a human planet are handed to the presentation layer;
/// others resolve on the spot. A conquered or emptied planet ends the
/// attack mission.
pub(super) fn siege(
    state: &mut GalaxyState,
    env: &GalaxyEnv<'_>,
    fleet: FleetId,
    mission: MissionId,
    planet: PlanetId,
) -> Result<Option<HumanPrompt>, EngineError> {
    let mut session = SiegeSession::begin(state, fleet, planet)?;

    let defender = state.planet(planet).and_then(|p| p.owner);
    if defender.and_then(|id| state.realm(id)).is_some_and(|realm| realm.is_human()) {
        tracing::info!("{} besieges human planet {}", fleet, planet);
        return Ok(Some(HumanPrompt::Siege(Box::new(session))));
    }

    let status = session.resolve(state, env)?;
    tracing::info!("siege of {} by {} ended: {:?}", planet, fleet, status);
    if matches!(status, SiegeStatus::Conquered | SiegeStatus::Depopulated) {
        state.clear_mission(mission);
    }
    Ok(None)
}

/// Starts combat between `fleet` and the first enemy fleet within one sector
/// whose realm is at war with it.
pub(super) fn skirmish(
    state: &mut GalaxyState,
    env: &GalaxyEnv<'_>,
    fleet: FleetId,
) -> Result<Option<HumanPrompt>, EngineError> {
    let Some(current) = state.fleet(fleet) else {
        return Ok(None);
    };
    if !current.is_military() {
        return Ok(None);
    }
    let (owner, sector) = (current.owner, current.sector);
    let realm = state.realm(owner).ok_or(EngineError::invalid_realm(owner))?;

    let Some((enemy, enemy_owner)) = state
        .fleets
        .values()
        .find(|other| {
            other.owner != owner
                && other.sector.distance(sector) <= 1
                && realm.is_at_war_with(other.owner)
        })
        .map(|other| (other.id, other.owner))
    else {
        return Ok(None);
    };

    let mut session = CombatSession::begin(state, fleet, enemy)?;
    if session.status().is_finished() {
        return Ok(None);
    }
    if state.realm(enemy_owner).is_some_and(|realm| realm.is_human()) {
        tracing::info!("{} engages human fleet {}", fleet, enemy);
        return Ok(Some(HumanPrompt::Combat(Box::new(session))));
    }

    let status = session.resolve(state, env)?;
    tracing::info!(
        "{} engaged {} at {}: {:?} after {} rounds",
        fleet,
        enemy,
        sector,
        status,
        session.round()
    );
    Ok(None)
}
