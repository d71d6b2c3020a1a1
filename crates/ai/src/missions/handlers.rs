//! Per-kind mission handlers.

use galaxy_core::ownership::{TransferCause, transfer_planet};
use galaxy_core::{
    ComponentKind, EngineError, FleetId, GalaxyEnv, GalaxyError, GalaxyState, MapOracle, Message,
    MessageKind, MissionId, MissionKind, MissionPhase, PlanetId, RealmId, Sector, SystemId,
};

use super::assign::load_colonists;
use super::repair::coerce_repair;
use super::{MissionOutcome, MissionPlanner, head_for, promote};

/// The mission being handled, copied out of the arena.
#[derive(Clone, Copy, Debug)]
struct Step {
    mission: MissionId,
    kind: MissionKind,
    realm: RealmId,
    fleet: FleetId,
    phase: MissionPhase,
    target: Sector,
}

impl Step {
    fn unsupported(&self) -> EngineError {
        EngineError::UnsupportedPhase {
            mission: self.mission,
            kind: self.kind.as_str(),
            phase: self.phase,
        }
    }

    fn arrived(&self, state: &GalaxyState) -> bool {
        state
            .fleet(self.fleet)
            .is_some_and(|fleet| fleet.sector == self.target)
    }

    fn enter(
        &self,
        state: &mut GalaxyState,
        to: MissionPhase,
    ) -> Result<MissionOutcome, EngineError> {
        let from = promote(state, self.mission, to)?;
        Ok(MissionOutcome::Promoted {
            mission: self.mission,
            from,
            to,
        })
    }

    fn complete(&self, state: &mut GalaxyState) -> MissionOutcome {
        state.clear_mission(self.mission);
        MissionOutcome::Completed {
            mission: self.mission,
        }
    }

    fn cancel(&self, state: &mut GalaxyState) -> MissionOutcome {
        state.clear_mission(self.mission);
        MissionOutcome::Cancelled {
            mission: self.mission,
        }
    }
}

impl MissionPlanner {
    /// Drives a fleet's mission for one turn.
    ///
    /// A damaged fleet is sent to repair first and its mission waits. Each
    /// mission kind has its own handler; a phase the kind never enters is a
    /// fatal `UnsupportedPhase` error.
    pub fn advance(
        state: &mut GalaxyState,
        env: &GalaxyEnv<'_>,
        fleet: FleetId,
    ) -> Result<MissionOutcome, EngineError> {
        let map = env.map()?;
        let realm = state
            .fleet(fleet)
            .ok_or(EngineError::invalid_fleet(fleet))?
            .owner;

        if let Some(outcome) = coerce_repair(state, map, fleet) {
            return Ok(outcome);
        }

        let Some(id) = state.mission_for_fleet(fleet) else {
            return Ok(MissionOutcome::NoMission);
        };
        let mission = state.mission(id).ok_or(EngineError::invalid_mission(id))?;
        let kind = mission.kind;
        let step = Step {
            mission: id,
            kind,
            realm,
            fleet,
            phase: mission.phase(),
            target: mission.target,
        };
        if !kind.uses_phase(step.phase) {
            return Err(step.unsupported());
        }

        let outcome = match kind {
            MissionKind::Explore { system } => explore(state, map, step, system)?,
            MissionKind::Colonize { planet } => colonize(state, env, step, planet)?,
            MissionKind::Attack { planet } => attack(state, map, step, planet)?,
            MissionKind::Gather { attack, .. } => gather(state, map, step, attack)?,
            MissionKind::Defend { planet } => defend(state, map, step, planet)?,
            MissionKind::Move => travel(state, map, step)?,
            MissionKind::Espionage { planet } => espionage(state, map, step, planet)?,
        };

        tracing::debug!(
            "{} {} mission {} ({:?}): {:?}",
            fleet,
            kind.as_str(),
            id,
            step.phase,
            outcome
        );
        Ok(outcome)
    }
}

fn explore<M>(
    state: &mut GalaxyState,
    map: &M,
    step: Step,
    system: SystemId,
) -> Result<MissionOutcome, EngineError>
where
    M: MapOracle + ?Sized,
{
    match step.phase {
        MissionPhase::Trekking if step.arrived(state) => step.enter(state, MissionPhase::Executing),
        MissionPhase::Trekking => Ok(head_for(state, map, step.fleet, step.target)),
        MissionPhase::Executing => {
            if let Some(realm) = state.realm_mut(step.realm) {
                realm.explored_systems.insert(system);
            }
            Ok(step.complete(state))
        }
        MissionPhase::Planning | MissionPhase::Loading => Err(step.unsupported()),
    }
}

fn colonize(
    state: &mut GalaxyState,
    env: &GalaxyEnv<'_>,
    step: Step,
    planet: PlanetId,
) -> Result<MissionOutcome, EngineError> {
    let map = env.map()?;
    if state.planet(planet).is_none_or(|p| p.owner.is_some()) {
        return Ok(step.cancel(state));
    }

    match step.phase {
        MissionPhase::Planning | MissionPhase::Loading => {
            load_colonists(state, map, step.mission, step.fleet)?;
            Ok(MissionOutcome::Promoted {
                mission: step.mission,
                from: step.phase,
                to: MissionPhase::Trekking,
            })
        }
        MissionPhase::Trekking if step.arrived(state) => step.enter(state, MissionPhase::Executing),
        MissionPhase::Trekking => Ok(head_for(state, map, step.fleet, step.target)),
        MissionPhase::Executing if !step.arrived(state) => {
            Ok(head_for(state, map, step.fleet, step.target))
        }
        MissionPhase::Executing => settle(state, env, step, planet),
    }
}

/// Founds a colony with the fleet's colonists and consumes the colony ship.
///
/// A fleet that arrives without colonists settles nothing; the order is
/// dropped so the fleet can pick up a fresh one and load first.
fn settle(
    state: &mut GalaxyState,
    env: &GalaxyEnv<'_>,
    step: Step,
    planet: PlanetId,
) -> Result<MissionOutcome, EngineError> {
    let config = env.config()?;
    let colonists = state
        .fleet(step.fleet)
        .ok_or(EngineError::invalid_fleet(step.fleet))?
        .colonists();

    if colonists == 0 {
        let err = EngineError::InsufficientResource {
            resource: "colonists",
            action: "colonization",
        };
        tracing::warn!("{} at {}: {} [{}]", step.fleet, planet, err, err.error_code());
        let name = state.planet(planet).map(|p| p.name.clone()).unwrap_or_default();
        state.notify(
            step.realm,
            Message::new(
                MessageKind::Fleet,
                format!("No colonists aboard; settling {name} had no effect"),
            )
            .at(step.target),
        );
        return Ok(step.cancel(state));
    }

    transfer_planet(state, config, planet, Some(step.realm), TransferCause::Colonization)?;
    if let Some(colony) = state.planet_mut(planet) {
        colony.population = colonists.min(colony.max_population);
    }

    let emptied = match state.fleet_mut(step.fleet) {
        Some(fleet) => {
            fleet.ships.iter_mut().for_each(|ship| ship.cargo.colonists = 0);
            if let Some(index) = fleet
                .ships
                .iter()
                .position(|ship| ship.has_working(ComponentKind::ColonyModule))
            {
                fleet.ships.remove(index);
            }
            fleet.is_empty()
        }
        None => false,
    };
    if emptied {
        state.remove_fleet(step.fleet);
    }

    tracing::info!("{} colonized {} with {} colonists", step.realm, planet, colonists);
    Ok(step.complete(state))
}

fn attack<M>(
    state: &mut GalaxyState,
    map: &M,
    step: Step,
    planet: PlanetId,
) -> Result<MissionOutcome, EngineError>
where
    M: MapOracle + ?Sized,
{
    let Some(target) = state.planet(planet) else {
        return Ok(step.cancel(state));
    };
    if target.is_owned_by(step.realm) {
        return Ok(step.complete(state));
    }
    let (objective, defender) = (target.sector, target.owner);

    match step.phase {
        MissionPhase::Planning if !step.arrived(state) => {
            Ok(head_for(state, map, step.fleet, step.target))
        }
        MissionPhase::Planning => launch(state, map, step, objective),
        MissionPhase::Trekking if step.arrived(state) => {
            step.enter(state, MissionPhase::Executing)?;
            Ok(besiege(state, step, planet, defender))
        }
        MissionPhase::Trekking => Ok(head_for(state, map, step.fleet, step.target)),
        MissionPhase::Executing if !step.arrived(state) => {
            Ok(head_for(state, map, step.fleet, step.target))
        }
        MissionPhase::Executing => Ok(besiege(state, step, planet, defender)),
        MissionPhase::Loading => Err(step.unsupported()),
    }
}

/// Leaves the staging sector once no gathering fleet is still on its way.
///
/// Unfilled gather orders hold the attack back unless the fleet already
/// carries troops; they are dropped when the attack leaves.
fn launch<M>(
    state: &mut GalaxyState,
    map: &M,
    step: Step,
    objective: Sector,
) -> Result<MissionOutcome, EngineError>
where
    M: MapOracle + ?Sized,
{
    let gathers: Vec<(MissionId, bool)> = state
        .missions_of(step.realm)
        .filter(|m| matches!(m.kind, MissionKind::Gather { attack, .. } if attack == step.mission))
        .map(|m| (m.id, m.is_unassigned()))
        .collect();
    let in_transit = gathers.iter().any(|&(_, unassigned)| !unassigned);
    let can_invade = state.fleet(step.fleet).is_some_and(|f| f.can_invade());
    if in_transit || (!gathers.is_empty() && !can_invade) {
        return Ok(MissionOutcome::Holding);
    }

    for (gather, _) in gathers {
        state.clear_mission(gather);
    }
    if let Some(mission) = state.mission_mut(step.mission) {
        mission.target = objective;
    }
    let outcome = step.enter(state, MissionPhase::Trekking)?;
    head_for(state, map, step.fleet, objective);
    tracing::info!("{} launches attack {} toward {}", step.fleet, step.mission, objective);
    Ok(outcome)
}

fn besiege(
    state: &mut GalaxyState,
    step: Step,
    planet: PlanetId,
    defender: Option<RealmId>,
) -> MissionOutcome {
    let armed = state.fleet(step.fleet).is_some_and(|fleet| {
        fleet
            .ships
            .iter()
            .any(|ship| ship.has_weapons() || ship.has_bombs() || ship.can_invade())
    });
    if !armed {
        return step.cancel(state);
    }

    let hostile = match defender {
        None => true,
        Some(owner) => state
            .realm(step.realm)
            .is_some_and(|realm| realm.is_at_war_with(owner)),
    };
    if hostile {
        MissionOutcome::Siege {
            mission: step.mission,
            planet,
        }
    } else {
        MissionOutcome::Holding
    }
}

fn gather<M>(
    state: &mut GalaxyState,
    map: &M,
    step: Step,
    attack: MissionId,
) -> Result<MissionOutcome, EngineError>
where
    M: MapOracle + ?Sized,
{
    let Some((staging, holder)) = state
        .mission(attack)
        .filter(|m| m.phase() == MissionPhase::Planning)
        .map(|m| (m.target, m.fleet))
    else {
        return Ok(step.cancel(state));
    };

    match step.phase {
        MissionPhase::Planning => {
            if let Some(mission) = state.mission_mut(step.mission) {
                mission.target = staging;
            }
            let outcome = step.enter(state, MissionPhase::Trekking)?;
            head_for(state, map, step.fleet, staging);
            Ok(outcome)
        }
        MissionPhase::Trekking if step.arrived(state) => {
            let outcome = step.complete(state);
            join_attack(state, step.fleet, attack, holder, staging);
            Ok(outcome)
        }
        MissionPhase::Trekking => Ok(head_for(state, map, step.fleet, step.target)),
        MissionPhase::Loading | MissionPhase::Executing => Err(step.unsupported()),
    }
}

/// Hands an arrived fleet to its attack: merged into the attacking fleet
/// when one waits at staging, otherwise it becomes the attacking fleet.
fn join_attack(
    state: &mut GalaxyState,
    fleet: FleetId,
    attack: MissionId,
    holder: Option<FleetId>,
    staging: Sector,
) {
    match holder {
        Some(holder) if state.fleet(holder).is_some_and(|f| f.sector == staging) => {
            if let Some(arrived) = state.remove_fleet(fleet)
                && let Some(attacking) = state.fleet_mut(holder)
            {
                tracing::debug!("{} merges into {} at {}", fleet, holder, staging);
                attacking.ships.extend(arrived.ships);
            }
        }
        Some(_) => {}
        None => {
            if state.assign_mission(attack, fleet) {
                tracing::debug!("{} takes over attack {}", fleet, attack);
            }
        }
    }
}

fn defend<M>(
    state: &mut GalaxyState,
    map: &M,
    step: Step,
    planet: PlanetId,
) -> Result<MissionOutcome, EngineError>
where
    M: MapOracle + ?Sized,
{
    if !state.planet(planet).is_some_and(|p| p.is_owned_by(step.realm)) {
        return Ok(step.cancel(state));
    }

    match step.phase {
        MissionPhase::Planning => {
            let outcome = step.enter(state, MissionPhase::Trekking)?;
            head_for(state, map, step.fleet, step.target);
            Ok(outcome)
        }
        MissionPhase::Trekking if step.arrived(state) => step.enter(state, MissionPhase::Executing),
        MissionPhase::Trekking => Ok(head_for(state, map, step.fleet, step.target)),
        MissionPhase::Executing if !step.arrived(state) => {
            Ok(head_for(state, map, step.fleet, step.target))
        }
        MissionPhase::Executing if gather_wanted(state, step) => Ok(step.complete(state)),
        MissionPhase::Executing => Ok(MissionOutcome::Holding),
        MissionPhase::Loading => Err(step.unsupported()),
    }
}

/// Whether an open gather order could use this defending fleet.
fn gather_wanted(state: &GalaxyState, step: Step) -> bool {
    let Some(fleet) = state.fleet(step.fleet) else {
        return false;
    };
    state.missions_of(step.realm).any(|m| {
        matches!(m.kind, MissionKind::Gather { role, .. } if m.is_unassigned() && fleet.has_role(role))
    })
}

fn travel<M>(state: &mut GalaxyState, map: &M, step: Step) -> Result<MissionOutcome, EngineError>
where
    M: MapOracle + ?Sized,
{
    match step.phase {
        MissionPhase::Trekking if step.arrived(state) => Ok(step.complete(state)),
        MissionPhase::Trekking => Ok(head_for(state, map, step.fleet, step.target)),
        MissionPhase::Planning | MissionPhase::Loading | MissionPhase::Executing => {
            Err(step.unsupported())
        }
    }
}

fn espionage<M>(
    state: &mut GalaxyState,
    map: &M,
    step: Step,
    planet: PlanetId,
) -> Result<MissionOutcome, EngineError>
where
    M: MapOracle + ?Sized,
{
    let Some(owner) = state
        .planet(planet)
        .and_then(|p| p.owner)
        .filter(|&owner| owner != step.realm)
    else {
        return Ok(step.cancel(state));
    };

    match step.phase {
        MissionPhase::Trekking if step.arrived(state) => step.enter(state, MissionPhase::Executing),
        MissionPhase::Trekking => Ok(head_for(state, map, step.fleet, step.target)),
        MissionPhase::Executing if !step.arrived(state) => {
            Ok(head_for(state, map, step.fleet, step.target))
        }
        MissionPhase::Executing => {
            if let Some(realm) = state.realm_mut(step.realm) {
                realm.bonus_mut(owner).intel += 1;
                realm.known_planets.insert(planet);
            }
            tracing::debug!("{} gathered intel on {}", step.realm, owner);
            Ok(step.complete(state))
        }
        MissionPhase::Planning | MissionPhase::Loading => Err(step.unsupported()),
    }
}
