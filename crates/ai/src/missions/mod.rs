//! Per-fleet AI intent.
//!
//! Every AI fleet follows at most one [`Mission`](galaxy_core::Mission).
//! [`MissionPlanner`] hands out missions to idle fleets, stages attacks and
//! drives each mission kind through its phases:
//!
//! | Kind      | Phases                                   |
//! |-----------|------------------------------------------|
//! | Explore   | Trekking → Executing                     |
//! | Colonize  | Planning → Loading → Trekking → Executing |
//! | Attack    | Planning → Trekking → Executing          |
//! | Gather    | Planning → Trekking                      |
//! | Defend    | Planning → Trekking → Executing          |
//! | Move      | Trekking                                 |
//! | Espionage | Trekking → Executing                     |
//!
//! Missions only set routes; fleets move during galaxy resolution.

mod assign;
mod attack;
mod handlers;
mod repair;

pub use attack::gather_mix;

use galaxy_core::resolution::plot_route;
use galaxy_core::{
    EngineError, FleetId, GalaxyState, MapOracle, MissionId, MissionPhase, PlanetId, Route,
    Sector,
};

/// Mission assignment and phase handling for AI fleets.
#[derive(Debug, Clone, Copy, Default)]
pub struct MissionPlanner;

/// What one `advance` call did to a fleet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissionOutcome {
    /// The fleet has no mission.
    NoMission,
    /// The fleet was sent to repair; its mission is kept.
    Repairing,
    /// Nothing to do this turn.
    Holding,
    Routed {
        destination: Sector,
    },
    Promoted {
        mission: MissionId,
        from: MissionPhase,
        to: MissionPhase,
    },
    Completed {
        mission: MissionId,
    },
    Cancelled {
        mission: MissionId,
    },
    /// The fleet is over its target and ready to besiege it.
    Siege {
        mission: MissionId,
        planet: PlanetId,
    },
}

/// Moves a mission forward, returning the phase it left.
fn promote(
    state: &mut GalaxyState,
    mission: MissionId,
    phase: MissionPhase,
) -> Result<MissionPhase, EngineError> {
    let current = state
        .mission_mut(mission)
        .ok_or(EngineError::invalid_mission(mission))?;
    let from = current.phase();
    current.promote(phase)?;
    Ok(from)
}

/// Points the fleet's route at `target` unless it already heads there.
fn head_for<M>(state: &mut GalaxyState, map: &M, fleet: FleetId, target: Sector) -> MissionOutcome
where
    M: MapOracle + ?Sized,
{
    let Some(current) = state.fleet_mut(fleet) else {
        return MissionOutcome::Holding;
    };
    if current.sector == target {
        current.route = None;
        return MissionOutcome::Holding;
    }
    let heading = current.route.as_ref().and_then(Route::destination);
    if heading != Some(target) {
        current.route = Some(plot_route(map, current.sector, target));
    }
    MissionOutcome::Routed {
        destination: target,
    }
}
