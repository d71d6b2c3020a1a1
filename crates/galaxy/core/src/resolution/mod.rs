//! End-of-turn galaxy resolution.
//!
//! Runs once every realm has finished its fleet pass:
//!
//! 1. visibility and transient messages reset
//! 2. fleets repair or travel, moves reset, sensors sweep
//! 3. planets produce, grow and rebroadcast culture
//! 4. the turn counter advances and the news feed closes
//! 5. research income is applied

pub mod culture;
pub mod movement;
pub mod news;
pub mod production;
pub mod repair;
pub mod research;
pub mod sensors;

pub use culture::{border_owner, broadcast_culture, influence_radius};
pub use movement::{MoveOutcome, advance_fleet, plot_route};
pub use news::{Ranking, close_news, digest_due, publish_digest};
pub use production::{PlanetYield, planet_yield, produce};
pub use repair::{RepairKind, has_repair_dock, repair_fleet};
pub use research::apply_research;
pub use sensors::{reset_visibility, reveal, scan_fleet, scan_planets};

use crate::env::GalaxyEnv;
use crate::error::EngineError;
use crate::state::{
    FleetId, GalaxyState, Message, MessageKind, NewsItem, RealmId, Route, TechCategory,
};

/// What happened during one galaxy resolution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolutionReport {
    /// Turn number after the counter advanced.
    pub turn: u32,
    pub arrived: Vec<FleetId>,
    /// Fleets whose route was cancelled, with the contained error.
    pub blocked: Vec<(FleetId, EngineError)>,
    pub repaired: Vec<(FleetId, RepairKind)>,
    pub idle: Vec<FleetId>,
    pub news: Vec<NewsItem>,
    pub advances: Vec<(RealmId, TechCategory)>,
}

/// Resolves the whole galaxy for one turn.
///
/// # Errors
///
/// Only fatal errors (a missing oracle) are returned; blocked routes are
/// recorded in the report.
pub fn resolve_galaxy(
    state: &mut GalaxyState,
    env: &GalaxyEnv<'_>,
) -> Result<ResolutionReport, EngineError> {
    let map = env.map()?;
    let config = env.config()?;
    let mut report = ResolutionReport::default();

    reset_visibility(state);

    let fleets: Vec<FleetId> = state.fleets.keys().copied().collect();
    for id in fleets {
        let Some(fleet) = state.fleet(id) else {
            continue;
        };
        match fleet.route {
            Some(Route::Repair) => {
                let kind = repair_fleet(state, id)?;
                report.repaired.push((id, kind));
            }
            Some(Route::Travel { .. }) => match advance_fleet(state, map, id) {
                Ok(MoveOutcome::Arrived { .. }) => report.arrived.push(id),
                Ok(_) => {}
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => report.blocked.push((id, err)),
            },
            None => {
                let (owner, sector, name) = (fleet.owner, fleet.sector, fleet.name.clone());
                state.notify(
                    owner,
                    Message::new(MessageKind::Fleet, format!("{name} is waiting for orders"))
                        .at(sector),
                );
                report.idle.push(id);
            }
        }

        if let Some(fleet) = state.fleet_mut(id) {
            fleet.reset_moves();
        }
        scan_fleet(state, map, id);
    }
    scan_planets(state, map, config);

    produce(state, config);
    broadcast_culture(state, config);

    state.turn += 1;
    report.turn = state.turn;
    report.news = close_news(state, config);
    report.advances = apply_research(state, config);

    Ok(report)
}
