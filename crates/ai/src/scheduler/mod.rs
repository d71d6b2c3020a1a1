//! Round-robin AI turn processing.
//!
//! One turn walks the realms in index order. For each AI realm:
//!
//! 1. every fleet in list order: merge co-located idle warships, assign a
//!    mission if it has none, advance the mission, then fight or besiege on
//!    contact
//! 2. contact scans: colonization targets, sighted foreign planets and
//!    border crossings
//!
//! Human realms are skipped. After the last realm the galaxy resolves and
//! the cursor returns to the first realm. Any step may hand control back with
//! [`TurnProgress::AwaitingHuman`]; the next call resumes from the cursor.

mod contact;
mod cursor;
mod engage;

pub use cursor::{CursorPhase, HumanPrompt, TurnCursor, TurnProgress};

use galaxy_core::{EngineError, FleetId, GalaxyEnv, GalaxyError, GalaxyState, resolve_galaxy};

use crate::error::{Result, SchedulerError};
use crate::missions::{MissionOutcome, MissionPlanner};

#[derive(Debug, Clone, Default)]
pub struct TurnScheduler {
    cursor: TurnCursor,
}

impl TurnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes a turn from a saved cursor.
    pub fn with_cursor(cursor: TurnCursor) -> Self {
        Self { cursor }
    }

    pub fn cursor(&self) -> TurnCursor {
        self.cursor
    }

    /// Runs steps until the turn finishes or a human prompt is raised.
    pub fn run_ai_turn(
        &mut self,
        state: &mut GalaxyState,
        env: &GalaxyEnv<'_>,
    ) -> Result<TurnProgress> {
        loop {
            let progress = self.step(state, env)?;
            if progress.yields() {
                return Ok(progress);
            }
        }
    }

    /// Performs one unit of work.
    ///
    /// # Errors
    ///
    /// Only fatal engine errors are returned. Failures of a single fleet or
    /// scan are logged and skipped.
    pub fn step(&mut self, state: &mut GalaxyState, env: &GalaxyEnv<'_>) -> Result<TurnProgress> {
        match self.cursor.phase {
            CursorPhase::Fleets => self.fleet_step(state, env),
            CursorPhase::Contacts => self.contact_step(state, env),
            CursorPhase::Resolution => self.resolution_step(state, env),
        }
    }

    fn fleet_step(&mut self, state: &mut GalaxyState, env: &GalaxyEnv<'_>) -> Result<TurnProgress> {
        let realm = self.cursor.realm;
        if realm.index() >= state.realms.len() {
            self.cursor.phase = CursorPhase::Resolution;
            return self.resolution_step(state, env);
        }

        let owner = &state.realms[realm.index()];
        if owner.is_human() {
            tracing::debug!("skipping human realm {}", realm);
            self.cursor.next_realm(state.realms.len());
            return Ok(TurnProgress::RealmFinished { realm });
        }

        let index = *self.cursor.fleet.get_or_insert(0);
        let Some(&fleet) = owner.fleets.get(index) else {
            self.cursor.phase = CursorPhase::Contacts;
            return self.contact_step(state, env);
        };
        let upcoming: Vec<FleetId> = owner.fleets[index + 1..].to_vec();

        let result = process_fleet(state, env, fleet);

        // Merges and losses may have shifted the list.
        let fleets = state
            .realm(realm)
            .ok_or(SchedulerError::UnknownRealm(realm))?
            .fleets
            .as_slice();
        let next = upcoming
            .iter()
            .find_map(|id| fleets.iter().position(|f| f == id))
            .unwrap_or(fleets.len());
        self.cursor.fleet = Some(next);

        match result {
            Ok((_, Some(prompt))) => Ok(TurnProgress::AwaitingHuman(prompt)),
            Ok((outcome, None)) => Ok(TurnProgress::FleetProcessed {
                realm,
                fleet,
                outcome: Some(outcome),
            }),
            Err(err) if err.is_fatal() => Err(err.into()),
            Err(err) => {
                tracing::warn!(
                    "{} of {} skipped: {} [{}]",
                    fleet,
                    realm,
                    err,
                    err.error_code()
                );
                Ok(TurnProgress::FleetProcessed {
                    realm,
                    fleet,
                    outcome: None,
                })
            }
        }
    }

    fn contact_step(
        &mut self,
        state: &mut GalaxyState,
        env: &GalaxyEnv<'_>,
    ) -> Result<TurnProgress> {
        let realm = self.cursor.realm;
        match contact::scan(state, env, realm) {
            Ok(Some(prompt)) => return Ok(TurnProgress::AwaitingHuman(prompt)),
            Ok(None) => {}
            Err(err) if err.is_fatal() => return Err(err.into()),
            Err(err) => tracing::warn!("contact scan of {} stopped: {}", realm, err),
        }
        self.cursor.next_realm(state.realms.len());
        Ok(TurnProgress::RealmFinished { realm })
    }

    fn resolution_step(
        &mut self,
        state: &mut GalaxyState,
        env: &GalaxyEnv<'_>,
    ) -> Result<TurnProgress> {
        let report = resolve_galaxy(state, env)?;
        tracing::info!(
            "turn {} begins: {} arrivals, {} blocked, {} news items",
            report.turn,
            report.arrived.len(),
            report.blocked.len(),
            report.news.len()
        );
        for (fleet, err) in &report.blocked {
            tracing::debug!("{} route cancelled: {}", fleet, err);
        }
        self.cursor = TurnCursor::start();
        Ok(TurnProgress::TurnFinished(report))
    }
}

/// Handles one fleet: merge, mission, then contact.
fn process_fleet(
    state: &mut GalaxyState,
    env: &GalaxyEnv<'_>,
    fleet: FleetId,
) -> std::result::Result<(MissionOutcome, Option<HumanPrompt>), EngineError> {
    engage::merge_colocated(state, fleet);
    MissionPlanner::assign_if_absent(state, env, fleet)?;
    let outcome = MissionPlanner::advance(state, env, fleet)?;

    if let MissionOutcome::Siege { mission, planet } = outcome
        && let Some(prompt) = engage::siege(state, env, fleet, mission, planet)?
    {
        return Ok((outcome, Some(prompt)));
    }
    let prompt = engage::skirmish(state, env, fleet)?;
    Ok((outcome, prompt))
}
