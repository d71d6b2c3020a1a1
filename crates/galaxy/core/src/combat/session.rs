//! Resumable ship-to-ship engagement between two fleets.
//!
//! A session owns only transient round state. Ships, pools and fleet
//! membership stay in [`GalaxyState`], so every command re-reads the galaxy
//! and tolerates ships that vanished in the meantime.

use std::collections::BTreeSet;

use crate::env::{ConfigOracle, GalaxyEnv, RngOracle};
use crate::error::{EngineError, TargetRef};
use crate::state::{
    ComponentKind, FleetId, GalaxyState, Message, MessageKind, RealmId, Sector, ShipId,
};

use super::damage::{HitReport, apply_hit, check_hit};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Attacker,
    Defender,
}

impl Side {
    pub const fn opponent(self) -> Self {
        match self {
            Self::Attacker => Self::Defender,
            Self::Defender => Self::Attacker,
        }
    }
}

/// One entry of the turn queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub side: Side,
    pub fleet: FleetId,
    pub ship: ShipId,
    pub tactic_speed: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatStatus {
    Ongoing,
    AttackerWon,
    DefenderWon,
    /// Round cap reached with both sides standing.
    Draw,
    Aborted,
}

impl CombatStatus {
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::Ongoing)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    RoundStarted {
        round: u32,
    },
    Missed {
        ship: ShipId,
        component: usize,
        target: ShipId,
    },
    Hit {
        ship: ShipId,
        component: usize,
        target: ShipId,
        report: HitReport,
    },
    ShipDestroyed {
        ship: ShipId,
        fleet: FleetId,
    },
    Finished {
        status: CombatStatus,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatSession {
    sector: Sector,
    fleets: [FleetId; 2],
    realms: [RealmId; 2],
    queue: Vec<Combatant>,
    current: usize,
    round: u32,
    /// Components fired this round, keyed by ship and component index.
    used: BTreeSet<(ShipId, usize)>,
    /// Remaining AI animation delay before the current ship's turn ends.
    delay: u32,
    status: CombatStatus,
    /// Destroyed ships awaiting bookkeeping: (owner, destroyed by).
    casualties: Vec<(RealmId, RealmId)>,
    events: Vec<CombatEvent>,
    finalized: bool,
}

impl CombatSession {
    /// Opens an engagement between two fleets.
    ///
    /// The turn queue holds every ship of both fleets, fastest first; ties go
    /// to the attacker, then to fleet order. A side that has no ship standing
    /// ends the engagement before the first shot, finalized as usual.
    pub fn begin(
        state: &mut GalaxyState,
        attacker: FleetId,
        defender: FleetId,
    ) -> Result<Self, EngineError> {
        let attacking = state
            .fleet(attacker)
            .ok_or(EngineError::invalid_fleet(attacker))?;
        let defending = state
            .fleet(defender)
            .ok_or(EngineError::invalid_fleet(defender))?;

        let mut queue: Vec<Combatant> = [(Side::Attacker, attacking), (Side::Defender, defending)]
            .into_iter()
            .flat_map(|(side, fleet)| {
                fleet.ships.iter().map(move |ship| Combatant {
                    side,
                    fleet: fleet.id,
                    ship: ship.id,
                    tactic_speed: ship.tactic_speed,
                })
            })
            .collect();
        queue.sort_by_key(|c| (std::cmp::Reverse(c.tactic_speed), c.side));

        let mut session = Self {
            sector: defending.sector,
            fleets: [attacker, defender],
            realms: [attacking.owner, defending.owner],
            queue,
            current: 0,
            round: 1,
            used: BTreeSet::new(),
            delay: 0,
            status: CombatStatus::Ongoing,
            casualties: Vec::new(),
            events: vec![CombatEvent::RoundStarted { round: 1 }],
            finalized: false,
        };
        session.status = session.evaluate(state);
        if session.status.is_finished() {
            session.finalize(state);
        }
        Ok(session)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn status(&self) -> CombatStatus {
        self.status
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn sector(&self) -> Sector {
        self.sector
    }

    pub fn fleet(&self, side: Side) -> FleetId {
        self.fleets[side as usize]
    }

    pub fn realm(&self, side: Side) -> RealmId {
        self.realms[side as usize]
    }

    pub fn queue(&self) -> &[Combatant] {
        &self.queue
    }

    /// The ship whose turn it is.
    pub fn current(&self) -> Option<Combatant> {
        if self.status.is_finished() {
            return None;
        }
        self.queue.get(self.current).copied()
    }

    pub fn is_used(&self, ship: ShipId, component: usize) -> bool {
        self.used.contains(&(ship, component))
    }

    /// True when the current ship is waiting for human orders.
    pub fn awaiting_human(&self, state: &GalaxyState) -> bool {
        self.current()
            .and_then(|c| state.realm(self.realm(c.side)))
            .is_some_and(|realm| realm.is_human())
    }

    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// One animation tick.
    ///
    /// An AI ship fires its weapons on its first tick, then waits out the
    /// configured delay before handing over. Human ships wait for commands.
    pub fn tick(
        &mut self,
        state: &mut GalaxyState,
        env: &GalaxyEnv<'_>,
    ) -> Result<CombatStatus, EngineError> {
        if self.status.is_finished() {
            return Ok(self.status);
        }

        if self.delay > 0 {
            self.delay -= 1;
            if self.delay == 0 {
                self.advance(state, env)?;
            }
            return Ok(self.status);
        }

        if self.awaiting_human(state) {
            return Ok(self.status);
        }

        self.ai_volley(state, env)?;
        if self.status.is_finished() {
            return Ok(self.status);
        }

        self.delay = env.config()?.ai_delay_ticks();
        if self.delay == 0 {
            self.advance(state, env)?;
        }
        Ok(self.status)
    }

    /// Fires one weapon of the current ship at `target`.
    ///
    /// # Errors
    ///
    /// * `SessionFinished` once the engagement is over
    /// * `ComponentUnavailable` for a used, destroyed or non-weapon component
    /// * `InvalidTarget` when the target is not a surviving enemy ship
    pub fn fire(
        &mut self,
        state: &mut GalaxyState,
        env: &GalaxyEnv<'_>,
        component: usize,
        target: ShipId,
    ) -> Result<CombatStatus, EngineError> {
        let shooter = self.current().ok_or(EngineError::SessionFinished)?;
        self.fire_from(state, env, shooter, component, target)?;
        Ok(self.status)
    }

    /// Ends the current ship's turn.
    pub fn end_turn(
        &mut self,
        state: &mut GalaxyState,
        env: &GalaxyEnv<'_>,
    ) -> Result<CombatStatus, EngineError> {
        if self.status.is_finished() {
            return Err(EngineError::SessionFinished);
        }
        self.delay = 0;
        self.advance(state, env)?;
        Ok(self.status)
    }

    /// Runs the engagement to completion without pacing.
    ///
    /// Every ship, including human-controlled ones, fires with the AI
    /// targeting rule.
    pub fn resolve(
        &mut self,
        state: &mut GalaxyState,
        env: &GalaxyEnv<'_>,
    ) -> Result<CombatStatus, EngineError> {
        self.delay = 0;
        while !self.status.is_finished() {
            self.ai_volley(state, env)?;
            if self.status.is_finished() {
                break;
            }
            self.advance(state, env)?;
        }
        Ok(self.status)
    }

    /// Stops the engagement. Transient state is finalized as on a natural end.
    pub fn abort(&mut self, state: &mut GalaxyState) -> CombatStatus {
        if !self.status.is_finished() {
            self.status = CombatStatus::Aborted;
        }
        self.finalize(state);
        self.status
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn fire_from(
        &mut self,
        state: &mut GalaxyState,
        env: &GalaxyEnv<'_>,
        shooter: Combatant,
        index: usize,
        target: ShipId,
    ) -> Result<(), EngineError> {
        let unavailable = EngineError::ComponentUnavailable {
            ship: shooter.ship,
            index,
        };

        let ship = state
            .fleet(shooter.fleet)
            .and_then(|fleet| fleet.ship(shooter.ship))
            .ok_or(EngineError::InvalidTarget(TargetRef::Ship(shooter.ship)))?;
        let component = ship.components.get(index).ok_or(unavailable.clone())?;
        let ComponentKind::Weapon(weapon) = component.kind else {
            return Err(unavailable);
        };
        if !component.is_working() || self.is_used(shooter.ship, index) {
            return Err(unavailable);
        }
        let power = component.damage;

        let enemy = self.fleet(shooter.side.opponent());
        if state.fleet(enemy).and_then(|f| f.ship(target)).is_none() {
            return Err(EngineError::InvalidTarget(TargetRef::Ship(target)));
        }

        let rng = env.rng()?;
        self.used.insert((shooter.ship, index));

        let roll = rng.roll_d100(state.next_seed(shooter.ship.0, index as u32));
        if !check_hit(weapon, roll) {
            self.events.push(CombatEvent::Missed {
                ship: shooter.ship,
                component: index,
                target,
            });
            return Ok(());
        }

        let seed = state.next_seed(target.0, index as u32);
        let Some(victim) = state.fleet_mut(enemy).and_then(|f| f.ship_mut(target)) else {
            return Err(EngineError::InvalidTarget(TargetRef::Ship(target)));
        };
        let report = apply_hit(victim, power, rng, seed);
        self.events.push(CombatEvent::Hit {
            ship: shooter.ship,
            component: index,
            target,
            report,
        });

        if report.destroyed {
            self.destroy(state, shooter.side.opponent(), target);
            let status = self.evaluate(state);
            if status.is_finished() {
                self.status = status;
                self.finalize(state);
            }
        }
        Ok(())
    }

    /// Fires every ready weapon of the current ship at the weakest enemy.
    fn ai_volley(
        &mut self,
        state: &mut GalaxyState,
        env: &GalaxyEnv<'_>,
    ) -> Result<(), EngineError> {
        let Some(shooter) = self.current() else {
            return Ok(());
        };
        let weapons: Vec<usize> = match state.fleet(shooter.fleet).and_then(|f| f.ship(shooter.ship))
        {
            Some(ship) => ship
                .components
                .iter()
                .enumerate()
                .filter(|(_, c)| c.kind.is_weapon() && c.is_working())
                .map(|(index, _)| index)
                .collect(),
            None => return Ok(()),
        };

        for index in weapons {
            if self.status.is_finished() {
                break;
            }
            if self.is_used(shooter.ship, index) {
                continue;
            }
            let Some(target) = self.weakest_enemy(state, shooter.side) else {
                break;
            };
            match self.fire_from(state, env, shooter, index, target) {
                Ok(()) => {}
                Err(err) if err.is_fatal() => return Err(err),
                Err(_) => continue,
            }
        }
        Ok(())
    }

    fn weakest_enemy(&self, state: &GalaxyState, side: Side) -> Option<ShipId> {
        state
            .fleet(self.fleet(side.opponent()))?
            .ships
            .iter()
            .filter(|ship| !ship.is_destroyed())
            .min_by_key(|ship| ship.hull_points())
            .map(|ship| ship.id)
    }

    fn destroy(&mut self, state: &mut GalaxyState, side: Side, ship: ShipId) {
        let fleet = self.fleet(side);
        if let Some(f) = state.fleet_mut(fleet) {
            f.remove_ship(ship);
        }
        if let Some(position) = self.queue.iter().position(|c| c.ship == ship) {
            self.queue.remove(position);
            if position < self.current {
                self.current -= 1;
            }
        }
        self.casualties
            .push((self.realm(side), self.realm(side.opponent())));
        self.events.push(CombatEvent::ShipDestroyed { ship, fleet });
    }

    /// Hands the turn to the next ship, starting a new round after the last.
    fn advance(
        &mut self,
        state: &mut GalaxyState,
        env: &GalaxyEnv<'_>,
    ) -> Result<(), EngineError> {
        if self.status.is_finished() {
            return Ok(());
        }

        self.current += 1;
        if self.current < self.queue.len() {
            return Ok(());
        }

        self.round += 1;
        if self.round > env.config()?.max_combat_rounds() {
            self.status = CombatStatus::Draw;
            self.finalize(state);
            return Ok(());
        }

        self.current = 0;
        self.used.clear();
        for fleet in self.fleets {
            if let Some(fleet) = state.fleet_mut(fleet) {
                fleet.ships.iter_mut().for_each(|ship| ship.recharge_shields());
            }
        }
        self.events.push(CombatEvent::RoundStarted { round: self.round });
        Ok(())
    }

    fn evaluate(&self, state: &GalaxyState) -> CombatStatus {
        let standing = |side: Side| {
            state
                .fleet(self.fleet(side))
                .is_some_and(|fleet| fleet.ships.iter().any(|ship| !ship.is_destroyed()))
        };
        match (standing(Side::Attacker), standing(Side::Defender)) {
            (true, true) => CombatStatus::Ongoing,
            (true, false) => CombatStatus::AttackerWon,
            (false, _) => CombatStatus::DefenderWon,
        }
    }

    /// Clears round state, books losses and removes emptied fleets.
    ///
    /// Runs once, whether the engagement ended naturally or was aborted.
    fn finalize(&mut self, state: &mut GalaxyState) {
        if self.finalized {
            return;
        }
        self.finalized = true;
        self.used.clear();
        self.delay = 0;

        for (owner, killer) in self.casualties.drain(..) {
            state.record_ship_loss(owner, Some(killer));
        }

        for fleet in self.fleets {
            if state.fleet(fleet).is_some_and(|f| f.is_empty()) {
                state.remove_fleet(fleet);
            }
        }

        let summary = match self.status {
            CombatStatus::AttackerWon | CombatStatus::DefenderWon => {
                let winner = if self.status == CombatStatus::AttackerWon {
                    Side::Attacker
                } else {
                    Side::Defender
                };
                let name = state
                    .realm(self.realm(winner))
                    .map(|realm| realm.name.clone())
                    .unwrap_or_default();
                format!("Battle at {} won by {name}", self.sector)
            }
            CombatStatus::Draw => format!("Battle at {} ended in a stalemate", self.sector),
            CombatStatus::Aborted => format!("Retreat from battle at {}", self.sector),
            CombatStatus::Ongoing => return,
        };
        for realm in self.realms {
            state.notify(
                realm,
                Message::new(MessageKind::Combat, summary.clone()).at(self.sector),
            );
        }
        self.events.push(CombatEvent::Finished {
            status: self.status,
        });
    }
}
