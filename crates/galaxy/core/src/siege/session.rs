//! Resumable bombing and invasion run of one fleet against one planet.

use std::collections::{BTreeMap, BTreeSet};

use crate::combat::{HitReport, apply_hit};
use crate::config::GalaxyConfig;
use crate::env::{ConfigOracle, GalaxyEnv, RngOracle};
use crate::error::{EngineError, TargetRef};
use crate::ownership::{TransferCause, TransferReport, transfer_planet};
use crate::state::{
    ComponentKind, FleetId, GalaxyState, Message, MessageKind, PlanetId, RaceTraits, RealmId,
    Ship, ShipId,
};

use super::effects::{SiegeEffect, bomb_strike, nuke_strike, weapon_strike};
use super::invasion::{InvasionOdds, settled_population};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SiegeStatus {
    Ongoing,
    /// The attacker took the planet.
    Conquered,
    /// The planet lost its last worker with no trooper left to land.
    Depopulated,
    /// Every ship spent its actions or stalled.
    Exhausted,
    /// The turret destroyed the whole fleet.
    Repelled,
    Aborted,
}

impl SiegeStatus {
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::Ongoing)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SiegeEvent {
    TurretFired {
        ship: ShipId,
        report: HitReport,
    },
    ShipLost {
        ship: ShipId,
    },
    ComponentUsed {
        ship: ShipId,
        component: usize,
        kind: ComponentKind,
        effects: Vec<SiegeEffect>,
    },
    OwnershipChanged(TransferReport),
    Finished {
        status: SiegeStatus,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SiegeSession {
    fleet: FleetId,
    planet: PlanetId,
    attacker: RealmId,
    /// Attacking ships in fleet order at the start of the siege.
    ships: Vec<ShipId>,
    /// Actions left per ship for the whole siege.
    budgets: BTreeMap<ShipId, u32>,
    current: usize,
    /// Components of the current ship used in the current cycle.
    used: BTreeSet<usize>,
    /// Whether the current pass over the fleet changed anything on the planet.
    pass_effective: bool,
    status: SiegeStatus,
    log: Vec<SiegeEvent>,
    finalized: bool,
}

impl SiegeSession {
    /// Opens a siege. Each ship gets `tactic_speed × 4` actions.
    pub fn begin(
        state: &GalaxyState,
        fleet: FleetId,
        planet: PlanetId,
    ) -> Result<Self, EngineError> {
        let attacking = state.fleet(fleet).ok_or(EngineError::invalid_fleet(fleet))?;
        state
            .planet(planet)
            .ok_or(EngineError::invalid_planet(planet))?;

        let ships: Vec<ShipId> = attacking.ships.iter().map(|ship| ship.id).collect();
        let budgets = attacking
            .ships
            .iter()
            .map(|ship| {
                (
                    ship.id,
                    ship.tactic_speed * GalaxyConfig::SIEGE_ACTIONS_PER_TACTIC_SPEED,
                )
            })
            .collect();

        Ok(Self {
            fleet,
            planet,
            attacker: attacking.owner,
            ships,
            budgets,
            current: 0,
            used: BTreeSet::new(),
            pass_effective: false,
            status: SiegeStatus::Ongoing,
            log: Vec::new(),
            finalized: false,
        })
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn status(&self) -> SiegeStatus {
        self.status
    }

    pub fn fleet(&self) -> FleetId {
        self.fleet
    }

    pub fn planet(&self) -> PlanetId {
        self.planet
    }

    pub fn attacker(&self) -> RealmId {
        self.attacker
    }

    pub fn current_ship(&self) -> Option<ShipId> {
        if self.status.is_finished() {
            return None;
        }
        self.ships.get(self.current).copied()
    }

    pub fn remaining_actions(&self, ship: ShipId) -> u32 {
        self.budgets.get(&ship).copied().unwrap_or(0)
    }

    pub fn is_used(&self, component: usize) -> bool {
        self.used.contains(&component)
    }

    pub fn awaiting_human(&self, state: &GalaxyState) -> bool {
        !self.status.is_finished() && state.realm(self.attacker).is_some_and(|r| r.is_human())
    }

    pub fn log(&self) -> &[SiegeEvent] {
        &self.log
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// Uses component `index` of the current ship (human selection).
    ///
    /// # Errors
    ///
    /// * `SessionFinished` once the siege is over
    /// * `ComponentUnavailable` for destroyed, non-siege or already used components
    /// * `InsufficientResource` when the ship is out of actions or an
    ///   invasion module has no colonists aboard
    pub fn use_component(
        &mut self,
        state: &mut GalaxyState,
        env: &GalaxyEnv<'_>,
        index: usize,
    ) -> Result<SiegeStatus, EngineError> {
        let ship_id = self.current_ship().ok_or(EngineError::SessionFinished)?;
        if self.remaining_actions(ship_id) == 0 {
            return Err(EngineError::InsufficientResource {
                resource: "actions",
                action: "siege",
            });
        }

        let ship = self.ship(state, ship_id)?;
        let open = self.open_components(ship);
        let component = ship.components.get(index).ok_or(EngineError::ComponentUnavailable {
            ship: ship_id,
            index,
        })?;
        if let Err(err) = usable(ship, index) {
            if component.kind == ComponentKind::PlanetaryInvasion {
                self.log_no_effect(ship_id, index, component.kind);
            }
            return Err(err);
        }
        if open.is_empty() {
            self.start_cycle();
        } else if self.used.contains(&index) {
            return Err(EngineError::ComponentUnavailable {
                ship: ship_id,
                index,
            });
        }

        self.act(state, env, ship_id, index)?;
        Ok(self.status)
    }

    /// Passes the turn to the next attacking ship.
    pub fn end_ship_turn(&mut self, state: &mut GalaxyState) -> Result<SiegeStatus, EngineError> {
        if self.status.is_finished() {
            return Err(EngineError::SessionFinished);
        }
        self.next_ship(state);
        Ok(self.status)
    }

    /// Performs one AI action: the next usable component in index order.
    pub fn step_ai(
        &mut self,
        state: &mut GalaxyState,
        env: &GalaxyEnv<'_>,
    ) -> Result<SiegeStatus, EngineError> {
        if self.status.is_finished() {
            return Ok(self.status);
        }
        let Some(ship_id) = self.current_ship() else {
            self.next_ship(state);
            return Ok(self.status);
        };
        if self.remaining_actions(ship_id) == 0 {
            self.next_ship(state);
            return Ok(self.status);
        }
        let Ok(ship) = self.ship(state, ship_id) else {
            self.next_ship(state);
            return Ok(self.status);
        };

        let mut open = self.open_components(ship);
        if open.is_empty() {
            let starved = ship
                .components
                .iter()
                .position(|c| c.kind == ComponentKind::PlanetaryInvasion && c.is_working())
                .filter(|_| ship.cargo.colonists == 0);
            let nothing_usable = self.used.is_empty();

            if let Some(index) = starved {
                self.log_no_effect(ship_id, index, ComponentKind::PlanetaryInvasion);
            }
            if nothing_usable {
                self.next_ship(state);
                return Ok(self.status);
            }
            self.start_cycle();
            open = self.open_components(self.ship(state, ship_id)?);
        }

        match open.first() {
            Some(&index) => self.act(state, env, ship_id, index)?,
            None => self.next_ship(state),
        }
        Ok(self.status)
    }

    /// Runs the siege to completion with AI component selection.
    pub fn resolve(
        &mut self,
        state: &mut GalaxyState,
        env: &GalaxyEnv<'_>,
    ) -> Result<SiegeStatus, EngineError> {
        while !self.status.is_finished() {
            self.step_ai(state, env)?;
        }
        Ok(self.status)
    }

    pub fn abort(&mut self, state: &mut GalaxyState) -> SiegeStatus {
        if !self.status.is_finished() {
            self.status = SiegeStatus::Aborted;
        }
        self.finalize(state);
        self.status
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn ship<'s>(&self, state: &'s GalaxyState, ship: ShipId) -> Result<&'s Ship, EngineError> {
        state
            .fleet(self.fleet)
            .and_then(|fleet| fleet.ship(ship))
            .ok_or(EngineError::InvalidTarget(TargetRef::Ship(ship)))
    }

    /// Usable components not yet used in this cycle.
    fn open_components(&self, ship: &Ship) -> Vec<usize> {
        (0..ship.components.len())
            .filter(|&index| usable(ship, index).is_ok() && !self.used.contains(&index))
            .collect()
    }

    fn start_cycle(&mut self) {
        self.used.clear();
    }

    /// Opens another pass over the fleet when the last one changed something
    /// and a ship still has actions left.
    fn start_pass(&mut self, state: &GalaxyState) -> bool {
        let actions_left = self
            .ships
            .iter()
            .any(|&ship| self.remaining_actions(ship) > 0 && self.ship(state, ship).is_ok());
        if !self.pass_effective || !actions_left {
            return false;
        }
        self.pass_effective = false;
        true
    }

    fn log_no_effect(&mut self, ship: ShipId, component: usize, kind: ComponentKind) {
        self.log.push(SiegeEvent::ComponentUsed {
            ship,
            component,
            kind,
            effects: vec![SiegeEffect::NoEffect],
        });
    }

    /// Turret volley, then the component's effect.
    fn act(
        &mut self,
        state: &mut GalaxyState,
        env: &GalaxyEnv<'_>,
        ship_id: ShipId,
        index: usize,
    ) -> Result<(), EngineError> {
        let rng = env.rng()?;
        let (turret, defender) = {
            let planet = state
                .planet(self.planet)
                .ok_or(EngineError::invalid_planet(self.planet))?;
            (planet.turret_level, planet.owner)
        };

        if turret > 0 {
            let seed = state.next_seed(self.planet.0, turret);
            let ship = state
                .fleet_mut(self.fleet)
                .and_then(|fleet| fleet.ship_mut(ship_id))
                .ok_or(EngineError::InvalidTarget(TargetRef::Ship(ship_id)))?;
            let report = apply_hit(ship, turret, rng, seed);
            self.log.push(SiegeEvent::TurretFired {
                ship: ship_id,
                report,
            });
            if report.destroyed {
                self.lose_ship(state, ship_id, defender);
                return Ok(());
            }
        }

        let (kind, damage) = {
            let component = self
                .ship(state, ship_id)?
                .components
                .get(index)
                .ok_or(EngineError::ComponentUnavailable {
                    ship: ship_id,
                    index,
                })?;
            (component.kind, component.damage)
        };

        self.used.insert(index);
        if let Some(budget) = self.budgets.get_mut(&ship_id) {
            *budget = budget.saturating_sub(1);
        }

        let shielded = state
            .planet(self.planet)
            .is_some_and(|planet| planet.bombing_shield);
        let effects = if shielded {
            vec![SiegeEffect::Shielded]
        } else {
            self.strike(state, env, ship_id, index, kind, damage)?
        };
        if effects.iter().any(SiegeEffect::is_effective) {
            self.pass_effective = true;
        }
        self.log.push(SiegeEvent::ComponentUsed {
            ship: ship_id,
            component: index,
            kind,
            effects,
        });

        self.check_end(state, env)?;
        if !self.status.is_finished() && self.remaining_actions(ship_id) == 0 {
            self.next_ship(state);
        }
        Ok(())
    }

    fn strike(
        &mut self,
        state: &mut GalaxyState,
        env: &GalaxyEnv<'_>,
        ship_id: ShipId,
        index: usize,
        kind: ComponentKind,
        damage: u32,
    ) -> Result<Vec<SiegeEffect>, EngineError> {
        let rng = env.rng()?;
        let roll = rng.roll_d100(state.next_seed(ship_id.0, index as u32));
        let pick = rng.next_u32(state.next_seed(self.planet.0, index as u32));
        let planet = state
            .planet_mut(self.planet)
            .ok_or(EngineError::invalid_planet(self.planet))?;

        let effects = match kind {
            ComponentKind::Weapon(weapon) => weapon_strike(planet, weapon, damage, roll, pick),
            ComponentKind::OrbitalBomb => vec![bomb_strike(planet, damage, roll, pick)],
            ComponentKind::OrbitalNuke => {
                let effect = nuke_strike(planet, damage, pick);
                self.condemn_nuclear_strike(state);
                vec![effect]
            }
            ComponentKind::PlanetaryInvasion => vec![self.invade(state, env, ship_id, damage)?],
            ComponentKind::Shield
            | ComponentKind::Armor
            | ComponentKind::Engine
            | ComponentKind::ColonyModule
            | ComponentKind::CargoBay
            | ComponentKind::Scanner
            | ComponentKind::EspionageModule
            | ComponentKind::PrivateerModule => {
                return Err(EngineError::ComponentUnavailable {
                    ship: ship_id,
                    index,
                });
            }
        };
        Ok(effects)
    }

    fn condemn_nuclear_strike(&self, state: &mut GalaxyState) {
        let attacker = self.attacker;
        for realm in &mut state.realms {
            if realm.id == attacker {
                realm.reputation -= GalaxyConfig::NUKE_REPUTATION_PENALTY;
            } else {
                realm.bonus_mut(attacker).opinion -= GalaxyConfig::NUKE_OPINION_PENALTY;
            }
        }
    }

    fn invade(
        &mut self,
        state: &mut GalaxyState,
        env: &GalaxyEnv<'_>,
        ship_id: ShipId,
        bonus: u32,
    ) -> Result<SiegeEffect, EngineError> {
        let colonists = self.ship(state, ship_id)?.cargo.colonists;
        let (defender, troop_power, suppression, max_population, sector, name) = {
            let planet = state
                .planet(self.planet)
                .ok_or(EngineError::invalid_planet(self.planet))?;
            (
                planet.owner,
                planet.troop_power(state.race_power(planet.owner)),
                planet.suppression,
                planet.max_population,
                planet.sector,
                planet.name.clone(),
            )
        };
        let race_power = state.race_power(Some(self.attacker));
        let odds = InvasionOdds::new(race_power, colonists, bonus, troop_power, suppression);

        if let Some(ship) = state
            .fleet_mut(self.fleet)
            .and_then(|fleet| fleet.ship_mut(ship_id))
        {
            ship.cargo.colonists = 0;
        }

        if !odds.succeeds() {
            state.notify(
                self.attacker,
                Message::new(MessageKind::Combat, format!("Our troops were repelled on {name}"))
                    .at(sector),
            );
            if let Some(owner) = defender {
                state.notify(
                    owner,
                    Message::new(MessageKind::Combat, format!("{name} repelled an invasion"))
                        .at(sector),
                );
            }
            return Ok(SiegeEffect::InvasionFailed {
                ship_troops: odds.ship_troops,
                planet_troops: odds.planet_troops,
            });
        }

        let config = env.config()?;
        let report = transfer_planet(
            state,
            config,
            self.planet,
            Some(self.attacker),
            TransferCause::Conquest,
        )?;
        self.log.push(SiegeEvent::OwnershipChanged(report));

        let mut population = settled_population(odds.remaining(), race_power, max_population);
        let traits = state
            .realm(self.attacker)
            .map(|realm| realm.race.traits)
            .unwrap_or_default();

        if traits.contains(RaceTraits::TECH_THEFT) {
            self.steal_technology(state, env, defender)?;
        }
        if let Some(planet) = state.planet_mut(self.planet) {
            if traits.contains(RaceTraits::ORBITAL_DWELLERS) && !planet.orbital_habitat {
                planet.orbital_habitat = true;
                planet.max_population += 2;
            }
            if traits.contains(RaceTraits::SYNTHETIC) {
                population = (population + 1).min(planet.max_population);
            }
            planet.population = population;
        }

        self.status = SiegeStatus::Conquered;
        Ok(SiegeEffect::InvasionSucceeded {
            ship_troops: odds.ship_troops,
            planet_troops: odds.planet_troops,
            population,
        })
    }

    /// Copies one level of the first technology the defender leads in.
    fn steal_technology(
        &self,
        state: &mut GalaxyState,
        env: &GalaxyEnv<'_>,
        defender: Option<RealmId>,
    ) -> Result<(), EngineError> {
        let Some(defender) = defender.and_then(|id| state.realm(id)).map(|r| r.tech.clone())
        else {
            return Ok(());
        };
        let roll = env
            .rng()?
            .roll_d100(state.next_seed(self.attacker.0, self.planet.0));
        if roll > 50 {
            return Ok(());
        }
        if let Some(realm) = state.realm_mut(self.attacker)
            && let Some(category) = realm.tech.first_behind(&defender)
        {
            let level = realm.tech.level(category);
            realm.tech.set_level(category, level + 1);
            realm.notify(Message::new(
                MessageKind::Research,
                format!("Captured research advanced our {} technology", <&str>::from(category)),
            ));
        }
        Ok(())
    }

    fn lose_ship(&mut self, state: &mut GalaxyState, ship: ShipId, killer: Option<RealmId>) {
        if let Some(fleet) = state.fleet_mut(self.fleet) {
            fleet.remove_ship(ship);
        }
        state.record_ship_loss(self.attacker, killer);
        self.log.push(SiegeEvent::ShipLost { ship });

        let fleet_left = state.fleet(self.fleet).is_some_and(|f| !f.is_empty());
        if fleet_left {
            self.next_ship(state);
        } else {
            self.status = SiegeStatus::Repelled;
            self.finalize(state);
        }
    }

    fn check_end(&mut self, state: &mut GalaxyState, env: &GalaxyEnv<'_>) -> Result<(), EngineError> {
        if self.status.is_finished() {
            self.finalize(state);
            return Ok(());
        }

        let (population, owner) = match state.planet(self.planet) {
            Some(planet) => (planet.population, planet.owner),
            None => return Err(EngineError::invalid_planet(self.planet)),
        };
        let trooper_left = state.fleet(self.fleet).is_some_and(|f| f.can_invade());

        if population == 0 && !trooper_left {
            if owner.is_some() {
                let report = transfer_planet(
                    state,
                    env.config()?,
                    self.planet,
                    None,
                    TransferCause::Depopulation,
                )?;
                self.log.push(SiegeEvent::OwnershipChanged(report));
            }
            self.status = SiegeStatus::Depopulated;
            self.finalize(state);
        }
        Ok(())
    }

    /// Moves to the next ship with actions left, wrapping into a new pass.
    fn next_ship(&mut self, state: &mut GalaxyState) {
        self.start_cycle();
        loop {
            self.current += 1;
            if self.current >= self.ships.len() {
                if !self.start_pass(state) {
                    self.status = SiegeStatus::Exhausted;
                    self.finalize(state);
                    return;
                }
                self.current = 0;
            }
            let ship = self.ships[self.current];
            if self.remaining_actions(ship) > 0 && self.ship(state, ship).is_ok() {
                return;
            }
        }
    }

    fn finalize(&mut self, state: &mut GalaxyState) {
        if self.finalized {
            return;
        }
        self.finalized = true;
        self.used.clear();

        if state.fleet(self.fleet).is_some_and(|f| f.is_empty()) {
            state.remove_fleet(self.fleet);
        }

        let name = state
            .planet(self.planet)
            .map(|p| p.name.clone())
            .unwrap_or_default();
        let text = match self.status {
            SiegeStatus::Conquered => format!("{name} has been conquered"),
            SiegeStatus::Depopulated => format!("The siege of {name} left it empty"),
            SiegeStatus::Exhausted => format!("The siege of {name} is over"),
            SiegeStatus::Repelled => format!("Our fleet was destroyed over {name}"),
            SiegeStatus::Aborted => format!("The siege of {name} was called off"),
            SiegeStatus::Ongoing => return,
        };
        state.notify(self.attacker, Message::new(MessageKind::Combat, text));
        self.log.push(SiegeEvent::Finished {
            status: self.status,
        });
    }
}

/// Whether component `index` can act against a planet.
fn usable(ship: &Ship, index: usize) -> Result<(), EngineError> {
    let unavailable = EngineError::ComponentUnavailable {
        ship: ship.id,
        index,
    };
    let component = ship.components.get(index).ok_or(unavailable.clone())?;
    if !component.is_working() || !component.kind.is_siege_capable() {
        return Err(unavailable);
    }
    if component.kind == ComponentKind::PlanetaryInvasion && ship.cargo.colonists == 0 {
        return Err(EngineError::InsufficientResource {
            resource: "colonists",
            action: "invasion",
        });
    }
    Ok(())
}
