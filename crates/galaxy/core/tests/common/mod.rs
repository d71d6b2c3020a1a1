#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use galaxy_core::{
    Attitude, AttitudeNegotiator, Component, ComponentKind, Controller, Env, GalaxyConfig,
    GalaxyEnv, GalaxyState, HullClass, MapDimensions, PlanetId, Race, RealmId, RngOracle, Sector,
    Ship, ShipId, StaticMap,
};

/// Plays back scripted d100 values in draw order, then repeats `then`.
pub struct ScriptedRng {
    script: Vec<u32>,
    then: u32,
    drawn: AtomicUsize,
}

impl ScriptedRng {
    pub fn fixed(roll: u32) -> Self {
        Self::new(Vec::new(), roll)
    }

    pub fn new(script: Vec<u32>, then: u32) -> Self {
        Self {
            script,
            then,
            drawn: AtomicUsize::new(0),
        }
    }
}

impl RngOracle for ScriptedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        let draw = self.drawn.fetch_add(1, Ordering::Relaxed);
        let roll = self.script.get(draw).copied().unwrap_or(self.then);
        roll.saturating_sub(1)
    }
}

pub struct Oracles {
    pub map: StaticMap,
    pub config: GalaxyConfig,
    pub rng: ScriptedRng,
    pub diplomacy: AttitudeNegotiator,
}

impl Oracles {
    pub fn rolling(roll: u32) -> Self {
        Self::with_rng(ScriptedRng::fixed(roll))
    }

    /// Rolls `script` in order, then `then` on every later draw.
    pub fn scripted(script: Vec<u32>, then: u32) -> Self {
        Self::with_rng(ScriptedRng::new(script, then))
    }

    fn with_rng(rng: ScriptedRng) -> Self {
        Self {
            map: StaticMap::new(MapDimensions::new(32, 32)),
            config: GalaxyConfig::default(),
            rng,
            diplomacy: AttitudeNegotiator,
        }
    }

    pub fn env(&self) -> GalaxyEnv<'_> {
        Env::with_all(&self.map, &self.config, &self.rng, &self.diplomacy).as_galaxy_env()
    }
}

pub const ATTACKER: RealmId = RealmId(0);
pub const DEFENDER: RealmId = RealmId(1);

/// Two realms at 10 troops per colonist; the defender owns one planet.
pub fn siege_galaxy(population: u32) -> (GalaxyState, PlanetId) {
    let mut state = GalaxyState::new(21);
    state.add_realm("Sakkra", Controller::Ai, Attitude::Aggressive, Race::new("Sakkra", 10));
    state.add_realm("Meklar", Controller::Ai, Attitude::Logical, Race::new("Meklar", 10));
    let system = state.add_system("Antares", Sector::new(8, 8));
    let planet = state
        .add_planet(system, "Antares III", population.max(1))
        .expect("system exists");
    state.settle_home_world(planet, DEFENDER, population);
    (state, planet)
}

pub fn ship(state: &mut GalaxyState, name: &str, tactic_speed: u32, components: Vec<Component>) -> Ship {
    let id: ShipId = state.new_ship_id();
    Ship::new(id, name, HullClass::Destroyer, components, 2, tactic_speed)
}

pub fn weapon(kind: galaxy_core::WeaponKind, damage: u32) -> Component {
    Component::new(ComponentKind::Weapon(kind), damage)
}

/// Defense left on a ship: shield, armor and hull combined.
pub fn defense(ship: &Ship) -> u32 {
    ship.shield.current + ship.armor.current + ship.hull_points()
}
