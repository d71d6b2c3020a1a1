#![allow(dead_code)]

use galaxy_core::{
    Attitude, AttitudeNegotiator, Cargo, Component, ComponentKind, Controller, Env, FleetId,
    GalaxyConfig, GalaxyEnv, GalaxyState, HullClass, MapDimensions, PlanetId, Race, RealmId,
    RngOracle, Sector, Ship, StaticMap, WeaponKind,
};

/// Rolls the same d100 value every time.
pub struct FixedRng(pub u32);

impl RngOracle for FixedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0.saturating_sub(1)
    }
}

pub struct Oracles {
    pub map: StaticMap,
    pub config: GalaxyConfig,
    pub rng: FixedRng,
    pub diplomacy: AttitudeNegotiator,
}

impl Oracles {
    pub fn rolling(roll: u32) -> Self {
        Self {
            map: StaticMap::new(MapDimensions::new(32, 32)),
            config: GalaxyConfig::default(),
            rng: FixedRng(roll),
            diplomacy: AttitudeNegotiator,
        }
    }

    pub fn env(&self) -> GalaxyEnv<'_> {
        Env::with_all(&self.map, &self.config, &self.rng, &self.diplomacy).as_galaxy_env()
    }
}

pub const SAKKRA: RealmId = RealmId(0);
pub const MEKLAR: RealmId = RealmId(1);

pub const HOME: Sector = Sector::new(4, 4);
pub const FRONTIER: Sector = Sector::new(10, 4);

/// Sakkra (aggressive) and Meklar (logical), both AI controlled. Sakkra owns
/// a home world at [`HOME`]; an unowned planet waits at [`FRONTIER`].
pub struct Galaxy {
    pub state: GalaxyState,
    pub home: PlanetId,
    pub frontier: PlanetId,
}

impl Galaxy {
    pub fn new(home_population: u32) -> Self {
        let mut state = GalaxyState::new(7);
        state.add_realm("Sakkra", Controller::Ai, Attitude::Aggressive, Race::new("Sakkra", 10));
        state.add_realm("Meklar", Controller::Ai, Attitude::Logical, Race::new("Meklar", 10));

        let sol = state.add_system("Sol", HOME);
        let home = state.add_planet(sol, "Sol II", 10).expect("system exists");
        state.settle_home_world(home, SAKKRA, home_population);

        let vega = state.add_system("Vega", FRONTIER);
        let frontier = state.add_planet(vega, "Vega I", 6).expect("system exists");

        Self {
            state,
            home,
            frontier,
        }
    }

    /// Adds a planet owned by `realm` in a new system.
    pub fn colony(&mut self, realm: RealmId, name: &str, sector: Sector, population: u32) -> PlanetId {
        let system = self.state.add_system(name, sector);
        let planet = self.state.add_planet(system, name, 10).expect("system exists");
        self.state.settle_home_world(planet, realm, population);
        if let Some(planet) = self.state.planet_mut(planet) {
            planet.home_world = false;
        }
        planet
    }

    pub fn fleet(&mut self, realm: RealmId, sector: Sector, ships: Vec<Ship>) -> FleetId {
        self.state.spawn_fleet(realm, "Fleet", sector, ships)
    }

    pub fn declare_war(&mut self, a: RealmId, b: RealmId) {
        for (us, them) in [(a, b), (b, a)] {
            let bonus = self.state.realm_mut(us).expect("realm exists").bonus_mut(them);
            bonus.relation = galaxy_core::Relation::War;
            bonus.met = true;
        }
    }
}

pub fn colony_ship(state: &mut GalaxyState) -> Ship {
    let id = state.new_ship_id();
    Ship::new(
        id,
        "Ark",
        HullClass::Freighter,
        vec![Component::new(ComponentKind::ColonyModule, 0)],
        2,
        1,
    )
}

pub fn freighter(state: &mut GalaxyState) -> Ship {
    let id = state.new_ship_id();
    Ship::new(
        id,
        "Hauler",
        HullClass::Freighter,
        vec![Component::new(ComponentKind::CargoBay, 1)],
        2,
        1,
    )
}

pub fn scout(state: &mut GalaxyState) -> Ship {
    let id = state.new_ship_id();
    Ship::new(
        id,
        "Probe",
        HullClass::Probe,
        vec![Component::new(ComponentKind::Scanner, 2)],
        3,
        1,
    )
}

pub fn warship(state: &mut GalaxyState, damage: u32) -> Ship {
    let id = state.new_ship_id();
    Ship::new(
        id,
        "Lancer",
        HullClass::Destroyer,
        vec![
            Component::new(ComponentKind::Weapon(WeaponKind::Plasma), damage),
            Component::new(ComponentKind::Shield, 2),
        ],
        2,
        3,
    )
}

pub fn trooper(state: &mut GalaxyState, colonists: u32) -> Ship {
    let id = state.new_ship_id();
    Ship::new(
        id,
        "Lander",
        HullClass::Corvette,
        vec![Component::new(ComponentKind::PlanetaryInvasion, 0)],
        2,
        1,
    )
    .with_cargo(Cargo {
        colonists,
        metal: 0,
    })
}
