//! Demo galaxy used by the headless simulation.
use std::collections::HashSet;

use galaxy_core::{
    Attitude, BuildingKind, Cargo, Component, ComponentKind, Controller, GalaxyConfig,
    GalaxyState, HullClass, MapDimensions, PcgRng, Race, RaceTraits, RealmId, RngOracle, Sector,
    Ship, StaticMap, WeaponKind, compute_seed,
};

use crate::config::SimConfig;

const REALMS: [(&str, Attitude, RaceTraits); 8] = [
    ("Sakkra", Attitude::Aggressive, RaceTraits::empty()),
    ("Meklar", Attitude::Logical, RaceTraits::SYNTHETIC),
    ("Psilon", Attitude::Scientific, RaceTraits::TECH_THEFT),
    ("Alkari", Attitude::Militaristic, RaceTraits::empty()),
    ("Bulrathi", Attitude::Backstabbing, RaceTraits::empty()),
    ("Darlok", Attitude::Expansionist, RaceTraits::TECH_THEFT),
    ("Klackon", Attitude::Merchantile, RaceTraits::ORBITAL_DWELLERS),
    ("Mrrshan", Attitude::Peaceful, RaceTraits::empty()),
];

/// Neutral systems per realm.
const NEUTRAL_SYSTEMS: usize = 3;
/// Minimum distance between two systems.
const SYSTEM_SPACING: u32 = 3;

/// Everything a run needs besides the stateless oracles.
pub struct Scenario {
    pub state: GalaxyState,
    pub map: StaticMap,
    pub rules: GalaxyConfig,
}

/// Builds a galaxy with one home world and a starting navy per realm, plus
/// unclaimed systems to colonize.
pub fn build(config: &SimConfig) -> Scenario {
    let mut state = GalaxyState::new(config.seed);
    let mut placer = Placer::new(config.seed, config.map_size);

    for &(name, attitude, traits) in REALMS.iter().take(config.realms) {
        let realm = state.add_realm(
            name,
            Controller::Ai,
            attitude,
            Race::new(name, Race::DEFAULT_TROOP_POWER).with_traits(traits),
        );
        let Some(sector) = placer.next() else {
            tracing::warn!("no room left for the home world of {}", name);
            continue;
        };
        settle_home(&mut state, realm, name, sector);
        commission_navy(&mut state, realm, sector);
    }

    for index in 0..config.realms * NEUTRAL_SYSTEMS {
        let Some(sector) = placer.next() else {
            break;
        };
        let system = state.add_system(format!("Nebula {}", index + 1), sector);
        let planets = 1 + placer.roll(2);
        for moon in 0..planets {
            let max_population = 4 + placer.roll(7) as u32;
            state.add_planet(system, format!("Nebula {} {}", index + 1, moon + 1), max_population);
        }
    }

    tracing::info!(
        "galaxy {} ready: {} realms, {} systems, {} planets, {} fleets",
        config.seed,
        state.realms.len(),
        state.systems.len(),
        state.planets.len(),
        state.fleets.len()
    );

    Scenario {
        state,
        map: StaticMap::new(MapDimensions::new(config.map_size, config.map_size)),
        rules: GalaxyConfig::default().with_news_interval(config.news_interval),
    }
}

fn settle_home(state: &mut GalaxyState, realm: RealmId, name: &str, sector: Sector) {
    let system = state.add_system(name, sector);
    let Some(planet) = state.add_planet(system, format!("{name} Prime"), 12) else {
        return;
    };
    state.settle_home_world(planet, realm, 8);
    if let Some(home) = state.planet_mut(planet) {
        home.buildings = vec![
            BuildingKind::SpacePort,
            BuildingKind::Factory,
            BuildingKind::ResearchLab,
            BuildingKind::Barracks,
        ];
        home.turret_level = 2;
    }
}

fn commission_navy(state: &mut GalaxyState, realm: RealmId, home: Sector) {
    let probe = design(state, "Pathfinder", HullClass::Probe, vec![
        Component::new(ComponentKind::Scanner, 3),
    ]);
    state.spawn_fleet(realm, "Survey Wing", home, vec![probe]);

    let ark = design(state, "Ark", HullClass::Freighter, vec![
        Component::new(ComponentKind::ColonyModule, 0),
        Component::new(ComponentKind::Armor, 1),
    ]);
    state.spawn_fleet(realm, "Colony Wing", home, vec![ark]);

    let guard: Vec<Ship> = (0..2)
        .map(|_| {
            design(state, "Lancer", HullClass::Destroyer, vec![
                Component::new(ComponentKind::Weapon(WeaponKind::Beam), 4),
                Component::new(ComponentKind::Weapon(WeaponKind::Railgun), 3),
                Component::new(ComponentKind::Shield, 3),
                Component::new(ComponentKind::Armor, 4),
            ])
        })
        .collect();
    state.spawn_fleet(realm, "Home Guard", home, guard);

    let lander = design(state, "Lander", HullClass::Cruiser, vec![
        Component::new(ComponentKind::PlanetaryInvasion, 0),
        Component::new(ComponentKind::OrbitalBomb, 30),
        Component::new(ComponentKind::Armor, 2),
    ])
    .with_cargo(Cargo {
        colonists: 8,
        metal: 0,
    });
    state.spawn_fleet(realm, "Legion", home, vec![lander]);
}

fn design(
    state: &mut GalaxyState,
    name: &str,
    hull: HullClass,
    components: Vec<Component>,
) -> Ship {
    let id = state.new_ship_id();
    let (speed, tactic_speed) = match hull {
        HullClass::Probe => (4, 4),
        HullClass::Freighter => (2, 1),
        HullClass::Corvette => (3, 3),
        HullClass::Destroyer => (3, 2),
        HullClass::Cruiser | HullClass::Battleship => (2, 1),
    };
    Ship::new(id, name, hull, components, speed, tactic_speed)
}

/// Deterministic system placement with a minimum spacing.
struct Placer {
    rng: PcgRng,
    seed: u64,
    nonce: u64,
    size: u32,
    taken: HashSet<Sector>,
}

impl Placer {
    const ATTEMPTS: u32 = 500;

    fn new(seed: u64, size: u32) -> Self {
        Self {
            rng: PcgRng,
            seed,
            nonce: 0,
            size,
            taken: HashSet::new(),
        }
    }

    /// Value in `0..bound`.
    fn roll(&mut self, bound: usize) -> usize {
        self.nonce += 1;
        self.rng
            .pick(compute_seed(self.seed, self.nonce, 0, 0), bound)
    }

    /// Next free sector, or `None` once the map is too crowded.
    fn next(&mut self) -> Option<Sector> {
        // Keep a one-sector margin so every system has open neighbours.
        let span = self.size.saturating_sub(2).max(1) as usize;
        for _ in 0..Self::ATTEMPTS {
            let x = 1 + self.roll(span) as i32;
            let y = 1 + self.roll(span) as i32;
            let candidate = Sector::new(x, y);
            let crowded = self
                .taken
                .iter()
                .any(|&other| other.distance(candidate) < SYSTEM_SPACING);
            if !crowded {
                self.taken.insert(candidate);
                return Some(candidate);
            }
        }
        None
    }
}
