//! Authoritative galaxy state.
//!
//! Realms, fleets, planets, missions and leaders live in arenas keyed by
//! stable integer identifiers, so cross references survive renames and
//! removals. Engines mutate this state through the methods below and the
//! public fields of the arena types.
pub mod types;

use std::collections::{BTreeMap, HashMap};

use crate::env::{MapOracle, compute_seed};
pub use types::{
    Attitude, BuildingKind, Cargo, Component, ComponentKind, Controller, DiplomacyBonus, Fleet,
    FleetId, HullClass, Leader, LeaderId, LeaderPerks, LeaderStatus, Message, MessageKind,
    Mission, MissionId, MissionKind, MissionPhase, NewsFeed, NewsItem, PhaseRegression, Planet,
    PlanetId, Race, RaceTraits, Realm, RealmId, RealmStats, Relation, ResourceMeter, Route,
    Sector, Ship, ShipId, ShipRole, StarSystem, SystemId, TechCategory, TechList, WeaponKind,
};

/// Strongest cultural claim on a sector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CultureClaim {
    pub realm: RealmId,
    pub strength: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GalaxyState {
    /// RNG seed, set once when the galaxy is created.
    pub game_seed: u64,
    /// Bumped on every roll; combined with `game_seed` into per-roll seeds.
    roll_nonce: u64,
    /// Shared id allocator for every arena. Ids are never reused.
    next_id: u32,
    /// Global turn counter.
    pub turn: u32,
    /// Realms in round-robin order; `RealmId` is the index.
    pub realms: Vec<Realm>,
    pub systems: BTreeMap<SystemId, StarSystem>,
    pub planets: BTreeMap<PlanetId, Planet>,
    pub fleets: BTreeMap<FleetId, Fleet>,
    /// Iteration order is creation order.
    pub missions: BTreeMap<MissionId, Mission>,
    pub leaders: BTreeMap<LeaderId, Leader>,
    /// Cultural border map, rebuilt every turn.
    pub culture: HashMap<Sector, CultureClaim>,
    pub news: NewsFeed,
}

impl GalaxyState {
    pub fn new(game_seed: u64) -> Self {
        Self {
            game_seed,
            roll_nonce: 0,
            next_id: 1,
            turn: 1,
            realms: Vec::new(),
            systems: BTreeMap::new(),
            planets: BTreeMap::new(),
            fleets: BTreeMap::new(),
            missions: BTreeMap::new(),
            leaders: BTreeMap::new(),
            culture: HashMap::new(),
            news: NewsFeed::default(),
        }
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    /// Seed for the next roll made on behalf of `actor`.
    pub fn next_seed(&mut self, actor: u32, context: u32) -> u64 {
        self.roll_nonce += 1;
        compute_seed(self.game_seed, self.roll_nonce, actor, context)
    }

    // ------------------------------------------------------------------
    // Setup
    // ------------------------------------------------------------------

    pub fn add_realm(
        &mut self,
        name: impl Into<String>,
        controller: Controller,
        attitude: Attitude,
        race: Race,
    ) -> RealmId {
        let id = RealmId(self.realms.len() as u32);
        self.realms
            .push(Realm::new(id, name, controller, attitude, race));
        id
    }

    pub fn add_system(&mut self, name: impl Into<String>, sector: Sector) -> SystemId {
        let id = SystemId(self.allocate_id());
        self.systems.insert(
            id,
            StarSystem {
                id,
                name: name.into(),
                sector,
                planets: Vec::new(),
            },
        );
        id
    }

    /// Adds a planet to `system`. Returns `None` when the system is unknown.
    pub fn add_planet(
        &mut self,
        system: SystemId,
        name: impl Into<String>,
        max_population: u32,
    ) -> Option<PlanetId> {
        let sector = self.systems.get(&system)?.sector;
        let id = PlanetId(self.allocate_id());
        self.planets
            .insert(id, Planet::new(id, name, system, sector, max_population));
        if let Some(star) = self.systems.get_mut(&system) {
            star.planets.push(id);
        }
        Some(id)
    }

    /// Initial settlement used while building a scenario.
    ///
    /// In-game ownership changes go through [`crate::ownership::transfer_planet`].
    pub fn settle_home_world(&mut self, planet: PlanetId, realm: RealmId, population: u32) {
        if let Some(planet) = self.planets.get_mut(&planet) {
            planet.owner = Some(realm);
            planet.population = population;
            planet.home_world = true;
            if let Some(owner) = self.realms.get_mut(realm.index()) {
                owner.known_planets.insert(planet.id);
                owner.explored_systems.insert(planet.system);
            }
        }
    }

    pub fn add_leader(&mut self, name: impl Into<String>, realm: RealmId) -> LeaderId {
        let id = LeaderId(self.allocate_id());
        self.leaders.insert(id, Leader::new(id, name, realm));
        id
    }

    pub fn new_ship_id(&mut self) -> ShipId {
        ShipId(self.allocate_id())
    }

    /// Creates a fleet and appends it to the owner's turn order.
    pub fn spawn_fleet(
        &mut self,
        owner: RealmId,
        name: impl Into<String>,
        sector: Sector,
        ships: Vec<Ship>,
    ) -> FleetId {
        let id = FleetId(self.allocate_id());
        let mut fleet = Fleet::new(id, name, owner, sector);
        fleet.ships = ships;
        fleet.reset_moves();
        self.fleets.insert(id, fleet);
        if let Some(realm) = self.realms.get_mut(owner.index()) {
            realm.fleets.push(id);
        }
        id
    }

    /// Removes a fleet, its place in the owner's turn order and its mission.
    pub fn remove_fleet(&mut self, id: FleetId) -> Option<Fleet> {
        let fleet = self.fleets.remove(&id)?;
        if let Some(realm) = self.realms.get_mut(fleet.owner.index()) {
            realm.fleets.retain(|&f| f != id);
        }
        self.missions.retain(|_, mission| mission.fleet != Some(id));
        Some(fleet)
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    pub fn realm(&self, id: RealmId) -> Option<&Realm> {
        self.realms.get(id.index())
    }

    pub fn realm_mut(&mut self, id: RealmId) -> Option<&mut Realm> {
        self.realms.get_mut(id.index())
    }

    pub fn fleet(&self, id: FleetId) -> Option<&Fleet> {
        self.fleets.get(&id)
    }

    pub fn fleet_mut(&mut self, id: FleetId) -> Option<&mut Fleet> {
        self.fleets.get_mut(&id)
    }

    pub fn planet(&self, id: PlanetId) -> Option<&Planet> {
        self.planets.get(&id)
    }

    pub fn planet_mut(&mut self, id: PlanetId) -> Option<&mut Planet> {
        self.planets.get_mut(&id)
    }

    pub fn system(&self, id: SystemId) -> Option<&StarSystem> {
        self.systems.get(&id)
    }

    pub fn mission(&self, id: MissionId) -> Option<&Mission> {
        self.missions.get(&id)
    }

    pub fn mission_mut(&mut self, id: MissionId) -> Option<&mut Mission> {
        self.missions.get_mut(&id)
    }

    /// The single active mission of `fleet`, if any.
    pub fn mission_for_fleet(&self, fleet: FleetId) -> Option<MissionId> {
        self.missions
            .values()
            .find(|mission| mission.fleet == Some(fleet))
            .map(|mission| mission.id)
    }

    pub fn missions_of(&self, realm: RealmId) -> impl Iterator<Item = &Mission> {
        self.missions.values().filter(move |m| m.realm == realm)
    }

    pub fn planets_of(&self, realm: RealmId) -> impl Iterator<Item = &Planet> {
        self.planets.values().filter(move |p| p.owner == Some(realm))
    }

    pub fn fleets_of(&self, realm: RealmId) -> impl Iterator<Item = &Fleet> {
        self.realm(realm)
            .into_iter()
            .flat_map(|r| r.fleets.iter())
            .filter_map(|id| self.fleets.get(id))
    }

    pub fn fleets_at(&self, sector: Sector) -> impl Iterator<Item = &Fleet> {
        self.fleets.values().filter(move |f| f.sector == sector)
    }

    pub fn planet_at(&self, sector: Sector) -> Option<&Planet> {
        self.planets.values().find(|p| p.sector == sector)
    }

    /// Nearest planet matching `filter`; ties go to the lower id.
    pub fn nearest_planet<F>(&self, from: Sector, filter: F) -> Option<&Planet>
    where
        F: Fn(&Planet) -> bool,
    {
        self.planets
            .values()
            .filter(|planet| filter(planet))
            .min_by_key(|planet| (planet.sector.distance(from), planet.id))
    }

    /// Nearest solar system matching `filter`; ties go to the lower id.
    pub fn nearest_system<F>(&self, from: Sector, filter: F) -> Option<&StarSystem>
    where
        F: Fn(&StarSystem) -> bool,
    {
        self.systems
            .values()
            .filter(|system| filter(system))
            .min_by_key(|system| (system.sector.distance(from), system.id))
    }

    /// Troop power per worker for a planet owner; natives use the default.
    pub fn race_power(&self, owner: Option<RealmId>) -> u32 {
        owner
            .and_then(|id| self.realm(id))
            .map(|realm| realm.race.troop_power)
            .unwrap_or(Race::DEFAULT_TROOP_POWER)
    }

    // ------------------------------------------------------------------
    // Provider operations
    // ------------------------------------------------------------------

    /// A sector is blocked for `realm` when the map forbids it or another
    /// realm's fleet holds it.
    pub fn is_blocked<M>(&self, map: &M, sector: Sector, realm: RealmId) -> bool
    where
        M: MapOracle + ?Sized,
    {
        !map.is_open(sector) || self.fleets_at(sector).any(|fleet| fleet.owner != realm)
    }

    pub fn add_mission(
        &mut self,
        realm: RealmId,
        kind: MissionKind,
        phase: MissionPhase,
        target: Sector,
    ) -> MissionId {
        let id = MissionId(self.allocate_id());
        self.missions
            .insert(id, Mission::new(id, realm, kind, phase, target));
        id
    }

    /// Binds `mission` to `fleet`. Refused when the fleet already has one.
    pub fn assign_mission(&mut self, mission: MissionId, fleet: FleetId) -> bool {
        if self.mission_for_fleet(fleet).is_some() {
            return false;
        }
        match self.missions.get_mut(&mission) {
            Some(m) if m.fleet.is_none() => {
                m.fleet = Some(fleet);
                true
            }
            _ => false,
        }
    }

    pub fn clear_mission(&mut self, id: MissionId) -> Option<Mission> {
        self.missions.remove(&id)
    }

    pub fn notify(&mut self, realm: RealmId, message: Message) {
        if let Some(realm) = self.realm_mut(realm) {
            realm.notify(message);
        }
    }

    pub fn publish(&mut self, headline: impl Into<String>, body: impl Into<String>) {
        let item = NewsItem::new(self.turn, headline, body);
        self.news.append(item);
    }

    /// Books a destroyed ship against its owner and the realm that killed it.
    pub fn record_ship_loss(&mut self, owner: RealmId, destroyed_by: Option<RealmId>) {
        if let Some(realm) = self.realm_mut(owner) {
            realm.stats.ships_lost += 1;
        }
        if let Some(realm) = destroyed_by.and_then(|id| self.realm_mut(id)) {
            realm.stats.ships_destroyed += 1;
        }
    }
}

impl Default for GalaxyState {
    fn default() -> Self {
        Self::new(0)
    }
}
