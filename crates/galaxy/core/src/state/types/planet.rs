//! Planets and solar systems.

use super::common::{LeaderId, PlanetId, RealmId, Sector, SystemId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuildingKind {
    SpacePort,
    Factory,
    ResearchLab,
    CultureCenter,
    Barracks,
    Farm,
}

impl BuildingKind {
    /// Ground troops provided by one building of this kind.
    pub const fn troop_bonus(self) -> u32 {
        match self {
            Self::Barracks => 10,
            _ => 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StarSystem {
    pub id: SystemId,
    pub name: String,
    pub sector: Sector,
    pub planets: Vec<PlanetId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Planet {
    pub id: PlanetId,
    pub name: String,
    pub system: SystemId,
    pub sector: Sector,
    pub owner: Option<RealmId>,
    /// Working population; each unit is one worker.
    pub population: u32,
    pub max_population: u32,
    pub buildings: Vec<BuildingKind>,
    pub turret_level: u32,
    pub bombing_shield: bool,
    pub home_world: bool,
    pub governor: Option<LeaderId>,
    /// Accumulated cultural output.
    pub culture: u32,
    /// Progress toward the next population unit.
    pub growth: u32,
    /// Suppression fire accumulated by sieges; reset by a successful invasion.
    pub suppression: u32,
    pub orbital_habitat: bool,
}

impl Planet {
    pub fn new(
        id: PlanetId,
        name: impl Into<String>,
        system: SystemId,
        sector: Sector,
        max_population: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            system,
            sector,
            owner: None,
            population: 0,
            max_population,
            buildings: Vec::new(),
            turret_level: 0,
            bombing_shield: false,
            home_world: false,
            governor: None,
            culture: 0,
            growth: 0,
            suppression: 0,
            orbital_habitat: false,
        }
    }

    pub fn is_populated(&self) -> bool {
        self.population > 0
    }

    pub fn is_owned_by(&self, realm: RealmId) -> bool {
        self.owner == Some(realm)
    }

    pub fn has_building(&self, kind: BuildingKind) -> bool {
        self.buildings.contains(&kind)
    }

    pub fn count_buildings(&self, kind: BuildingKind) -> u32 {
        self.buildings.iter().filter(|&&b| b == kind).count() as u32
    }

    /// Ground defence: workers times the owner's race power plus barracks.
    pub fn troop_power(&self, race_power: u32) -> u32 {
        let garrison: u32 = self.buildings.iter().map(|b| b.troop_bonus()).sum();
        self.population * race_power + garrison
    }

    /// Removes one worker. Returns false when nobody was left to kill.
    pub fn kill_worker(&mut self) -> bool {
        if self.population == 0 {
            return false;
        }
        self.population -= 1;
        true
    }

    pub fn kill_workers(&mut self, amount: u32) -> u32 {
        let killed = amount.min(self.population);
        self.population -= killed;
        killed
    }

    pub fn remove_building(&mut self, index: usize) -> Option<BuildingKind> {
        (index < self.buildings.len()).then(|| self.buildings.remove(index))
    }
}
