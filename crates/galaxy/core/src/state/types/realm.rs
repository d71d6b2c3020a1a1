//! Realms: the players of the galaxy.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use super::common::{FleetId, PlanetId, RealmId, Sector, SystemId};
use super::tech::TechList;

/// Who issues orders for a realm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Controller {
    Human,
    Ai,
}

/// AI personality. Drives attack composition and negotiation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Attitude {
    Aggressive,
    Militaristic,
    Expansionist,
    Backstabbing,
    Logical,
    Diplomatic,
    Peaceful,
    Merchantile,
    Scientific,
}

bitflags::bitflags! {
    /// Special racial abilities that change conquest outcomes.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct RaceTraits: u8 {
        /// May copy a technology level from conquered realms.
        const TECH_THEFT = 1 << 0;
        /// Builds an extra worker from salvage when conquering.
        const SYNTHETIC = 1 << 1;
        /// Settles conquered worlds with an orbital habitat.
        const ORBITAL_DWELLERS = 1 << 2;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Race {
    pub name: String,
    /// Ground strength of one colonist or worker.
    pub troop_power: u32,
    pub traits: RaceTraits,
}

impl Race {
    pub const DEFAULT_TROOP_POWER: u32 = 10;

    pub fn new(name: impl Into<String>, troop_power: u32) -> Self {
        Self {
            name: name.into(),
            troop_power,
            traits: RaceTraits::empty(),
        }
    }

    pub fn with_traits(mut self, traits: RaceTraits) -> Self {
        self.traits = traits;
        self
    }
}

/// Standing between two realms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Relation {
    /// Not met, or met without any agreement.
    #[default]
    Neutral,
    War,
    Peace,
    TradeAlliance,
    Alliance,
}

/// One realm's view of another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiplomacyBonus {
    pub relation: Relation,
    pub opinion: i32,
    pub met: bool,
    /// Gathered espionage intel.
    pub intel: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MessageKind {
    Fleet,
    Planet,
    Combat,
    Diplomacy,
    Research,
}

/// Transient notification shown to the realm during its turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
    pub sector: Option<Sector>,
}

impl Message {
    pub fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            sector: None,
        }
    }

    pub fn at(mut self, sector: Sector) -> Self {
        self.sector = Some(sector);
        self
    }
}

/// Loss and in-use statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RealmStats {
    pub ships_lost: u32,
    pub ships_destroyed: u32,
    pub planets_conquered: u32,
    pub planets_lost: u32,
    pub planets_colonized: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Realm {
    pub id: RealmId,
    pub name: String,
    pub controller: Controller,
    pub attitude: Attitude,
    pub race: Race,
    pub credits: i64,
    pub tech: TechList,
    pub diplomacy: BTreeMap<RealmId, DiplomacyBonus>,
    /// Owned fleets in turn order.
    pub fleets: Vec<FleetId>,
    pub messages: Vec<Message>,
    /// Planets this realm has seen at least once.
    pub known_planets: BTreeSet<PlanetId>,
    pub explored_systems: BTreeSet<SystemId>,
    /// Sectors currently inside sensor range; rebuilt every turn.
    pub visible: HashSet<Sector>,
    pub stats: RealmStats,
    pub reputation: i32,
    /// Research produced this turn, applied at the end of the turn.
    pub research_income: u32,
}

impl Realm {
    pub fn new(
        id: RealmId,
        name: impl Into<String>,
        controller: Controller,
        attitude: Attitude,
        race: Race,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            controller,
            attitude,
            race,
            credits: 0,
            tech: TechList::default(),
            diplomacy: BTreeMap::new(),
            fleets: Vec::new(),
            messages: Vec::new(),
            known_planets: BTreeSet::new(),
            explored_systems: BTreeSet::new(),
            visible: HashSet::new(),
            stats: RealmStats::default(),
            reputation: 0,
            research_income: 0,
        }
    }

    pub fn is_human(&self) -> bool {
        self.controller == Controller::Human
    }

    pub fn relation(&self, other: RealmId) -> Relation {
        self.diplomacy
            .get(&other)
            .map(|bonus| bonus.relation)
            .unwrap_or_default()
    }

    pub fn is_at_war_with(&self, other: RealmId) -> bool {
        self.relation(other) == Relation::War
    }

    pub fn bonus_mut(&mut self, other: RealmId) -> &mut DiplomacyBonus {
        self.diplomacy.entry(other).or_default()
    }

    pub fn notify(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn can_see(&self, sector: Sector) -> bool {
        self.visible.contains(&sector)
    }
}
