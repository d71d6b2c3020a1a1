pub mod common;
pub mod fleet;
pub mod leader;
pub mod mission;
pub mod news;
pub mod planet;
pub mod realm;
pub mod ship;
pub mod tech;

pub use common::{
    FleetId, LeaderId, MissionId, PlanetId, RealmId, ResourceMeter, Sector, ShipId, SystemId,
};
pub use fleet::{Fleet, Route};
pub use leader::{Leader, LeaderPerks, LeaderStatus};
pub use mission::{Mission, MissionKind, MissionPhase, PhaseRegression};
pub use news::{NewsFeed, NewsItem};
pub use planet::{BuildingKind, Planet, StarSystem};
pub use realm::{
    Attitude, Controller, DiplomacyBonus, Message, MessageKind, Race, RaceTraits, Realm,
    RealmStats, Relation,
};
pub use ship::{Cargo, Component, ComponentKind, HullClass, Ship, ShipRole, WeaponKind};
pub use tech::{TechCategory, TechList};
