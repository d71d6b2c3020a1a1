//! Deterministic galaxy rules and the authoritative galaxy state.
//!
//! `galaxy-core` owns the arena state (realms, fleets, planets, missions),
//! the read-only oracles the engines consult, and the two contact engines:
//! ship-to-ship [`combat`] and planetary [`siege`]. Ownership changes flow
//! through [`ownership::transfer_planet`]; end-of-turn effects live in
//! [`resolution`]. The crate performs no I/O and no logging; everything it
//! does is reported through returned values, realm messages and news.
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod ownership;
pub mod resolution;
pub mod siege;
pub mod state;

pub use combat::{
    CombatEvent, CombatSession, CombatStatus, Combatant, HitReport, Side, apply_hit, check_hit,
};
pub use config::GalaxyConfig;
pub use env::{
    AttitudeNegotiator, ConfigOracle, DiplomacyOracle, Env, GalaxyEnv, MapDimensions, MapOracle,
    OracleError, PcgRng, RngOracle, StaticMap, compute_seed,
};
pub use error::{EngineError, ErrorSeverity, GalaxyError, TargetRef};
pub use ownership::{GovernorFate, TransferCause, TransferReport, transfer_planet};
pub use resolution::{ResolutionReport, resolve_galaxy};
pub use siege::{InvasionOdds, SiegeEffect, SiegeEvent, SiegeSession, SiegeStatus};
pub use state::{
    Attitude, BuildingKind, Cargo, Component, ComponentKind, Controller, CultureClaim,
    DiplomacyBonus, Fleet, FleetId, GalaxyState, HullClass, Leader, LeaderId, LeaderPerks,
    LeaderStatus, Message, MessageKind, Mission, MissionId, MissionKind, MissionPhase, NewsFeed,
    NewsItem, PhaseRegression, Planet, PlanetId, Race, RaceTraits, Realm, RealmId, RealmStats,
    Relation, ResourceMeter, Route, Sector, Ship, ShipId, ShipRole, StarSystem, SystemId,
    TechCategory, TechList, WeaponKind,
};
