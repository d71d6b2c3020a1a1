//! Planetary bombing and invasion.
//!
//! A [`SiegeSession`] walks the attacking fleet ship by ship. Every ship has
//! `tactic_speed × 4` actions for the whole siege; a component costs one
//! action the first time it is used in a cycle over the ship's components.
//! A ship keeps cycling until its budget is spent; the fleet is walked again
//! while the previous pass still changed something on the planet.
//! The planet's turret answers each action before it resolves, using the
//! same damage primitive as ship combat.
//!
//! Suppression accumulates on the planet across sieges and only resets when
//! the planet changes hands.

pub mod effects;
pub mod invasion;
pub mod session;

pub use effects::{SiegeEffect, Thresholds, bomb_strike, nuke_strike, weapon_strike, weapon_thresholds};
pub use invasion::{InvasionOdds, planet_troops, settled_population, ship_troops};
pub use session::{SiegeEvent, SiegeSession, SiegeStatus};
