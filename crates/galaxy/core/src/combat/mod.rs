//! Ship-to-ship combat resolution.
//!
//! # Architecture
//!
//! - **Damage primitive**: [`apply_hit`] runs a hit through shield, armor
//!   and hull. Planetary turrets reuse it during sieges.
//! - **Sessions**: [`CombatSession`] holds the turn queue, round counter and
//!   used-component set. Human-paced engagements are driven by `tick`,
//!   `fire` and `end_turn`; AI engagements call `resolve`.
//!
//! Every roll comes from the environment's `RngOracle`, seeded through
//! [`GalaxyState::next_seed`](crate::state::GalaxyState::next_seed).

pub mod damage;
pub mod session;

pub use damage::{HitReport, apply_hit, check_hit};
pub use session::{CombatEvent, CombatSession, CombatStatus, Combatant, Side};
