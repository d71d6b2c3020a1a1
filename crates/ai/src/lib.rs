//! AI turn processing for the galaxy.
//!
//! This crate drives every computer-controlled realm through its turn:
//!
//! - [`missions`] owns per-fleet intent: which mission a fleet follows, how
//!   each mission kind moves through its phases, and how attacks are staged
//! - [`scheduler`] walks realms and fleets in round-robin order, triggers
//!   combat and sieges on contact, runs the contact scans at the end of each
//!   realm's pass and finally resolves the galaxy
//!
//! Rules and state live in `galaxy-core`; this crate only decides and logs.
pub mod error;
pub mod missions;
pub mod scheduler;

pub use error::{Result, SchedulerError};
pub use missions::{MissionOutcome, MissionPlanner, gather_mix};
pub use scheduler::{CursorPhase, HumanPrompt, TurnCursor, TurnProgress, TurnScheduler};
