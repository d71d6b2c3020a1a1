//! Turn position and step results.

use galaxy_core::{CombatSession, FleetId, RealmId, ResolutionReport, SiegeSession};

use crate::missions::MissionOutcome;

/// Stage of the current turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CursorPhase {
    /// Fleets of the cursor realm are processed in list order.
    Fleets,
    /// The cursor realm finished its fleets; contact scans run next.
    Contacts,
    /// Every realm is done; the galaxy resolves.
    Resolution,
}

/// Where the scheduler stands within a turn.
///
/// Threaded through [`TurnScheduler::step`](super::TurnScheduler::step) so a
/// turn interrupted by a human prompt resumes where it stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TurnCursor {
    pub realm: RealmId,
    /// Index into the realm's fleet list; `None` until the realm starts.
    pub fleet: Option<usize>,
    pub phase: CursorPhase,
}

impl TurnCursor {
    /// Cursor at the first realm of a fresh turn.
    pub const fn start() -> Self {
        Self {
            realm: RealmId(0),
            fleet: None,
            phase: CursorPhase::Fleets,
        }
    }

    /// Moves on to the next realm, or to resolution after the last one.
    pub(super) fn next_realm(&mut self, realm_count: usize) {
        self.realm = RealmId(self.realm.0 + 1);
        self.fleet = None;
        self.phase = if self.realm.index() < realm_count {
            CursorPhase::Fleets
        } else {
            CursorPhase::Resolution
        };
    }
}

impl Default for TurnCursor {
    fn default() -> Self {
        Self::start()
    }
}

/// Decisions the scheduler cannot take for a human realm.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HumanPrompt {
    /// First contact between an AI realm and a human realm.
    Diplomacy { realm: RealmId, human: RealmId },
    /// An AI fleet engaged a human fleet.
    Combat(Box<CombatSession>),
    /// An AI fleet besieges a human planet. The presentation layer paces it.
    Siege(Box<SiegeSession>),
}

/// Result of one scheduler step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnProgress {
    /// One fleet was handled. `outcome` is `None` when its step failed and
    /// the failure was contained.
    FleetProcessed {
        realm: RealmId,
        fleet: FleetId,
        outcome: Option<MissionOutcome>,
    },
    RealmFinished {
        realm: RealmId,
    },
    TurnFinished(ResolutionReport),
    AwaitingHuman(HumanPrompt),
}

impl TurnProgress {
    /// True when control goes back to the caller: the turn ended or a human
    /// has to decide.
    pub fn yields(&self) -> bool {
        matches!(self, Self::TurnFinished(_) | Self::AwaitingHuman(_))
    }
}
