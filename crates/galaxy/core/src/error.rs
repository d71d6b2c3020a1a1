//! Common error infrastructure for galaxy-core.
//!
//! Engine errors are classified by severity. Only fatal errors (a missing case
//! in a closed enumeration, a missing oracle) may abort turn processing; all
//! other failures are contained by the caller at fleet or ship granularity.

use crate::env::OracleError;
use crate::state::{
    FleetId, MissionId, MissionPhase, PhaseRegression, PlanetId, RealmId, Sector, ShipId,
};

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Temporary condition; the action is skipped and play continues.
    ///
    /// e.g. route blocked, no colonists aboard
    Recoverable,

    /// Invalid input or a stale reference; rejected without retry.
    ///
    /// e.g. fleet destroyed mid-round, component already used
    Validation,

    /// Unexpected state inconsistency that should be investigated.
    Internal,

    /// Processing cannot continue.
    ///
    /// e.g. unsupported mission phase, missing oracle
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Common trait for all galaxy-core errors.
pub trait GalaxyError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Entity referenced by an [`EngineError::InvalidTarget`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetRef {
    Realm(RealmId),
    Fleet(FleetId),
    Ship(ShipId),
    Planet(PlanetId),
    Mission(MissionId),
}

impl core::fmt::Display for TargetRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Realm(id) => id.fmt(f),
            Self::Fleet(id) => id.fmt(f),
            Self::Ship(id) => id.fmt(f),
            Self::Planet(id) => id.fmt(f),
            Self::Mission(id) => id.fmt(f),
        }
    }
}

/// Errors raised by the combat, siege and mission engines.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// A mission handler reached a phase its kind never uses.
    #[error("{kind} mission {mission} has no handler for phase {phase:?}")]
    UnsupportedPhase {
        mission: MissionId,
        kind: &'static str,
        phase: MissionPhase,
    },

    #[error(transparent)]
    PhaseRegression(#[from] PhaseRegression),

    #[error("{0} no longer exists")]
    InvalidTarget(TargetRef),

    #[error("{fleet} cannot enter blocked sector {sector}")]
    BlockedMovement { fleet: FleetId, sector: Sector },

    #[error("not enough {resource} for {action}")]
    InsufficientResource {
        resource: &'static str,
        action: &'static str,
    },

    #[error("component {index} of {ship} cannot be used now")]
    ComponentUnavailable { ship: ShipId, index: usize },

    #[error("the engagement has already finished")]
    SessionFinished,

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl EngineError {
    pub const fn invalid_fleet(fleet: FleetId) -> Self {
        Self::InvalidTarget(TargetRef::Fleet(fleet))
    }

    pub const fn invalid_planet(planet: PlanetId) -> Self {
        Self::InvalidTarget(TargetRef::Planet(planet))
    }

    pub const fn invalid_realm(realm: RealmId) -> Self {
        Self::InvalidTarget(TargetRef::Realm(realm))
    }

    pub const fn invalid_mission(mission: MissionId) -> Self {
        Self::InvalidTarget(TargetRef::Mission(mission))
    }

    pub fn is_fatal(&self) -> bool {
        self.severity().is_fatal()
    }
}

impl GalaxyError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnsupportedPhase { .. } | Self::PhaseRegression(_) | Self::Oracle(_) => {
                ErrorSeverity::Fatal
            }
            Self::InvalidTarget(_) | Self::ComponentUnavailable { .. } | Self::SessionFinished => {
                ErrorSeverity::Validation
            }
            Self::BlockedMovement { .. } | Self::InsufficientResource { .. } => {
                ErrorSeverity::Recoverable
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedPhase { .. } => "ENGINE_UNSUPPORTED_PHASE",
            Self::PhaseRegression(_) => "ENGINE_PHASE_REGRESSION",
            Self::InvalidTarget(_) => "ENGINE_INVALID_TARGET",
            Self::BlockedMovement { .. } => "ENGINE_BLOCKED_MOVEMENT",
            Self::InsufficientResource { .. } => "ENGINE_INSUFFICIENT_RESOURCE",
            Self::ComponentUnavailable { .. } => "ENGINE_COMPONENT_UNAVAILABLE",
            Self::SessionFinished => "ENGINE_SESSION_FINISHED",
            Self::Oracle(_) => "ENGINE_ORACLE",
        }
    }
}
