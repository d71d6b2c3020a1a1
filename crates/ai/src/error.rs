//! Errors surfaced by the turn scheduler.
use galaxy_core::{EngineError, ErrorSeverity, GalaxyError, RealmId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SchedulerError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SchedulerError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("turn cursor points at unknown realm {0}")]
    UnknownRealm(RealmId),
}

impl GalaxyError for SchedulerError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Engine(err) => err.severity(),
            Self::UnknownRealm(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Engine(err) => err.error_code(),
            Self::UnknownRealm(_) => "SCHEDULER_UNKNOWN_REALM",
        }
    }
}
