//! Oracle access errors.

use crate::error::{ErrorSeverity, GalaxyError};

/// Errors that occur when a required oracle is missing from the environment.
///
/// The engines cannot proceed without map, configuration or RNG access, so
/// every variant is fatal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("MapOracle not available")]
    MapNotAvailable,

    #[error("ConfigOracle not available")]
    ConfigNotAvailable,

    #[error("RngOracle not available")]
    RngNotAvailable,

    #[error("DiplomacyOracle not available")]
    DiplomacyNotAvailable,
}

impl GalaxyError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MapNotAvailable => "ORACLE_MAP_NOT_AVAILABLE",
            Self::ConfigNotAvailable => "ORACLE_CONFIG_NOT_AVAILABLE",
            Self::RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
            Self::DiplomacyNotAvailable => "ORACLE_DIPLOMACY_NOT_AVAILABLE",
        }
    }
}
