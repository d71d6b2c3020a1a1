//! Traits describing read-only collaborators of the engines.
//!
//! Oracles expose static map geometry, rule tunables, deterministic
//! randomness and the diplomacy negotiator. The [`Env`] aggregate bundles
//! them so the engines can access everything they need without hard coupling
//! to concrete implementations.
mod config;
mod diplomacy;
mod error;
mod map;
mod rng;

pub use config::ConfigOracle;
pub use diplomacy::{AttitudeNegotiator, DiplomacyOracle};
pub use error::OracleError;
pub use map::{MapDimensions, MapOracle, StaticMap};
pub use rng::{PcgRng, RngOracle, compute_seed};

/// Aggregates the oracles required by the combat, siege and AI engines.
pub struct Env<'a, M, C, R, D>
where
    M: MapOracle + ?Sized,
    C: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
    D: DiplomacyOracle + ?Sized,
{
    map: Option<&'a M>,
    config: Option<&'a C>,
    rng: Option<&'a R>,
    diplomacy: Option<&'a D>,
}

impl<M, C, R, D> Clone for Env<'_, M, C, R, D>
where
    M: MapOracle + ?Sized,
    C: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
    D: DiplomacyOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<M, C, R, D> Copy for Env<'_, M, C, R, D>
where
    M: MapOracle + ?Sized,
    C: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
    D: DiplomacyOracle + ?Sized,
{
}

impl<M, C, R, D> std::fmt::Debug for Env<'_, M, C, R, D>
where
    M: MapOracle + ?Sized,
    C: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
    D: DiplomacyOracle + ?Sized,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Env")
            .field("map", &self.map.is_some())
            .field("config", &self.config.is_some())
            .field("rng", &self.rng.is_some())
            .field("diplomacy", &self.diplomacy.is_some())
            .finish()
    }
}

pub type GalaxyEnv<'a> = Env<
    'a,
    dyn MapOracle + 'a,
    dyn ConfigOracle + 'a,
    dyn RngOracle + 'a,
    dyn DiplomacyOracle + 'a,
>;

impl<'a, M, C, R, D> Env<'a, M, C, R, D>
where
    M: MapOracle + ?Sized,
    C: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
    D: DiplomacyOracle + ?Sized,
{
    pub fn new(
        map: Option<&'a M>,
        config: Option<&'a C>,
        rng: Option<&'a R>,
        diplomacy: Option<&'a D>,
    ) -> Self {
        Self {
            map,
            config,
            rng,
            diplomacy,
        }
    }

    pub fn with_all(map: &'a M, config: &'a C, rng: &'a R, diplomacy: &'a D) -> Self {
        Self::new(Some(map), Some(config), Some(rng), Some(diplomacy))
    }

    /// Returns the MapOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::MapNotAvailable` if no map oracle was provided.
    pub fn map(&self) -> Result<&'a M, OracleError> {
        self.map.ok_or(OracleError::MapNotAvailable)
    }

    /// Returns the ConfigOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ConfigNotAvailable` if no config oracle was provided.
    pub fn config(&self) -> Result<&'a C, OracleError> {
        self.config.ok_or(OracleError::ConfigNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::RngNotAvailable` if no rng oracle was provided.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }

    /// Returns the DiplomacyOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::DiplomacyNotAvailable` if no negotiator was provided.
    pub fn diplomacy(&self) -> Result<&'a D, OracleError> {
        self.diplomacy.ok_or(OracleError::DiplomacyNotAvailable)
    }
}

impl<'a, M, C, R, D> Env<'a, M, C, R, D>
where
    M: MapOracle + 'a,
    C: ConfigOracle + 'a,
    R: RngOracle + 'a,
    D: DiplomacyOracle + 'a,
{
    /// Converts this environment into a trait-object based `GalaxyEnv`.
    pub fn as_galaxy_env(&self) -> GalaxyEnv<'a> {
        let map: Option<&'a dyn MapOracle> = self.map.map(|map| map as _);
        let config: Option<&'a dyn ConfigOracle> = self.config.map(|config| config as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        let diplomacy: Option<&'a dyn DiplomacyOracle> =
            self.diplomacy.map(|diplomacy| diplomacy as _);
        Env::new(map, config, rng, diplomacy)
    }
}
