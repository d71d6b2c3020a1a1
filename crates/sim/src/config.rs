//! Simulation settings loaded from the environment.
use std::env;
use std::path::PathBuf;

/// Settings for one headless run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    pub seed: u64,
    pub turns: u32,
    pub realms: usize,
    /// Width and height of the square galaxy map.
    pub map_size: u32,
    pub news_interval: u32,
    pub log_dir: PathBuf,
}

impl SimConfig {
    pub const MIN_REALMS: usize = 2;
    pub const MAX_REALMS: usize = 8;
    pub const MIN_MAP_SIZE: u32 = 16;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `GALAXY_SEED` - Game seed (default: 7)
    /// - `GALAXY_TURNS` - Turns to simulate (default: 50)
    /// - `GALAXY_REALMS` - AI realms, 2 to 8 (default: 4)
    /// - `GALAXY_MAP_SIZE` - Map width and height, at least 16 (default: 40)
    /// - `GALAXY_NEWS_INTERVAL` - Turns between news digests (default: 10)
    /// - `GALAXY_LOG_DIR` - Log directory (default: platform cache directory)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(seed) = read_env::<u64>("GALAXY_SEED") {
            config.seed = seed;
        }
        if let Some(turns) = read_env::<u32>("GALAXY_TURNS") {
            config.turns = turns;
        }
        if let Some(realms) = read_env::<usize>("GALAXY_REALMS") {
            config.realms = realms.clamp(Self::MIN_REALMS, Self::MAX_REALMS);
        }
        if let Some(size) = read_env::<u32>("GALAXY_MAP_SIZE") {
            config.map_size = size.max(Self::MIN_MAP_SIZE);
        }
        if let Some(interval) = read_env::<u32>("GALAXY_NEWS_INTERVAL") {
            config.news_interval = interval.max(1);
        }
        if let Ok(dir) = env::var("GALAXY_LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }

        config
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 7,
            turns: 50,
            realms: 4,
            map_size: 40,
            news_interval: 10,
            log_dir: default_log_dir(),
        }
    }
}

/// Platform cache directory, e.g. `~/.cache/galaxy/logs` on Linux.
fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "galaxy")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/galaxy"))
        .join("logs")
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
