//! Configuration oracle for exposing galaxy tunables to the engines.

use crate::config::GalaxyConfig;

/// Provides access to runtime configuration values.
pub trait ConfigOracle: Send + Sync {
    /// Turns between two news digests.
    fn news_interval(&self) -> u32;

    /// Animation ticks an AI ship waits after firing before its turn ends.
    fn ai_delay_ticks(&self) -> u32;

    /// Combat rounds after which a battle ends in a draw.
    fn max_combat_rounds(&self) -> u32;

    /// Credits a wealthy governor pays to flee a conquered planet.
    fn governor_escape_cost(&self) -> i64;

    /// Research points for the first level of a category.
    fn research_cost_per_level(&self) -> u32;

    /// Growth points needed for one more worker.
    fn growth_threshold(&self) -> u32;

    /// Culture needed per sector of influence radius.
    fn culture_per_radius(&self) -> u32;

    fn max_culture_radius(&self) -> u32;

    /// Sensor range of an owned planet.
    fn planet_scan_range(&self) -> u32;

    /// Random probes tried when an attack rendezvous sector is blocked.
    fn rendezvous_probes(&self) -> u32;

    /// Maximum offset of one rendezvous probe, in sectors.
    fn rendezvous_probe_radius(&self) -> i32;
}

impl ConfigOracle for GalaxyConfig {
    fn news_interval(&self) -> u32 {
        self.news_interval
    }

    fn ai_delay_ticks(&self) -> u32 {
        self.ai_delay_ticks
    }

    fn max_combat_rounds(&self) -> u32 {
        self.max_combat_rounds
    }

    fn governor_escape_cost(&self) -> i64 {
        self.governor_escape_cost
    }

    fn research_cost_per_level(&self) -> u32 {
        self.research_cost_per_level
    }

    fn growth_threshold(&self) -> u32 {
        self.growth_threshold
    }

    fn culture_per_radius(&self) -> u32 {
        self.culture_per_radius
    }

    fn max_culture_radius(&self) -> u32 {
        GalaxyConfig::MAX_CULTURE_RADIUS
    }

    fn planet_scan_range(&self) -> u32 {
        GalaxyConfig::PLANET_SCAN_RANGE
    }

    fn rendezvous_probes(&self) -> u32 {
        GalaxyConfig::RENDEZVOUS_PROBES
    }

    fn rendezvous_probe_radius(&self) -> i32 {
        GalaxyConfig::RENDEZVOUS_PROBE_RADIUS
    }
}
