/// Galaxy rule constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GalaxyConfig {
    /// Turns between two news digests.
    pub news_interval: u32,
    /// Animation ticks an AI ship lingers after firing.
    pub ai_delay_ticks: u32,
    /// Combat rounds before a stalemate is called a draw.
    pub max_combat_rounds: u32,
    pub governor_escape_cost: i64,
    pub research_cost_per_level: u32,
    pub growth_threshold: u32,
    pub culture_per_radius: u32,
}

impl GalaxyConfig {
    // ===== compile-time constants =====
    /// Actions per point of tactic speed during a siege.
    pub const SIEGE_ACTIONS_PER_TACTIC_SPEED: u32 = 4;
    pub const MAX_CULTURE_RADIUS: u32 = 4;
    pub const PLANET_SCAN_RANGE: u32 = 2;
    pub const RENDEZVOUS_PROBES: u32 = 100;
    pub const RENDEZVOUS_PROBE_RADIUS: i32 = 5;
    /// Reputation lost by a realm that uses an orbital nuke.
    pub const NUKE_REPUTATION_PENALTY: i32 = 10;
    /// Opinion every other realm loses of a nuking realm.
    pub const NUKE_OPINION_PENALTY: i32 = 20;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_NEWS_INTERVAL: u32 = 10;
    pub const DEFAULT_AI_DELAY_TICKS: u32 = 30;
    pub const DEFAULT_MAX_COMBAT_ROUNDS: u32 = 50;
    pub const DEFAULT_GOVERNOR_ESCAPE_COST: i64 = 50;
    pub const DEFAULT_RESEARCH_COST_PER_LEVEL: u32 = 40;
    pub const DEFAULT_GROWTH_THRESHOLD: u32 = 10;
    pub const DEFAULT_CULTURE_PER_RADIUS: u32 = 50;

    pub fn new() -> Self {
        Self {
            news_interval: Self::DEFAULT_NEWS_INTERVAL,
            ai_delay_ticks: Self::DEFAULT_AI_DELAY_TICKS,
            max_combat_rounds: Self::DEFAULT_MAX_COMBAT_ROUNDS,
            governor_escape_cost: Self::DEFAULT_GOVERNOR_ESCAPE_COST,
            research_cost_per_level: Self::DEFAULT_RESEARCH_COST_PER_LEVEL,
            growth_threshold: Self::DEFAULT_GROWTH_THRESHOLD,
            culture_per_radius: Self::DEFAULT_CULTURE_PER_RADIUS,
        }
    }

    pub fn with_news_interval(mut self, news_interval: u32) -> Self {
        self.news_interval = news_interval.max(1);
        self
    }
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self::new()
    }
}
