use std::collections::HashSet;

use crate::state::Sector;

/// Static map oracle exposing the galaxy bounds and impassable sectors
/// (stars, black holes, nebula cores).
pub trait MapOracle: Send + Sync {
    fn dimensions(&self) -> MapDimensions;

    fn is_obstacle(&self, sector: Sector) -> bool;

    fn contains(&self, sector: Sector) -> bool {
        self.dimensions().contains(sector)
    }

    /// Inside the map and not an obstacle.
    fn is_open(&self, sector: Sector) -> bool {
        self.contains(sector) && !self.is_obstacle(sector)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, sector: Sector) -> bool {
        sector.x >= 0
            && sector.y >= 0
            && sector.x < self.width as i32
            && sector.y < self.height as i32
    }

    pub fn clamp(&self, sector: Sector) -> Sector {
        Sector::new(
            sector.x.clamp(0, self.width.saturating_sub(1) as i32),
            sector.y.clamp(0, self.height.saturating_sub(1) as i32),
        )
    }
}

/// Map oracle backed by a fixed obstacle set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticMap {
    dimensions: MapDimensions,
    obstacles: HashSet<Sector>,
}

impl StaticMap {
    pub fn new(dimensions: MapDimensions) -> Self {
        Self {
            dimensions,
            obstacles: HashSet::new(),
        }
    }

    pub fn with_obstacles(mut self, obstacles: impl IntoIterator<Item = Sector>) -> Self {
        self.obstacles.extend(obstacles);
        self
    }
}

impl MapOracle for StaticMap {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn is_obstacle(&self, sector: Sector) -> bool {
        self.obstacles.contains(&sector)
    }
}
