//! Per-realm technology levels and research progress.

use strum::{EnumCount, IntoEnumIterator};

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::EnumIter,
    strum::EnumCount,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TechCategory {
    Combat,
    Defense,
    Hulls,
    Improvements,
    Propulsion,
    Electronics,
}

impl TechCategory {
    const fn slot(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TechList {
    levels: [u32; TechCategory::COUNT],
    points: [u32; TechCategory::COUNT],
}

impl TechList {
    pub fn level(&self, category: TechCategory) -> u32 {
        self.levels[category.slot()]
    }

    pub fn set_level(&mut self, category: TechCategory, level: u32) {
        self.levels[category.slot()] = level;
    }

    pub fn points(&self, category: TechCategory) -> u32 {
        self.points[category.slot()]
    }

    pub fn total_levels(&self) -> u32 {
        self.levels.iter().sum()
    }

    /// Splits `income` evenly over all categories and advances every category
    /// whose points reach `cost_per_level × (level + 1)`.
    ///
    /// Returns the categories that gained a level.
    pub fn add_research(&mut self, income: u32, cost_per_level: u32) -> Vec<TechCategory> {
        let share = income / TechCategory::COUNT as u32;
        let remainder = income % TechCategory::COUNT as u32;
        let mut advanced = Vec::new();

        for (index, category) in TechCategory::iter().enumerate() {
            let bonus = u32::from((index as u32) < remainder);
            let slot = category.slot();
            self.points[slot] += share + bonus;

            let cost = cost_per_level.max(1) * (self.levels[slot] + 1);
            if self.points[slot] >= cost {
                self.points[slot] -= cost;
                self.levels[slot] += 1;
                advanced.push(category);
            }
        }

        advanced
    }

    /// First category in which `other` is ahead of this list.
    pub fn first_behind(&self, other: &TechList) -> Option<TechCategory> {
        TechCategory::iter().find(|&category| other.level(category) > self.level(category))
    }
}
