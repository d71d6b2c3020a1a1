//! Ground troop arithmetic for planetary invasions.

/// Troop strengths on both sides of a landing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InvasionOdds {
    pub ship_troops: u32,
    pub planet_troops: u32,
}

impl InvasionOdds {
    /// Computes the odds of a landing.
    ///
    /// # Formula
    ///
    /// ```text
    /// ship_troops   = race_power * colonists * (100 + bonus) / 100
    /// planet_troops = 0                                  if troop_power == 0
    ///               = max(1, troop_power - suppression)  otherwise
    /// ```
    pub fn new(
        race_power: u32,
        colonists: u32,
        bonus: u32,
        troop_power: u32,
        suppression: u32,
    ) -> Self {
        Self {
            ship_troops: ship_troops(race_power, colonists, bonus),
            planet_troops: planet_troops(troop_power, suppression),
        }
    }

    /// Attackers win only with strictly more troops.
    pub const fn succeeds(&self) -> bool {
        self.ship_troops > self.planet_troops
    }

    /// Troops left standing after a successful landing.
    pub const fn remaining(&self) -> u32 {
        self.ship_troops.saturating_sub(self.planet_troops)
    }
}

pub fn ship_troops(race_power: u32, colonists: u32, bonus: u32) -> u32 {
    let troops = u64::from(race_power) * u64::from(colonists) * (100 + u64::from(bonus)) / 100;
    u32::try_from(troops).unwrap_or(u32::MAX)
}

pub fn planet_troops(troop_power: u32, suppression: u32) -> u32 {
    if troop_power == 0 {
        0
    } else {
        troop_power.saturating_sub(suppression).max(1)
    }
}

/// Population seeded by the surviving troops, at least one worker.
pub fn settled_population(remaining: u32, race_power: u32, max_population: u32) -> u32 {
    (remaining / race_power.max(1)).max(1).min(max_population.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_troops_fail() {
        let odds = InvasionOdds {
            ship_troops: 100,
            planet_troops: 100,
        };
        assert!(!odds.succeeds());
    }

    #[test]
    fn invasion_bonus_scales_troops() {
        assert_eq!(ship_troops(10, 4, 50), 60);
        assert_eq!(ship_troops(10, 4, 0), 40);
    }

    #[test]
    fn suppression_never_drops_a_garrison_below_one() {
        assert_eq!(planet_troops(30, 100), 1);
        assert_eq!(planet_troops(30, 10), 20);
        assert_eq!(planet_troops(0, 5), 0);
    }

    #[test]
    fn settlers_respect_capacity() {
        assert_eq!(settled_population(5, 10, 8), 1);
        assert_eq!(settled_population(200, 10, 8), 8);
    }
}
