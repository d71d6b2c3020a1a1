use std::fmt;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "#{}"), self.0)
            }
        }
    };
}

arena_id!(
    /// Index of a realm in the round-robin order.
    RealmId,
    "realm"
);
arena_id!(
    /// Stable identifier for a fleet in the fleet arena.
    FleetId,
    "fleet"
);
arena_id!(
    /// Stable identifier for a ship. Ships live inside their fleet.
    ShipId,
    "ship"
);
arena_id!(
    /// Stable identifier for a planet.
    PlanetId,
    "planet"
);
arena_id!(
    /// Stable identifier for a solar system.
    SystemId,
    "system"
);
arena_id!(
    /// Stable identifier for an AI mission.
    MissionId,
    "mission"
);
arena_id!(
    /// Stable identifier for a leader (governors, admirals).
    LeaderId,
    "leader"
);

impl RealmId {
    /// Position of the realm inside `GalaxyState::realms`.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Discrete map coordinate.
///
/// Distances are Chebyshev distances: one move covers one sector in any of
/// the eight directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sector {
    pub x: i32,
    pub y: i32,
}

impl Sector {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Sector) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        dx.max(dy)
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns the neighbouring sector one step closer to `target`.
    pub fn step_toward(self, target: Sector) -> Sector {
        Sector {
            x: self.x + (target.x - self.x).signum(),
            y: self.y + (target.y - self.y).signum(),
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Integer pool with a current and maximum value (shields, armor, hit points).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub const fn new(current: u32, maximum: u32) -> Self {
        Self { current, maximum }
    }

    pub const fn full(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    pub const fn is_full(&self) -> bool {
        self.current >= self.maximum
    }

    pub const fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Removes up to `amount` points and returns how many were removed.
    pub fn deplete(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.current);
        self.current -= removed;
        removed
    }

    /// Restores up to `amount` points without exceeding the maximum.
    pub fn restore(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.maximum);
    }

    pub fn fill(&mut self) {
        self.current = self.maximum;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chebyshev_distance_counts_diagonals_as_one() {
        assert_eq!(Sector::new(0, 0).distance(Sector::new(3, 2)), 3);
        assert_eq!(Sector::new(-2, 4).distance(Sector::new(1, -1)), 5);
    }

    #[test]
    fn step_toward_moves_one_sector() {
        let step = Sector::new(0, 0).step_toward(Sector::new(5, -3));
        assert_eq!(step, Sector::new(1, -1));
        assert_eq!(Sector::new(2, 2).step_toward(Sector::new(2, 2)), Sector::new(2, 2));
    }

    #[test]
    fn meter_depletes_without_underflow() {
        let mut meter = ResourceMeter::full(3);
        assert_eq!(meter.deplete(5), 3);
        assert!(meter.is_empty());
        meter.restore(10);
        assert!(meter.is_full());
    }
}
