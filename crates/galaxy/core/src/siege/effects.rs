//! Effect table for components used against a planet.

use crate::state::{BuildingKind, Planet, WeaponKind};

/// Outcome of one component use against a planet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SiegeEffect {
    /// The roll missed every threshold.
    Missed,
    /// The planet's bombing shield absorbed the attack.
    Shielded,
    /// Suppression went up by one.
    Suppressed,
    BuildingDestroyed(BuildingKind),
    /// A demolition roll landed but the planet has no buildings left.
    NothingToDemolish,
    WorkersKilled(u32),
    Nuked {
        workers: u32,
        building: Option<BuildingKind>,
    },
    InvasionSucceeded {
        ship_troops: u32,
        planet_troops: u32,
        population: u32,
    },
    InvasionFailed {
        ship_troops: u32,
        planet_troops: u32,
    },
    /// The component cannot act on a planet right now.
    NoEffect,
}

impl SiegeEffect {
    /// Whether the planet changed because of this effect.
    pub const fn is_effective(&self) -> bool {
        !matches!(
            self,
            Self::Missed | Self::Shielded | Self::NothingToDemolish | Self::NoEffect
        )
    }
}

/// Roll limits for a weapon used in orbit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Thresholds {
    /// Rolls at or below this add suppression.
    pub suppression: u32,
    /// Rolls at or below this also knock down a building.
    pub demolition: u32,
}

/// Threshold table for ship weapons.
///
/// ```text
/// beam, railgun, multicannon, plasma  suppression 3x  demolition 1x
/// photon torpedo, he missile          suppression 2x  demolition 2x
/// gravity ripper                      suppression 2x  demolition 6x
/// ```
pub const fn weapon_thresholds(weapon: WeaponKind, damage: u32) -> Thresholds {
    let (suppression, demolition) = match weapon {
        WeaponKind::Beam | WeaponKind::Railgun | WeaponKind::Multicannon | WeaponKind::Plasma => {
            (3, 1)
        }
        WeaponKind::PhotonTorpedo | WeaponKind::HeMissile => (2, 2),
        WeaponKind::GravityRipper => (2, 6),
    };
    Thresholds {
        suppression: damage.saturating_mul(suppression),
        demolition: damage.saturating_mul(demolition),
    }
}

/// Fires a weapon at the planet. `pick` selects the building to destroy.
pub fn weapon_strike(
    planet: &mut Planet,
    weapon: WeaponKind,
    damage: u32,
    roll: u32,
    pick: u32,
) -> Vec<SiegeEffect> {
    let limits = weapon_thresholds(weapon, damage);
    let mut effects = Vec::new();

    if roll <= limits.suppression {
        planet.suppression += 1;
        effects.push(SiegeEffect::Suppressed);
    }
    if roll <= limits.demolition {
        effects.push(demolish(planet, pick));
    }
    if effects.is_empty() {
        effects.push(SiegeEffect::Missed);
    }
    effects
}

/// Drops an orbital bomb: a worker on `roll <= damage`, a building otherwise.
pub fn bomb_strike(planet: &mut Planet, damage: u32, roll: u32, pick: u32) -> SiegeEffect {
    if roll <= damage {
        if planet.kill_worker() {
            SiegeEffect::WorkersKilled(1)
        } else {
            SiegeEffect::Missed
        }
    } else {
        demolish(planet, pick)
    }
}

/// Detonates an orbital nuke. Always hits.
pub fn nuke_strike(planet: &mut Planet, damage: u32, pick: u32) -> SiegeEffect {
    let workers = planet.kill_workers((damage / 10).max(1));
    let building = match demolish(planet, pick) {
        SiegeEffect::BuildingDestroyed(kind) => Some(kind),
        _ => None,
    };
    SiegeEffect::Nuked { workers, building }
}

fn demolish(planet: &mut Planet, pick: u32) -> SiegeEffect {
    if planet.buildings.is_empty() {
        return SiegeEffect::NothingToDemolish;
    }
    let index = pick as usize % planet.buildings.len();
    match planet.remove_building(index) {
        Some(kind) => SiegeEffect::BuildingDestroyed(kind),
        None => SiegeEffect::NothingToDemolish,
    }
}
