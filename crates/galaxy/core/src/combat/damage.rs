//! Damage application shared by ship combat and planetary turrets.

use crate::env::{RngOracle, compute_seed};
use crate::state::{Ship, WeaponKind};

// ============================================================================
// Hit Report
// ============================================================================

/// What a single hit removed from its target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitReport {
    /// Shield points lost (0 or 1).
    pub shield: u32,
    /// Armor points lost (0 or 1).
    pub armor: u32,
    /// Component hit points lost.
    pub hull: u32,
    /// The hit did not get through a shield or armor layer.
    pub deflected: bool,
    /// The ship reached 0 hull points.
    pub destroyed: bool,
}

impl HitReport {
    /// Total defense removed across all layers.
    pub fn total(&self) -> u32 {
        self.shield + self.armor + self.hull
    }
}

// ============================================================================
// Damage Application
// ============================================================================

/// Whether a weapon roll connects.
///
/// `roll` is a d100 result; the hit lands on `roll <= accuracy`.
pub fn check_hit(weapon: WeaponKind, roll: u32) -> bool {
    roll <= weapon.accuracy()
}

/// Applies one hit of `power` to `ship`.
///
/// # Algorithm
///
/// ```text
/// for layer in [shield, armor]:
///     if layer > 0:
///         if power <= layer: deflected, stop
///         power -= layer
///         layer -= 1
/// while power > 0 and hull > 0:
///     one hit point off a random surviving component
///     power -= 1
/// ```
///
/// Pool maxima are left alone; they are recomputed on repair.
pub fn apply_hit(
    ship: &mut Ship,
    power: u32,
    rng: &(impl RngOracle + ?Sized),
    seed: u64,
) -> HitReport {
    let mut report = HitReport::default();
    let mut power = power;

    if power == 0 {
        report.deflected = true;
        return report;
    }

    match penetrate(&mut ship.shield.current, power) {
        Some((rest, lost)) => {
            report.shield = lost;
            power = rest;
        }
        None => {
            report.deflected = true;
            return report;
        }
    }

    match penetrate(&mut ship.armor.current, power) {
        Some((rest, lost)) => {
            report.armor = lost;
            power = rest;
        }
        None => {
            report.deflected = true;
            return report;
        }
    }

    let mut step = 0u64;
    while power > 0 {
        let alive: Vec<usize> = ship
            .components
            .iter()
            .enumerate()
            .filter(|(_, component)| component.is_working())
            .map(|(index, _)| index)
            .collect();
        if alive.is_empty() {
            break;
        }

        let pick = rng.pick(compute_seed(seed, step, ship.id.0, 0), alive.len());
        let component = &mut ship.components[alive[pick]];
        report.hull += component.hit_points.deplete(1);
        power -= 1;
        step += 1;
    }

    report.destroyed = ship.is_destroyed();
    report
}

/// Runs `power` through one defensive layer.
///
/// Returns the power left after the layer and the points the layer lost, or
/// `None` when the layer stops the hit. An empty layer lets everything through.
fn penetrate(layer: &mut u32, power: u32) -> Option<(u32, u32)> {
    if *layer == 0 {
        return Some((power, 0));
    }
    if power <= *layer {
        return None;
    }
    let rest = power - *layer;
    *layer -= 1;
    Some((rest, 1))
}
