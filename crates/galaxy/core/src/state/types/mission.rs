//! AI missions: one intent object per fleet.

use super::common::{FleetId, MissionId, PlanetId, RealmId, Sector, SystemId};
use super::ship::ShipRole;

/// Mission phases in the order they are entered.
///
/// Not every mission kind visits every phase; see [`MissionKind::uses_phase`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MissionPhase {
    Planning,
    Loading,
    Trekking,
    Executing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MissionKind {
    Colonize { planet: PlanetId },
    Explore { system: SystemId },
    Defend { planet: PlanetId },
    Attack { planet: PlanetId },
    Move,
    /// Bring a ship of `role` to the staging sector of `attack`.
    Gather { role: ShipRole, attack: MissionId },
    Espionage { planet: PlanetId },
}

impl MissionKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Colonize { .. } => "colonize",
            Self::Explore { .. } => "explore",
            Self::Defend { .. } => "defend",
            Self::Attack { .. } => "attack",
            Self::Move => "move",
            Self::Gather { .. } => "gather",
            Self::Espionage { .. } => "espionage",
        }
    }

    /// Whether missions of this kind ever enter `phase`.
    pub const fn uses_phase(&self, phase: MissionPhase) -> bool {
        use MissionPhase::*;
        match self {
            Self::Colonize { .. } => true,
            Self::Explore { .. } | Self::Espionage { .. } => {
                matches!(phase, Trekking | Executing)
            }
            Self::Defend { .. } | Self::Attack { .. } => {
                matches!(phase, Planning | Trekking | Executing)
            }
            Self::Gather { .. } => matches!(phase, Planning | Trekking),
            Self::Move => matches!(phase, Trekking),
        }
    }

    pub const fn target_planet(&self) -> Option<PlanetId> {
        match self {
            Self::Colonize { planet }
            | Self::Defend { planet }
            | Self::Attack { planet }
            | Self::Espionage { planet } => Some(*planet),
            Self::Explore { .. } | Self::Move | Self::Gather { .. } => None,
        }
    }
}

/// Raised when a phase change would move a mission backwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("mission {mission} cannot move from {from:?} back to {to:?}")]
pub struct PhaseRegression {
    pub mission: MissionId,
    pub from: MissionPhase,
    pub to: MissionPhase,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mission {
    pub id: MissionId,
    pub realm: RealmId,
    pub kind: MissionKind,
    phase: MissionPhase,
    pub target: Sector,
    pub fleet: Option<FleetId>,
}

impl Mission {
    pub fn new(
        id: MissionId,
        realm: RealmId,
        kind: MissionKind,
        phase: MissionPhase,
        target: Sector,
    ) -> Self {
        Self {
            id,
            realm,
            kind,
            phase,
            target,
            fleet: None,
        }
    }

    pub fn phase(&self) -> MissionPhase {
        self.phase
    }

    /// Moves the mission forward to `phase`. Staying in place is allowed.
    pub fn promote(&mut self, phase: MissionPhase) -> Result<(), PhaseRegression> {
        if phase < self.phase {
            return Err(PhaseRegression {
                mission: self.id,
                from: self.phase,
                to: phase,
            });
        }
        self.phase = phase;
        Ok(())
    }

    pub fn is_unassigned(&self) -> bool {
        self.fleet.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_only_move_forward() {
        let mut mission = Mission::new(
            MissionId(1),
            RealmId(0),
            MissionKind::Colonize {
                planet: PlanetId(4),
            },
            MissionPhase::Planning,
            Sector::ORIGIN,
        );
        mission.promote(MissionPhase::Loading).unwrap();
        mission.promote(MissionPhase::Loading).unwrap();
        let err = mission.promote(MissionPhase::Planning).unwrap_err();
        assert_eq!(err.from, MissionPhase::Loading);
        assert_eq!(mission.phase(), MissionPhase::Loading);
    }

    #[test]
    fn explore_never_plans() {
        let kind = MissionKind::Explore {
            system: SystemId(2),
        };
        assert!(!kind.uses_phase(MissionPhase::Planning));
        assert!(kind.uses_phase(MissionPhase::Trekking));
    }
}
