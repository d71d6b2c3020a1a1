//! Ships and their components.

use super::common::{ResourceMeter, ShipId};

/// Direct-fire weapon families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponKind {
    Beam,
    Railgun,
    Multicannon,
    Plasma,
    PhotonTorpedo,
    HeMissile,
    GravityRipper,
}

impl WeaponKind {
    /// Hit chance in percent for ship-to-ship fire.
    pub const fn accuracy(self) -> u32 {
        match self {
            Self::Beam => 75,
            Self::Railgun => 70,
            Self::Multicannon => 65,
            Self::Plasma => 80,
            Self::PhotonTorpedo => 60,
            Self::HeMissile => 70,
            Self::GravityRipper => 85,
        }
    }
}

/// Every component a ship design can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComponentKind {
    Weapon(WeaponKind),
    OrbitalBomb,
    OrbitalNuke,
    PlanetaryInvasion,
    Shield,
    Armor,
    Engine,
    ColonyModule,
    CargoBay,
    Scanner,
    EspionageModule,
    PrivateerModule,
}

impl ComponentKind {
    pub const fn is_weapon(self) -> bool {
        matches!(self, Self::Weapon(_))
    }

    pub const fn is_bomb(self) -> bool {
        matches!(self, Self::OrbitalBomb | Self::OrbitalNuke)
    }

    /// Components that have an effect against a planet during a siege.
    pub const fn is_siege_capable(self) -> bool {
        matches!(
            self,
            Self::Weapon(_) | Self::OrbitalBomb | Self::OrbitalNuke | Self::PlanetaryInvasion
        )
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Weapon(WeaponKind::Beam) => "beam",
            Self::Weapon(WeaponKind::Railgun) => "railgun",
            Self::Weapon(WeaponKind::Multicannon) => "multicannon",
            Self::Weapon(WeaponKind::Plasma) => "plasma cannon",
            Self::Weapon(WeaponKind::PhotonTorpedo) => "photon torpedo",
            Self::Weapon(WeaponKind::HeMissile) => "HE missile",
            Self::Weapon(WeaponKind::GravityRipper) => "gravity ripper",
            Self::OrbitalBomb => "orbital bomb",
            Self::OrbitalNuke => "orbital nuke",
            Self::PlanetaryInvasion => "planetary invasion module",
            Self::Shield => "shield generator",
            Self::Armor => "armor plating",
            Self::Engine => "engine",
            Self::ColonyModule => "colony module",
            Self::CargoBay => "cargo bay",
            Self::Scanner => "scanner",
            Self::EspionageModule => "espionage module",
            Self::PrivateerModule => "privateer module",
        }
    }
}

/// One installed component.
///
/// `damage` is the component strength: weapon power, shield/armor rating,
/// invasion bonus or scanner range depending on the kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Component {
    pub kind: ComponentKind,
    pub damage: u32,
    pub hit_points: ResourceMeter,
}

impl Component {
    pub const DEFAULT_HIT_POINTS: u32 = 2;

    pub const fn new(kind: ComponentKind, damage: u32) -> Self {
        Self {
            kind,
            damage,
            hit_points: ResourceMeter::full(Self::DEFAULT_HIT_POINTS),
        }
    }

    pub const fn with_hit_points(mut self, hit_points: u32) -> Self {
        self.hit_points = ResourceMeter::full(hit_points);
        self
    }

    pub const fn is_destroyed(&self) -> bool {
        self.hit_points.current == 0
    }

    pub const fn is_working(&self) -> bool {
        !self.is_destroyed()
    }
}

/// Hull families, used for naming and for scout detection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HullClass {
    Probe,
    Freighter,
    Corvette,
    Destroyer,
    Cruiser,
    Battleship,
}

/// What a ship is good for. Derived from its components, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShipRole {
    Colony,
    Spy,
    Trooper,
    Bomber,
    Assault,
    Scout,
    Freighter,
}

impl ShipRole {
    pub const fn is_military(self) -> bool {
        matches!(self, Self::Trooper | Self::Bomber | Self::Assault)
    }
}

/// Transported goods.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cargo {
    pub colonists: u32,
    pub metal: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    pub id: ShipId,
    pub name: String,
    pub hull: HullClass,
    pub components: Vec<Component>,
    pub shield: ResourceMeter,
    pub armor: ResourceMeter,
    pub cargo: Cargo,
    /// Sectors per turn on the galaxy map.
    pub speed: u32,
    /// Combat initiative; also sets the siege action budget.
    pub tactic_speed: u32,
}

impl Ship {
    pub fn new(
        id: ShipId,
        name: impl Into<String>,
        hull: HullClass,
        components: Vec<Component>,
        speed: u32,
        tactic_speed: u32,
    ) -> Self {
        let mut ship = Self {
            id,
            name: name.into(),
            hull,
            components,
            shield: ResourceMeter::default(),
            armor: ResourceMeter::default(),
            cargo: Cargo::default(),
            speed,
            tactic_speed,
        };
        ship.shield = ResourceMeter::full(ship.rating(ComponentKind::Shield));
        ship.armor = ResourceMeter::full(ship.rating(ComponentKind::Armor));
        ship
    }

    pub fn with_cargo(mut self, cargo: Cargo) -> Self {
        self.cargo = cargo;
        self
    }

    /// Summed strength of working components of one kind.
    fn rating(&self, kind: ComponentKind) -> u32 {
        self.components
            .iter()
            .filter(|component| component.kind == kind && component.is_working())
            .map(|component| component.damage)
            .sum()
    }

    pub fn hull_points(&self) -> u32 {
        self.components.iter().map(|c| c.hit_points.current).sum()
    }

    pub fn max_hull_points(&self) -> u32 {
        self.components.iter().map(|c| c.hit_points.maximum).sum()
    }

    pub fn is_destroyed(&self) -> bool {
        self.hull_points() == 0
    }

    pub fn is_fully_repaired(&self) -> bool {
        self.shield.is_full()
            && self.armor.is_full()
            && self.components.iter().all(|c| c.hit_points.is_full())
    }

    pub fn has_working(&self, kind: ComponentKind) -> bool {
        self.components
            .iter()
            .any(|component| component.kind == kind && component.is_working())
    }

    pub fn has_weapons(&self) -> bool {
        self.components
            .iter()
            .any(|component| component.kind.is_weapon() && component.is_working())
    }

    pub fn has_bombs(&self) -> bool {
        self.components
            .iter()
            .any(|component| component.kind.is_bomb() && component.is_working())
    }

    /// True when the ship can still land troops on a planet.
    pub fn can_invade(&self) -> bool {
        self.cargo.colonists > 0 && self.has_working(ComponentKind::PlanetaryInvasion)
    }

    pub fn shield_generators(&self) -> u32 {
        self.components
            .iter()
            .filter(|c| c.kind == ComponentKind::Shield && c.is_working())
            .count() as u32
    }

    pub fn scanner_range(&self) -> u32 {
        self.components
            .iter()
            .filter(|c| c.kind == ComponentKind::Scanner && c.is_working())
            .map(|c| c.damage)
            .max()
            .unwrap_or(1)
            .max(1)
    }

    /// Combined weapon and bomb strength, used for military rankings.
    pub fn firepower(&self) -> u32 {
        self.components
            .iter()
            .filter(|c| (c.kind.is_weapon() || c.kind.is_bomb()) && c.is_working())
            .map(|c| c.damage)
            .sum()
    }

    pub fn role(&self) -> ShipRole {
        if self.has_working(ComponentKind::ColonyModule) {
            ShipRole::Colony
        } else if self.has_working(ComponentKind::EspionageModule) {
            ShipRole::Spy
        } else if self.has_working(ComponentKind::PlanetaryInvasion) {
            ShipRole::Trooper
        } else if self.has_bombs() {
            ShipRole::Bomber
        } else if self.has_weapons() {
            ShipRole::Assault
        } else if self.hull == HullClass::Probe || self.has_working(ComponentKind::Scanner) {
            ShipRole::Scout
        } else {
            ShipRole::Freighter
        }
    }

    /// Recharges shields by one point per working generator.
    pub fn recharge_shields(&mut self) {
        let generators = self.shield_generators();
        self.shield.restore(generators);
    }

    /// One turn of field repairs: one point to each damaged pool and component.
    pub fn repair_partial(&mut self) {
        for component in &mut self.components {
            component.hit_points.restore(1);
        }
        self.refresh_pools();
        self.shield.restore(1);
        self.armor.restore(1);
    }

    pub fn repair_full(&mut self) {
        for component in &mut self.components {
            component.hit_points.fill();
        }
        self.refresh_pools();
        self.shield.fill();
        self.armor.fill();
    }

    /// Recomputes shield and armor maxima from working components.
    fn refresh_pools(&mut self) {
        self.shield.maximum = self.rating(ComponentKind::Shield);
        self.shield.current = self.shield.current.min(self.shield.maximum);
        self.armor.maximum = self.rating(ComponentKind::Armor);
        self.armor.current = self.armor.current.min(self.armor.maximum);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frigate() -> Ship {
        Ship::new(
            ShipId(1),
            "Frigate",
            HullClass::Corvette,
            vec![
                Component::new(ComponentKind::Weapon(WeaponKind::Beam), 4),
                Component::new(ComponentKind::Shield, 2),
                Component::new(ComponentKind::Armor, 3),
                Component::new(ComponentKind::Engine, 1),
            ],
            2,
            2,
        )
    }

    #[test]
    fn pools_are_built_from_components() {
        let ship = frigate();
        assert_eq!(ship.shield, ResourceMeter::full(2));
        assert_eq!(ship.armor, ResourceMeter::full(3));
        assert_eq!(ship.hull_points(), 8);
        assert_eq!(ship.role(), ShipRole::Assault);
    }

    #[test]
    fn partial_repair_restores_one_point() {
        let mut ship = frigate();
        ship.components[0].hit_points.current = 0;
        ship.shield.current = 0;
        ship.repair_partial();
        assert_eq!(ship.components[0].hit_points.current, 1);
        assert_eq!(ship.shield.current, 1);
        assert!(!ship.is_fully_repaired());
        ship.repair_full();
        assert!(ship.is_fully_repaired());
    }

    #[test]
    fn colony_role_wins_over_weapons() {
        let ship = Ship::new(
            ShipId(2),
            "Ark",
            HullClass::Freighter,
            vec![
                Component::new(ComponentKind::ColonyModule, 0),
                Component::new(ComponentKind::Weapon(WeaponKind::Railgun), 1),
            ],
            1,
            1,
        );
        assert_eq!(ship.role(), ShipRole::Colony);
    }
}
