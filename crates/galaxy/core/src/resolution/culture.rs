//! Cultural borders.

use crate::env::ConfigOracle;
use crate::state::{CultureClaim, GalaxyState, RealmId, Sector};

/// Influence radius of a planet with `culture` points.
pub fn influence_radius<C>(culture: u32, config: &C) -> u32
where
    C: ConfigOracle + ?Sized,
{
    (1 + culture / config.culture_per_radius().max(1)).min(config.max_culture_radius())
}

/// Rebuilds the border map from every owned, populated planet.
///
/// A contested sector goes to the strongest broadcaster; on equal strength
/// the earlier claim stands.
pub fn broadcast_culture<C>(state: &mut GalaxyState, config: &C)
where
    C: ConfigOracle + ?Sized,
{
    state.culture.clear();
    let broadcasters: Vec<(RealmId, Sector, u32)> = state
        .planets
        .values()
        .filter(|planet| planet.is_populated())
        .filter_map(|planet| planet.owner.map(|owner| (owner, planet.sector, planet.culture)))
        .collect();

    for (realm, center, strength) in broadcasters {
        let radius = influence_radius(strength, config) as i32;
        for dx in -radius..=radius {
            for dy in -radius..=radius {
                let sector = center.offset(dx, dy);
                let stronger = state
                    .culture
                    .get(&sector)
                    .is_none_or(|claim| strength > claim.strength);
                if stronger {
                    state.culture.insert(sector, CultureClaim { realm, strength });
                }
            }
        }
    }
}

/// Realm whose cultural border covers `sector`.
pub fn border_owner(state: &GalaxyState, sector: Sector) -> Option<RealmId> {
    state.culture.get(&sector).map(|claim| claim.realm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GalaxyConfig;
    use crate::state::{Attitude, Controller, Race};

    #[test]
    fn radius_grows_with_culture_and_caps() {
        let config = GalaxyConfig::default();
        assert_eq!(influence_radius(0, &config), 1);
        assert_eq!(influence_radius(120, &config), 3);
        assert_eq!(influence_radius(10_000, &config), GalaxyConfig::MAX_CULTURE_RADIUS);
    }

    #[test]
    fn stronger_cultures_win_contested_sectors() {
        let config = GalaxyConfig::default();
        let mut state = GalaxyState::new(2);
        let weak = state.add_realm("Humans", Controller::Ai, Attitude::Logical, Race::new("Human", 10));
        let strong = state.add_realm("Psilons", Controller::Ai, Attitude::Scientific, Race::new("Psilon", 6));

        let sol = state.add_system("Sol", Sector::new(0, 0));
        let earth = state.add_planet(sol, "Earth", 12).unwrap();
        state.settle_home_world(earth, weak, 8);
        let mentar = state.add_system("Mentar", Sector::new(2, 0));
        let psilon = state.add_planet(mentar, "Mentar", 12).unwrap();
        state.settle_home_world(psilon, strong, 8);
        state.planet_mut(psilon).unwrap().culture = 60;

        broadcast_culture(&mut state, &config);

        assert_eq!(border_owner(&state, Sector::new(1, 0)), Some(strong));
        assert_eq!(border_owner(&state, Sector::new(-1, 0)), Some(weak));
        assert_eq!(border_owner(&state, Sector::new(9, 9)), None);
    }
}
