//! Planetary output and population growth.

use crate::env::ConfigOracle;
use crate::state::{BuildingKind, GalaxyState, Planet};

/// One turn of output from a planet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlanetYield {
    pub credits: u32,
    pub research: u32,
    pub culture: u32,
}

/// ```text
/// credits  = population / 2 + 2 * factories
/// research = population / 3 + 3 * labs
/// culture  = 1 + 2 * culture centers
/// ```
pub fn planet_yield(planet: &Planet) -> PlanetYield {
    PlanetYield {
        credits: planet.population / 2 + 2 * planet.count_buildings(BuildingKind::Factory),
        research: planet.population / 3 + 3 * planet.count_buildings(BuildingKind::ResearchLab),
        culture: 1 + 2 * planet.count_buildings(BuildingKind::CultureCenter),
    }
}

/// Runs production and growth on every populated planet.
///
/// Owners collect credits and research income; culture stays on the planet.
/// Unowned natives only grow.
pub fn produce<C>(state: &mut GalaxyState, config: &C)
where
    C: ConfigOracle + ?Sized,
{
    let threshold = config.growth_threshold().max(1);
    let mut income = Vec::new();

    for planet in state.planets.values_mut() {
        if !planet.is_populated() {
            continue;
        }
        if let Some(owner) = planet.owner {
            let output = planet_yield(planet);
            planet.culture += output.culture;
            income.push((owner, output));
        }

        planet.growth += 1 + planet.count_buildings(BuildingKind::Farm);
        if planet.growth >= threshold {
            planet.growth -= threshold;
            if planet.population < planet.max_population {
                planet.population += 1;
            }
        }
    }

    for (owner, output) in income {
        if let Some(realm) = state.realm_mut(owner) {
            realm.credits += i64::from(output.credits);
            realm.research_income += output.research;
        }
    }
}
