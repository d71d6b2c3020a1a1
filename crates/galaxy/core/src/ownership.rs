//! Planet ownership changes.
//!
//! [`transfer_planet`] is the only place that rewrites `Planet::owner` during
//! play. Governor fate, statistics, realm messages and the news item are
//! applied in the same call.

use crate::env::ConfigOracle;
use crate::error::EngineError;
use crate::state::{
    GalaxyState, LeaderId, LeaderPerks, LeaderStatus, Message, MessageKind, PlanetId, RealmId,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransferCause {
    /// Troops landed and took the planet.
    Conquest,
    /// A colony ship settled an unowned planet.
    Colonization,
    /// The last worker died and nobody took over.
    Depopulation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GovernorFate {
    /// A wealthy governor bought passage off the planet.
    Escaped { leader: LeaderId, cost: i64 },
    Killed { leader: LeaderId },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransferReport {
    pub planet: PlanetId,
    pub cause: TransferCause,
    pub previous: Option<RealmId>,
    pub owner: Option<RealmId>,
    pub governor: Option<GovernorFate>,
}

/// Hands `planet` to `new_owner` (`None` reverts it to unowned).
///
/// # Errors
///
/// `InvalidTarget` when the planet or the new owner does not exist.
pub fn transfer_planet(
    state: &mut GalaxyState,
    config: &(impl ConfigOracle + ?Sized),
    planet: PlanetId,
    new_owner: Option<RealmId>,
    cause: TransferCause,
) -> Result<TransferReport, EngineError> {
    if let Some(owner) = new_owner {
        state
            .realm(owner)
            .ok_or(EngineError::invalid_realm(owner))?;
    }
    let (previous, governor, name, sector, system) = {
        let target = state
            .planet(planet)
            .ok_or(EngineError::invalid_planet(planet))?;
        (
            target.owner,
            target.governor,
            target.name.clone(),
            target.sector,
            target.system,
        )
    };

    let fate = match (governor, previous) {
        (Some(leader), Some(owner)) if previous != new_owner => {
            Some(governor_fate(state, config, leader, owner))
        }
        _ => None,
    };

    if let Some(target) = state.planet_mut(planet) {
        target.owner = new_owner;
        if previous != new_owner {
            target.home_world = false;
            target.governor = None;
        }
        if cause == TransferCause::Conquest {
            target.suppression = 0;
        }
        if new_owner.is_none() {
            target.population = 0;
            target.growth = 0;
        }
    }

    if let Some(realm) = previous.and_then(|id| state.realm_mut(id)) {
        realm.stats.planets_lost += 1;
    }
    if let Some(realm) = new_owner.and_then(|id| state.realm_mut(id)) {
        match cause {
            TransferCause::Conquest => realm.stats.planets_conquered += 1,
            TransferCause::Colonization => realm.stats.planets_colonized += 1,
            TransferCause::Depopulation => {}
        }
        realm.known_planets.insert(planet);
        realm.explored_systems.insert(system);
    }

    let new_name = new_owner
        .and_then(|id| state.realm(id))
        .map(|realm| realm.name.clone())
        .unwrap_or_default();
    let (headline, body) = match cause {
        TransferCause::Conquest => (
            format!("{name} falls to {new_name}"),
            format!("Invasion troops of {new_name} have taken {name}."),
        ),
        TransferCause::Colonization => (
            format!("{new_name} settles {name}"),
            format!("Colonists of {new_name} have founded a colony on {name}."),
        ),
        TransferCause::Depopulation => (
            format!("{name} lies empty"),
            format!("The last inhabitants of {name} have perished."),
        ),
    };

    if let Some(owner) = previous.filter(|&owner| Some(owner) != new_owner) {
        state.notify(
            owner,
            Message::new(MessageKind::Planet, format!("We have lost {name}")).at(sector),
        );
    }
    if let Some(owner) = new_owner {
        state.notify(owner, Message::new(MessageKind::Planet, headline.clone()).at(sector));
    }
    if let Some(fate) = fate {
        let text = match fate {
            GovernorFate::Escaped { .. } => format!("The governor of {name} escaped"),
            GovernorFate::Killed { .. } => format!("The governor of {name} was killed"),
        };
        if let Some(owner) = previous {
            state.notify(owner, Message::new(MessageKind::Planet, text).at(sector));
        }
    }
    state.publish(headline, body);

    Ok(TransferReport {
        planet,
        cause,
        previous,
        owner: new_owner,
        governor: fate,
    })
}

/// A wealthy governor escapes when the owner can pay for it; anyone else dies.
fn governor_fate(
    state: &mut GalaxyState,
    config: &(impl ConfigOracle + ?Sized),
    leader: LeaderId,
    owner: RealmId,
) -> GovernorFate {
    let cost = config.governor_escape_cost();
    let wealthy = state
        .leaders
        .get(&leader)
        .is_some_and(|l| l.perks.contains(LeaderPerks::WEALTHY));
    let affordable = state.realm(owner).is_some_and(|realm| realm.credits >= cost);

    if wealthy && affordable {
        if let Some(realm) = state.realm_mut(owner) {
            realm.credits -= cost;
        }
        GovernorFate::Escaped { leader, cost }
    } else {
        if let Some(l) = state.leaders.get_mut(&leader) {
            l.status = LeaderStatus::Dead;
        }
        GovernorFate::Killed { leader }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GalaxyConfig;
    use crate::state::{Attitude, Controller, Race, Sector};

    fn occupied_world() -> (GalaxyState, PlanetId, LeaderId) {
        let mut state = GalaxyState::new(1);
        let defender = state.add_realm("Elerians", Controller::Ai, Attitude::Logical, Race::new("Elerian", 10));
        state.add_realm("Kroll", Controller::Ai, Attitude::Aggressive, Race::new("Kroll", 15));
        let system = state.add_system("Altair", Sector::new(4, 4));
        let planet = state.add_planet(system, "Altair II", 10).unwrap();
        state.settle_home_world(planet, defender, 6);
        let governor = state.add_leader("Ilsa", defender);
        state.planet_mut(planet).unwrap().governor = Some(governor);
        (state, planet, governor)
    }

    #[test]
    fn conquest_moves_ownership_and_kills_a_plain_governor() {
        let (mut state, planet, governor) = occupied_world();
        state.planet_mut(planet).unwrap().suppression = 7;

        let report = transfer_planet(
            &mut state,
            &GalaxyConfig::default(),
            planet,
            Some(RealmId(1)),
            TransferCause::Conquest,
        )
        .unwrap();

        assert_eq!(report.previous, Some(RealmId(0)));
        assert_eq!(report.governor, Some(GovernorFate::Killed { leader: governor }));
        let conquered = state.planet(planet).unwrap();
        assert_eq!(conquered.owner, Some(RealmId(1)));
        assert_eq!(conquered.suppression, 0);
        assert!(!conquered.home_world);
        assert_eq!(state.realms[0].stats.planets_lost, 1);
        assert_eq!(state.realms[1].stats.planets_conquered, 1);
        assert_eq!(state.news.pending().len(), 1);
        assert!(!state.leaders[&governor].is_alive());
    }

    #[test]
    fn wealthy_governors_buy_their_escape() {
        let (mut state, planet, governor) = occupied_world();
        state.leaders.get_mut(&governor).unwrap().perks = LeaderPerks::WEALTHY;
        state.realms[0].credits = 80;

        let report = transfer_planet(
            &mut state,
            &GalaxyConfig::default(),
            planet,
            Some(RealmId(1)),
            TransferCause::Conquest,
        )
        .unwrap();

        assert_eq!(
            report.governor,
            Some(GovernorFate::Escaped { leader: governor, cost: 50 })
        );
        assert_eq!(state.realms[0].credits, 30);
        assert!(state.leaders[&governor].is_alive());
    }

    #[test]
    fn depopulated_planets_revert_to_unowned() {
        let (mut state, planet, _) = occupied_world();
        let report = transfer_planet(
            &mut state,
            &GalaxyConfig::default(),
            planet,
            None,
            TransferCause::Depopulation,
        )
        .unwrap();

        assert_eq!(report.owner, None);
        assert_eq!(state.planet(planet).unwrap().owner, None);
        assert_eq!(state.realms[0].stats.planets_lost, 1);
    }
}
