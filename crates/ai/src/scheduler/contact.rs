//! End-of-pass scans: colonization targets, first contact and border
//! crossings.

use std::collections::BTreeSet;

use galaxy_core::resolution::border_owner;
use galaxy_core::{
    DiplomacyOracle, EngineError, Fleet, GalaxyEnv, GalaxyState, Message, MessageKind,
    MissionKind, MissionPhase, PlanetId, RealmId, Relation,
};

use super::HumanPrompt;
use crate::missions::MissionPlanner;

/// Runs every scan for `realm` after its fleet pass.
///
/// Stops at the first contact that needs a human decision. Contacts are
/// marked as met before the prompt is returned, so a rescan skips them.
pub(super) fn scan(
    state: &mut GalaxyState,
    env: &GalaxyEnv<'_>,
    realm: RealmId,
) -> Result<Option<HumanPrompt>, EngineError> {
    colonization_targets(state, realm);

    let sighted: Vec<(PlanetId, RealmId)> = {
        let Some(us) = state.realm(realm) else {
            return Ok(None);
        };
        state
            .planets
            .values()
            .filter(|planet| us.can_see(planet.sector))
            .filter_map(|planet| planet.owner.map(|owner| (planet.id, owner)))
            .filter(|&(_, owner)| owner != realm)
            .collect()
    };
    // One attack at a time per realm.
    let mut attacked = state
        .missions_of(realm)
        .any(|m| matches!(m.kind, MissionKind::Attack { .. }));
    for (planet, owner) in sighted {
        let target = (!attacked).then_some(planet);
        match contact(state, env, realm, owner, target)? {
            Contact::Prompt(prompt) => return Ok(Some(prompt)),
            Contact::Attack => attacked = true,
            Contact::Quiet => {}
        }
    }

    let intruders: BTreeSet<RealmId> = state
        .fleets
        .values()
        .filter(|fleet| fleet.owner != realm && !fleet.privateer)
        .filter(|fleet| border_owner(state, fleet.sector) == Some(realm))
        .map(|fleet| fleet.owner)
        .collect();
    for owner in intruders {
        tracing::debug!("{} crossed the border of {}", owner, realm);
        if let Contact::Prompt(prompt) = contact(state, env, realm, owner, None)? {
            return Ok(Some(prompt));
        }
    }
    Ok(None)
}

/// Creates COLONIZE orders for visible unowned planets nobody targets yet.
fn colonization_targets(state: &mut GalaxyState, realm: RealmId) {
    let targets: Vec<_> = {
        let Some(us) = state.realm(realm) else {
            return;
        };
        state
            .planets
            .values()
            .filter(|planet| planet.owner.is_none() && us.can_see(planet.sector))
            .filter(|planet| {
                !state
                    .missions_of(realm)
                    .any(|m| m.kind == MissionKind::Colonize { planet: planet.id })
            })
            .map(|planet| (planet.id, planet.sector))
            .collect()
    };

    for (planet, sector) in targets {
        let mission = state.add_mission(
            realm,
            MissionKind::Colonize { planet },
            MissionPhase::Planning,
            sector,
        );
        tracing::debug!("{} plans colony {} on {}", realm, mission, planet);
    }
}

enum Contact {
    Quiet,
    Attack,
    Prompt(HumanPrompt),
}

/// Reacts to `other` showing up near `realm`.
///
/// Allies and trading partners without a navy ignore each other; realms at
/// war stage an attack on the sighted planet; strangers meet, either through
/// the human diplomacy screen or through the negotiator.
fn contact(
    state: &mut GalaxyState,
    env: &GalaxyEnv<'_>,
    realm: RealmId,
    other: RealmId,
    planet: Option<PlanetId>,
) -> Result<Contact, EngineError> {
    let Some(us) = state.realm(realm) else {
        return Ok(Contact::Quiet);
    };
    let bonus = us.diplomacy.get(&other).copied().unwrap_or_default();
    let has_navy = state.fleets_of(realm).any(Fleet::is_military);

    match bonus.relation {
        Relation::Alliance => Ok(Contact::Quiet),
        Relation::TradeAlliance if !has_navy => Ok(Contact::Quiet),
        Relation::War => declare_attack(state, env, realm, planet),
        _ if bonus.met => Ok(Contact::Quiet),
        _ => first_contact(state, env, realm, other, planet),
    }
}

fn first_contact(
    state: &mut GalaxyState,
    env: &GalaxyEnv<'_>,
    realm: RealmId,
    other: RealmId,
    planet: Option<PlanetId>,
) -> Result<Contact, EngineError> {
    let Some(them) = state.realm(other) else {
        return Ok(Contact::Quiet);
    };
    let human = them.is_human();
    let names = (
        state.realm(realm).map(|r| r.name.clone()).unwrap_or_default(),
        them.name.clone(),
    );

    if let Some(us) = state.realm_mut(realm) {
        us.bonus_mut(other).met = true;
    }
    if let Some(them) = state.realm_mut(other) {
        them.bonus_mut(realm).met = true;
    }

    if human {
        tracing::info!("{} contacts human realm {}", realm, other);
        state.notify(
            other,
            Message::new(MessageKind::Diplomacy, format!("{} requests an audience", names.0)),
        );
        return Ok(Contact::Prompt(HumanPrompt::Diplomacy {
            realm,
            human: other,
        }));
    }

    let relation = env.diplomacy()?.negotiate(state, realm, other);
    for (a, b) in [(realm, other), (other, realm)] {
        if let Some(side) = state.realm_mut(a) {
            side.bonus_mut(b).relation = relation;
        }
    }
    tracing::info!("{} and {} settle on {:?}", names.0, names.1, relation);
    state.publish(
        format!("{} meets {}", names.0, names.1),
        format!("First contact ends in {relation:?}."),
    );

    if relation == Relation::War {
        declare_attack(state, env, realm, planet)
    } else {
        Ok(Contact::Quiet)
    }
}

fn declare_attack(
    state: &mut GalaxyState,
    env: &GalaxyEnv<'_>,
    realm: RealmId,
    planet: Option<PlanetId>,
) -> Result<Contact, EngineError> {
    let Some(planet) = planet else {
        return Ok(Contact::Quiet);
    };
    match MissionPlanner::create_attack_mission(state, env, realm, planet)? {
        Some(_) => Ok(Contact::Attack),
        None => Ok(Contact::Quiet),
    }
}
