mod common;

use common::{ATTACKER, DEFENDER, Oracles, defense, ship, siege_galaxy, weapon};
use galaxy_core::{
    BuildingKind, Cargo, Component, ComponentKind, MessageKind, SiegeEffect, SiegeEvent,
    SiegeSession, SiegeStatus, WeaponKind,
};

fn trooper(state: &mut galaxy_core::GalaxyState, colonists: u32) -> galaxy_core::Ship {
    ship(
        state,
        "Trooper",
        1,
        vec![Component::new(ComponentKind::PlanetaryInvasion, 0)],
    )
    .with_cargo(Cargo {
        colonists,
        metal: 0,
    })
}

#[test]
fn turret_volleys_never_exceed_turret_level() {
    for level in 1..=8 {
        let oracles = Oracles::rolling(100);
        let env = oracles.env();
        let (mut state, planet) = siege_galaxy(6);
        state.planet_mut(planet).unwrap().turret_level = level;

        let gunship = ship(
            &mut state,
            "Gunship",
            1,
            vec![
                weapon(WeaponKind::Beam, 5),
                Component::new(ComponentKind::Shield, 2).with_hit_points(6),
                Component::new(ComponentKind::Armor, 3).with_hit_points(6),
            ],
        );
        let before = gunship.clone();
        let sector = state.planet(planet).unwrap().sector;
        let fleet = state.spawn_fleet(ATTACKER, "Siege", sector, vec![gunship]);

        let mut siege = SiegeSession::begin(&state, fleet, planet).unwrap();
        siege.step_ai(&mut state, &env).unwrap();

        let after = &state.fleet(fleet).unwrap().ships[0];
        assert!(defense(&before) - defense(after) <= level, "turret level {level}");
        if after.armor.current < before.armor.current {
            assert!(after.shield.current < before.shield.current || before.shield.current == 0);
        }
        if after.hull_points() < before.hull_points() {
            assert!(after.armor.current < before.armor.current || before.armor.current == 0);
        }
        assert!(matches!(siege.log()[0], SiegeEvent::TurretFired { .. }));
    }
}

#[test]
fn suppression_accumulates_until_the_planet_falls() {
    let oracles = Oracles::rolling(50);
    let env = oracles.env();
    let (mut state, planet) = siege_galaxy(10);
    let sector = state.planet(planet).unwrap().sector;

    let gunship = ship(&mut state, "Gunship", 2, vec![weapon(WeaponKind::Beam, 30)]);
    let troops = trooper(&mut state, 20);
    let fleet = state.spawn_fleet(ATTACKER, "Siege", sector, vec![gunship, troops]);

    let mut siege = SiegeSession::begin(&state, fleet, planet).unwrap();
    let mut last = 0;
    while siege.status() == SiegeStatus::Ongoing {
        siege.step_ai(&mut state, &env).unwrap();
        let planet = state.planet(planet).unwrap();
        if planet.owner == Some(DEFENDER) {
            assert!(planet.suppression >= last);
            last = planet.suppression;
        }
    }

    assert_eq!(last, 8);
    assert_eq!(siege.status(), SiegeStatus::Conquered);
    let conquered = state.planet(planet).unwrap();
    assert_eq!(conquered.owner, Some(ATTACKER));
    assert_eq!(conquered.suppression, 0);
}

#[test]
fn invasion_with_more_troops_takes_the_planet() {
    let oracles = Oracles::rolling(100);
    let env = oracles.env();
    let (mut state, planet) = siege_galaxy(10);
    state.planet_mut(planet).unwrap().max_population = 15;
    let sector = state.planet(planet).unwrap().sector;

    // 10 troop power x 12 colonists = 120 against 10 x 10 workers = 100.
    let troops = trooper(&mut state, 12);
    let fleet = state.spawn_fleet(ATTACKER, "Landing", sector, vec![troops]);
    let mut siege = SiegeSession::begin(&state, fleet, planet).unwrap();

    assert_eq!(siege.resolve(&mut state, &env), Ok(SiegeStatus::Conquered));
    let conquered = state.planet(planet).unwrap();
    assert_eq!(conquered.owner, Some(ATTACKER));
    assert_eq!(conquered.population, 2);
    assert_eq!(state.fleet(fleet).unwrap().colonists(), 0);
    assert_eq!(state.realms[ATTACKER.index()].stats.planets_conquered, 1);
    assert!(siege.log().iter().any(|event| matches!(
        event,
        SiegeEvent::ComponentUsed { effects, .. }
            if effects.contains(&SiegeEffect::InvasionSucceeded {
                ship_troops: 120,
                planet_troops: 100,
                population: 2,
            })
    )));
}

#[test]
fn invasion_with_fewer_troops_is_repelled() {
    let oracles = Oracles::rolling(100);
    let env = oracles.env();
    let (mut state, planet) = siege_galaxy(12);
    let sector = state.planet(planet).unwrap().sector;

    // 100 troops against 120.
    let troops = trooper(&mut state, 10);
    let fleet = state.spawn_fleet(ATTACKER, "Landing", sector, vec![troops]);
    let mut siege = SiegeSession::begin(&state, fleet, planet).unwrap();
    siege.resolve(&mut state, &env).unwrap();

    let defended = state.planet(planet).unwrap();
    assert_eq!(defended.owner, Some(DEFENDER));
    assert_eq!(defended.population, 12);
    assert_eq!(defended.suppression, 0);
    assert_eq!(state.fleet(fleet).unwrap().colonists(), 0);
    assert!(siege.log().iter().any(|event| matches!(
        event,
        SiegeEvent::ComponentUsed { effects, .. }
            if effects.contains(&SiegeEffect::InvasionFailed {
                ship_troops: 100,
                planet_troops: 120,
            })
    )));
}

#[test]
fn equal_troops_are_a_failed_invasion() {
    let oracles = Oracles::rolling(100);
    let env = oracles.env();
    let (mut state, planet) = siege_galaxy(10);
    let sector = state.planet(planet).unwrap().sector;

    let troops = trooper(&mut state, 10);
    let fleet = state.spawn_fleet(ATTACKER, "Landing", sector, vec![troops]);
    let mut siege = SiegeSession::begin(&state, fleet, planet).unwrap();
    siege.resolve(&mut state, &env).unwrap();

    assert_eq!(state.planet(planet).unwrap().owner, Some(DEFENDER));
}

#[test]
fn a_bomb_kills_exactly_one_worker_per_action() {
    let oracles = Oracles::rolling(50);
    let env = oracles.env();
    let (mut state, planet) = siege_galaxy(6);
    let sector = state.planet(planet).unwrap().sector;

    let bomber = ship(
        &mut state,
        "Bomber",
        1,
        vec![Component::new(ComponentKind::OrbitalBomb, 50)],
    );
    let fleet = state.spawn_fleet(ATTACKER, "Bombers", sector, vec![bomber]);
    let mut siege = SiegeSession::begin(&state, fleet, planet).unwrap();

    let mut population = state.planet(planet).unwrap().population;
    while siege.status() == SiegeStatus::Ongoing {
        siege.step_ai(&mut state, &env).unwrap();
        let now = state.planet(planet).unwrap().population;
        assert!(population - now <= 1);
        population = now;
    }

    // Four actions for tactic speed 1.
    assert_eq!(population, 2);
    assert_eq!(siege.status(), SiegeStatus::Exhausted);
}

#[test]
fn bombing_the_last_worker_without_troopers_empties_the_planet() {
    let oracles = Oracles::rolling(50);
    let env = oracles.env();
    let (mut state, planet) = siege_galaxy(3);
    let sector = state.planet(planet).unwrap().sector;

    let bomber = ship(
        &mut state,
        "Bomber",
        1,
        vec![Component::new(ComponentKind::OrbitalBomb, 50)],
    );
    let fleet = state.spawn_fleet(ATTACKER, "Bombers", sector, vec![bomber]);
    let mut siege = SiegeSession::begin(&state, fleet, planet).unwrap();

    assert_eq!(siege.resolve(&mut state, &env), Ok(SiegeStatus::Depopulated));
    assert_eq!(state.planet(planet).unwrap().owner, None);
    assert_eq!(state.realms[DEFENDER.index()].stats.planets_lost, 1);
}

#[test]
fn bombing_shields_absorb_every_strike() {
    let oracles = Oracles::rolling(1);
    let env = oracles.env();
    let (mut state, planet) = siege_galaxy(6);
    state.planet_mut(planet).unwrap().bombing_shield = true;
    let sector = state.planet(planet).unwrap().sector;

    let bomber = ship(
        &mut state,
        "Bomber",
        1,
        vec![Component::new(ComponentKind::OrbitalBomb, 50)],
    );
    let fleet = state.spawn_fleet(ATTACKER, "Bombers", sector, vec![bomber]);
    let mut siege = SiegeSession::begin(&state, fleet, planet).unwrap();
    siege.resolve(&mut state, &env).unwrap();

    assert_eq!(state.planet(planet).unwrap().population, 6);
    assert!(siege.log().iter().any(|event| matches!(
        event,
        SiegeEvent::ComponentUsed { effects, .. } if effects == &[SiegeEffect::Shielded]
    )));
}

#[test]
fn a_missed_shot_does_not_cost_the_ship_its_remaining_actions() {
    // The opening roll misses, every later one hits.
    let oracles = Oracles::scripted(vec![50], 5);
    let env = oracles.env();
    let (mut state, planet) = siege_galaxy(6);
    state.planet_mut(planet).unwrap().buildings = vec![
        BuildingKind::SpacePort,
        BuildingKind::Factory,
        BuildingKind::ResearchLab,
        BuildingKind::Farm,
    ];
    let sector = state.planet(planet).unwrap().sector;

    // Tactic speed 2 gives eight actions.
    let gunship = ship(&mut state, "Gunship", 2, vec![weapon(WeaponKind::Beam, 10)]);
    let gunship_id = gunship.id;
    let fleet = state.spawn_fleet(ATTACKER, "Siege", sector, vec![gunship]);
    let mut siege = SiegeSession::begin(&state, fleet, planet).unwrap();

    assert_eq!(siege.resolve(&mut state, &env), Ok(SiegeStatus::Exhausted));
    assert_eq!(siege.remaining_actions(gunship_id), 0);
    let besieged = state.planet(planet).unwrap();
    assert_eq!(besieged.suppression, 7);
    assert!(besieged.buildings.is_empty());
    assert_eq!(besieged.population, 6);

    let strikes = siege
        .log()
        .iter()
        .filter(|event| matches!(event, SiegeEvent::ComponentUsed { .. }))
        .count();
    assert_eq!(strikes, 8);
}

#[test]
fn a_ship_that_can_do_nothing_hands_over_to_the_next() {
    let oracles = Oracles::rolling(50);
    let env = oracles.env();
    let (mut state, planet) = siege_galaxy(6);
    let sector = state.planet(planet).unwrap().sector;

    let empty_lander = trooper(&mut state, 0);
    let lander_id = empty_lander.id;
    let bomber = ship(
        &mut state,
        "Bomber",
        1,
        vec![Component::new(ComponentKind::OrbitalBomb, 50)],
    );
    let fleet = state.spawn_fleet(ATTACKER, "Siege", sector, vec![empty_lander, bomber]);
    let mut siege = SiegeSession::begin(&state, fleet, planet).unwrap();

    assert_eq!(siege.resolve(&mut state, &env), Ok(SiegeStatus::Exhausted));
    assert_eq!(siege.remaining_actions(lander_id), 4);
    assert_eq!(state.planet(planet).unwrap().population, 2);
    assert!(siege.log().iter().any(|event| matches!(
        event,
        SiegeEvent::ComponentUsed { ship, effects, .. }
            if *ship == lander_id && effects == &[SiegeEffect::NoEffect]
    )));
}

#[test]
fn aborting_a_siege_finalizes_it_like_a_natural_end() {
    let oracles = Oracles::rolling(100);
    let env = oracles.env();
    let (mut state, planet) = siege_galaxy(6);
    let sector = state.planet(planet).unwrap().sector;

    let gunship = ship(&mut state, "Gunship", 1, vec![weapon(WeaponKind::Beam, 5)]);
    let fleet = state.spawn_fleet(ATTACKER, "Siege", sector, vec![gunship]);
    let mut siege = SiegeSession::begin(&state, fleet, planet).unwrap();

    assert_eq!(
        siege.use_component(&mut state, &env, 0),
        Ok(SiegeStatus::Ongoing)
    );
    assert!(siege.is_used(0));

    // The only ship is scuttled while the order is pending.
    state.fleet_mut(fleet).unwrap().ships.clear();
    assert_eq!(siege.abort(&mut state), SiegeStatus::Aborted);

    assert!(!siege.is_used(0));
    assert!(siege.current_ship().is_none());
    assert!(state.fleet(fleet).is_none());
    assert!(!state.realms[ATTACKER.index()].fleets.contains(&fleet));
    assert!(matches!(
        siege.log().last(),
        Some(SiegeEvent::Finished {
            status: SiegeStatus::Aborted
        })
    ));
    assert!(state.realms[ATTACKER.index()]
        .messages
        .iter()
        .any(|m| m.kind == MessageKind::Combat && m.text.contains("called off")));

    // A second abort changes nothing.
    let events = siege.log().len();
    assert_eq!(siege.abort(&mut state), SiegeStatus::Aborted);
    assert_eq!(siege.log().len(), events);
}
