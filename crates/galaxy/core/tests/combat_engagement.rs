mod common;

use common::{ATTACKER, DEFENDER, Oracles, ship, weapon};
use galaxy_core::{
    CombatEvent, CombatSession, CombatStatus, Component, ComponentKind, Controller, EngineError,
    GalaxyState, MessageKind, Sector, Side, WeaponKind,
};

fn battlefield() -> GalaxyState {
    let (state, _) = common::siege_galaxy(4);
    state
}

#[test]
fn the_stronger_fleet_eliminates_the_weaker() {
    let oracles = Oracles::rolling(1);
    let env = oracles.env();
    let mut state = battlefield();

    let cruiser = ship(&mut state, "Cruiser", 3, vec![weapon(WeaponKind::Plasma, 20)]);
    let scout = ship(&mut state, "Scout", 1, vec![Component::new(ComponentKind::Scanner, 1)]);
    let attacker = state.spawn_fleet(ATTACKER, "Strike", Sector::new(3, 3), vec![cruiser]);
    let defender = state.spawn_fleet(DEFENDER, "Picket", Sector::new(3, 3), vec![scout]);

    let mut combat = CombatSession::begin(&mut state, attacker, defender).unwrap();
    assert_eq!(combat.resolve(&mut state, &env), Ok(CombatStatus::AttackerWon));

    assert!(state.fleet(defender).is_none());
    assert!(state.realms[DEFENDER.index()].fleets.is_empty());
    assert_eq!(state.realms[DEFENDER.index()].stats.ships_lost, 1);
    assert_eq!(state.realms[ATTACKER.index()].stats.ships_destroyed, 1);
    assert!(matches!(
        combat.events().last(),
        Some(CombatEvent::Finished {
            status: CombatStatus::AttackerWon
        })
    ));
}

#[test]
fn faster_ships_act_first_and_attackers_win_ties() {
    let mut state = battlefield();
    let slow = ship(&mut state, "Slow", 1, vec![weapon(WeaponKind::Beam, 2)]);
    let quick = ship(&mut state, "Quick", 3, vec![weapon(WeaponKind::Beam, 2)]);
    let even = ship(&mut state, "Even", 3, vec![weapon(WeaponKind::Beam, 2)]);
    let (slow_id, quick_id, even_id) = (slow.id, quick.id, even.id);

    let attacker = state.spawn_fleet(ATTACKER, "A", Sector::ORIGIN, vec![slow, quick]);
    let defender = state.spawn_fleet(DEFENDER, "B", Sector::ORIGIN, vec![even]);
    let combat = CombatSession::begin(&mut state, attacker, defender).unwrap();

    let order: Vec<_> = combat.queue().iter().map(|c| c.ship).collect();
    assert_eq!(order, vec![quick_id, even_id, slow_id]);
}

#[test]
fn unarmed_fleets_stalemate_at_the_round_cap() {
    let oracles = Oracles::rolling(1);
    let env = oracles.env();
    let mut state = battlefield();
    let a = ship(&mut state, "Hauler", 1, vec![Component::new(ComponentKind::CargoBay, 1)]);
    let b = ship(&mut state, "Hauler", 1, vec![Component::new(ComponentKind::CargoBay, 1)]);
    let attacker = state.spawn_fleet(ATTACKER, "A", Sector::ORIGIN, vec![a]);
    let defender = state.spawn_fleet(DEFENDER, "B", Sector::ORIGIN, vec![b]);

    let mut combat = CombatSession::begin(&mut state, attacker, defender).unwrap();
    assert_eq!(combat.resolve(&mut state, &env), Ok(CombatStatus::Draw));
    assert_eq!(combat.round(), oracles.config.max_combat_rounds + 1);
}

#[test]
fn human_ships_wait_for_orders_and_fire_each_weapon_once() {
    let oracles = Oracles::rolling(100);
    let env = oracles.env();
    let mut state = battlefield();
    state.realms[ATTACKER.index()].controller = Controller::Human;

    let gunship = ship(&mut state, "Gunship", 5, vec![weapon(WeaponKind::Railgun, 4)]);
    let target = ship(&mut state, "Target", 1, vec![weapon(WeaponKind::Beam, 1)]);
    let target_id = target.id;
    let attacker = state.spawn_fleet(ATTACKER, "Player", Sector::ORIGIN, vec![gunship]);
    let defender = state.spawn_fleet(DEFENDER, "AI", Sector::ORIGIN, vec![target]);

    let mut combat = CombatSession::begin(&mut state, attacker, defender).unwrap();
    assert!(combat.awaiting_human(&state));
    assert_eq!(combat.tick(&mut state, &env), Ok(CombatStatus::Ongoing));
    assert_eq!(combat.current().map(|c| c.side), Some(Side::Attacker));

    combat.fire(&mut state, &env, 0, target_id).unwrap();
    let current = combat.current().unwrap();
    assert!(combat.is_used(current.ship, 0));
    assert_eq!(
        combat.fire(&mut state, &env, 0, target_id),
        Err(EngineError::ComponentUnavailable {
            ship: current.ship,
            index: 0
        })
    );

    assert_eq!(combat.abort(&mut state), CombatStatus::Aborted);
    assert!(!combat.is_used(current.ship, 0));
    assert_eq!(
        combat.end_turn(&mut state, &env),
        Err(EngineError::SessionFinished)
    );
    assert!(state.fleet(attacker).is_some());
    assert!(state.fleet(defender).is_some());
}

#[test]
fn ai_ships_fire_then_wait_out_the_animation_delay() {
    let oracles = Oracles::rolling(100);
    let env = oracles.env();
    let mut state = battlefield();

    let first = ship(&mut state, "First", 4, vec![weapon(WeaponKind::Beam, 2)]);
    let second = ship(&mut state, "Second", 1, vec![weapon(WeaponKind::Beam, 2)]);
    let attacker = state.spawn_fleet(ATTACKER, "A", Sector::ORIGIN, vec![first]);
    let defender = state.spawn_fleet(DEFENDER, "B", Sector::ORIGIN, vec![second]);
    let mut combat = CombatSession::begin(&mut state, attacker, defender).unwrap();
    let opening = combat.current().unwrap().ship;

    combat.tick(&mut state, &env).unwrap();
    assert!(combat.is_used(opening, 0));
    for _ in 1..oracles.config.ai_delay_ticks {
        combat.tick(&mut state, &env).unwrap();
        assert_eq!(combat.current().unwrap().ship, opening);
    }
    combat.tick(&mut state, &env).unwrap();
    assert_ne!(combat.current().unwrap().ship, opening);
}

#[test]
fn a_fleet_without_ships_loses_before_the_first_shot() {
    let mut state = battlefield();
    let cruiser = ship(&mut state, "Cruiser", 3, vec![weapon(WeaponKind::Plasma, 20)]);
    let attacker = state.spawn_fleet(ATTACKER, "Strike", Sector::new(3, 3), vec![cruiser]);
    let defender = state.spawn_fleet(DEFENDER, "Wreckage", Sector::new(3, 3), Vec::new());

    let combat = CombatSession::begin(&mut state, attacker, defender).unwrap();

    assert_eq!(combat.status(), CombatStatus::AttackerWon);
    assert!(combat.current().is_none());
    assert!(state.fleet(attacker).is_some());
    assert!(state.fleet(defender).is_none());
    assert!(state.realms[DEFENDER.index()].fleets.is_empty());
    assert!(matches!(
        combat.events().last(),
        Some(CombatEvent::Finished {
            status: CombatStatus::AttackerWon
        })
    ));
    assert!(state.realms[ATTACKER.index()]
        .messages
        .iter()
        .any(|m| m.kind == MessageKind::Combat));
}
