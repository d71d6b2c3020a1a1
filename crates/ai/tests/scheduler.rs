mod common;

use common::{
    FRONTIER, Galaxy, HOME, MEKLAR, Oracles, SAKKRA, colony_ship, freighter, warship,
};
use galaxy_ai::{CursorPhase, HumanPrompt, TurnCursor, TurnProgress, TurnScheduler};
use galaxy_core::{
    CombatStatus, Controller, CultureClaim, FleetId, MessageKind, MissionKind, MissionPhase,
    RealmId, Relation, Sector,
};

/// Steps until the turn finishes, collecting every step result.
fn drain_turn(
    scheduler: &mut TurnScheduler,
    galaxy: &mut Galaxy,
    oracles: &Oracles,
) -> Vec<TurnProgress> {
    let env = oracles.env();
    let mut steps = Vec::new();
    loop {
        let progress = scheduler.step(&mut galaxy.state, &env).unwrap();
        let finished = matches!(progress, TurnProgress::TurnFinished(_));
        steps.push(progress);
        if finished {
            return steps;
        }
    }
}

fn processed(steps: &[TurnProgress]) -> Vec<(RealmId, FleetId)> {
    steps
        .iter()
        .filter_map(|step| match step {
            TurnProgress::FleetProcessed { realm, fleet, .. } => Some((*realm, *fleet)),
            _ => None,
        })
        .collect()
}

#[test]
fn every_fleet_is_processed_once_in_realm_and_list_order() {
    let oracles = Oracles::rolling(50);
    let mut galaxy = Galaxy::new(5);
    let ships: Vec<_> = (0..4).map(|_| freighter(&mut galaxy.state)).collect();
    let mut ships = ships.into_iter();
    let a1 = galaxy.fleet(SAKKRA, HOME, vec![ships.next().unwrap()]);
    let b1 = galaxy.fleet(MEKLAR, Sector::new(20, 20), vec![ships.next().unwrap()]);
    let a2 = galaxy.fleet(SAKKRA, Sector::new(5, 5), vec![ships.next().unwrap()]);
    let b2 = galaxy.fleet(MEKLAR, Sector::new(21, 21), vec![ships.next().unwrap()]);

    let mut scheduler = TurnScheduler::new();
    let steps = drain_turn(&mut scheduler, &mut galaxy, &oracles);

    assert_eq!(
        processed(&steps),
        vec![(SAKKRA, a1), (SAKKRA, a2), (MEKLAR, b1), (MEKLAR, b2)]
    );
    let finished: Vec<RealmId> = steps
        .iter()
        .filter_map(|step| match step {
            TurnProgress::RealmFinished { realm } => Some(*realm),
            _ => None,
        })
        .collect();
    assert_eq!(finished, vec![SAKKRA, MEKLAR]);
    assert_eq!(galaxy.state.turn, 2);
    assert_eq!(scheduler.cursor(), TurnCursor::start());
}

#[test]
fn human_realms_are_skipped() {
    let oracles = Oracles::rolling(50);
    let mut galaxy = Galaxy::new(5);
    galaxy.state.realms[SAKKRA.index()].controller = Controller::Human;
    let ship = freighter(&mut galaxy.state);
    galaxy.fleet(SAKKRA, HOME, vec![ship]);
    let ship = freighter(&mut galaxy.state);
    let theirs = galaxy.fleet(MEKLAR, Sector::new(20, 20), vec![ship]);

    let mut scheduler = TurnScheduler::new();
    let steps = drain_turn(&mut scheduler, &mut galaxy, &oracles);

    assert_eq!(processed(&steps), vec![(MEKLAR, theirs)]);
    assert!(matches!(
        steps[0],
        TurnProgress::RealmFinished { realm: SAKKRA }
    ));
}

#[test]
fn idle_fleets_merge_into_the_fleet_that_finds_them() {
    let oracles = Oracles::rolling(50);
    let mut galaxy = Galaxy::new(5);
    let rally = Sector::new(14, 14);

    // `early` finishes its move on its own turn and idles at the rally point.
    let (b1, b2) = (warship(&mut galaxy.state, 4), warship(&mut galaxy.state, 4));
    let (b1_id, b2_id) = (b1.id, b2.id);
    let early = galaxy.fleet(SAKKRA, rally, vec![b1, b2]);
    let parked = galaxy
        .state
        .add_mission(SAKKRA, MissionKind::Move, MissionPhase::Trekking, rally);
    assert!(galaxy.state.assign_mission(parked, early));

    // `late` is passing through and picks it up.
    let c1 = warship(&mut galaxy.state, 4);
    let c1_id = c1.id;
    let late = galaxy.fleet(SAKKRA, rally, vec![c1]);
    let passing = galaxy.state.add_mission(
        SAKKRA,
        MissionKind::Move,
        MissionPhase::Trekking,
        Sector::new(20, 14),
    );
    assert!(galaxy.state.assign_mission(passing, late));

    let hauler = freighter(&mut galaxy.state);
    let last = galaxy.fleet(SAKKRA, Sector::new(2, 20), vec![hauler]);

    let mut scheduler = TurnScheduler::new();
    let steps = drain_turn(&mut scheduler, &mut galaxy, &oracles);

    assert_eq!(
        processed(&steps),
        vec![(SAKKRA, early), (SAKKRA, late), (SAKKRA, last)]
    );
    assert!(galaxy.state.fleet(early).is_none());
    assert_eq!(galaxy.state.realms[SAKKRA.index()].fleets, vec![late, last]);
    let ships: Vec<_> = galaxy
        .state
        .fleet(late)
        .unwrap()
        .ships
        .iter()
        .map(|ship| ship.id)
        .collect();
    assert_eq!(ships, vec![c1_id, b1_id, b2_id]);
    assert_eq!(galaxy.state.mission_for_fleet(late), Some(passing));
}

#[test]
fn fleets_destroyed_before_their_turn_are_skipped() {
    let oracles = Oracles::rolling(1);
    let mut galaxy = Galaxy::new(5);
    galaxy.declare_war(SAKKRA, MEKLAR);

    let strong = warship(&mut galaxy.state, 30);
    let hunter = galaxy.fleet(SAKKRA, Sector::new(12, 12), vec![strong]);
    let weak = freighter(&mut galaxy.state);
    let prey = galaxy.fleet(MEKLAR, Sector::new(13, 12), vec![weak]);
    let ship = freighter(&mut galaxy.state);
    let survivor = galaxy.fleet(MEKLAR, Sector::new(25, 25), vec![ship]);

    let mut scheduler = TurnScheduler::new();
    let steps = drain_turn(&mut scheduler, &mut galaxy, &oracles);

    assert!(galaxy.state.fleet(prey).is_none());
    assert_eq!(processed(&steps), vec![(SAKKRA, hunter), (MEKLAR, survivor)]);
}

#[test]
fn engaging_a_human_fleet_hands_the_battle_over() {
    let oracles = Oracles::rolling(50);
    let env = oracles.env();
    let mut galaxy = Galaxy::new(5);
    galaxy.state.realms[MEKLAR.index()].controller = Controller::Human;
    galaxy.declare_war(SAKKRA, MEKLAR);

    let ship = warship(&mut galaxy.state, 6);
    let raider = galaxy.fleet(SAKKRA, Sector::new(15, 15), vec![ship]);
    let ship = warship(&mut galaxy.state, 6);
    let patrol = galaxy.fleet(MEKLAR, Sector::new(16, 15), vec![ship]);

    let mut scheduler = TurnScheduler::new();
    let progress = scheduler.run_ai_turn(&mut galaxy.state, &env).unwrap();

    let TurnProgress::AwaitingHuman(HumanPrompt::Combat(session)) = progress else {
        panic!("expected a combat prompt, got {progress:?}");
    };
    assert_eq!(session.status(), CombatStatus::Ongoing);
    assert!(galaxy.state.fleet(raider).is_some());
    assert!(galaxy.state.fleet(patrol).is_some());
    assert_eq!(scheduler.cursor().realm, SAKKRA);
    assert_eq!(scheduler.cursor().fleet, Some(1));

    // The rest of the turn resumes from the cursor.
    let progress = scheduler.run_ai_turn(&mut galaxy.state, &env).unwrap();
    assert!(matches!(progress, TurnProgress::TurnFinished(_)));
}

#[test]
fn first_contact_between_ai_realms_is_negotiated() {
    let oracles = Oracles::rolling(50);
    let env = oracles.env();
    let mut galaxy = Galaxy::new(5);
    let mentar = galaxy.colony(MEKLAR, "Mentar", Sector::new(9, 9), 4);
    galaxy.state.realms[SAKKRA.index()]
        .visible
        .insert(Sector::new(9, 9));

    let mut scheduler = TurnScheduler::new();
    let progress = scheduler.step(&mut galaxy.state, &env).unwrap();

    assert_eq!(progress, TurnProgress::RealmFinished { realm: SAKKRA });
    assert_eq!(
        scheduler.cursor(),
        TurnCursor {
            realm: MEKLAR,
            fleet: None,
            phase: CursorPhase::Fleets,
        }
    );
    for (us, them) in [(SAKKRA, MEKLAR), (MEKLAR, SAKKRA)] {
        let bonus = galaxy.state.realms[us.index()].diplomacy[&them];
        assert!(bonus.met);
        assert_eq!(bonus.relation, Relation::War);
    }
    let attacks: Vec<_> = galaxy
        .state
        .missions_of(SAKKRA)
        .filter(|m| m.kind == MissionKind::Attack { planet: mentar })
        .collect();
    assert_eq!(attacks.len(), 1);
    assert!(!galaxy.state.news.pending().is_empty());
}

#[test]
fn first_contact_with_a_human_waits_for_the_diplomacy_screen() {
    let oracles = Oracles::rolling(50);
    let env = oracles.env();
    let mut galaxy = Galaxy::new(5);
    galaxy.state.realms[MEKLAR.index()].controller = Controller::Human;
    galaxy.colony(MEKLAR, "Mentar", Sector::new(9, 9), 4);
    galaxy.state.realms[SAKKRA.index()]
        .visible
        .insert(Sector::new(9, 9));

    let mut scheduler = TurnScheduler::new();
    let progress = scheduler.run_ai_turn(&mut galaxy.state, &env).unwrap();

    assert_eq!(
        progress,
        TurnProgress::AwaitingHuman(HumanPrompt::Diplomacy {
            realm: SAKKRA,
            human: MEKLAR,
        })
    );
    let human = &galaxy.state.realms[MEKLAR.index()];
    assert!(human.diplomacy[&SAKKRA].met);
    assert!(human.messages.iter().any(|m| m.kind == MessageKind::Diplomacy));
    assert_eq!(galaxy.state.realms[SAKKRA.index()].relation(MEKLAR), Relation::Neutral);

    // Already met: the rescan stays quiet and the turn completes.
    let progress = scheduler.run_ai_turn(&mut galaxy.state, &env).unwrap();
    assert!(matches!(progress, TurnProgress::TurnFinished(_)));
}

#[test]
fn visible_unowned_planets_become_colonization_orders() {
    let oracles = Oracles::rolling(50);
    let env = oracles.env();
    let mut galaxy = Galaxy::new(5);
    galaxy.state.realms[SAKKRA.index()].visible.insert(FRONTIER);

    let mut scheduler = TurnScheduler::new();
    scheduler.step(&mut galaxy.state, &env).unwrap();

    let orders: Vec<_> = galaxy
        .state
        .missions_of(SAKKRA)
        .filter(|m| {
            m.kind
                == MissionKind::Colonize {
                    planet: galaxy.frontier,
                }
        })
        .collect();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].phase(), MissionPhase::Planning);
    assert_eq!(orders[0].target, FRONTIER);
}

#[test]
fn colony_missions_only_move_forward_until_the_colony_stands() {
    let oracles = Oracles::rolling(50);
    let env = oracles.env();
    let mut galaxy = Galaxy::new(5);
    // Meklar plays no part in this one.
    galaxy.state.realms[MEKLAR.index()].controller = Controller::Human;
    let order = galaxy.state.add_mission(
        SAKKRA,
        MissionKind::Colonize {
            planet: galaxy.frontier,
        },
        MissionPhase::Planning,
        FRONTIER,
    );
    let ark = colony_ship(&mut galaxy.state);
    galaxy.fleet(SAKKRA, HOME, vec![ark]);

    let mut scheduler = TurnScheduler::new();
    let mut last = MissionPhase::Planning;
    for _ in 0..8 {
        let progress = scheduler.run_ai_turn(&mut galaxy.state, &env).unwrap();
        assert!(matches!(progress, TurnProgress::TurnFinished(_)));
        if let Some(mission) = galaxy.state.mission(order) {
            assert!(mission.phase() >= last);
            last = mission.phase();
        }
    }

    assert!(galaxy.state.mission(order).is_none());
    assert_eq!(
        galaxy.state.planet(galaxy.frontier).unwrap().owner,
        Some(SAKKRA)
    );
}

#[test]
fn fleets_crossing_a_cultural_border_force_first_contact() {
    let oracles = Oracles::rolling(50);
    let env = oracles.env();
    let mut galaxy = Galaxy::new(5);
    let border = Sector::new(5, 4);
    galaxy.state.culture.insert(
        border,
        CultureClaim {
            realm: SAKKRA,
            strength: 1,
        },
    );
    let ship = freighter(&mut galaxy.state);
    galaxy.fleet(MEKLAR, border, vec![ship]);

    let mut scheduler = TurnScheduler::new();
    let progress = scheduler.step(&mut galaxy.state, &env).unwrap();

    assert_eq!(progress, TurnProgress::RealmFinished { realm: SAKKRA });
    for (us, them) in [(SAKKRA, MEKLAR), (MEKLAR, SAKKRA)] {
        let bonus = galaxy.state.realms[us.index()].diplomacy[&them];
        assert!(bonus.met);
        assert_eq!(bonus.relation, Relation::War);
    }
    assert!(!galaxy.state.news.pending().is_empty());
}

#[test]
fn privateers_slip_across_borders_unnoticed() {
    let oracles = Oracles::rolling(50);
    let env = oracles.env();
    let mut galaxy = Galaxy::new(5);
    let border = Sector::new(5, 4);
    galaxy.state.culture.insert(
        border,
        CultureClaim {
            realm: SAKKRA,
            strength: 1,
        },
    );
    let ship = freighter(&mut galaxy.state);
    let raider = galaxy.fleet(MEKLAR, border, vec![ship]);
    galaxy.state.fleet_mut(raider).unwrap().privateer = true;

    let mut scheduler = TurnScheduler::new();
    let progress = scheduler.step(&mut galaxy.state, &env).unwrap();

    assert_eq!(progress, TurnProgress::RealmFinished { realm: SAKKRA });
    let sakkra = &galaxy.state.realms[SAKKRA.index()];
    assert!(sakkra.diplomacy.get(&MEKLAR).is_none_or(|bonus| !bonus.met));
    assert_eq!(sakkra.relation(MEKLAR), Relation::Neutral);
    assert!(galaxy.state.news.pending().is_empty());
}
