//! Death handling across several combatants

use mudcombat::combat::{CombatEvent, IdleReason, ScriptedRoller, TickOutcome};
use mudcombat::{CombatManager, Combatant, ManualClock};

use crate::common;

#[test]
fn test_two_attackers_one_kill() {
    let tables = common::load_tables();
    let config = common::test_config();
    let clock = ManualClock::new(0);
    let mut manager = CombatManager::with_clock(&tables, &config, &clock);
    manager.insert(common::swordsman("alice", 100));
    manager.insert(common::swordsman("bob", 100));
    manager.insert(common::npc("wolf", 40, 0, 5));
    manager.engage("alice", "wolf").unwrap();
    manager.engage("bob", "wolf").unwrap();

    let outcomes = manager.tick_all().unwrap();
    assert_eq!(
        outcomes,
        vec![
            ("alice".to_string(), TickOutcome::Ready { target: "wolf".into() }),
            ("bob".to_string(), TickOutcome::Ready { target: "wolf".into() }),
            ("wolf".to_string(), TickOutcome::Ready { target: "alice".into() }),
        ]
    );

    let mut roller = ScriptedRoller::new([50, 40]);
    let blow = manager.attack("alice", "wolf", &mut roller).unwrap().unwrap();
    assert!(blow.killed);

    // stale outcomes from the same tick are harmless
    assert_eq!(manager.attack("bob", "wolf", &mut roller).unwrap(), None);
    assert_eq!(manager.attack("wolf", "alice", &mut roller).unwrap(), None);

    let wolf = manager.get("wolf").unwrap();
    assert_eq!(wolf.combat().killed_by.as_deref(), Some("alice"));
    assert_eq!(wolf.damage_taken.len(), 1);

    clock.advance(250);
    assert_eq!(
        manager.tick("bob").unwrap(),
        TickOutcome::NoAction(IdleReason::CombatEnded)
    );
    assert_eq!(
        manager.tick("wolf").unwrap(),
        TickOutcome::NoAction(IdleReason::Killed)
    );

    let events = manager.take_events();
    assert_eq!(
        events,
        vec![
            CombatEvent::Deathblow {
                killer: "alice".into(),
                victim: "wolf".into()
            },
            CombatEvent::Killed {
                victim: "wolf".into(),
                killer: Some("alice".into())
            },
            CombatEvent::Despawn { id: "wolf".into() },
        ]
    );
    assert!(manager.take_events().is_empty());
}

#[test]
fn test_late_death_resolution_is_ignored() {
    let tables = common::load_tables();
    let config = common::test_config();
    let mut manager = CombatManager::new(&tables, &config);
    manager.insert(common::swordsman("hero", 100));
    manager.insert(common::npc("bandit", 0, 0, 10));
    manager.engage("hero", "bandit").unwrap();

    let mut roller = ScriptedRoller::new([50, 40]);
    manager.attack("hero", "bandit", &mut roller).unwrap();
    let events = manager.take_events();
    assert_eq!(events.len(), 3);

    // a second path noticing the same death
    assert!(!manager.resolve_death("bandit", Some("someone-else")).unwrap());
    assert!(manager.take_events().is_empty());
    assert_eq!(
        manager.get("bandit").unwrap().combat().killed_by.as_deref(),
        Some("hero")
    );
}

#[test]
fn test_despawn_then_survivor_regenerates() {
    let tables = common::load_tables();
    let config = common::test_config();
    let mut manager = CombatManager::new(&tables, &config);
    manager.insert(common::swordsman("hero", 100));
    manager.insert(common::npc("rat", 0, 0, 1));
    manager.engage("hero", "rat").unwrap();

    let mut roller = ScriptedRoller::new([50, 40]);
    manager.attack("hero", "rat", &mut roller).unwrap();
    for event in manager.take_events() {
        if let CombatEvent::Despawn { id } = event {
            manager.remove(&id);
        }
    }

    assert!(manager.get("rat").is_none());
    assert_eq!(manager.ids(), vec!["hero".to_string()]);
    assert!(manager.start_regeneration("hero").unwrap());
    assert!(!manager.start_regeneration("hero").unwrap());
    assert!(manager.get("hero").unwrap().regenerating);
}

#[test]
fn test_player_death_is_not_despawned() {
    let tables = common::load_tables();
    let config = common::test_config();
    let mut manager = CombatManager::new(&tables, &config);
    manager.insert(common::npc("dragon", 200, 0, 1000));
    let mut hero = common::swordsman("hero", 0);
    hero.health = Some(1);
    manager.insert(hero);
    manager.enter_combat("dragon", "hero").unwrap();

    let mut roller = ScriptedRoller::new([50, 40]);
    let outcome = manager.attack("dragon", "hero", &mut roller).unwrap().unwrap();
    assert!(outcome.killed);

    let events = manager.take_events();
    assert!(events.contains(&CombatEvent::Killed {
        victim: "hero".into(),
        killer: Some("dragon".into())
    }));
    assert!(!events
        .iter()
        .any(|e| matches!(e, CombatEvent::Despawn { .. })));
    assert!(manager.get("hero").unwrap().combat().killed);
    assert!(!manager.get("dragon").unwrap().combat().in_combat());
}
