//! Round pacing and full fights driven by the scheduler

use mudcombat::combat::{IdleReason, RngRoller, ScriptedRoller, TickOutcome};
use mudcombat::{CombatManager, Combatant, ManualClock};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::common;

#[test]
fn test_attack_then_recover_then_ready() {
    let tables = common::load_tables();
    let config = common::test_config();
    let clock = ManualClock::new(0);
    let mut manager = CombatManager::with_clock(&tables, &config, &clock);
    manager.insert(common::swordsman("hero", 0));
    manager.insert(common::npc("ogre", 0, 0, 1000));
    manager.engage("hero", "ogre").unwrap();

    assert!(manager.tick("hero").unwrap().is_ready());
    // 0 - 0 + 10 + 5 = 15, a miss, still costs a full round
    let mut roller = ScriptedRoller::new([5]);
    let outcome = manager.attack("hero", "ogre", &mut roller).unwrap().unwrap();
    assert!(!outcome.hit);
    assert_eq!(outcome.recovery_lag_ms, 3000);

    let mut readies = 0;
    let mut recovering = 0;
    for _ in 0..6 {
        clock.advance(500);
        match manager.tick("hero").unwrap() {
            TickOutcome::Ready { target } => {
                assert_eq!(target, "ogre");
                readies += 1;
                break;
            }
            TickOutcome::NoAction(reason) => {
                assert_eq!(reason, IdleReason::Recovering);
                recovering += 1;
            }
        }
    }
    // lag reaches zero on the sixth tick and is spent on the next
    assert_eq!((recovering, readies), (6, 0));
    assert_eq!(manager.get("hero").unwrap().combat().lag_ms, 0);

    clock.advance(500);
    assert!(manager.tick("hero").unwrap().is_ready());
}

#[test]
fn test_engage_refused_during_lag() {
    let tables = common::load_tables();
    let config = common::test_config();
    let clock = ManualClock::new(0);
    let mut manager = CombatManager::with_clock(&tables, &config, &clock);
    manager.insert(common::swordsman("hero", 0));
    manager.insert(common::npc("ogre", 0, 0, 1000));
    manager.insert(common::npc("imp", 0, 0, 10));
    manager.engage("hero", "ogre").unwrap();

    let mut roller = ScriptedRoller::new([1]);
    manager.attack("hero", "ogre", &mut roller).unwrap();

    assert_eq!(
        manager.engage("hero", "imp"),
        Err(mudcombat::CombatRefusal::StillRecovering(3))
    );
    assert!(!manager.get("imp").unwrap().combat().in_combat());
}

#[test]
fn test_seeded_duel_runs_to_a_death() {
    let tables = common::load_tables();
    let config = common::test_config();
    let clock = ManualClock::new(0);
    let mut manager = CombatManager::with_clock(&tables, &config, &clock);
    manager.insert(common::swordsman("hero", 90));
    manager.insert(
        common::npc("troll", 70, 20, 150)
            .with_attribute("AT", 3)
            .with_weapon(common::broadsword(4.0)),
    );
    manager.enter_combat("hero", "troll").unwrap();

    let mut roller = RngRoller::new(StdRng::seed_from_u64(42));
    let mut swings = 0;
    for _ in 0..2_000 {
        clock.advance(250);
        for (actor, outcome) in manager.tick_all().unwrap() {
            if let TickOutcome::Ready { target } = outcome {
                if let Some(outcome) = manager.attack(&actor, &target, &mut roller).unwrap() {
                    swings += 1;
                    assert!((1..=100).contains(&outcome.roll));
                    assert_eq!(outcome.hit, outcome.total > 100);
                    if !outcome.hit {
                        assert_eq!(outcome.damage, None);
                    }
                }
            }
        }
        let dead = ["hero", "troll"]
            .iter()
            .filter(|id| manager.get(id).is_some_and(|c| c.combat().killed))
            .count();
        if dead > 0 {
            assert_eq!(dead, 1);
            break;
        }
    }

    assert!(swings > 0);
    let hero = manager.get("hero").unwrap();
    let troll = manager.get("troll").unwrap();
    assert!(hero.combat().killed ^ troll.combat().killed);
    // the survivor is left with nobody to fight
    assert!(!hero.combat().in_combat());
    assert!(!troll.combat().in_combat());

    let (winner, loser) = if troll.combat().killed {
        (hero, troll)
    } else {
        (troll, hero)
    };
    assert!(loser.health().is_some_and(|hp| hp <= 0));
    assert_eq!(loser.combat().killed_by.as_deref(), Some(winner.id()));
}
