//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::path::PathBuf;

use mudcombat::combat::{Character, Stance, Weapon};
use mudcombat::{CombatConfig, Tables};

/// The `data/` directory shipped with the crate
pub fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

pub fn load_tables() -> Tables {
    Tables::load(&data_dir()).expect("Failed to load shipped tables")
}

/// Defaults with a 1000ms recovery unit
pub fn test_config() -> CombatConfig {
    CombatConfig {
        data_dir: data_dir(),
        recovery_ms_per_speed_unit: 1000,
        ..CombatConfig::default()
    }
}

pub fn broadsword(speed: f64) -> Weapon {
    Weapon {
        id: "broadsword-1".into(),
        name: "a broadsword".into(),
        base: "broadsword".into(),
        skill: "edged weapons".into(),
        speed,
    }
}

/// A player with a broadsword whose AS equals `attack` (offensive stance, human)
pub fn swordsman(id: &str, attack: i32) -> Character {
    let mut hero = Character::player(id, "Hero", 200)
        .with_weapon(broadsword(3.0))
        .with_skill("edged weapons", attack - 5)
        .with_stance(Stance::Offensive)
        .with_attribute("DS", 0);
    hero.pvp = true;
    hero
}

/// An NPC with flat AS and DS
pub fn npc(id: &str, attack: i32, defense: i32, health: i32) -> Character {
    Character::npc(id, id, health)
        .with_attribute("AS", attack)
        .with_attribute("DS", defense)
}
