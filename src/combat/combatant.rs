//! Combatant capability surface
//!
//! Everything the combat rules need from a character. Players and NPCs
//! expose the same accessors; the only rules that differ between them
//! (offense score and weapon speed) are dispatched in [`CombatantKind`].

use serde::{Deserialize, Serialize};

use super::state::CombatState;

/// Weapon base and skill used when nothing is wielded
pub const BRAWLING: &str = "brawling";

/// Player or NPC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombatantKind {
    #[default]
    Player,
    Npc,
}

impl CombatantKind {
    pub fn is_npc(&self) -> bool {
        matches!(self, CombatantKind::Npc)
    }

    /// Attack strength (AS) for one swing.
    ///
    /// Players: `round((skill + strength) * (100 - stance) / 100)` using the
    /// wielded weapon's skill or brawling. NPCs: their stored `AS` attribute.
    pub fn attack_strength<C: Combatant + ?Sized>(&self, combatant: &C) -> i32 {
        match self {
            CombatantKind::Player => {
                let skill = combatant
                    .equipped_weapon()
                    .map(|w| w.skill.as_str())
                    .unwrap_or(BRAWLING);
                let raw = combatant
                    .skill_bonus(skill)
                    .saturating_add(combatant.stat_bonus("strength"));
                let stance_modifier = 100 - combatant.stance().value();
                (raw as f64 * stance_modifier as f64 / 100.0).round() as i32
            }
            CombatantKind::Npc => combatant.attribute("AS").unwrap_or(0),
        }
    }

    /// Weapon speed used for recovery lag. NPCs always use the baseline.
    pub fn weapon_speed<C: Combatant + ?Sized>(&self, combatant: &C, baseline: f64) -> f64 {
        match self {
            CombatantKind::Player => combatant
                .equipped_weapon()
                .map(|w| w.speed)
                .unwrap_or(baseline),
            CombatantKind::Npc => baseline,
        }
    }
}

/// Combat stance; higher values trade offense for defense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stance {
    Offensive,
    Advance,
    Forward,
    #[default]
    Neutral,
    Guarded,
    Defensive,
}

impl Stance {
    /// Percentage taken off attack strength
    pub fn value(&self) -> i32 {
        match self {
            Stance::Offensive => 0,
            Stance::Advance => 10,
            Stance::Forward => 20,
            Stance::Neutral => 30,
            Stance::Guarded => 40,
            Stance::Defensive => 50,
        }
    }
}

/// A wielded weapon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    /// Item id
    pub id: String,
    /// Display name ("a gleaming broadsword")
    pub name: String,
    /// Weapon base; names the weapon table
    pub base: String,
    /// Skill trained for this weapon ("edged weapons")
    pub skill: String,
    /// Speed in recovery units
    pub speed: f64,
}

/// Worn body armor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Armor {
    pub id: String,
    pub name: String,
    /// Armor group used to select weapon table rows
    pub armor_group: i32,
}

/// What dealt a blow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DamageSource {
    /// A weapon item, by id
    Weapon(String),
    /// The attacker itself (unarmed)
    Attacker(String),
}

/// Damage applied to a health resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Damage {
    pub amount: i32,
    pub source: DamageSource,
    /// Combatant responsible for the damage
    pub attacker: String,
    pub critical: bool,
}

/// What the combat core needs from a character
pub trait Combatant {
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    fn kind(&self) -> CombatantKind;

    /// Named numeric attribute (`AS`, `DS`, `AT`, ...)
    fn attribute(&self, name: &str) -> Option<i32>;

    /// Skill bonus for a weapon skill, 0 if untrained
    fn skill_bonus(&self, skill: &str) -> i32;

    /// Stat bonus including racial adjustment
    fn stat_bonus(&self, stat: &str) -> i32;

    fn stance(&self) -> Stance;

    fn equipped_weapon(&self) -> Option<&Weapon>;

    fn equipped_armor(&self) -> Option<&Armor>;

    /// Current health, `None` if this thing has no health at all
    fn health(&self) -> Option<i32>;

    fn apply_damage(&mut self, damage: &Damage);

    fn combat(&self) -> &CombatState;

    fn combat_mut(&mut self) -> &mut CombatState;

    /// Whether this character fights back at all
    fn can_fight(&self) -> bool {
        true
    }

    /// Opted into player-vs-player combat
    fn pvp_enabled(&self) -> bool {
        false
    }

    /// Whether a health recovery effect is already running
    fn has_recovery_effect(&self) -> bool {
        false
    }

    /// Begin a health recovery effect, returning whether it started
    fn start_recovery_effect(&mut self) -> bool {
        false
    }

    fn is_alive(&self) -> bool {
        self.health().is_some_and(|h| h > 0)
    }
}
