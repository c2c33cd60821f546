//! Combat system module
//!
//! Implements table-driven real-time combat:
//! - Attack resolution (AS vs DS, weapon AvD/DF, injury criticals)
//! - Recovery lag and the round scheduler
//! - Combat sessions, death handling and cleanup

mod character;
mod combatant;
mod dice;
mod resolution;
mod scheduler;
mod session;
mod state;

pub use character::{Character, Race};
pub use combatant::{
    Armor, Combatant, CombatantKind, Damage, DamageSource, Stance, Weapon, BRAWLING,
};
pub use dice::{RngRoller, Roller, ScriptedRoller};
pub use resolution::{
    armor_group, attack_total, defense_strength, is_hit, raw_damage, trace_message,
    AttackOutcome, Resolver, HIT_THRESHOLD,
};
pub use scheduler::{IdleReason, TickOutcome};
pub use session::{validate_target, CombatEvent, CombatManager};
pub use state::CombatState;
