//! mudcombat - combat resolution core for a text MUD
//!
//! Decides whether a strike lands, how much damage it does, which critical
//! it triggers and how long the attacker must recover before acting again.

pub mod clock;
pub mod combat;
pub mod config;
pub mod error;
pub mod tables;

pub use clock::{Clock, ManualClock, SystemClock};
pub use combat::{AttackOutcome, Character, CombatManager, Combatant, TickOutcome};
pub use config::CombatConfig;
pub use error::{CombatError, CombatRefusal};
pub use tables::Tables;
