//! Combat sessions
//!
//! [`CombatManager`] owns the combatants taking part in fights and handles:
//! - Target validation and entering combat
//! - Resolving attacks, including the death check
//! - Idempotent death handling and cleanup
//! - The regeneration hook

use std::collections::HashMap;

use tracing::{debug, info};

use super::combatant::Combatant;
use super::dice::Roller;
use super::resolution::{AttackOutcome, Resolver};
use crate::clock::{Clock, SystemClock};
use crate::config::CombatConfig;
use crate::error::{CombatError, CombatRefusal};
use crate::tables::Tables;

/// Notifications for the presentation and world layers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatEvent {
    /// `killer` landed the killing blow on `victim`
    Deathblow { killer: String, victim: String },
    /// `victim` died
    Killed {
        victim: String,
        killer: Option<String>,
    },
    /// A dead NPC should be removed from the world
    Despawn { id: String },
}

/// Check whether `attacker` may start a fight with `target`
pub fn validate_target<A, T>(attacker: &A, target: &T) -> Result<(), CombatRefusal>
where
    A: Combatant + ?Sized,
    T: Combatant + ?Sized,
{
    if attacker.id() == target.id() {
        return Err(CombatRefusal::SelfTarget);
    }
    // Players are only visible as targets to PvP attackers
    if !target.kind().is_npc() && !attacker.pvp_enabled() {
        return Err(CombatRefusal::NotHere);
    }
    if !target.can_fight() {
        return Err(CombatRefusal::Pacifist(target.name().to_string()));
    }
    if target.health().is_none() {
        return Err(CombatRefusal::InvalidTarget);
    }
    if !target.kind().is_npc() && !target.pvp_enabled() {
        return Err(CombatRefusal::NonPvp(target.name().to_string()));
    }
    Ok(())
}

/// Combatants and their fights
#[derive(Debug)]
pub struct CombatManager<'r, C, K = SystemClock> {
    resolver: Resolver<'r>,
    clock: K,
    combatants: HashMap<String, C>,
    events: Vec<CombatEvent>,
}

impl<'r, C: Combatant> CombatManager<'r, C, SystemClock> {
    /// Create a manager running on wall-clock time
    pub fn new(tables: &'r Tables, config: &'r CombatConfig) -> Self {
        Self::with_clock(tables, config, SystemClock)
    }
}

impl<'r, C: Combatant, K: Clock> CombatManager<'r, C, K> {
    pub fn with_clock(tables: &'r Tables, config: &'r CombatConfig, clock: K) -> Self {
        Self {
            resolver: Resolver::new(tables, config),
            clock,
            combatants: HashMap::new(),
            events: Vec::new(),
        }
    }

    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    /// Add a combatant, replacing any with the same id
    pub fn insert(&mut self, combatant: C) -> Option<C> {
        self.combatants
            .insert(combatant.id().to_string(), combatant)
    }

    pub fn get(&self, id: &str) -> Option<&C> {
        self.combatants.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut C> {
        self.combatants.get_mut(id)
    }

    /// Remove a combatant and drop it from every opponent list
    pub fn remove(&mut self, id: &str) -> Option<C> {
        let removed = self.combatants.remove(id)?;
        for other in self.combatants.values_mut() {
            other.combat_mut().remove_opponent(id);
        }
        Some(removed)
    }

    /// Ids of all combatants, sorted
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.combatants.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }

    /// Drain pending notifications
    pub fn take_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }

    fn combatant(&self, id: &str) -> Result<&C, CombatError> {
        self.combatants
            .get(id)
            .ok_or_else(|| CombatError::UnknownCombatant(id.to_string()))
    }

    fn combatant_mut(&mut self, id: &str) -> Result<&mut C, CombatError> {
        self.combatants
            .get_mut(id)
            .ok_or_else(|| CombatError::UnknownCombatant(id.to_string()))
    }

    /// Validate a player-initiated attack and start the fight.
    ///
    /// Refusals leave all state untouched.
    pub fn engage(&mut self, attacker_id: &str, target_id: &str) -> Result<(), CombatRefusal> {
        let (Some(attacker), Some(target)) = (self.get(attacker_id), self.get(target_id)) else {
            return Err(CombatRefusal::NotHere);
        };
        validate_target(attacker, target)?;

        let state = attacker.combat();
        if state.is_recovering() {
            return Err(CombatRefusal::StillRecovering(state.lag_secs()));
        }

        self.link(attacker_id, target_id);
        Ok(())
    }

    /// Put `a` and `b` in each other's opponent lists
    pub fn enter_combat(&mut self, a: &str, b: &str) -> Result<(), CombatError> {
        self.combatant(a)?;
        self.combatant(b)?;
        self.link(a, b);
        Ok(())
    }

    fn link(&mut self, a: &str, b: &str) {
        if a == b {
            return;
        }
        let now = self.clock.now_ms();
        for (id, other) in [(a, b), (b, a)] {
            if let Some(combatant) = self.combatants.get_mut(id) {
                let state = combatant.combat_mut();
                if !state.in_combat() {
                    state.round_started = now;
                }
                state.add_opponent(other);
            }
        }
    }

    /// Leave every fight and reset combat state
    pub fn exit_combat(&mut self, id: &str) -> Result<(), CombatError> {
        let opponents = self.combatant(id)?.combat().opponents().to_vec();
        for opponent in &opponents {
            if let Some(other) = self.combatants.get_mut(opponent) {
                other.combat_mut().remove_opponent(id);
            }
        }
        self.combatant_mut(id)?.combat_mut().reset();
        Ok(())
    }

    /// Resolve one attack and handle the target's death.
    ///
    /// Returns `None` when either side is already dead.
    pub fn attack<R: Roller + ?Sized>(
        &mut self,
        attacker_id: &str,
        target_id: &str,
        roller: &mut R,
    ) -> Result<Option<AttackOutcome>, CombatError> {
        let attacker_killed = self.combatant(attacker_id)?.combat().killed;
        let target_killed = self.combatant(target_id)?.combat().killed;
        if attacker_killed || target_killed || attacker_id == target_id {
            debug!(
                "{} tried to attack {} but one of them was already dead",
                attacker_id, target_id
            );
            return Ok(None);
        }

        // Take the attacker out so it can be borrowed alongside the target
        let Some(attacker) = self.combatants.remove(attacker_id) else {
            return Err(CombatError::UnknownCombatant(attacker_id.to_string()));
        };
        let result = match self.combatants.get_mut(target_id) {
            Some(target) => self.resolver.resolve(&attacker, target, roller),
            None => Err(CombatError::UnknownCombatant(target_id.to_string())),
        };
        self.combatants.insert(attacker_id.to_string(), attacker);
        let mut outcome = result?;

        let now = self.clock.now_ms();
        let state = self.combatant_mut(attacker_id)?.combat_mut();
        state.record_attack(
            outcome.roll,
            outcome.total,
            outcome.trace_message.clone(),
            outcome.critical_message.clone(),
        );
        state.lag_ms = outcome.recovery_lag_ms;
        state.round_started = now;

        debug!(
            "{} attacks {}: total {}, damage {:?}, lag {}ms",
            attacker_id, target_id, outcome.total, outcome.damage, outcome.recovery_lag_ms
        );

        let target_down = self
            .combatant(target_id)?
            .health()
            .is_some_and(|hp| hp <= 0);
        if outcome.hit && target_down {
            outcome.killed = self.resolve_death(target_id, Some(attacker_id))?;
        }

        Ok(Some(outcome))
    }

    /// Mark `id` dead and pull it out of every fight.
    ///
    /// Returns `false` (and does nothing) if it was already dead.
    pub fn resolve_death(&mut self, id: &str, killer: Option<&str>) -> Result<bool, CombatError> {
        let entity = self.combatant_mut(id)?;
        if entity.combat().killed {
            return Ok(false);
        }

        let state = entity.combat_mut();
        state.killed = true;
        state.killed_by = killer.map(str::to_string);
        state.lag_ms = 0;
        state.clear_opponents();

        let is_npc = entity.kind().is_npc();
        let victim_name = entity.name().to_string();

        for other in self.combatants.values_mut() {
            other.combat_mut().remove_opponent(id);
        }

        let killer_name = killer
            .and_then(|k| self.combatants.get(k))
            .map(|k| k.name().to_string());
        info!(
            "{} killed {}.",
            killer_name.as_deref().unwrap_or("Something"),
            victim_name
        );

        // Deathblow credit only goes to a combatant we know about
        if let Some(killer) = killer.filter(|k| self.combatants.contains_key(*k)) {
            self.events.push(CombatEvent::Deathblow {
                killer: killer.to_string(),
                victim: id.to_string(),
            });
        }
        self.events.push(CombatEvent::Killed {
            victim: id.to_string(),
            killer: killer.map(str::to_string),
        });
        if is_npc {
            self.events.push(CombatEvent::Despawn { id: id.to_string() });
        }

        Ok(true)
    }

    /// Start passive regeneration unless it is already running
    pub fn start_regeneration(&mut self, id: &str) -> Result<bool, CombatError> {
        let entity = self.combatant_mut(id)?;
        if entity.has_recovery_effect() {
            return Ok(false);
        }
        Ok(entity.start_recovery_effect())
    }
}
