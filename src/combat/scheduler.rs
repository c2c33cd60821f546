//! Combat round scheduler
//!
//! Each external tick moves one combatant through
//! Idle -> Recovering -> Ready. Lag counts down by the wall-clock time since
//! the previous tick; once it is spent the first living opponent (in the
//! order they joined the fight) becomes the target. The caller resolves the
//! attack itself so the narration stays with the presentation layer.

use tracing::debug;

use super::combatant::Combatant;
use super::session::CombatManager;
use crate::clock::Clock;
use crate::error::CombatError;

/// Why a tick took no action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleReason {
    /// The actor is dead; a stale tick
    Killed,
    /// Lag remains
    Recovering,
    /// No living opponents were left; the actor left combat
    CombatEnded,
    /// The chosen target died in the meantime
    TargetKilled,
}

/// Result of ticking one combatant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Ready to attack `target`
    Ready { target: String },
    NoAction(IdleReason),
}

impl TickOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, TickOutcome::Ready { .. })
    }
}

impl<'r, C: Combatant, K: Clock> CombatManager<'r, C, K> {
    /// Advance one combatant's round
    pub fn tick(&mut self, actor_id: &str) -> Result<TickOutcome, CombatError> {
        let now = self.now_ms();
        let actor = self
            .get_mut(actor_id)
            .ok_or_else(|| CombatError::UnknownCombatant(actor_id.to_string()))?;

        let state = actor.combat_mut();
        if state.killed {
            return Ok(TickOutcome::NoAction(IdleReason::Killed));
        }

        let elapsed = now - state.round_started;
        state.round_started = now;
        if state.lag_ms > 0 {
            state.lag_ms -= elapsed;
            return Ok(TickOutcome::NoAction(IdleReason::Recovering));
        }

        let Some(target_id) = self.choose_target(actor_id) else {
            debug!("{} has no valid targets, leaving combat", actor_id);
            self.exit_combat(actor_id)?;
            return Ok(TickOutcome::NoAction(IdleReason::CombatEnded));
        };

        if self.get(&target_id).is_some_and(|t| t.combat().killed) {
            debug!(
                "{} tried to attack {} but they were already dead",
                actor_id, target_id
            );
            return Ok(TickOutcome::NoAction(IdleReason::TargetKilled));
        }

        Ok(TickOutcome::Ready { target: target_id })
    }

    /// Tick every combatant in id order
    pub fn tick_all(&mut self) -> Result<Vec<(String, TickOutcome)>, CombatError> {
        let mut outcomes = Vec::new();
        for id in self.ids() {
            let outcome = self.tick(&id)?;
            outcomes.push((id, outcome));
        }
        Ok(outcomes)
    }

    /// First opponent, in join order, that has health and is alive
    pub fn choose_target(&self, actor_id: &str) -> Option<String> {
        let actor = self.get(actor_id)?;
        actor
            .combat()
            .opponents()
            .iter()
            .find(|id| self.get(id).is_some_and(|t| t.is_alive()))
            .cloned()
    }
}
