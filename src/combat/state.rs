//! Per-combatant combat state
//!
//! Tracks:
//! - Recovery lag and when the current round started
//! - Whether the combatant has been killed (and by whom)
//! - Opponents, in the order they joined the fight
//! - The last resolution trace

/// Combat state owned by a single combatant
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombatState {
    /// Recovery time remaining, in milliseconds
    pub lag_ms: i64,
    /// When the current recovery period started (unix ms)
    pub round_started: i64,
    /// Set once by death resolution
    pub killed: bool,
    /// Who landed the killing blow
    pub killed_by: Option<String>,
    /// Opposing combatant ids, insertion ordered
    opponents: Vec<String>,
    /// Main d100 roll of the last attack
    pub last_roll: Option<i32>,
    /// Roll total of the last attack
    pub last_total: Option<i32>,
    /// AS/DS/AvD/roll breakdown of the last attack
    pub last_trace: Option<String>,
    /// Critical narrative of the last attack, if any
    pub last_critical: Option<String>,
}

impl CombatState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any opponents remain
    pub fn in_combat(&self) -> bool {
        !self.opponents.is_empty()
    }

    /// Whether the combatant is still recovering from its last action
    pub fn is_recovering(&self) -> bool {
        self.lag_ms > 0
    }

    pub fn opponents(&self) -> &[String] {
        &self.opponents
    }

    pub fn has_opponent(&self, id: &str) -> bool {
        self.opponents.iter().any(|o| o == id)
    }

    /// Add an opponent (no-op if already present)
    pub fn add_opponent(&mut self, id: &str) {
        if !self.has_opponent(id) {
            self.opponents.push(id.to_string());
        }
    }

    /// Remove an opponent, returning whether it was present
    pub fn remove_opponent(&mut self, id: &str) -> bool {
        let before = self.opponents.len();
        self.opponents.retain(|o| o != id);
        self.opponents.len() != before
    }

    /// Drop every opponent
    pub fn clear_opponents(&mut self) {
        self.opponents.clear();
    }

    /// Back to an empty state, keeping only the killed marker
    pub fn reset(&mut self) {
        *self = CombatState {
            killed: self.killed,
            killed_by: self.killed_by.take(),
            ..CombatState::default()
        };
    }

    /// Record the trace of a resolved attack
    pub fn record_attack(&mut self, roll: i32, total: i32, trace: String, critical: Option<String>) {
        self.last_roll = Some(roll);
        self.last_total = Some(total);
        self.last_trace = Some(trace);
        self.last_critical = critical;
    }

    /// Lag rounded to whole seconds, for "wait N seconds" messages
    pub fn lag_secs(&self) -> i64 {
        (self.lag_ms as f64 / 1000.0).round() as i64
    }
}
