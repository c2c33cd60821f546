//! Attack resolution
//!
//! One swing, start to finish:
//! 1. AS from the attacker, DS and armor group (AT) from the target
//! 2. AvD from the attacker's weapon table for that armor group
//! 3. d100 roll; `total = AS - DS + AvD + roll`, a hit needs more than 100
//! 4. On a hit, the weapon row for `total` gives the damage factor (DF)
//! 5. Positive raw damage rolls an injury location and applies a critical
//!
//! The only side effect is the damage applied to the target.

use tracing::{debug, error};

use super::combatant::{Combatant, Damage, DamageSource, BRAWLING};
use super::dice::Roller;
use crate::config::CombatConfig;
use crate::error::CombatError;
use crate::tables::{critical_type_for, damage_rank, injury_location, Location, Tables};

/// Totals must exceed this to hit
pub const HIT_THRESHOLD: i32 = 100;

/// Everything decided by one swing
#[derive(Debug, Clone, PartialEq)]
pub struct AttackOutcome {
    pub hit: bool,
    pub attack_strength: i32,
    pub defense_strength: i32,
    pub armor_group: i32,
    pub avd: i32,
    pub roll: i32,
    pub total: i32,
    /// AS/DS/AvD/roll breakdown, present on every outcome
    pub trace_message: String,
    pub location: Option<Location>,
    pub rank: Option<u8>,
    pub critical_message: Option<String>,
    /// Damage applied; `Some(0)` for a hit too marginal to wound
    pub damage: Option<i32>,
    pub extra_hits: Option<i32>,
    pub recovery_lag_ms: i64,
    /// Set by the session when this blow killed the target
    pub killed: bool,
}

impl AttackOutcome {
    /// Recovery lag in whole seconds, for "Roundtime" messages
    pub fn round_time_secs(&self) -> i64 {
        (self.recovery_lag_ms as f64 / 1000.0).round() as i64
    }
}

/// `AS - DS + AvD + roll`, saturating at the `i32` bounds
pub fn attack_total(attack_strength: i32, defense_strength: i32, avd: i32, roll: i32) -> i32 {
    attack_strength
        .saturating_sub(defense_strength)
        .saturating_add(avd)
        .saturating_add(roll)
}

pub fn is_hit(total: i32) -> bool {
    total > HIT_THRESHOLD
}

/// `round((total - 100) * DF)`
pub fn raw_damage(total: i32, df: f64) -> i32 {
    (total.saturating_sub(HIT_THRESHOLD) as f64 * df).round() as i32
}

/// Explicit `DS`, otherwise a fifth of the quickness bonus
pub fn defense_strength<C: Combatant + ?Sized>(target: &C) -> i32 {
    target
        .attribute("DS")
        .unwrap_or_else(|| (target.stat_bonus("quickness") as f64 / 5.0).round() as i32)
}

/// Explicit `AT`, otherwise worn armor, otherwise the baseline group
pub fn armor_group<C: Combatant + ?Sized>(target: &C, default_group: i32) -> i32 {
    target
        .attribute("AT")
        .or_else(|| target.equipped_armor().map(|a| a.armor_group))
        .unwrap_or(default_group)
}

pub fn trace_message(attack_strength: i32, defense_strength: i32, avd: i32, roll: i32, total: i32) -> String {
    format!(
        "AS: {} vs DS: {} with AvD: {} + d100 roll: {} = {}",
        attack_strength, defense_strength, avd, roll, total
    )
}

/// Resolves attacks against a rules registry
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'r> {
    tables: &'r Tables,
    config: &'r CombatConfig,
}

impl<'r> Resolver<'r> {
    pub fn new(tables: &'r Tables, config: &'r CombatConfig) -> Self {
        Self { tables, config }
    }

    /// Resolve one attack, applying damage to `target` on a wounding hit.
    ///
    /// Content errors are logged and returned; nothing is applied when one
    /// occurs.
    pub fn resolve<A, T, R>(
        &self,
        attacker: &A,
        target: &mut T,
        roller: &mut R,
    ) -> Result<AttackOutcome, CombatError>
    where
        A: Combatant + ?Sized,
        T: Combatant + ?Sized,
        R: Roller + ?Sized,
    {
        self.resolve_inner(attacker, target, roller).inspect_err(|e| {
            error!(
                "Attack by {} on {} rejected: {}",
                attacker.id(),
                target.id(),
                e
            )
        })
    }

    fn resolve_inner<A, T, R>(
        &self,
        attacker: &A,
        target: &mut T,
        roller: &mut R,
    ) -> Result<AttackOutcome, CombatError>
    where
        A: Combatant + ?Sized,
        T: Combatant + ?Sized,
        R: Roller + ?Sized,
    {
        let kind = attacker.kind();
        let weapon = attacker.equipped_weapon();
        let weapon_base = weapon.map(|w| w.base.as_str()).unwrap_or(BRAWLING);

        let attack_strength = kind.attack_strength(attacker);
        let defense_strength = defense_strength(target);
        let armor_group = armor_group(target, self.config.default_armor_group);

        let table = self.tables.weapons.get(weapon_base)?;
        let avd = table.attack_modifier(armor_group)?;

        let roll = roller.roll_d100();
        let total = attack_total(attack_strength, defense_strength, avd, roll);

        let speed = kind.weapon_speed(attacker, self.config.baseline_weapon_speed);
        let mut outcome = AttackOutcome {
            hit: is_hit(total),
            attack_strength,
            defense_strength,
            armor_group,
            avd,
            roll,
            total,
            trace_message: trace_message(attack_strength, defense_strength, avd, roll, total),
            location: None,
            rank: None,
            critical_message: None,
            damage: None,
            extra_hits: None,
            recovery_lag_ms: self.config.recovery_lag_ms(speed),
            killed: false,
        };

        if !outcome.hit {
            debug!("{} misses {} ({})", attacker.id(), target.id(), outcome.trace_message);
            return Ok(outcome);
        }

        let profile = table.profile(armor_group, total, self.config.max_roll_total)?;
        let raw = raw_damage(total, profile.df);
        let Some(rank) = damage_rank(raw) else {
            debug!("{} grazes {} for no damage", attacker.id(), target.id());
            outcome.damage = Some(0);
            return Ok(outcome);
        };

        let location_roll = roller.roll_d100();
        let location = injury_location(location_roll).ok_or_else(|| {
            CombatError::no_row("injury locations", format!("roll {}", location_roll))
        })?;
        let crit_type = critical_type_for(weapon_base)
            .or(profile.crit_type)
            .ok_or_else(|| CombatError::no_row("weapon critical types", weapon_base))?;
        let effect = self.tables.critical_effect(crit_type, location, rank)?;

        let amount = raw.saturating_add(effect.bonus_damage);
        let source = match weapon {
            Some(w) => DamageSource::Weapon(w.id.clone()),
            None => DamageSource::Attacker(attacker.id().to_string()),
        };
        target.apply_damage(&Damage {
            amount,
            source,
            attacker: attacker.id().to_string(),
            critical: true,
        });

        debug!(
            "{} hits {} for {} ({} {} rank {})",
            attacker.id(),
            target.id(),
            amount,
            crit_type,
            location,
            rank
        );

        outcome.location = Some(location);
        outcome.rank = Some(rank);
        outcome.critical_message = Some(effect.message);
        outcome.damage = Some(amount);
        outcome.extra_hits = effect.extra_hits;
        Ok(outcome)
    }
}
