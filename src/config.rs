//! Combat configuration
//!
//! Layered with figment: built-in defaults, then an optional TOML file, then
//! `MUDCOMBAT_*` environment variables.

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Tunable constants of the combat rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatConfig {
    /// Root of the table data (contains `weapons/` and `crits/`)
    pub data_dir: PathBuf,
    /// Recovery lag per unit of weapon speed
    pub recovery_ms_per_speed_unit: u64,
    /// Roll totals above this are clamped before weapon table lookup
    pub max_roll_total: i32,
    /// Weapon speed for NPCs and unarmed players
    pub baseline_weapon_speed: f64,
    /// Armor group used when the target has no armor at all
    pub default_armor_group: i32,
    /// How often the duel runner ticks combatants
    pub tick_interval_ms: u64,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            recovery_ms_per_speed_unit: 5000,
            max_roll_total: 150,
            baseline_weapon_speed: 2.0,
            default_armor_group: 1,
            tick_interval_ms: 250,
        }
    }
}

impl CombatConfig {
    /// Load configuration, reading `path` if given
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        Self::figment(path).extract()
    }

    /// The provider stack used by [`CombatConfig::load`]
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(CombatConfig::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed("MUDCOMBAT_"))
    }

    /// Recovery lag for a weapon of the given speed
    pub fn recovery_lag_ms(&self, speed: f64) -> i64 {
        (speed * self.recovery_ms_per_speed_unit as f64).round() as i64
    }
}
