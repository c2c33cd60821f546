//! Rules data tables
//!
//! Weapon and critical tables live one file per identifier under a category
//! directory (`weapons/broadsword.json`, `crits/Slash.json`). Each file is a
//! JSON array of rows. Tables are read once into a [`Tables`] registry at
//! startup and only borrowed afterwards.

pub mod criticals;
pub mod lookups;
pub mod weapons;

pub use criticals::{damage_rank, CritSeverity, CritType, CriticalEffect, CriticalRow, CriticalTable};
pub use lookups::{critical_type_for, injury_location, Location, INJURY_LOCATIONS};
pub use weapons::{WeaponProfile, WeaponRow, WeaponTable};

use std::collections::HashMap;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::CombatError;

/// A table built from the rows of one data file
pub trait DataTable: Sized {
    type Row: DeserializeOwned;

    /// Directory name of this table category
    const CATEGORY: &'static str;

    fn from_rows(id: &str, rows: Vec<Self::Row>) -> Self;
}

/// All tables of one category, keyed by identifier
#[derive(Debug, Clone)]
pub struct TableStore<T> {
    tables: HashMap<String, T>,
}

impl<T> Default for TableStore<T> {
    fn default() -> Self {
        Self {
            tables: HashMap::new(),
        }
    }
}

impl<T: DataTable> TableStore<T> {
    /// Scan `dir` once and parse every `*.json` file in it
    pub fn load(dir: &Path) -> Result<Self, CombatError> {
        let entries = std::fs::read_dir(dir).map_err(|source| CombatError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut tables = HashMap::new();
        for entry in entries {
            let path = entry
                .map_err(|source| CombatError::Io {
                    path: dir.to_path_buf(),
                    source,
                })?
                .path();

            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let contents = std::fs::read_to_string(&path).map_err(|source| CombatError::Io {
                path: path.clone(),
                source,
            })?;
            let rows: Vec<T::Row> =
                serde_json::from_str(&contents).map_err(|source| CombatError::Parse {
                    path: path.clone(),
                    source,
                })?;

            debug!("Loaded {} table {} ({} rows)", T::CATEGORY, id, rows.len());
            tables.insert(id.to_string(), T::from_rows(id, rows));
        }

        info!("Loaded {} {} tables from {}", tables.len(), T::CATEGORY, dir.display());
        Ok(Self { tables })
    }
}

impl<T> TableStore<T> {
    /// Build a store from tables already in memory
    pub fn from_tables(tables: impl IntoIterator<Item = (String, T)>) -> Self {
        Self {
            tables: tables.into_iter().collect(),
        }
    }

    /// Get a table by identifier
    pub fn get(&self, id: &str) -> Result<&T, CombatError> {
        self.tables
            .get(id)
            .ok_or_else(|| CombatError::UnknownTableId(id.to_string()))
    }

    /// Identifiers of every loaded table
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.tables.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// The complete rules registry shared by every combatant
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub weapons: TableStore<WeaponTable>,
    pub criticals: TableStore<CriticalTable>,
}

impl Tables {
    /// Load `weapons/` and `crits/` under `data_dir`
    pub fn load(data_dir: &Path) -> Result<Self, CombatError> {
        Ok(Self {
            weapons: TableStore::load(&data_dir.join(WeaponTable::CATEGORY))?,
            criticals: TableStore::load(&data_dir.join(CriticalTable::CATEGORY))?,
        })
    }

    /// Weapon row for a hit of `total` against `armor_group`
    pub fn weapon_profile(
        &self,
        weapon: &str,
        armor_group: i32,
        total: i32,
        max_total: i32,
    ) -> Result<WeaponProfile, CombatError> {
        self.weapons.get(weapon)?.profile(armor_group, total, max_total)
    }

    /// Critical effect for a crit type, body location and damage rank
    pub fn critical_effect(
        &self,
        crit_type: CritType,
        location: Location,
        rank: u8,
    ) -> Result<CriticalEffect, CombatError> {
        self.criticals
            .get(crit_type.table_id())?
            .effect(location, rank)
    }
}
