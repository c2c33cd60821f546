//! Critical tables
//!
//! One table per critical type (`Crush`, `Slash`, `Puncture`), keyed by
//! injury location and damage rank.

use serde::{Deserialize, Serialize};

use super::lookups::Location;
use super::DataTable;
use crate::error::CombatError;

/// Highest damage rank
pub const MAX_RANK: u8 = 9;

/// Critical damage families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CritType {
    Crush,
    Slash,
    Puncture,
}

impl CritType {
    /// Numeric ids used by legacy weapon rows (0 = none)
    pub fn from_id(id: u8) -> Option<CritType> {
        match id {
            1 => Some(CritType::Crush),
            2 => Some(CritType::Slash),
            3 => Some(CritType::Puncture),
            _ => None,
        }
    }

    /// Identifier of the critical table for this type
    pub fn table_id(&self) -> &'static str {
        match self {
            CritType::Crush => "Crush",
            CritType::Slash => "Slash",
            CritType::Puncture => "Puncture",
        }
    }
}

impl std::fmt::Display for CritType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.table_id())
    }
}

/// Legacy severity letters
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CritSeverity {
    A,
    B,
    C,
    D,
    E,
}

impl CritSeverity {
    /// Numeric ids used by legacy weapon rows (0 = none)
    pub fn from_id(id: u8) -> Option<CritSeverity> {
        match id {
            1 => Some(CritSeverity::A),
            2 => Some(CritSeverity::B),
            3 => Some(CritSeverity::C),
            4 => Some(CritSeverity::D),
            5 => Some(CritSeverity::E),
            _ => None,
        }
    }
}

/// Rank of a raw damage amount: 1 for (0,10], 2 for (10,20], ... 9 above 80.
/// Non-positive damage has no rank.
pub fn damage_rank(raw_damage: i32) -> Option<u8> {
    if raw_damage <= 0 {
        return None;
    }
    let rank = (raw_damage - 1) / 10 + 1;
    Some(rank.min(MAX_RANK as i32) as u8)
}

/// One critical table row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CriticalRow {
    pub location: Location,
    pub rank: u8,
    pub message: String,
    #[serde(default)]
    pub damage: i32,
    #[serde(default)]
    pub extra_hits: Option<i32>,
}

/// Narrative and bonus damage of a critical
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriticalEffect {
    pub message: String,
    pub bonus_damage: i32,
    pub extra_hits: Option<i32>,
}

/// All rows for one critical type
#[derive(Debug, Clone, PartialEq)]
pub struct CriticalTable {
    id: String,
    rows: Vec<CriticalRow>,
}

impl DataTable for CriticalTable {
    type Row = CriticalRow;
    const CATEGORY: &'static str = "crits";

    fn from_rows(id: &str, rows: Vec<CriticalRow>) -> Self {
        Self::new(id, rows)
    }
}

impl CriticalTable {
    pub fn new(id: &str, rows: Vec<CriticalRow>) -> Self {
        Self {
            id: id.to_string(),
            rows,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn rows(&self) -> &[CriticalRow] {
        &self.rows
    }

    /// The row for `(location, rank)`
    pub fn effect(&self, location: Location, rank: u8) -> Result<CriticalEffect, CombatError> {
        let key = || format!("{} rank {}", location, rank);

        let mut matches = self
            .rows
            .iter()
            .filter(|r| r.location == location && r.rank == rank);
        let Some(row) = matches.next() else {
            return Err(CombatError::no_row(&self.id, key()));
        };

        let extra = matches.count();
        if extra > 0 {
            return Err(CombatError::AmbiguousRow {
                table: self.id.clone(),
                key: key(),
                count: extra + 1,
            });
        }

        Ok(CriticalEffect {
            message: row.message.clone(),
            bonus_damage: row.damage,
            extra_hits: row.extra_hits,
        })
    }

    /// `(location, rank)` pairs with no row
    pub fn missing_entries(&self) -> Vec<(Location, u8)> {
        Location::all()
            .iter()
            .flat_map(|&loc| (1..=MAX_RANK).map(move |rank| (loc, rank)))
            .filter(|&(loc, rank)| !self.rows.iter().any(|r| r.location == loc && r.rank == rank))
            .collect()
    }
}
