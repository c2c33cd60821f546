//! Weapon tables
//!
//! One table per weapon base. Each row covers a contiguous range of roll
//! totals against one armor group and carries the attack-vs-defense modifier
//! (AvD) and the damage factor (DF). Older content also carries a critical
//! type/severity pair and a flat hit count.

use serde::{Deserialize, Serialize};

use super::criticals::{CritSeverity, CritType};
use super::DataTable;
use crate::error::CombatError;

/// One weapon table row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WeaponRow {
    pub roll_range_start: i32,
    pub roll_range_end: i32,
    pub armor_group: i32,
    #[serde(rename = "AvD", default)]
    pub avd: Option<i32>,
    #[serde(rename = "DF", default)]
    pub df: Option<f64>,
    #[serde(default)]
    pub crit_type_id: Option<u8>,
    #[serde(default)]
    pub crit_severity: Option<u8>,
    #[serde(default)]
    pub hits: Option<i32>,
}

impl WeaponRow {
    fn contains(&self, armor_group: i32, total: i32) -> bool {
        self.armor_group == armor_group
            && self.roll_range_start <= total
            && total <= self.roll_range_end
    }
}

/// What a weapon table row says about one swing
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponProfile {
    pub avd: i32,
    pub df: f64,
    pub crit_type: Option<CritType>,
    pub crit_severity: Option<CritSeverity>,
    pub hits: Option<i32>,
}


/// All rows for one weapon base
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponTable {
    id: String,
    rows: Vec<WeaponRow>,
}

impl DataTable for WeaponTable {
    type Row = WeaponRow;
    const CATEGORY: &'static str = "weapons";

    fn from_rows(id: &str, rows: Vec<WeaponRow>) -> Self {
        Self::new(id, rows)
    }
}

impl WeaponTable {
    pub fn new(id: &str, rows: Vec<WeaponRow>) -> Self {
        Self {
            id: id.to_string(),
            rows,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn rows(&self) -> &[WeaponRow] {
        &self.rows
    }

    fn missing(&self, key: String, field: &'static str) -> CombatError {
        CombatError::MissingField {
            table: self.id.clone(),
            key,
            field,
        }
    }

    /// The AvD this weapon has against an armor group.
    ///
    /// Every row of a group must agree on AvD; the modifier is needed before
    /// the roll total exists, so it cannot depend on the range.
    pub fn attack_modifier(&self, armor_group: i32) -> Result<i32, CombatError> {
        let mut values = self
            .rows
            .iter()
            .filter(|r| r.armor_group == armor_group)
            .map(|r| {
                r.avd.ok_or_else(|| {
                    self.missing(
                        format!(
                            "armor group {}, totals {}-{}",
                            armor_group, r.roll_range_start, r.roll_range_end
                        ),
                        "AvD",
                    )
                })
            })
            .collect::<Result<Vec<i32>, CombatError>>()?;
        values.sort_unstable();
        values.dedup();

        match values.as_slice() {
            [] => Err(CombatError::no_row(
                &self.id,
                format!("armor group {}", armor_group),
            )),
            [avd] => Ok(*avd),
            _ => Err(CombatError::AmbiguousRow {
                table: self.id.clone(),
                key: format!("AvD for armor group {}", armor_group),
                count: values.len(),
            }),
        }
    }

    /// Select the single row covering `total` (clamped to `max_total`) for
    /// `armor_group`. Zero or several matches are both content errors.
    pub fn profile(
        &self,
        armor_group: i32,
        total: i32,
        max_total: i32,
    ) -> Result<WeaponProfile, CombatError> {
        let total = total.min(max_total);
        let key = || format!("armor group {}, total {}", armor_group, total);

        let mut matches = self.rows.iter().filter(|r| r.contains(armor_group, total));
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

        Ok(WeaponProfile {
            avd: row.avd.ok_or_else(|| self.missing(key(), "AvD"))?,
            df: row.df.ok_or_else(|| self.missing(key(), "DF"))?,
            crit_type: row.crit_type_id.and_then(CritType::from_id),
            crit_severity: row.crit_severity.and_then(CritSeverity::from_id),
            hits: row.hits,
        })
    }
}
