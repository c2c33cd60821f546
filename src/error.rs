//! Combat error types
//!
//! Two channels:
//! - `CombatError`: rules content or roster is broken, the resolution is rejected
//! - `CombatRefusal`: the player asked for something the rules do not allow

use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures while resolving combat
#[derive(Debug, Error)]
pub enum CombatError {
    #[error("unknown table id: {0}")]
    UnknownTableId(String),

    #[error("no matching row in {table} for {key}")]
    NoMatchingRow { table: String, key: String },

    #[error("{count} rows in {table} match {key}")]
    AmbiguousRow {
        table: String,
        key: String,
        count: usize,
    },

    #[error("{table} row for {key} has no {field}")]
    MissingField {
        table: String,
        key: String,
        field: &'static str,
    },

    #[error("unknown combatant: {0}")]
    UnknownCombatant(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl CombatError {
    pub(crate) fn no_row(table: &str, key: impl Into<String>) -> Self {
        CombatError::NoMatchingRow {
            table: table.to_string(),
            key: key.into(),
        }
    }
}

/// Policy refusals shown to the player who tried to start a fight
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombatRefusal {
    #[error("They aren't here.")]
    NotHere,

    #[error("You smack yourself in the face. Ouch!")]
    SelfTarget,

    #[error("{0} is a pacifist and will not fight you.")]
    Pacifist(String),

    #[error("You can't attack that target")]
    InvalidTarget,

    #[error("{0} has not opted into PvP.")]
    NonPvp(String),

    #[error("...wait {0} more seconds...")]
    StillRecovering(i64),
}
