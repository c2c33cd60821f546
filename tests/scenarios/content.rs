//! Shipped table integrity and lookup properties

use mudcombat::tables::{
    critical_type_for, CritSeverity, CritType, Location, WeaponRow, WeaponTable,
};
use mudcombat::CombatError;
use proptest::prelude::*;

use crate::common;

/// Every (location, rank) pair reachable in play has a critical row
#[test]
fn test_critical_tables_are_complete() {
    let tables = common::load_tables();
    for crit in [CritType::Crush, CritType::Slash, CritType::Puncture] {
        let table = tables.criticals.get(crit.table_id()).unwrap();
        assert!(
            table.missing_entries().is_empty(),
            "{} is missing {:?}",
            crit,
            table.missing_entries()
        );
        for &location in Location::all() {
            for rank in 1..=9 {
                table
                    .effect(location, rank)
                    .unwrap_or_else(|e| panic!("{}: {}", crit, e));
            }
        }
    }
}

/// Every hit total against every armor group selects exactly one row
#[test]
fn test_weapon_tables_cover_every_hit() {
    let tables = common::load_tables();
    let ids: Vec<String> = tables.weapons.ids().map(str::to_string).collect();
    for id in ids {
        let table = tables.weapons.get(&id).unwrap();
        for group in 1..=5 {
            table
                .attack_modifier(group)
                .unwrap_or_else(|e| panic!("{}: {}", id, e));
            for total in 101..=200 {
                table
                    .profile(group, total, 150)
                    .unwrap_or_else(|e| panic!("{} group {} total {}: {}", id, group, total, e));
            }
        }
        assert!(
            critical_type_for(&id).is_some()
                || table.rows().iter().all(|r| r.crit_type_id.is_some()),
            "{} has no critical type",
            id
        );
    }
}

#[test]
fn test_legacy_handaxe_rows() {
    let tables = common::load_tables();
    let profile = tables.weapon_profile("handaxe", 3, 140, 150).unwrap();
    assert_eq!(profile.crit_type, Some(CritType::Slash));
    assert_eq!(profile.crit_severity, Some(CritSeverity::C));
    assert_eq!(profile.hits, Some(12));
}

#[test]
fn test_slash_chest_row() {
    let tables = common::load_tables();
    let effect = tables
        .critical_effect(CritType::Slash, Location::Chest, 2)
        .unwrap();
    assert_eq!(effect.bonus_damage, 6);
    assert!(effect.message.contains("chest"));
}

fn arb_row() -> impl Strategy<Value = WeaponRow> {
    (90i32..160, 0i32..40, 1i32..3, -10i32..10, 0u32..30).prop_map(
        |(start, len, group, avd, df)| WeaponRow {
            roll_range_start: start,
            roll_range_end: start + len,
            armor_group: group,
            avd: Some(avd),
            df: Some(df as f64 / 10.0),
            crit_type_id: None,
            crit_severity: None,
            hits: None,
        },
    )
}

proptest! {
    /// Malformed content never silently resolves to the first matching row
    #[test]
    fn profile_requires_exactly_one_row(
        rows in proptest::collection::vec(arb_row(), 0..8),
        group in 1i32..3,
        total in 90i32..250,
    ) {
        let table = WeaponTable::new("fuzz", rows.clone());
        let clamped = total.min(150);
        let matching: Vec<&WeaponRow> = rows
            .iter()
            .filter(|r| r.armor_group == group
                && r.roll_range_start <= clamped
                && clamped <= r.roll_range_end)
            .collect();

        match table.profile(group, total, 150) {
            Ok(profile) => {
                prop_assert_eq!(matching.len(), 1);
                prop_assert_eq!(Some(profile.df), matching[0].df);
                prop_assert_eq!(Some(profile.avd), matching[0].avd);
            }
            Err(CombatError::NoMatchingRow { .. }) => prop_assert!(matching.is_empty()),
            Err(CombatError::AmbiguousRow { count, .. }) => {
                prop_assert_eq!(count, matching.len());
                prop_assert!(count > 1);
            }
            Err(other) => prop_assert!(false, "unexpected error {}", other),
        }
    }
}
