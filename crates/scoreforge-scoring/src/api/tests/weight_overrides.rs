//! Tests for constraint weight overrides.

use scoreforge_config::SessionConfig;
use scoreforge_core::score::{HardSoftScore, SimpleScore};
use scoreforge_core::ConstraintRef;

use crate::api::weight_overrides::ConstraintWeightOverrides;

#[test]
fn test_new_is_empty() {
    let overrides = ConstraintWeightOverrides::<SimpleScore>::new();
    assert!(overrides.is_empty());
    assert_eq!(overrides.len(), 0);
}

#[test]
fn test_put_and_get() {
    let mut overrides = ConstraintWeightOverrides::<SimpleScore>::new();
    overrides.put("test", SimpleScore::of(5));

    assert!(overrides.contains("test"));
    assert_eq!(overrides.get("test"), Some(&SimpleScore::of(5)));
}

#[test]
fn test_get_or_default() {
    let mut overrides = ConstraintWeightOverrides::<SimpleScore>::new();
    overrides.put("test", SimpleScore::of(5));

    assert_eq!(
        overrides.get_or_default("test", SimpleScore::of(1)),
        SimpleScore::of(5)
    );
    assert_eq!(
        overrides.get_or_default("other", SimpleScore::of(1)),
        SimpleScore::of(1)
    );
}

#[test]
fn test_remove_and_clear() {
    let mut overrides = ConstraintWeightOverrides::<SimpleScore>::new();
    overrides.put("test", SimpleScore::of(5));
    overrides.put("other", SimpleScore::of(2));

    assert_eq!(overrides.remove("test"), Some(SimpleScore::of(5)));
    assert!(!overrides.contains("test"));

    overrides.clear();
    assert!(overrides.is_empty());
}

#[test]
fn test_from_pairs() {
    let overrides = ConstraintWeightOverrides::<HardSoftScore>::from_pairs([
        ("hard_constraint", HardSoftScore::of_hard(1)),
        ("soft_constraint", HardSoftScore::of_soft(10)),
    ]);

    assert_eq!(overrides.len(), 2);
    assert_eq!(
        overrides.get("soft_constraint"),
        Some(&HardSoftScore::of_soft(10))
    );
}

#[test]
fn test_apply_replaces_by_full_name() {
    let room = ConstraintRef::new("timetabling", "Room conflict");
    let stability = ConstraintRef::new("timetabling", "Teacher room stability");
    let mut weights = vec![
        (room.clone(), HardSoftScore::of_hard(1)),
        (stability.clone(), HardSoftScore::of_soft(1)),
    ];

    let overrides = ConstraintWeightOverrides::from_pairs([
        ("timetabling/Teacher room stability", HardSoftScore::of_soft(5)),
        ("timetabling/No such constraint", HardSoftScore::of_soft(9)),
    ]);
    overrides.apply(&mut weights);

    assert_eq!(weights[0], (room, HardSoftScore::of_hard(1)));
    assert_eq!(weights[1], (stability, HardSoftScore::of_soft(5)));
}

#[test]
fn test_from_config() {
    let config = SessionConfig::new()
        .with_constraint_weight("timetabling/Room conflict", "2hard/0soft");
    let overrides = ConstraintWeightOverrides::<HardSoftScore>::from_config(&config).unwrap();

    assert_eq!(
        overrides.get("timetabling/Room conflict"),
        Some(&HardSoftScore::of_hard(2))
    );
}

#[test]
fn test_from_config_malformed_weight() {
    let config = SessionConfig::new().with_constraint_weight("timetabling/Room conflict", "2hard");
    assert!(ConstraintWeightOverrides::<HardSoftScore>::from_config(&config).is_err());
}
