use scoreforge_core::score::{BendableScore, HardMediumSoftScore, HardSoftScore, Score, SimpleScore};
use scoreforge_core::ConstraintRef;
use scoreforge_test::{Lesson, Room};

use super::*;

fn room_conflict() -> ConstraintRef {
    ConstraintRef::new("timetabling", "Room conflict")
}

fn room_stability() -> ConstraintRef {
    ConstraintRef::new("timetabling", "Teacher room stability")
}

fn timetabling_inliner(constraint_match_enabled: bool) -> ScoreInliner<HardSoftScore> {
    ScoreInliner::new(
        HardSoftScore::ZERO,
        [
            (room_conflict(), HardSoftScore::of_hard(1)),
            (room_stability(), HardSoftScore::of_soft(1)),
        ],
        constraint_match_enabled,
    )
    .unwrap()
}

fn lesson(id: usize) -> EntityRef {
    EntityRef::new(&Lesson::unassigned(id, "Math", "A. Turing", "9th grade"))
}

#[test]
fn test_new_inliner_is_zero() {
    let inliner = timetabling_inliner(false);
    assert_eq!(inliner.extract_score(0), HardSoftScore::ZERO);
    assert_eq!(inliner.extract_score(-3), HardSoftScore::of_uninitialized(-3, 0, 0));
    assert_eq!(inliner.constraint_count(), 2);
    assert!(!inliner.is_constraint_match_enabled());
}

#[test]
fn test_impact_and_undo() {
    let mut inliner = timetabling_inliner(false);
    let impacter = inliner.build_weighted_impacter(&room_conflict()).unwrap();

    let undo = impacter.impact(&mut inliner, -3, Vec::new());
    assert_eq!(inliner.extract_score(0), HardSoftScore::of(-3, 0));

    undo.undo(&mut inliner);
    assert_eq!(inliner.extract_score(0), HardSoftScore::ZERO);
}

#[test]
fn test_undo_exact_in_either_order() {
    for reverse in [false, true] {
        let mut inliner = ScoreInliner::new(
            HardMediumSoftScore::ZERO,
            [(room_conflict(), HardMediumSoftScore::of(2, 0, -7))],
            false,
        )
        .unwrap();
        let impacter = inliner.build_weighted_impacter(&room_conflict()).unwrap();
        let background = impacter.impact(&mut inliner, 11, Vec::new());
        let before = inliner.extract_score(0);

        let first = impacter.impact(&mut inliner, -5, Vec::new());
        let second = impacter.impact(&mut inliner, 3, Vec::new());
        assert_eq!(inliner.extract_score(0), HardMediumSoftScore::of(18, 0, -63));

        if reverse {
            second.undo(&mut inliner);
            first.undo(&mut inliner);
        } else {
            first.undo(&mut inliner);
            second.undo(&mut inliner);
        }
        assert_eq!(inliner.extract_score(0), before);
        assert_eq!(inliner.totals.as_slice(), &[22, 0, -77]);

        background.undo(&mut inliner);
        assert!(inliner.extract_score(0).is_zero());
    }
}

#[test]
fn test_impacts_accumulate_independently() {
    let mut inliner = timetabling_inliner(false);
    let hard = inliner.build_weighted_impacter(&room_conflict()).unwrap();
    let soft = inliner.build_weighted_impacter(&room_stability()).unwrap();

    let undo_hard = hard.impact(&mut inliner, -1, Vec::new());
    let undo_soft = soft.impact(&mut inliner, -4, Vec::new());
    let undo_again = hard.impact(&mut inliner, -1, Vec::new());
    assert_eq!(inliner.extract_score(0), HardSoftScore::of(-2, -4));

    undo_hard.undo(&mut inliner);
    assert_eq!(inliner.extract_score(0), HardSoftScore::of(-1, -4));
    undo_soft.undo(&mut inliner);
    undo_again.undo(&mut inliner);
    assert_eq!(inliner.extract_score(0), HardSoftScore::ZERO);
}

#[test]
fn test_impacter_touches_only_non_zero_levels() {
    let inliner = ScoreInliner::new(
        BendableScore::zero_with_levels(2, 3),
        [(room_conflict(), BendableScore::of(vec![0, 1], vec![0, 0, 5]))],
        false,
    )
    .unwrap();
    let impacter = inliner.build_weighted_impacter(&room_conflict()).unwrap();
    assert_eq!(impacter.levels.as_slice(), &[(1, 1), (4, 5)]);
    assert_eq!(impacter.constraint_index(), 0);
}

#[test]
fn test_bendable_impacts() {
    let mut inliner = ScoreInliner::new(
        BendableScore::zero_with_levels(1, 2),
        [(room_conflict(), BendableScore::of(vec![1], vec![0, 2]))],
        false,
    )
    .unwrap();
    let impacter = inliner.build_weighted_impacter(&room_conflict()).unwrap();
    let undo = impacter.impact(&mut inliner, -2, Vec::new());

    assert_eq!(
        inliner.extract_score(-1),
        BendableScore::of_uninitialized(-1, vec![-2], vec![0, -4])
    );
    undo.undo(&mut inliner);
    assert_eq!(inliner.extract_score(0), BendableScore::zero_with_levels(1, 2));
}

#[test]
fn test_zero_weight_is_refused() {
    let inliner = ScoreInliner::new(
        SimpleScore::ZERO,
        [(room_conflict(), SimpleScore::ZERO)],
        false,
    )
    .unwrap();
    assert_eq!(inliner.weight(&room_conflict()), Some(&SimpleScore::ZERO));

    let err = inliner.build_weighted_impacter(&room_conflict()).unwrap_err();
    assert_eq!(err, InlinerError::ZeroWeight(room_conflict()));
    assert!(err.to_string().contains("should have been culled"));
}

#[test]
fn test_uninitialized_weight_is_refused() {
    let err = ScoreInliner::new(
        HardSoftScore::ZERO,
        [(room_conflict(), HardSoftScore::of_uninitialized(-1, 0, 0))],
        false,
    )
    .unwrap_err();
    assert!(matches!(err, InlinerError::UninitializedWeight { .. }));
    assert!(err.to_string().contains("init score of 0"));

    assert!(ScoreInliner::new(
        HardSoftScore::ZERO,
        [(room_conflict(), HardSoftScore::of_uninitialized(-1, -1, 0))],
        false,
    )
    .is_err());
}

#[test]
fn test_overflowing_impact_undoes_exactly() {
    let mut inliner = ScoreInliner::new(
        SimpleScore::ZERO,
        [(room_conflict(), SimpleScore::of(i64::MAX))],
        false,
    )
    .unwrap();
    let impacter = inliner.build_weighted_impacter(&room_conflict()).unwrap();
    let background = impacter.impact(&mut inliner, 1, Vec::new());

    let undo = impacter.impact(&mut inliner, 3, Vec::new());
    undo.undo(&mut inliner);
    assert_eq!(inliner.extract_score(0), SimpleScore::of(i64::MAX));

    background.undo(&mut inliner);
    assert!(inliner.extract_score(0).is_zero());
}

#[test]
fn test_unknown_constraint_is_refused() {
    let inliner = timetabling_inliner(false);
    let unknown = ConstraintRef::new("timetabling", "Unknown");
    assert_eq!(
        inliner.build_weighted_impacter(&unknown).unwrap_err(),
        InlinerError::UnknownConstraint(unknown)
    );
}

#[test]
fn test_incompatible_weight_is_refused() {
    let err = ScoreInliner::new(
        BendableScore::zero_with_levels(1, 1),
        [(room_conflict(), BendableScore::zero_with_levels(2, 1))],
        false,
    )
    .unwrap_err();
    assert!(matches!(err, InlinerError::IncompatibleWeight { .. }));
}

#[test]
fn test_duplicate_constraint_keeps_last_weight() {
    let inliner = ScoreInliner::new(
        SimpleScore::ZERO,
        [
            (room_conflict(), SimpleScore::of(1)),
            (room_conflict(), SimpleScore::of(4)),
        ],
        false,
    )
    .unwrap();
    assert_eq!(inliner.constraint_count(), 1);
    assert_eq!(inliner.weight(&room_conflict()), Some(&SimpleScore::of(4)));
}

#[test]
fn test_tracking_disabled() {
    let inliner = timetabling_inliner(false);
    assert_eq!(
        inliner.explain(0).unwrap_err(),
        InlinerError::MatchTrackingDisabled
    );
    assert!(inliner.constraint_match_totals().is_err());
    assert!(inliner.indictments().is_err());
}

#[test]
fn test_constraint_match_totals() {
    let mut inliner = timetabling_inliner(true);
    let impacter = inliner.build_weighted_impacter(&room_conflict()).unwrap();

    let first = impacter.impact(&mut inliner, -1, vec![lesson(0), lesson(1)]);
    let second = impacter.impact(&mut inliner, -1, vec![lesson(1), lesson(2)]);

    let total = inliner
        .constraint_match_total(&room_conflict())
        .unwrap()
        .unwrap();
    assert_eq!(total.match_count(), 2);
    assert_eq!(*total.score(), HardSoftScore::of_hard(-2));
    assert_eq!(*total.weight(), HardSoftScore::of_hard(1));
    assert!(inliner
        .constraint_match_total(&room_stability())
        .unwrap()
        .is_none());

    first.undo(&mut inliner);
    let total = inliner
        .constraint_match_total(&room_conflict())
        .unwrap()
        .unwrap();
    assert_eq!(total.match_count(), 1);

    second.undo(&mut inliner);
    assert_eq!(inliner.constraint_match_totals().unwrap().count(), 0);
}

#[test]
fn test_indictments() {
    let mut inliner = timetabling_inliner(true);
    let hard = inliner.build_weighted_impacter(&room_conflict()).unwrap();
    let soft = inliner.build_weighted_impacter(&room_stability()).unwrap();

    let first = hard.impact(&mut inliner, -1, vec![lesson(0), lesson(1)]);
    let second = soft.impact(&mut inliner, -3, vec![lesson(1)]);

    let shared = inliner.indictment(&lesson(1)).unwrap().unwrap();
    assert_eq!(shared.match_count(), 2);
    assert_eq!(shared.score, HardSoftScore::of(-1, -3));
    assert_eq!(shared.constraint_count(), 2);
    assert_eq!(inliner.indictments().unwrap().count(), 2);

    first.undo(&mut inliner);
    assert!(inliner.indictment(&lesson(0)).unwrap().is_none());
    let shared = inliner.indictment(&lesson(1)).unwrap().unwrap();
    assert_eq!(shared.score, HardSoftScore::of_soft(-3));

    second.undo(&mut inliner);
    assert_eq!(inliner.indictments().unwrap().count(), 0);
}

#[test]
fn test_repeated_justification_indicts_once() {
    let mut inliner = timetabling_inliner(true);
    let impacter = inliner.build_weighted_impacter(&room_conflict()).unwrap();
    let room = EntityRef::new(&Room::new(0, "Room A"));

    let undo = impacter.impact(&mut inliner, -1, vec![room.clone(), room.clone()]);
    let indictment = inliner.indictment(&room).unwrap().unwrap();
    assert_eq!(indictment.match_count(), 1);
    assert_eq!(indictment.score, HardSoftScore::of_hard(-1));

    let total = inliner
        .constraint_match_total(&room_conflict())
        .unwrap()
        .unwrap();
    let recorded = total.matches().next().unwrap();
    assert_eq!(recorded.justifications.len(), 2);

    undo.undo(&mut inliner);
    assert!(inliner.indictment(&room).unwrap().is_none());
}

#[test]
fn test_explain() {
    let mut inliner = timetabling_inliner(true);
    let impacter = inliner.build_weighted_impacter(&room_conflict()).unwrap();
    let _undo = impacter.impact(&mut inliner, -2, vec![lesson(0)]);

    let explanation = inliner.explain(-1).unwrap();
    assert_eq!(explanation.score, HardSoftScore::of_uninitialized(-1, -2, 0));
    assert_eq!(explanation.constraint_analyses.len(), 2);

    let hard = explanation.get(&room_conflict()).unwrap();
    assert!(hard.is_hard);
    assert_eq!(hard.match_count, 1);
    assert_eq!(hard.score, HardSoftScore::of_hard(-2));

    let soft = explanation.get(&room_stability()).unwrap();
    assert!(!soft.is_hard);
    assert_eq!(soft.match_count, 0);
    assert!(soft.score.is_zero());
    assert_eq!(explanation.non_zero_constraints().len(), 1);
}
