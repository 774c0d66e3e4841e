//! End-to-end scoring of a small timetable through arenas, scorers and a session.

use std::collections::HashMap;

use scoreforge_config::{EnvironmentMode, SessionConfig};
use scoreforge_core::score::{HardSoftScore, Score};
use scoreforge_core::{ConstraintRef, ImpactType};
use scoreforge_test::{Lesson, Timetable};

use crate::api::analysis::EntityRef;
use crate::error::{InlinerError, SessionError};
use crate::inliner::UndoHandle;
use crate::node::{Scorer, TupleArena, TupleId};
use crate::session::ScoreSession;
use crate::tuple::BiTuple;

type Pair = BiTuple<usize, usize, UndoHandle<HardSoftScore>>;

const PACKAGE: &str = "timetabling";

fn constraint(name: &str) -> ConstraintRef {
    ConstraintRef::new(PACKAGE, name)
}

fn default_weights() -> Vec<(ConstraintRef, HardSoftScore)> {
    vec![
        (constraint("Room conflict"), HardSoftScore::of_hard(1)),
        (constraint("Teacher conflict"), HardSoftScore::of_hard(1)),
        (constraint("Student group conflict"), HardSoftScore::of_hard(1)),
    ]
}

/// Keeps one pair tuple per conflicting lesson pair, like a self-join would.
struct ConflictJoin {
    conflict: fn(&Lesson, &Lesson) -> bool,
    arena: TupleArena<Pair>,
    pairs: HashMap<(usize, usize), TupleId>,
}

impl ConflictJoin {
    fn new(session: &ScoreSession<HardSoftScore>, conflict: fn(&Lesson, &Lesson) -> bool) -> Self {
        Self {
            conflict,
            arena: session.new_arena(),
            pairs: HashMap::new(),
        }
    }

    fn conflicts(&self, a: &Lesson, b: &Lesson) -> bool {
        a.timeslot.is_some() && a.timeslot == b.timeslot && (self.conflict)(a, b)
    }

    /// Re-evaluates every pair involving `changed`.
    fn refresh(&mut self, lessons: &[Lesson], changed: usize) {
        for other in 0..lessons.len() {
            if other == changed {
                continue;
            }
            let key = (changed.min(other), changed.max(other));
            let conflicting = self.conflicts(&lessons[key.0], &lessons[key.1]);
            match (self.pairs.get(&key).copied(), conflicting) {
                (None, true) => {
                    let id = self.arena.insert(Pair::new(key.0, key.1, 1));
                    self.pairs.insert(key, id);
                }
                (Some(id), false) => {
                    self.arena.retract(id).unwrap();
                    self.pairs.remove(&key);
                }
                (Some(id), true) => self.arena.update(id).unwrap(),
                (None, false) => {}
            }
        }
    }
}

fn room_conflict(a: &Lesson, b: &Lesson) -> bool {
    a.room.is_some() && a.room == b.room
}

fn teacher_conflict(a: &Lesson, b: &Lesson) -> bool {
    a.teacher == b.teacher
}

fn student_group_conflict(a: &Lesson, b: &Lesson) -> bool {
    a.student_group == b.student_group
}

fn from_scratch(timetable: &Timetable, room_weight: i64) -> HardSoftScore {
    let hard = room_weight * timetable.room_conflicts() as i64
        + timetable.teacher_conflicts() as i64
        + timetable.student_group_conflicts() as i64;
    HardSoftScore::of_uninitialized(timetable.init_score(), -hard, 0)
}

/// Drives the three conflict constraints for a timetable being edited.
struct Harness {
    session: ScoreSession<HardSoftScore>,
    joins: Vec<(ConflictJoin, ConstraintRef)>,
    timetable: Timetable,
}

impl Harness {
    fn new(config: &SessionConfig) -> Self {
        let session = ScoreSession::new(HardSoftScore::ZERO, default_weights(), config).unwrap();
        let joins = vec![
            (ConflictJoin::new(&session, room_conflict), constraint("Room conflict")),
            (ConflictJoin::new(&session, teacher_conflict), constraint("Teacher conflict")),
            (
                ConflictJoin::new(&session, student_group_conflict),
                constraint("Student group conflict"),
            ),
        ];
        let mut harness = Self {
            session,
            joins,
            timetable: Timetable::small(),
        };
        for lesson in 0..harness.timetable.lessons.len() {
            harness.refresh(lesson);
        }
        harness.propagate();
        harness
    }

    fn refresh(&mut self, lesson: usize) {
        for (join, _) in &mut self.joins {
            join.refresh(&self.timetable.lessons, lesson);
        }
    }

    fn change(&mut self, lesson: usize, timeslot: Option<usize>, room: Option<usize>) {
        let target = &mut self.timetable.lessons[lesson];
        target.timeslot = timeslot;
        target.room = room;
        self.refresh(lesson);
    }

    fn propagate(&mut self) {
        let lessons = self.timetable.lessons.clone();
        for (join, constraint) in &mut self.joins {
            let impacter = self.session.build_impacter(constraint).unwrap();
            let scorer = Scorer::new(impacter, ImpactType::Penalty, 0, |_: &Pair| 1).with_justifier(
                |pair: &Pair| {
                    vec![
                        EntityRef::new(&lessons[*pair.a()]),
                        EntityRef::new(&lessons[*pair.b()]),
                    ]
                },
            );
            join.arena
                .propagate(&mut scorer.sink(self.session.inliner_mut()))
                .unwrap();
        }
        self.session.set_init_score(self.timetable.init_score());
    }
}

#[test]
fn test_initial_score_matches_from_scratch() {
    let harness = Harness::new(&SessionConfig::default());
    let score = harness.session.calculate_score();

    assert_eq!(score, from_scratch(&harness.timetable, 1));
    assert_eq!(score, HardSoftScore::of_uninitialized(-2, -2, 0));
    assert!(!score.is_feasible());
}

#[test]
fn test_incremental_changes_match_from_scratch() {
    let config = SessionConfig::default()
        .with_environment_mode(EnvironmentMode::FullAssert)
        .with_constraint_match_enabled(true);
    let mut harness = Harness::new(&config);

    let moves = [
        (1, Some(1), Some(0)),
        (5, Some(0), Some(1)),
        (4, Some(1), Some(0)),
        (2, None, None),
        (0, Some(1), Some(0)),
        (2, Some(0), Some(0)),
        (3, Some(0), Some(1)),
        (3, Some(1), Some(1)),
    ];
    for (lesson, timeslot, room) in moves {
        harness.change(lesson, timeslot, room);
        harness.propagate();
        assert_eq!(
            harness.session.calculate_score(),
            from_scratch(&harness.timetable, 1),
            "after moving lesson {} to {:?}/{:?}",
            lesson,
            timeslot,
            room
        );
    }
}

#[test]
fn test_changes_before_propagation_are_batched() {
    let mut harness = Harness::new(&SessionConfig::default());

    // Lesson 1 leaves the room conflict and comes back before any propagation.
    harness.change(1, Some(1), Some(1));
    harness.change(1, Some(0), Some(0));
    harness.change(5, Some(1), Some(1));
    harness.propagate();

    assert_eq!(
        harness.session.calculate_score(),
        from_scratch(&harness.timetable, 1)
    );
}

#[test]
fn test_unassigning_lessons_clears_hard_conflicts() {
    let mut harness = Harness::new(&SessionConfig::default());
    harness.change(1, None, None);
    harness.change(4, None, None);
    harness.propagate();

    let score = harness.session.calculate_score();
    assert_eq!(score, from_scratch(&harness.timetable, 1));
    assert_eq!(score, HardSoftScore::of_uninitialized(-6, 0, 0));
    assert!(!score.is_feasible());
    assert!(score.with_init_score(0).is_feasible());
}

#[test]
fn test_weight_override_from_config() {
    let config = SessionConfig::default().with_constraint_weight("timetabling/Room conflict", "3hard/0soft");
    let harness = Harness::new(&config);

    assert_eq!(
        harness.session.inliner().weight(&constraint("Room conflict")),
        Some(&HardSoftScore::of_hard(3))
    );
    assert_eq!(
        harness.session.calculate_score(),
        from_scratch(&harness.timetable, 3)
    );
}

#[test]
fn test_explain_session() {
    let config = SessionConfig::default().with_constraint_match_enabled(true);
    let harness = Harness::new(&config);
    let explanation = harness.session.explain().unwrap();

    assert_eq!(explanation.score, harness.session.calculate_score());
    assert_eq!(explanation.total_match_count(), 2);
    let room = explanation.get(&constraint("Room conflict")).unwrap();
    assert_eq!(room.match_count, 1);
    assert!(room.is_hard);

    let lesson = EntityRef::new(&harness.timetable.lessons[1]);
    let indictment = harness.session.inliner().indictment(&lesson).unwrap().unwrap();
    assert_eq!(indictment.score, HardSoftScore::of_hard(-2));
}

#[test]
fn test_asserted_session_validates_arenas() {
    let session = ScoreSession::new(
        HardSoftScore::ZERO,
        default_weights(),
        &SessionConfig::default()
            .with_environment_mode(EnvironmentMode::FastAssert)
            .with_dirty_queue_capacity(16),
    )
    .unwrap();
    let arena: TupleArena<Pair> = session.new_arena();
    assert!(arena.is_validating());
    assert_eq!(session.environment_mode(), EnvironmentMode::FastAssert);

    let relaxed = ScoreSession::new(HardSoftScore::ZERO, default_weights(), &SessionConfig::default())
        .unwrap();
    assert!(!relaxed.new_arena::<Pair>().is_validating());
}

#[test]
fn test_malformed_override_fails_session() {
    let config = SessionConfig::default().with_constraint_weight("timetabling/Room conflict", "3");
    let err = ScoreSession::new(HardSoftScore::ZERO, default_weights(), &config)
        .err()
        .unwrap();
    assert!(matches!(err, SessionError::Config(_)));
}

#[test]
fn test_uninitialized_override_fails_session() {
    let config = SessionConfig::default()
        .with_constraint_weight("timetabling/Room conflict", "-1init/[0]hard/[0]soft");
    let err = ScoreSession::new(HardSoftScore::ZERO, default_weights(), &config)
        .err()
        .unwrap();
    assert!(matches!(
        err,
        SessionError::Inliner(InlinerError::UninitializedWeight { .. })
    ));
}

#[test]
fn test_zero_weight_constraint_has_no_impacter() {
    let config =
        SessionConfig::default().with_constraint_weight("timetabling/Teacher conflict", "0hard/0soft");
    let session = ScoreSession::new(HardSoftScore::ZERO, default_weights(), &config).unwrap();
    assert!(session.build_impacter(&constraint("Teacher conflict")).is_err());
    assert!(session.build_impacter(&constraint("Room conflict")).is_ok());
}

#[test]
fn test_session_is_send() {
    fn assert_send<T: Send>() {}
    assert_send::<ScoreSession<HardSoftScore>>();
    assert_send::<Pair>();
}
