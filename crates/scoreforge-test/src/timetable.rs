//! School timetabling test fixtures.
//!
//! Lessons are assigned a timeslot and a room. Two lessons conflict when
//! they share a timeslot and either their room, their teacher or their
//! student group. The `*_conflicts` functions count conflicts from
//! scratch so incremental scoring can be checked against them.
//!
//! # Example
//!
//! ```
//! use scoreforge_test::timetable::Timetable;
//!
//! let timetable = Timetable::small();
//! assert_eq!(timetable.lessons.len(), 6);
//! assert_eq!(timetable.room_conflicts(), 1);
//! ```

/// A time slot lessons can be scheduled in.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Timeslot {
    pub id: usize,
    pub day: &'static str,
    pub start_hour: u8,
}

impl Timeslot {
    pub fn new(id: usize, day: &'static str, start_hour: u8) -> Self {
        Self {
            id,
            day,
            start_hour,
        }
    }
}

/// A room lessons can be held in.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Room {
    pub id: usize,
    pub name: &'static str,
}

impl Room {
    pub fn new(id: usize, name: &'static str) -> Self {
        Self { id, name }
    }
}

/// A lesson with an optional timeslot and room assignment.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Lesson {
    pub id: usize,
    pub subject: &'static str,
    pub teacher: &'static str,
    pub student_group: &'static str,
    pub timeslot: Option<usize>,
    pub room: Option<usize>,
}

impl Lesson {
    /// Creates a lesson with no timeslot or room assigned.
    pub fn unassigned(
        id: usize,
        subject: &'static str,
        teacher: &'static str,
        student_group: &'static str,
    ) -> Self {
        Self {
            id,
            subject,
            teacher,
            student_group,
            timeslot: None,
            room: None,
        }
    }

    /// Returns this lesson assigned to the given timeslot and room.
    pub fn assigned(mut self, timeslot: usize, room: usize) -> Self {
        self.timeslot = Some(timeslot);
        self.room = Some(room);
        self
    }

    /// Returns true if both planning variables are set.
    pub fn is_assigned(&self) -> bool {
        self.timeslot.is_some() && self.room.is_some()
    }
}

/// A timetabling problem with its facts and planning entities.
#[derive(Clone, Debug)]
pub struct Timetable {
    pub timeslots: Vec<Timeslot>,
    pub rooms: Vec<Room>,
    pub lessons: Vec<Lesson>,
}

impl Timetable {
    /// Two timeslots, two rooms and six lessons with exactly one room
    /// conflict, one teacher conflict and one unassigned lesson.
    pub fn small() -> Self {
        let timeslots = vec![Timeslot::new(0, "MONDAY", 8), Timeslot::new(1, "MONDAY", 9)];
        let rooms = vec![Room::new(0, "Room A"), Room::new(1, "Room B")];
        let lessons = vec![
            Lesson::unassigned(0, "Math", "A. Turing", "9th grade").assigned(0, 0),
            Lesson::unassigned(1, "Physics", "M. Curie", "10th grade").assigned(0, 0),
            Lesson::unassigned(2, "Chemistry", "M. Curie", "9th grade").assigned(1, 1),
            Lesson::unassigned(3, "Biology", "C. Darwin", "11th grade").assigned(1, 0),
            Lesson::unassigned(4, "History", "M. Curie", "12th grade").assigned(0, 1),
            Lesson::unassigned(5, "Geography", "C. Darwin", "12th grade"),
        ];
        Self {
            timeslots,
            rooms,
            lessons,
        }
    }

    /// Returns the number of uninitialized planning variables, negated.
    pub fn init_score(&self) -> i32 {
        let unassigned: usize = self
            .lessons
            .iter()
            .map(|l| usize::from(l.timeslot.is_none()) + usize::from(l.room.is_none()))
            .sum();
        -(unassigned as i32)
    }

    /// Counts lesson pairs sharing a timeslot and a room.
    pub fn room_conflicts(&self) -> usize {
        self.count_pairs(|a, b| a.room.is_some() && a.room == b.room)
    }

    /// Counts lesson pairs sharing a timeslot and a teacher.
    pub fn teacher_conflicts(&self) -> usize {
        self.count_pairs(|a, b| a.teacher == b.teacher)
    }

    /// Counts lesson pairs sharing a timeslot and a student group.
    pub fn student_group_conflicts(&self) -> usize {
        self.count_pairs(|a, b| a.student_group == b.student_group)
    }

    fn count_pairs(&self, conflict: impl Fn(&Lesson, &Lesson) -> bool) -> usize {
        let mut count = 0;
        for (i, a) in self.lessons.iter().enumerate() {
            for b in &self.lessons[i + 1..] {
                if a.timeslot.is_some() && a.timeslot == b.timeslot && conflict(a, b) {
                    count += 1;
                }
            }
        }
        count
    }
}
