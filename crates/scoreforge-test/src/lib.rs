//! Shared test fixtures for ScoreForge crates.
//!
//! This crate provides data types, assertion helpers and pure functions for testing.
//! It does NOT depend on any other ScoreForge crate so every crate can
//! use it as a dev-dependency without cycles.
//!
//! - [`assertions`] - ordering and equality contract checks
//! - [`timetable`] - School timetabling facts and from-scratch conflict counts
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! scoreforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use scoreforge_test::timetable::{Lesson, Timetable};
//! use scoreforge_test::assert_compare_order;
//! ```

pub mod assertions;
pub mod timetable;

// Re-export commonly used items at crate root for convenience
pub use assertions::{assert_compare_order, assert_objects_equal, assert_objects_not_equal};
pub use timetable::{Lesson, Room, Timeslot, Timetable};
