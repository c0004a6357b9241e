// src/engine/mod.rs

//! Topic mastery scoring and learning-path planning.
//!
//! Everything here is synchronous and works on already loaded data; the
//! handlers load students from the store, call in, and persist the result.

pub mod aggregator;
pub mod analytics;
pub mod error;
pub mod grading;
pub mod planner;

pub use aggregator::{ScoreAggregator, classify};
pub use error::{GradeError, ScoreError};
pub use planner::{LearningPath, LearningPathPlanner, Priority, RecommendationStep};
