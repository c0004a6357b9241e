// src/engine/planner.rs

use serde::Serialize;

use crate::models::{
    student::Student,
    topic::{Strength, TopicCatalog},
};

/// How many untried catalog topics are suggested at once.
pub const MAX_NEW_TOPICS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// One entry of a generated learning path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationStep {
    pub topic: String,
    pub action: String,
    pub priority: Priority,
    pub reason: String,
}

/// Derives study recommendations from a student's topic scores.
pub struct LearningPathPlanner;

impl LearningPathPlanner {
    /// Weak topics first, then average topics, both in the student's topic order,
    /// then up to [`MAX_NEW_TOPICS`] untried topics in catalog order.
    /// Strong topics never appear.
    pub fn plan(student: &Student, catalog: &TopicCatalog) -> Vec<RecommendationStep> {
        let weak = student.scores_with(Strength::Weak).map(|t| RecommendationStep {
            topic: t.topic.clone(),
            action: "Review and practice".to_string(),
            priority: Priority::High,
            reason: "score below 50%".to_string(),
        });

        let average = student
            .scores_with(Strength::Average)
            .map(|t| RecommendationStep {
                topic: t.topic.clone(),
                action: "Strengthen understanding".to_string(),
                priority: Priority::Medium,
                reason: format!("current score: {}%", t.average_score),
            });

        let untried = untried_topics(student, catalog)
            .take(MAX_NEW_TOPICS)
            .map(|topic| RecommendationStep {
                topic: topic.to_string(),
                action: "Start learning".to_string(),
                priority: Priority::Low,
                reason: "not yet attempted".to_string(),
            });

        weak.chain(average).chain(untried).collect()
    }
}

/// Catalog topics the student has no score for, in catalog order.
pub fn untried_topics<'a>(
    student: &'a Student,
    catalog: &'a TopicCatalog,
) -> impl Iterator<Item = &'a str> {
    catalog.iter().filter(|topic| !student.has_attempted(topic))
}

/// The learning-path view: recommended steps plus the counts shown beside them.
#[derive(Debug, Serialize)]
pub struct LearningPath {
    pub steps: Vec<RecommendationStep>,
    pub weak_count: usize,
    pub average_count: usize,
    pub untried_count: usize,

    /// True when there is nothing left to recommend.
    pub on_track: bool,
}

impl LearningPath {
    pub fn build(student: &Student, catalog: &TopicCatalog) -> Self {
        let steps = LearningPathPlanner::plan(student, catalog);
        let on_track = steps.is_empty();

        Self {
            weak_count: student.scores_with(Strength::Weak).count(),
            average_count: student.scores_with(Strength::Average).count(),
            untried_count: untried_topics(student, catalog).count(),
            steps,
            on_track,
        }
    }
}
