// src/engine/aggregator.rs

use chrono::{DateTime, Utc};

use super::error::ScoreError;
use crate::models::{
    attempt::QuizAttempt,
    student::{Student, TopicScore},
    topic::{Strength, TopicCatalog},
};

/// Canonical strength table: below 50 is weak, 50 through 70 is average, above 70 is strong.
pub fn classify(score: u32) -> Strength {
    match score {
        0..=49 => Strength::Weak,
        50..=70 => Strength::Average,
        _ => Strength::Strong,
    }
}

/// Mean of `sum / count` rounded to the nearest integer, halves rounding up.
fn rounded_mean(sum: u64, count: u64) -> u32 {
    ((2 * sum + count) / (2 * count)) as u32
}

/// Folds quiz attempts into a student's per-topic running averages.
pub struct ScoreAggregator<'a> {
    catalog: &'a TopicCatalog,
}

impl<'a> ScoreAggregator<'a> {
    pub fn new(catalog: &'a TopicCatalog) -> Self {
        Self { catalog }
    }

    /// Checks an attempt against the student and catalog, returning the score as a percentage.
    pub fn validate(&self, student: &Student, attempt: &QuizAttempt) -> Result<u32, ScoreError> {
        if attempt.student_id != student.id {
            return Err(ScoreError::StudentMismatch {
                attempt: attempt.student_id.clone(),
                student: student.id.clone(),
            });
        }
        if !(0..=100).contains(&attempt.score) {
            return Err(ScoreError::ScoreOutOfRange(attempt.score));
        }
        if !self.catalog.contains(&attempt.topic) {
            return Err(ScoreError::UnknownTopic(attempt.topic.clone()));
        }
        Ok(attempt.score as u32)
    }

    /// Records one attempt and returns the updated topic record.
    ///
    /// The first attempt in a topic appends a new record; later attempts update the
    /// existing record in place so the collection keeps its insertion order.
    pub fn record_attempt<'s>(
        &self,
        student: &'s mut Student,
        attempt: &QuizAttempt,
    ) -> Result<&'s TopicScore, ScoreError> {
        let score = self.validate(student, attempt)?;

        let index = match student
            .topic_scores
            .iter()
            .position(|t| t.topic == attempt.topic)
        {
            Some(index) => {
                fold_into(&mut student.topic_scores[index], score, attempt.completed_at);
                index
            }
            None => {
                student.topic_scores.push(TopicScore {
                    topic: attempt.topic.clone(),
                    total_attempts: 1,
                    average_score: score,
                    strength: classify(score),
                    last_attempt: attempt.completed_at,
                });
                student.topic_scores.len() - 1
            }
        };

        let updated = &student.topic_scores[index];
        tracing::debug!(
            student = %student.id,
            topic = %updated.topic,
            attempts = updated.total_attempts,
            average = updated.average_score,
            "Topic score updated"
        );
        Ok(updated)
    }
}

fn fold_into(record: &mut TopicScore, score: u32, at: DateTime<Utc>) {
    let count = u64::from(record.total_attempts);
    let sum = u64::from(record.average_score) * count + u64::from(score);

    record.total_attempts += 1;
    record.average_score = rounded_mean(sum, count + 1);
    record.strength = classify(record.average_score);
    record.last_attempt = at;
}
