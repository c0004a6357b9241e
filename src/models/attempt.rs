// src/models/attempt.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::topic::Strength;

/// One completed quiz. Created once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAttempt {
    pub id: String,
    pub quiz_id: String,
    pub student_id: String,
    pub topic: String,

    /// Percentage score. Signed so out-of-range input can be rejected rather than wrapped.
    pub score: i64,

    /// Selected option index per question, in quiz order.
    pub answers: Vec<usize>,

    pub completed_at: DateTime<Utc>,
}

impl QuizAttempt {
    pub fn new(
        quiz_id: &str,
        student_id: &str,
        topic: &str,
        score: i64,
        answers: Vec<usize>,
    ) -> Self {
        Self {
            id: format!("attempt-{}", uuid::Uuid::new_v4()),
            quiz_id: quiz_id.to_string(),
            student_id: student_id.to_string(),
            topic: topic.to_string(),
            score,
            answers,
            completed_at: Utc::now(),
        }
    }
}

/// DTO for submitting a quiz.
#[derive(Debug, Deserialize)]
pub struct SubmitQuizRequest {
    /// Selected option index for every question, in the order the quiz was served.
    pub answers: Vec<usize>,
}

/// Per-question feedback shown after submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionReview {
    pub question_id: String,
    pub text: String,
    pub selected_option: String,
    pub correct_option: String,
    pub is_correct: bool,
}

/// Response body for a graded quiz.
#[derive(Debug, Serialize)]
pub struct QuizResult {
    pub attempt_id: String,
    pub quiz_id: String,
    pub topic: String,
    pub score: u32,
    pub correct_count: usize,
    pub total_questions: usize,
    pub strength: Strength,
    pub review: Vec<QuestionReview>,

    /// The student's topic record after this attempt was folded in.
    pub topic_score: super::student::TopicScore,
}
