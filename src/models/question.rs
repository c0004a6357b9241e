// src/models/question.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Question difficulty. Ordered so the hardest question decides a quiz's level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A multiple choice question in the bank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,

    /// The text shown to the student.
    pub text: String,

    /// Answer options in display order.
    pub options: Vec<String>,

    /// Index into `options` of the correct answer.
    pub correct_answer: usize,

    pub topic: String,
    pub difficulty: Difficulty,

    /// Id of the admin who authored the question.
    pub created_by: String,

    pub created_at: DateTime<Utc>,
}

/// DTO for sending a question to students (excludes the answer key).
#[derive(Debug, Serialize)]
pub struct PublicQuestion {
    pub id: String,
    pub text: String,
    pub options: Vec<String>,
    pub topic: String,
    pub difficulty: Difficulty,
}

impl From<&Question> for PublicQuestion {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id.clone(),
            text: q.text.clone(),
            options: q.options.clone(),
            topic: q.topic.clone(),
            difficulty: q.difficulty,
        }
    }
}

/// DTO for creating or replacing a question.
#[derive(Debug, Deserialize, Validate)]
pub struct QuestionRequest {
    #[validate(length(min = 1, max = 1000))]
    pub text: String,
    #[validate(length(min = 1, max = 100))]
    pub topic: String,
    #[validate(custom(function = validate_options))]
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub difficulty: Difficulty,
}

impl QuestionRequest {
    /// The answer index must point at one of the options.
    pub fn answer_in_range(&self) -> bool {
        self.correct_answer < self.options.len()
    }
}

fn validate_options(options: &[String]) -> Result<(), validator::ValidationError> {
    if options.len() < 2 || options.len() > 6 {
        return Err(validator::ValidationError::new("options_count_out_of_range"));
    }
    for opt in options {
        if opt.trim().is_empty() {
            return Err(validator::ValidationError::new("option_cannot_be_blank"));
        }
        if opt.len() > 500 {
            return Err(validator::ValidationError::new("option_too_long"));
        }
    }
    Ok(())
}

/// Query parameters for the admin question list.
#[derive(Debug, Deserialize)]
pub struct QuestionListParams {
    /// Case-insensitive substring of the question text.
    pub q: Option<String>,
    pub topic: Option<String>,
}
