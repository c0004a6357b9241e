// src/engine/error.rs

/// Reasons an attempt is refused by the score aggregator.
/// A refused attempt leaves the student untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoreError {
    #[error("score {0} is outside the range 0-100")]
    ScoreOutOfRange(i64),

    #[error("unknown topic '{0}'")]
    UnknownTopic(String),

    #[error("attempt belongs to student '{attempt}', not '{student}'")]
    StudentMismatch { attempt: String, student: String },
}

/// Reasons a quiz submission cannot be graded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GradeError {
    #[error("quiz has no questions")]
    EmptyQuiz,

    #[error("expected {expected} answers, got {got}")]
    AnswerCountMismatch { expected: usize, got: usize },

    #[error("question {question} has no option {option}")]
    InvalidOption { question: usize, option: usize },
}
