// src/engine/grading.rs

use super::error::GradeError;
use crate::models::{attempt::QuestionReview, quiz::Quiz};

/// Outcome of grading one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grade {
    pub correct_count: usize,
    pub total_questions: usize,
    /// Percentage, rounded half up.
    pub score: u32,
    pub review: Vec<QuestionReview>,
}

/// Grades `answers` (one option index per question, in quiz order) against the quiz key.
/// Every question must be answered.
pub fn grade(quiz: &Quiz, answers: &[usize]) -> Result<Grade, GradeError> {
    let total = quiz.questions.len();
    if total == 0 {
        return Err(GradeError::EmptyQuiz);
    }
    if answers.len() != total {
        return Err(GradeError::AnswerCountMismatch {
            expected: total,
            got: answers.len(),
        });
    }

    let mut review = Vec::with_capacity(total);
    let mut correct_count = 0;

    for (index, (question, &selected)) in quiz.questions.iter().zip(answers).enumerate() {
        let selected_option = question
            .options
            .get(selected)
            .ok_or(GradeError::InvalidOption {
                question: index,
                option: selected,
            })?;

        let is_correct = selected == question.correct_answer;
        if is_correct {
            correct_count += 1;
        }

        review.push(QuestionReview {
            question_id: question.id.clone(),
            text: question.text.clone(),
            selected_option: selected_option.clone(),
            correct_option: question
                .options
                .get(question.correct_answer)
                .cloned()
                .unwrap_or_default(),
            is_correct,
        });
    }

    let score = ((200 * correct_count + total) / (2 * total)) as u32;

    Ok(Grade {
        correct_count,
        total_questions: total,
        score,
        review,
    })
}
