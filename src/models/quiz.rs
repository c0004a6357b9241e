// src/models/quiz.rs

use serde::Serialize;

use super::question::{Difficulty, PublicQuestion, Question};

/// A quiz is every bank question of one topic, in bank order.
#[derive(Debug, Clone)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub topic: String,
    pub difficulty: Difficulty,
    pub questions: Vec<Question>,
}

impl Quiz {
    pub fn id_for(topic: &str) -> String {
        format!("quiz-{}", topic)
    }

    /// Groups the question bank into quizzes, ordered by each topic's first question.
    pub fn from_bank(bank: &[Question]) -> Vec<Quiz> {
        let mut quizzes: Vec<Quiz> = Vec::new();

        for question in bank {
            match quizzes.iter_mut().find(|q| q.topic == question.topic) {
                Some(quiz) => {
                    quiz.difficulty = quiz.difficulty.max(question.difficulty);
                    quiz.questions.push(question.clone());
                }
                None => quizzes.push(Quiz {
                    id: Quiz::id_for(&question.topic),
                    title: format!("{} Quiz", question.topic),
                    topic: question.topic.clone(),
                    difficulty: question.difficulty,
                    questions: vec![question.clone()],
                }),
            }
        }

        quizzes
    }

    pub fn find(bank: &[Question], quiz_id: &str) -> Option<Quiz> {
        Quiz::from_bank(bank).into_iter().find(|q| q.id == quiz_id)
    }
}

/// DTO for sending a quiz to students (answer keys stripped).
#[derive(Debug, Serialize)]
pub struct PublicQuiz {
    pub id: String,
    pub title: String,
    pub topic: String,
    pub difficulty: Difficulty,
    pub question_count: usize,
    pub questions: Vec<PublicQuestion>,
}

impl From<&Quiz> for PublicQuiz {
    fn from(quiz: &Quiz) -> Self {
        Self {
            id: quiz.id.clone(),
            title: quiz.title.clone(),
            topic: quiz.topic.clone(),
            difficulty: quiz.difficulty,
            question_count: quiz.questions.len(),
            questions: quiz.questions.iter().map(PublicQuestion::from).collect(),
        }
    }
}
