// src/handlers/quiz.rs

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{
    engine::{ScoreAggregator, classify, grading::grade},
    error::AppError,
    handlers::student::load_student,
    models::{
        attempt::{QuizAttempt, QuizResult, SubmitQuizRequest},
        quiz::{PublicQuiz, Quiz},
        topic::TopicCatalog,
    },
    state::AppState,
    store::Store,
    utils::jwt::Claims,
};

/// Returns the topic catalog in display order.
pub async fn list_topics(State(catalog): State<Arc<TopicCatalog>>) -> impl IntoResponse {
    Json(catalog.as_ref().clone())
}

/// Lists one quiz per topic in the question bank, without answer keys.
pub async fn list_quizzes(
    State(store): State<Arc<dyn Store>>,
) -> Result<impl IntoResponse, AppError> {
    let bank = store.list_questions().await?;
    let quizzes: Vec<PublicQuiz> = Quiz::from_bank(&bank)
        .iter()
        .map(PublicQuiz::from)
        .collect();
    Ok(Json(quizzes))
}

pub async fn get_quiz(
    State(store): State<Arc<dyn Store>>,
    Path(quiz_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let bank = store.list_questions().await?;
    let quiz = Quiz::find(&bank, &quiz_id)
        .ok_or_else(|| AppError::NotFound(format!("Quiz '{}' not found", quiz_id)))?;
    Ok(Json(PublicQuiz::from(&quiz)))
}

/// Grades a submission and folds it into the student's topic scores.
///
/// * Every question must be answered, in the order the quiz was served.
/// * The student record is loaded, updated and saved under `score_lock`.
/// * The updated scores and the attempt log entry are written together.
pub async fn submit_quiz(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(quiz_id): Path<String>,
    Json(req): Json<SubmitQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    let bank = state.store.list_questions().await?;
    let quiz = Quiz::find(&bank, &quiz_id)
        .ok_or_else(|| AppError::NotFound(format!("Quiz '{}' not found", quiz_id)))?;

    let graded = grade(&quiz, &req.answers)?;

    let _guard = state.score_lock.lock().await;

    let mut student = load_student(state.store.as_ref(), &claims.sub).await?;
    let attempt = QuizAttempt::new(
        &quiz.id,
        &student.id,
        &quiz.topic,
        i64::from(graded.score),
        req.answers,
    );

    let topic_score = ScoreAggregator::new(&state.catalog)
        .record_attempt(&mut student, &attempt)?
        .clone();

    state
        .store
        .save_submission(&student, &attempt)
        .await
        .map_err(|e| {
            tracing::error!("Failed to save quiz submission: {:?}", e);
            AppError::from(e)
        })?;

    tracing::info!(
        student = %student.id,
        quiz = %quiz.id,
        score = graded.score,
        average = topic_score.average_score,
        "Quiz submitted"
    );

    Ok(Json(QuizResult {
        attempt_id: attempt.id,
        quiz_id: quiz.id,
        topic: quiz.topic,
        score: graded.score,
        correct_count: graded.correct_count,
        total_questions: graded.total_questions,
        strength: classify(graded.score),
        review: graded.review,
        topic_score,
    }))
}
