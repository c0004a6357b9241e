// src/handlers/student.rs

use std::sync::Arc;

use axum::{Extension, Json, extract::State, response::IntoResponse};
use serde_json::json;

use crate::{
    engine::{
        LearningPath,
        analytics::{DashboardSummary, ProgressReport},
    },
    error::AppError,
    models::{
        student::{Student, StudentProfile, UpdateLanguageRequest},
        topic::TopicCatalog,
    },
    state::AppState,
    store::Store,
    utils::jwt::Claims,
};

/// Loads the student named by the token. A token for a deleted student is a 404.
pub async fn load_student(store: &dyn Store, student_id: &str) -> Result<Student, AppError> {
    store
        .get_student(student_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found".to_string()))
}

/// Profile plus the dashboard headline numbers.
pub async fn get_me(
    State(store): State<Arc<dyn Store>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let student = load_student(store.as_ref(), &claims.sub).await?;

    Ok(Json(json!({
        "profile": StudentProfile::from(&student),
        "summary": DashboardSummary::for_student(&student),
    })))
}

pub async fn update_language(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdateLanguageRequest>,
) -> Result<impl IntoResponse, AppError> {
    // Shares the lock with quiz submission so a concurrent attempt is not lost.
    let _guard = state.score_lock.lock().await;

    let mut student = load_student(state.store.as_ref(), &claims.sub).await?;
    student.preferred_language = req.language;
    state.store.save_student(&student).await?;

    tracing::info!(
        student = %student.id,
        language = req.language.display_name(),
        "Preferred language updated"
    );
    Ok(Json(StudentProfile::from(&student)))
}

pub async fn get_topic_scores(
    State(store): State<Arc<dyn Store>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let student = load_student(store.as_ref(), &claims.sub).await?;
    Ok(Json(student.topic_scores))
}

pub async fn get_progress(
    State(store): State<Arc<dyn Store>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let student = load_student(store.as_ref(), &claims.sub).await?;
    Ok(Json(ProgressReport::for_student(&student)))
}

pub async fn get_learning_path(
    State(store): State<Arc<dyn Store>>,
    State(catalog): State<Arc<TopicCatalog>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let student = load_student(store.as_ref(), &claims.sub).await?;
    Ok(Json(LearningPath::build(&student, &catalog)))
}

/// The student's attempt log, newest first.
pub async fn list_attempts(
    State(store): State<Arc<dyn Store>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let mut attempts = store.list_attempts(&claims.sub).await?;
    attempts.reverse();
    Ok(Json(attempts))
}
