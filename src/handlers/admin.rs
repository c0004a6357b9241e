// src/handlers/admin.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde_json::json;
use validator::Validate;

use crate::{
    engine::analytics::{ClassAnalytics, StudentOverview},
    error::AppError,
    models::{
        question::{Question, QuestionListParams, QuestionRequest},
        quiz::Quiz,
        student::{StudentListParams, StudentProfile},
        topic::TopicCatalog,
    },
    store::Store,
    utils::{html::clean_html, jwt::Claims},
};

/// Lists students with their overall standing, optionally filtered by name or email.
/// Admin only.
pub async fn list_students(
    State(store): State<Arc<dyn Store>>,
    Query(params): Query<StudentListParams>,
) -> Result<impl IntoResponse, AppError> {
    let term = params.q.unwrap_or_default();
    let students: Vec<StudentOverview> = store
        .list_students()
        .await?
        .iter()
        .filter(|s| StudentOverview::matches(s, &term))
        .map(StudentOverview::for_student)
        .collect();

    Ok(Json(students))
}

/// Student detail: profile, overview figures and every topic score.
/// Admin only.
pub async fn get_student(
    State(store): State<Arc<dyn Store>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let student = store
        .get_student(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;

    Ok(Json(json!({
        "profile": StudentProfile::from(&student),
        "overview": StudentOverview::for_student(&student),
        "topic_scores": student.topic_scores,
    })))
}

/// Lists the question bank (answer keys included), filtered by text and topic.
/// Admin only.
pub async fn list_questions(
    State(store): State<Arc<dyn Store>>,
    Query(params): Query<QuestionListParams>,
) -> Result<impl IntoResponse, AppError> {
    let search = params.q.unwrap_or_default().to_lowercase();
    let questions: Vec<Question> = store
        .list_questions()
        .await?
        .into_iter()
        .filter(|q| search.is_empty() || q.text.to_lowercase().contains(&search))
        .filter(|q| params.topic.as_deref().is_none_or(|t| t == "all" || q.topic == t))
        .collect();

    Ok(Json(questions))
}

/// Validated and sanitized question fields.
struct QuestionFields {
    text: String,
    options: Vec<String>,
}

fn check_question(
    payload: &QuestionRequest,
    catalog: &TopicCatalog,
) -> Result<QuestionFields, AppError> {
    payload.validate()?;

    if !payload.answer_in_range() {
        return Err(AppError::BadRequest(format!(
            "correct_answer {} does not match any of the {} options",
            payload.correct_answer,
            payload.options.len()
        )));
    }
    if !catalog.contains(&payload.topic) {
        return Err(AppError::BadRequest(format!("Unknown topic '{}'", payload.topic)));
    }

    let text = clean_html(&payload.text);
    let options: Vec<String> = payload.options.iter().map(|o| clean_html(o)).collect();
    if text.trim().is_empty() || options.iter().any(|o| o.trim().is_empty()) {
        return Err(AppError::BadRequest(
            "Question text and options must contain visible text".to_string(),
        ));
    }

    Ok(QuestionFields { text, options })
}

/// Adds a question to the bank. Admin only.
pub async fn create_question(
    State(store): State<Arc<dyn Store>>,
    State(catalog): State<Arc<TopicCatalog>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<QuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let fields = check_question(&payload, &catalog)?;

    let question = Question {
        id: format!("q-{}", uuid::Uuid::new_v4()),
        text: fields.text,
        options: fields.options,
        correct_answer: payload.correct_answer,
        topic: payload.topic,
        difficulty: payload.difficulty,
        created_by: claims.sub,
        created_at: Utc::now(),
    };

    store.save_question(&question).await.map_err(|e| {
        tracing::error!("Failed to create question: {:?}", e);
        AppError::from(e)
    })?;
    tracing::info!(question = %question.id, topic = %question.topic, "Question created");

    Ok((StatusCode::CREATED, Json(question)))
}

/// Replaces a question's content, keeping its id, author and position. Admin only.
pub async fn update_question(
    State(store): State<Arc<dyn Store>>,
    State(catalog): State<Arc<TopicCatalog>>,
    Path(id): Path<String>,
    Json(payload): Json<QuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let existing = store
        .get_question(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Question not found".to_string()))?;

    let fields = check_question(&payload, &catalog)?;

    let question = Question {
        text: fields.text,
        options: fields.options,
        correct_answer: payload.correct_answer,
        topic: payload.topic,
        difficulty: payload.difficulty,
        ..existing
    };

    store.save_question(&question).await?;
    tracing::info!(question = %question.id, "Question updated");

    Ok(Json(question))
}

/// Deletes a question. Admin only.
pub async fn delete_question(
    State(store): State<Arc<dyn Store>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !store.delete_question(&id).await? {
        return Err(AppError::NotFound("Question not found".to_string()));
    }

    tracing::info!(question = %id, "Question deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Class-wide analytics. Admin only.
pub async fn get_analytics(
    State(store): State<Arc<dyn Store>>,
    State(catalog): State<Arc<TopicCatalog>>,
) -> Result<impl IntoResponse, AppError> {
    let students = store.list_students().await?;
    let questions = store.list_questions().await?;
    let quiz_count = Quiz::from_bank(&questions).len();

    Ok(Json(ClassAnalytics::compute(
        &students, &questions, quiz_count, &catalog,
    )))
}
