// src/handlers/chat.rs

use std::sync::Arc;

use axum::{Extension, Json, extract::State, response::IntoResponse};

use crate::{
    chatbot::{self, ChatRequest, ChatResponse},
    error::AppError,
    handlers::student::load_student,
    store::Store,
    utils::jwt::Claims,
};

/// Answers in the requested language, or the student's preferred one.
pub async fn chat(
    State(store): State<Arc<dyn Store>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<ChatRequest>,
) -> Result<impl IntoResponse, AppError> {
    if req.message.trim().is_empty() {
        return Err(AppError::BadRequest("Message cannot be empty".to_string()));
    }

    let language = match req.language {
        Some(language) => language,
        None => load_student(store.as_ref(), &claims.sub).await?.preferred_language,
    };

    let (reply, matched) = chatbot::reply(&req.message, language);
    tracing::debug!(student = %claims.sub, matched, "Chat reply");

    Ok(Json(ChatResponse {
        reply: reply.to_string(),
        language,
        matched,
    }))
}
