// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{admin, auth, chat, quiz, student},
    state::AppState,
    utils::jwt::{admin_middleware, auth_middleware, student_middleware},
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, topics, quizzes, student, chat, admin).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (store, config, catalog).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        HeaderValue::from_static("http://localhost:5173"),
        HeaderValue::from_static("http://127.0.0.1:5173"),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let auth_routes = Router::new().route("/login", post(auth::login));

    let quiz_routes = Router::new()
        .route("/", get(quiz::list_quizzes))
        .route("/{id}", get(quiz::get_quiz))
        .route("/{id}/submit", post(quiz::submit_quiz));

    let student_routes = Router::new()
        .route("/me", get(student::get_me))
        .route("/language", put(student::update_language))
        .route("/topic-scores", get(student::get_topic_scores))
        .route("/progress", get(student::get_progress))
        .route("/learning-path", get(student::get_learning_path))
        .route("/attempts", get(student::list_attempts));

    let chat_routes = Router::new().route("/", post(chat::chat));

    // Student-only areas: auth first, then role check
    let student_area = Router::new()
        .nest("/api/quizzes", quiz_routes)
        .nest("/api/student", student_routes)
        .nest("/api/chat", chat_routes)
        .layer(middleware::from_fn(student_middleware))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let admin_routes = Router::new()
        .route("/students", get(admin::list_students))
        .route("/students/{id}", get(admin::get_student))
        .route(
            "/questions",
            get(admin::list_questions).post(admin::create_question),
        )
        .route(
            "/questions/{id}",
            put(admin::update_question).delete(admin::delete_question),
        )
        .route("/analytics", get(admin::get_analytics))
        // Double middleware protection: Auth first, then Admin check
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .nest("/api/auth", auth_routes)
        .route("/api/topics", get(quiz::list_topics))
        .nest("/api/admin", admin_routes)
        .merge(student_area)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
