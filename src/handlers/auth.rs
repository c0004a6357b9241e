// src/handlers/auth.rs

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::{
        student::{Student, StudentProfile},
        user::{AdminProfile, LoginRequest, Role},
    },
    store::Store,
    utils::{
        hash::{hash_password, verify_password},
        jwt::sign_jwt,
    },
};

fn invalid_credentials() -> AppError {
    AppError::AuthError("Invalid email or password".to_string())
}

/// Authenticates an admin or student and returns a JWT token.
///
/// A student login with an unknown email and the shared student password
/// registers a new student named after the email's local part.
pub async fn login(
    State(store): State<Arc<dyn Store>>,
    State(config): State<Config>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    match payload.role {
        Role::Admin => {
            let admin = store
                .find_admin_by_email(&payload.email)
                .await?
                .ok_or_else(invalid_credentials)?;

            if !verify_password(&payload.password, &admin.password_hash)? {
                return Err(invalid_credentials());
            }

            let token = sign_jwt(
                &admin.id,
                Role::Admin,
                &config.jwt_secret,
                config.jwt_expiration,
            )?;
            tracing::info!(admin = %admin.id, "Admin logged in");

            Ok(Json(json!({
                "token": token,
                "type": "Bearer",
                "role": Role::Admin,
                "user": AdminProfile::from(&admin),
            })))
        }
        Role::Student => {
            let student = match store.find_student_by_email(&payload.email).await? {
                Some(student) => student,
                None => {
                    if payload.password != config.student_password {
                        return Err(invalid_credentials());
                    }
                    register_student(store.as_ref(), &payload.email, &payload.password).await?
                }
            };

            // Also covers a concurrent login that registered the email first
            if !verify_password(&payload.password, &student.password_hash)? {
                return Err(invalid_credentials());
            }

            let token = sign_jwt(
                &student.id,
                Role::Student,
                &config.jwt_secret,
                config.jwt_expiration,
            )?;
            tracing::info!(student = %student.id, "Student logged in");

            Ok(Json(json!({
                "token": token,
                "type": "Bearer",
                "role": Role::Student,
                "user": StudentProfile::from(&student),
            })))
        }
    }
}

async fn register_student(
    store: &dyn Store,
    email: &str,
    password: &str,
) -> Result<Student, AppError> {
    let name = email.split('@').next().unwrap_or(email);
    let candidate = Student::new(email, name, hash_password(password)?);

    let student = store.register_student(&candidate).await.map_err(|e| {
        tracing::error!("Failed to register student: {:?}", e);
        AppError::from(e)
    })?;

    if student.id == candidate.id {
        tracing::info!(student = %student.id, email = %student.email, "Registered new student");
    }
    Ok(student)
}
