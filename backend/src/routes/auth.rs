//! Account routes: registration, login and the password strength probe.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use repurpose_common::{
    AuthResponse, CheckPasswordRequest, LoginRequest, PasswordStrengthReport, RegisterRequest,
};

use crate::auth::strength;
use crate::error::{ApiError, Result};
use crate::extract::ValidJson;
use crate::validation;
use crate::AppState;

/// Returned for both unknown emails and wrong passwords.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// POST /register - create an account and return a session token
async fn register(
    State(state): State<Arc<AppState>>,
    ValidJson(request): ValidJson<RegisterRequest>,
) -> Result<Json<AuthResponse>> {
    let email = validation::normalize_email(&request.email);
    validation::validate_email(&email)?;
    validation::validate_password_length(&request.password)?;

    let report = strength::evaluate(&request.password);
    if report.is_weak() {
        return Err(ApiError::validation(
            "Password is too weak: use upper and lower case letters, digits and symbols",
        ));
    }

    // Skip the hashing cost for the common duplicate case. Concurrent
    // registrations still race to the unique index below.
    if state.store.find_user_by_email(&email)?.is_some() {
        return Err(ApiError::Conflict("Email already registered".to_string()));
    }

    let password_hash = state.hasher.hash_blocking(request.password).await?;
    let user_id = state.store.create_user(&email, &password_hash)?;
    let token = state.tokens.issue(user_id, &email)?;

    tracing::info!(user_id, "Registered {}", email);

    Ok(Json(AuthResponse { token, email }))
}

/// POST /login - exchange credentials for a session token
async fn login(
    State(state): State<Arc<AppState>>,
    ValidJson(request): ValidJson<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let email = validation::normalize_email(&request.email);

    // Unknown emails still pay for a full hash check.
    let user = state.store.find_user_by_email(&email)?;
    let stored_hash = user.as_ref().map(|user| user.password_hash.clone());
    let valid = state
        .hasher
        .verify_or_dummy_blocking(request.password, stored_hash)
        .await;

    let user = match user {
        Some(user) if valid => user,
        Some(user) => {
            tracing::warn!(user_id = user.id, "Login failed: wrong password");
            return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }
        None => {
            tracing::warn!("Login failed for unknown email");
            return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }
    };

    let token = state.tokens.issue(user.id, &user.email)?;

    Ok(Json(AuthResponse {
        token,
        email: user.email,
    }))
}

/// POST /check-password - score a candidate password without storing it
async fn check_password(
    ValidJson(request): ValidJson<CheckPasswordRequest>,
) -> Json<PasswordStrengthReport> {
    Json(strength::evaluate(&request.password))
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/check-password", post(check_password))
        .with_state(state)
}
