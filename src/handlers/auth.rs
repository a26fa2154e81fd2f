use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::{info, warn};

use crate::{
    auth::{AuthUser, jwt, password},
    error::{AppError, AppResult},
    extract::ValidatedJson,
    models::{LoginRequest, LoginResponse, ROLE_USER, RegisterRequest, User},
    repositories::{self, user as repo},
    state::AppState,
};

/// Register a regular user account.
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    let email = req.email.trim().to_lowercase();
    if repo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Conflict("Email is already registered".into()));
    }

    let password_hash = hash(req.password).await?;
    let user = repo::insert(&state.pool, &email, &password_hash, ROLE_USER).await?;

    info!(id = user.id, "User registered");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Exchange email and password for a bearer token.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let invalid = || AppError::Unauthorized("Invalid email or password".into());

    let user = repo::find_by_email(&state.pool, req.email.trim())
        .await?
        .ok_or_else(invalid)?;

    if !verify(req.password, user.password_hash.clone()).await? {
        return Err(invalid());
    }

    let token = jwt::generate_token(user.id, &user.email, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalServerError(format!("Failed to issue token: {}", e)))?;

    info!(id = user.id, "User logged in");
    Ok(Json(LoginResponse { token, user }))
}

pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> AppResult<Json<User>> {
    info!(caller = auth.user_id, id, "Fetching user");
    Ok(Json(repositories::find_by_id(&state.pool, id).await?))
}

/// Argon2 is CPU heavy, so hashing runs off the async executor.
pub async fn hash(plain: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || password::hash_password(&plain))
        .await
        .map_err(|e| AppError::InternalServerError(format!("Hashing task failed: {}", e)))?
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
}

/// Blocking-pool counterpart of [`hash`]. An unreadable stored hash counts as a mismatch.
pub(crate) async fn verify(plain: String, password_hash: String) -> AppResult<bool> {
    let verified = tokio::task::spawn_blocking(move || password::verify_password(&plain, &password_hash))
        .await
        .map_err(|e| AppError::InternalServerError(format!("Verification task failed: {}", e)))?;

    Ok(verified.unwrap_or_else(|e| {
        warn!(error = %e, "Stored password hash is unreadable");
        false
    }))
}
