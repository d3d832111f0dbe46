//! Authentication endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::user::{LoginRequest, RegisterRequest, User},
};

use super::AuthenticatedUser;

/// Login response carrying the session token
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    /// Opaque session token
    pub token: String,
    /// Always "Bearer"
    pub token_type: String,
    pub user_id: i64,
    pub username: String,
}

/// Register a new staff account
#[utoipa::path(
    post,
    path = "/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = User),
        (status = 400, description = "Invalid username or password"),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    Json(request): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = state.services.auth.register(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Log in and open a session
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session opened", body = LoginResponse),
        (status = 401, description = "Invalid username or password")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (token, user) = state
        .services
        .auth
        .login(&request.username, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        user_id: user.id,
        username: user.username,
    }))
}

/// Log out: revoke the presented session token
#[utoipa::path(
    get,
    path = "/logout",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Session closed"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn logout(
    State(state): State<crate::AppState>,
    AuthenticatedUser(current): AuthenticatedUser,
) -> AppResult<StatusCode> {
    state.services.auth.logout(&current.token).await?;
    Ok(StatusCode::NO_CONTENT)
}
