//! API handlers for Atheneum REST endpoints

pub mod auth;
pub mod books;
pub mod health;
pub mod openapi;
pub mod readers;
pub mod rentals;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{error::AppError, models::user::CurrentUser, AppState};

/// Extractor for the authenticated staff member behind a Bearer session
/// token. Handlers receive the caller as explicit per-request context; there
/// is no ambient current-user state.
pub struct AuthenticatedUser(pub CurrentUser);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Authentication("Invalid authorization header format".to_string()))?;

        let user = state
            .services
            .auth
            .session_user(token)
            .await?
            .ok_or_else(|| AppError::Authentication("Session expired or revoked".to_string()))?;

        Ok(AuthenticatedUser(CurrentUser {
            user_id: user.id,
            username: user.username,
            token: token.to_string(),
        }))
    }
}
