//! Authentication service: staff registration, login sessions, logout

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use rand::RngCore;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::user::{RegisterRequest, User},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
}

impl AuthService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a new staff account
    pub async fn register(&self, request: RegisterRequest) -> AppResult<User> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if self
            .repository
            .users
            .get_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateUsername);
        }

        let hashed = hash_password(&request.password)?;
        self.repository
            .users
            .create(&request.username, &hashed, Utc::now())
            .await
    }

    /// Authenticate and open a session; returns the session token and user.
    ///
    /// Unknown username and wrong password are indistinguishable to the
    /// caller.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<(String, User)> {
        let user = self
            .repository
            .users
            .get_by_username(username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(&user.password, password)? {
            return Err(AppError::InvalidCredentials);
        }

        let token = generate_token();
        self.repository
            .sessions
            .create(user.id, &token, Utc::now())
            .await?;

        Ok((token, user))
    }

    /// Close a session; the token is unusable afterwards
    pub async fn logout(&self, token: &str) -> AppResult<()> {
        self.repository.sessions.delete(token).await
    }

    /// Resolve a session token to its staff account
    pub async fn session_user(&self, token: &str) -> AppResult<Option<User>> {
        self.repository.sessions.find_user(token).await
    }
}

/// Hash a password with argon2 and a fresh random salt
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a clear-text password against a stored argon2 hash
pub fn verify_password(stored_hash: &str, password: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| AppError::Internal(format!("Stored password hash is invalid: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// 32 random bytes, hex-encoded: the opaque Bearer session token
fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
