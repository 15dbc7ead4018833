//! Account registration and login.

use axum::extract::State;
use axum::Json;
use database::{user, DatabaseError, NewUser};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct Registered {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct LoginToken {
    pub token: String,
}

/// Create an account. Invalid and already-registered emails are both `400`.
pub async fn register(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<Registered>> {
    if database::validation::validate_email(&credentials.email).is_err() {
        return Err(ApiError::BadRequest("Invalid email format".to_string()));
    }
    if credentials.password.is_empty() {
        return Err(ApiError::BadRequest("Password cannot be empty".to_string()));
    }

    let password_hash = state.auth.hash_password(credentials.password).await?;
    let new_user = NewUser {
        email: credentials.email,
        password_hash,
    };

    match user::create_user(state.db.pool(), &new_user).await {
        Ok(_) => Ok(Json(Registered {
            message: "User registered!".to_string(),
        })),
        Err(DatabaseError::AlreadyExists { .. }) => {
            Err(ApiError::BadRequest("Email already exists".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Exchange email and password for a one-hour token.
///
/// Unknown emails and wrong passwords get the same answer.
pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<LoginToken>> {
    let invalid = || ApiError::BadRequest("Invalid credentials".to_string());

    let account = match user::get_user_by_email(state.db.pool(), &credentials.email).await {
        Ok(account) => account,
        Err(e) if e.is_not_found() => return Err(invalid()),
        Err(e) => return Err(e.into()),
    };

    let valid = state
        .auth
        .verify_password(credentials.password, account.password_hash)
        .await?;
    if !valid {
        tracing::debug!(id = account.id, "Rejected login");
        return Err(invalid());
    }

    let token = state.auth.issue_token(account.id)?;
    Ok(Json(LoginToken { token }))
}
