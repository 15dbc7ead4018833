//! Dashboard accounts.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{NewUser, User};
use crate::validation::validate_email;

/// Register an account and return its ID.
///
/// The email is stored trimmed. A second account with the same email fails
/// with [`DatabaseError::AlreadyExists`].
pub async fn create_user(pool: &SqlitePool, user: &NewUser) -> Result<i64> {
    validate_email(&user.email)?;
    let email = user.email.trim();

    let result = sqlx::query(
        r#"
        INSERT INTO users (email, password_hash)
        VALUES (?, ?)
        "#,
    )
    .bind(email)
    .bind(&user.password_hash)
    .execute(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "User",
                    id: email.to_string(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    let id = result.last_insert_rowid();
    tracing::info!(id, "Registered user");
    Ok(id)
}

/// Get a user by ID.
pub async fn get_user(pool: &SqlitePool, id: i64) -> Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, password_hash, created_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "User",
        id: id.to_string(),
    })
}

/// Get a user by email, as typed at login.
pub async fn get_user_by_email(pool: &SqlitePool, email: &str) -> Result<User> {
    let email = email.trim();

    sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, password_hash, created_at
        FROM users
        WHERE email = ?
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "User",
        id: email.to_string(),
    })
}
