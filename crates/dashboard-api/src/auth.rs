//! Password hashing and login tokens.

use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};

/// bcrypt work factor for stored passwords.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Login tokens expire after one hour.
pub const TOKEN_TTL_SECS: i64 = 3600;

/// Claims carried by a login token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID.
    pub id: i64,
    pub iat: i64,
    pub exp: i64,
}

/// Hashes passwords and signs HS256 login tokens.
#[derive(Clone)]
pub struct Auth {
    key: EncodingKey,
    bcrypt_cost: u32,
}

impl Auth {
    pub fn new(secret: &str) -> Self {
        Self {
            key: EncodingKey::from_secret(secret.as_bytes()),
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }

    /// Override the bcrypt cost (4 to 31).
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Hash a password on the blocking pool.
    pub async fn hash_password(&self, password: String) -> Result<String> {
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))?
            .map_err(|e| ApiError::Internal(e.to_string()))
    }

    /// Check a password against a stored hash on the blocking pool.
    pub async fn verify_password(&self, password: String, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))?
            .map_err(|e| ApiError::Internal(e.to_string()))
    }

    /// Sign a token for `user_id`, valid for [`TOKEN_TTL_SECS`].
    pub fn issue_token(&self, user_id: i64) -> Result<String> {
        let iat = chrono::Utc::now().timestamp();
        let claims = Claims {
            id: user_id,
            iat,
            exp: iat + TOKEN_TTL_SECS,
        };

        encode(&Header::default(), &claims, &self.key)
            .map_err(|e| ApiError::Internal(e.to_string()))
    }
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Auth")
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, DecodingKey, Validation};

    #[tokio::test]
    async fn test_password_roundtrip() {
        let auth = Auth::new("test-secret").with_bcrypt_cost(4);
        let hash = auth.hash_password("hunter22".to_string()).await.unwrap();
        assert_ne!(hash, "hunter22");

        assert!(auth
            .verify_password("hunter22".to_string(), hash.clone())
            .await
            .unwrap());
        assert!(!auth
            .verify_password("hunter23".to_string(), hash)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_corrupt_hash_is_internal_error() {
        let auth = Auth::new("test-secret");
        let result = auth
            .verify_password("x".to_string(), "not-a-hash".to_string())
            .await;
        assert!(matches!(result, Err(ApiError::Internal(_))));
    }

    #[test]
    fn test_token_claims() {
        let auth = Auth::new("test-secret");
        let token = auth.issue_token(7).unwrap();

        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::default(),
        )
        .unwrap();
        assert_eq!(data.claims.id, 7);
        assert_eq!(data.claims.exp - data.claims.iat, TOKEN_TTL_SECS);

        let wrong = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"other"),
            &Validation::default(),
        );
        assert!(wrong.is_err());
    }
}
