use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Token type enumeration
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Access token for API authentication (short-lived)
    Access,
    /// Refresh token for obtaining new access tokens (long-lived)
    Refresh,
}

/// JWT claims carrying user identity and token metadata
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// User email
    pub email: String,
    /// Username
    pub username: String,
    /// Token type (access or refresh)
    pub token_type: TokenType,
    /// Issued at (timestamp)
    pub iat: i64,
    /// Expiration time (timestamp)
    pub exp: i64,
}

impl Claims {
    pub fn new(
        user_id: i32,
        email: String,
        username: String,
        token_type: TokenType,
        expiration_hours: i64,
    ) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: user_id.to_string(),
            email,
            username,
            token_type,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }
}

/// Generates a signed JWT for a user.
pub fn generate_token(
    user_id: i32,
    email: String,
    username: String,
    token_type: TokenType,
    secret: &str,
    expiration_hours: i64,
) -> AppResult<String> {
    let claims = Claims::new(user_id, email, username, token_type, expiration_hours);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("Failed to generate JWT token: {}", e),
    })
}

/// Generates both access and refresh tokens.
pub fn generate_token_pair(
    user_id: i32,
    email: String,
    username: String,
    secret: &str,
    access_expiration_hours: i64,
    refresh_expiration_hours: i64,
) -> AppResult<(String, String)> {
    let access_token = generate_token(
        user_id,
        email.clone(),
        username.clone(),
        TokenType::Access,
        secret,
        access_expiration_hours,
    )?;

    let refresh_token = generate_token(
        user_id,
        email,
        username,
        TokenType::Refresh,
        secret,
        refresh_expiration_hours,
    )?;

    Ok((access_token, refresh_token))
}

/// Validates and decodes a JWT, optionally enforcing the token type.
pub fn validate_token(
    token: &str,
    secret: &str,
    expected_type: Option<TokenType>,
) -> AppResult<Claims> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| AppError::Unauthorized {
        message: format!("Invalid token: {}", e),
    })?;

    if let Some(expected) = expected_type {
        if data.claims.token_type != expected {
            return Err(AppError::Unauthorized {
                message: "Wrong token type".to_string(),
            });
        }
    }

    Ok(data.claims)
}

/// Validates an access token specifically.
pub fn validate_access_token(token: &str, secret: &str) -> AppResult<Claims> {
    validate_token(token, secret, Some(TokenType::Access))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret-at-least-32-bytes!!";

    #[test]
    fn token_round_trip_preserves_claims() {
        let token = generate_token(
            7,
            "artist@example.com".to_string(),
            "artist".to_string(),
            TokenType::Access,
            SECRET,
            1,
        )
        .unwrap();

        let claims = validate_access_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.username, "artist");
        assert_eq!(claims.token_type, TokenType::Access);
    }

    #[test]
    fn refresh_token_is_rejected_as_access() {
        let (_, refresh) = generate_token_pair(
            7,
            "artist@example.com".to_string(),
            "artist".to_string(),
            SECRET,
            1,
            168,
        )
        .unwrap();

        assert!(validate_access_token(&refresh, SECRET).is_err());
        assert!(validate_token(&refresh, SECRET, Some(TokenType::Refresh)).is_ok());
    }

    #[test]
    fn wrong_secret_fails() {
        let token = generate_token(
            7,
            "a@b.c".to_string(),
            "a".to_string(),
            TokenType::Access,
            SECRET,
            1,
        )
        .unwrap();
        assert!(validate_access_token(&token, "another-secret-also-32-bytes-long!!").is_err());
    }
}
