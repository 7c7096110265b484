//! User service: authentication, profile access, preference updates.

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};
use crate::models::{NewUser, UpdateNotificationPrefs, User};
use crate::repositories::UserRepository;
use crate::utils::jwt::{TokenType, generate_token_pair, validate_token};
use crate::utils::password::{hash_password, verify_password};

/// Access + refresh token pair issued on login.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Clone)]
pub struct UserService {
    users: UserRepository,
    jwt: JwtConfig,
}

impl UserService {
    pub fn new(users: UserRepository, jwt: JwtConfig) -> Self {
        Self { users, jwt }
    }

    pub async fn create_user(&self, mut new_user: NewUser) -> AppResult<User> {
        new_user.password = hash_password(&new_user.password)?;
        self.users.create(new_user).await
    }

    pub async fn get_user(&self, id: i32) -> AppResult<User> {
        self.users.find_by_id(id).await?.ok_or(AppError::NotFound {
            entity: "User".to_string(),
            field: "id".to_string(),
            value: id.to_string(),
        })
    }

    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.users.list_all().await
    }

    /// Verify credentials and issue a token pair.
    ///
    /// Invalid username and invalid password produce the same error so the
    /// response does not leak which usernames exist.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<TokenPair> {
        let invalid = || AppError::Unauthorized {
            message: "Invalid username or password".to_string(),
        };

        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(password, &user.password)? {
            return Err(invalid());
        }

        let (access_token, refresh_token) = generate_token_pair(
            user.id,
            user.email.clone(),
            user.username.clone(),
            &self.jwt.secret,
            self.jwt.access_token_expiration,
            self.jwt.refresh_token_expiration,
        )?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Exchange a refresh token for a fresh pair.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let claims = validate_token(refresh_token, &self.jwt.secret, Some(TokenType::Refresh))?;

        let user_id: i32 = claims.sub.parse().map_err(|_| AppError::Unauthorized {
            message: "Invalid token subject".to_string(),
        })?;

        // The user may have been removed since the token was issued.
        let user = self.get_user(user_id).await?;

        let (access_token, refresh_token) = generate_token_pair(
            user.id,
            user.email.clone(),
            user.username.clone(),
            &self.jwt.secret,
            self.jwt.access_token_expiration,
            self.jwt.refresh_token_expiration,
        )?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    pub async fn update_notification_prefs(
        &self,
        id: i32,
        update: UpdateNotificationPrefs,
    ) -> AppResult<User> {
        self.users.update_notification_prefs(id, update).await
    }
}
