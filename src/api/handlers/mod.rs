//! HTTP request handlers organized by resource.

pub mod auth;
pub mod health;
pub mod me;
pub mod notifications;
pub mod plates;
pub mod todo;
pub mod users;

use crate::api::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::User;
use crate::state::AppState;

/// Load the authenticated caller's full user row.
pub(crate) async fn current_user(state: &AppState, auth: &AuthUser) -> AppResult<User> {
    state.services.users.get_user(auth.user_id).await
}

/// Load the caller and require the admin flag.
pub(crate) async fn require_admin(state: &AppState, auth: &AuthUser) -> AppResult<User> {
    let user = current_user(state, auth).await?;
    if !user.is_admin {
        return Err(AppError::Forbidden {
            message: "Administrator access required".to_string(),
        });
    }
    Ok(user)
}
