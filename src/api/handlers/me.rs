//! Handlers for the authenticated caller's own profile.

use axum::{Extension, Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::USER_TAG;
use crate::api::dto::{NotificationPrefsRequest, UserResponse};
use crate::api::handlers::current_user;
use crate::api::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

pub fn me_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_me))
        .routes(routes!(update_my_notifications))
}

/// GET /api/me - The caller's profile and preferences
#[utoipa::path(
    get,
    path = "/",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Caller profile", body = UserResponse)
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn get_me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> AppResult<Json<UserResponse>> {
    let user = current_user(&state, &auth).await?;
    Ok(Json(UserResponse::from(user)))
}

/// PUT /api/me/notifications - Update the caller's notification preferences
#[utoipa::path(
    put,
    path = "/notifications",
    tag = USER_TAG,
    request_body = NotificationPrefsRequest,
    responses(
        (status = 200, description = "Preferences updated", body = UserResponse),
        (status = 400, description = "Empty update")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn update_my_notifications(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    ValidatedJson(req): ValidatedJson<NotificationPrefsRequest>,
) -> AppResult<Json<UserResponse>> {
    if req.is_empty() {
        return Err(AppError::BadRequest {
            message: "No preference fields provided".to_string(),
        });
    }

    let user = state
        .services
        .users
        .update_notification_prefs(auth.user_id, req.into_update())
        .await?;
    Ok(Json(UserResponse::from(user)))
}
