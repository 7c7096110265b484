//! Notification dispatch handlers.

use axum::{Extension, Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::NOTIFICATION_TAG;
use crate::api::dto::{
    BroadcastRequest, BroadcastResponse, DeliveryResponse, TestNotificationRequest,
};
use crate::api::handlers::{current_user, require_admin};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

pub fn notification_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(send_test_notification))
        .routes(routes!(broadcast))
}

/// POST /api/notifications/test - Send a notification to the caller
///
/// Delivery is best-effort: suppression by preference and daemon failures
/// both come back as `delivered: false`.
#[utoipa::path(
    post,
    path = "/test",
    tag = NOTIFICATION_TAG,
    request_body = TestNotificationRequest,
    responses(
        (status = 200, description = "Delivery attempted", body = DeliveryResponse)
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn send_test_notification(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    ValidatedJson(req): ValidatedJson<TestNotificationRequest>,
) -> AppResult<Json<DeliveryResponse>> {
    let user = current_user(&state, &auth).await?;

    let delivered = state
        .services
        .notifications
        .notify_user(&user, &req.title, &req.message, req.sticky, req.category)
        .await;

    Ok(Json(DeliveryResponse { delivered }))
}

/// POST /api/notifications/broadcast - Notify all users (admin only)
#[utoipa::path(
    post,
    path = "/broadcast",
    tag = NOTIFICATION_TAG,
    request_body = BroadcastRequest,
    responses(
        (status = 200, description = "Broadcast attempted", body = BroadcastResponse),
        (status = 403, description = "Caller is not an administrator")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn broadcast(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    ValidatedJson(req): ValidatedJson<BroadcastRequest>,
) -> AppResult<Json<BroadcastResponse>> {
    require_admin(&state, &auth).await?;

    let users = state.services.users.list_users().await?;
    let delivered_count = state
        .services
        .notifications
        .notify_users(&users, &req.title, &req.message, req.sticky, req.category)
        .await;

    Ok(Json(BroadcastResponse {
        delivered_count,
        total: users.len(),
    }))
}
