//! Notification endpoint DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::NotifyCategory;

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct TestNotificationRequest {
    #[validate(length(min = 1, max = 255, message = "title is required"))]
    pub title: String,

    #[validate(length(min = 1, max = 2000, message = "message is required"))]
    pub message: String,

    #[serde(default)]
    pub sticky: bool,

    /// Preference category to check; omit to bypass preference checks.
    pub category: Option<NotifyCategory>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DeliveryResponse {
    pub delivered: bool,
}

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct BroadcastRequest {
    #[validate(length(min = 1, max = 255, message = "title is required"))]
    pub title: String,

    #[validate(length(min = 1, max = 2000, message = "message is required"))]
    pub message: String,

    #[serde(default)]
    pub sticky: bool,

    pub category: Option<NotifyCategory>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct BroadcastResponse {
    pub delivered_count: usize,
    pub total: usize,
}
