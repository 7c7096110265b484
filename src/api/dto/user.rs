//! User request/response DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{NewUser, NotifyPref, UpdateNotificationPrefs, User};

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 50, message = "username must be 3-50 characters"))]
    pub username: String,

    #[validate(email(message = "invalid email address"))]
    pub email: String,

    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,

    #[serde(default)]
    pub is_admin: bool,

    #[serde(default)]
    pub access_foodservice: bool,
    #[serde(default)]
    pub access_beverage: bool,
    #[serde(default)]
    pub access_container: bool,
    #[serde(default)]
    pub access_carton: bool,
}

impl CreateUserRequest {
    pub fn into_new_user(self) -> NewUser {
        NewUser {
            username: self.username,
            email: self.email,
            password: self.password,
            is_admin: self.is_admin,
            access_foodservice: self.access_foodservice,
            access_beverage: self.access_beverage,
            access_container: self.access_container,
            access_carton: self.access_carton,
        }
    }
}

/// Partial notification preference update; absent fields are untouched.
#[derive(Debug, Default, Deserialize, Validate, utoipa::ToSchema)]
pub struct NotificationPrefsRequest {
    pub notifications_enabled: Option<bool>,
    pub notify_approvals: Option<NotifyPref>,
    pub notify_revisions: Option<NotifyPref>,
    pub notify_new_foodservice_jobs: Option<NotifyPref>,
    pub notify_new_beverage_jobs: Option<NotifyPref>,
    pub notify_new_carton_jobs: Option<NotifyPref>,
    pub notify_file_out: Option<NotifyPref>,
    pub notify_daily_digest: Option<NotifyPref>,
}

impl NotificationPrefsRequest {
    pub fn is_empty(&self) -> bool {
        self.notifications_enabled.is_none()
            && self.notify_approvals.is_none()
            && self.notify_revisions.is_none()
            && self.notify_new_foodservice_jobs.is_none()
            && self.notify_new_beverage_jobs.is_none()
            && self.notify_new_carton_jobs.is_none()
            && self.notify_file_out.is_none()
            && self.notify_daily_digest.is_none()
    }

    pub fn into_update(self) -> UpdateNotificationPrefs {
        UpdateNotificationPrefs {
            notifications_enabled: self.notifications_enabled,
            notify_approvals: self.notify_approvals,
            notify_revisions: self.notify_revisions,
            notify_new_foodservice_jobs: self.notify_new_foodservice_jobs,
            notify_new_beverage_jobs: self.notify_new_beverage_jobs,
            notify_new_carton_jobs: self.notify_new_carton_jobs,
            notify_file_out: self.notify_file_out,
            notify_daily_digest: self.notify_daily_digest,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    pub notifications_enabled: bool,
    pub notify_approvals: NotifyPref,
    pub notify_revisions: NotifyPref,
    pub notify_new_foodservice_jobs: NotifyPref,
    pub notify_new_beverage_jobs: NotifyPref,
    pub notify_new_carton_jobs: NotifyPref,
    pub notify_file_out: NotifyPref,
    pub notify_daily_digest: NotifyPref,
    pub access_foodservice: bool,
    pub access_beverage: bool,
    pub access_container: bool,
    pub access_carton: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            is_admin: user.is_admin,
            notifications_enabled: user.notifications_enabled,
            notify_approvals: user.notify_approvals,
            notify_revisions: user.notify_revisions,
            notify_new_foodservice_jobs: user.notify_new_foodservice_jobs,
            notify_new_beverage_jobs: user.notify_new_beverage_jobs,
            notify_new_carton_jobs: user.notify_new_carton_jobs,
            notify_file_out: user.notify_file_out,
            notify_daily_digest: user.notify_daily_digest,
            access_foodservice: user.access_foodservice,
            access_beverage: user.access_beverage,
            access_container: user.access_container,
            access_carton: user.access_carton,
        }
    }
}
