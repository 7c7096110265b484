//! User model with notification preferences and workflow access.

use chrono::NaiveDateTime;
use diesel::AsExpression;
use diesel::FromSqlRow;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::Text;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::models::job::Workflow;

// ============================================================================
// Enums
// ============================================================================

/// Per-category notification preference.
///
/// `Sticky` means the notification is delivered and forced to the maximum
/// presentation duration regardless of what the caller asked for.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    utoipa::ToSchema,
    AsExpression,
    FromSqlRow,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum NotifyPref {
    Disabled,
    Enabled,
    Sticky,
}

impl diesel::query_builder::QueryId for NotifyPref {
    type QueryId = NotifyPref;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl ToSql<Text, Pg> for NotifyPref {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        let s = match self {
            NotifyPref::Disabled => "disabled",
            NotifyPref::Enabled => "enabled",
            NotifyPref::Sticky => "sticky",
        };
        out.write_all(s.as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for NotifyPref {
    fn from_sql(
        bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        match s.as_str() {
            "disabled" => Ok(NotifyPref::Disabled),
            "enabled" => Ok(NotifyPref::Enabled),
            "sticky" => Ok(NotifyPref::Sticky),
            _ => Err(format!("Unrecognized notify_pref: {}", s).into()),
        }
    }
}

/// Notification categories a user can tune individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotifyCategory {
    Approvals,
    Revisions,
    NewFoodserviceJobs,
    NewBeverageJobs,
    NewCartonJobs,
    FileOut,
    DailyDigest,
}

// ============================================================================
// User Models (Query/Insert/Update)
// ============================================================================

/// User query model for SELECT operations
#[derive(Debug, Queryable, Selectable, Serialize, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
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
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl User {
    /// The stored preference for a notification category.
    pub fn pref_for(&self, category: NotifyCategory) -> NotifyPref {
        match category {
            NotifyCategory::Approvals => self.notify_approvals,
            NotifyCategory::Revisions => self.notify_revisions,
            NotifyCategory::NewFoodserviceJobs => self.notify_new_foodservice_jobs,
            NotifyCategory::NewBeverageJobs => self.notify_new_beverage_jobs,
            NotifyCategory::NewCartonJobs => self.notify_new_carton_jobs,
            NotifyCategory::FileOut => self.notify_file_out,
            NotifyCategory::DailyDigest => self.notify_daily_digest,
        }
    }

    /// Workflows this user is allowed to see.
    pub fn permitted_workflows(&self) -> Vec<Workflow> {
        let mut workflows = Vec::new();
        if self.access_foodservice {
            workflows.push(Workflow::Foodservice);
        }
        if self.access_beverage {
            workflows.push(Workflow::Beverage);
        }
        if self.access_container {
            workflows.push(Workflow::Container);
        }
        if self.access_carton {
            workflows.push(Workflow::Carton);
        }
        workflows
    }
}

/// NewUser insert model for INSERT operations
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub is_admin: bool,
    pub access_foodservice: bool,
    pub access_beverage: bool,
    pub access_container: bool,
    pub access_carton: bool,
}

/// Notification preference update model
#[derive(Debug, AsChangeset, Deserialize, Clone, Default)]
#[diesel(table_name = crate::schema::users)]
pub struct UpdateNotificationPrefs {
    pub notifications_enabled: Option<bool>,
    pub notify_approvals: Option<NotifyPref>,
    pub notify_revisions: Option<NotifyPref>,
    pub notify_new_foodservice_jobs: Option<NotifyPref>,
    pub notify_new_beverage_jobs: Option<NotifyPref>,
    pub notify_new_carton_jobs: Option<NotifyPref>,
    pub notify_file_out: Option<NotifyPref>,
    pub notify_daily_digest: Option<NotifyPref>,
}

#[cfg(test)]
pub(crate) fn test_user(id: i32) -> User {
    use chrono::NaiveDate;

    let midnight = NaiveDate::from_ymd_opt(2025, 6, 2)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap();
    User {
        id,
        username: format!("user{}", id),
        email: format!("user{}@example.com", id),
        password: String::new(),
        is_admin: false,
        notifications_enabled: true,
        notify_approvals: NotifyPref::Sticky,
        notify_revisions: NotifyPref::Sticky,
        notify_new_foodservice_jobs: NotifyPref::Disabled,
        notify_new_beverage_jobs: NotifyPref::Disabled,
        notify_new_carton_jobs: NotifyPref::Disabled,
        notify_file_out: NotifyPref::Enabled,
        notify_daily_digest: NotifyPref::Disabled,
        access_foodservice: true,
        access_beverage: false,
        access_container: false,
        access_carton: false,
        created_at: midnight,
        updated_at: midnight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pref_for_maps_each_category() {
        let mut user = test_user(1);
        user.notify_file_out = NotifyPref::Disabled;
        assert_eq!(user.pref_for(NotifyCategory::Approvals), NotifyPref::Sticky);
        assert_eq!(user.pref_for(NotifyCategory::FileOut), NotifyPref::Disabled);
        assert_eq!(
            user.pref_for(NotifyCategory::NewBeverageJobs),
            NotifyPref::Disabled
        );
    }

    #[test]
    fn permitted_workflows_follow_access_flags() {
        let mut user = test_user(1);
        user.access_carton = true;
        assert_eq!(
            user.permitted_workflows(),
            vec![Workflow::Foodservice, Workflow::Carton]
        );
    }
}
