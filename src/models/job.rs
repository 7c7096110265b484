//! Job model: the top-level unit of production work.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::AsExpression;
use diesel::FromSqlRow;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::Text;
use serde::{Deserialize, Serialize};
use std::io::Write;

// ============================================================================
// Enums
// ============================================================================

/// Product line a job belongs to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    utoipa::ToSchema,
    AsExpression,
    FromSqlRow,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum Workflow {
    Foodservice,
    Beverage,
    Container,
    Carton,
}

impl diesel::query_builder::QueryId for Workflow {
    type QueryId = Workflow;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl ToSql<Text, Pg> for Workflow {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for Workflow {
    fn from_sql(
        bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        match s.as_str() {
            "foodservice" => Ok(Workflow::Foodservice),
            "beverage" => Ok(Workflow::Beverage),
            "container" => Ok(Workflow::Container),
            "carton" => Ok(Workflow::Carton),
            _ => Err(format!("Unrecognized workflow: {}", s).into()),
        }
    }
}

impl Workflow {
    pub fn as_str(&self) -> &'static str {
        match self {
            Workflow::Foodservice => "foodservice",
            Workflow::Beverage => "beverage",
            Workflow::Container => "container",
            Workflow::Carton => "carton",
        }
    }
}

/// Lifecycle status of a job.
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
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Active,
    Hold,
    Complete,
    CompleteBilled,
    Cancelled,
    ClosedAtp,
    ClosedAts,
    ClosedBtc,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Active => "active",
            JobStatus::Hold => "hold",
            JobStatus::Complete => "complete",
            JobStatus::CompleteBilled => "complete_billed",
            JobStatus::Cancelled => "cancelled",
            JobStatus::ClosedAtp => "closed_atp",
            JobStatus::ClosedAts => "closed_ats",
            JobStatus::ClosedBtc => "closed_btc",
        }
    }
}

impl diesel::query_builder::QueryId for JobStatus {
    type QueryId = JobStatus;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl ToSql<Text, Pg> for JobStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        let s = match self {
            JobStatus::Pending => "pending",
            JobStatus::Active => "active",
            JobStatus::Hold => "hold",
            JobStatus::Complete => "complete",
            JobStatus::CompleteBilled => "complete_billed",
            JobStatus::Cancelled => "cancelled",
            JobStatus::ClosedAtp => "closed_atp",
            JobStatus::ClosedAts => "closed_ats",
            JobStatus::ClosedBtc => "closed_btc",
        };
        out.write_all(s.as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for JobStatus {
    fn from_sql(
        bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        match s.as_str() {
            "pending" => Ok(JobStatus::Pending),
            "active" => Ok(JobStatus::Active),
            "hold" => Ok(JobStatus::Hold),
            "complete" => Ok(JobStatus::Complete),
            "complete_billed" => Ok(JobStatus::CompleteBilled),
            "cancelled" => Ok(JobStatus::Cancelled),
            "closed_atp" => Ok(JobStatus::ClosedAtp),
            "closed_ats" => Ok(JobStatus::ClosedAts),
            "closed_btc" => Ok(JobStatus::ClosedBtc),
            _ => Err(format!("Unrecognized job status: {}", s).into()),
        }
    }
}

// ============================================================================
// Job Model
// ============================================================================

/// Job query model for SELECT operations
#[derive(Debug, Queryable, Selectable, Serialize, Clone)]
#[diesel(table_name = crate::schema::jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Job {
    pub id: i32,
    pub name: String,
    pub workflow: Workflow,
    pub status: JobStatus,
    pub job_type: String,
    pub artist_id: Option<i32>,
    pub salesperson_id: Option<i32>,
    pub csr_id: Option<i32>,
    pub due_date: Option<NaiveDate>,
    pub real_due_date: Option<NaiveDate>,
    pub prepress_supplier: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[cfg(test)]
pub(crate) fn test_job(id: i32, workflow: Workflow, real_due_date: Option<NaiveDate>) -> Job {
    let created = NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    Job {
        id,
        name: format!("Job {}", id),
        workflow,
        status: JobStatus::Active,
        job_type: "BillableSales".to_string(),
        artist_id: Some(7),
        salesperson_id: None,
        csr_id: None,
        due_date: real_due_date,
        real_due_date,
        prepress_supplier: None,
        created_at: created,
        updated_at: created,
    }
}
