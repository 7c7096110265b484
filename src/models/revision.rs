//! Revision model: a correction request against an item.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::Serialize;

/// Revision query model for SELECT operations.
///
/// A null `complete_date` means the revision is outstanding and still
/// contributes to workload.
#[derive(Debug, Queryable, Selectable, Serialize, Clone)]
#[diesel(table_name = crate::schema::revisions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Revision {
    pub id: i32,
    pub item_id: i32,
    pub due_date: NaiveDate,
    pub complete_date: Option<NaiveDate>,
    pub comments: String,
    pub created_at: NaiveDateTime,
}

impl Revision {
    pub fn is_outstanding(&self) -> bool {
        self.complete_date.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn completed_revisions_are_not_outstanding() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let mut revision = Revision {
            id: 1,
            item_id: 1,
            due_date: date,
            complete_date: None,
            comments: String::new(),
            created_at: date.and_hms_opt(9, 0, 0).unwrap(),
        };
        assert!(revision.is_outstanding());

        revision.complete_date = Some(date);
        assert!(!revision.is_outstanding());
    }
}
