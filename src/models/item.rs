//! Item model: a line item within a job with its own proofing lifecycle.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::Serialize;

use crate::models::job::Workflow;

/// Item query model for SELECT operations
#[derive(Debug, Queryable, Selectable, Serialize, Clone)]
#[diesel(table_name = crate::schema::items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Item {
    pub id: i32,
    pub job_id: i32,
    pub size: String,
    pub print_location: Option<String>,
    pub item_status: String,
    pub overdue_exempt: bool,
    pub nine_digit: Option<String>,
    pub nine_digit_date: Option<NaiveDate>,
    pub first_proof_at: Option<NaiveDateTime>,
    pub approved_at: Option<NaiveDateTime>,
    pub final_file_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

impl Item {
    /// Whether the final production file has been released to the plant.
    pub fn is_filed_out(&self) -> bool {
        self.final_file_at.is_some()
    }

    /// An item that has never been proofed and is not exempt still counts
    /// against its job for due-date tracking.
    pub fn needs_proof(&self) -> bool {
        self.first_proof_at.is_none() && !self.overdue_exempt
    }

    /// Due date of the final file, derived from when the approval and the
    /// nine-digit number were entered.
    ///
    /// Foodservice needs both the nine-digit date and an approval; carton
    /// needs only the approval. The base date gets 3 days, or 5 when it
    /// falls on a Thursday or Friday, and the result is nudged past a
    /// weekend landing. Filed-out items and other workflows have no final
    /// file due date.
    pub fn final_file_due_date(&self, workflow: Workflow) -> Option<NaiveDate> {
        if self.is_filed_out() {
            return None;
        }
        let approved_on = self.approved_at.map(|ts| ts.date())?;

        let base = match workflow {
            Workflow::Foodservice => {
                let nine_digit_on = self.nine_digit_date?;
                nine_digit_on.max(approved_on)
            }
            Workflow::Carton => approved_on,
            Workflow::Beverage | Workflow::Container => return None,
        };

        let mut days_til_due: u64 = match base.weekday().number_from_monday() {
            4 | 5 => 5,
            _ => 3,
        };

        let due = base.checked_add_days(Days::new(days_til_due))?;
        match due.weekday().number_from_monday() {
            6 => days_til_due += 2,
            7 => days_til_due += 1,
            _ => {}
        }

        base.checked_add_days(Days::new(days_til_due))
    }
}

#[cfg(test)]
pub(crate) fn test_item(id: i32, job_id: i32) -> Item {
    let created = NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    Item {
        id,
        job_id,
        size: "16oz".to_string(),
        print_location: None,
        item_status: "Pending".to_string(),
        overdue_exempt: false,
        nine_digit: None,
        nine_digit_date: None,
        first_proof_at: None,
        approved_at: None,
        final_file_at: None,
        created_at: created,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ts(y: i32, m: u32, d: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(10, 0, 0).unwrap()
    }

    #[test]
    fn foodservice_needs_nine_digit_and_approval() {
        let mut item = test_item(1, 1);
        item.approved_at = Some(ts(2025, 6, 2));
        assert_eq!(item.final_file_due_date(Workflow::Foodservice), None);

        item.nine_digit_date = Some(date(2025, 6, 2));
        // Monday June 2nd + 3 days = Thursday June 5th
        assert_eq!(
            item.final_file_due_date(Workflow::Foodservice),
            Some(date(2025, 6, 5))
        );
    }

    #[test]
    fn later_of_nine_digit_and_approval_wins() {
        let mut item = test_item(1, 1);
        item.approved_at = Some(ts(2025, 6, 2));
        item.nine_digit_date = Some(date(2025, 6, 9));
        // Base is Monday June 9th, not the approval date.
        assert_eq!(
            item.final_file_due_date(Workflow::Foodservice),
            Some(date(2025, 6, 12))
        );
    }

    #[test]
    fn thursday_base_gets_five_days() {
        let mut item = test_item(1, 1);
        item.approved_at = Some(ts(2025, 6, 5)); // Thursday
        item.nine_digit_date = Some(date(2025, 6, 5));
        // Thursday + 5 = Tuesday June 10th
        assert_eq!(
            item.final_file_due_date(Workflow::Foodservice),
            Some(date(2025, 6, 10))
        );
    }

    #[test]
    fn weekend_landing_is_pushed_to_monday() {
        let mut item = test_item(1, 1);
        // Wednesday + 3 = Saturday, pushed two more days to Monday.
        item.approved_at = Some(ts(2025, 6, 4));
        item.nine_digit_date = Some(date(2025, 6, 4));
        assert_eq!(
            item.final_file_due_date(Workflow::Foodservice),
            Some(date(2025, 6, 9))
        );
    }

    #[test]
    fn carton_needs_only_approval() {
        let mut item = test_item(1, 1);
        item.approved_at = Some(ts(2025, 6, 2));
        assert_eq!(
            item.final_file_due_date(Workflow::Carton),
            Some(date(2025, 6, 5))
        );
    }

    #[test]
    fn filed_out_and_other_workflows_have_no_date() {
        let mut item = test_item(1, 1);
        item.approved_at = Some(ts(2025, 6, 2));
        item.nine_digit_date = Some(date(2025, 6, 2));
        assert_eq!(item.final_file_due_date(Workflow::Beverage), None);

        item.final_file_at = Some(ts(2025, 6, 4));
        assert_eq!(item.final_file_due_date(Workflow::Foodservice), None);
    }

    #[test]
    fn needs_proof_honors_exemption() {
        let mut item = test_item(1, 1);
        assert!(item.needs_proof());
        item.overdue_exempt = true;
        assert!(!item.needs_proof());
        item.overdue_exempt = false;
        item.first_proof_at = Some(ts(2025, 6, 3));
        assert!(!item.needs_proof());
    }
}
