//! Plate order model: a barcode/plate production request whose readiness is
//! signaled by the automation engine writing an artifact file.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// PlateOrder query model for SELECT operations
#[derive(Debug, Queryable, Selectable, Serialize, Clone)]
#[diesel(table_name = crate::schema::plate_orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PlateOrder {
    pub id: i32,
    pub job_id: Option<i32>,
    pub six_digit: String,
    pub nine_digit: String,
    pub fourteen_digit: String,
    pub case_color: String,
    pub plant: String,
    pub box_style: String,
    pub created_by: Option<i32>,
    pub created_at: NaiveDateTime,
}

/// NewPlateOrder insert model for INSERT operations
#[derive(Debug, Insertable, Deserialize, Clone)]
#[diesel(table_name = crate::schema::plate_orders)]
pub struct NewPlateOrder {
    pub job_id: Option<i32>,
    pub six_digit: String,
    pub nine_digit: String,
    pub fourteen_digit: String,
    pub case_color: String,
    pub plant: String,
    pub box_style: String,
    pub created_by: Option<i32>,
}

#[cfg(test)]
pub(crate) fn test_plate_order(id: i32) -> PlateOrder {
    use chrono::NaiveDate;

    let created = NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    PlateOrder {
        id,
        job_id: None,
        six_digit: "123456".to_string(),
        nine_digit: "123456789".to_string(),
        fourteen_digit: "12345678901234".to_string(),
        case_color: "Kraft".to_string(),
        plant: "Clemson".to_string(),
        box_style: "RSC".to_string(),
        created_by: None,
        created_at: created,
    }
}
