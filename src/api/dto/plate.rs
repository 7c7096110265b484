//! Plate order DTOs.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::external::automation::ArtifactKind;
use crate::models::{NewPlateOrder, PlateOrder};

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct CreatePlateOrderRequest {
    pub job_id: Option<i32>,

    #[validate(length(equal = 6, message = "six_digit must be 6 characters"))]
    pub six_digit: String,

    #[validate(length(equal = 9, message = "nine_digit must be 9 characters"))]
    pub nine_digit: String,

    #[validate(length(equal = 14, message = "fourteen_digit must be 14 characters"))]
    pub fourteen_digit: String,

    #[validate(length(min = 1, max = 50))]
    pub case_color: String,

    #[validate(length(min = 1, max = 100))]
    pub plant: String,

    #[validate(length(min = 1, max = 100))]
    pub box_style: String,
}

impl CreatePlateOrderRequest {
    pub fn into_new_order(self, created_by: i32) -> NewPlateOrder {
        NewPlateOrder {
            job_id: self.job_id,
            six_digit: self.six_digit,
            nine_digit: self.nine_digit,
            fourteen_digit: self.fourteen_digit,
            case_color: self.case_color,
            plant: self.plant,
            box_style: self.box_style,
            created_by: Some(created_by),
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PlateOrderResponse {
    pub id: i32,
    pub job_id: Option<i32>,
    pub six_digit: String,
    pub nine_digit: String,
    pub fourteen_digit: String,
    pub case_color: String,
    pub plant: String,
    pub box_style: String,
    pub created_at: NaiveDateTime,
}

impl From<PlateOrder> for PlateOrderResponse {
    fn from(order: PlateOrder) -> Self {
        Self {
            id: order.id,
            job_id: order.job_id,
            six_digit: order.six_digit,
            nine_digit: order.nine_digit,
            fourteen_digit: order.fourteen_digit,
            case_color: order.case_color,
            plant: order.plant,
            box_style: order.box_style,
            created_at: order.created_at,
        }
    }
}

/// How the generated PDF should be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum GenerateMode {
    /// Wait for the barcode artifact and stream the PDF back.
    Download,
    /// Return immediately; generation continues on a background task.
    Background,
}

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct GenerateRequest {
    pub kind: ArtifactKind,
    pub mode: GenerateMode,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct GenerationAccepted {
    pub accepted: bool,
    /// True when a generation for this order and artifact was already
    /// running and no new one was started.
    pub already_running: bool,
}
