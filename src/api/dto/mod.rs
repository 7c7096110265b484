//! Data Transfer Objects for API requests and responses.

mod auth;
mod error;
mod health;
mod notification;
mod pagination;
mod plate;
mod todo;
mod user;

pub use auth::{LoginRequest, RefreshRequest, TokenResponse};
pub use error::ErrorResponse;
pub use health::HealthResponse;
pub use notification::{
    BroadcastRequest, BroadcastResponse, DeliveryResponse, TestNotificationRequest,
};
pub use pagination::PaginationParams;
pub use plate::{
    CreatePlateOrderRequest, GenerateMode, GenerateRequest, GenerationAccepted,
    PlateOrderResponse,
};
pub use todo::{DayBucketResponse, FileOutResponse, JobSummary, TodoQuery, TodoReportResponse};
pub use user::{CreateUserRequest, NotificationPrefsRequest, UserResponse};
