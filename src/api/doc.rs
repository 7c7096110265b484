use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

pub const AUTH_TAG: &str = "Auth";
pub const HEALTH_TAG: &str = "Health";
pub const NOTIFICATION_TAG: &str = "Notifications";
pub const PLATE_TAG: &str = "Plate Orders";
pub const REPORT_TAG: &str = "Reports";
pub const USER_TAG: &str = "Users";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "GOLD Production Hub",
        description = "Production management API: daily report, notifications, plate orders",
    ),
    modifiers(&SecurityAddon),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
        )
    ),
    tags(
        (name = AUTH_TAG, description = "Authentication endpoints"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
        (name = USER_TAG, description = "User and preference management"),
        (name = REPORT_TAG, description = "Daily production report"),
        (name = NOTIFICATION_TAG, description = "Desktop notification dispatch"),
        (name = PLATE_TAG, description = "Plate orders and PDF generation"),
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer Token Authentication"))
                        .build(),
                ),
            )
        }
    }
}
