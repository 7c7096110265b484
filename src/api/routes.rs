//! Router configuration for the API.
//!
//! Health and auth stay public; everything else sits behind the JWT
//! middleware. Request-id and logging wrap all routes (middleware is
//! applied in reverse order of declaration, so request_id runs first and
//! logging can read the id it set).

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{auth_middleware, logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let public = OpenApiRouter::new()
        .nest("/health", handlers::health::health_routes())
        .nest("/auth", handlers::auth::auth_routes());

    let protected = OpenApiRouter::new()
        .nest("/me", handlers::me::me_routes())
        .nest("/users", handlers::users::user_routes())
        .nest("/reports/todo", handlers::todo::todo_routes())
        .nest("/notifications", handlers::notifications::notification_routes())
        .nest("/plate-orders", handlers::plates::plate_routes())
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api", public.merge(protected))
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
