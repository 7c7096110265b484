//! Application state for the Axum web framework.
//!
//! Contains shared services and resources accessible across all request
//! handlers.

use crate::config::JwtConfig;
use crate::config::settings::ApplicationConfig;
use crate::db::AsyncDbPool;
use crate::services::Services;

/// Application state used with Axum's State extractor.
///
/// Cloning is cheap: services and the pool use Arc internally.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Direct access to the database connection pool
    pub db_pool: AsyncDbPool,
    /// JWT configuration for token validation
    pub jwt_config: JwtConfig,
    /// Application identity for health reporting
    pub application: ApplicationConfig,
}

impl AppState {
    pub fn new(
        services: Services,
        db_pool: AsyncDbPool,
        jwt_config: JwtConfig,
        application: ApplicationConfig,
    ) -> Self {
        Self {
            services,
            db_pool,
            jwt_config,
            application,
        }
    }
}
