//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and handlers.

pub mod notifications;
pub mod plates;
pub mod reports;
pub mod todo;
mod user_service;

pub use notifications::NotificationService;
pub use plates::PlateService;
pub use todo::TodoService;
pub use user_service::{TokenPair, UserService};

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Settings;
use crate::external::automation::FsArtifactStore;
use crate::repositories::Repositories;
use crate::services::notifications::DesktopToastProvider;
use crate::services::plates::PollerConfig;
use crate::services::todo::EstimateService;

/// Aggregates all services for convenient access.
///
/// Designed to live in the Axum application state; cloning is cheap since
/// the underlying pool and providers use `Arc` internally.
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
    pub notifications: NotificationService,
    pub todo: TodoService,
    pub plates: PlateService,
}

impl Services {
    /// Creates all services from repositories and settings.
    pub fn new(repos: Repositories, settings: &Settings) -> Self {
        let provider = Arc::new(DesktopToastProvider::new(&settings.notifier));
        let store = Arc::new(FsArtifactStore::new(&settings.automation));
        let estimates = EstimateService::new(repos.complexities.clone(), repos.items.clone());

        Self {
            users: UserService::new(repos.users.clone(), settings.jwt.clone()),
            notifications: NotificationService::new(provider),
            todo: TodoService::new(
                repos.jobs.clone(),
                repos.items.clone(),
                repos.revisions.clone(),
                estimates,
            ),
            plates: PlateService::new(
                repos.plate_orders.clone(),
                store,
                PollerConfig::from_settings(&settings.automation),
                PathBuf::from(&settings.automation.artifact_root),
            ),
        }
    }
}
