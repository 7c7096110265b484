//! Repository layer for data access operations.
//!
//! Provides async read/write operations for all domain entities.

mod complexity_repo;
mod item_repo;
mod job_repo;
mod plate_order_repo;
mod revision_repo;
mod user_repo;

pub use complexity_repo::ComplexityRepository;
pub use item_repo::ItemRepository;
pub use job_repo::JobRepository;
pub use plate_order_repo::PlateOrderRepository;
pub use revision_repo::RevisionRepository;
pub use user_repo::UserRepository;

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// Since `AsyncDbPool` uses `Arc` internally, cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub users: UserRepository,
    pub jobs: JobRepository,
    pub items: ItemRepository,
    pub revisions: RevisionRepository,
    pub complexities: ComplexityRepository,
    pub plate_orders: PlateOrderRepository,
}

impl Repositories {
    /// Creates a new Repositories instance with all repositories initialized.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            jobs: JobRepository::new(pool.clone()),
            items: ItemRepository::new(pool.clone()),
            revisions: RevisionRepository::new(pool.clone()),
            complexities: ComplexityRepository::new(pool.clone()),
            plate_orders: PlateOrderRepository::new(pool),
        }
    }
}
