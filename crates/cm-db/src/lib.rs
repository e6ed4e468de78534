//! # cm-db
//!
//! Storage layer for the consultant ledger.
//!
//! - Repository traits for CRUD operations
//! - Per-entity store traits bundled behind [`Storage`]
//! - [`MemoryStorage`], an arena-backed store for tests and database-less runs
//! - [`PgStorage`], PostgreSQL repositories using SQLx with embedded migrations
//!
//! ## Example
//!
//! ```ignore
//! use cm_db::{Database, PgStorage, Storage};
//!
//! let db = Database::connect(&url, &config.database).await?;
//! db.migrate().await?;
//!
//! let storage = PgStorage::new(db);
//! let role = storage.roles().find_by_id(1).await?;
//! ```

pub mod assignments;
pub mod consultants;
pub mod memory;
pub mod pool;
pub mod postgres;
pub mod repository;
pub mod roles;
pub mod store;
pub mod tasks;
pub mod work_entries;

// Re-exports
pub use memory::MemoryStorage;
pub use pool::{Database, PoolStats};
pub use postgres::PgStorage;
pub use repository::{Repository, RepositoryError, RepositoryResult, UpdatableRepository};
pub use store::{AssignmentStore, ConsultantStore, RoleStore, Storage, TaskStore, WorkEntryStore};
