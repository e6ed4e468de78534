//! Repository traits and base implementations
//!
//! Provides generic CRUD operations for ledger entities.

use async_trait::async_trait;
use cm_core::error::LedgerError;
use cm_core::traits::Id;

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: Id },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl RepositoryError {
    pub fn not_found(entity: &'static str, id: Id) -> Self {
        RepositoryError::NotFound { entity, id }
    }

    /// Classify a driver error, turning constraint violations into conflicts
    pub fn from_constraint(err: sqlx::Error, conflict: impl FnOnce() -> String) -> Self {
        match err.as_database_error() {
            Some(db) if db.is_unique_violation() || db.is_foreign_key_violation() => {
                RepositoryError::Conflict(conflict())
            }
            _ => RepositoryError::Database(err),
        }
    }
}

impl From<RepositoryError> for LedgerError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => LedgerError::not_found(entity, id),
            RepositoryError::Conflict(message) => LedgerError::conflict(message),
            RepositoryError::Database(e) => LedgerError::Database(e.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Base repository trait for CRUD operations
///
/// Listings are small and unpaginated; they come back ordered by id.
#[async_trait]
pub trait Repository<T, CreateDto>: Send + Sync {
    /// Find an entity by ID
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<T>>;

    /// Find all entities
    async fn find_all(&self) -> RepositoryResult<Vec<T>>;

    /// Count all entities
    async fn count(&self) -> RepositoryResult<i64>;

    /// Create a new entity
    async fn create(&self, dto: CreateDto) -> RepositoryResult<T>;

    /// Delete an entity by ID
    async fn delete(&self, id: Id) -> RepositoryResult<()>;

    /// Check if an entity exists
    async fn exists(&self, id: Id) -> RepositoryResult<bool>;
}

/// Full-replace updates for entities that allow them
#[async_trait]
pub trait UpdatableRepository<T, UpdateDto>: Send + Sync {
    async fn update(&self, id: Id, dto: UpdateDto) -> RepositoryResult<T>;
}
