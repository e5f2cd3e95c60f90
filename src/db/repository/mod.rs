//! Repository trait definitions.
//!
//! The repository is the seam between the HTTP layer and the data store:
//! controllers call these traits, never a database driver. Reads return
//! entities (or `None`); update and delete return a [`MutationResult`] whose
//! affected-row count distinguishes "not found" from success.

use async_trait::async_trait;
use serde_json::Value;

use crate::models::{AircraftId, MutationResult, Payload, TaskId};

mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

/// Repository operations for the aircraft resource.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait AircraftRepository: Send + Sync {
    /// Fetch every aircraft row.
    ///
    /// # Returns
    /// * `Ok(Vec<Value>)` - All aircraft entities, each including its `id`
    /// * `Err(RepositoryError)` - If the operation fails
    async fn fetch_all_aircraft(&self) -> RepositoryResult<Vec<Value>>;

    /// Fetch a single aircraft by id.
    ///
    /// # Returns
    /// * `Ok(Some(Value))` - The entity if it exists
    /// * `Ok(None)` - If no aircraft has this id
    /// * `Err(RepositoryError)` - If the operation fails
    async fn fetch_aircraft_by_id(&self, id: AircraftId) -> RepositoryResult<Option<Value>>;

    /// Persist a new aircraft from an attribute payload.
    ///
    /// # Returns
    /// * `Ok(Value)` - The created entity, including its generated id
    /// * `Err(RepositoryError)` - If the operation fails
    async fn create_aircraft(&self, payload: Payload) -> RepositoryResult<Value>;

    /// Replace the attribute set of an existing aircraft.
    ///
    /// # Returns
    /// * `Ok(MutationResult)` - Affected-row count (0 when the id is unknown)
    /// * `Err(RepositoryError)` - If the operation fails
    async fn update_aircraft(
        &self,
        id: AircraftId,
        payload: Payload,
    ) -> RepositoryResult<MutationResult>;

    /// Delete an aircraft by id.
    ///
    /// # Returns
    /// * `Ok(MutationResult)` - Affected-row count (0 when the id is unknown)
    /// * `Err(RepositoryError)` - If the operation fails
    async fn delete_aircraft(&self, id: AircraftId) -> RepositoryResult<MutationResult>;
}

/// Repository operations for the task resource.
///
/// Same contract as [`AircraftRepository`], distinct namespace.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Fetch every task row.
    async fn fetch_all_tasks(&self) -> RepositoryResult<Vec<Value>>;

    /// Fetch a single task by id.
    async fn fetch_task_by_id(&self, id: TaskId) -> RepositoryResult<Option<Value>>;

    /// Persist a new task from an attribute payload.
    async fn create_task(&self, payload: Payload) -> RepositoryResult<Value>;

    /// Replace the attribute set of an existing task.
    async fn update_task(&self, id: TaskId, payload: Payload) -> RepositoryResult<MutationResult>;

    /// Delete a task by id.
    async fn delete_task(&self, id: TaskId) -> RepositoryResult<MutationResult>;
}

/// Combined repository interface covering both resources.
///
/// This is the type handlers and the server binary work with; concrete
/// backends implement the per-resource traits and get this one for free.
#[async_trait]
pub trait FullRepository: AircraftRepository + TaskRepository {
    /// Check that the underlying store is reachable.
    ///
    /// # Returns
    /// * `Ok(true)` - The store answered
    /// * `Ok(false)` - The store is reachable but unhealthy
    /// * `Err(RepositoryError)` - If the check itself fails
    async fn health_check(&self) -> RepositoryResult<bool>;
}
