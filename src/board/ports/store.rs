//! Store port for task persistence across interchangeable backends.

use crate::board::domain::{DayOfWeek, NewTask, OwnerId, Task, TaskId, TaskPatch, TaskStatus, WeekId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Task persistence contract.
///
/// Any implementation satisfying this contract, whether in-memory, embedded
/// database, or remote document store, is interchangeable from the board's
/// point of view. Implementations own identifier and timestamp assignment
/// and normalise their wire field casing so callers always see the canonical
/// snake_case shape.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Stores a new task under the given owner and week.
    ///
    /// Returns the identifier the store assigned to the record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Backend`] when persistence fails.
    async fn add_task(
        &self,
        owner: &OwnerId,
        week: WeekId,
        draft: NewTask,
    ) -> TaskStoreResult<TaskId>;

    /// Returns all tasks the owner has in the given week.
    ///
    /// A week with no matching records yields an empty collection, not an
    /// error. Results are ordered by creation time.
    async fn tasks_for_week(&self, owner: &OwnerId, week: WeekId) -> TaskStoreResult<Vec<Task>>;

    /// Applies a field-level patch to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn update_task(&self, id: TaskId, patch: TaskPatch) -> TaskStoreResult<()>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()>;

    /// Updates only the task's day.
    ///
    /// Convenience wrapper over [`TaskStore::update_task`]; day and status
    /// are independent fields in the backend contract, not halves of an
    /// atomic move.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn update_task_day(&self, id: TaskId, day: DayOfWeek) -> TaskStoreResult<()> {
        self.update_task(id, TaskPatch::day_only(day)).await
    }

    /// Updates only the task's status.
    ///
    /// Convenience wrapper over [`TaskStore::update_task`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn update_task_status(&self, id: TaskId, status: TaskStatus) -> TaskStoreResult<()> {
        self.update_task(id, TaskPatch::status_only(status)).await
    }
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a backend failure.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
