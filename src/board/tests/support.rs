//! Shared fixtures and test doubles for board tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::board::{
    domain::{DayOfWeek, NewTask, OwnerId, Task, TaskId, TaskPatch, TaskStatus, WeekId},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// A Monday used as the reference date throughout board tests.
pub fn reference_monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid calendar date")
}

/// The single-user owner context used throughout board tests.
pub fn local_owner() -> OwnerId {
    OwnerId::new("local-user").expect("valid owner context")
}

mockall::mock! {
    pub Store {}

    #[async_trait]
    impl TaskStore for Store {
        async fn add_task(
            &self,
            owner: &OwnerId,
            week: WeekId,
            draft: NewTask,
        ) -> TaskStoreResult<TaskId>;
        async fn tasks_for_week(&self, owner: &OwnerId, week: WeekId) -> TaskStoreResult<Vec<Task>>;
        async fn update_task(&self, id: TaskId, patch: TaskPatch) -> TaskStoreResult<()>;
        async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()>;
        async fn update_task_day(&self, id: TaskId, day: DayOfWeek) -> TaskStoreResult<()>;
        async fn update_task_status(&self, id: TaskId, status: TaskStatus) -> TaskStoreResult<()>;
    }
}

/// Store whose next `update_task_day` call parks until released, then fails.
///
/// Lets a test overlap two drags on the same task: the first drag's
/// persistence is held at the gate while a second drag completes, so the
/// first drag's rollback arrives stale.
pub struct GatedFailStore {
    seeded: Vec<Task>,
    block_next_day_update: AtomicBool,
    entered: AtomicBool,
    release: AtomicBool,
}

impl GatedFailStore {
    /// Creates a store that serves the seeded tasks for any week query.
    pub fn new(seeded: Vec<Task>) -> Self {
        Self {
            seeded,
            block_next_day_update: AtomicBool::new(true),
            entered: AtomicBool::new(false),
            release: AtomicBool::new(false),
        }
    }

    /// Returns `true` once a caller is parked at the gate.
    pub fn gate_entered(&self) -> bool {
        self.entered.load(Ordering::SeqCst)
    }

    /// Releases the parked caller, letting its gated call fail.
    pub fn release(&self) {
        self.release.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl TaskStore for GatedFailStore {
    async fn add_task(
        &self,
        _owner: &OwnerId,
        _week: WeekId,
        _draft: NewTask,
    ) -> TaskStoreResult<TaskId> {
        Err(TaskStoreError::backend(std::io::Error::other(
            "add_task is not scripted for this store",
        )))
    }

    async fn tasks_for_week(&self, _owner: &OwnerId, _week: WeekId) -> TaskStoreResult<Vec<Task>> {
        Ok(self.seeded.clone())
    }

    async fn update_task(&self, _id: TaskId, _patch: TaskPatch) -> TaskStoreResult<()> {
        Ok(())
    }

    async fn delete_task(&self, _id: TaskId) -> TaskStoreResult<()> {
        Ok(())
    }

    async fn update_task_day(&self, _id: TaskId, _day: DayOfWeek) -> TaskStoreResult<()> {
        if self.block_next_day_update.swap(false, Ordering::SeqCst) {
            self.entered.store(true, Ordering::SeqCst);
            while !self.release.load(Ordering::SeqCst) {
                tokio::task::yield_now().await;
            }
            return Err(TaskStoreError::backend(std::io::Error::other(
                "injected day-update failure",
            )));
        }
        Ok(())
    }
}
