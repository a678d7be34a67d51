//! In-memory task store for development mode and tests.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{NewTask, OwnerId, Task, TaskId, TaskPatch, WeekId},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
///
/// The mock backend of the original development mode: assigns identifiers
/// and timestamps itself and keeps a per-week index so week queries preserve
/// insertion order across equal timestamps.
#[derive(Debug, Clone)]
pub struct InMemoryTaskStore<C = DefaultClock> {
    state: Arc<RwLock<InMemoryStoreState>>,
    clock: Arc<C>,
}

#[derive(Debug, Default)]
struct InMemoryStoreState {
    tasks: HashMap<TaskId, Task>,
    week_index: HashMap<WeekId, Vec<TaskId>>,
}

impl InMemoryTaskStore {
    /// Creates an empty store using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> InMemoryTaskStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty store using the given clock.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryStoreState::default())),
            clock,
        }
    }
}

fn remove_from_week_index(index: &mut HashMap<WeekId, Vec<TaskId>>, task_id: TaskId, week: WeekId) {
    if let Some(ids) = index.get_mut(&week) {
        ids.retain(|id| *id != task_id);
        if ids.is_empty() {
            index.remove(&week);
        }
    }
}

/// Looks up the owner's tasks for a week in index (insertion) order, then
/// sorts by creation time; the stable sort keeps insertion order for ties.
fn tasks_in_week(state: &InMemoryStoreState, owner: &OwnerId, week: WeekId) -> Vec<Task> {
    let mut found: Vec<Task> = state
        .week_index
        .get(&week)
        .map(|ids| {
            ids.iter()
                .filter_map(|id| state.tasks.get(id))
                .filter(|task| task.owner() == owner)
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    found.sort_by_key(Task::created_at);
    found
}

#[async_trait]
impl<C> TaskStore for InMemoryTaskStore<C>
where
    C: Clock + Send + Sync,
{
    async fn add_task(
        &self,
        owner: &OwnerId,
        week: WeekId,
        draft: NewTask,
    ) -> TaskStoreResult<TaskId> {
        let mut state = self
            .state
            .write()
            .map_err(|err| TaskStoreError::backend(std::io::Error::other(err.to_string())))?;
        let task = Task::create(owner.clone(), week, draft, &*self.clock);
        let task_id = task.id();
        state.week_index.entry(week).or_default().push(task_id);
        state.tasks.insert(task_id, task);
        Ok(task_id)
    }

    async fn tasks_for_week(&self, owner: &OwnerId, week: WeekId) -> TaskStoreResult<Vec<Task>> {
        let state = self
            .state
            .read()
            .map_err(|err| TaskStoreError::backend(std::io::Error::other(err.to_string())))?;
        Ok(tasks_in_week(&state, owner, week))
    }

    async fn update_task(&self, id: TaskId, patch: TaskPatch) -> TaskStoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| TaskStoreError::backend(std::io::Error::other(err.to_string())))?;
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or(TaskStoreError::NotFound(id))?;
        task.apply(patch, &*self.clock);
        Ok(())
    }

    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| TaskStoreError::backend(std::io::Error::other(err.to_string())))?;
        let task = state.tasks.remove(&id).ok_or(TaskStoreError::NotFound(id))?;
        remove_from_week_index(&mut state.week_index, id, task.week());
        Ok(())
    }
}
