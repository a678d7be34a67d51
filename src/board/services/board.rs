//! Board state service: week-scoped task state, CRUD, and drag
//! reconciliation over a pluggable task store.

use crate::board::{
    domain::{
        DayOfWeek, DragEndEvent, DropTarget, NewTask, OwnerId, Placement, Task, TaskId, TaskPatch,
        TaskStatus, WeekDay, WeekId,
    },
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;

/// Service-level errors for board operations.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),

    /// The board state lock was poisoned by a panicking writer.
    #[error("board state lock poisoned: {0}")]
    State(String),
}

/// Result type for board service operations.
pub type BoardResult<T> = Result<T, BoardError>;

/// Outcome of reconciling a completed drag gesture.
///
/// Backend failures during a move are reported here rather than as errors:
/// the board has already resolved them with a local rollback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// The drag was released outside every drop zone; nothing happened.
    NoTarget,
    /// The drop-zone identifier did not resolve; nothing happened.
    UnresolvedZone,
    /// The dragged task is no longer on the board; nothing happened.
    UnknownTask,
    /// The task was dropped onto the cell it already occupies; no write was
    /// issued.
    AlreadyInPlace,
    /// The move was applied locally and persisted.
    Moved,
    /// Persistence failed and the task was reverted to its prior cell.
    RolledBack,
    /// Persistence failed, but a newer move had already superseded this one;
    /// the stale rollback was discarded.
    SupersededRollback,
}

/// Result of optimistically applying a move to board state.
enum MoveApplication {
    /// The task is not on the board.
    Unknown,
    /// The task already occupies the target cell.
    InPlace,
    /// The move was applied; the snapshot and generation guard the rollback.
    Applied {
        snapshot: Placement,
        generation: u64,
    },
}

/// Board state: the tasks of the week in view.
struct BoardState {
    week: WeekId,
    tasks: HashMap<TaskId, Task>,
    /// Per-task move counters; a rollback only applies while its captured
    /// generation is still current, so a delayed failure can never clobber a
    /// newer move.
    generations: HashMap<TaskId, u64>,
}

/// Week-scoped board orchestration service.
///
/// Source of truth for the UI: holds the tasks of the week in view, applies
/// drag moves optimistically, persists them through the [`TaskStore`] port,
/// and rolls back on failure. No lock is held across a store call.
pub struct BoardService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    owner: OwnerId,
    state: RwLock<BoardState>,
}

impl<S, C> BoardService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    /// Creates a board service viewing the week containing the reference
    /// date.
    ///
    /// The board starts empty; call [`BoardService::load_week`] to populate
    /// it from the store.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>, owner: OwnerId, reference_date: NaiveDate) -> Self {
        Self {
            store,
            clock,
            owner,
            state: RwLock::new(BoardState {
                week: WeekId::containing(reference_date),
                tasks: HashMap::new(),
                generations: HashMap::new(),
            }),
        }
    }

    /// Returns the owner context this board serves.
    #[must_use]
    pub const fn owner(&self) -> &OwnerId {
        &self.owner
    }

    /// Returns the identifier of the week in view.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::State`] when the state lock is poisoned.
    pub fn week(&self) -> BoardResult<WeekId> {
        Ok(self.read_state()?.week)
    }

    /// Returns the seven day entries of the week in view, Monday first.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::State`] when the state lock is poisoned.
    pub fn week_days(&self) -> BoardResult<[WeekDay; 7]> {
        Ok(self.week()?.week_days())
    }

    /// Returns all tasks on the board, ordered by creation time.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::State`] when the state lock is poisoned.
    pub fn tasks(&self) -> BoardResult<Vec<Task>> {
        let state = self.read_state()?;
        Ok(sorted_by_creation(state.tasks.values().cloned().collect()))
    }

    /// Returns the board task with the given identifier, if present.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::State`] when the state lock is poisoned.
    pub fn task(&self, id: TaskId) -> BoardResult<Option<Task>> {
        Ok(self.read_state()?.tasks.get(&id).cloned())
    }

    /// Returns the tasks scheduled on the given day, ordered by creation
    /// time.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::State`] when the state lock is poisoned.
    pub fn tasks_for_day(&self, day: DayOfWeek) -> BoardResult<Vec<Task>> {
        let state = self.read_state()?;
        Ok(sorted_by_creation(
            state
                .tasks
                .values()
                .filter(|task| task.day() == day)
                .cloned()
                .collect(),
        ))
    }

    /// Returns the tasks in the given board cell, ordered by creation time.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::State`] when the state lock is poisoned.
    pub fn tasks_in_cell(&self, day: DayOfWeek, status: TaskStatus) -> BoardResult<Vec<Task>> {
        let state = self.read_state()?;
        Ok(sorted_by_creation(
            state
                .tasks
                .values()
                .filter(|task| task.day() == day && task.status() == status)
                .cloned()
                .collect(),
        ))
    }

    /// Replaces board state with the store's records for the week in view.
    ///
    /// A failing read is logged and yields an empty board rather than an
    /// error; the caller cannot distinguish it from a week with no records.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::State`] when the state lock is poisoned.
    pub async fn load_week(&self) -> BoardResult<()> {
        let week = self.week()?;
        let fetched = match self.store.tasks_for_week(&self.owner, week).await {
            Ok(found) => found,
            Err(err) => {
                tracing::warn!(week = %week, error = %err, "failed to load tasks, showing an empty board");
                Vec::new()
            }
        };
        let mut state = self.write_state()?;
        state.tasks = fetched.into_iter().map(|task| (task.id(), task)).collect();
        state.generations.clear();
        Ok(())
    }

    /// Moves the view to the following week and reloads the board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::State`] when the state lock is poisoned.
    pub async fn go_to_next_week(&self) -> BoardResult<()> {
        {
            let mut state = self.write_state()?;
            state.week = state.week.next();
        }
        self.load_week().await
    }

    /// Moves the view to the preceding week and reloads the board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::State`] when the state lock is poisoned.
    pub async fn go_to_previous_week(&self) -> BoardResult<()> {
        {
            let mut state = self.write_state()?;
            state.week = state.week.previous();
        }
        self.load_week().await
    }

    /// Adds a task to the week in view.
    ///
    /// The store assigns the identifier; the returned task is the local echo
    /// inserted into board state, replaced by the canonical record on the
    /// next reload.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Store`] when persistence fails and
    /// [`BoardError::State`] when the state lock is poisoned.
    pub async fn add_task(&self, draft: NewTask) -> BoardResult<Task> {
        let week = self.week()?;
        let task_id = self
            .store
            .add_task(&self.owner, week, draft.clone())
            .await?;
        let task = Task::with_id(task_id, self.owner.clone(), week, draft, &*self.clock);
        let mut state = self.write_state()?;
        state.tasks.insert(task.id(), task.clone());
        Ok(task)
    }

    /// Updates a task's fields, persisting before mutating board state.
    ///
    /// Unlike a drag move, the form-edit path is not optimistic: local state
    /// changes only after the store confirms.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Store`] when persistence fails and
    /// [`BoardError::State`] when the state lock is poisoned.
    pub async fn update_task(&self, id: TaskId, patch: TaskPatch) -> BoardResult<()> {
        self.store.update_task(id, patch.clone()).await?;
        let mut state = self.write_state()?;
        if let Some(task) = state.tasks.get_mut(&id) {
            task.apply(patch, &*self.clock);
        }
        Ok(())
    }

    /// Deletes a task, removing it from board state and every day/status
    /// grouping simultaneously.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Store`] when persistence fails and
    /// [`BoardError::State`] when the state lock is poisoned.
    pub async fn delete_task(&self, id: TaskId) -> BoardResult<()> {
        self.store.delete_task(id).await?;
        let mut state = self.write_state()?;
        state.tasks.remove(&id);
        state.generations.remove(&id);
        Ok(())
    }

    /// Reconciles a completed drag gesture with the store.
    ///
    /// Resolves the drop zone, applies the move to board state immediately,
    /// then persists it as two sequential field updates (day, then status).
    /// On failure the pre-move placement is restored, unless a newer move on
    /// the same task has superseded this one. Backend failures surface as
    /// [`DragOutcome`] variants, never as errors.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::State`] when the state lock is poisoned.
    pub async fn complete_drag(&self, event: DragEndEvent) -> BoardResult<DragOutcome> {
        let (task_id, zone) = event.into_parts();
        let Some(zone_id) = zone else {
            tracing::debug!(task = %task_id, "drag released outside any drop zone");
            return Ok(DragOutcome::NoTarget);
        };
        let target = match DropTarget::resolve(&zone_id) {
            Ok(resolved) => resolved,
            Err(err) => {
                tracing::warn!(task = %task_id, zone = %zone_id, error = %err, "ignoring drop on unresolvable zone");
                return Ok(DragOutcome::UnresolvedZone);
            }
        };

        let (snapshot, generation) = match self.apply_move(task_id, target)? {
            MoveApplication::Unknown => {
                tracing::debug!(task = %task_id, "dragged task is no longer on the board");
                return Ok(DragOutcome::UnknownTask);
            }
            MoveApplication::InPlace => return Ok(DragOutcome::AlreadyInPlace),
            MoveApplication::Applied {
                snapshot,
                generation,
            } => (snapshot, generation),
        };

        match self.persist_move(task_id, target).await {
            Ok(()) => Ok(DragOutcome::Moved),
            Err(err) => {
                tracing::warn!(task = %task_id, target = %target, error = %err, "move persistence failed, rolling back");
                self.rollback_move(task_id, snapshot, generation)
            }
        }
    }

    /// Applies a move to board state and bumps the task's move generation.
    fn apply_move(&self, id: TaskId, target: DropTarget) -> BoardResult<MoveApplication> {
        let mut state = self.write_state()?;
        let Some(task) = state.tasks.get_mut(&id) else {
            return Ok(MoveApplication::Unknown);
        };
        if task.occupies(target) {
            return Ok(MoveApplication::InPlace);
        }
        let snapshot = task.placement();
        task.move_to(target, &*self.clock);
        let generation = state.generations.entry(id).or_insert(0);
        *generation += 1;
        Ok(MoveApplication::Applied {
            snapshot,
            generation: *generation,
        })
    }

    /// Persists a move as two independent field updates, day first.
    async fn persist_move(&self, id: TaskId, target: DropTarget) -> TaskStoreResult<()> {
        self.store.update_task_day(id, target.day).await?;
        self.store.update_task_status(id, target.status).await
    }

    /// Restores the pre-move placement unless a newer move has superseded
    /// the captured generation.
    fn rollback_move(
        &self,
        id: TaskId,
        snapshot: Placement,
        generation: u64,
    ) -> BoardResult<DragOutcome> {
        let mut state = self.write_state()?;
        if state.generations.get(&id).copied() != Some(generation) {
            tracing::debug!(task = %id, "discarding stale rollback, a newer move superseded it");
            return Ok(DragOutcome::SupersededRollback);
        }
        if let Some(task) = state.tasks.get_mut(&id) {
            task.restore_placement(snapshot);
        }
        Ok(DragOutcome::RolledBack)
    }

    fn read_state(&self) -> BoardResult<RwLockReadGuard<'_, BoardState>> {
        self.state
            .read()
            .map_err(|err| BoardError::State(err.to_string()))
    }

    fn write_state(&self) -> BoardResult<RwLockWriteGuard<'_, BoardState>> {
        self.state
            .write()
            .map_err(|err| BoardError::State(err.to_string()))
    }
}

/// Orders tasks by creation time; the stable sort keeps prior order for
/// equal timestamps.
fn sorted_by_creation(mut tasks: Vec<Task>) -> Vec<Task> {
    tasks.sort_by_key(Task::created_at);
    tasks
}
