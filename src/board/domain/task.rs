//! Task aggregate root and related board cell types.

use super::{
    BoardDomainError, DayOfWeek, DropTarget, OwnerId, ParsePriorityError, ParseTaskStatusError,
    TaskId, WeekId,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Progress status of a task within its day column.
///
/// Together with [`DayOfWeek`] this determines the task's board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Task has not been started.
    Todo,
    /// Task is being worked on.
    InProgress,
    /// Task is finished.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical wire representation.
    ///
    /// Matches the drop-zone identifier segments, so `InProgress` renders as
    /// `in-progress` with an interior hyphen.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalised = value.trim().to_ascii_lowercase();
        match normalised.as_str() {
            "todo" => Ok(Self::Todo),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relative urgency of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Low urgency.
    Low,
    /// Default urgency.
    Medium,
    /// High urgency.
    High,
}

impl Priority {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalised = value.trim().to_ascii_lowercase();
        match normalised.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated payload for adding a task to the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: String,
    description: Option<String>,
    day: DayOfWeek,
    status: TaskStatus,
    priority: Priority,
}

impl NewTask {
    /// Creates a draft task with the required fields.
    ///
    /// Status defaults to [`TaskStatus::Todo`] and priority to
    /// [`Priority::Medium`].
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTitle`] when the title is empty
    /// after trimming.
    pub fn new(title: impl Into<String>, day: DayOfWeek) -> Result<Self, BoardDomainError> {
        let raw = title.into();
        let normalised = raw.trim();
        if normalised.is_empty() {
            return Err(BoardDomainError::EmptyTitle);
        }
        Ok(Self {
            title: normalised.to_owned(),
            description: None,
            day,
            status: TaskStatus::Todo,
            priority: Priority::Medium,
        })
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the day the task is scheduled on.
    #[must_use]
    pub const fn day(&self) -> DayOfWeek {
        self.day
    }

    /// Returns the initial status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }
}

/// Field-level partial update applied to an existing task.
///
/// Unset fields leave the stored value untouched. Mirrors the update payload
/// of the backend command surface, where day and status travel as
/// independent fields rather than a single atomic move.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    day: Option<DayOfWeek>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<Priority>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a patch updating only the day field.
    #[must_use]
    pub fn day_only(day: DayOfWeek) -> Self {
        Self {
            day: Some(day),
            ..Self::default()
        }
    }

    /// Creates a patch updating only the status field.
    #[must_use]
    pub fn status_only(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Sets a new title.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTitle`] when the title is empty
    /// after trimming.
    pub fn with_title(mut self, title: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = title.into();
        let normalised = raw.trim();
        if normalised.is_empty() {
            return Err(BoardDomainError::EmptyTitle);
        }
        self.title = Some(normalised.to_owned());
        Ok(self)
    }

    /// Sets a new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a new day.
    #[must_use]
    pub const fn with_day(mut self, day: DayOfWeek) -> Self {
        self.day = Some(day);
        self
    }

    /// Sets a new status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets a new priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Returns `true` when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.day.is_none()
            && self.status.is_none()
            && self.priority.is_none()
    }

    /// Returns the new title, if set.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the new description, if set.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the new day, if set.
    #[must_use]
    pub const fn day(&self) -> Option<DayOfWeek> {
        self.day
    }

    /// Returns the new status, if set.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the new priority, if set.
    #[must_use]
    pub const fn priority(&self) -> Option<Priority> {
        self.priority
    }
}

/// Snapshot of a task's board placement, captured before an optimistic move.
///
/// Restoring the snapshot is a full rollback of the move, including the
/// lifecycle timestamp the move bumped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// The day the task sat on when captured.
    pub day: DayOfWeek,
    /// The status the task held when captured.
    pub status: TaskStatus,
    /// The lifecycle timestamp when captured.
    pub updated_at: DateTime<Utc>,
}

/// Task aggregate root.
///
/// The `(day, status)` pair determines the task's board cell; a task belongs
/// to exactly one cell at a time. The canonical wire casing is snake_case
/// (`week_id`); the historical `weekId` casing is accepted on input only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    day: DayOfWeek,
    status: TaskStatus,
    priority: Priority,
    owner: OwnerId,
    #[serde(rename = "week_id", alias = "weekId")]
    week: WeekId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted day of week.
    pub day: DayOfWeek,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted owner context.
    pub owner: OwnerId,
    /// Persisted owning week.
    pub week: WeekId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task with a freshly generated identifier.
    ///
    /// Used by backing stores, which own identifier assignment.
    #[must_use]
    pub fn create(owner: OwnerId, week: WeekId, draft: NewTask, clock: &impl Clock) -> Self {
        Self::with_id(TaskId::new(), owner, week, draft, clock)
    }

    /// Creates a task with a caller-supplied identifier.
    ///
    /// Used for the local echo of an add operation, where the backing store
    /// has already assigned the identifier.
    #[must_use]
    pub fn with_id(
        id: TaskId,
        owner: OwnerId,
        week: WeekId,
        draft: NewTask,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        let NewTask {
            title,
            description,
            day,
            status,
            priority,
        } = draft;
        Self {
            id,
            title,
            description,
            day,
            status,
            priority,
            owner,
            week,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            day: data.day,
            status: data.status,
            priority: data.priority,
            owner: data.owner,
            week: data.week,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the day the task is scheduled on.
    #[must_use]
    pub const fn day(&self) -> DayOfWeek {
        self.day
    }

    /// Returns the task status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the owner context.
    #[must_use]
    pub const fn owner(&self) -> &OwnerId {
        &self.owner
    }

    /// Returns the owning week identifier.
    #[must_use]
    pub const fn week(&self) -> WeekId {
        self.week
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when the task already sits in the given cell.
    #[must_use]
    pub fn occupies(&self, target: DropTarget) -> bool {
        self.day == target.day && self.status == target.status
    }

    /// Captures the current board placement for a later rollback.
    #[must_use]
    pub const fn placement(&self) -> Placement {
        Placement {
            day: self.day,
            status: self.status,
            updated_at: self.updated_at,
        }
    }

    /// Restores a previously captured placement.
    ///
    /// This is the rollback path of an optimistic move; it reverts the cell
    /// and the lifecycle timestamp to the captured snapshot.
    pub fn restore_placement(&mut self, placement: Placement) {
        self.day = placement.day;
        self.status = placement.status;
        self.updated_at = placement.updated_at;
    }

    /// Moves the task to a new board cell.
    pub fn move_to(&mut self, target: DropTarget, clock: &impl Clock) {
        self.day = target.day;
        self.status = target.status;
        self.touch(clock);
    }

    /// Applies a field-level patch.
    ///
    /// An empty patch leaves the task untouched, including its lifecycle
    /// timestamp.
    pub fn apply(&mut self, patch: TaskPatch, clock: &impl Clock) {
        if patch.is_empty() {
            return;
        }
        let TaskPatch {
            title,
            description,
            day,
            status,
            priority,
        } = patch;
        if let Some(new_title) = title {
            self.title = new_title;
        }
        if let Some(new_description) = description {
            self.description = Some(new_description);
        }
        if let Some(new_day) = day {
            self.day = new_day;
        }
        if let Some(new_status) = status {
            self.status = new_status;
        }
        if let Some(new_priority) = priority {
            self.priority = new_priority;
        }
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
