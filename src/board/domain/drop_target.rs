//! Drop-zone identifier resolution for drag-and-drop moves.

use super::{DayOfWeek, DropZoneError, TaskId, TaskStatus};
use std::fmt;

/// Status suffixes checked in fixed priority order.
///
/// `in-progress` must be checked first: its interior hyphen means a naive
/// first-hyphen split of `monday-in-progress` would yield day `monday` and
/// status `in`.
const STATUS_SUFFIX_ORDER: [TaskStatus; 3] = [
    TaskStatus::InProgress,
    TaskStatus::Todo,
    TaskStatus::Completed,
];

/// The `(day, status)` cell a dragged task is released onto.
///
/// Decoded from a UI-level drop-zone identifier of the form
/// `"<day>-<status>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DropTarget {
    /// The target day column.
    pub day: DayOfWeek,
    /// The target status row within the day.
    pub status: TaskStatus,
}

impl DropTarget {
    /// Creates a target from its parts.
    #[must_use]
    pub const fn new(day: DayOfWeek, status: TaskStatus) -> Self {
        Self { day, status }
    }

    /// Resolves a raw drop-zone identifier into a `(day, status)` target.
    ///
    /// Checks the enumerated status suffixes in priority order, strips the
    /// matched suffix, and parses the remainder as a day of the week. An
    /// identifier matching no enumerated suffix is rejected outright rather
    /// than lossily split on the first hyphen.
    ///
    /// # Errors
    ///
    /// Returns [`DropZoneError::UnknownStatusSuffix`] when no enumerated
    /// suffix matches and [`DropZoneError::UnknownDay`] when the prefix is
    /// not a day of the week.
    pub fn resolve(zone: &str) -> Result<Self, DropZoneError> {
        for status in STATUS_SUFFIX_ORDER {
            let Some(day_part) = zone
                .strip_suffix(status.as_str())
                .and_then(|rest| rest.strip_suffix('-'))
            else {
                continue;
            };
            let day = DayOfWeek::try_from(day_part).map_err(|_parse_err| {
                DropZoneError::UnknownDay {
                    zone: zone.to_owned(),
                    day: day_part.to_owned(),
                }
            })?;
            return Ok(Self { day, status });
        }
        Err(DropZoneError::UnknownStatusSuffix(zone.to_owned()))
    }
}

impl fmt::Display for DropTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.day.as_str(), self.status.as_str())
    }
}

/// Completion of a drag gesture as reported by the UI layer.
///
/// Carries the dragged task identifier and the zone the task was released
/// over, if any; a drag cancelled outside every zone carries no zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragEndEvent {
    task_id: TaskId,
    zone: Option<String>,
}

impl DragEndEvent {
    /// Creates an event for a task released over a drop zone.
    #[must_use]
    pub fn new(task_id: TaskId, zone: impl Into<String>) -> Self {
        Self {
            task_id,
            zone: Some(zone.into()),
        }
    }

    /// Creates an event for a drag released outside every drop zone.
    #[must_use]
    pub const fn outside(task_id: TaskId) -> Self {
        Self {
            task_id,
            zone: None,
        }
    }

    /// Returns the dragged task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the raw zone identifier, if the task was released over one.
    #[must_use]
    pub fn zone(&self) -> Option<&str> {
        self.zone.as_deref()
    }

    /// Decomposes the event into its parts.
    #[must_use]
    pub fn into_parts(self) -> (TaskId, Option<String>) {
        (self.task_id, self.zone)
    }
}
