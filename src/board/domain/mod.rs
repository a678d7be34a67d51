//! Domain model for the weekly task board.
//!
//! The board domain models week-scoped tasks, the day × status cells they
//! occupy, drop-target resolution, and week derivation while keeping all
//! infrastructure concerns outside of the domain boundary.

mod day;
mod drop_target;
mod error;
mod ids;
mod task;
mod week;

pub use day::DayOfWeek;
pub use drop_target::{DragEndEvent, DropTarget};
pub use error::{
    BoardDomainError, DropZoneError, ParseDayError, ParsePriorityError, ParseTaskStatusError,
};
pub use ids::{OwnerId, TaskId};
pub use task::{NewTask, PersistedTaskData, Placement, Priority, Task, TaskPatch, TaskStatus};
pub use week::{WeekDay, WeekId};
