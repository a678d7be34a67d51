//! Error types for board domain validation and parsing.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned while constructing domain board values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The owner context is empty after trimming.
    #[error("owner context must not be empty")]
    EmptyOwner,

    /// The week identifier does not fall on a Monday.
    #[error("week identifier {0} does not fall on a Monday")]
    NotWeekStart(NaiveDate),

    /// The week identifier is not a calendar date.
    #[error("invalid week identifier '{0}', expected YYYY-MM-DD")]
    InvalidWeekId(String),
}

/// Errors returned while resolving a drop-zone identifier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DropZoneError {
    /// The identifier does not end in any enumerated status suffix.
    #[error("drop zone '{0}' does not end in a recognised status suffix")]
    UnknownStatusSuffix(String),

    /// The prefix before the status suffix is not a day of the week.
    #[error("drop zone '{zone}' names unknown day '{day}'")]
    UnknownDay {
        /// The full zone identifier as received.
        zone: String,
        /// The unrecognised day prefix.
        day: String,
    },
}

/// Error returned while parsing day-of-week values from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown day of week: {0}")]
pub struct ParseDayError(pub String);

/// Error returned while parsing task status values from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priority values from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);
