//! Diesel row models for task persistence.

use super::schema::tasks;
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TaskRow {
    /// Task identifier.
    pub id: String,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Day of week.
    pub day: String,
    /// Status.
    pub status: String,
    /// Priority.
    pub priority: String,
    /// Owner context.
    pub owner: String,
    /// Owning week identifier.
    pub week_id: String,
    /// Creation timestamp, RFC 3339.
    pub created_at: String,
    /// Last update timestamp, RFC 3339.
    pub updated_at: String,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: String,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Day of week.
    pub day: String,
    /// Status.
    pub status: String,
    /// Priority.
    pub priority: String,
    /// Owner context.
    pub owner: String,
    /// Owning week identifier.
    pub week_id: String,
    /// Creation timestamp, RFC 3339.
    pub created_at: String,
    /// Last update timestamp, RFC 3339.
    pub updated_at: String,
}

/// Field-level update model; unset fields are skipped by Diesel.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangeset {
    /// New title, if set.
    pub title: Option<String>,
    /// New description, if set.
    pub description: Option<String>,
    /// New day, if set.
    pub day: Option<String>,
    /// New status, if set.
    pub status: Option<String>,
    /// New priority, if set.
    pub priority: Option<String>,
    /// New update timestamp; set on every non-empty patch.
    pub updated_at: Option<String>,
}
