//! Diesel schema for embedded task persistence.

diesel::table! {
    /// Week-scoped task records.
    tasks (id) {
        /// Task identifier (UUID, hyphenated text).
        id -> Text,
        /// Task title.
        title -> Text,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Day of week, canonical lowercase text.
        day -> Text,
        /// Status, canonical kebab-case text.
        status -> Text,
        /// Priority, canonical lowercase text.
        priority -> Text,
        /// Owner context the record belongs to.
        owner -> Text,
        /// Owning week identifier (`YYYY-MM-DD` of that week's Monday).
        week_id -> Text,
        /// Creation timestamp (RFC 3339 text).
        created_at -> Text,
        /// Last update timestamp (RFC 3339 text).
        updated_at -> Text,
    }
}
