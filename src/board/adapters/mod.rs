//! Persistence adapters for the board module.
//!
//! This module provides concrete implementations of the [`TaskStore`] port,
//! following hexagonal architecture principles. Adapters handle all
//! infrastructure concerns (identifier assignment, timestamp formatting,
//! wire field casing) while the domain remains pure.
//!
//! # Available Adapters
//!
//! - [`memory::InMemoryTaskStore`]: thread-safe in-memory storage for
//!   development mode and unit testing
//! - [`sqlite::SqliteTaskStore`]: embedded `SQLite` persistence using
//!   Diesel ORM
//!
//! [`TaskStore`]: crate::board::ports::store::TaskStore

pub mod memory;
pub mod sqlite;
