//! Weekboard: weekly task planning core.
//!
//! This crate provides the state-synchronisation core of a weekly task
//! planner: tasks live in day-of-week × status cells on a week-scoped board,
//! are moved between cells by drag-and-drop, and are persisted through an
//! interchangeable backing store with optimistic local mutation and rollback
//! on failure.
//!
//! # Architecture
//!
//! Weekboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`board`]: week-scoped board state, drop-target resolution, and
//!   optimistic drag reconciliation over a pluggable task store

pub mod board;
