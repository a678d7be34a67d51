//! Week-scoped task board for Weekboard.
//!
//! This module implements the planner core: a board of day-of-week × status
//! cells holding tasks for the week in view, a resolver that decodes
//! drag-and-drop zone identifiers into `(day, status)` targets, and an
//! optimistic mutation coordinator that applies moves locally, persists them
//! through a pluggable store, and rolls back on failure. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
