//! Unit and orchestration tests for the board context.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

mod drag_tests;
mod drop_target_tests;
mod support;
