//! Application services for board orchestration.

mod board;

pub use board::{BoardError, BoardResult, BoardService, DragOutcome};
