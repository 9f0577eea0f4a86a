//! State module for tracking walk progress
//!
//! # Components
//!
//! - `WalkState`: the phase of the page currently being processed
//! - `StopReason`: why a walk reached its terminal state
//! - `PageCursor`: the walker's position in the pagination sequence

mod cursor;
mod walk_state;

// Re-export main types
pub use cursor::PageCursor;
pub use walk_state::{StopReason, WalkState};
