//! # Features Layer
//!
//! Feature modules for the nudge bot.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

pub mod messages;
pub mod nudges;

// Re-export feature items
pub use messages::{select, Selection};
pub use nudges::{FireDecision, FireOutcome, NudgeScheduler};
