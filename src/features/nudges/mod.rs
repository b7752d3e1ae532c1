//! # Nudges Feature
//!
//! Per-user self-re-arming nudge schedules.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: true

pub mod scheduler;

pub use scheduler::{decide, FireDecision, FireOutcome, NudgeScheduler};
