//! # Messages Feature
//!
//! Nudge message pools and random selection.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod selector;

pub use selector::{select, Selection, GENERAL_POOL, SECURITY_POOL};
