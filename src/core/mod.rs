//! # Core Module
//!
//! Core domain types and configuration for the nudge bot.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial creation with config and preferences modules

pub mod config;
pub mod preferences;

// Re-export commonly used items
pub use config::Config;
pub use preferences::{Category, FrequencyBand, NudgeMode, TimeWindow, UserPreference};
