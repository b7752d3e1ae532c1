// Core layer - shared types and configuration
pub mod core;

// Features layer - message selection and nudge scheduling
pub mod features;

// UI components - onboarding buttons and menu views
pub mod message_components;

// Infrastructure
pub mod database;

// Application layer
pub mod command_handler;
pub mod commands;

// Re-export core config and domain types
pub use core::{Category, Config, FrequencyBand, NudgeMode, TimeWindow, UserPreference};

// Re-export feature items
pub use features::{FireOutcome, NudgeScheduler};
