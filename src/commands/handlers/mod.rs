//! # Command Handlers
//!
//! One handler per related group of slash commands.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

pub mod custom;
pub mod nudge_control;
pub mod onboarding;
pub mod utility;

pub use custom::CustomMessageHandler;
pub use nudge_control::NudgeControlHandler;
pub use onboarding::OnboardingHandler;
pub use utility::UtilityHandler;
