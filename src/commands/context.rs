//! Shared context for command handlers
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use std::sync::Arc;

use crate::database::Database;
use crate::features::nudges::NudgeScheduler;

/// Shared context for all command handlers
///
/// Contains the core services needed by the command handlers:
/// - Database for preference persistence
/// - NudgeScheduler for arming/cancelling per-user nudge chains
#[derive(Clone)]
pub struct CommandContext {
    pub database: Database,
    pub scheduler: Arc<NudgeScheduler>,
}

impl CommandContext {
    pub fn new(database: Database, scheduler: Arc<NudgeScheduler>) -> Self {
        Self {
            database,
            scheduler,
        }
    }
}
