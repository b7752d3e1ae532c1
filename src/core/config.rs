//! Environment-driven configuration
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::{anyhow, Result};
use std::env;

/// Runtime configuration loaded once at startup.
///
/// `DISCORD_TOKEN` and `DATABASE_PATH` are required; a missing value is a
/// fatal startup error. `LOG_LEVEL` defaults to `info`. `DISCORD_GUILD_ID`
/// switches slash command registration to a single guild for development
/// (instant updates instead of global propagation).
#[derive(Clone, Debug)]
pub struct Config {
    pub discord_token: String,
    pub database_path: String,
    pub log_level: String,
    pub discord_guild_id: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let discord_token = env::var("DISCORD_TOKEN")
            .map_err(|_| anyhow!("DISCORD_TOKEN environment variable must be set"))?;
        let database_path = env::var("DATABASE_PATH")
            .map_err(|_| anyhow!("DATABASE_PATH environment variable must be set"))?;
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let discord_guild_id = env::var("DISCORD_GUILD_ID").ok().filter(|s| !s.is_empty());

        if discord_token.trim().is_empty() {
            return Err(anyhow!("DISCORD_TOKEN is set but empty"));
        }

        Ok(Config {
            discord_token,
            database_path,
            log_level,
            discord_guild_id,
        })
    }
}
