//! # Database Module
//!
//! SQLite persistence for user preference records and custom nudge messages.
//!
//! One row per user, keyed by Discord user id. Writes are upserts so
//! re-running onboarding overwrites prior values instead of duplicating
//! rows. Defaulting for unknown or legacy stored values happens in
//! [`Database::get_user`], not in SQL.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

use anyhow::{anyhow, Result};
use log::{debug, info};
use sqlite::{Connection, State};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::core::preferences::{Category, FrequencyBand, NudgeMode, TimeWindow, UserPreference};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    user_id TEXT PRIMARY KEY,
    display_name TEXT NOT NULL DEFAULT '',
    category TEXT NOT NULL DEFAULT 'general',
    time_window TEXT NOT NULL DEFAULT 'fullday',
    frequency TEXT NOT NULL DEFAULT 'medium',
    nudge_mode TEXT NOT NULL DEFAULT 'standard',
    active INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS custom_messages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    message TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_custom_messages_user
    ON custom_messages(user_id);
";

/// Cloneable handle to the SQLite connection.
///
/// All access serializes through a single async mutex; each public method is
/// one atomic read-or-write against the store.
#[derive(Clone)]
pub struct Database {
    connection: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the database at `path` and apply the schema.
    ///
    /// Use `:memory:` for an ephemeral database in tests.
    pub async fn new(path: &str) -> Result<Self> {
        let connection = sqlite::open(path)
            .map_err(|e| anyhow!("Failed to open database at {path}: {e}"))?;
        connection.execute(SCHEMA)?;
        info!("Database ready at {path}");

        Ok(Database {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Fetch a user's preference record, applying defaults for any stored
    /// value that no longer parses.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<UserPreference>> {
        let connection = self.connection.lock().await;
        let mut statement = connection.prepare(
            "SELECT user_id, display_name, category, time_window, frequency, nudge_mode, active
             FROM users WHERE user_id = ?",
        )?;
        statement.bind((1, user_id))?;

        if let State::Row = statement.next()? {
            let record = UserPreference {
                user_id: statement.read::<String, _>("user_id")?,
                display_name: statement.read::<String, _>("display_name")?,
                category: Category::parse(&statement.read::<String, _>("category")?)
                    .unwrap_or_default(),
                time_window: TimeWindow::parse(&statement.read::<String, _>("time_window")?)
                    .unwrap_or_default(),
                frequency: FrequencyBand::parse(&statement.read::<String, _>("frequency")?)
                    .unwrap_or_default(),
                nudge_mode: NudgeMode::parse(&statement.read::<String, _>("nudge_mode")?)
                    .unwrap_or_default(),
                active: statement.read::<i64, _>("active")? != 0,
            };
            Ok(Some(record))
        } else {
            Ok(None)
        }
    }

    /// Create the user row if missing, refreshing the display name either way.
    pub async fn upsert_user(&self, user_id: &str, display_name: &str) -> Result<()> {
        let connection = self.connection.lock().await;
        let mut statement = connection.prepare(
            "INSERT INTO users (user_id, display_name) VALUES (?, ?)
             ON CONFLICT(user_id) DO UPDATE SET
                 display_name = excluded.display_name,
                 updated_at = datetime('now')",
        )?;
        statement.bind((1, user_id))?;
        statement.bind((2, display_name))?;
        statement.next()?;
        debug!("Upserted user {user_id}");
        Ok(())
    }

    pub async fn set_category(&self, user_id: &str, category: Category) -> Result<()> {
        self.set_field(user_id, "category", category.as_str()).await
    }

    pub async fn set_time_window(&self, user_id: &str, window: TimeWindow) -> Result<()> {
        self.set_field(user_id, "time_window", window.as_str()).await
    }

    pub async fn set_frequency(&self, user_id: &str, band: FrequencyBand) -> Result<()> {
        self.set_field(user_id, "frequency", band.as_str()).await
    }

    pub async fn set_nudge_mode(&self, user_id: &str, mode: NudgeMode) -> Result<()> {
        self.set_field(user_id, "nudge_mode", mode.as_str()).await
    }

    /// Flip the active flag. The scheduler re-reads this on every fire, so
    /// clearing it is the authoritative cancellation signal.
    pub async fn set_active(&self, user_id: &str, active: bool) -> Result<()> {
        let connection = self.connection.lock().await;
        let mut statement = connection.prepare(
            "UPDATE users SET active = ?, updated_at = datetime('now') WHERE user_id = ?",
        )?;
        statement.bind((1, active as i64))?;
        statement.bind((2, user_id))?;
        statement.next()?;
        Ok(())
    }

    /// Remove the user row and any custom messages.
    pub async fn delete_user(&self, user_id: &str) -> Result<()> {
        let connection = self.connection.lock().await;
        let mut statement = connection.prepare("DELETE FROM users WHERE user_id = ?")?;
        statement.bind((1, user_id))?;
        statement.next()?;

        let mut statement =
            connection.prepare("DELETE FROM custom_messages WHERE user_id = ?")?;
        statement.bind((1, user_id))?;
        statement.next()?;
        info!("Deleted user {user_id}");
        Ok(())
    }

    /// User ids with nudges active, for re-arming schedules at startup.
    pub async fn active_user_ids(&self) -> Result<Vec<String>> {
        let connection = self.connection.lock().await;
        let mut statement =
            connection.prepare("SELECT user_id FROM users WHERE active = 1")?;

        let mut ids = Vec::new();
        while let State::Row = statement.next()? {
            ids.push(statement.read::<String, _>("user_id")?);
        }
        Ok(ids)
    }

    /// Append one user-supplied nudge message.
    pub async fn add_custom_message(&self, user_id: &str, message: &str) -> Result<()> {
        let connection = self.connection.lock().await;
        let mut statement =
            connection.prepare("INSERT INTO custom_messages (user_id, message) VALUES (?, ?)")?;
        statement.bind((1, user_id))?;
        statement.bind((2, message))?;
        statement.next()?;
        Ok(())
    }

    /// The user's custom messages in insertion order.
    pub async fn get_custom_messages(&self, user_id: &str) -> Result<Vec<String>> {
        let connection = self.connection.lock().await;
        let mut statement = connection
            .prepare("SELECT message FROM custom_messages WHERE user_id = ? ORDER BY id")?;
        statement.bind((1, user_id))?;

        let mut messages = Vec::new();
        while let State::Row = statement.next()? {
            messages.push(statement.read::<String, _>("message")?);
        }
        Ok(messages)
    }

    /// Delete all of the user's custom messages, returning how many existed.
    pub async fn clear_custom_messages(&self, user_id: &str) -> Result<usize> {
        let messages = self.get_custom_messages(user_id).await?;
        let connection = self.connection.lock().await;
        let mut statement =
            connection.prepare("DELETE FROM custom_messages WHERE user_id = ?")?;
        statement.bind((1, user_id))?;
        statement.next()?;
        Ok(messages.len())
    }

    /// Update one preference column for an existing user. The column name is
    /// fixed by the caller, never user input.
    async fn set_field(&self, user_id: &str, column: &str, value: &str) -> Result<()> {
        let connection = self.connection.lock().await;
        let mut statement = connection.prepare(&format!(
            "UPDATE users SET {column} = ?, updated_at = datetime('now') WHERE user_id = ?"
        ))?;
        statement.bind((1, value))?;
        statement.bind((2, user_id))?;
        statement.next()?;
        debug!("Set {column} for user {user_id}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> Database {
        Database::new(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn test_get_missing_user_returns_none() {
        let db = test_db().await;
        assert!(db.get_user("42").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_applies_defaults_at_read() {
        let db = test_db().await;
        db.upsert_user("42", "Sneha").await.unwrap();

        let user = db.get_user("42").await.unwrap().unwrap();
        assert_eq!(user.user_id, "42");
        assert_eq!(user.display_name, "Sneha");
        assert_eq!(user.category, Category::General);
        assert_eq!(user.time_window, TimeWindow::FullDay);
        assert_eq!(user.frequency, FrequencyBand::Medium);
        assert_eq!(user.nudge_mode, NudgeMode::Standard);
        assert!(!user.active);
    }

    #[tokio::test]
    async fn test_upsert_is_idempotent() {
        let db = test_db().await;
        db.upsert_user("42", "Sneha").await.unwrap();
        db.set_category("42", Category::Security).await.unwrap();
        // Second onboarding pass: same key, no duplicate row, fields survive
        db.upsert_user("42", "Sneha").await.unwrap();

        let user = db.get_user("42").await.unwrap().unwrap();
        assert_eq!(user.category, Category::Security);

        let active = db.active_user_ids().await.unwrap();
        assert!(active.is_empty());
    }

    #[tokio::test]
    async fn test_field_setters_round_trip() {
        let db = test_db().await;
        db.upsert_user("42", "Sneha").await.unwrap();
        db.set_category("42", Category::Both).await.unwrap();
        db.set_time_window("42", TimeWindow::Morning).await.unwrap();
        db.set_frequency("42", FrequencyBand::Short).await.unwrap();
        db.set_nudge_mode("42", NudgeMode::Mixed).await.unwrap();

        let user = db.get_user("42").await.unwrap().unwrap();
        assert_eq!(user.category, Category::Both);
        assert_eq!(user.time_window, TimeWindow::Morning);
        assert_eq!(user.frequency, FrequencyBand::Short);
        assert_eq!(user.nudge_mode, NudgeMode::Mixed);
    }

    #[tokio::test]
    async fn test_active_flag_and_listing() {
        let db = test_db().await;
        db.upsert_user("1", "A").await.unwrap();
        db.upsert_user("2", "B").await.unwrap();
        db.set_active("1", true).await.unwrap();

        let active = db.active_user_ids().await.unwrap();
        assert_eq!(active, vec!["1".to_string()]);

        db.set_active("1", false).await.unwrap();
        assert!(db.active_user_ids().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_custom_messages_lifecycle() {
        let db = test_db().await;
        db.upsert_user("42", "Sneha").await.unwrap();
        db.add_custom_message("42", "Do one THM room").await.unwrap();
        db.add_custom_message("42", "Review flashcards").await.unwrap();

        let messages = db.get_custom_messages("42").await.unwrap();
        assert_eq!(messages, vec!["Do one THM room", "Review flashcards"]);

        let cleared = db.clear_custom_messages("42").await.unwrap();
        assert_eq!(cleared, 2);
        assert!(db.get_custom_messages("42").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_user_removes_everything() {
        let db = test_db().await;
        db.upsert_user("42", "Sneha").await.unwrap();
        db.add_custom_message("42", "hi").await.unwrap();
        db.delete_user("42").await.unwrap();

        assert!(db.get_user("42").await.unwrap().is_none());
        assert!(db.get_custom_messages("42").await.unwrap().is_empty());
    }
}
