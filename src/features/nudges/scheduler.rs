//! Nudge scheduler
//!
//! Each active user owns one timer chain: a task that sleeps, fires, and
//! re-arms itself with a fresh random delay. Re-arming from inside the fire
//! (instead of a periodic timer) means a frequency change between firings
//! takes effect without cancelling anything.
//!
//! Cancellation is two-layered. `stop_nudges` aborts the pending sleep, but
//! the authoritative signal is the stored record: every fire re-reads it and
//! ends the chain when the row is gone or marked inactive, so an in-flight
//! fire racing a stop delivers at most one more message and never re-arms.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use chrono::{Local, NaiveTime};
use dashmap::DashMap;
use log::{debug, error, info};
use serenity::http::Http;
use serenity::model::id::UserId;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::core::preferences::{NudgeMode, UserPreference};
use crate::database::Database;
use crate::features::messages;

/// Delay before the first fire after activation, for responsiveness.
pub const INITIAL_FIRE_DELAY: Duration = Duration::from_secs(5);

/// Re-check cadence while outside the user's time window. The frequency
/// band only governs in-window spacing.
pub const OUT_OF_WINDOW_PROBE: Duration = Duration::from_secs(30 * 60);

const FALLBACK_NOTICE: &str = "ℹ️ You're set to your own messages, but your list is empty. \
     I used a built-in nudge instead — add some with /addnudge.";

/// What a fire decided to do next.
#[derive(Debug, PartialEq, Eq)]
pub enum FireOutcome {
    /// Schedule the next fire after this delay.
    Rearm(Duration),
    /// End the chain; the user is gone or deactivated.
    Stop,
}

/// Pure eligibility decision for one fire, separated from the clock read
/// and the delivery I/O so it can be checked at any time of day.
#[derive(Debug, PartialEq, Eq)]
pub enum FireDecision {
    /// User deactivated; end the chain.
    Stop,
    /// Outside the window: no send, re-check after the fixed probe delay.
    Skip,
    /// Inside the window: send now, then re-arm from the frequency band.
    Send,
}

/// Decide what a fire at local time `now` should do for this user.
pub fn decide(user: &UserPreference, now: NaiveTime) -> FireDecision {
    if !user.active {
        return FireDecision::Stop;
    }
    if !user.time_window.contains(now) {
        return FireDecision::Skip;
    }
    FireDecision::Send
}

/// Owns the pending timer chains, one per active user.
pub struct NudgeScheduler {
    database: Database,
    pending: DashMap<u64, JoinHandle<()>>,
}

impl NudgeScheduler {
    pub fn new(database: Database) -> Self {
        NudgeScheduler {
            database,
            pending: DashMap::new(),
        }
    }

    /// Whether a chain is currently armed for this user.
    pub fn is_scheduled(&self, user_id: u64) -> bool {
        self.pending
            .get(&user_id)
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Arm a chain with a near-term first fire. Replaces any existing chain
    /// for the user, so repeated activation never doubles up.
    pub fn start_nudges(self: &Arc<Self>, http: Arc<Http>, user_id: u64) {
        info!("Starting nudge chain for user {user_id}");
        self.arm(http, user_id, INITIAL_FIRE_DELAY);
    }

    /// Abort the pending fire, if any. Callers clear the stored active flag
    /// first; an already-executing fire checks that flag before re-arming.
    pub fn stop_nudges(&self, user_id: u64) {
        if let Some((_, handle)) = self.pending.remove(&user_id) {
            handle.abort();
            info!("Stopped nudge chain for user {user_id}");
        }
    }

    /// Re-arm chains for every user marked active, after a restart. Uses the
    /// probe delay rather than the near-term fire to avoid a thundering herd
    /// of messages right at boot.
    pub async fn resume_active(self: &Arc<Self>, http: Arc<Http>) {
        match self.database.active_user_ids().await {
            Ok(ids) => {
                let count = ids.len();
                for id in ids {
                    match id.parse::<u64>() {
                        Ok(user_id) => self.arm(http.clone(), user_id, OUT_OF_WINDOW_PROBE),
                        Err(_) => error!("Skipping unparseable user id in store: {id}"),
                    }
                }
                if count > 0 {
                    info!("Resumed {count} nudge chain(s) from the store");
                }
            }
            Err(e) => error!("Failed to resume nudge chains: {e}"),
        }
    }

    fn arm(self: &Arc<Self>, http: Arc<Http>, user_id: u64, first_delay: Duration) {
        let scheduler = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let mut delay = first_delay;
            loop {
                tokio::time::sleep(delay).await;
                match scheduler.on_fire(&http, user_id).await {
                    FireOutcome::Rearm(next) => delay = next,
                    FireOutcome::Stop => break,
                }
            }
            debug!("Nudge chain ended for user {user_id}");
        });

        // Replacing an armed chain cancels the old pending fire
        if let Some(old) = self.pending.insert(user_id, handle) {
            old.abort();
        }
    }

    /// One fire event: decide whether to send now and what the next delay is.
    ///
    /// Never returns an error; every failure mode maps to an outcome so the
    /// chain's behavior stays total. Store failures re-arm with the probe
    /// delay (the next fire is the retry); send failures still re-arm
    /// normally.
    pub async fn on_fire(&self, http: &Arc<Http>, user_id: u64) -> FireOutcome {
        let user = match self.database.get_user(&user_id.to_string()).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                info!("User {user_id} no longer in store; ending nudge chain");
                return FireOutcome::Stop;
            }
            Err(e) => {
                error!("Store read failed for user {user_id}: {e}; retrying next fire");
                return FireOutcome::Rearm(OUT_OF_WINDOW_PROBE);
            }
        };

        let now = Local::now().time();
        match decide(&user, now) {
            FireDecision::Stop => {
                info!("User {user_id} deactivated nudges; ending chain");
                FireOutcome::Stop
            }
            FireDecision::Skip => {
                debug!(
                    "User {user_id} outside {} window at {now}; re-checking later",
                    user.time_window.as_str()
                );
                FireOutcome::Rearm(OUT_OF_WINDOW_PROBE)
            }
            FireDecision::Send => {
                self.deliver(http, user_id, &user).await;
                FireOutcome::Rearm(user.frequency.random_delay())
            }
        }
    }

    /// Select and DM one nudge. Failures are logged and swallowed; the
    /// re-arm is the retry mechanism.
    async fn deliver(&self, http: &Arc<Http>, user_id: u64, user: &UserPreference) {
        let custom_messages = if user.nudge_mode == NudgeMode::Standard {
            Vec::new()
        } else {
            match self.database.get_custom_messages(&user.user_id).await {
                Ok(messages) => messages,
                Err(e) => {
                    error!("Failed to load custom messages for {user_id}: {e}");
                    Vec::new()
                }
            }
        };

        let selection = messages::select(
            user.category,
            &user.display_name,
            &custom_messages,
            user.nudge_mode,
        );

        let channel = match UserId(user_id).create_dm_channel(http).await {
            Ok(channel) => channel,
            Err(e) => {
                error!("Could not open DM channel for user {user_id}: {e}");
                return;
            }
        };

        if let Err(e) = channel.id.say(http, &selection.text).await {
            error!("Failed to send nudge to user {user_id}: {e}");
            return;
        }
        info!("Sent nudge to user {user_id}");

        if selection.fell_back {
            if let Err(e) = channel.id.say(http, FALLBACK_NOTICE).await {
                error!("Failed to send fallback notice to user {user_id}: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::preferences::{Category, FrequencyBand, TimeWindow};

    async fn scheduler_with_user(active: bool) -> (Arc<NudgeScheduler>, Database) {
        let db = Database::new(":memory:").await.unwrap();
        db.upsert_user("42", "Sneha").await.unwrap();
        db.set_active("42", active).await.unwrap();
        (Arc::new(NudgeScheduler::new(db.clone())), db)
    }

    #[tokio::test]
    async fn test_fire_stops_for_missing_user() {
        let db = Database::new(":memory:").await.unwrap();
        let scheduler = NudgeScheduler::new(db);
        let http = Arc::new(Http::new(""));

        assert_eq!(scheduler.on_fire(&http, 42).await, FireOutcome::Stop);
    }

    #[tokio::test]
    async fn test_fire_stops_for_inactive_user() {
        let (scheduler, _db) = scheduler_with_user(false).await;
        let http = Arc::new(Http::new(""));

        assert_eq!(scheduler.on_fire(&http, 42).await, FireOutcome::Stop);
    }

    #[tokio::test]
    async fn test_stop_without_chain_is_a_noop() {
        let (scheduler, _db) = scheduler_with_user(true).await;
        assert!(!scheduler.is_scheduled(42));
        scheduler.stop_nudges(42);
        assert!(!scheduler.is_scheduled(42));
    }

    #[tokio::test]
    async fn test_start_then_stop_cancels_pending_fire() {
        let (scheduler, _db) = scheduler_with_user(true).await;
        let http = Arc::new(Http::new(""));

        scheduler.start_nudges(http.clone(), 42);
        assert!(scheduler.is_scheduled(42));

        scheduler.stop_nudges(42);
        assert!(!scheduler.is_scheduled(42));
    }

    #[tokio::test]
    async fn test_restart_replaces_pending_chain() {
        let (scheduler, _db) = scheduler_with_user(true).await;
        let http = Arc::new(Http::new(""));

        scheduler.start_nudges(http.clone(), 42);
        scheduler.start_nudges(http.clone(), 42);
        // Still exactly one tracked chain for the user
        assert!(scheduler.is_scheduled(42));
        assert_eq!(scheduler.pending.len(), 1);

        scheduler.stop_nudges(42);
    }

    fn sample_user(window: TimeWindow, active: bool) -> UserPreference {
        UserPreference {
            user_id: "42".to_string(),
            display_name: "Sneha".to_string(),
            category: Category::General,
            time_window: window,
            frequency: FrequencyBand::Short,
            nudge_mode: crate::core::preferences::NudgeMode::Standard,
            active,
        }
    }

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn test_decide_sends_only_inside_window() {
        let user = sample_user(TimeWindow::Morning, true);

        assert_eq!(decide(&user, at(9, 0)), FireDecision::Send);
        assert_eq!(decide(&user, at(10, 0)), FireDecision::Send);
        assert_eq!(decide(&user, at(12, 0)), FireDecision::Send);
        assert_eq!(decide(&user, at(8, 59)), FireDecision::Skip);
        assert_eq!(decide(&user, at(14, 0)), FireDecision::Skip);
    }

    #[test]
    fn test_decide_stops_for_deactivated_user() {
        let user = sample_user(TimeWindow::FullDay, false);
        // Deactivation wins even inside the window
        assert_eq!(decide(&user, at(10, 0)), FireDecision::Stop);
    }

    #[test]
    fn test_skip_rearms_with_fixed_half_hour() {
        assert_eq!(OUT_OF_WINDOW_PROBE, Duration::from_secs(1800));
        assert_eq!(INITIAL_FIRE_DELAY, Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_scenario_morning_short_general() {
        let (_, db) = scheduler_with_user(true).await;
        db.set_time_window("42", TimeWindow::Morning).await.unwrap();
        db.set_frequency("42", FrequencyBand::Short).await.unwrap();
        db.set_category("42", Category::General).await.unwrap();

        let user = db.get_user("42").await.unwrap().unwrap();
        // 10:00 fires a send, 14:00 skips but still re-arms
        assert_eq!(decide(&user, at(10, 0)), FireDecision::Send);
        assert_eq!(decide(&user, at(14, 0)), FireDecision::Skip);

        // In-window re-arm delay comes from the 15–30 minute band
        for _ in 0..50 {
            let secs = user.frequency.random_delay().as_secs();
            assert!((15 * 60..=30 * 60).contains(&secs));
        }
    }
}
