//! User preference domain types
//!
//! Structured preference record with defaulting rules applied once at read
//! time. Each enum has a stable string form used for database storage and
//! component `custom_id` suffixes.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use chrono::{NaiveTime, Timelike};
use rand::Rng;
use std::time::Duration;

/// Topic focus for nudge content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    General,
    Security,
    Both,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Security => "security",
            Category::Both => "both",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "general" => Some(Category::General),
            "security" => Some(Category::Security),
            "both" => Some(Category::Both),
            _ => None,
        }
    }

    /// Human-readable label for menus and confirmations.
    pub fn label(&self) -> &'static str {
        match self {
            Category::General => "🧠 General productivity",
            Category::Security => "🛡️ Cybersecurity",
            Category::Both => "🌐 Both",
        }
    }
}

/// Daily clock-time interval during which nudges may be sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeWindow {
    Morning,
    Afternoon,
    #[default]
    FullDay,
}

impl TimeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Morning => "morning",
            TimeWindow::Afternoon => "afternoon",
            TimeWindow::FullDay => "fullday",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "morning" => Some(TimeWindow::Morning),
            "afternoon" => Some(TimeWindow::Afternoon),
            "fullday" => Some(TimeWindow::FullDay),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeWindow::Morning => "🕘 9AM–12PM",
            TimeWindow::Afternoon => "🕐 1PM–5PM",
            TimeWindow::FullDay => "⏰ 9AM–5PM",
        }
    }

    /// Window bounds as inclusive minutes from midnight.
    pub fn bounds_minutes(&self) -> (u32, u32) {
        match self {
            TimeWindow::Morning => (9 * 60, 12 * 60),
            TimeWindow::Afternoon => (13 * 60, 17 * 60),
            TimeWindow::FullDay => (9 * 60, 17 * 60),
        }
    }

    /// Whether the given local clock time falls inside `[start, end]`.
    pub fn contains(&self, time: NaiveTime) -> bool {
        let minute_of_day = time.hour() * 60 + time.minute();
        let (start, end) = self.bounds_minutes();
        (start..=end).contains(&minute_of_day)
    }
}

/// Inclusive minute-range from which the next nudge delay is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrequencyBand {
    Short,
    #[default]
    Medium,
    Long,
}

impl FrequencyBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrequencyBand::Short => "short",
            FrequencyBand::Medium => "medium",
            FrequencyBand::Long => "long",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "short" => Some(FrequencyBand::Short),
            "medium" => Some(FrequencyBand::Medium),
            "long" => Some(FrequencyBand::Long),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FrequencyBand::Short => "Every 15–30 min",
            FrequencyBand::Medium => "Every 30 min – 2 hrs",
            FrequencyBand::Long => "Every 2–4 hrs",
        }
    }

    /// Inclusive `(min, max)` delay range in minutes.
    pub fn minute_range(&self) -> (u64, u64) {
        match self {
            FrequencyBand::Short => (15, 30),
            FrequencyBand::Medium => (30, 120),
            FrequencyBand::Long => (120, 240),
        }
    }

    /// Draw a uniformly random delay from the band, inclusive on both ends.
    pub fn random_delay(&self) -> Duration {
        let (min, max) = self.minute_range();
        let minutes = rand::rng().random_range(min..=max);
        Duration::from_secs(minutes * 60)
    }
}

/// Where nudge text comes from: the built-in pools, the user's own list,
/// or a mix of both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NudgeMode {
    #[default]
    Standard,
    Custom,
    Mixed,
}

impl NudgeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            NudgeMode::Standard => "standard",
            NudgeMode::Custom => "custom",
            NudgeMode::Mixed => "mixed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "standard" => Some(NudgeMode::Standard),
            "custom" => Some(NudgeMode::Custom),
            "mixed" => Some(NudgeMode::Mixed),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NudgeMode::Standard => "📚 Built-in messages",
            NudgeMode::Custom => "✍️ My messages only",
            NudgeMode::Mixed => "🔀 Built-in + mine",
        }
    }
}

/// One user's stored preference record.
///
/// Unknown or missing stored values fall back to the enum defaults
/// (general / full day / medium / standard), applied when the row is read.
#[derive(Debug, Clone)]
pub struct UserPreference {
    pub user_id: String,
    pub display_name: String,
    pub category: Category,
    pub time_window: TimeWindow,
    pub frequency: FrequencyBand,
    pub nudge_mode: NudgeMode,
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn test_morning_window_bounds() {
        let w = TimeWindow::Morning;
        assert!(!w.contains(at(8, 59)));
        assert!(w.contains(at(9, 0)));
        assert!(w.contains(at(10, 30)));
        assert!(w.contains(at(12, 0)));
        assert!(!w.contains(at(12, 1)));
    }

    #[test]
    fn test_afternoon_window_bounds() {
        let w = TimeWindow::Afternoon;
        assert!(!w.contains(at(12, 59)));
        assert!(w.contains(at(13, 0)));
        assert!(w.contains(at(17, 0)));
        assert!(!w.contains(at(17, 1)));
    }

    #[test]
    fn test_fullday_spans_both() {
        let w = TimeWindow::FullDay;
        assert!(w.contains(at(9, 0)));
        assert!(w.contains(at(12, 30)));
        assert!(w.contains(at(17, 0)));
        assert!(!w.contains(at(18, 0)));
        assert!(!w.contains(at(0, 0)));
    }

    #[test]
    fn test_random_delay_within_band() {
        for band in [
            FrequencyBand::Short,
            FrequencyBand::Medium,
            FrequencyBand::Long,
        ] {
            let (min, max) = band.minute_range();
            for _ in 0..200 {
                let secs = band.random_delay().as_secs();
                assert!(secs >= min * 60, "{band:?}: {secs}s below band");
                assert!(secs <= max * 60, "{band:?}: {secs}s above band");
                assert_eq!(secs % 60, 0, "delay should be whole minutes");
            }
        }
    }

    #[test]
    fn test_enum_string_round_trips() {
        for c in [Category::General, Category::Security, Category::Both] {
            assert_eq!(Category::parse(c.as_str()), Some(c));
        }
        for w in [TimeWindow::Morning, TimeWindow::Afternoon, TimeWindow::FullDay] {
            assert_eq!(TimeWindow::parse(w.as_str()), Some(w));
        }
        for f in [
            FrequencyBand::Short,
            FrequencyBand::Medium,
            FrequencyBand::Long,
        ] {
            assert_eq!(FrequencyBand::parse(f.as_str()), Some(f));
        }
        for m in [NudgeMode::Standard, NudgeMode::Custom, NudgeMode::Mixed] {
            assert_eq!(NudgeMode::parse(m.as_str()), Some(m));
        }
    }

    #[test]
    fn test_unknown_values_fall_back_to_defaults() {
        assert_eq!(Category::parse("jazz"), None);
        assert_eq!(Category::default(), Category::General);
        assert_eq!(TimeWindow::default(), TimeWindow::FullDay);
        assert_eq!(FrequencyBand::default(), FrequencyBand::Medium);
        assert_eq!(NudgeMode::default(), NudgeMode::Standard);
    }
}
