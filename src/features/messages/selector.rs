//! Random nudge message selection
//!
//! Pure pool resolution + uniform random choice with replacement. Repeats
//! across consecutive sends are allowed; there is no dedup memory.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use rand::seq::IndexedRandom;

use crate::core::preferences::{Category, NudgeMode};

/// General productivity nudges.
pub const GENERAL_POOL: &[&str] = &[
    "Have you started on your tasks yet?",
    "Remember your goals today.",
    "Small steps count too!",
    "Take a breath, then take action.",
    "Hope you're halfway there!",
    "Let's get one thing done for your future self 👩‍💻",
    "Review your notes or flashcards – tiny effort, big reward! 🧠",
];

/// Cybersecurity-focused nudges.
pub const SECURITY_POOL: &[&str] = &[
    "Have you checked your password hygiene today?",
    "Stay sharp, stay secure.",
    "Two-factor everything.",
    "Don't click strange links!",
    "Update your software, always.",
    "Feeling stuck? Do 15 mins of TryHackMe — small wins add up!",
    "Time to flex those cyber muscles 💪 Hack something small today!",
];

/// Result of one selection.
pub struct Selection {
    /// Personalized message text, ready to send.
    pub text: String,
    /// True when custom mode was requested but the custom list was empty,
    /// so the default pool was used instead. The caller surfaces this to
    /// the user once per occurrence.
    pub fell_back: bool,
}

/// Pick one nudge for the user.
///
/// Pool resolution: `Custom` mode uses the user's own messages exclusively
/// (falling back to the category pool when the list is empty), `Mixed` unions
/// the category pool with the custom list, and `Standard` ignores custom
/// messages entirely. Category `Both` draws from the union of the general
/// and security pools.
pub fn select(
    category: Category,
    display_name: &str,
    custom_messages: &[String],
    mode: NudgeMode,
) -> Selection {
    let mut fell_back = false;
    let mut pool: Vec<&str> = Vec::new();

    match mode {
        NudgeMode::Custom if !custom_messages.is_empty() => {
            pool.extend(custom_messages.iter().map(String::as_str));
        }
        NudgeMode::Custom => {
            fell_back = true;
            extend_default_pool(&mut pool, category);
        }
        NudgeMode::Mixed => {
            extend_default_pool(&mut pool, category);
            pool.extend(custom_messages.iter().map(String::as_str));
        }
        NudgeMode::Standard => {
            extend_default_pool(&mut pool, category);
        }
    }

    let chosen = pool
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or("Keep at it!");

    Selection {
        text: format!("Hi {display_name}, {chosen}"),
        fell_back,
    }
}

fn extend_default_pool<'a>(pool: &mut Vec<&'a str>, category: Category) {
    match category {
        Category::General => pool.extend_from_slice(GENERAL_POOL),
        Category::Security => pool.extend_from_slice(SECURITY_POOL),
        Category::Both => {
            pool.extend_from_slice(GENERAL_POOL);
            pool.extend_from_slice(SECURITY_POOL);
        }
    }
}
