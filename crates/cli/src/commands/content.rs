//! Slug generation and devotional content listing.
//!
//! # Usage
//!
//! ```bash
//! novenapp slug "Familia García"
//! novenapp days
//! ```

use novenapp_core::{content, slug_for};

/// Print the slug the creation form would generate for a name right now.
#[allow(clippy::print_stdout)]
pub fn slug(name: &str) {
    println!("{}", slug_for(name, chrono::Utc::now().timestamp_millis()));
}

/// One line per day: number, date and theme.
#[must_use]
pub fn day_summaries() -> Vec<String> {
    content::all_days()
        .iter()
        .map(|day| format!("Día {} ({}): {}", day.number.get(), day.date_label(), day.theme))
        .collect()
}

/// Print the nine days of the novena.
#[allow(clippy::print_stdout)]
pub fn days() {
    for line in day_summaries() {
        println!("{line}");
    }
}
