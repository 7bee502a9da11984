//! Personalized novena records and slugs.

use serde::{Deserialize, Serialize};

/// Display name used when nothing can be derived from a slug.
pub const FALLBACK_DISPLAY_NAME: &str = "Familia";

/// Personalization data stored by the webhook at lead-submission time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NovenaRecord {
    #[serde(default, rename = "nombre")]
    pub display_name: String,
    #[serde(default, rename = "dedicatoria")]
    pub dedication: String,
    #[serde(default, rename = "ciudad")]
    pub city: String,
}

/// Reply body of the webhook's read call.
///
/// Kept alongside the raw JSON so the lookup endpoint can return the
/// upstream payload verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NovenaLookupReply {
    pub ok: bool,
    pub data: Option<NovenaRecord>,
    pub error: Option<String>,
}

impl NovenaLookupReply {
    /// Read a reply field by field.
    ///
    /// `ok` is read by truthiness. `data` is `None` when it is missing or
    /// does not have the record's shape.
    #[must_use]
    pub fn from_value(reply: &serde_json::Value) -> Self {
        Self {
            ok: super::is_truthy(reply.get("ok")),
            data: reply
                .get("data")
                .and_then(|data| NovenaRecord::deserialize(data).ok()),
            error: super::error_message(reply),
        }
    }
}

/// Build a slug for a new novena from the family name and a timestamp.
///
/// The name is lowercased, whitespace runs become a single `-`, anything
/// outside `[a-z0-9-]` is dropped, and `-{millis}` is appended.
///
/// ```
/// use novenapp_core::slug_for;
///
/// assert_eq!(slug_for("Familia García", 173_000), "familia-garca-173000");
/// ```
#[must_use]
pub fn slug_for(full_name: &str, timestamp_millis: i64) -> String {
    let mut base = String::with_capacity(full_name.len());
    let mut in_whitespace = false;

    for c in full_name.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                base.push('-');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            base.push(c);
        }
    }

    format!("{base}-{timestamp_millis}")
}

/// Derive a human-readable name from a slug.
///
/// Drops the trailing timestamp segment and capitalizes each remaining
/// segment. Returns [`FALLBACK_DISPLAY_NAME`] when nothing is left.
///
/// ```
/// use novenapp_core::display_name_from_slug;
///
/// assert_eq!(display_name_from_slug("familia-garcia-173000"), "Familia Garcia");
/// assert_eq!(display_name_from_slug("173000"), "Familia");
/// ```
#[must_use]
pub fn display_name_from_slug(slug: &str) -> String {
    let segments: Vec<&str> = slug.split('-').collect();
    let Some((_, name_segments)) = segments.split_last() else {
        return FALLBACK_DISPLAY_NAME.to_string();
    };

    let name = name_segments
        .iter()
        .map(|segment| capitalize(segment))
        .collect::<Vec<_>>()
        .join(" ");

    if name.is_empty() {
        FALLBACK_DISPLAY_NAME.to_string()
    } else {
        name
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
