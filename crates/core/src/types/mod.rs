//! Core types for Novenapp.
//!
//! This module provides the request and record shapes exchanged with the
//! browser and the external webhook.

pub mod day;
pub mod lead;
pub mod novena;

pub use day::{DayError, DayNumber};
pub use lead::{
    DEFAULT_UTM_SOURCE, LeadSubmission, LeadValidationError, WebhookLeadPayload, WebhookLeadReply,
};
pub use novena::{
    FALLBACK_DISPLAY_NAME, NovenaLookupReply, NovenaRecord, display_name_from_slug, slug_for,
};

use serde_json::Value;

/// Whether a webhook reply field counts as set.
///
/// The webhook is a script, so flags may arrive as booleans, numbers or
/// strings. `null`, `false`, `0` and `""` are unset; anything else is set.
pub(crate) fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n.abs() > 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// A reply's `error` field when it is a string.
pub(crate) fn error_message(reply: &Value) -> Option<String> {
    reply.get("error").and_then(Value::as_str).map(ToString::to_string)
}
