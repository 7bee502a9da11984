//! Lead submission types and normalization.
//!
//! A [`LeadSubmission`] is what the creation form posts. It is checked once
//! with [`LeadSubmission::validate`] and turned into the outbound
//! [`WebhookLeadPayload`] with [`LeadSubmission::normalize`]. Both steps are
//! pure so they can be tested without any network code.

use serde::{Deserialize, Serialize};

/// Default UTM source when the visitor arrived without one.
pub const DEFAULT_UTM_SOURCE: &str = "direct";

/// A required lead field that was missing or empty.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadValidationError {
    /// `email` is missing or empty.
    #[error("Email es requerido")]
    MissingEmail,
    /// `nombre` is missing or empty.
    #[error("Nombre es requerido")]
    MissingFullName,
    /// `ciudad` is missing or empty.
    #[error("Ciudad es requerida")]
    MissingCity,
}

/// Form submission as received from the browser.
///
/// Every field is optional at the wire level so that a missing field is
/// reported as a validation error rather than a deserialization failure.
/// Unknown fields (the form also sends `acepta_terminos`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadSubmission {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "nombre")]
    pub full_name: Option<String>,
    #[serde(default, rename = "dedicatoria")]
    pub dedication: Option<String>,
    #[serde(default, rename = "telefono")]
    pub phone: Option<String>,
    #[serde(default, rename = "ciudad")]
    pub city: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub utm_source: Option<String>,
}

/// Normalized payload sent to the external webhook.
///
/// All fields are always present. Optional inputs default to the empty
/// string and `utm_source` defaults to [`DEFAULT_UTM_SOURCE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookLeadPayload {
    pub token: String,
    pub email: String,
    pub nombre: String,
    pub dedicatoria: String,
    pub telefono: String,
    pub ciudad: String,
    pub slug: String,
    pub utm_source: String,
}

impl LeadSubmission {
    /// Check the required fields in order: email, full name, city.
    ///
    /// Only presence is checked. No format validation is applied to the
    /// email or phone.
    ///
    /// # Errors
    ///
    /// Returns the first [`LeadValidationError`] encountered.
    pub fn validate(&self) -> Result<(), LeadValidationError> {
        if is_blank(self.email.as_deref()) {
            return Err(LeadValidationError::MissingEmail);
        }
        if is_blank(self.full_name.as_deref()) {
            return Err(LeadValidationError::MissingFullName);
        }
        if is_blank(self.city.as_deref()) {
            return Err(LeadValidationError::MissingCity);
        }
        Ok(())
    }

    /// Build the outbound webhook payload.
    ///
    /// String fields are trimmed. `utm_source` is passed through as sent
    /// unless it is absent or empty.
    #[must_use]
    pub fn normalize(&self, token: &str) -> WebhookLeadPayload {
        let utm_source = match self.utm_source.as_deref() {
            Some(source) if !source.is_empty() => source.to_string(),
            _ => DEFAULT_UTM_SOURCE.to_string(),
        };

        WebhookLeadPayload {
            token: token.to_string(),
            email: trimmed(self.email.as_deref()),
            nombre: trimmed(self.full_name.as_deref()),
            dedicatoria: trimmed(self.dedication.as_deref()),
            telefono: trimmed(self.phone.as_deref()),
            ciudad: trimmed(self.city.as_deref()),
            slug: trimmed(self.slug.as_deref()),
            utm_source,
        }
    }
}

/// Reply body of the webhook's write call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebhookLeadReply {
    pub ok: bool,
    pub error: Option<String>,
    pub duplicated: bool,
}

impl WebhookLeadReply {
    /// Read a reply field by field.
    ///
    /// An off-type field never turns an accepted lead into a rejection:
    /// `ok` and `duplicated` are read by truthiness and a non-string
    /// `error` is ignored.
    #[must_use]
    pub fn from_value(reply: &serde_json::Value) -> Self {
        Self {
            ok: super::is_truthy(reply.get("ok")),
            error: super::error_message(reply),
            duplicated: super::is_truthy(reply.get("duplicated")),
        }
    }
}

// A field counts as present when it has at least one character. Whitespace
// passes and is trimmed away later.
fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(str::is_empty)
}

fn trimmed(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn complete() -> LeadSubmission {
        LeadSubmission {
            email: Some("a@b.com".to_string()),
            full_name: Some("Juan Pérez".to_string()),
            city: Some("Bogotá".to_string()),
            ..LeadSubmission::default()
        }
    }

    #[test]
    fn test_validate_complete() {
        assert!(complete().validate().is_ok());
    }

    #[test]
    fn test_validate_order() {
        let empty = LeadSubmission::default();
        assert_eq!(empty.validate(), Err(LeadValidationError::MissingEmail));

        let only_email = LeadSubmission {
            email: Some("a@b.com".to_string()),
            ..LeadSubmission::default()
        };
        assert_eq!(
            only_email.validate(),
            Err(LeadValidationError::MissingFullName)
        );

        let no_city = LeadSubmission {
            city: None,
            ..complete()
        };
        assert_eq!(no_city.validate(), Err(LeadValidationError::MissingCity));
    }

    #[test]
    fn test_validate_empty_string_is_missing() {
        let lead = LeadSubmission {
            email: Some(String::new()),
            ..complete()
        };
        assert_eq!(lead.validate(), Err(LeadValidationError::MissingEmail));
    }

    #[test]
    fn test_validate_no_format_checks() {
        let lead = LeadSubmission {
            email: Some("not-an-email".to_string()),
            phone: Some("abc".to_string()),
            ..complete()
        };
        assert!(lead.validate().is_ok());
    }

    #[test]
    fn test_normalize_defaults() {
        let payload = complete().normalize("tok");
        assert_eq!(payload.token, "tok");
        assert_eq!(payload.dedicatoria, "");
        assert_eq!(payload.telefono, "");
        assert_eq!(payload.slug, "");
        assert_eq!(payload.utm_source, "direct");
    }

    #[test]
    fn test_normalize_trims() {
        let lead = LeadSubmission {
            email: Some("  a@b.com ".to_string()),
            full_name: Some("\tJuan Pérez\n".to_string()),
            dedication: Some("  con amor ".to_string()),
            phone: Some(" +57 300 ".to_string()),
            city: Some(" Bogotá".to_string()),
            slug: Some(" juan-perez-1 ".to_string()),
            utm_source: Some("instagram".to_string()),
        };
        let payload = lead.normalize("tok");
        assert_eq!(payload.email, "a@b.com");
        assert_eq!(payload.nombre, "Juan Pérez");
        assert_eq!(payload.dedicatoria, "con amor");
        assert_eq!(payload.telefono, "+57 300");
        assert_eq!(payload.ciudad, "Bogotá");
        assert_eq!(payload.slug, "juan-perez-1");
        assert_eq!(payload.utm_source, "instagram");
    }

    #[test]
    fn test_normalize_empty_utm_source_defaults() {
        let lead = LeadSubmission {
            utm_source: Some(String::new()),
            ..complete()
        };
        assert_eq!(lead.normalize("tok").utm_source, "direct");
    }

    #[test]
    fn test_deserialize_wire_names() {
        let lead: LeadSubmission = serde_json::from_str(
            r#"{"email":"a@b.com","nombre":"Juan","ciudad":"Cali","acepta_terminos":true}"#,
        )
        .unwrap();
        assert_eq!(lead.full_name.as_deref(), Some("Juan"));
        assert_eq!(lead.city.as_deref(), Some("Cali"));
        assert!(lead.dedication.is_none());
    }

    #[test]
    fn test_payload_wire_shape() {
        let value = serde_json::to_value(complete().normalize("tok")).unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        for key in [
            "token",
            "email",
            "nombre",
            "dedicatoria",
            "telefono",
            "ciudad",
            "slug",
            "utm_source",
        ] {
            assert!(keys.contains(&key), "missing {key}");
        }
        assert_eq!(keys.len(), 8);
    }

    #[test]
    fn test_reply_defaults() {
        let reply = WebhookLeadReply::from_value(&serde_json::json!({ "ok": true }));
        assert!(reply.ok);
        assert!(!reply.duplicated);
        assert_eq!(reply.error, None);
    }

    #[test]
    fn test_reply_tolerates_odd_field_types() {
        let reply = WebhookLeadReply::from_value(&serde_json::json!({
            "ok": 1,
            "duplicated": "true",
            "error": 0
        }));
        assert!(reply.ok);
        assert!(reply.duplicated);
        assert_eq!(reply.error, None);
    }

    #[test]
    fn test_reply_falsy_ok_is_rejection() {
        for ok in [
            serde_json::json!(false),
            serde_json::json!(0),
            serde_json::json!(""),
            serde_json::Value::Null,
        ] {
            let reply = WebhookLeadReply::from_value(&serde_json::json!({
                "ok": ok,
                "error": "Email inválido"
            }));
            assert!(!reply.ok);
            assert_eq!(reply.error.as_deref(), Some("Email inválido"));
        }
        assert!(!WebhookLeadReply::from_value(&serde_json::json!([])).ok);
    }
}
