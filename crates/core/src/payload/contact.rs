//! Contact form intake schema.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{MAX_TEXT_LENGTH, ValidationError, bounded, required, trimmed};
use crate::types::Email;

/// Longest accepted name, phone, or subject.
const MAX_SHORT_LENGTH: usize = 200;

/// A contact form submission.
///
/// Required fields are modeled as `Option` so a missing field reports as a
/// validation error rather than a deserialization failure. Unrecognized
/// fields are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl NewContact {
    /// Check the submission and return its normalized form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if name, email, or message is missing, the
    /// email is malformed, or any field is too long.
    pub fn validate(self) -> Result<Self, ValidationError> {
        let name = required("name", self.name.as_deref())?.to_owned();
        let email = Email::parse(required("email", self.email.as_deref())?)?;
        let message = required("message", self.message.as_deref())?.to_owned();
        let phone = trimmed(self.phone);
        let subject = trimmed(self.subject);

        bounded("name", Some(&name), MAX_SHORT_LENGTH)?;
        bounded("phone", phone.as_deref(), MAX_SHORT_LENGTH)?;
        bounded("subject", subject.as_deref(), MAX_SHORT_LENGTH)?;
        bounded("message", Some(&message), MAX_TEXT_LENGTH)?;

        Ok(Self {
            name: Some(name),
            email: Some(email.into_inner()),
            phone,
            subject,
            message: Some(message),
        })
    }

    /// Document body for the store.
    #[must_use]
    pub fn into_document(self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_submission() {
        let contact: NewContact = serde_json::from_value(json!({
            "name": " Bea ",
            "email": "Bea@Hive.org",
            "message": "Do you ship raw honey abroad?",
            "newsletter": true
        }))
        .unwrap();

        let body = contact.validate().unwrap().into_document();
        assert_eq!(body["name"], "Bea");
        assert_eq!(body["email"], "bea@hive.org");
        assert!(body.get("phone").is_none());
        assert!(body.get("newsletter").is_none());
    }

    #[test]
    fn test_missing_required_fields() {
        let contact = NewContact {
            name: Some("Bea".to_string()),
            email: Some("bea@hive.org".to_string()),
            message: Some("   ".to_string()),
            ..NewContact::default()
        };
        assert_eq!(
            contact.validate().unwrap_err(),
            ValidationError::Missing("message")
        );
        assert_eq!(
            NewContact::default().validate().unwrap_err(),
            ValidationError::Missing("name")
        );
    }

    #[test]
    fn test_bounds_subject_length() {
        let contact = NewContact {
            name: Some("Bea".to_string()),
            email: Some("bea@hive.org".to_string()),
            subject: Some("x".repeat(MAX_SHORT_LENGTH + 1)),
            message: Some("hello".to_string()),
            ..NewContact::default()
        };
        assert!(matches!(
            contact.validate(),
            Err(ValidationError::TooLong { ref field, .. }) if field == "subject"
        ));
    }
}
