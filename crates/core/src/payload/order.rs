//! Checkout order intake schema.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{MAX_TEXT_LENGTH, RESERVED_FIELDS, ValidationError, bounded, trimmed};
use crate::cart::CartItem;
use crate::types::{Email, OrderStatus, Price};

/// Most free-form checkout fields an order may carry besides the known ones.
pub const MAX_EXTRA_FIELDS: usize = 32;

/// An order as submitted at checkout.
///
/// The recognized fields are typed; any other scalar fields the checkout form
/// sends are kept verbatim in `extra`. Server-assigned keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<CartItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Price>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewOrder {
    /// Check the submission and return its normalized form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for reserved or non-scalar extra fields,
    /// an invalid email, a negative or oversized amount or price, a zero
    /// quantity, or over-long text.
    pub fn validate(mut self) -> Result<Self, ValidationError> {
        if self.extra.len() > MAX_EXTRA_FIELDS {
            return Err(ValidationError::TooManyFields {
                max: MAX_EXTRA_FIELDS,
            });
        }
        for (key, value) in &self.extra {
            if RESERVED_FIELDS.contains(&key.as_str()) {
                return Err(ValidationError::ReservedField(key.clone()));
            }
            match value {
                Value::String(s) => bounded(key, Some(s), MAX_TEXT_LENGTH)?,
                Value::Null | Value::Bool(_) | Value::Number(_) => {}
                Value::Array(_) | Value::Object(_) => {
                    return Err(ValidationError::UnsupportedValue(key.clone()));
                }
            }
        }

        self.name = trimmed(self.name);
        self.phone = trimmed(self.phone);
        self.address = trimmed(self.address);
        self.payment_method = trimmed(self.payment_method);
        self.transaction_id = trimmed(self.transaction_id);
        for (field, value) in [
            ("name", &self.name),
            ("phone", &self.phone),
            ("address", &self.address),
            ("paymentMethod", &self.payment_method),
            ("transactionId", &self.transaction_id),
        ] {
            bounded(field, value.as_deref(), MAX_TEXT_LENGTH)?;
        }

        self.email = trimmed(self.email)
            .map(|raw| Email::parse(&raw).map(Email::into_inner))
            .transpose()?;

        if self.amount.is_some_and(|amount| amount.is_negative()) {
            return Err(ValidationError::Negative("amount"));
        }
        if self.amount.is_some_and(|amount| amount.exceeds_accepted()) {
            return Err(ValidationError::OutOfRange("amount"));
        }

        for item in &self.items {
            if item.quantity == 0 {
                return Err(ValidationError::OutOfRange("items.quantity"));
            }
            if item.price.is_negative() {
                return Err(ValidationError::Negative("items.price"));
            }
            if item.price.exceeds_accepted() {
                return Err(ValidationError::OutOfRange("items.price"));
            }
        }

        Ok(self)
    }

    /// Document body for the store, stamped with `status`.
    #[must_use]
    pub fn into_document(self, status: OrderStatus) -> Map<String, Value> {
        let mut body = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        body.insert("status".to_owned(), Value::String(status.as_str().to_owned()));
        body
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> NewOrder {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_free_form_fields_are_kept() {
        let order = parse(json!({"item": "honey", "amount": 10}))
            .validate()
            .unwrap();
        assert_eq!(order.amount, Some(Price::from_cents(1000)));

        let body = order.into_document(OrderStatus::PendingPayment);
        assert_eq!(body["item"], "honey");
        assert_eq!(body["amount"], 10.0);
        assert_eq!(body["status"], "Pending Payment");
    }

    #[test]
    fn test_known_fields_are_normalized() {
        let order = parse(json!({
            "name": "  Ada  ",
            "email": " Ada@Example.COM ",
            "paymentMethod": "",
            "items": [{"id": "jar", "name": "Jar", "price": 8, "quantity": 2}]
        }))
        .validate()
        .unwrap();

        assert_eq!(order.name.as_deref(), Some("Ada"));
        assert_eq!(order.email.as_deref(), Some("ada@example.com"));
        assert_eq!(order.payment_method, None);
        assert_eq!(order.items.len(), 1);

        let body = order.into_document(OrderStatus::PendingPayment);
        assert!(body.get("paymentMethod").is_none());
        assert_eq!(body["items"][0]["quantity"], 2);
    }

    #[test]
    fn test_rejects_reserved_fields() {
        for key in ["_id", "id", "status", "createdAt"] {
            let mut body = Map::new();
            body.insert(key.to_string(), json!("x"));
            let err = parse(Value::Object(body)).validate().unwrap_err();
            assert_eq!(err, ValidationError::ReservedField(key.to_string()));
        }
    }

    #[test]
    fn test_rejects_nested_extra_values() {
        let err = parse(json!({"shipping": {"city": "Kyiv"}}))
            .validate()
            .unwrap_err();
        assert_eq!(err, ValidationError::UnsupportedValue("shipping".to_string()));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            parse(json!({"email": "nobody"})).validate(),
            Err(ValidationError::InvalidEmail(_))
        ));
        assert_eq!(
            parse(json!({"amount": -1})).validate().unwrap_err(),
            ValidationError::Negative("amount")
        );
        assert_eq!(
            parse(json!({"items": [{"id": "jar", "price": 1, "quantity": 0}]}))
                .validate()
                .unwrap_err(),
            ValidationError::OutOfRange("items.quantity")
        );
    }

    #[test]
    fn test_rejects_oversized_amounts() {
        assert_eq!(
            parse(json!({"amount": "60000000000000000000000000000"}))
                .validate()
                .unwrap_err(),
            ValidationError::OutOfRange("amount")
        );
        assert_eq!(
            parse(json!({"items": [{"id": "jar", "price": 1e12, "quantity": 1}]}))
                .validate()
                .unwrap_err(),
            ValidationError::OutOfRange("items.price")
        );
        assert!(parse(json!({"amount": 999_999.99})).validate().is_ok());
    }

    #[test]
    fn test_rejects_too_many_fields() {
        let extra: Map<String, Value> = (0..=MAX_EXTRA_FIELDS)
            .map(|i| (format!("field{i}"), json!(i)))
            .collect();
        let err = parse(Value::Object(extra)).validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::TooManyFields {
                max: MAX_EXTRA_FIELDS
            }
        );
    }
}
