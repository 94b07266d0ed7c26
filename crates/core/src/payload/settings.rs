//! Site settings update schema.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use super::{MAX_TEXT_LENGTH, ValidationError, bounded};
use crate::types::{Email, Price};

/// A partial update of the site settings document.
///
/// Every recognized field is optional. Saving a patch overwrites exactly the
/// fields it sets and leaves the rest of the stored document alone.
/// Unrecognized fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub announcement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_fee: Option<Price>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_shipping_threshold: Option<Price>,
    /// Percentage, 0 to 100.
    #[serde(
        default,
        serialize_with = "serialize_rate",
        skip_serializing_if = "Option::is_none"
    )]
    pub tax_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_links: Option<BTreeMap<String, String>>,
}

impl SettingsPatch {
    /// Check the patch and return its normalized form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for a malformed contact email, a negative
    /// fee, a tax rate outside 0..=100, an unknown currency code shape, or
    /// over-long text.
    pub fn validate(mut self) -> Result<Self, ValidationError> {
        for (field, value) in [
            ("siteName", &self.site_name),
            ("tagline", &self.tagline),
            ("logo", &self.logo),
            ("theme", &self.theme),
            ("banner", &self.banner),
            ("announcement", &self.announcement),
            ("contactPhone", &self.contact_phone),
            ("address", &self.address),
        ] {
            bounded(field, value.as_deref(), MAX_TEXT_LENGTH)?;
        }

        if let Some(links) = &self.social_links {
            for (network, url) in links {
                bounded(network, Some(url), MAX_TEXT_LENGTH)?;
            }
        }

        self.contact_email = self
            .contact_email
            .map(|raw| Email::parse(&raw).map(Email::into_inner))
            .transpose()?;

        if let Some(currency) = &self.currency {
            let code = currency.trim().to_ascii_uppercase();
            if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(ValidationError::OutOfRange("currency"));
            }
            self.currency = Some(code);
        }

        if self.shipping_fee.is_some_and(|fee| fee.is_negative()) {
            return Err(ValidationError::Negative("shippingFee"));
        }
        if self
            .free_shipping_threshold
            .is_some_and(|threshold| threshold.is_negative())
        {
            return Err(ValidationError::Negative("freeShippingThreshold"));
        }
        if self
            .tax_rate
            .is_some_and(|rate| rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED)
        {
            return Err(ValidationError::OutOfRange("taxRate"));
        }

        Ok(self)
    }

    /// Whether the patch sets no field at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The fields this patch sets, as a document fragment to merge.
    #[must_use]
    pub fn into_document(self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

#[allow(clippy::ref_option)] // signature required by serialize_with
fn serialize_rate<S: Serializer>(rate: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error> {
    match rate.and_then(|r| r.to_f64()) {
        Some(r) => serializer.serialize_f64(r),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn patch(value: Value) -> SettingsPatch {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_only_set_fields_are_emitted() {
        let body = patch(json!({"theme": "dark", "unknownFlag": 1}))
            .validate()
            .unwrap()
            .into_document();
        assert_eq!(body.len(), 1);
        assert_eq!(body["theme"], "dark");
    }

    #[test]
    fn test_empty_patch() {
        assert!(patch(json!({})).is_empty());
        assert!(!patch(json!({"maintenanceMode": false})).is_empty());
    }

    #[test]
    fn test_normalizes_currency_and_email() {
        let p = patch(json!({"currency": " usd ", "contactEmail": "Shop@Honey.Shop"}))
            .validate()
            .unwrap();
        assert_eq!(p.currency.as_deref(), Some("USD"));
        assert_eq!(p.contact_email.as_deref(), Some("shop@honey.shop"));
    }

    #[test]
    fn test_rejects_out_of_range_numbers() {
        assert_eq!(
            patch(json!({"shippingFee": -2})).validate().unwrap_err(),
            ValidationError::Negative("shippingFee")
        );
        assert_eq!(
            patch(json!({"taxRate": 120})).validate().unwrap_err(),
            ValidationError::OutOfRange("taxRate")
        );
        assert_eq!(
            patch(json!({"currency": "dollars"})).validate().unwrap_err(),
            ValidationError::OutOfRange("currency")
        );
    }

    #[test]
    fn test_numbers_serialize_as_json_numbers() {
        let body = patch(json!({"taxRate": 7.5, "shippingFee": 4}))
            .validate()
            .unwrap()
            .into_document();
        assert_eq!(body["taxRate"], 7.5);
        assert_eq!(body["shippingFee"], 4.0);
    }
}
