//! Cart line items and the product shape they are built from.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::types::Price;

/// A product as handed to the cart.
///
/// Products reach the cart from more than one source, so the shape is loose:
/// catalog documents carry their key in `_id`, other product listings use
/// `id`, and images arrive either as a list or as a single reference. Numeric
/// identifiers are accepted and kept in their decimal string form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRef {
    /// Document-store key, preferred when present.
    #[serde(
        rename = "_id",
        default,
        deserialize_with = "loose_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub document_id: Option<String>,
    /// Plain identifier used by non-catalog product shapes.
    #[serde(
        default,
        deserialize_with = "loose_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: Price,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ProductRef {
    /// Build a catalog-shaped product reference.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Price) -> Self {
        Self {
            document_id: Some(id.into()),
            name: name.into(),
            price,
            ..Self::default()
        }
    }

    /// Set a single image reference.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Set the image list.
    #[must_use]
    pub fn with_images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images = images.into_iter().map(Into::into).collect();
        self
    }

    /// The normalized identifier: `_id` if non-empty, else `id` if non-empty.
    ///
    /// This is the only place the two identifier fields are consulted.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        non_empty(self.document_id.as_deref()).or_else(|| non_empty(self.id.as_deref()))
    }

    /// First entry of `images`, falling back to `image`.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        non_empty(self.images.first().map(String::as_str))
            .or_else(|| non_empty(self.image.as_deref()))
    }
}

/// One line of the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Absent when the product had no identifier; such lines never merge.
    #[serde(
        default,
        deserialize_with = "loose_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub quantity: u32,
}

impl CartItem {
    /// Derive a new line from a product.
    #[must_use]
    pub fn from_product(product: &ProductRef, quantity: u32) -> Self {
        Self {
            id: product.identifier().map(str::to_owned),
            name: product.name.clone(),
            price: product.price,
            image: product.primary_image().map(str::to_owned),
            quantity,
        }
    }

    /// Whether this line belongs to the product with `id`.
    #[must_use]
    pub fn matches(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }

    /// Unit price times quantity, saturating on overflow.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price * self.quantity
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Accept string or numeric identifiers; anything else reads as absent.
fn loose_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_prefers_document_id() {
        let product: ProductRef =
            serde_json::from_str(r#"{"_id": "abc", "id": "xyz", "name": "Comb"}"#).unwrap();
        assert_eq!(product.identifier(), Some("abc"));
    }

    #[test]
    fn test_identifier_falls_back_to_id() {
        let product: ProductRef = serde_json::from_str(r#"{"id": 42, "name": "Jar"}"#).unwrap();
        assert_eq!(product.identifier(), Some("42"));

        let product: ProductRef =
            serde_json::from_str(r#"{"_id": "", "id": "jar-1", "name": "Jar"}"#).unwrap();
        assert_eq!(product.identifier(), Some("jar-1"));
    }

    #[test]
    fn test_identifier_absent() {
        let product: ProductRef = serde_json::from_str(r#"{"name": "Mystery"}"#).unwrap();
        assert_eq!(product.identifier(), None);
    }

    #[test]
    fn test_primary_image_prefers_list() {
        let product = ProductRef::new("p1", "Honey", Price::from_cents(900))
            .with_images(["front.jpg", "back.jpg"])
            .with_image("single.jpg");
        assert_eq!(product.primary_image(), Some("front.jpg"));

        let product = ProductRef::new("p1", "Honey", Price::from_cents(900)).with_image("single.jpg");
        assert_eq!(product.primary_image(), Some("single.jpg"));
    }

    #[test]
    fn test_from_product_copies_fields() {
        let product = ProductRef::new("p1", "Manuka", Price::from_cents(4500)).with_images(["m.jpg"]);
        let item = CartItem::from_product(&product, 2);
        assert_eq!(item.id.as_deref(), Some("p1"));
        assert_eq!(item.name, "Manuka");
        assert_eq!(item.image.as_deref(), Some("m.jpg"));
        assert_eq!(item.line_total(), Price::from_cents(9000));
    }

    #[test]
    fn test_item_without_id_serializes_without_key() {
        let item = CartItem::from_product(&ProductRef::default(), 1);
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["quantity"], 1);
    }
}
