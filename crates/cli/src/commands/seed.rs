//! Seed the catalog from a YAML file.
//!
//! The file is a list of product documents:
//!
//! ```yaml
//! - name: Wildflower Honey
//!   price: 12.50
//!   images: [wildflower.jpg]
//! - name: Raw Honeycomb
//!   price: 20
//! ```
//!
//! Entries are stored as given. Any `_id` or `createdAt` key is replaced by
//! the store's own.

use std::path::Path;

use chrono::Utc;
use serde_json::{Map, Value};
use tracing::info;

use honey_palace_store::{Collection, DocumentStore, PgDocumentStore};

use super::{CliError, connect};

/// Parse a seed file into product bodies.
///
/// # Errors
///
/// Returns error if the YAML is malformed, is not a list, or contains an
/// entry that is not a mapping or lacks a `name`.
pub fn parse_products(content: &str) -> Result<Vec<Map<String, Value>>, CliError> {
    let entries: Vec<Value> = serde_yaml::from_str(content)?;

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let Value::Object(product) = entry else {
                return Err(CliError::InvalidSeed {
                    index,
                    reason: "expected a mapping".to_string(),
                });
            };
            match product.get("name") {
                Some(Value::String(name)) if !name.trim().is_empty() => Ok(product),
                _ => Err(CliError::InvalidSeed {
                    index,
                    reason: "name is required".to_string(),
                }),
            }
        })
        .collect()
}

/// Insert every product in `file_path`.
///
/// With `clear_existing`, the products collection is emptied first.
///
/// # Errors
///
/// Returns error if the file cannot be read or parsed, or the store fails.
pub async fn products(file_path: &str, clear_existing: bool) -> Result<(), CliError> {
    let path = Path::new(file_path);
    info!(path = %file_path, "Loading products from file");

    // Read and validate before connecting to database
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CliError::Io {
            path: file_path.to_string(),
            source,
        })?;
    let products = parse_products(&content)?;
    info!(products = products.len(), "Parsed seed file");

    let store = PgDocumentStore::new(connect().await?);

    if clear_existing {
        let deleted = store.delete_all(Collection::Products).await?;
        info!(deleted, "Cleared existing products");
    }

    for product in products {
        let id = store
            .insert(Collection::Products, product, Utc::now())
            .await?;
        info!(%id, "Inserted product");
    }

    info!("Seeding complete!");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_products() {
        let products = parse_products(
            "- name: Wildflower Honey\n  price: 12.5\n  images: [jar.jpg]\n- name: Comb\n  price: 20\n",
        )
        .unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0]["name"], "Wildflower Honey");
        assert_eq!(products[0]["price"], 12.5);
        assert_eq!(products[0]["images"][0], "jar.jpg");
        assert_eq!(products[1]["price"], 20);
    }

    #[test]
    fn test_parse_products_rejects_bad_entries() {
        assert!(matches!(
            parse_products("- just a string\n"),
            Err(CliError::InvalidSeed { index: 0, .. })
        ));
        assert!(matches!(
            parse_products("- name: Comb\n- price: 3\n"),
            Err(CliError::InvalidSeed { index: 1, .. })
        ));
        assert!(matches!(
            parse_products("name: not a list\n"),
            Err(CliError::Yaml(_))
        ));
    }
}
