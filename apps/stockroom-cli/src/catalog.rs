//! # Catalog
//!
//! Builds the [`Store`] the menu runs against, either from the built-in seed
//! or from a JSON catalog file.
//!
//! ## File Format
//! ```json
//! {
//!   "promotions": [
//!     { "name": "30% off!", "rule": { "type": "percent_discount", "percent": 30 } }
//!   ],
//!   "products": [
//!     { "name": "Windows License", "price": 125,
//!       "stock": { "type": "untracked" }, "promotion": "30% off!" }
//!   ]
//! }
//! ```
//!
//! Every value goes through the core constructors, so a negative price in a
//! file fails exactly like a negative price in code.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use stockroom_core::{CoreError, CoreResult, Product, Promotion, PromotionRule, StockPolicy, Store};

// =============================================================================
// File Types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub promotions: Vec<PromotionEntry>,
    pub products: Vec<ProductEntry>,
}

#[derive(Debug, Deserialize)]
pub struct PromotionEntry {
    pub name: String,
    pub rule: PromotionRule,
}

#[derive(Debug, Deserialize)]
pub struct ProductEntry {
    pub name: String,
    pub price: f64,
    pub stock: StockPolicy,
    /// Name of a promotion declared in the same file.
    #[serde(default)]
    pub promotion: Option<String>,
}

/// Catalog loading failures.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Promotion '{0}' is declared more than once")]
    DuplicatePromotion(String),

    #[error("Product '{product}' references unknown promotion '{promotion}'")]
    UnknownPromotion { product: String, promotion: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl CatalogFile {
    /// Validates every entry and assembles the store.
    pub fn into_store(self) -> Result<Store, CatalogError> {
        let mut promotions: HashMap<String, Arc<Promotion>> = HashMap::new();
        for entry in self.promotions {
            if promotions.contains_key(&entry.name) {
                return Err(CatalogError::DuplicatePromotion(entry.name));
            }
            let promotion = Promotion::new(entry.name.clone(), entry.rule)?;
            promotions.insert(entry.name, Arc::new(promotion));
        }

        let mut store = Store::new();
        for entry in self.products {
            let mut product = Product::new(entry.name, entry.price, entry.stock)?;
            if let Some(name) = entry.promotion {
                let promotion = promotions.get(&name).ok_or_else(|| {
                    CatalogError::UnknownPromotion {
                        product: product.name().to_string(),
                        promotion: name.clone(),
                    }
                })?;
                product.set_promotion(Some(Arc::clone(promotion)));
            }
            store.add_product(product);
        }

        Ok(store)
    }
}

/// Parses a catalog from JSON text.
pub fn parse_catalog(json: &str) -> Result<Store, CatalogError> {
    let file: CatalogFile = serde_json::from_str(json)?;
    file.into_store()
}

/// Reads and parses a catalog file.
pub fn load_catalog(path: &Path) -> Result<Store, CatalogError> {
    let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_catalog(&json)
}

// =============================================================================
// Built-in Seed
// =============================================================================

/// The demo inventory used when no catalog file is configured.
pub fn seed_store() -> CoreResult<Store> {
    let second_half_price = Arc::new(Promotion::second_half_price("Second Half price!"));
    let third_one_free = Arc::new(Promotion::third_one_free("Third One Free!"));
    let thirty_percent = Arc::new(Promotion::percent_discount("30% off!", 30.0)?);

    let mac = Product::tracked("MacBook Air M2", 1450.0, 100)?;

    let mut bose = Product::tracked("Bose QuietComfort Earbuds", 250.0, 500)?;
    bose.set_promotion(Some(second_half_price));

    let mut pixel = Product::tracked("Google Pixel 7", 500.0, 250)?;
    pixel.set_promotion(Some(third_one_free));

    let mut license = Product::untracked("Windows License", 125.0)?;
    license.set_promotion(Some(thirty_percent));

    let shipping = Product::capped("Shipping", 10.0, 250, 1)?;

    Ok(Store::with_products([mac, bose, pixel, license, shipping]))
}

#[cfg(test)]
mod tests {
    use stockroom_core::ProductKind;

    use super::*;

    const SAMPLE: &str = r#"{
        "promotions": [
            { "name": "30% off!", "rule": { "type": "percent_discount", "percent": 30 } },
            { "name": "Third One Free!", "rule": { "type": "third_one_free" } }
        ],
        "products": [
            { "name": "MacBook Air M2", "price": 1450,
              "stock": { "type": "tracked", "quantity": 100 } },
            { "name": "Windows License", "price": 125,
              "stock": { "type": "untracked" }, "promotion": "30% off!" },
            { "name": "Shipping", "price": 10,
              "stock": { "type": "capped_per_order", "quantity": 250, "maximum": 1 },
              "promotion": "Third One Free!" }
        ]
    }"#;

    #[test]
    fn test_seed_store() {
        let store = seed_store().unwrap();
        assert_eq!(store.len(), 5);
        assert_eq!(store.total_quantity(), 100 + 500 + 250 + 250);
        assert_eq!(store.active_products().len(), 5);
        assert_eq!(
            store.products()[1].show(),
            "Bose QuietComfort Earbuds, Price: $250, Quantity: 500, Promotion: Second Half price!"
        );
    }

    #[test]
    fn test_parse_catalog() {
        let store = parse_catalog(SAMPLE).unwrap();
        let kinds: Vec<_> = store.products().iter().map(|p| p.kind()).collect();
        assert_eq!(
            kinds,
            [ProductKind::Tracked, ProductKind::Untracked, ProductKind::CappedPerOrder]
        );

        let license = &store.products()[1];
        assert_eq!(license.promotion().map(|p| p.name()), Some("30% off!"));
        assert_eq!(store.products()[2].maximum(), Some(1));
    }

    #[test]
    fn test_unknown_promotion() {
        let json = r#"{ "products": [
            { "name": "Gum", "price": 1, "stock": { "type": "tracked", "quantity": 3 },
              "promotion": "Nope" }
        ] }"#;
        let err = parse_catalog(json).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownPromotion { ref promotion, .. } if promotion == "Nope"));
    }

    #[test]
    fn test_duplicate_promotion() {
        let json = r#"{
            "promotions": [
                { "name": "Deal", "rule": { "type": "second_half_price" } },
                { "name": "Deal", "rule": { "type": "third_one_free" } }
            ],
            "products": []
        }"#;
        assert!(matches!(
            parse_catalog(json),
            Err(CatalogError::DuplicatePromotion(name)) if name == "Deal"
        ));
    }

    #[test]
    fn test_invalid_values_surface_core_errors() {
        let json = r#"{ "products": [
            { "name": "Broken", "price": -1, "stock": { "type": "untracked" } }
        ] }"#;
        assert!(matches!(
            parse_catalog(json),
            Err(CatalogError::Core(CoreError::InvalidArgument(_)))
        ));

        let json = r#"{
            "promotions": [ { "name": "Too much", "rule": { "type": "percent_discount", "percent": 150 } } ],
            "products": []
        }"#;
        assert!(matches!(parse_catalog(json), Err(CatalogError::Core(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(parse_catalog("{ nope"), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = load_catalog(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
