//! # Product Catalog
//!
//! Products the storefront offers, loaded from a TOML file.
//!
//! Each product card in the shop carries an id, a display name and a price;
//! the catalog is where those attributes live so the console can resolve
//! `add rice-25kg 2` to a full line item.
//!
//! ## File Format
//! ```toml
//! [[products]]
//! id = "rice-25kg"
//! name = "Premium Rice 25kg"
//! price = "32.50"
//! description = "Long grain, double polished"
//! ```
//!
//! Prices may be written as decimal strings (`"32.50"`, `"$1,200"`) or whole
//! dollar integers (`12`). Floats are rejected so `0.1 + 0.2` never sneaks in.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use jackmar_core::validation::{validate_price, validate_product_id, validate_product_name};
use jackmar_core::{Money, ValidationError};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AppError, AppResult};

/// A product that can be added to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: Money,
    pub description: Option<String>,
}

/// Ordered product list with id lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

// =============================================================================
// File Schema
// =============================================================================

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    products: Vec<RawProduct>,
}

#[derive(Debug, Deserialize)]
struct RawProduct {
    id: String,
    name: String,
    price: RawPrice,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Text(String),
    Dollars(i64),
}

impl RawPrice {
    fn to_money(&self) -> Result<Money, ValidationError> {
        match self {
            RawPrice::Text(text) => Money::parse(text),
            RawPrice::Dollars(dollars) => dollars
                .checked_mul(100)
                .map(Money::from_cents)
                .ok_or_else(|| ValidationError::InvalidFormat {
                    field: "price".to_string(),
                    reason: "amount is too large".to_string(),
                }),
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

impl Catalog {
    /// A catalog with no products.
    pub fn empty() -> Self {
        Catalog::default()
    }

    /// Builds a catalog, checking ids, names, prices and id uniqueness.
    pub fn from_products(products: Vec<Product>) -> AppResult<Self> {
        let mut seen: HashSet<String> = HashSet::new();
        for product in &products {
            validate_product_id(&product.id)?;
            validate_product_name(&product.name)?;
            validate_price(product.price)?;
            if !seen.insert(product.id.clone()) {
                return Err(ValidationError::Duplicate {
                    field: "product id".to_string(),
                    value: product.id.clone(),
                }
                .into());
            }
        }
        Ok(Catalog { products })
    }

    /// Parses a catalog from TOML text.
    pub fn from_toml_str(text: &str) -> AppResult<Self> {
        let file: CatalogFile = toml::from_str(text)
            .map_err(|e| AppError::config(format!("Invalid catalog: {}", e)))?;

        let products = file
            .products
            .into_iter()
            .map(|raw| -> AppResult<Product> {
                let price = raw.price.to_money().map_err(|e| {
                    AppError::validation(format!("Product '{}': {}", raw.id, e))
                })?;
                Ok(Product {
                    id: raw.id.trim().to_string(),
                    name: raw.name.trim().to_string(),
                    price,
                    description: raw.description,
                })
            })
            .collect::<AppResult<Vec<Product>>>()?;

        Catalog::from_products(products)
    }

    /// Reads and parses a catalog file.
    pub fn load(path: &Path) -> AppResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("Cannot read catalog {}: {}", path.display(), e))
        })?;
        let catalog = Catalog::from_toml_str(&text)?;
        info!(path = %path.display(), products = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products in file order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
