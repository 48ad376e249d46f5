//! Catalog sources
//!
//! Anything that can produce a fresh catalog snapshot on demand.

use super::models::{CatalogSnapshot, Category, Price, Product};
use crate::error::GenerationError;

/// Producer of catalog snapshots consulted on every cache miss.
pub trait CatalogSource: Send + Sync {
    /// Builds a fresh snapshot.
    fn generate(&self) -> Result<CatalogSnapshot, GenerationError>;
}

/// The built-in, fixed product list.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticCatalog;

impl CatalogSource for StaticCatalog {
    fn generate(&self) -> Result<CatalogSnapshot, GenerationError> {
        let electronics = Category::new(101, "Electronics");
        let accessories = Category::new(102, "Accessories");

        Ok(vec![
            Product {
                id: 1,
                name: "Laptop".to_string(),
                price: Price::from_cents(129_999),
                stock: 25,
                category: electronics.clone(),
            },
            Product {
                id: 2,
                name: "Smartphone".to_string(),
                price: Price::from_cents(79_950),
                stock: 50,
                category: electronics,
            },
            Product {
                id: 3,
                name: "Wireless Headphones".to_string(),
                price: Price::from_cents(14_999),
                stock: 120,
                category: accessories.clone(),
            },
            Product {
                id: 4,
                name: "USB-C Charger".to_string(),
                price: Price::from_cents(2_995),
                stock: 300,
                category: accessories,
            },
        ])
    }
}
