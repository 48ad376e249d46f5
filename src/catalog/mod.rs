//! Catalog Module
//!
//! Product data model, the source that generates it, and the cached service
//! handlers read from.

mod models;
mod service;
mod source;

pub use models::{CatalogSnapshot, Category, Price, Product};
pub use service::{CatalogService, PRODUCTS_KEY};
pub use source::{CatalogSource, StaticCatalog};
