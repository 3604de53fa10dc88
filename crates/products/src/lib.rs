//! Products domain module.
//!
//! Priced, discounted, stocked items. Each product derives a SKU slug from
//! its name; SKUs are unique across the product registry.

pub mod product;

pub use product::{Product, ProductId};
