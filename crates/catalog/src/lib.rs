//! Product catalog module.
//!
//! This crate contains the fixed set of purchasable products: the
//! `Product` entity, the normalized `ProductId` code, the ordered
//! `Catalog` with case- and trim-insensitive lookup, and the seed list
//! the application starts with.

pub mod catalog;
pub mod product;
pub mod seed;

pub use catalog::Catalog;
pub use product::{Product, ProductId};
pub use seed::{seed_catalog, seed_products};
