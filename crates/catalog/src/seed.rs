//! The fixed product list the application starts with.

use adhcart_core::{DomainResult, Money};

use crate::catalog::Catalog;
use crate::product::Product;

/// Seed products, in presentation order.
pub fn seed_products() -> DomainResult<Vec<Product>> {
    Ok(vec![
        Product::new("P001", "Laptop", Money::from_minor(8_000_000), 15)?,
        Product::new("P002", "Mouse", Money::from_minor(250_000), 50)?,
        Product::new("P003", "Keyboard", Money::from_minor(340_000), 30)?,
        Product::new("P004", "Monitor", Money::from_minor(1_500_000), 15)?,
        Product::new("P005", "Webcam", Money::from_minor(170_000), 20)?,
        Product::new("P006", "Smart Watch", Money::from_minor(230_000), 20)?,
        Product::new("P007", "Speaker", Money::from_minor(600_000), 15)?,
        Product::new("P008", "Mobile Phone", Money::from_minor(2_500_000), 30)?,
        Product::new("P009", "Power Bank", Money::from_minor(120_000), 15)?,
        Product::new("P010", "Sony Camera", Money::from_minor(6_500_000), 10)?,
    ])
}

/// The catalog built from [`seed_products`].
pub fn seed_catalog() -> DomainResult<Catalog> {
    Catalog::new(seed_products()?)
}
