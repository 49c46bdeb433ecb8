use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use adhcart_core::{DomainError, DomainResult, Entity};

use crate::product::{Product, ProductId};

/// The fixed, ordered set of purchasable products.
///
/// Order is presentation order (the seed order); lookup goes through
/// `ProductId` normalization so raw user input may be any case and carry
/// surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate product ids.
    pub fn new(products: Vec<Product>) -> DomainResult<Self> {
        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(product.id().clone()) {
                return Err(DomainError::validation(format!(
                    "duplicate product id '{}'",
                    product.id()
                )));
            }
        }
        Ok(Self { products })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by raw user input (case- and trim-insensitive).
    pub fn find(&self, raw_id: &str) -> DomainResult<&Product> {
        let id: ProductId = raw_id.parse()?;
        self.get(&id)
            .ok_or_else(|| DomainError::unknown_product(id.as_str()))
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    pub fn get_mut(&mut self, id: &ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id() == id)
    }
}
