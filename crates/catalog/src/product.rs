use core::str::FromStr;

use serde::{Deserialize, Serialize};

use adhcart_core::{DomainError, DomainResult, Entity, Money, ValueObject};

/// Catalog code identifying a product (e.g. `P002`).
///
/// The only constructor is `FromStr`, which trims and uppercases, so a held
/// `ProductId` is always in normalized form; comparing two of them is what
/// makes catalog lookup case- and trim-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProductId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if code.is_empty() {
            return Err(DomainError::validation("product id cannot be empty"));
        }
        Ok(Self(code.to_uppercase()))
    }
}

impl ValueObject for ProductId {}

/// Entity: a purchasable product.
///
/// Products are created once at startup from the seed list and never added
/// or removed afterwards; only `stock` mutates. `stock` counts the units
/// available for *new* cart reservations — it already excludes quantities
/// held by existing cart lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    unit_price: Money,
    stock: u32,
}

impl Product {
    pub fn new(id: &str, name: &str, unit_price: Money, stock: u32) -> DomainResult<Self> {
        let id = id.parse::<ProductId>()?;
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        if unit_price.is_zero() {
            return Err(DomainError::validation("unit price must be positive"));
        }
        Ok(Self {
            id,
            name: name.to_string(),
            unit_price,
            stock,
        })
    }

    pub fn id_typed(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.stock == 0
    }

    /// Take `quantity` units out of stock.
    ///
    /// Callers must have checked `quantity <= stock`; decision logic does so
    /// before any mutation runs.
    pub fn reserve(&mut self, quantity: u32) {
        self.stock -= quantity;
    }

    /// Return `quantity` units to stock.
    pub fn restock(&mut self, quantity: u32) {
        self.stock += quantity;
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
