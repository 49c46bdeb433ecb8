use serde::{Deserialize, Serialize};

use adhcart_catalog::ProductId;
use adhcart_core::Money;

/// One rendered cart position: product, quantity, line subtotal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub subtotal: Money,
}

/// Itemized cart summary with the grand total.
///
/// Computed from live state before any clearing, so the checkout
/// confirmation prompt and the final order summary show the same numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub lines: Vec<ReceiptLine>,
    pub total: Money,
}

impl Receipt {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
