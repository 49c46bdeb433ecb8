//! Shopping cart module.
//!
//! This crate contains the business rules for the cart: reserving and
//! releasing product stock as line quantities change, merging additions
//! into existing lines, and checkout. Implemented purely as deterministic
//! domain logic (no IO, no rendering, no storage).

pub mod receipt;
pub mod session;

pub use receipt::{Receipt, ReceiptLine};
pub use session::{
    AddToCart, CartCommand, CartEvent, CartLine, CartSession, CheckedOut, Checkout, ItemAdded,
    ItemRemoved, QuantityUpdated, UpdateQuantity,
};
