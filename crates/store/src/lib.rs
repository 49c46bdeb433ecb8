//! `adhcart-store`
//!
//! **Responsibility:** the synchronous call surface the presentation layer
//! consumes. `CartStore` wraps the cart session aggregate, stamps commands,
//! applies the resulting events, and maps them to caller-facing reports.
//! No business rule lives here.

pub mod store;

pub use store::{AddedToCart, CartStore, CheckoutOutcome, UpdateOutcome};
