//! `adhcart-shell`
//!
//! **Responsibility:** the interactive terminal front-end.
//!
//! A menu-driven read/print loop over the store's operations: product
//! table, add/update prompts, cart view, checkout confirmation. All
//! business rules stay behind the store surface; this crate only collects
//! input and renders results.

pub mod render;
pub mod repl;
