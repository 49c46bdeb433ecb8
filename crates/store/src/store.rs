use chrono::Utc;
use serde::{Deserialize, Serialize};

use adhcart_cart::{
    AddToCart, CartCommand, CartEvent, CartLine, CartSession, Checkout, Receipt, UpdateQuantity,
};
use adhcart_catalog::{Catalog, Product, ProductId};
use adhcart_core::{Aggregate, AggregateRoot, DomainError, DomainResult, SessionId};
use adhcart_events::Event;

/// Report for a successful add: what went in and what the line now holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedToCart {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub line_quantity: u32,
}

/// What an update actually did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateOutcome {
    /// The requested quantity matched the current one.
    Unchanged,
    /// The line was kept with a new quantity.
    Updated {
        name: String,
        old_quantity: u32,
        new_quantity: u32,
    },
    /// The line was removed; its full quantity returned to stock.
    Removed { name: String, quantity: u32 },
}

/// Result of a checkout request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutOutcome {
    /// Order placed; the cart was cleared and the units are sold.
    Placed(Receipt),
    /// Caller declined at the confirmation prompt; nothing changed.
    Declined(Receipt),
}

/// The Catalog & Cart store.
///
/// Owns the one [`CartSession`] of the process and exposes its operations
/// as plain request/response calls: validate via `handle`, mutate via
/// `apply`, report the outcome. A failed call never mutates anything.
#[derive(Debug)]
pub struct CartStore {
    session: CartSession,
}

impl CartStore {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            session: CartSession::new(SessionId::new(), catalog),
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session.id_typed()
    }

    /// All catalog products in presentation order.
    pub fn products(&self) -> &[Product] {
        self.session.catalog().products()
    }

    /// Case- and trim-insensitive lookup. No side effects.
    pub fn find_product(&self, raw_id: &str) -> DomainResult<&Product> {
        self.session.find_product(raw_id)
    }

    pub fn cart_lines(&self) -> &[CartLine] {
        self.session.lines()
    }

    pub fn cart_is_empty(&self) -> bool {
        self.session.is_empty()
    }

    /// Itemized summary of the current cart with the grand total.
    pub fn cart_receipt(&self) -> Receipt {
        self.session.receipt()
    }

    /// Add `quantity` units of a product to the cart.
    ///
    /// Merges into the product's existing line if there is one and reserves
    /// the units from stock.
    pub fn add_to_cart(&mut self, raw_id: &str, quantity: u32) -> DomainResult<AddedToCart> {
        let product_id: ProductId = raw_id.parse()?;
        let events = self.execute(CartCommand::AddToCart(AddToCart {
            session_id: self.session_id(),
            product_id: product_id.clone(),
            quantity,
            occurred_at: Utc::now(),
        }))?;

        let name = self
            .session
            .catalog()
            .get(&product_id)
            .map(|p| p.name().to_string())
            .unwrap_or_default();
        let line_quantity = self
            .session
            .lines()
            .iter()
            .find(|l| l.product_id == product_id)
            .map(|l| l.quantity)
            .unwrap_or(quantity);

        debug_assert_eq!(events.len(), 1);
        tracing::info!(
            session_id = %self.session_id(),
            product_id = %product_id,
            quantity,
            line_quantity,
            "item added to cart"
        );

        Ok(AddedToCart {
            product_id,
            name,
            quantity,
            line_quantity,
        })
    }

    /// Set the absolute quantity of the cart line at a 1-based position.
    ///
    /// Zero removes the line and restores its quantity to stock; the same
    /// quantity is reported as [`UpdateOutcome::Unchanged`].
    pub fn update_quantity(&mut self, line_no: u32, quantity: u32) -> DomainResult<UpdateOutcome> {
        let events = self.execute(CartCommand::UpdateQuantity(UpdateQuantity {
            session_id: self.session_id(),
            line_no,
            quantity,
            occurred_at: Utc::now(),
        }))?;

        let outcome = match events.first() {
            None => UpdateOutcome::Unchanged,
            Some(CartEvent::QuantityUpdated(e)) => UpdateOutcome::Updated {
                name: self.product_name(&e.product_id),
                old_quantity: e.old_quantity,
                new_quantity: e.new_quantity,
            },
            Some(CartEvent::ItemRemoved(e)) => UpdateOutcome::Removed {
                name: self.product_name(&e.product_id),
                quantity: e.quantity,
            },
            Some(other) => {
                return Err(DomainError::invariant(format!(
                    "unexpected event '{}' from quantity update",
                    other.event_type()
                )));
            }
        };

        tracing::info!(
            session_id = %self.session_id(),
            line_no,
            quantity,
            outcome = ?outcome,
            "cart line updated"
        );

        Ok(outcome)
    }

    /// Finalize the cart.
    ///
    /// The receipt is computed before anything is cleared, so both outcomes
    /// carry the same itemized summary the confirmation prompt showed.
    /// Declining leaves the cart untouched; confirming clears it without
    /// restoring stock.
    pub fn checkout(&mut self, confirmed: bool) -> DomainResult<CheckoutOutcome> {
        let command = CartCommand::Checkout(Checkout {
            session_id: self.session_id(),
            occurred_at: Utc::now(),
        });
        let events = self.session.handle(&command)?;

        let receipt = match events.first() {
            Some(CartEvent::CheckedOut(e)) => e.receipt.clone(),
            _ => {
                return Err(DomainError::invariant(
                    "checkout emitted no checked-out event",
                ));
            }
        };

        if !confirmed {
            tracing::info!(session_id = %self.session_id(), "checkout declined");
            return Ok(CheckoutOutcome::Declined(receipt));
        }

        self.apply_all(&events);
        tracing::info!(
            session_id = %self.session_id(),
            total = %receipt.total,
            items = receipt.lines.len(),
            "order placed"
        );
        Ok(CheckoutOutcome::Placed(receipt))
    }

    fn execute(&mut self, command: CartCommand) -> DomainResult<Vec<CartEvent>> {
        let events = self.session.handle(&command)?;
        self.apply_all(&events);
        Ok(events)
    }

    fn apply_all(&mut self, events: &[CartEvent]) {
        for event in events {
            tracing::debug!(
                session_id = %self.session_id(),
                event_type = event.event_type(),
                version = self.session.version(),
                "applying cart event"
            );
            self.session.apply(event);
        }
    }

    fn product_name(&self, product_id: &ProductId) -> String {
        self.session
            .catalog()
            .get(product_id)
            .map(|p| p.name().to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adhcart_catalog::seed_catalog;
    use adhcart_core::Money;

    fn test_store() -> CartStore {
        CartStore::new(seed_catalog().unwrap())
    }

    #[test]
    fn add_reports_the_resulting_line_quantity() {
        let mut store = test_store();
        let added = store.add_to_cart("p002", 5).unwrap();
        assert_eq!(added.name, "Mouse");
        assert_eq!(added.quantity, 5);
        assert_eq!(added.line_quantity, 5);

        let added = store.add_to_cart("P002", 3).unwrap();
        assert_eq!(added.line_quantity, 8);
        assert_eq!(store.cart_lines().len(), 1);
    }

    #[test]
    fn failed_add_leaves_no_trace() {
        let mut store = test_store();
        let err = store.add_to_cart("P002", 51).unwrap_err();
        assert_eq!(err, DomainError::insufficient_stock("Mouse", 50));
        assert!(store.cart_is_empty());
        assert_eq!(store.find_product("P002").unwrap().stock(), 50);
    }

    #[test]
    fn update_reports_what_it_did() {
        let mut store = test_store();
        store.add_to_cart("P002", 5).unwrap();

        assert_eq!(store.update_quantity(1, 5).unwrap(), UpdateOutcome::Unchanged);

        assert_eq!(
            store.update_quantity(1, 3).unwrap(),
            UpdateOutcome::Updated {
                name: "Mouse".to_string(),
                old_quantity: 5,
                new_quantity: 3,
            }
        );

        assert_eq!(
            store.update_quantity(1, 0).unwrap(),
            UpdateOutcome::Removed {
                name: "Mouse".to_string(),
                quantity: 3,
            }
        );
        assert!(store.cart_is_empty());
        assert_eq!(store.find_product("P002").unwrap().stock(), 50);
    }

    #[test]
    fn declined_checkout_keeps_the_cart() {
        let mut store = test_store();
        store.add_to_cart("P002", 5).unwrap();

        let outcome = store.checkout(false).unwrap();
        match outcome {
            CheckoutOutcome::Declined(receipt) => {
                assert_eq!(receipt.total, Money::from_minor(1_250_000));
            }
            _ => panic!("Expected Declined outcome"),
        }
        assert_eq!(store.cart_lines().len(), 1);
        assert_eq!(store.find_product("P002").unwrap().stock(), 45);
    }

    #[test]
    fn confirmed_checkout_clears_the_cart_and_keeps_stock_sold() {
        let mut store = test_store();
        store.add_to_cart("P002", 5).unwrap();

        let outcome = store.checkout(true).unwrap();
        match outcome {
            CheckoutOutcome::Placed(receipt) => {
                assert_eq!(receipt.lines.len(), 1);
                assert_eq!(receipt.total, Money::from_minor(1_250_000));
            }
            _ => panic!("Expected Placed outcome"),
        }
        assert!(store.cart_is_empty());
        assert_eq!(store.find_product("P002").unwrap().stock(), 45);
    }

    #[test]
    fn checkout_on_empty_cart_is_reported_not_applied() {
        let mut store = test_store();
        assert_eq!(store.checkout(true).unwrap_err(), DomainError::EmptyCart);
    }
}
