//! Black-box test of the store surface: the whole shopping flow through
//! the same calls the shell makes.

use adhcart_catalog::seed_catalog;
use adhcart_core::{DomainError, Money};
use adhcart_store::{CartStore, CheckoutOutcome, UpdateOutcome};

fn store() -> CartStore {
    CartStore::new(seed_catalog().unwrap())
}

#[test]
fn browse_add_update_checkout() {
    let mut store = store();

    // Browse: ten seeded products, lookup tolerant of case and whitespace.
    assert_eq!(store.products().len(), 10);
    let mouse = store.find_product("  p002 ").unwrap();
    assert_eq!(mouse.name(), "Mouse");
    assert_eq!(mouse.stock(), 50);

    // Fill the cart.
    store.add_to_cart("p002", 5).unwrap();
    store.add_to_cart("P001", 1).unwrap();
    store.add_to_cart("P002", 2).unwrap(); // merges into the mouse line

    let receipt = store.cart_receipt();
    assert_eq!(receipt.lines.len(), 2);
    assert_eq!(receipt.lines[0].name, "Mouse");
    assert_eq!(receipt.lines[0].quantity, 7);
    assert_eq!(receipt.total, Money::from_minor(7 * 250_000 + 8_000_000));
    assert_eq!(store.find_product("P002").unwrap().stock(), 43);

    // Trim the laptop off, shrink the mice.
    assert_eq!(
        store.update_quantity(2, 0).unwrap(),
        UpdateOutcome::Removed {
            name: "Laptop".to_string(),
            quantity: 1,
        }
    );
    assert_eq!(store.find_product("P001").unwrap().stock(), 15);

    store.update_quantity(1, 4).unwrap();
    assert_eq!(store.find_product("P002").unwrap().stock(), 46);

    // Decline once, then place the order.
    let declined = store.checkout(false).unwrap();
    assert!(matches!(declined, CheckoutOutcome::Declined(_)));
    assert_eq!(store.cart_lines().len(), 1);

    let placed = store.checkout(true).unwrap();
    let receipt = match placed {
        CheckoutOutcome::Placed(receipt) => receipt,
        _ => panic!("Expected Placed outcome"),
    };
    assert_eq!(receipt.total, Money::from_minor(4 * 250_000));

    // Cart cleared, stock sold.
    assert!(store.cart_is_empty());
    assert_eq!(store.find_product("P002").unwrap().stock(), 46);

    // Nothing left to check out.
    assert_eq!(store.checkout(true).unwrap_err(), DomainError::EmptyCart);
}

#[test]
fn every_failure_is_reported_before_any_mutation() {
    let mut store = store();

    assert_eq!(
        store.add_to_cart("UNKNOWN", 1).unwrap_err(),
        DomainError::unknown_product("UNKNOWN")
    );
    assert!(matches!(
        store.add_to_cart("   ", 1).unwrap_err(),
        DomainError::Validation(_)
    ));
    assert!(matches!(
        store.add_to_cart("P002", 0).unwrap_err(),
        DomainError::Validation(_)
    ));
    assert_eq!(
        store.add_to_cart("P002", 51).unwrap_err(),
        DomainError::insufficient_stock("Mouse", 50)
    );
    assert_eq!(
        store.update_quantity(1, 3).unwrap_err(),
        DomainError::EmptyCart
    );

    // None of the rejected calls left anything behind.
    assert!(store.cart_is_empty());
    for product in store.products() {
        assert!(product.stock() > 0);
    }
    assert_eq!(store.find_product("P002").unwrap().stock(), 50);
}

#[test]
fn out_of_stock_is_distinct_from_insufficient_stock() {
    let mut store = store();

    // Reserve every camera, then ask for one more.
    store.add_to_cart("P010", 10).unwrap();
    assert_eq!(
        store.add_to_cart("P010", 1).unwrap_err(),
        DomainError::out_of_stock("Sony Camera")
    );

    // A partially stocked product reports how many are left instead.
    store.add_to_cart("P009", 10).unwrap();
    assert_eq!(
        store.add_to_cart("P009", 6).unwrap_err(),
        DomainError::insufficient_stock("Power Bank", 5)
    );
}
