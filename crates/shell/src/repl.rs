//! The menu-driven read/print loop.

use std::io::{self, BufRead, Write};

use adhcart_core::{DomainError, DomainResult};
use adhcart_store::{CartStore, CheckoutOutcome, UpdateOutcome};

use crate::render;

const MENU: &str = "\n==== ADH Cart ====\n\
1. View Products\n\
2. Add to Cart\n\
3. View Cart\n\
4. Update Cart\n\
5. Checkout\n\
6. Exit\n";

/// Drive the store from `input` until the user exits or input ends.
pub fn run<R: BufRead, W: Write>(
    store: &mut CartStore,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "Welcome to ADH Cart!")?;

    loop {
        out.write_all(MENU.as_bytes())?;
        let Some(choice) = prompt(input, out, "Select an option: ")? else {
            break;
        };

        match choice.trim() {
            "1" => view_products(store, out)?,
            "2" => add_to_cart(store, input, out)?,
            "3" => view_cart(store, out)?,
            "4" => update_cart(store, input, out)?,
            "5" => checkout(store, input, out)?,
            "6" | "q" | "exit" => {
                writeln!(out, "Thank you for shopping with us. ~ ADH Cart")?;
                break;
            }
            "" => {}
            other => writeln!(out, "Unknown option '{other}'.")?,
        }
    }

    Ok(())
}

fn view_products<W: Write>(store: &CartStore, out: &mut W) -> io::Result<()> {
    writeln!(out, "\nAvailable Products")?;
    out.write_all(render::product_table(store.products()).as_bytes())
}

fn add_to_cart<R: BufRead, W: Write>(
    store: &mut CartStore,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    view_products(store, out)?;

    let Some(raw_id) = prompt(input, out, "Product ID: ")? else {
        return Ok(());
    };
    let Some(raw_quantity) = prompt(input, out, "Quantity: ")? else {
        return Ok(());
    };

    let result = parse_quantity(&raw_quantity).and_then(|quantity| {
        store.add_to_cart(&raw_id, quantity)
    });
    match result {
        Ok(added) => writeln!(
            out,
            "Added {} x '{}' to cart ({} in cart).",
            added.quantity, added.name, added.line_quantity
        ),
        Err(err) => report(out, &err),
    }
}

fn view_cart<W: Write>(store: &CartStore, out: &mut W) -> io::Result<()> {
    writeln!(out, "\nYour Shopping Cart")?;
    if store.cart_is_empty() {
        return writeln!(out, "Your cart is empty.");
    }
    out.write_all(render::cart_table(&store.cart_receipt()).as_bytes())
}

fn update_cart<R: BufRead, W: Write>(
    store: &mut CartStore,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    if store.cart_is_empty() {
        return writeln!(out, "Your cart is empty. Nothing to update.");
    }
    view_cart(store, out)?;

    let Some(raw_line) = prompt(input, out, "Item number: ")? else {
        return Ok(());
    };
    let Some(raw_quantity) = prompt(input, out, "New quantity: ")? else {
        return Ok(());
    };

    let result = parse_line_no(&raw_line).and_then(|line_no| {
        parse_quantity(&raw_quantity)
            .and_then(|quantity| store.update_quantity(line_no, quantity))
    });
    match result {
        Ok(UpdateOutcome::Unchanged) => writeln!(out, "Quantity is already the same."),
        Ok(UpdateOutcome::Updated {
            name, new_quantity, ..
        }) => writeln!(out, "Quantity of '{name}' updated to {new_quantity}."),
        Ok(UpdateOutcome::Removed { name, .. }) => {
            writeln!(out, "'{name}' removed from cart.")
        }
        Err(err) => report(out, &err),
    }
}

fn checkout<R: BufRead, W: Write>(
    store: &mut CartStore,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    if store.cart_is_empty() {
        return writeln!(out, "Your cart is empty. Nothing to checkout.");
    }

    view_cart(store, out)?;
    writeln!(out, "Final Total: {}", render::price(store.cart_receipt().total))?;

    let Some(answer) = prompt(input, out, "Proceed with checkout? (y/n): ")? else {
        return Ok(());
    };
    let confirmed = matches!(answer.trim().to_lowercase().as_str(), "y" | "yes");

    match store.checkout(confirmed) {
        Ok(CheckoutOutcome::Placed(_)) => {
            writeln!(out, "Order placed successfully! Thank you for shopping with us.")
        }
        Ok(CheckoutOutcome::Declined(_)) => writeln!(out, "Checkout cancelled."),
        Err(err) => report(out, &err),
    }
}

/// Write a prompt, read one line. `None` means input ended.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    text: &str,
) -> io::Result<Option<String>> {
    out.write_all(text.as_bytes())?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

fn report<W: Write>(out: &mut W, err: &DomainError) -> io::Result<()> {
    writeln!(out, "Error: {err}")
}

fn parse_quantity(raw: &str) -> DomainResult<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DomainError::validation("quantity is required"));
    }
    let value: i64 = raw
        .parse()
        .map_err(|_| DomainError::validation("quantity must be a whole number"))?;
    if value < 0 {
        return Err(DomainError::validation("quantity cannot be negative"));
    }
    u32::try_from(value).map_err(|_| DomainError::validation("quantity is too large"))
}

fn parse_line_no(raw: &str) -> DomainResult<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DomainError::validation("item number is required"));
    }
    raw.parse()
        .map_err(|_| DomainError::validation("item number must be a whole number"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use adhcart_catalog::seed_catalog;

    fn run_script(script: &str) -> String {
        let mut store = CartStore::new(seed_catalog().unwrap());
        let mut input = Cursor::new(script.to_string());
        let mut out = Vec::new();
        run(&mut store, &mut input, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn view_products_lists_the_catalog() {
        let out = run_script("1\n6\n");
        assert!(out.contains("Available Products"));
        assert!(out.contains("Laptop"));
        assert!(out.contains("₹80000.00"));
    }

    #[test]
    fn add_then_view_then_place_order() {
        let out = run_script("2\np002\n5\n3\n5\ny\n6\n");
        assert!(out.contains("Added 5 x 'Mouse' to cart (5 in cart)."));
        assert!(out.contains("Total Cart Value: ₹12500.00"));
        assert!(out.contains("Final Total: ₹12500.00"));
        assert!(out.contains("Order placed successfully!"));
    }

    #[test]
    fn declined_checkout_is_cancelled() {
        let out = run_script("2\np002\n5\n5\nn\n3\n6\n");
        assert!(out.contains("Checkout cancelled."));
        // Cart survives the declined checkout.
        assert!(out.contains("Total Cart Value: ₹12500.00"));
    }

    #[test]
    fn update_to_zero_removes_the_item() {
        let out = run_script("2\np002\n5\n4\n1\n0\n3\n6\n");
        assert!(out.contains("'Mouse' removed from cart."));
        assert!(out.contains("Your cart is empty."));
    }

    #[test]
    fn bad_quantity_input_is_reported() {
        let out = run_script("2\np002\nabc\n6\n");
        assert!(out.contains("Error: validation failed: quantity must be a whole number"));

        let out = run_script("2\np002\n-3\n6\n");
        assert!(out.contains("Error: validation failed: quantity cannot be negative"));
    }

    #[test]
    fn unknown_product_and_empty_cart_paths_are_reported() {
        let out = run_script("2\nP999\n1\n5\n4\n6\n");
        assert!(out.contains("Error: no product with id 'P999'"));
        assert!(out.contains("Your cart is empty. Nothing to checkout."));
        assert!(out.contains("Your cart is empty. Nothing to update."));
    }

    #[test]
    fn input_ending_mid_prompt_exits_cleanly() {
        let out = run_script("2\np002\n");
        assert!(out.contains("Quantity: "));
        assert!(!out.contains("Added"));
    }
}
