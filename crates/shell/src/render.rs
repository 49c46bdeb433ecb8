//! Plain-text rendering of store results.

use adhcart_cart::Receipt;
use adhcart_catalog::Product;
use adhcart_core::Money;

pub fn price(amount: Money) -> String {
    format!("₹{amount}")
}

/// The catalog as an aligned table: id, name, price, stock.
pub fn product_table(products: &[Product]) -> String {
    let mut table = format!(
        "{:<6} {:<20} {:>12} {:>6}\n",
        "ID", "Name", "Price", "Stock"
    );
    for product in products {
        table.push_str(&format!(
            "{:<6} {:<20} {:>12} {:>6}\n",
            product.id_typed().as_str(),
            product.name(),
            price(product.unit_price()),
            product.stock()
        ));
    }
    table
}

/// The cart as an aligned table with per-line subtotals and the total.
pub fn cart_table(receipt: &Receipt) -> String {
    let mut table = format!(
        "{:<4} {:<20} {:>5} {:>12} {:>12}\n",
        "#", "Product", "Qty", "Price/Item", "Subtotal"
    );
    for (position, line) in receipt.lines.iter().enumerate() {
        table.push_str(&format!(
            "{:<4} {:<20} {:>5} {:>12} {:>12}\n",
            position + 1,
            line.name,
            line.quantity,
            price(line.unit_price),
            price(line.subtotal)
        ));
    }
    table.push_str(&format!("Total Cart Value: {}\n", price(receipt.total)));
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use adhcart_catalog::seed_products;

    #[test]
    fn product_table_lists_every_seeded_product() {
        let products = seed_products().unwrap();
        let table = product_table(&products);
        assert!(table.contains("P001"));
        assert!(table.contains("Laptop"));
        assert!(table.contains("₹80000.00"));
        assert!(table.contains("Sony Camera"));
        assert_eq!(table.lines().count(), 11); // header + ten products
    }

    #[test]
    fn cart_table_numbers_lines_and_shows_the_total() {
        use adhcart_cart::ReceiptLine;

        let receipt = Receipt {
            lines: vec![ReceiptLine {
                product_id: "P002".parse().unwrap(),
                name: "Mouse".to_string(),
                quantity: 5,
                unit_price: Money::from_minor(250_000),
                subtotal: Money::from_minor(1_250_000),
            }],
            total: Money::from_minor(1_250_000),
        };

        let table = cart_table(&receipt);
        assert!(table.contains("Mouse"));
        assert!(table.starts_with("#"));
        assert!(table.contains("₹12500.00"));
        assert!(table.contains("Total Cart Value: ₹12500.00"));
    }
}
