//! Plain-text views. Pure functions of state; no IO.

use storefront_cart::selectors;
use storefront_cart::{CartLine, CartState, Receipt};
use storefront_core::format_price;
use storefront_products::Product;

pub const EMPTY_CART: &str = "Your cart is empty.";

/// Top bar with the cart badge.
pub fn header(cart: &CartState) -> String {
    format!("Storefront | Cart ({})", selectors::item_count(cart))
}

pub fn product_list(products: &[Product], cart: &CartState) -> String {
    if products.is_empty() {
        return "No products available.".to_string();
    }

    products
        .iter()
        .map(|p| {
            let mut row = format!(
                "[{:>3}] {}  {}  ({})",
                p.id,
                p.title,
                format_price(p.price),
                p.category
            );
            if let Some(rating) = p.rating {
                row.push_str(&format!("  rated {:.1} by {}", rating.rate, rating.count));
            }
            if let Some(line) = selectors::line(cart, p.id) {
                row.push_str(&format!("  [in cart x{}]", line.qty));
            }
            row
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn line_row(line: &CartLine) -> String {
    format!(
        "[{:>3}] {}  {} x {} = {}",
        line.product.id,
        line.product.title,
        format_price(line.product.price),
        line.qty,
        format_price(selectors::line_total(line))
    )
}

fn totals(cart: &CartState) -> Vec<String> {
    vec![
        format!("Items  {}", selectors::item_count(cart)),
        format!("Total  {}", format_price(selectors::total_price(cart))),
    ]
}

pub fn cart_view(cart: &CartState) -> String {
    if cart.is_empty() {
        return EMPTY_CART.to_string();
    }

    let mut rows: Vec<String> = vec!["Your Cart".to_string()];
    rows.extend(cart.lines().iter().map(line_row));
    rows.push(String::new());
    rows.extend(totals(cart));
    rows.join("\n")
}

pub fn checkout_summary(cart: &CartState) -> String {
    let mut rows = vec!["Summary".to_string()];
    rows.extend(totals(cart));
    rows.join("\n")
}

pub fn receipt(receipt: &Receipt) -> String {
    [
        "Order placed! (demo)".to_string(),
        format!("Order    {}", receipt.id),
        format!("Placed   {}", receipt.placed_at.to_rfc3339()),
        format!("Items    {}", receipt.total_items),
        format!("Charged  {}", format_price(receipt.total_price)),
    ]
    .join("\n")
}
