//! # Console Reports
//!
//! Human-readable renderings of API records for the demo output.

use cult_client::WaitOutcome;
use cult_core::{Category, Order, OrderConfirmation, OrderStatus, Product, SearchResults};

/// Characters of product description shown before truncation
const DESCRIPTION_PREVIEW: usize = 100;

/// Search hits, at most `max` of them
pub fn search_summary(results: &SearchResults, max: usize) -> String {
    let mut out = format!("Found {} products:\n\n", results.total);
    for product in results.products.iter().take(max) {
        out.push_str(&format!(
            "- {}\n  ${:.2}\n  In stock: {}\n  Slug: {}\n\n",
            product.name, product.price.usd, product.in_stock, product.slug
        ));
    }
    out
}

pub fn product_details(product: &Product) -> String {
    let description = product.description.as_deref().unwrap_or("N/A");
    let preview: String = description.chars().take(DESCRIPTION_PREVIEW).collect();

    let mut out = format!(
        "Name: {}\nDescription: {}...\nPrice: ${:.2}\n\nVariants:\n",
        product.name, preview, product.price.usd
    );
    for variant in &product.variants {
        let stock = if variant.in_stock {
            "In Stock"
        } else {
            "Out of Stock"
        };
        out.push_str(&format!(
            "  - {} - ${:.2} ({})\n",
            variant.name,
            variant.effective_price(product),
            stock
        ));
    }
    out
}

/// Payment instructions for a freshly created order
pub fn order_summary(order: &OrderConfirmation) -> String {
    let payment = &order.payment;

    let mut out = format!(
        "Order created: {}\n\nPayment Details:\n  Chain: {}\n  Token: {}\n  Amount: {} {}\n  Address: {}\n\nExpires: {}\n",
        order.order_id,
        payment.chain,
        payment.token,
        payment.amount,
        payment.token,
        payment.address,
        order.expires_at.to_rfc3339()
    );

    if let Some(ref discount) = order.discount {
        out.push_str(&format!(
            "\nDiscount applied: {}% off ({} tier)\n",
            discount.percentage, discount.tier
        ));
    }
    out
}

/// Categories with one level of indentation per nesting depth
pub fn category_tree(categories: &[Category]) -> String {
    fn render(out: &mut String, category: &Category, depth: usize) {
        let indent = "  ".repeat(depth);
        let bullet = if depth == 0 { "" } else { "- " };
        out.push_str(&format!(
            "{}{}{} ({} products)\n",
            indent,
            bullet,
            category.name,
            category.product_count.unwrap_or(0)
        ));
        for sub in &category.subcategories {
            render(out, sub, depth + 1);
        }
    }

    let mut out = String::new();
    for category in categories {
        render(&mut out, category, 0);
    }
    out
}

/// Tracking view of a placed order
pub fn order_tracking(order: &Order) -> String {
    let mut out = format!("Status: {}\n", order.status);
    if let Some(created_at) = order.created_at {
        out.push_str(&format!("Created: {}\n", created_at.to_rfc3339()));
    }
    if let Some(paid_at) = order.paid_at {
        out.push_str(&format!("Paid: {}\n", paid_at.to_rfc3339()));
    }

    if let Some(ref tracking) = order.tracking {
        out.push_str(&format!(
            "\nTracking:\n  Carrier: {}\n  Number: {}\n",
            tracking.carrier, tracking.number
        ));
        if let Some(ref url) = tracking.url {
            out.push_str(&format!("  URL: {}\n", url));
        }
    }

    out.push_str("\nItems:\n");
    for item in &order.items {
        out.push_str(&format!(
            "  - {} x{} @ ${:.2}\n",
            item.name, item.quantity, item.price
        ));
    }

    let totals = order.totals.clone().unwrap_or_default();
    out.push_str(&format!(
        "\nTotals:\n  Subtotal: ${:.2}\n  Shipping: ${:.2}\n  Total: ${:.2}\n",
        totals.subtotal, totals.shipping, totals.total
    ));
    out
}

/// One status observation made while waiting
pub fn status_line(status: &OrderStatus) -> String {
    format!(
        "Status: {}\nAction: {}\n",
        status.status,
        status.next_action().unwrap_or("N/A")
    )
}

pub fn wait_summary(outcome: &WaitOutcome) -> String {
    match outcome {
        WaitOutcome::Paid(status) => match status.paid_at {
            Some(paid_at) => format!("Payment confirmed! Paid at: {}", paid_at.to_rfc3339()),
            None => "Payment confirmed!".to_string(),
        },
        WaitOutcome::Closed(status) => format!("Order {}", status.status),
        WaitOutcome::TimedOut => "Timeout waiting for payment".to_string(),
        WaitOutcome::Cancelled => "Stopped waiting for payment".to_string(),
    }
}
