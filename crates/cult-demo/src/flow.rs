//! # Demonstration Flow
//!
//! The fixed call sequence a shopping agent would typically make:
//! search → product detail → create order → categories. Waiting for payment
//! and tracking an order run separately, once an order id exists.
//!
//! Everything a step prints is also kept in [`Demo::transcript`].

use crate::report;
use async_trait::async_trait;
use cult_client::{CultClient, WaitOutcome};
use cult_core::{
    Category, CultResult, Order, OrderConfirmation, OrderItem, OrderRequest, OrderStatus,
    OrderStatusSource, Product, SearchQuery, ShippingAddress,
};
use std::sync::Mutex;
use tracing::{info, instrument};

/// Demo shipping address
pub fn demo_address() -> ShippingAddress {
    ShippingAddress {
        name: "John Doe".to_string(),
        line1: "123 Main St".to_string(),
        line2: None,
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        postal_code: "94102".to_string(),
        country: "US".to_string(),
    }
}

/// Status source that reports every observation as it is made
struct Narrated<'a> {
    client: &'a CultClient,
    lines: Mutex<String>,
}

#[async_trait]
impl OrderStatusSource for Narrated<'_> {
    async fn order_status(&self, order_id: &str) -> CultResult<OrderStatus> {
        let status = self.client.order_status(order_id).await?;
        let line = report::status_line(&status);
        println!("{}", line);
        let mut lines = self.lines.lock().unwrap_or_else(|e| e.into_inner());
        lines.push_str(&line);
        lines.push('\n');
        Ok(status)
    }
}

/// Runs the demonstration steps against one client
pub struct Demo {
    client: CultClient,
    transcript: String,
}

impl Demo {
    pub fn new(client: CultClient) -> Self {
        Self {
            client,
            transcript: String::new(),
        }
    }

    /// Everything printed so far
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    fn emit(&mut self, text: &str) {
        print!("{}", text);
        self.transcript.push_str(text);
    }

    /// Search for tees under $50; returns the first hit
    #[instrument(skip(self))]
    pub async fn search(&mut self) -> CultResult<Option<Product>> {
        self.emit("=== Searching for tees ===\n\n");

        let query = SearchQuery::new("cotton fleece")
            .with_category("mens-tees")
            .with_price_max(50.0)
            .with_limit(5);
        let results = self.client.search_products(&query).await?;

        self.emit(&report::search_summary(&results, 5));
        Ok(results.products.into_iter().next())
    }

    /// Show one product with its variants
    #[instrument(skip(self))]
    pub async fn product_details(&mut self, slug: &str) -> CultResult<Product> {
        self.emit(&format!("\n=== Product Details: {} ===\n\n", slug));

        let product = self.client.product(slug).await?;
        self.emit(&report::product_details(&product));
        Ok(product)
    }

    /// Search, pick the first product and its first variant, and check out
    #[instrument(skip(self))]
    pub async fn create_order(&mut self) -> CultResult<Option<OrderConfirmation>> {
        self.emit("\n=== Creating Order ===\n\n");

        let results = self
            .client
            .search_products(&SearchQuery::new("dark chocolate").with_limit(1))
            .await?;

        let Some(product) = results.products.into_iter().next() else {
            self.emit("No products found\n");
            return Ok(None);
        };
        self.emit(&format!(
            "Selected: {} - ${:.2}\n\n",
            product.name, product.price.usd
        ));

        let details = self.client.product(&product.slug).await?;
        let mut item = OrderItem::new(&product.id, 1);
        if let Some(variant) = details.default_variant() {
            item = item.with_variant(&variant.id);
        }

        let request = OrderRequest::new("solana", "USDC", "user@example.com", demo_address())
            .with_item(item);
        let order = self.client.create_order(&request).await?;

        self.emit(&report::order_summary(&order));
        Ok(Some(order))
    }

    /// List the category tree
    #[instrument(skip(self))]
    pub async fn categories(&mut self) -> CultResult<Vec<Category>> {
        self.emit("\n=== Categories ===\n\n");

        let categories = self.client.categories().await?;
        self.emit(&report::category_tree(&categories));
        Ok(categories)
    }

    /// Poll the order with the client's wait settings, reporting each status
    #[instrument(skip(self))]
    pub async fn wait_for_payment(&mut self, order_id: &str) -> CultResult<WaitOutcome> {
        self.emit(&format!(
            "\n=== Waiting for payment (order: {}) ===\n\n",
            order_id
        ));

        let source = Narrated {
            client: &self.client,
            lines: Mutex::new(String::new()),
        };
        let result =
            cult_client::wait_for_payment(&source, order_id, &self.client.config().wait).await;

        let observed = source.lines.into_inner().unwrap_or_else(|e| e.into_inner());
        self.transcript.push_str(&observed);

        let outcome = result?;
        self.emit(&format!("{}\n", report::wait_summary(&outcome)));
        Ok(outcome)
    }

    /// Show status, shipment tracking, lines and totals of a placed order
    #[instrument(skip(self))]
    pub async fn track_order(&mut self, order_id: &str) -> CultResult<Order> {
        self.emit(&format!("\n=== Order Tracking: {} ===\n\n", order_id));

        let order = self.client.order(order_id).await?;
        self.emit(&report::order_tracking(&order));
        Ok(order)
    }

    /// Run the whole sequence
    pub async fn run(&mut self) -> CultResult<()> {
        if let Some(first) = self.search().await? {
            self.product_details(&first.slug).await?;

            if let Some(order) = self.create_order().await? {
                info!(order_id = %order.order_id, "Demo order awaiting payment");
                self.emit("\n[In production, customer would send payment now]\n");
                self.emit(&format!(
                    "[Run `cult-demo wait {}` to poll until 'paid']\n",
                    order.order_id
                ));
            }
        }

        self.categories().await?;
        Ok(())
    }
}
