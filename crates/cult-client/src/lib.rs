//! # cult-client
//!
//! HTTP client for the For the Cult checkout API.
//!
//! This crate provides:
//!
//! 1. **CultClient** - one async method per REST endpoint
//!    - Catalog: capabilities, search, product detail, categories, featured, chains
//!    - Checkout: create order, order status, full order
//!    - Typed errors: not-found, server message, generic status
//!
//! 2. **Payment wait** - bounded polling until an order is paid
//!    - Fixed interval (default 10s), deadline (default 10 minutes)
//!    - Optional cancellation future
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cult_client::CultClient;
//! use cult_core::{OrderItem, OrderRequest, SearchQuery};
//!
//! let client = CultClient::from_env()?;
//!
//! let results = client
//!     .search_products(&SearchQuery::new("coffee beans").with_limit(1))
//!     .await?;
//!
//! let request = OrderRequest::new("solana", "USDC", "user@example.com", address)
//!     .with_item(OrderItem::new(&results.products[0].id, 1));
//! let order = client.create_order(&request).await?;
//!
//! // Customer pays to order.payment.address
//! let outcome = client.wait_for_payment(&order.order_id).await?;
//! if outcome.is_success() {
//!     println!("Paid!");
//! }
//! ```

pub mod client;
pub mod config;
pub mod wait;

// Re-exports
pub use client::CultClient;
pub use config::{ClientConfig, DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT};
pub use wait::{
    wait_for_payment, wait_for_payment_until, WaitConfig, WaitOutcome, DEFAULT_POLL_INTERVAL,
    DEFAULT_WAIT_TIMEOUT,
};
