//! # cult-core
//!
//! Core types and traits for the For the Cult checkout API client.
//!
//! This crate provides:
//! - `SearchQuery`, `Product`, `Variant` and `Category` for the catalog
//! - `OrderRequest`, `OrderConfirmation`, `OrderStatus` and `Order` for checkout
//! - `OrderStatusSource` trait consumed by payment polling
//! - `CultError` for typed error handling
//!
//! The crate performs no I/O. `cult-client` implements the HTTP side.
//!
//! ## Example
//!
//! ```rust,ignore
//! use cult_core::{OrderItem, OrderRequest, SearchQuery, ShippingAddress};
//!
//! // Build a search
//! let query = SearchQuery::new("alpaca socks")
//!     .with_category("mens-tees")
//!     .with_price_max(50.0);
//!
//! // Build a checkout request
//! let request = OrderRequest::new("solana", "USDC", "user@example.com", address)
//!     .with_item(OrderItem::new(&product.id, 1));
//! ```

pub mod error;
pub mod order;
pub mod product;
pub mod source;

// Re-exports for convenience
pub use error::{error_message, CultError, CultResult, ORDER_CREATION_FAILED, SEARCH_FAILED};
pub use order::{
    Discount, Order, OrderActions, OrderConfirmation, OrderItem, OrderLine, OrderRequest,
    OrderState, OrderStatus, OrderTotals, PaymentDetails, ShippingAddress, Tracking,
};
pub use product::{
    CategoriesResponse, Category, Product, ProductPrice, SearchQuery, SearchResults, Variant,
    DEFAULT_SEARCH_LIMIT,
};
pub use source::{BoxedStatusSource, OrderStatusSource};
