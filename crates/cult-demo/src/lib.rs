//! # cult-demo
//!
//! Demonstration of a typical checkout flow against the For the Cult API.
//!
//! ## Sequence
//!
//! | Step | Endpoint |
//! |------|----------|
//! | Search | `GET /products/search` |
//! | Product detail | `GET /products/{slug}` |
//! | Create order | `GET /products/search`, `GET /products/{slug}`, `POST /checkout` |
//! | Categories | `GET /categories` |

pub mod flow;
pub mod report;

pub use flow::{demo_address, Demo};
