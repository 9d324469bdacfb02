//! # Checkout API Client
//!
//! One method per REST endpoint of the checkout API. Each call issues exactly
//! one request and maps the response to a typed record or a `CultError`.

use crate::config::ClientConfig;
use crate::wait::{self, WaitOutcome};
use async_trait::async_trait;
use cult_core::{
    error_message, CategoriesResponse, Category, CultError, CultResult, Order,
    OrderConfirmation, OrderRequest, OrderStatus, OrderStatusSource, Product, SearchQuery,
    SearchResults, ORDER_CREATION_FAILED, SEARCH_FAILED,
};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use tracing::{debug, error, info, instrument};

/// How a non-success response is turned into an error
#[derive(Debug, Clone, Copy)]
enum Failure<'a> {
    /// Generic `Http { status }`
    Status,
    /// 404 means the product slug does not exist
    ProductNotFound(&'a str),
    /// 404 means the order id does not exist
    OrderNotFound(&'a str),
    /// Server message from the body, else the fallback
    Message(&'static str),
}

impl Failure<'_> {
    fn into_error(self, status: StatusCode, body: &str) -> CultError {
        match self {
            Failure::ProductNotFound(slug) if status == StatusCode::NOT_FOUND => {
                CultError::ProductNotFound {
                    slug: slug.to_string(),
                }
            }
            Failure::OrderNotFound(order_id) if status == StatusCode::NOT_FOUND => {
                CultError::OrderNotFound {
                    order_id: order_id.to_string(),
                }
            }
            Failure::Message(fallback) => CultError::Api {
                message: error_message(body, fallback),
            },
            _ => CultError::Http {
                status: status.as_u16(),
            },
        }
    }
}

/// Client for the For the Cult checkout API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct CultClient {
    config: ClientConfig,
    client: Client,
}

impl CultClient {
    /// Create a client for the given configuration
    pub fn new(config: ClientConfig) -> CultResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                CultError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> CultResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::new(config)
    }

    /// Create a client with the production defaults
    pub fn with_defaults() -> CultResult<Self> {
        Self::new(ClientConfig::default())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Discover what the API supports. The payload is returned as-is.
    #[instrument(skip(self))]
    pub async fn capabilities(&self) -> CultResult<serde_json::Value> {
        self.get("/agent/capabilities", Failure::Status).await
    }

    /// Search the catalog.
    ///
    /// # Errors
    /// `CultError::InvalidRequest` for impossible price bounds, `CultError::Api`
    /// with the server message (or "Search failed") on rejection.
    #[instrument(skip(self, query), fields(q = %query.query))]
    pub async fn search_products(&self, query: &SearchQuery) -> CultResult<SearchResults> {
        query.validate()?;
        let params = query.to_params();

        let results: SearchResults = self
            .send(
                Method::GET,
                "/products/search",
                Some(params.as_slice()),
                None::<&()>,
                Failure::Message(SEARCH_FAILED),
            )
            .await?;

        debug!(
            "Search returned {} of {} products",
            results.products.len(),
            results.total
        );
        Ok(results)
    }

    /// Get full product details, including variants
    #[instrument(skip(self))]
    pub async fn product(&self, slug: &str) -> CultResult<Product> {
        let path = format!("/products/{}", urlencoding::encode(slug));
        self.get(&path, Failure::ProductNotFound(slug)).await
    }

    /// Get the category tree
    #[instrument(skip(self))]
    pub async fn categories(&self) -> CultResult<Vec<Category>> {
        let response: CategoriesResponse = self.get("/categories", Failure::Status).await?;
        Ok(response.categories)
    }

    /// Get featured products. The payload is returned as-is.
    #[instrument(skip(self))]
    pub async fn featured_products(&self) -> CultResult<serde_json::Value> {
        self.get("/products/featured", Failure::Status).await
    }

    /// Get supported payment chains and tokens. The payload is returned as-is.
    #[instrument(skip(self))]
    pub async fn chains(&self) -> CultResult<serde_json::Value> {
        self.get("/chains", Failure::Status).await
    }

    /// Create an order with crypto payment.
    ///
    /// Not idempotent: a retry after a lost response may create a second order.
    #[instrument(skip(self, request), fields(items = request.items.len(), chain = %request.chain, token = %request.token))]
    pub async fn create_order(&self, request: &OrderRequest) -> CultResult<OrderConfirmation> {
        request.validate()?;

        let confirmation: OrderConfirmation = self
            .send(
                Method::POST,
                "/checkout",
                None,
                Some(request),
                Failure::Message(ORDER_CREATION_FAILED),
            )
            .await?;

        info!(
            "Created order: id={}, amount={} {}, expires_at={}",
            confirmation.order_id,
            confirmation.payment.amount,
            confirmation.payment.token,
            confirmation.expires_at
        );

        Ok(confirmation)
    }

    /// Get the lightweight payment/shipping status of an order
    #[instrument(skip(self))]
    pub async fn order_status(&self, order_id: &str) -> CultResult<OrderStatus> {
        let path = format!("/orders/{}/status", urlencoding::encode(order_id));
        self.get(&path, Failure::OrderNotFound(order_id)).await
    }

    /// Get full order details
    #[instrument(skip(self))]
    pub async fn order(&self, order_id: &str) -> CultResult<Order> {
        let path = format!("/orders/{}", urlencoding::encode(order_id));
        self.get(&path, Failure::OrderNotFound(order_id)).await
    }

    /// Poll the order status with the configured cadence until it is paid,
    /// closed, or the configured timeout elapses.
    pub async fn wait_for_payment(&self, order_id: &str) -> CultResult<WaitOutcome> {
        wait::wait_for_payment(self, order_id, &self.config.wait).await
    }

    /// Like [`CultClient::wait_for_payment`], ending early when `cancel` resolves.
    pub async fn wait_for_payment_until<F>(
        &self,
        order_id: &str,
        cancel: F,
    ) -> CultResult<WaitOutcome>
    where
        F: Future<Output = ()>,
    {
        wait::wait_for_payment_until(self, order_id, &self.config.wait, cancel).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str, failure: Failure<'_>) -> CultResult<T> {
        self.send(Method::GET, path, None, None::<&()>, failure).await
    }

    async fn send<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: Option<&[(&'static str, String)]>,
        body: Option<&B>,
        failure: Failure<'_>,
    ) -> CultResult<T> {
        let url = self.config.url(path);
        debug!("{} {}", method, url);

        let mut request = self.client.request(method.clone(), &url);
        if let Some(params) = query {
            request = request.query(params);
        }
        if let Some(body) = body {
            // Sets Content-Type: application/json
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CultError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| CultError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("API error: {} {} status={}, body={}", method, path, status, text);
            return Err(failure.into_error(status, &text));
        }

        serde_json::from_str(&text).map_err(|e| {
            CultError::Serialization(format!("Failed to parse response from {}: {}", path, e))
        })
    }
}

#[async_trait]
impl OrderStatusSource for CultClient {
    async fn order_status(&self, order_id: &str) -> CultResult<OrderStatus> {
        CultClient::order_status(self, order_id).await
    }
}
