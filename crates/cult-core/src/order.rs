//! # Order Types
//!
//! Checkout request, confirmation and order status records.

use crate::error::{CultError, CultResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A line item in a checkout request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Product ID
    pub product_id: String,

    /// Variant ID (size, colour, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<String>,

    /// Quantity (at least 1)
    pub quantity: u32,
}

impl OrderItem {
    /// Create a line item for a product without a variant
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            variant_id: None,
            quantity,
        }
    }

    /// Builder: set variant
    pub fn with_variant(mut self, variant_id: impl Into<String>) -> Self {
        self.variant_id = Some(variant_id.into());
        self
    }
}

/// Shipping destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub name: String,

    pub line1: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,

    pub city: String,

    /// State, province or region
    pub state: String,

    pub postal_code: String,

    /// ISO 3166-1 alpha-2 country code
    pub country: String,
}

/// Checkout request body for `POST /checkout`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// Line items
    pub items: Vec<OrderItem>,

    /// Payment chain (e.g. "solana")
    pub chain: String,

    /// Payment token symbol (e.g. "USDC")
    pub token: String,

    /// Contact email
    pub email: String,

    pub shipping_address: ShippingAddress,

    /// Wallet checked for holder discounts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
}

impl OrderRequest {
    /// Create an order request with no items
    pub fn new(
        chain: impl Into<String>,
        token: impl Into<String>,
        email: impl Into<String>,
        shipping_address: ShippingAddress,
    ) -> Self {
        Self {
            items: Vec::new(),
            chain: chain.into(),
            token: token.into(),
            email: email.into(),
            shipping_address,
            wallet_address: None,
        }
    }

    /// Builder: add a line item
    pub fn with_item(mut self, item: OrderItem) -> Self {
        self.items.push(item);
        self
    }

    /// Builder: set wallet address for discount eligibility
    pub fn with_wallet(mut self, wallet_address: impl Into<String>) -> Self {
        self.wallet_address = Some(wallet_address.into());
        self
    }

    /// Check if the request has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Reject zero quantities before they reach the server.
    ///
    /// An empty item list is left for the server to reject.
    pub fn validate(&self) -> CultResult<()> {
        if let Some(item) = self.items.iter().find(|item| item.quantity == 0) {
            return Err(CultError::InvalidRequest(format!(
                "Quantity for product {} must be at least 1",
                item.product_id
            )));
        }
        Ok(())
    }
}

/// Where and how much to pay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub chain: String,

    pub token: String,

    /// Amount in token units, kept as text to preserve precision
    #[serde(deserialize_with = "string_or_number")]
    pub amount: String,

    /// Destination address
    pub address: String,
}

/// Holder discount applied to an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    pub percentage: f64,
    pub tier: String,
}

/// Response of `POST /checkout`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_id: String,

    pub payment: PaymentDetails,

    /// Payment must arrive before this time
    pub expires_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<Discount>,
}

/// Order lifecycle state as reported by the server
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderState {
    /// Awaiting payment
    Created,
    /// Payment confirmed
    Paid,
    /// Payment window elapsed
    Expired,
    /// Cancelled
    Cancelled,
    /// Any other server-defined state
    Other(String),
}

impl OrderState {
    /// Wire token for this state
    pub fn as_str(&self) -> &str {
        match self {
            OrderState::Created => "created",
            OrderState::Paid => "paid",
            OrderState::Expired => "expired",
            OrderState::Cancelled => "cancelled",
            OrderState::Other(s) => s,
        }
    }

    /// True once polling for payment can stop
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderState::Paid | OrderState::Expired | OrderState::Cancelled
        )
    }
}

impl From<String> for OrderState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "created" => OrderState::Created,
            "paid" => OrderState::Paid,
            "expired" => OrderState::Expired,
            "cancelled" => OrderState::Cancelled,
            _ => OrderState::Other(s),
        }
    }
}

impl From<OrderState> for String {
    fn from(state: OrderState) -> Self {
        match state {
            OrderState::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for OrderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Hints the server attaches to status responses
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderActions {
    /// Suggested next step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// Response of `GET /orders/{id}/status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatus {
    #[serde(default, alias = "id")]
    pub order_id: String,

    pub status: OrderState,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    #[serde(default, rename = "_actions", skip_serializing_if = "Option::is_none")]
    pub actions: Option<OrderActions>,
}

impl OrderStatus {
    /// Create a bare status record
    pub fn new(order_id: impl Into<String>, status: OrderState) -> Self {
        Self {
            order_id: order_id.into(),
            status,
            paid_at: None,
            expires_at: None,
            actions: None,
        }
    }

    /// Suggested next action, if the server provided one
    pub fn next_action(&self) -> Option<&str> {
        self.actions.as_ref().and_then(|a| a.next.as_deref())
    }
}

/// Shipment tracking details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tracking {
    pub carrier: String,
    pub number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A line of a placed order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub name: String,
    pub quantity: u32,
    /// Unit price (USD)
    pub price: f64,
}

/// Order totals (USD)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderTotals {
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub shipping: f64,
    #[serde(default)]
    pub total: f64,
}

/// Response of `GET /orders/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, alias = "id")]
    pub order_id: String,

    pub status: OrderState,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking: Option<Tracking>,

    #[serde(default)]
    pub items: Vec<OrderLine>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub totals: Option<OrderTotals>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> ShippingAddress {
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

    #[test]
    fn test_order_request_json_shape() {
        let request = OrderRequest::new("solana", "USDC", "user@example.com", address())
            .with_item(OrderItem::new("prod_1", 1).with_variant("var_1"))
            .with_item(OrderItem::new("prod_2", 2));

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["items"][0]["productId"], "prod_1");
        assert_eq!(json["items"][0]["variantId"], "var_1");
        assert!(json["items"][1].get("variantId").is_none());
        assert_eq!(json["items"][1]["quantity"], 2);
        assert_eq!(json["shippingAddress"]["postalCode"], "94102");
        assert!(json["shippingAddress"].get("line2").is_none());
        assert!(json.get("walletAddress").is_none());

        let with_wallet = request.with_wallet("7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU");
        let json = serde_json::to_value(&with_wallet).unwrap();
        assert_eq!(
            json["walletAddress"],
            "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU"
        );
    }

    #[test]
    fn test_validate_quantity() {
        let empty = OrderRequest::new("solana", "USDC", "a@b.c", address());
        assert!(empty.is_empty());
        assert!(empty.validate().is_ok());

        let zero = empty.with_item(OrderItem::new("prod_1", 0));
        assert!(matches!(zero.validate(), Err(CultError::InvalidRequest(_))));
    }

    #[test]
    fn test_confirmation_decoding() {
        let json = r#"{
            "orderId": "ord_123",
            "payment": {
                "chain": "solana",
                "token": "USDC",
                "amount": 29.99,
                "address": "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM"
            },
            "expiresAt": "2026-01-01T12:00:00Z",
            "discount": { "percentage": 10, "tier": "gold" }
        }"#;

        let confirmation: OrderConfirmation = serde_json::from_str(json).unwrap();
        assert_eq!(confirmation.order_id, "ord_123");
        assert_eq!(confirmation.payment.amount, "29.99");
        assert_eq!(confirmation.discount.unwrap().tier, "gold");

        let json = r#"{
            "orderId": "ord_124",
            "payment": { "chain": "solana", "token": "SOL", "amount": "0.153", "address": "x" },
            "expiresAt": "2026-01-01T12:00:00Z"
        }"#;
        let confirmation: OrderConfirmation = serde_json::from_str(json).unwrap();
        assert_eq!(confirmation.payment.amount, "0.153");
        assert!(confirmation.discount.is_none());
    }

    #[test]
    fn test_order_state_tokens() {
        assert_eq!(OrderState::from("paid".to_string()), OrderState::Paid);
        assert_eq!(
            OrderState::from("shipped".to_string()),
            OrderState::Other("shipped".to_string())
        );
        assert!(OrderState::Expired.is_terminal());
        assert!(!OrderState::Created.is_terminal());
        assert!(!OrderState::Other("shipped".into()).is_terminal());
        assert_eq!(OrderState::Cancelled.to_string(), "cancelled");
    }

    #[test]
    fn test_status_decoding() {
        let json = r#"{
            "orderId": "ord_1",
            "status": "paid",
            "paidAt": "2026-01-01T12:05:00Z",
            "_actions": { "next": "Wait for shipment" }
        }"#;
        let status: OrderStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.status, OrderState::Paid);
        assert!(status.paid_at.is_some());
        assert_eq!(status.next_action(), Some("Wait for shipment"));

        let status: OrderStatus =
            serde_json::from_str(r#"{"orderId":"ord_1","status":"refunded"}"#).unwrap();
        assert_eq!(status.status, OrderState::Other("refunded".into()));
        assert_eq!(status.next_action(), None);
    }

    #[test]
    fn test_order_detail_decoding() {
        let json = r#"{
            "id": "ord_9",
            "status": "paid",
            "createdAt": "2026-01-01T12:00:00Z",
            "tracking": { "carrier": "USPS", "number": "9400", "url": "https://tools.usps.com" },
            "items": [ { "name": "Bitcoin Tee", "quantity": 2, "price": 29.99 } ],
            "totals": { "subtotal": 59.98, "shipping": 5, "total": 64.98 }
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.order_id, "ord_9");
        assert_eq!(order.tracking.unwrap().carrier, "USPS");
        assert_eq!(order.items[0].quantity, 2);
        assert_eq!(order.totals.unwrap().shipping, 5.0);
        assert!(order.paid_at.is_none());
    }
}
