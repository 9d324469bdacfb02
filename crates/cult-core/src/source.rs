//! # Order Status Source
//!
//! The seam between payment polling and whatever answers status queries.
//! `CultClient` implements it over HTTP; tests implement it with scripted
//! sequences so the polling loop can run against a paused clock.

use crate::error::CultResult;
use crate::order::OrderStatus;
use async_trait::async_trait;
use std::sync::Arc;

/// Anything that can report the current status of an order.
#[async_trait]
pub trait OrderStatusSource: Send + Sync {
    /// Fetch the current status of `order_id`.
    ///
    /// # Errors
    /// `CultError::OrderNotFound` for unknown ids, any transport error otherwise.
    async fn order_status(&self, order_id: &str) -> CultResult<OrderStatus>;
}

#[async_trait]
impl<T: OrderStatusSource + ?Sized> OrderStatusSource for Arc<T> {
    async fn order_status(&self, order_id: &str) -> CultResult<OrderStatus> {
        (**self).order_status(order_id).await
    }
}

#[async_trait]
impl<T: OrderStatusSource + ?Sized> OrderStatusSource for &T {
    async fn order_status(&self, order_id: &str) -> CultResult<OrderStatus> {
        (**self).order_status(order_id).await
    }
}

/// Type alias for a shared status source (dynamic dispatch)
pub type BoxedStatusSource = Arc<dyn OrderStatusSource>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CultError;
    use crate::order::OrderState;

    struct Fixed(OrderState);

    #[async_trait]
    impl OrderStatusSource for Fixed {
        async fn order_status(&self, order_id: &str) -> CultResult<OrderStatus> {
            if order_id == "missing" {
                return Err(CultError::OrderNotFound {
                    order_id: order_id.to_string(),
                });
            }
            Ok(OrderStatus::new(order_id, self.0.clone()))
        }
    }

    #[tokio::test]
    async fn test_dynamic_dispatch() {
        let source: BoxedStatusSource = Arc::new(Fixed(OrderState::Created));

        let status = source.order_status("ord_1").await.unwrap();
        assert_eq!(status.order_id, "ord_1");
        assert_eq!(status.status, OrderState::Created);

        let err = source.order_status("missing").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_reference_forwarding() {
        let fixed = Fixed(OrderState::Paid);
        let by_ref = &fixed;
        let status = by_ref.order_status("ord_2").await.unwrap();
        assert_eq!(status.status, OrderState::Paid);
    }
}
