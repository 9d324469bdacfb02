//! # Payment Wait
//!
//! Bounded polling of an order's status until payment lands, the order
//! closes, or the deadline passes.
//!
//! Timing runs on the tokio clock, so tests drive it with
//! `#[tokio::test(start_paused = true)]` instead of waiting in real time.

use cult_core::{CultError, CultResult, OrderState, OrderStatus, OrderStatusSource};
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, instrument, warn};

/// Delay between two status observations
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// How long to wait for payment before giving up
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(600);

/// Polling cadence and deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitConfig {
    /// Delay between observations
    pub interval: Duration,
    /// Overall deadline, measured from the start of the wait
    pub timeout: Duration,
}

impl WaitConfig {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }

    /// Builder: set polling interval
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Builder: set deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// A zero interval would poll the server back to back.
    pub fn validate(&self) -> CultResult<()> {
        if self.interval.is_zero() {
            return Err(CultError::InvalidRequest(
                "poll interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL, DEFAULT_WAIT_TIMEOUT)
    }
}

/// How a payment wait ended
#[derive(Debug, Clone, PartialEq)]
pub enum WaitOutcome {
    /// Order reached `paid`
    Paid(OrderStatus),
    /// Order reached `expired` or `cancelled`
    Closed(OrderStatus),
    /// Deadline passed without a terminal status
    TimedOut,
    /// Caller cancelled the wait
    Cancelled,
}

impl WaitOutcome {
    /// True only when payment was confirmed
    pub fn is_success(&self) -> bool {
        matches!(self, WaitOutcome::Paid(_))
    }

    /// True when the deadline elapsed
    pub fn timed_out(&self) -> bool {
        matches!(self, WaitOutcome::TimedOut)
    }

    /// True when the caller cancelled the wait
    pub fn was_cancelled(&self) -> bool {
        matches!(self, WaitOutcome::Cancelled)
    }

    /// Last observed status, for outcomes that carry one
    pub fn status(&self) -> Option<&OrderStatus> {
        match self {
            WaitOutcome::Paid(status) | WaitOutcome::Closed(status) => Some(status),
            WaitOutcome::TimedOut | WaitOutcome::Cancelled => None,
        }
    }

    pub fn into_status(self) -> Option<OrderStatus> {
        match self {
            WaitOutcome::Paid(status) | WaitOutcome::Closed(status) => Some(status),
            WaitOutcome::TimedOut | WaitOutcome::Cancelled => None,
        }
    }
}

/// Poll `order_id` until it is paid, closed, or `config.timeout` elapses.
///
/// # Errors
/// `CultError::InvalidRequest` for a zero interval. The first failed status
/// fetch aborts the wait and is returned unchanged.
pub async fn wait_for_payment<S>(
    source: &S,
    order_id: &str,
    config: &WaitConfig,
) -> CultResult<WaitOutcome>
where
    S: OrderStatusSource + ?Sized,
{
    wait_for_payment_until(source, order_id, config, std::future::pending()).await
}

/// Like [`wait_for_payment`], but also stops with [`WaitOutcome::Cancelled`]
/// as soon as `cancel` resolves, whether a fetch or a sleep is in flight.
#[instrument(skip(source, config, cancel), fields(interval = ?config.interval, timeout = ?config.timeout))]
pub async fn wait_for_payment_until<S, F>(
    source: &S,
    order_id: &str,
    config: &WaitConfig,
    cancel: F,
) -> CultResult<WaitOutcome>
where
    S: OrderStatusSource + ?Sized,
    F: Future<Output = ()>,
{
    config.validate()?;

    // None: timeout too large to represent, wait until cancelled
    let deadline = Instant::now().checked_add(config.timeout);
    let before_deadline = || deadline.map_or(true, |d| Instant::now() < d);

    tokio::pin!(cancel);
    let mut observations: u32 = 0;

    while before_deadline() {
        let status = tokio::select! {
            biased;
            _ = &mut cancel => {
                info!(observations, "Payment wait cancelled");
                return Ok(WaitOutcome::Cancelled);
            }
            result = source.order_status(order_id) => result?,
        };
        observations += 1;

        debug!(
            observations,
            status = %status.status,
            next = status.next_action().unwrap_or("N/A"),
            "Observed order status"
        );

        match status.status {
            OrderState::Paid => {
                info!(observations, paid_at = ?status.paid_at, "Payment confirmed");
                return Ok(WaitOutcome::Paid(status));
            }
            OrderState::Expired | OrderState::Cancelled => {
                warn!(observations, status = %status.status, "Order closed before payment");
                return Ok(WaitOutcome::Closed(status));
            }
            _ => {}
        }

        tokio::select! {
            biased;
            _ = &mut cancel => {
                info!(observations, "Payment wait cancelled");
                return Ok(WaitOutcome::Cancelled);
            }
            _ = sleep(config.interval) => {}
        }
    }

    warn!(observations, "Timed out waiting for payment");
    Ok(WaitOutcome::TimedOut)
}
