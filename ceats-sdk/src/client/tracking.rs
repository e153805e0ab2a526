//! Polling loops that keep order views fresh.
//!
//! The server pushes nothing; both actors observe order state by polling
//! on a fixed interval. Two loops implement the contract:
//!
//! - [`OrderTracker`] — the customer's status view: polls one order's full
//!   representation and stops on its own once the order is terminal.
//! - [`CanteenOrderFeed`] — the vendor dashboard: polls the canteen's
//!   order list, and re-fetches the selected order's full detail whenever
//!   the list shows a status that differs from the locally held copy.
//!
//! Both loops surface only the *initial* fetch error to the caller; later
//! tick failures are logged and swallowed so a flaky network does not turn
//! into a stream of error toasts. Ticks never overlap: the loop awaits the
//! in-flight request before the next tick fires, and missed ticks are
//! skipped. Dropping the shutdown sender (or sending `true`) tears the
//! loop down deterministically.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{ClientError, CustomerClient, ManagerClient};
use crate::objects::order::{OrderDetailResponse, OrderResponse, OrderStatus};

/// The reference poll interval: 5 seconds.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// Customer: single-order tracker
// ---------------------------------------------------------------------------

/// Polls one order by id until it reaches a terminal state.
pub struct OrderTracker {
    client: CustomerClient,
    order_id: Uuid,
    poll_interval: Duration,
    update_tx: mpsc::Sender<OrderDetailResponse>,
    shutdown_rx: watch::Receiver<bool>,
}

impl OrderTracker {
    pub fn new(
        client: CustomerClient,
        order_id: Uuid,
        update_tx: mpsc::Sender<OrderDetailResponse>,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            client,
            order_id,
            poll_interval: DEFAULT_POLL_INTERVAL,
            update_tx,
            shutdown_rx,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Run until the order is terminal, the view shuts down, or the
    /// receiver is dropped.
    ///
    /// Only the initial fetch can fail out of this method; it is the one
    /// error the view shows to the user.
    pub async fn run(mut self) -> Result<(), ClientError> {
        let first = self.client.get_order(self.order_id).await?;
        let status = first.order_status;
        if self.update_tx.send(first).await.is_err() {
            return Ok(());
        }
        if status.is_terminal() {
            info!(order_id = %self.order_id, %status, "order already terminal, not polling");
            return Ok(());
        }

        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        ticker.tick().await; // the first tick completes immediately

        loop {
            tokio::select! {
                biased;

                _ = self.shutdown_rx.changed() => {
                    if *self.shutdown_rx.borrow() {
                        debug!(order_id = %self.order_id, "order tracker shut down");
                        break;
                    }
                }

                _ = ticker.tick() => {
                    match self.client.get_order(self.order_id).await {
                        Ok(detail) => {
                            let status = detail.order_status;
                            if self.update_tx.send(detail).await.is_err() {
                                break;
                            }
                            if status.is_terminal() {
                                info!(order_id = %self.order_id, %status, "order terminal, polling stopped");
                                break;
                            }
                        }
                        // Background tick failures stay in the log.
                        Err(e) => warn!(order_id = %self.order_id, error = %e, "order poll tick failed"),
                    }
                }
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Vendor: canteen order feed
// ---------------------------------------------------------------------------

/// Updates emitted by the [`CanteenOrderFeed`].
#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// A fresh copy of the canteen's order list.
    Orders(Vec<OrderResponse>),
    /// Full detail of the currently selected order, re-fetched because the
    /// list reported a status the view did not hold yet.
    SelectedOrder(OrderDetailResponse),
}

/// Polls the canteen's order list and keeps the selected order's detail in
/// step with it.
pub struct CanteenOrderFeed {
    client: ManagerClient,
    poll_interval: Duration,
    event_tx: mpsc::Sender<FeedEvent>,
    /// The order the dashboard currently has open, set by the view.
    selection_rx: watch::Receiver<Option<Uuid>>,
    shutdown_rx: watch::Receiver<bool>,
    /// Status of the selected order as last shown to the view.
    held: Option<(Uuid, OrderStatus)>,
}

impl CanteenOrderFeed {
    pub fn new(
        client: ManagerClient,
        event_tx: mpsc::Sender<FeedEvent>,
        selection_rx: watch::Receiver<Option<Uuid>>,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            client,
            poll_interval: DEFAULT_POLL_INTERVAL,
            event_tx,
            selection_rx,
            shutdown_rx,
            held: None,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Run until shutdown or until the receiver is dropped. Only the
    /// initial list fetch can fail out of this method.
    pub async fn run(mut self) -> Result<(), ClientError> {
        let orders = self.client.list_orders().await?;
        self.reconcile(orders).await;

        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        ticker.tick().await;

        loop {
            tokio::select! {
                biased;

                _ = self.shutdown_rx.changed() => {
                    if *self.shutdown_rx.borrow() {
                        debug!("canteen order feed shut down");
                        break;
                    }
                }

                // The view opened a different order; its detail must be
                // fetched regardless of what the last list said.
                Ok(()) = self.selection_rx.changed() => {
                    self.held = None;
                    let selected = *self.selection_rx.borrow();
                    if let Some(order_id) = selected {
                        self.refresh_selected(order_id).await;
                    }
                }

                _ = ticker.tick() => {
                    match self.client.list_orders().await {
                        Ok(orders) => self.reconcile(orders).await,
                        Err(e) => warn!(error = %e, "order list poll tick failed"),
                    }
                }
            }

            if self.event_tx.is_closed() {
                break;
            }
        }

        Ok(())
    }

    /// Publish the list, then re-fetch the selected order's detail if the
    /// list disagrees with what the view holds. The summary alone is never
    /// trusted for the open order: its line items could be stale.
    async fn reconcile(&mut self, orders: Vec<OrderResponse>) {
        let selected = *self.selection_rx.borrow();
        let stale = stale_selection(self.held, selected, &orders);

        if self.event_tx.send(FeedEvent::Orders(orders)).await.is_err() {
            return;
        }

        if let Some(order_id) = stale {
            self.refresh_selected(order_id).await;
        }
    }

    async fn refresh_selected(&mut self, order_id: Uuid) {
        match self.client.get_order(order_id).await {
            Ok(detail) => {
                self.held = Some((order_id, detail.order_status));
                let _ = self.event_tx.send(FeedEvent::SelectedOrder(detail)).await;
            }
            Err(e) => warn!(%order_id, error = %e, "selected order refresh failed"),
        }
    }
}

/// Decide whether the selected order's detail must be re-fetched: the list
/// shows it with a status that differs from the one the view holds (or the
/// view holds nothing yet).
fn stale_selection(
    held: Option<(Uuid, OrderStatus)>,
    selected: Option<Uuid>,
    orders: &[OrderResponse],
) -> Option<Uuid> {
    let order_id = selected?;
    let listed = orders.iter().find(|o| o.id == order_id)?;
    match held {
        Some((held_id, held_status)) if held_id == order_id && held_status == listed.order_status => {
            None
        }
        _ => Some(order_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::order::{PaymentMethod, PaymentStatus};
    use rust_decimal::Decimal;

    fn order(id: Uuid, status: OrderStatus) -> OrderResponse {
        OrderResponse {
            id,
            customer_id: Uuid::new_v4(),
            customer_name: None,
            canteen_id: Uuid::new_v4(),
            canteen_name: None,
            total_amount: Decimal::new(300, 2),
            payment_method: PaymentMethod::Cash,
            payment_status: PaymentStatus::Completed,
            order_status: status,
            created_at: 0,
        }
    }

    #[test]
    fn no_selection_never_refetches() {
        let id = Uuid::new_v4();
        let list = vec![order(id, OrderStatus::Pending)];
        assert_eq!(stale_selection(None, None, &list), None);
    }

    #[test]
    fn unknown_selection_waits_for_the_list() {
        let id = Uuid::new_v4();
        assert_eq!(stale_selection(None, Some(id), &[]), None);
    }

    #[test]
    fn fresh_selection_is_fetched_once_listed() {
        let id = Uuid::new_v4();
        let list = vec![order(id, OrderStatus::Pending)];
        assert_eq!(stale_selection(None, Some(id), &list), Some(id));
    }

    #[test]
    fn matching_status_is_not_refetched() {
        let id = Uuid::new_v4();
        let list = vec![order(id, OrderStatus::Preparing)];
        let held = Some((id, OrderStatus::Preparing));
        assert_eq!(stale_selection(held, Some(id), &list), None);
    }

    #[test]
    fn status_drift_triggers_a_detail_refetch() {
        let id = Uuid::new_v4();
        let list = vec![order(id, OrderStatus::Ready)];
        let held = Some((id, OrderStatus::Preparing));
        assert_eq!(stale_selection(held, Some(id), &list), Some(id));
    }
}
