//! The vendor-driven order state machine.
//!
//! Fulfillment moves along `pending → accepted → preparing → ready →
//! completed`, with `cancelled` reachable from any non-terminal state.
//! Forward skips are legal — a vendor may take a pending order straight to
//! `completed` — but backward moves, re-entering `pending`, and any
//! transition out of a terminal state are rejected. The write itself is a
//! compare-and-swap on the status read at the start of the request, so two
//! racing updates cannot silently clobber each other: the loser gets a
//! conflict.

use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use kanau::processor::Processor;

use crate::entities::OrderStatus;
use crate::entities::orders::{GetOrderById, OrderRecord};
use crate::entities::status_history::StatusHistoryRow;
use crate::framework::DatabaseProcessor;

/// Errors produced by a status transition attempt.
#[derive(Debug, Error)]
pub enum StatusError {
    /// No order with the given id.
    #[error("order {0} not found")]
    NotFound(Uuid),

    /// The acting canteen does not own the order.
    #[error("not authorized")]
    NotOwned,

    /// The requested move is not a legal transition from the current
    /// state.
    #[error("cannot move order from {from} to {to}")]
    IllegalTransition { from: OrderStatus, to: OrderStatus },

    /// The order changed under this request; the caller should re-read
    /// and retry.
    #[error("order was updated concurrently")]
    Conflict,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

fn rank(status: OrderStatus) -> u8 {
    match status {
        OrderStatus::Pending => 0,
        OrderStatus::Accepted => 1,
        OrderStatus::Preparing => 2,
        OrderStatus::Ready => 3,
        OrderStatus::Completed => 4,
        // Cancelled is a side branch, not part of the forward order.
        OrderStatus::Cancelled => u8::MAX,
    }
}

/// The transition table.
///
/// Legal moves: any strictly forward step along the fulfillment order
/// (skips included), or `cancelled` from any non-terminal state. Terminal
/// orders never move again, and nothing ever goes (back) to `pending`.
pub fn transition_allowed(from: OrderStatus, to: OrderStatus) -> bool {
    if from.is_terminal() || to == OrderStatus::Pending {
        return false;
    }
    if to == OrderStatus::Cancelled {
        return true;
    }
    rank(to) > rank(from)
}

/// Apply one vendor-requested transition to an order.
///
/// Ownership is checked before anything else; a foreign canteen learns
/// only "not authorized". On success the returned record reflects the new
/// status, the history has exactly one new entry, and — when the order
/// reached `completed` — the payment is marked completed as well.
pub async fn set_status(
    processor: &DatabaseProcessor,
    order_id: Uuid,
    requested: OrderStatus,
    acting_canteen_id: Uuid,
) -> Result<OrderRecord, StatusError> {
    let order = processor
        .process(GetOrderById { order_id })
        .await?
        .ok_or(StatusError::NotFound(order_id))?;

    if order.canteen_id != acting_canteen_id {
        return Err(StatusError::NotOwned);
    }

    if !transition_allowed(order.order_status, requested) {
        return Err(StatusError::IllegalTransition {
            from: order.order_status,
            to: requested,
        });
    }

    let mut tx = processor.pool.begin().await?;

    let updated = OrderRecord::advance_status_tx(&mut tx, order_id, order.order_status, requested)
        .await?
        .ok_or(StatusError::Conflict)?;

    StatusHistoryRow::append_tx(&mut tx, order_id, requested).await?;

    tx.commit().await?;

    info!(
        order_id = %order_id,
        from = %order.order_status,
        to = %requested,
        "order status advanced"
    );

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    const ALL: [OrderStatus; 6] = [Pending, Accepted, Preparing, Ready, Completed, Cancelled];

    #[test]
    fn forward_steps_are_allowed() {
        assert!(transition_allowed(Pending, Accepted));
        assert!(transition_allowed(Accepted, Preparing));
        assert!(transition_allowed(Preparing, Ready));
        assert!(transition_allowed(Ready, Completed));
    }

    #[test]
    fn forward_skips_are_allowed() {
        // A vendor may collapse steps, e.g. accept and complete a walk-up
        // order in one move.
        assert!(transition_allowed(Pending, Completed));
        assert!(transition_allowed(Accepted, Completed));
        assert!(transition_allowed(Pending, Ready));
    }

    #[test]
    fn cancellation_is_reachable_from_any_non_terminal_state() {
        for from in [Pending, Accepted, Preparing, Ready] {
            assert!(transition_allowed(from, Cancelled), "{from} -> cancelled");
        }
    }

    #[test]
    fn terminal_orders_never_move() {
        for from in [Completed, Cancelled] {
            for to in ALL {
                assert!(!transition_allowed(from, to), "{from} -> {to}");
            }
        }
    }

    #[test]
    fn nothing_returns_to_pending() {
        for from in ALL {
            assert!(!transition_allowed(from, Pending), "{from} -> pending");
        }
    }

    #[test]
    fn backward_and_self_moves_are_rejected() {
        assert!(!transition_allowed(Preparing, Accepted));
        assert!(!transition_allowed(Ready, Preparing));
        assert!(!transition_allowed(Accepted, Accepted));
    }
}
