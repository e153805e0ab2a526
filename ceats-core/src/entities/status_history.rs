use kanau::processor::Processor;
use uuid::Uuid;

use crate::entities::OrderStatus;
use crate::framework::DatabaseProcessor;

/// One entry of an order's append-only status history. Rows are inserted
/// by the creation pipeline and the state machine, and never touched
/// again.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct StatusHistoryRow {
    pub id: i64,
    pub order_id: Uuid,
    pub status: OrderStatus,
    pub changed_at: time::PrimitiveDateTime,
}

#[derive(Debug, Clone)]
/// An order's history in append order.
pub struct ListHistoryForOrder {
    pub order_id: Uuid,
}

impl Processor<ListHistoryForOrder> for DatabaseProcessor {
    type Output = Vec<StatusHistoryRow>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListHistoryForOrder")]
    async fn process(&self, query: ListHistoryForOrder) -> Result<Vec<StatusHistoryRow>, sqlx::Error> {
        sqlx::query_as::<_, StatusHistoryRow>(
            "SELECT id, order_id, status, changed_at \
             FROM order_status_history WHERE order_id = $1 ORDER BY id",
        )
        .bind(query.order_id)
        .fetch_all(&self.pool)
        .await
    }
}

impl StatusHistoryRow {
    /// Append one history entry inside the transaction that changes the
    /// order.
    pub async fn append_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        order_id: Uuid,
        status: OrderStatus,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO order_status_history (order_id, status) VALUES ($1, $2)")
            .bind(order_id)
            .bind(status)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
