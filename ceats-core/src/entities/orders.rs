use kanau::processor::Processor;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::entities::{OrderStatus, PaymentMethod, PaymentStatus};
use crate::framework::DatabaseProcessor;

/// An order row. `total_amount`, `payment_method`, and the line snapshots
/// are frozen at creation; only the two status fields ever change, and the
/// owning canteen is the only writer.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct OrderRecord {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub canteen_id: Uuid,
    pub total_amount: Decimal,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub order_status: OrderStatus,
    pub created_at: time::PrimitiveDateTime,
}

const ORDER_COLUMNS: &str = "id, customer_id, canteen_id, total_amount, \
     payment_method, payment_status, order_status, created_at";

/// An order row joined with the display names list views want.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct OrderSummary {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub canteen_id: Uuid,
    pub canteen_name: String,
    pub canteen_upi_id: Option<String>,
    pub total_amount: Decimal,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub order_status: OrderStatus,
    pub created_at: time::PrimitiveDateTime,
}

const SUMMARY_SELECT: &str = "SELECT o.id, o.customer_id, u.name AS customer_name, \
     o.canteen_id, c.name AS canteen_name, c.upi_id AS canteen_upi_id, \
     o.total_amount, o.payment_method, o.payment_status, o.order_status, o.created_at \
     FROM orders o \
     JOIN users u ON u.id = o.customer_id \
     JOIN canteens c ON c.id = o.canteen_id";

#[derive(Debug, Clone)]
pub struct GetOrderById {
    pub order_id: Uuid,
}

impl Processor<GetOrderById> for DatabaseProcessor {
    type Output = Option<OrderRecord>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetOrderById")]
    async fn process(&self, query: GetOrderById) -> Result<Option<OrderRecord>, sqlx::Error> {
        sqlx::query_as::<_, OrderRecord>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(query.order_id)
        .fetch_optional(&self.pool)
        .await
    }
}

#[derive(Debug, Clone)]
/// An order with its joined display names, for the detail views.
pub struct GetOrderSummaryById {
    pub order_id: Uuid,
}

impl Processor<GetOrderSummaryById> for DatabaseProcessor {
    type Output = Option<OrderSummary>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetOrderSummaryById")]
    async fn process(&self, query: GetOrderSummaryById) -> Result<Option<OrderSummary>, sqlx::Error> {
        sqlx::query_as::<_, OrderSummary>(&format!("{SUMMARY_SELECT} WHERE o.id = $1"))
            .bind(query.order_id)
            .fetch_optional(&self.pool)
            .await
    }
}

#[derive(Debug, Clone)]
/// A customer's order history, newest first.
pub struct ListOrdersForCustomer {
    pub customer_id: Uuid,
}

impl Processor<ListOrdersForCustomer> for DatabaseProcessor {
    type Output = Vec<OrderSummary>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListOrdersForCustomer")]
    async fn process(&self, query: ListOrdersForCustomer) -> Result<Vec<OrderSummary>, sqlx::Error> {
        sqlx::query_as::<_, OrderSummary>(&format!(
            "{SUMMARY_SELECT} WHERE o.customer_id = $1 ORDER BY o.created_at DESC"
        ))
        .bind(query.customer_id)
        .fetch_all(&self.pool)
        .await
    }
}

#[derive(Debug, Clone)]
/// A canteen's orders, newest first. This is what the vendor dashboard
/// polls.
pub struct ListOrdersForCanteen {
    pub canteen_id: Uuid,
}

impl Processor<ListOrdersForCanteen> for DatabaseProcessor {
    type Output = Vec<OrderSummary>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListOrdersForCanteen")]
    async fn process(&self, query: ListOrdersForCanteen) -> Result<Vec<OrderSummary>, sqlx::Error> {
        sqlx::query_as::<_, OrderSummary>(&format!(
            "{SUMMARY_SELECT} WHERE o.canteen_id = $1 ORDER BY o.created_at DESC"
        ))
        .bind(query.canteen_id)
        .fetch_all(&self.pool)
        .await
    }
}

#[derive(Debug, Clone)]
/// Order count, optionally scoped to one canteen.
pub struct CountOrders {
    pub canteen_id: Option<Uuid>,
}

impl Processor<CountOrders> for DatabaseProcessor {
    type Output = i64;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:CountOrders")]
    async fn process(&self, query: CountOrders) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM orders WHERE $1::uuid IS NULL OR canteen_id = $1",
        )
        .bind(query.canteen_id)
        .fetch_one(&self.pool)
        .await
    }
}

#[derive(Debug, Clone)]
/// Revenue = sum of `total_amount` over completed orders, optionally
/// scoped to one canteen.
pub struct SumCompletedRevenue {
    pub canteen_id: Option<Uuid>,
}

impl Processor<SumCompletedRevenue> for DatabaseProcessor {
    type Output = Decimal;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:SumCompletedRevenue")]
    async fn process(&self, query: SumCompletedRevenue) -> Result<Decimal, sqlx::Error> {
        sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(total_amount), 0) FROM orders \
             WHERE order_status = 'completed' AND ($1::uuid IS NULL OR canteen_id = $1)",
        )
        .bind(query.canteen_id)
        .fetch_one(&self.pool)
        .await
    }
}

impl OrderRecord {
    /// Insert the order row inside the creation transaction.
    pub async fn insert_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        customer_id: Uuid,
        canteen_id: Uuid,
        total_amount: Decimal,
        payment_method: PaymentMethod,
    ) -> Result<OrderRecord, sqlx::Error> {
        sqlx::query_as::<_, OrderRecord>(&format!(
            "INSERT INTO orders \
                 (customer_id, canteen_id, total_amount, payment_method, payment_status) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(customer_id)
        .bind(canteen_id)
        .bind(total_amount)
        .bind(payment_method)
        .bind(payment_method.initial_payment_status())
        .fetch_one(&mut **tx)
        .await
    }

    /// Conditionally advance the order's status.
    ///
    /// The `WHERE order_status = $2` guard makes this a compare-and-swap:
    /// if another request moved the order since it was read, no row
    /// matches and `None` comes back, which callers surface as a conflict.
    /// Reaching `completed` also forces `payment_status` to `completed`,
    /// idempotently — payment is inferred from fulfillment.
    pub async fn advance_status_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        order_id: Uuid,
        expected: OrderStatus,
        new_status: OrderStatus,
    ) -> Result<Option<OrderRecord>, sqlx::Error> {
        sqlx::query_as::<_, OrderRecord>(&format!(
            "UPDATE orders SET \
                 order_status = $3, \
                 payment_status = CASE \
                     WHEN $3 = 'completed'::order_status THEN 'completed'::payment_status \
                     ELSE payment_status \
                 END \
             WHERE id = $1 AND order_status = $2 \
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(order_id)
        .bind(expected)
        .bind(new_status)
        .fetch_optional(&mut **tx)
        .await
    }
}
