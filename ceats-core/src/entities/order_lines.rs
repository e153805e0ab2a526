use kanau::processor::Processor;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::framework::DatabaseProcessor;

/// A frozen snapshot of one catalog item at order time. `menu_item_id`
/// deliberately has no foreign key: deleting or re-pricing the catalog
/// item never touches existing orders.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct OrderLine {
    pub id: i64,
    pub order_id: Uuid,
    pub menu_item_id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
}

/// A line about to be written; the snapshot taken by the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderLine {
    pub menu_item_id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
}

impl NewOrderLine {
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone)]
/// All lines of one order, in insertion order.
pub struct ListLinesForOrder {
    pub order_id: Uuid,
}

impl Processor<ListLinesForOrder> for DatabaseProcessor {
    type Output = Vec<OrderLine>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListLinesForOrder")]
    async fn process(&self, query: ListLinesForOrder) -> Result<Vec<OrderLine>, sqlx::Error> {
        sqlx::query_as::<_, OrderLine>(
            "SELECT id, order_id, menu_item_id, name, price, quantity \
             FROM order_lines WHERE order_id = $1 ORDER BY id",
        )
        .bind(query.order_id)
        .fetch_all(&self.pool)
        .await
    }
}

impl OrderLine {
    /// Insert all lines of a new order in one statement, inside the
    /// creation transaction.
    pub async fn insert_many_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        order_id: Uuid,
        lines: &[NewOrderLine],
    ) -> Result<(), sqlx::Error> {
        if lines.is_empty() {
            return Ok(());
        }

        let menu_item_ids: Vec<Uuid> = lines.iter().map(|l| l.menu_item_id).collect();
        let names: Vec<String> = lines.iter().map(|l| l.name.clone()).collect();
        let prices: Vec<Decimal> = lines.iter().map(|l| l.price).collect();
        let quantities: Vec<i32> = lines.iter().map(|l| l.quantity).collect();

        sqlx::query(
            "INSERT INTO order_lines (order_id, menu_item_id, name, price, quantity) \
             SELECT $1::uuid, * FROM UNNEST($2::uuid[], $3::text[], $4::numeric[], $5::int[])",
        )
        .bind(order_id)
        .bind(menu_item_ids)
        .bind(names)
        .bind(prices)
        .bind(quantities)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
