use kanau::processor::Processor;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::framework::DatabaseProcessor;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct MenuItem {
    pub id: Uuid,
    pub canteen_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub is_available: bool,
    pub created_at: time::PrimitiveDateTime,
}

const MENU_ITEM_COLUMNS: &str =
    "id, canteen_id, name, description, price, image_url, is_available, created_at";

#[derive(Debug, Clone)]
/// Menu as shown to customers: available items only.
pub struct ListAvailableMenuItems {
    pub canteen_id: Uuid,
}

impl Processor<ListAvailableMenuItems> for DatabaseProcessor {
    type Output = Vec<MenuItem>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListAvailableMenuItems")]
    async fn process(&self, query: ListAvailableMenuItems) -> Result<Vec<MenuItem>, sqlx::Error> {
        sqlx::query_as::<_, MenuItem>(&format!(
            "SELECT {MENU_ITEM_COLUMNS} FROM menu_items \
             WHERE canteen_id = $1 AND is_available ORDER BY name"
        ))
        .bind(query.canteen_id)
        .fetch_all(&self.pool)
        .await
    }
}

#[derive(Debug, Clone)]
/// Menu as shown to the owning manager: every item, available or not.
pub struct ListMenuItemsForManager {
    pub canteen_id: Uuid,
}

impl Processor<ListMenuItemsForManager> for DatabaseProcessor {
    type Output = Vec<MenuItem>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListMenuItemsForManager")]
    async fn process(&self, query: ListMenuItemsForManager) -> Result<Vec<MenuItem>, sqlx::Error> {
        sqlx::query_as::<_, MenuItem>(&format!(
            "SELECT {MENU_ITEM_COLUMNS} FROM menu_items WHERE canteen_id = $1 ORDER BY name"
        ))
        .bind(query.canteen_id)
        .fetch_all(&self.pool)
        .await
    }
}

#[derive(Debug, Clone)]
/// Batched catalog lookup for the order-creation pipeline. Ids that do not
/// resolve are simply absent from the result; the pipeline decides what
/// that means.
pub struct GetMenuItemsByIds {
    pub item_ids: Vec<Uuid>,
}

impl Processor<GetMenuItemsByIds> for DatabaseProcessor {
    type Output = Vec<MenuItem>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetMenuItemsByIds")]
    async fn process(&self, query: GetMenuItemsByIds) -> Result<Vec<MenuItem>, sqlx::Error> {
        sqlx::query_as::<_, MenuItem>(&format!(
            "SELECT {MENU_ITEM_COLUMNS} FROM menu_items WHERE id = ANY($1)"
        ))
        .bind(query.item_ids)
        .fetch_all(&self.pool)
        .await
    }
}

#[derive(Debug, Clone)]
pub struct InsertMenuItem {
    pub canteen_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub is_available: bool,
}

impl Processor<InsertMenuItem> for DatabaseProcessor {
    type Output = MenuItem;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:InsertMenuItem")]
    async fn process(&self, insert: InsertMenuItem) -> Result<MenuItem, sqlx::Error> {
        sqlx::query_as::<_, MenuItem>(&format!(
            "INSERT INTO menu_items (canteen_id, name, description, price, image_url, is_available) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {MENU_ITEM_COLUMNS}"
        ))
        .bind(insert.canteen_id)
        .bind(insert.name)
        .bind(insert.description)
        .bind(insert.price)
        .bind(insert.image_url)
        .bind(insert.is_available)
        .fetch_one(&self.pool)
        .await
    }
}

#[derive(Debug, Clone)]
/// Full replace of a menu item, scoped to the owning canteen. Returns
/// `None` when the item does not exist under that canteen.
pub struct UpdateMenuItem {
    pub item_id: Uuid,
    pub canteen_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub is_available: bool,
}

impl Processor<UpdateMenuItem> for DatabaseProcessor {
    type Output = Option<MenuItem>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:UpdateMenuItem")]
    async fn process(&self, update: UpdateMenuItem) -> Result<Option<MenuItem>, sqlx::Error> {
        sqlx::query_as::<_, MenuItem>(&format!(
            "UPDATE menu_items \
             SET name = $3, description = $4, price = $5, image_url = $6, is_available = $7 \
             WHERE id = $1 AND canteen_id = $2 \
             RETURNING {MENU_ITEM_COLUMNS}"
        ))
        .bind(update.item_id)
        .bind(update.canteen_id)
        .bind(update.name)
        .bind(update.description)
        .bind(update.price)
        .bind(update.image_url)
        .bind(update.is_available)
        .fetch_optional(&self.pool)
        .await
    }
}

#[derive(Debug, Clone)]
/// Delete a menu item, scoped to the owning canteen. Existing order lines
/// are untouched; they carry their own snapshot of the item.
pub struct DeleteMenuItem {
    pub item_id: Uuid,
    pub canteen_id: Uuid,
}

impl Processor<DeleteMenuItem> for DatabaseProcessor {
    /// Whether a row was actually deleted.
    type Output = bool;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:DeleteMenuItem")]
    async fn process(&self, delete: DeleteMenuItem) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = $1 AND canteen_id = $2")
            .bind(delete.item_id)
            .bind(delete.canteen_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
