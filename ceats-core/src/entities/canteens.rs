use kanau::processor::Processor;
use uuid::Uuid;

use crate::framework::DatabaseProcessor;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Canteen {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub image_url: Option<String>,
    pub upi_id: Option<String>,
    pub is_open: bool,
    pub created_at: time::PrimitiveDateTime,
}

const CANTEEN_COLUMNS: &str = "id, name, location, image_url, upi_id, is_open, created_at";

#[derive(Debug, Clone)]
/// List canteens currently open for orders, for the public directory.
pub struct ListOpenCanteens;

impl Processor<ListOpenCanteens> for DatabaseProcessor {
    type Output = Vec<Canteen>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListOpenCanteens")]
    async fn process(&self, _query: ListOpenCanteens) -> Result<Vec<Canteen>, sqlx::Error> {
        sqlx::query_as::<_, Canteen>(&format!(
            "SELECT {CANTEEN_COLUMNS} FROM canteens WHERE is_open ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await
    }
}

#[derive(Debug, Clone)]
pub struct GetCanteenById {
    pub canteen_id: Uuid,
}

impl Processor<GetCanteenById> for DatabaseProcessor {
    type Output = Option<Canteen>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetCanteenById")]
    async fn process(&self, query: GetCanteenById) -> Result<Option<Canteen>, sqlx::Error> {
        sqlx::query_as::<_, Canteen>(&format!(
            "SELECT {CANTEEN_COLUMNS} FROM canteens WHERE id = $1"
        ))
        .bind(query.canteen_id)
        .fetch_optional(&self.pool)
        .await
    }
}

#[derive(Debug, Clone)]
/// Register a new canteen. The name is unique; violations surface as
/// `sqlx::Error::Database` with a unique-violation code.
pub struct InsertCanteen {
    pub name: String,
    pub location: String,
    pub image_url: Option<String>,
    pub upi_id: Option<String>,
}

impl Processor<InsertCanteen> for DatabaseProcessor {
    type Output = Canteen;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:InsertCanteen")]
    async fn process(&self, insert: InsertCanteen) -> Result<Canteen, sqlx::Error> {
        sqlx::query_as::<_, Canteen>(&format!(
            "INSERT INTO canteens (name, location, image_url, upi_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {CANTEEN_COLUMNS}"
        ))
        .bind(insert.name)
        .bind(insert.location)
        .bind(insert.image_url)
        .bind(insert.upi_id)
        .fetch_one(&self.pool)
        .await
    }
}

#[derive(Debug, Clone)]
/// Partial update of a canteen's settings; `None` fields keep their
/// current value.
pub struct UpdateCanteen {
    pub canteen_id: Uuid,
    pub name: Option<String>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub upi_id: Option<String>,
    pub is_open: Option<bool>,
}

impl Processor<UpdateCanteen> for DatabaseProcessor {
    type Output = Option<Canteen>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:UpdateCanteen")]
    async fn process(&self, update: UpdateCanteen) -> Result<Option<Canteen>, sqlx::Error> {
        sqlx::query_as::<_, Canteen>(&format!(
            "UPDATE canteens SET \
                 name = COALESCE($2, name), \
                 location = COALESCE($3, location), \
                 image_url = COALESCE($4, image_url), \
                 upi_id = COALESCE($5, upi_id), \
                 is_open = COALESCE($6, is_open) \
             WHERE id = $1 \
             RETURNING {CANTEEN_COLUMNS}"
        ))
        .bind(update.canteen_id)
        .bind(update.name)
        .bind(update.location)
        .bind(update.image_url)
        .bind(update.upi_id)
        .bind(update.is_open)
        .fetch_optional(&self.pool)
        .await
    }
}

#[derive(Debug, Clone)]
pub struct CountCanteens;

impl Processor<CountCanteens> for DatabaseProcessor {
    type Output = i64;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:CountCanteens")]
    async fn process(&self, _query: CountCanteens) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM canteens")
            .fetch_one(&self.pool)
            .await
    }
}
