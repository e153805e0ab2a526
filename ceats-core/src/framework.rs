use sqlx::PgPool;

/// Pool-backed processor for kanau query messages.
///
/// Read queries are modeled as messages implementing
/// `kanau::processor::Processor` against this type; multi-statement writes
/// are inherent `*_tx` methods on the entities, run inside a caller-owned
/// `sqlx::Transaction`.
pub struct DatabaseProcessor {
    pub pool: PgPool,
}

impl DatabaseProcessor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}
