use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use rentis_core::codes::{external_code, TICKET_PREFIX};
use rentis_core::model::EntryTicket;
use rentis_core::repository::{RepoError, TicketRepository};

pub struct SqliteTicketRepository {
    pool: SqlitePool,
}

impl SqliteTicketRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TicketRow {
    id: i64,
    renter_id: i64,
    code: String,
    amount: i64,
    payment_method: String,
    purchased_at: DateTime<Utc>,
}

impl From<TicketRow> for EntryTicket {
    fn from(row: TicketRow) -> Self {
        EntryTicket {
            id: row.id,
            renter_id: row.renter_id,
            code: row.code,
            amount: row.amount,
            payment_method: row.payment_method,
            purchased_at: row.purchased_at,
        }
    }
}

#[async_trait]
impl TicketRepository for SqliteTicketRepository {
    async fn create(
        &self,
        renter_id: i64,
        amount: i64,
        payment_method: &str,
    ) -> Result<String, RepoError> {
        let code = external_code(TICKET_PREFIX);

        sqlx::query(
            r#"
            INSERT INTO entry_tickets (renter_id, code, amount, payment_method, purchased_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(renter_id)
        .bind(&code)
        .bind(amount)
        .bind(payment_method)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(code)
    }

    async fn find_for_renter(&self, renter_id: i64) -> Result<Option<EntryTicket>, RepoError> {
        // The schema permits several tickets per renter; the earliest one
        // is the one that gates the workflow
        let row = sqlx::query_as::<_, TicketRow>(
            "SELECT * FROM entry_tickets WHERE renter_id = ? ORDER BY id LIMIT 1",
        )
        .bind(renter_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(EntryTicket::from))
    }
}
