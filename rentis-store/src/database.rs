use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

#[derive(Clone)]
pub struct Db {
    pub pool: Pool<Sqlite>,
}

impl Db {
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Single-connection in-memory database; every query sees the same
    /// schema. Used by tests.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Create the three tables if absent. External codes get UNIQUE
    /// columns so a generator collision fails the insert loudly instead
    /// of corrupting lookups.
    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        info!("Initializing database schema...");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS renters (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                full_name       TEXT NOT NULL,
                phone           TEXT NOT NULL,
                id_number       TEXT NOT NULL,
                license_number  TEXT NOT NULL,
                gender          TEXT NOT NULL,
                address         TEXT NOT NULL,
                latitude        REAL,
                longitude       REAL,
                created_at      TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS entry_tickets (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                renter_id       INTEGER NOT NULL REFERENCES renters(id),
                code            TEXT NOT NULL UNIQUE,
                amount          INTEGER NOT NULL,
                payment_method  TEXT NOT NULL,
                purchased_at    TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS bookings (
                id                INTEGER PRIMARY KEY AUTOINCREMENT,
                renter_id         INTEGER NOT NULL REFERENCES renters(id),
                code              TEXT NOT NULL UNIQUE,
                category_key      TEXT NOT NULL,
                vehicle_name      TEXT NOT NULL,
                rental_descriptor TEXT NOT NULL,
                price             INTEGER NOT NULL,
                payment_method    TEXT NOT NULL,
                status            TEXT NOT NULL,
                created_at        TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        info!("Schema ready.");
        Ok(())
    }
}
