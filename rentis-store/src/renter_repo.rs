use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use rentis_core::model::{NewRenter, Renter};
use rentis_core::repository::{RenterRepository, RepoError};

pub struct SqliteRenterRepository {
    pool: SqlitePool,
}

impl SqliteRenterRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

// Internal struct for type-safe querying
#[derive(sqlx::FromRow)]
struct RenterRow {
    id: i64,
    full_name: String,
    phone: String,
    id_number: String,
    license_number: String,
    gender: String,
    address: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    created_at: DateTime<Utc>,
}

impl From<RenterRow> for Renter {
    fn from(row: RenterRow) -> Self {
        Renter {
            id: row.id,
            full_name: row.full_name,
            phone: row.phone,
            id_number: row.id_number,
            license_number: row.license_number,
            gender: row.gender,
            address: row.address,
            latitude: row.latitude,
            longitude: row.longitude,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl RenterRepository for SqliteRenterRepository {
    async fn create(&self, renter: &NewRenter) -> Result<i64, RepoError> {
        let result = sqlx::query(
            r#"
            INSERT INTO renters (full_name, phone, id_number, license_number, gender, address, latitude, longitude, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&renter.full_name)
        .bind(&renter.phone)
        .bind(&renter.id_number)
        .bind(&renter.license_number)
        .bind(&renter.gender)
        .bind(&renter.address)
        .bind(renter.latitude)
        .bind(renter.longitude)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Renter>, RepoError> {
        // Contact numbers are not unique; take the first match by row id
        // so ambiguity is at least deterministic
        let row = sqlx::query_as::<_, RenterRow>(
            "SELECT * FROM renters WHERE phone = ? ORDER BY id LIMIT 1",
        )
        .bind(phone)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Renter::from))
    }

    async fn get(&self, id: i64) -> Result<Option<Renter>, RepoError> {
        let row = sqlx::query_as::<_, RenterRow>("SELECT * FROM renters WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Renter::from))
    }
}
