use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use rentis_core::codes::{external_code, BOOKING_PREFIX};
use rentis_core::model::{Booking, BookingStatus, NewBooking};
use rentis_core::repository::{BookingRepository, RepoError};

pub struct SqliteBookingRepository {
    pool: SqlitePool,
}

impl SqliteBookingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: i64,
    renter_id: i64,
    code: String,
    category_key: String,
    vehicle_name: String,
    rental_descriptor: String,
    price: i64,
    payment_method: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = RepoError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        Ok(Booking {
            id: row.id,
            renter_id: row.renter_id,
            code: row.code,
            category_key: row.category_key,
            vehicle_name: row.vehicle_name,
            rental_descriptor: row.rental_descriptor,
            price: row.price,
            payment_method: row.payment_method,
            status: BookingStatus::from_str(&row.status)?,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepository {
    async fn create(&self, booking: &NewBooking) -> Result<String, RepoError> {
        let code = external_code(BOOKING_PREFIX);

        sqlx::query(
            r#"
            INSERT INTO bookings (renter_id, code, category_key, vehicle_name, rental_descriptor, price, payment_method, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(booking.renter_id)
        .bind(&code)
        .bind(&booking.category_key)
        .bind(&booking.vehicle_name)
        .bind(&booking.rental_descriptor)
        .bind(booking.price)
        .bind(&booking.payment_method)
        .bind(BookingStatus::Confirmed.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(code)
    }

    async fn find_by_code(
        &self,
        code: &str,
        renter_id: i64,
    ) -> Result<Option<Booking>, RepoError> {
        // Both fields must match; a code held by a different renter is
        // not found
        let row = sqlx::query_as::<_, BookingRow>(
            "SELECT * FROM bookings WHERE code = ? AND renter_id = ?",
        )
        .bind(code)
        .bind(renter_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Booking::try_from).transpose()
    }
}
