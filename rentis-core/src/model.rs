use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// A registered renter. Created once at registration; never updated or
/// deleted in normal flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Renter {
    pub id: i64,
    pub full_name: String,
    pub phone: String,
    pub id_number: String,
    pub license_number: String,
    pub gender: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied at registration time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRenter {
    pub full_name: String,
    pub phone: String,
    pub id_number: String,
    pub license_number: String,
    pub gender: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Paid admission required before any booking. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryTicket {
    pub id: i64,
    pub renter_id: i64,
    pub code: String,
    pub amount: i64,
    pub payment_method: String,
    pub purchased_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Confirmed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "CONFIRMED",
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CONFIRMED" => Ok(BookingStatus::Confirmed),
            other => Err(CoreError::UnknownStatus(other.to_string())),
        }
    }
}

/// A committed reservation. Immutable after creation; retrieval is by
/// (booking code, owning renter) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub renter_id: i64,
    pub code: String,
    pub category_key: String,
    pub vehicle_name: String,
    pub rental_descriptor: String,
    pub price: i64,
    pub payment_method: String,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

/// Fields persisted when a draft is committed. The price comes from the
/// draft, never from client input at commit time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBooking {
    pub renter_id: i64,
    pub category_key: String,
    pub vehicle_name: String,
    pub rental_descriptor: String,
    pub price: i64,
    pub payment_method: String,
}
