use async_trait::async_trait;

use crate::model::{Booking, EntryTicket, NewBooking, NewRenter, Renter};

pub type RepoError = Box<dyn std::error::Error + Send + Sync>;

/// Repository trait for renter records.
#[async_trait]
pub trait RenterRepository: Send + Sync {
    async fn create(&self, renter: &NewRenter) -> Result<i64, RepoError>;

    /// Look up a renter by contact number. Several renters may share a
    /// number; implementations must return the first match by row id so
    /// the ambiguity is at least deterministic.
    async fn find_by_phone(&self, phone: &str) -> Result<Option<Renter>, RepoError>;

    async fn get(&self, id: i64) -> Result<Option<Renter>, RepoError>;
}

/// Repository trait for entry tickets. Append-only: no update or delete.
#[async_trait]
pub trait TicketRepository: Send + Sync {
    async fn create(
        &self,
        renter_id: i64,
        amount: i64,
        payment_method: &str,
    ) -> Result<String, RepoError>;

    async fn find_for_renter(&self, renter_id: i64) -> Result<Option<EntryTicket>, RepoError>;
}

/// Repository trait for bookings. Append-only: no update or delete.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: &NewBooking) -> Result<String, RepoError>;

    /// Retrieval must match both the code and the owning renter; a code
    /// belonging to a different renter is treated as not found.
    async fn find_by_code(&self, code: &str, renter_id: i64)
        -> Result<Option<Booking>, RepoError>;
}
