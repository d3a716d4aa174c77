pub mod app_config;
pub mod booking_repo;
pub mod database;
pub mod renter_repo;
pub mod ticket_repo;

pub use booking_repo::SqliteBookingRepository;
pub use database::Db;
pub use renter_repo::SqliteRenterRepository;
pub use ticket_repo::SqliteTicketRepository;
