//! Bookings Domain
//!
//! Reservations of shared items. A booking starts out WAITING and is
//! approved or rejected exactly once by the item's owner. Listings support
//! time and status based filtering for both sides of the exchange.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_bookings::{BookingService, PgBookingRepository};
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://...").await?;
//!
//! let repository = PgBookingRepository::new(db);
//! let service = BookingService::new(repository);
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{BookingError, BookingResult};
pub use handlers::ApiDoc;
pub use models::{
    ApproveQuery, BookingStatus, BookingView, CreateBooking, ItemRef, StateFilter, StateQuery,
    UserRef,
};
pub use postgres::PgBookingRepository;
pub use repository::{BookingRepository, InMemoryBookingRepository, SeededItem};
pub use service::BookingService;
