//! Items Domain
//!
//! Items that owners offer for sharing, the comments bookers leave on them,
//! and full-text search over what is available. Owners additionally see the
//! last and next approved booking on each of their items.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_items::{ItemService, PgItemRepository};
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://...").await?;
//!
//! let repository = PgItemRepository::new(db);
//! let service = ItemService::new(repository);
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

pub use error::{ItemError, ItemResult};
pub use handlers::ApiDoc;
pub use models::{
    BookingSummary, Comment, CreateComment, CreateItem, Item, ItemView, SearchQuery, UpdateItem,
};
pub use postgres::PgItemRepository;
pub use repository::{InMemoryItemRepository, ItemRepository, SeededBooking};
pub use service::ItemService;
