//! Requests Domain
//!
//! Requests are wishes for items not yet offered. Other users answer a
//! request by listing an item against it, and every view of a request
//! carries the items offered so far.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_requests::{PgRequestRepository, RequestService};
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://...").await?;
//!
//! let repository = PgRequestRepository::new(db);
//! let service = RequestService::new(repository);
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

pub use error::{RequestError, RequestResult};
pub use handlers::ApiDoc;
pub use models::{AnswerItem, CreateRequest, ItemRequest, PageQuery, RequestView};
pub use postgres::PgRequestRepository;
pub use repository::{InMemoryRequestRepository, RequestRepository};
pub use service::RequestService;
