use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{BookingError, BookingResult};
use crate::models::{BookingStatus, BookingView, CreateBooking, ItemRef, StateFilter, UserRef};

/// Repository trait for Booking persistence
///
/// Existence, ownership and status checks live here so that mutating
/// operations run their read-check-write sequence atomically against the
/// store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Create a booking in WAITING state for `booker_id`
    async fn create(&self, booker_id: Uuid, input: CreateBooking) -> BookingResult<BookingView>;

    /// Approve or reject a WAITING booking; only the item's owner may decide
    async fn decide(
        &self,
        owner_id: Uuid,
        booking_id: Uuid,
        approved: bool,
    ) -> BookingResult<BookingView>;

    /// Fetch one booking; visible to its booker and the item's owner only
    async fn get_by_id(&self, caller_id: Uuid, booking_id: Uuid) -> BookingResult<BookingView>;

    /// Bookings made by `user_id`, filtered and ordered start descending
    async fn list_by_booker(
        &self,
        user_id: Uuid,
        filter: StateFilter,
    ) -> BookingResult<Vec<BookingView>>;

    /// Bookings on items owned by `user_id`, filtered and ordered start descending
    async fn list_by_owner(
        &self,
        user_id: Uuid,
        filter: StateFilter,
    ) -> BookingResult<Vec<BookingView>>;
}

/// Item row seeded into the in-memory repository by tests
#[derive(Debug, Clone)]
pub struct SeededItem {
    pub id: Uuid,
    pub name: String,
    pub available: bool,
    pub owner_id: Uuid,
}

#[derive(Debug, Clone)]
struct StoredBooking {
    id: Uuid,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    item_id: Uuid,
    booker_id: Uuid,
    status: BookingStatus,
}

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, String>,
    items: HashMap<Uuid, SeededItem>,
    bookings: Vec<StoredBooking>,
}

/// In-memory repository for tests and local experiments.
///
/// Rows from neighbouring domains (users, items) are seeded explicitly
/// since this store has no foreign keys to enforce them.
#[derive(Clone, Default)]
pub struct InMemoryBookingRepository {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed_user(&self, id: Uuid, name: &str) {
        self.inner.write().await.users.insert(id, name.to_string());
    }

    pub async fn seed_item(&self, item: SeededItem) {
        self.inner.write().await.items.insert(item.id, item);
    }

    fn view(inner: &Inner, booking: &StoredBooking) -> BookingResult<BookingView> {
        let item = inner
            .items
            .get(&booking.item_id)
            .ok_or(BookingError::ItemNotFound(booking.item_id))?;
        let booker_name = inner
            .users
            .get(&booking.booker_id)
            .cloned()
            .unwrap_or_default();

        Ok(BookingView {
            id: booking.id,
            start_date: booking.start_date,
            end_date: booking.end_date,
            status: booking.status,
            item: ItemRef {
                id: item.id,
                name: item.name.clone(),
            },
            booker: UserRef {
                id: booking.booker_id,
                name: booker_name,
            },
        })
    }

    fn list(
        inner: &Inner,
        filter: StateFilter,
        keep: impl Fn(&StoredBooking) -> bool,
    ) -> BookingResult<Vec<BookingView>> {
        let now = Utc::now();
        let mut matching: Vec<&StoredBooking> = inner
            .bookings
            .iter()
            .filter(|b| keep(b))
            .filter(|b| filter.matches(b.status, b.start_date, b.end_date, now))
            .collect();
        matching.sort_by(|a, b| b.start_date.cmp(&a.start_date));

        matching.into_iter().map(|b| Self::view(inner, b)).collect()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn create(&self, booker_id: Uuid, input: CreateBooking) -> BookingResult<BookingView> {
        let mut inner = self.inner.write().await;

        if !inner.users.contains_key(&booker_id) {
            return Err(BookingError::UserNotFound(booker_id));
        }

        let item = inner
            .items
            .get(&input.item_id)
            .ok_or(BookingError::ItemNotFound(input.item_id))?;

        if item.owner_id == booker_id {
            return Err(BookingError::ItemNotFound(input.item_id));
        }
        if !item.available {
            return Err(BookingError::Validation(format!(
                "Item {} is not available",
                input.item_id
            )));
        }

        let booking = StoredBooking {
            id: Uuid::now_v7(),
            start_date: input.start_date,
            end_date: input.end_date,
            item_id: input.item_id,
            booker_id,
            status: BookingStatus::Waiting,
        };
        let view = Self::view(&inner, &booking)?;
        inner.bookings.push(booking);

        tracing::info!(booking_id = %view.id, "Created booking");
        Ok(view)
    }

    async fn decide(
        &self,
        owner_id: Uuid,
        booking_id: Uuid,
        approved: bool,
    ) -> BookingResult<BookingView> {
        let mut inner = self.inner.write().await;

        if !inner.users.contains_key(&owner_id) {
            return Err(BookingError::UserNotFound(owner_id));
        }

        let index = inner
            .bookings
            .iter()
            .position(|b| b.id == booking_id)
            .ok_or(BookingError::BookingNotFound(booking_id))?;

        let item_id = inner.bookings[index].item_id;
        let item_owner = inner
            .items
            .get(&item_id)
            .map(|i| i.owner_id)
            .ok_or(BookingError::ItemNotFound(item_id))?;

        if item_owner != owner_id {
            return Err(BookingError::BookingNotFound(booking_id));
        }
        if inner.bookings[index].status != BookingStatus::Waiting {
            return Err(BookingError::InvalidState(format!(
                "Booking {} has already been decided",
                booking_id
            )));
        }

        inner.bookings[index].status = if approved {
            BookingStatus::Approved
        } else {
            BookingStatus::Rejected
        };

        let booking = inner.bookings[index].clone();
        Self::view(&inner, &booking)
    }

    async fn get_by_id(&self, caller_id: Uuid, booking_id: Uuid) -> BookingResult<BookingView> {
        let inner = self.inner.read().await;

        let booking = inner
            .bookings
            .iter()
            .find(|b| b.id == booking_id)
            .ok_or(BookingError::BookingNotFound(booking_id))?;

        let item_owner = inner
            .items
            .get(&booking.item_id)
            .map(|i| i.owner_id)
            .ok_or(BookingError::ItemNotFound(booking.item_id))?;

        if caller_id != booking.booker_id && caller_id != item_owner {
            return Err(BookingError::BookingNotFound(booking_id));
        }

        Self::view(&inner, booking)
    }

    async fn list_by_booker(
        &self,
        user_id: Uuid,
        filter: StateFilter,
    ) -> BookingResult<Vec<BookingView>> {
        let inner = self.inner.read().await;

        if !inner.users.contains_key(&user_id) {
            return Err(BookingError::UserNotFound(user_id));
        }

        Self::list(&inner, filter, |b| b.booker_id == user_id)
    }

    async fn list_by_owner(
        &self,
        user_id: Uuid,
        filter: StateFilter,
    ) -> BookingResult<Vec<BookingView>> {
        let inner = self.inner.read().await;

        if !inner.users.contains_key(&user_id) {
            return Err(BookingError::UserNotFound(user_id));
        }

        let owned: Vec<Uuid> = inner
            .items
            .values()
            .filter(|i| i.owner_id == user_id)
            .map(|i| i.id)
            .collect();

        Self::list(&inner, filter, |b| owned.contains(&b.item_id))
    }
}
