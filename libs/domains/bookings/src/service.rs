use std::str::FromStr;
use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::error::{BookingError, BookingResult};
use crate::models::{BookingView, CreateBooking, StateFilter};
use crate::repository::BookingRepository;

/// Service layer for booking business logic
#[derive(Clone)]
pub struct BookingService<R: BookingRepository> {
    repository: Arc<R>,
}

impl<R: BookingRepository> BookingService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Parse an optional raw state parameter; absent means ALL
    fn parse_state(state: Option<String>) -> BookingResult<StateFilter> {
        match state {
            None => Ok(StateFilter::All),
            Some(raw) => StateFilter::from_str(&raw)
                .map_err(|_| BookingError::InvalidState(format!("Unknown state: {raw}"))),
        }
    }

    #[instrument(skip(self, input), fields(booker_id = %booker_id, item_id = %input.item_id))]
    pub async fn create_booking(
        &self,
        booker_id: Uuid,
        input: CreateBooking,
    ) -> BookingResult<BookingView> {
        if input.end_date <= input.start_date {
            return Err(BookingError::Validation(
                "End date must be strictly after start date".to_string(),
            ));
        }

        self.repository.create(booker_id, input).await
    }

    #[instrument(skip(self), fields(owner_id = %owner_id, booking_id = %booking_id, approved))]
    pub async fn decide_booking(
        &self,
        owner_id: Uuid,
        booking_id: Uuid,
        approved: bool,
    ) -> BookingResult<BookingView> {
        self.repository.decide(owner_id, booking_id, approved).await
    }

    #[instrument(skip(self), fields(caller_id = %caller_id, booking_id = %booking_id))]
    pub async fn get_booking(
        &self,
        caller_id: Uuid,
        booking_id: Uuid,
    ) -> BookingResult<BookingView> {
        self.repository.get_by_id(caller_id, booking_id).await
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn get_bookings_by_booker(
        &self,
        user_id: Uuid,
        state: Option<String>,
    ) -> BookingResult<Vec<BookingView>> {
        let filter = Self::parse_state(state)?;
        self.repository.list_by_booker(user_id, filter).await
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn get_bookings_by_owner(
        &self,
        user_id: Uuid,
        state: Option<String>,
    ) -> BookingResult<Vec<BookingView>> {
        let filter = Self::parse_state(state)?;
        self.repository.list_by_owner(user_id, filter).await
    }
}
