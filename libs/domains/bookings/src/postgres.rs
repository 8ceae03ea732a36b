use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use uuid::Uuid;

use crate::entity;
use crate::error::{BookingError, BookingResult};
use crate::models::{BookingStatus, BookingView, CreateBooking, ItemRef, StateFilter, UserRef};
use crate::repository::BookingRepository;

pub struct PgBookingRepository {
    db: DatabaseConnection,
}

impl PgBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn ensure_user<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> BookingResult<()> {
        entity::user::Entity::find_by_id(user_id)
            .one(conn)
            .await?
            .ok_or(BookingError::UserNotFound(user_id))?;
        Ok(())
    }

    fn apply_filter(
        query: sea_orm::Select<entity::booking::Entity>,
        filter: StateFilter,
    ) -> sea_orm::Select<entity::booking::Entity> {
        let now = Utc::now();
        match filter {
            StateFilter::All => query,
            StateFilter::Current => query
                .filter(entity::booking::Column::StartDate.lte(now))
                .filter(entity::booking::Column::EndDate.gt(now)),
            StateFilter::Future => query.filter(entity::booking::Column::StartDate.gt(now)),
            StateFilter::Past => query.filter(entity::booking::Column::EndDate.lt(now)),
            StateFilter::Waiting => {
                query.filter(entity::booking::Column::Status.eq(BookingStatus::Waiting))
            }
            StateFilter::Rejected => {
                query.filter(entity::booking::Column::Status.eq(BookingStatus::Rejected))
            }
        }
    }

    /// Resolve item and booker references for a batch of booking rows
    async fn assemble<C: ConnectionTrait>(
        conn: &C,
        bookings: Vec<entity::booking::Model>,
    ) -> BookingResult<Vec<BookingView>> {
        let item_ids: Vec<Uuid> = bookings.iter().map(|b| b.item_id).collect();
        let booker_ids: Vec<Uuid> = bookings.iter().map(|b| b.booker_id).collect();

        let items: HashMap<Uuid, entity::item::Model> = entity::item::Entity::find()
            .filter(entity::item::Column::Id.is_in(item_ids))
            .all(conn)
            .await?
            .into_iter()
            .map(|i| (i.id, i))
            .collect();
        let bookers: HashMap<Uuid, entity::user::Model> = entity::user::Entity::find()
            .filter(entity::user::Column::Id.is_in(booker_ids))
            .all(conn)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        bookings
            .into_iter()
            .map(|booking| {
                let item = items
                    .get(&booking.item_id)
                    .cloned()
                    .ok_or(BookingError::ItemNotFound(booking.item_id))?;
                let booker = bookers
                    .get(&booking.booker_id)
                    .cloned()
                    .ok_or(BookingError::UserNotFound(booking.booker_id))?;
                Ok(Self::view(booking, item, booker))
            })
            .collect()
    }

    fn view(
        booking: entity::booking::Model,
        item: entity::item::Model,
        booker: entity::user::Model,
    ) -> BookingView {
        BookingView {
            id: booking.id,
            start_date: booking.start_date.into(),
            end_date: booking.end_date.into(),
            status: booking.status,
            item: ItemRef::from(item),
            booker: UserRef::from(booker),
        }
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn create(&self, booker_id: Uuid, input: CreateBooking) -> BookingResult<BookingView> {
        let txn = self.db.begin().await?;

        let booker = entity::user::Entity::find_by_id(booker_id)
            .one(&txn)
            .await?
            .ok_or(BookingError::UserNotFound(booker_id))?;

        let item = entity::item::Entity::find_by_id(input.item_id)
            .one(&txn)
            .await?
            .ok_or(BookingError::ItemNotFound(input.item_id))?;

        // Owners never book their own items; hidden as not-found
        if item.owner_id == booker_id {
            return Err(BookingError::ItemNotFound(input.item_id));
        }
        if !item.available {
            return Err(BookingError::Validation(format!(
                "Item {} is not available",
                input.item_id
            )));
        }

        let active_model: entity::booking::ActiveModel = (booker_id, input).into();
        let model = active_model.insert(&txn).await?;
        txn.commit().await?;

        tracing::info!(booking_id = %model.id, booker_id = %booker_id, "Created booking");
        Ok(Self::view(model, item, booker))
    }

    async fn decide(
        &self,
        owner_id: Uuid,
        booking_id: Uuid,
        approved: bool,
    ) -> BookingResult<BookingView> {
        let txn = self.db.begin().await?;

        Self::ensure_user(&txn, owner_id).await?;

        let booking = entity::booking::Entity::find_by_id(booking_id)
            .one(&txn)
            .await?
            .ok_or(BookingError::BookingNotFound(booking_id))?;

        let item = entity::item::Entity::find_by_id(booking.item_id)
            .one(&txn)
            .await?
            .ok_or(BookingError::ItemNotFound(booking.item_id))?;

        if item.owner_id != owner_id {
            return Err(BookingError::BookingNotFound(booking_id));
        }
        if booking.status != BookingStatus::Waiting {
            return Err(BookingError::InvalidState(format!(
                "Booking {} has already been decided",
                booking_id
            )));
        }

        let booker = entity::user::Entity::find_by_id(booking.booker_id)
            .one(&txn)
            .await?
            .ok_or(BookingError::UserNotFound(booking.booker_id))?;

        let mut active_model = booking.into_active_model();
        active_model.status = Set(if approved {
            BookingStatus::Approved
        } else {
            BookingStatus::Rejected
        });

        let updated = active_model.update(&txn).await?;
        txn.commit().await?;

        tracing::info!(booking_id = %booking_id, approved, "Decided booking");
        Ok(Self::view(updated, item, booker))
    }

    async fn get_by_id(&self, caller_id: Uuid, booking_id: Uuid) -> BookingResult<BookingView> {
        let booking = entity::booking::Entity::find_by_id(booking_id)
            .one(&self.db)
            .await?
            .ok_or(BookingError::BookingNotFound(booking_id))?;

        let item = entity::item::Entity::find_by_id(booking.item_id)
            .one(&self.db)
            .await?
            .ok_or(BookingError::ItemNotFound(booking.item_id))?;

        // Visible only to the booker and the item's owner
        if caller_id != booking.booker_id && caller_id != item.owner_id {
            return Err(BookingError::BookingNotFound(booking_id));
        }

        let booker = entity::user::Entity::find_by_id(booking.booker_id)
            .one(&self.db)
            .await?
            .ok_or(BookingError::UserNotFound(booking.booker_id))?;

        Ok(Self::view(booking, item, booker))
    }

    async fn list_by_booker(
        &self,
        user_id: Uuid,
        filter: StateFilter,
    ) -> BookingResult<Vec<BookingView>> {
        Self::ensure_user(&self.db, user_id).await?;

        let query = entity::booking::Entity::find()
            .filter(entity::booking::Column::BookerId.eq(user_id))
            .order_by_desc(entity::booking::Column::StartDate);
        let bookings = Self::apply_filter(query, filter).all(&self.db).await?;

        Self::assemble(&self.db, bookings).await
    }

    async fn list_by_owner(
        &self,
        user_id: Uuid,
        filter: StateFilter,
    ) -> BookingResult<Vec<BookingView>> {
        Self::ensure_user(&self.db, user_id).await?;

        let owned: Vec<Uuid> = entity::item::Entity::find()
            .filter(entity::item::Column::OwnerId.eq(user_id))
            .select_only()
            .column(entity::item::Column::Id)
            .into_tuple()
            .all(&self.db)
            .await?;

        let query = entity::booking::Entity::find()
            .filter(entity::booking::Column::ItemId.is_in(owned))
            .order_by_desc(entity::booking::Column::StartDate);
        let bookings = Self::apply_filter(query, filter).all(&self.db).await?;

        Self::assemble(&self.db, bookings).await
    }
}
