use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    ExprTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use crate::entity::{self, booking::BookingStatus};
use crate::error::{ItemError, ItemResult};
use crate::models::{
    BookingSummary, Comment, CreateComment, CreateItem, Item, ItemView, UpdateItem,
};
use crate::repository::ItemRepository;

pub struct PgItemRepository {
    db: DatabaseConnection,
}

impl PgItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn ensure_user<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> ItemResult<()> {
        entity::user::Entity::find_by_id(user_id)
            .one(conn)
            .await?
            .ok_or(ItemError::UserNotFound(user_id))?;
        Ok(())
    }

    /// Comments for the given items, oldest first, with author names resolved
    async fn comments_for<C: ConnectionTrait>(
        conn: &C,
        item_ids: &[Uuid],
    ) -> ItemResult<Vec<Comment>> {
        let models = entity::comment::Entity::find()
            .filter(entity::comment::Column::ItemId.is_in(item_ids.iter().copied()))
            .order_by_asc(entity::comment::Column::CreatedAt)
            .all(conn)
            .await?;

        let author_ids: Vec<Uuid> = models.iter().map(|c| c.author_id).collect();
        let authors: HashMap<Uuid, String> = entity::user::Entity::find()
            .filter(entity::user::Column::Id.is_in(author_ids))
            .all(conn)
            .await?
            .into_iter()
            .map(|u| (u.id, u.name))
            .collect();

        Ok(models
            .into_iter()
            .map(|model| {
                let author_name = authors
                    .get(&model.author_id)
                    .cloned()
                    .unwrap_or_default();
                model.into_comment(author_name)
            })
            .collect())
    }

    /// Approved bookings for the given items, used to derive last/next summaries
    async fn approved_bookings_for<C: ConnectionTrait>(
        conn: &C,
        item_ids: &[Uuid],
    ) -> ItemResult<Vec<entity::booking::Model>> {
        let models = entity::booking::Entity::find()
            .filter(entity::booking::Column::ItemId.is_in(item_ids.iter().copied()))
            .filter(entity::booking::Column::Status.eq(BookingStatus::Approved))
            .order_by_asc(entity::booking::Column::StartDate)
            .all(conn)
            .await?;
        Ok(models)
    }

    fn summaries(
        bookings: &[entity::booking::Model],
        item_id: Uuid,
    ) -> (Option<BookingSummary>, Option<BookingSummary>) {
        let now = Utc::now();
        let of_item: Vec<&entity::booking::Model> =
            bookings.iter().filter(|b| b.item_id == item_id).collect();

        let last = of_item
            .iter()
            .filter(|b| b.start_date <= now)
            .max_by_key(|b| b.start_date)
            .map(|b| BookingSummary::from((*b).clone()));
        let next = of_item
            .iter()
            .filter(|b| b.start_date > now)
            .min_by_key(|b| b.start_date)
            .map(|b| BookingSummary::from((*b).clone()));

        (last, next)
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn create(&self, owner_id: Uuid, input: CreateItem) -> ItemResult<Item> {
        let txn = self.db.begin().await?;

        Self::ensure_user(&txn, owner_id).await?;

        if let Some(request_id) = input.request_id {
            entity::request::Entity::find_by_id(request_id)
                .one(&txn)
                .await?
                .ok_or(ItemError::RequestNotFound(request_id))?;
        }

        let active_model: entity::item::ActiveModel = (owner_id, input).into();
        let model = active_model.insert(&txn).await?;
        txn.commit().await?;

        tracing::info!(item_id = %model.id, owner_id = %owner_id, "Created item");
        Ok(model.into())
    }

    async fn update(&self, user_id: Uuid, item_id: Uuid, input: UpdateItem) -> ItemResult<Item> {
        let txn = self.db.begin().await?;

        Self::ensure_user(&txn, user_id).await?;

        let model = entity::item::Entity::find_by_id(item_id)
            .one(&txn)
            .await?
            .ok_or(ItemError::ItemNotFound(item_id))?;

        // Non-owners learn nothing about the item, not even that it exists
        if model.owner_id != user_id {
            return Err(ItemError::ItemNotFound(item_id));
        }

        let mut item: Item = model.into();
        item.apply_update(input);

        let active_model = entity::item::ActiveModel {
            id: Set(item.id),
            name: Set(item.name.clone()),
            description: Set(item.description.clone()),
            available: Set(item.available),
            owner_id: Set(item.owner_id),
            request_id: Set(item.request_id),
            created_at: Set(item.created_at.into()),
            updated_at: Set(item.updated_at.into()),
        };

        let updated = active_model.update(&txn).await?;
        txn.commit().await?;

        tracing::info!(item_id = %item_id, "Updated item");
        Ok(updated.into())
    }

    async fn get_by_id(&self, user_id: Uuid, item_id: Uuid) -> ItemResult<ItemView> {
        Self::ensure_user(&self.db, user_id).await?;

        let model = entity::item::Entity::find_by_id(item_id)
            .one(&self.db)
            .await?
            .ok_or(ItemError::ItemNotFound(item_id))?;
        let item: Item = model.into();

        let comments = Self::comments_for(&self.db, &[item_id]).await?;

        let (last, next) = if item.owner_id == user_id {
            let bookings = Self::approved_bookings_for(&self.db, &[item_id]).await?;
            Self::summaries(&bookings, item_id)
        } else {
            (None, None)
        };

        Ok(ItemView::new(item, last, next, comments))
    }

    async fn list_by_owner(&self, user_id: Uuid) -> ItemResult<Vec<ItemView>> {
        Self::ensure_user(&self.db, user_id).await?;

        let items: Vec<Item> = entity::item::Entity::find()
            .filter(entity::item::Column::OwnerId.eq(user_id))
            .order_by_asc(entity::item::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        let item_ids: Vec<Uuid> = items.iter().map(|i| i.id).collect();
        let comments = Self::comments_for(&self.db, &item_ids).await?;
        let bookings = Self::approved_bookings_for(&self.db, &item_ids).await?;

        let mut comments_by_item: HashMap<Uuid, Vec<Comment>> = HashMap::new();
        for comment in comments {
            comments_by_item
                .entry(comment.item_id)
                .or_default()
                .push(comment);
        }

        let views = items
            .into_iter()
            .map(|item| {
                let (last, next) = Self::summaries(&bookings, item.id);
                let item_comments = comments_by_item.remove(&item.id).unwrap_or_default();
                ItemView::new(item, last, next, item_comments)
            })
            .collect();

        Ok(views)
    }

    async fn search(&self, text: String) -> ItemResult<Vec<Item>> {
        let pattern = format!("%{}%", text.to_lowercase());

        let models = entity::item::Entity::find()
            .filter(entity::item::Column::Available.eq(true))
            .filter(
                Condition::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col(entity::item::Column::Name)))
                            .like(pattern.clone()),
                    )
                    .add(
                        Expr::expr(Func::lower(Expr::col(entity::item::Column::Description)))
                            .like(pattern),
                    ),
            )
            .order_by_asc(entity::item::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn add_comment(
        &self,
        user_id: Uuid,
        item_id: Uuid,
        input: CreateComment,
    ) -> ItemResult<Comment> {
        let txn = self.db.begin().await?;

        let author = entity::user::Entity::find_by_id(user_id)
            .one(&txn)
            .await?
            .ok_or(ItemError::UserNotFound(user_id))?;

        entity::item::Entity::find_by_id(item_id)
            .one(&txn)
            .await?
            .ok_or(ItemError::ItemNotFound(item_id))?;

        let completed = entity::booking::Entity::find()
            .filter(entity::booking::Column::ItemId.eq(item_id))
            .filter(entity::booking::Column::BookerId.eq(user_id))
            .filter(entity::booking::Column::Status.eq(BookingStatus::Approved))
            .filter(entity::booking::Column::EndDate.lt(Utc::now()))
            .one(&txn)
            .await?;

        if completed.is_none() {
            return Err(ItemError::IneligibleForComment(format!(
                "User {} has no completed booking for item {}",
                user_id, item_id
            )));
        }

        let active_model: entity::comment::ActiveModel = (user_id, item_id, input).into();
        let model = active_model.insert(&txn).await?;
        txn.commit().await?;

        tracing::info!(comment_id = %model.id, item_id = %item_id, "Added comment");
        Ok(model.into_comment(author.name))
    }
}
