use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ItemError, ItemResult};
use crate::models::{
    BookingSummary, Comment, CreateComment, CreateItem, Item, ItemView, UpdateItem,
};

/// Repository trait for Item persistence
///
/// Existence and ownership checks live here so that mutating operations run
/// their read-check-write sequence atomically against the store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Create an item owned by `owner_id`
    async fn create(&self, owner_id: Uuid, input: CreateItem) -> ItemResult<Item>;

    /// Merge the update into an item; only the owner may see or touch it
    async fn update(&self, user_id: Uuid, item_id: Uuid, input: UpdateItem) -> ItemResult<Item>;

    /// Fetch one item with comments, plus booking summaries for the owner
    async fn get_by_id(&self, user_id: Uuid, item_id: Uuid) -> ItemResult<ItemView>;

    /// All items owned by `user_id`, enriched with comments and summaries
    async fn list_by_owner(&self, user_id: Uuid) -> ItemResult<Vec<ItemView>>;

    /// Case-insensitive substring search over available items
    async fn search(&self, text: String) -> ItemResult<Vec<Item>>;

    /// Post a comment after a completed, approved booking
    async fn add_comment(
        &self,
        user_id: Uuid,
        item_id: Uuid,
        input: CreateComment,
    ) -> ItemResult<Comment>;
}

/// Booking facts seeded into the in-memory repository by tests
#[derive(Debug, Clone)]
pub struct SeededBooking {
    pub id: Uuid,
    pub item_id: Uuid,
    pub booker_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub approved: bool,
}

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, String>,
    requests: HashSet<Uuid>,
    items: HashMap<Uuid, Item>,
    comments: Vec<Comment>,
    bookings: Vec<SeededBooking>,
}

/// In-memory repository for tests and local experiments.
///
/// Rows from neighbouring domains (users, requests, bookings) are seeded
/// explicitly since this store has no foreign keys to enforce them.
#[derive(Clone, Default)]
pub struct InMemoryItemRepository {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed_user(&self, id: Uuid, name: &str) {
        self.inner.write().await.users.insert(id, name.to_string());
    }

    pub async fn seed_request(&self, id: Uuid) {
        self.inner.write().await.requests.insert(id);
    }

    pub async fn seed_booking(&self, booking: SeededBooking) {
        self.inner.write().await.bookings.push(booking);
    }

    fn assemble_view(inner: &Inner, item: &Item, caller: Uuid) -> ItemView {
        let mut comments: Vec<Comment> = inner
            .comments
            .iter()
            .filter(|c| c.item_id == item.id)
            .cloned()
            .collect();
        comments.sort_by_key(|c| c.created_at);

        let (last, next) = if caller == item.owner_id {
            let now = Utc::now();
            let approved: Vec<&SeededBooking> = inner
                .bookings
                .iter()
                .filter(|b| b.item_id == item.id && b.approved)
                .collect();

            let last = approved
                .iter()
                .filter(|b| b.start_date <= now)
                .max_by_key(|b| b.start_date)
                .map(|b| summary(b));
            let next = approved
                .iter()
                .filter(|b| b.start_date > now)
                .min_by_key(|b| b.start_date)
                .map(|b| summary(b));
            (last, next)
        } else {
            (None, None)
        };

        ItemView::new(item.clone(), last, next, comments)
    }
}

fn summary(b: &SeededBooking) -> BookingSummary {
    BookingSummary {
        id: b.id,
        start_date: b.start_date,
        end_date: b.end_date,
        booker_id: b.booker_id,
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn create(&self, owner_id: Uuid, input: CreateItem) -> ItemResult<Item> {
        let mut inner = self.inner.write().await;

        if !inner.users.contains_key(&owner_id) {
            return Err(ItemError::UserNotFound(owner_id));
        }
        if let Some(request_id) = input.request_id {
            if !inner.requests.contains(&request_id) {
                return Err(ItemError::RequestNotFound(request_id));
            }
        }

        let now = Utc::now();
        let item = Item {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            available: input.available,
            owner_id,
            request_id: input.request_id,
            created_at: now,
            updated_at: now,
        };

        inner.items.insert(item.id, item.clone());
        tracing::info!(item_id = %item.id, "Created item");
        Ok(item)
    }

    async fn update(&self, user_id: Uuid, item_id: Uuid, input: UpdateItem) -> ItemResult<Item> {
        let mut inner = self.inner.write().await;

        if !inner.users.contains_key(&user_id) {
            return Err(ItemError::UserNotFound(user_id));
        }

        let item = inner
            .items
            .get_mut(&item_id)
            .ok_or(ItemError::ItemNotFound(item_id))?;

        // Non-owners learn nothing about the item's existence
        if item.owner_id != user_id {
            return Err(ItemError::ItemNotFound(item_id));
        }

        item.apply_update(input);
        tracing::info!(item_id = %item_id, "Updated item");
        Ok(item.clone())
    }

    async fn get_by_id(&self, user_id: Uuid, item_id: Uuid) -> ItemResult<ItemView> {
        let inner = self.inner.read().await;

        if !inner.users.contains_key(&user_id) {
            return Err(ItemError::UserNotFound(user_id));
        }

        let item = inner
            .items
            .get(&item_id)
            .ok_or(ItemError::ItemNotFound(item_id))?;

        Ok(Self::assemble_view(&inner, item, user_id))
    }

    async fn list_by_owner(&self, user_id: Uuid) -> ItemResult<Vec<ItemView>> {
        let inner = self.inner.read().await;

        if !inner.users.contains_key(&user_id) {
            return Err(ItemError::UserNotFound(user_id));
        }

        let mut items: Vec<&Item> = inner
            .items
            .values()
            .filter(|i| i.owner_id == user_id)
            .collect();
        items.sort_by_key(|i| i.created_at);

        Ok(items
            .into_iter()
            .map(|item| Self::assemble_view(&inner, item, user_id))
            .collect())
    }

    async fn search(&self, text: String) -> ItemResult<Vec<Item>> {
        let needle = text.to_lowercase();
        let inner = self.inner.read().await;

        let mut items: Vec<Item> = inner
            .items
            .values()
            .filter(|i| {
                i.available
                    && (i.name.to_lowercase().contains(&needle)
                        || i.description.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
        items.sort_by_key(|i| i.created_at);

        Ok(items)
    }

    async fn add_comment(
        &self,
        user_id: Uuid,
        item_id: Uuid,
        input: CreateComment,
    ) -> ItemResult<Comment> {
        let mut inner = self.inner.write().await;

        let author_name = inner
            .users
            .get(&user_id)
            .cloned()
            .ok_or(ItemError::UserNotFound(user_id))?;

        if !inner.items.contains_key(&item_id) {
            return Err(ItemError::ItemNotFound(item_id));
        }

        let now = Utc::now();
        let eligible = inner.bookings.iter().any(|b| {
            b.item_id == item_id && b.booker_id == user_id && b.approved && b.end_date < now
        });
        if !eligible {
            return Err(ItemError::IneligibleForComment(format!(
                "User {} has no completed booking for item {}",
                user_id, item_id
            )));
        }

        let comment = Comment {
            id: Uuid::now_v7(),
            text: input.text,
            item_id,
            author_id: user_id,
            author_name,
            created_at: now,
        };

        inner.comments.push(comment.clone());
        tracing::info!(comment_id = %comment.id, item_id = %item_id, "Added comment");
        Ok(comment)
    }
}
