use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ItemError, ItemResult};
use crate::models::{Comment, CreateComment, CreateItem, Item, ItemView, UpdateItem};
use crate::repository::ItemRepository;

/// Service layer for item business logic
#[derive(Clone)]
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
}

impl<R: ItemRepository> ItemService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(owner_id = %owner_id, name = %input.name))]
    pub async fn create_item(&self, owner_id: Uuid, input: CreateItem) -> ItemResult<Item> {
        input
            .validate()
            .map_err(|e| ItemError::Validation(e.to_string()))?;

        self.repository.create(owner_id, input).await
    }

    #[instrument(skip(self, input), fields(user_id = %user_id, item_id = %item_id))]
    pub async fn update_item(
        &self,
        user_id: Uuid,
        item_id: Uuid,
        input: UpdateItem,
    ) -> ItemResult<Item> {
        input
            .validate()
            .map_err(|e| ItemError::Validation(e.to_string()))?;

        self.repository.update(user_id, item_id, input).await
    }

    #[instrument(skip(self), fields(user_id = %user_id, item_id = %item_id))]
    pub async fn get_item(&self, user_id: Uuid, item_id: Uuid) -> ItemResult<ItemView> {
        self.repository.get_by_id(user_id, item_id).await
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn get_own_items(&self, user_id: Uuid) -> ItemResult<Vec<ItemView>> {
        self.repository.list_by_owner(user_id).await
    }

    /// Blank search text short-circuits to an empty result without touching
    /// the store.
    #[instrument(skip(self), fields(text = %text))]
    pub async fn search_items(&self, text: String) -> ItemResult<Vec<Item>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        self.repository.search(text).await
    }

    #[instrument(skip(self, input), fields(user_id = %user_id, item_id = %item_id))]
    pub async fn add_comment(
        &self,
        user_id: Uuid,
        item_id: Uuid,
        input: CreateComment,
    ) -> ItemResult<Comment> {
        input
            .validate()
            .map_err(|e| ItemError::Validation(e.to_string()))?;

        self.repository.add_comment(user_id, item_id, input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockItemRepository;

    fn create_input() -> CreateItem {
        CreateItem {
            name: "Drill".to_string(),
            description: "Cordless drill".to_string(),
            available: true,
            request_id: None,
        }
    }

    #[tokio::test]
    async fn test_create_item_rejects_blank_name() {
        let mut mock = MockItemRepository::new();
        mock.expect_create().never();

        let service = ItemService::new(mock);
        let result = service
            .create_item(
                Uuid::now_v7(),
                CreateItem {
                    name: "  ".to_string(),
                    ..create_input()
                },
            )
            .await;

        assert!(matches!(result, Err(ItemError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_item_delegates_to_repository() {
        let owner_id = Uuid::now_v7();
        let mut mock = MockItemRepository::new();
        mock.expect_create()
            .withf(move |id, input| *id == owner_id && input.name == "Drill")
            .returning(|owner_id, input| {
                let now = chrono::Utc::now();
                Ok(Item {
                    id: Uuid::now_v7(),
                    name: input.name,
                    description: input.description,
                    available: input.available,
                    owner_id,
                    request_id: input.request_id,
                    created_at: now,
                    updated_at: now,
                })
            });

        let service = ItemService::new(mock);
        let item = service.create_item(owner_id, create_input()).await.unwrap();

        assert_eq!(item.owner_id, owner_id);
    }

    #[tokio::test]
    async fn test_search_blank_text_skips_repository() {
        let mut mock = MockItemRepository::new();
        mock.expect_search().never();

        let service = ItemService::new(mock);
        let results = service.search_items("   ".to_string()).await.unwrap();

        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_add_comment_rejects_blank_text() {
        let mut mock = MockItemRepository::new();
        mock.expect_add_comment().never();

        let service = ItemService::new(mock);
        let result = service
            .add_comment(
                Uuid::now_v7(),
                Uuid::now_v7(),
                CreateComment {
                    text: "".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(ItemError::Validation(_))));
    }
}
