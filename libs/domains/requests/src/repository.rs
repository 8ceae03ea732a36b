use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{RequestError, RequestResult};
use crate::models::{AnswerItem, CreateRequest, ItemRequest, RequestView};

/// Repository trait for ItemRequest persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestRepository: Send + Sync {
    /// Create a request authored by `requester_id`
    async fn create(&self, requester_id: Uuid, input: CreateRequest) -> RequestResult<ItemRequest>;

    /// The caller's own requests, newest first, with answer items
    async fn list_mine(&self, requester_id: Uuid) -> RequestResult<Vec<RequestView>>;

    /// Other users' requests, newest first, paginated by offset and size
    async fn list_others(
        &self,
        user_id: Uuid,
        from: u64,
        size: u64,
    ) -> RequestResult<Vec<RequestView>>;

    /// Fetch one request with its answer items; any existing user may view
    async fn get_by_id(&self, user_id: Uuid, request_id: Uuid) -> RequestResult<RequestView>;
}

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, String>,
    requests: HashMap<Uuid, ItemRequest>,
    answers: Vec<AnswerItem>,
}

/// In-memory repository for tests and local experiments.
///
/// Rows from neighbouring domains (users, items) are seeded explicitly
/// since this store has no foreign keys to enforce them.
#[derive(Clone, Default)]
pub struct InMemoryRequestRepository {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed_user(&self, id: Uuid, name: &str) {
        self.inner.write().await.users.insert(id, name.to_string());
    }

    pub async fn seed_answer(&self, item: AnswerItem) {
        self.inner.write().await.answers.push(item);
    }

    fn view(inner: &Inner, request: &ItemRequest) -> RequestView {
        let items = inner
            .answers
            .iter()
            .filter(|a| a.request_id == request.id)
            .cloned()
            .collect();
        RequestView::new(request.clone(), items)
    }

    fn newest_first(mut requests: Vec<ItemRequest>) -> Vec<ItemRequest> {
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        requests
    }
}

#[async_trait]
impl RequestRepository for InMemoryRequestRepository {
    async fn create(&self, requester_id: Uuid, input: CreateRequest) -> RequestResult<ItemRequest> {
        let mut inner = self.inner.write().await;

        if !inner.users.contains_key(&requester_id) {
            return Err(RequestError::UserNotFound(requester_id));
        }

        let request = ItemRequest {
            id: Uuid::now_v7(),
            description: input.description,
            requester_id,
            created_at: chrono::Utc::now(),
        };
        inner.requests.insert(request.id, request.clone());

        tracing::info!(request_id = %request.id, "Created request");
        Ok(request)
    }

    async fn list_mine(&self, requester_id: Uuid) -> RequestResult<Vec<RequestView>> {
        let inner = self.inner.read().await;

        if !inner.users.contains_key(&requester_id) {
            return Err(RequestError::UserNotFound(requester_id));
        }

        let mine: Vec<ItemRequest> = inner
            .requests
            .values()
            .filter(|r| r.requester_id == requester_id)
            .cloned()
            .collect();

        Ok(Self::newest_first(mine)
            .iter()
            .map(|r| Self::view(&inner, r))
            .collect())
    }

    async fn list_others(
        &self,
        user_id: Uuid,
        from: u64,
        size: u64,
    ) -> RequestResult<Vec<RequestView>> {
        let inner = self.inner.read().await;

        if !inner.users.contains_key(&user_id) {
            return Err(RequestError::UserNotFound(user_id));
        }

        let others: Vec<ItemRequest> = inner
            .requests
            .values()
            .filter(|r| r.requester_id != user_id)
            .cloned()
            .collect();

        Ok(Self::newest_first(others)
            .iter()
            .skip(from as usize)
            .take(size as usize)
            .map(|r| Self::view(&inner, r))
            .collect())
    }

    async fn get_by_id(&self, user_id: Uuid, request_id: Uuid) -> RequestResult<RequestView> {
        let inner = self.inner.read().await;

        if !inner.users.contains_key(&user_id) {
            return Err(RequestError::UserNotFound(user_id));
        }

        let request = inner
            .requests
            .get(&request_id)
            .ok_or(RequestError::RequestNotFound(request_id))?;

        Ok(Self::view(&inner, request))
    }
}
