use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{RequestError, RequestResult};
use crate::models::{CreateRequest, ItemRequest, RequestView};
use crate::repository::RequestRepository;

/// Service layer for ItemRequest business logic
#[derive(Clone)]
pub struct RequestService<R: RequestRepository> {
    repository: Arc<R>,
}

impl<R: RequestRepository> RequestService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Post a new request with validation
    #[instrument(skip(self, input), fields(requester_id = %requester_id))]
    pub async fn create_request(
        &self,
        requester_id: Uuid,
        input: CreateRequest,
    ) -> RequestResult<ItemRequest> {
        input
            .validate()
            .map_err(|e| RequestError::Validation(e.to_string()))?;

        self.repository.create(requester_id, input).await
    }

    /// The caller's own requests, newest first
    #[instrument(skip(self), fields(requester_id = %requester_id))]
    pub async fn get_own_requests(&self, requester_id: Uuid) -> RequestResult<Vec<RequestView>> {
        self.repository.list_mine(requester_id).await
    }

    /// Browse other users' requests, newest first, paginated
    #[instrument(skip(self), fields(user_id = %user_id, from = from, size = size))]
    pub async fn get_other_requests(
        &self,
        user_id: Uuid,
        from: i64,
        size: i64,
    ) -> RequestResult<Vec<RequestView>> {
        if from < 0 {
            return Err(RequestError::Validation(
                "from must not be negative".to_string(),
            ));
        }
        if size < 1 {
            return Err(RequestError::Validation(
                "size must be at least 1".to_string(),
            ));
        }

        self.repository
            .list_others(user_id, from as u64, size as u64)
            .await
    }

    /// Get a single request with its answer items
    #[instrument(skip(self), fields(user_id = %user_id, request_id = %request_id))]
    pub async fn get_request(&self, user_id: Uuid, request_id: Uuid) -> RequestResult<RequestView> {
        self.repository.get_by_id(user_id, request_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockRequestRepository;

    #[tokio::test]
    async fn test_create_request_rejects_blank_description_before_repository() {
        let mut repo = MockRequestRepository::new();
        repo.expect_create().never();

        let service = RequestService::new(repo);
        let result = service
            .create_request(
                Uuid::now_v7(),
                CreateRequest {
                    description: "   ".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(RequestError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_other_requests_rejects_negative_from() {
        let mut repo = MockRequestRepository::new();
        repo.expect_list_others().never();

        let service = RequestService::new(repo);
        let result = service.get_other_requests(Uuid::now_v7(), -1, 10).await;

        assert!(matches!(result, Err(RequestError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_other_requests_rejects_zero_size() {
        let mut repo = MockRequestRepository::new();
        repo.expect_list_others().never();

        let service = RequestService::new(repo);
        let result = service.get_other_requests(Uuid::now_v7(), 0, 0).await;

        assert!(matches!(result, Err(RequestError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_other_requests_forwards_pagination() {
        let mut repo = MockRequestRepository::new();
        repo.expect_list_others()
            .withf(|_, from, size| *from == 5 && *size == 20)
            .returning(|_, _, _| Ok(vec![]));

        let service = RequestService::new(repo);
        let result = service.get_other_requests(Uuid::now_v7(), 5, 20).await;

        assert!(result.unwrap().is_empty());
    }
}
