use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use crate::entity;
use crate::error::{RequestError, RequestResult};
use crate::models::{AnswerItem, CreateRequest, ItemRequest, RequestView};
use crate::repository::RequestRepository;

pub struct PgRequestRepository {
    db: DatabaseConnection,
}

impl PgRequestRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn ensure_user<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> RequestResult<()> {
        entity::user::Entity::find_by_id(user_id)
            .one(conn)
            .await?
            .ok_or(RequestError::UserNotFound(user_id))?;
        Ok(())
    }

    /// Answer items for a batch of requests, keyed by request id
    async fn answers_for<C: ConnectionTrait>(
        conn: &C,
        request_ids: &[Uuid],
    ) -> RequestResult<HashMap<Uuid, Vec<AnswerItem>>> {
        let models = entity::item::Entity::find()
            .filter(entity::item::Column::RequestId.is_in(request_ids.iter().copied()))
            .all(conn)
            .await?;

        let mut by_request: HashMap<Uuid, Vec<AnswerItem>> = HashMap::new();
        for model in models {
            if let Some(request_id) = model.request_id {
                by_request
                    .entry(request_id)
                    .or_default()
                    .push(model.into_answer(request_id));
            }
        }
        Ok(by_request)
    }

    async fn assemble(
        &self,
        requests: Vec<entity::request::Model>,
    ) -> RequestResult<Vec<RequestView>> {
        let ids: Vec<Uuid> = requests.iter().map(|r| r.id).collect();
        let mut answers = Self::answers_for(&self.db, &ids).await?;

        Ok(requests
            .into_iter()
            .map(|model| {
                let items = answers.remove(&model.id).unwrap_or_default();
                RequestView::new(model.into(), items)
            })
            .collect())
    }
}

#[async_trait]
impl RequestRepository for PgRequestRepository {
    async fn create(&self, requester_id: Uuid, input: CreateRequest) -> RequestResult<ItemRequest> {
        Self::ensure_user(&self.db, requester_id).await?;

        let active_model: entity::request::ActiveModel = (requester_id, input).into();
        let model = entity::request::Entity::insert(active_model)
            .exec_with_returning(&self.db)
            .await?;

        tracing::info!(request_id = %model.id, requester_id = %requester_id, "Created request");
        Ok(model.into())
    }

    async fn list_mine(&self, requester_id: Uuid) -> RequestResult<Vec<RequestView>> {
        Self::ensure_user(&self.db, requester_id).await?;

        let requests = entity::request::Entity::find()
            .filter(entity::request::Column::RequesterId.eq(requester_id))
            .order_by_desc(entity::request::Column::CreatedAt)
            .all(&self.db)
            .await?;

        self.assemble(requests).await
    }

    async fn list_others(
        &self,
        user_id: Uuid,
        from: u64,
        size: u64,
    ) -> RequestResult<Vec<RequestView>> {
        Self::ensure_user(&self.db, user_id).await?;

        let requests = entity::request::Entity::find()
            .filter(entity::request::Column::RequesterId.ne(user_id))
            .order_by_desc(entity::request::Column::CreatedAt)
            .offset(from)
            .limit(size)
            .all(&self.db)
            .await?;

        self.assemble(requests).await
    }

    async fn get_by_id(&self, user_id: Uuid, request_id: Uuid) -> RequestResult<RequestView> {
        Self::ensure_user(&self.db, user_id).await?;

        let model = entity::request::Entity::find_by_id(request_id)
            .one(&self.db)
            .await?
            .ok_or(RequestError::RequestNotFound(request_id))?;

        let mut answers = Self::answers_for(&self.db, &[request_id]).await?;
        let items = answers.remove(&request_id).unwrap_or_default();

        Ok(RequestView::new(model.into(), items))
    }
}
