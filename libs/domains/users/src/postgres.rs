use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    ExprTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{UserError, UserResult},
    models::{CreateUser, UpdateUser, User},
    repository::UserRepository,
};

pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Case-insensitive email lookup, optionally excluding one user
    async fn email_taken(
        txn: &DatabaseTransaction,
        email: &str,
        exclude: Option<Uuid>,
    ) -> UserResult<bool> {
        let mut query = entity::Entity::find().filter(
            Expr::expr(Func::lower(Expr::col(entity::Column::Email))).eq(email.to_lowercase()),
        );

        if let Some(id) = exclude {
            query = query.filter(entity::Column::Id.ne(id));
        }

        Ok(query.one(txn).await?.is_some())
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, input: CreateUser) -> UserResult<User> {
        let txn = self.db.begin().await?;

        if Self::email_taken(&txn, &input.email, None).await? {
            return Err(UserError::AlreadyExists(input.email));
        }

        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&txn).await?;
        txn.commit().await?;

        tracing::info!(user_id = %model.id, "Created user");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn get_all(&self) -> UserResult<Vec<User>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: Uuid, input: UpdateUser) -> UserResult<User> {
        let txn = self.db.begin().await?;

        let model = entity::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(UserError::NotFound(id))?;

        if let Some(email) = &input.email {
            if Self::email_taken(&txn, email, Some(id)).await? {
                return Err(UserError::AlreadyExists(email.clone()));
            }
        }

        let mut user: User = model.into();
        user.apply_update(input);

        let active_model = entity::ActiveModel {
            id: Set(user.id),
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            created_at: Set(user.created_at.into()),
            updated_at: Set(user.updated_at.into()),
        };

        let updated = active_model.update(&txn).await?;
        txn.commit().await?;

        tracing::info!(user_id = %id, "Updated user");
        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> UserResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(user_id = %id, "Deleted user");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
