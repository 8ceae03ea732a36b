//! Sea-ORM entities for the requests domain.
//!
//! `request` is owned by this domain. The `user` and `item` modules are
//! narrow read-only projections of tables owned by other domains, declared
//! here so existence checks and answer lookups can be queried without a
//! crate dependency cycle.

pub mod request {
    use sea_orm::ActiveValue::Set;
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "requests")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub description: String,
        pub requester_id: Uuid,
        pub created_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::ItemRequest {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                description: model.description,
                requester_id: model.requester_id,
                created_at: model.created_at.into(),
            }
        }
    }

    impl From<(Uuid, crate::models::CreateRequest)> for ActiveModel {
        fn from((requester_id, input): (Uuid, crate::models::CreateRequest)) -> Self {
            ActiveModel {
                id: Set(Uuid::now_v7()),
                description: Set(input.description),
                requester_id: Set(requester_id),
                created_at: Set(chrono::Utc::now().into()),
            }
        }
    }
}

/// Read-only projection of the users table
pub mod user {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "users")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub name: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Read-only projection of the items table, scoped to answer lookups
pub mod item {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "items")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub name: String,
        pub owner_id: Uuid,
        pub request_id: Option<Uuid>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl Model {
        /// Convert to an answer item; the caller guarantees `request_id` is set
        pub fn into_answer(self, request_id: Uuid) -> crate::models::AnswerItem {
            crate::models::AnswerItem {
                id: self.id,
                name: self.name,
                owner_id: self.owner_id,
                request_id,
            }
        }
    }
}
