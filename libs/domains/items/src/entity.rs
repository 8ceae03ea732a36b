//! Sea-ORM entities for the items domain.
//!
//! `item` and `comment` are owned by this domain. The `user`, `request` and
//! `booking` modules are narrow read-only projections of tables owned by
//! other domains, declared here so existence checks, author names and
//! booking summaries can be queried without a crate dependency cycle.

pub mod item {
    use sea_orm::ActiveValue::Set;
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "items")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub name: String,
        pub description: String,
        pub available: bool,
        pub owner_id: Uuid,
        pub request_id: Option<Uuid>,
        pub created_at: DateTimeWithTimeZone,
        pub updated_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::Item {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                name: model.name,
                description: model.description,
                available: model.available,
                owner_id: model.owner_id,
                request_id: model.request_id,
                created_at: model.created_at.into(),
                updated_at: model.updated_at.into(),
            }
        }
    }

    impl From<(Uuid, crate::models::CreateItem)> for ActiveModel {
        fn from((owner_id, input): (Uuid, crate::models::CreateItem)) -> Self {
            ActiveModel {
                id: Set(Uuid::now_v7()),
                name: Set(input.name),
                description: Set(input.description),
                available: Set(input.available),
                owner_id: Set(owner_id),
                request_id: Set(input.request_id),
                created_at: Set(chrono::Utc::now().into()),
                updated_at: Set(chrono::Utc::now().into()),
            }
        }
    }
}

pub mod comment {
    use sea_orm::ActiveValue::Set;
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "comments")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub text: String,
        pub item_id: Uuid,
        pub author_id: Uuid,
        pub created_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl Model {
        pub fn into_comment(self, author_name: String) -> crate::models::Comment {
            crate::models::Comment {
                id: self.id,
                text: self.text,
                item_id: self.item_id,
                author_id: self.author_id,
                author_name,
                created_at: self.created_at.into(),
            }
        }
    }

    impl From<(Uuid, Uuid, crate::models::CreateComment)> for ActiveModel {
        fn from((author_id, item_id, input): (Uuid, Uuid, crate::models::CreateComment)) -> Self {
            ActiveModel {
                id: Set(Uuid::now_v7()),
                text: Set(input.text),
                item_id: Set(item_id),
                author_id: Set(author_id),
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

/// Read-only projection of the requests table
pub mod request {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "requests")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Read-only projection of the bookings table
pub mod booking {
    use sea_orm::entity::prelude::*;

    #[derive(
        Debug, Clone, Copy, PartialEq, Eq, DeriveActiveEnum, EnumIter,
    )]
    #[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "booking_status")]
    pub enum BookingStatus {
        #[sea_orm(string_value = "waiting")]
        Waiting,
        #[sea_orm(string_value = "approved")]
        Approved,
        #[sea_orm(string_value = "rejected")]
        Rejected,
    }

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "bookings")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub start_date: DateTimeWithTimeZone,
        pub end_date: DateTimeWithTimeZone,
        pub item_id: Uuid,
        pub booker_id: Uuid,
        pub status: BookingStatus,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::BookingSummary {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                start_date: model.start_date.into(),
                end_date: model.end_date.into(),
                booker_id: model.booker_id,
            }
        }
    }
}
