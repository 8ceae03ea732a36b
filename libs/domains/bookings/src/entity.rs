//! Sea-ORM entities for the bookings domain.
//!
//! `booking` is owned by this domain. The `user` and `item` modules are
//! narrow read-only projections of tables owned by other domains, declared
//! here so existence checks and view assembly can be queried without a
//! crate dependency cycle.

pub mod booking {
    use sea_orm::ActiveValue::Set;
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    use crate::models::BookingStatus;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "bookings")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub start_date: DateTimeWithTimeZone,
        pub end_date: DateTimeWithTimeZone,
        pub item_id: Uuid,
        pub booker_id: Uuid,
        pub status: BookingStatus,
        pub created_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<(Uuid, crate::models::CreateBooking)> for ActiveModel {
        fn from((booker_id, input): (Uuid, crate::models::CreateBooking)) -> Self {
            ActiveModel {
                id: Set(Uuid::now_v7()),
                start_date: Set(input.start_date.into()),
                end_date: Set(input.end_date.into()),
                item_id: Set(input.item_id),
                booker_id: Set(booker_id),
                status: Set(BookingStatus::Waiting),
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

    impl From<Model> for crate::models::UserRef {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                name: model.name,
            }
        }
    }
}

/// Read-only projection of the items table
pub mod item {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "items")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub name: String,
        pub available: bool,
        pub owner_id: Uuid,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::ItemRef {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                name: model.name,
            }
        }
    }
}
