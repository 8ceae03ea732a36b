use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Lifecycle status of a booking
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "booking_status")]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum BookingStatus {
    /// Awaiting a decision by the item's owner
    #[default]
    #[sea_orm(string_value = "waiting")]
    Waiting,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Filter for booking listings.
///
/// Parsing is case-sensitive: `FUTURE` is a filter, `future` is a 400.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Deserialize, ToSchema,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum StateFilter {
    #[default]
    All,
    /// Running now: started already, not yet ended
    Current,
    /// Starts after now
    Future,
    /// Ended before now
    Past,
    Waiting,
    Rejected,
}

/// DTO for requesting a booking
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateBooking {
    pub item_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Item facts embedded in a booking view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemRef {
    pub id: Uuid,
    pub name: String,
}

/// User facts embedded in a booking view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserRef {
    pub id: Uuid,
    pub name: String,
}

/// Booking enriched with the item and booker it refers to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookingView {
    pub id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: BookingStatus,
    pub item: ItemRef,
    pub booker: UserRef,
}

/// Query parameters for booking listings
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams, Default)]
pub struct StateQuery {
    /// Raw state filter; parsed case-sensitively, absent means ALL
    pub state: Option<String>,
}

/// Query parameter carrying the owner's decision
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct ApproveQuery {
    pub approved: bool,
}

impl StateFilter {
    /// True when the booking falls inside this filter at instant `now`
    pub fn matches(
        &self,
        status: BookingStatus,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> bool {
        match self {
            StateFilter::All => true,
            StateFilter::Current => start <= now && end > now,
            StateFilter::Future => start > now,
            StateFilter::Past => end < now,
            StateFilter::Waiting => status == BookingStatus::Waiting,
            StateFilter::Rejected => status == BookingStatus::Rejected,
        }
    }
}
