use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Rejects values that are empty or whitespace-only
pub(crate) fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("non_blank").with_message("must not be blank".into()));
    }
    Ok(())
}

/// Item entity - something an owner offers for sharing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Unique identifier
    pub id: Uuid,
    /// Short display name
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Whether the item can currently be booked
    pub available: bool,
    /// Owning user
    pub owner_id: Uuid,
    /// Request this item was created in response to, if any
    pub request_id: Option<Uuid>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for listing a new item
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateItem {
    #[validate(custom(function = "non_blank"))]
    #[validate(length(max = 255))]
    pub name: String,
    #[validate(custom(function = "non_blank"))]
    pub description: String,
    pub available: bool,
    pub request_id: Option<Uuid>,
}

/// DTO for updating an existing item
///
/// Absent fields keep their stored value. Ownership never changes.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateItem {
    #[validate(custom(function = "non_blank"))]
    pub name: Option<String>,
    #[validate(custom(function = "non_blank"))]
    pub description: Option<String>,
    pub available: Option<bool>,
}

/// Comment left by a booker after a completed booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Comment {
    pub id: Uuid,
    pub text: String,
    pub item_id: Uuid,
    pub author_id: Uuid,
    /// Display name of the author, resolved at read time
    pub author_name: String,
    pub created_at: DateTime<Utc>,
}

/// DTO for posting a comment
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateComment {
    #[validate(custom(function = "non_blank"))]
    pub text: String,
}

/// Condensed booking facts attached to an owner's item view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookingSummary {
    pub id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub booker_id: Uuid,
}

/// Item enriched with comments and, for the owner, booking summaries.
///
/// `last_booking` and `next_booking` are populated only when the caller owns
/// the item; other callers always see both as null.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemView {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: Uuid,
    pub request_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_booking: Option<BookingSummary>,
    pub next_booking: Option<BookingSummary>,
    pub comments: Vec<Comment>,
}

impl ItemView {
    pub fn new(
        item: Item,
        last_booking: Option<BookingSummary>,
        next_booking: Option<BookingSummary>,
        comments: Vec<Comment>,
    ) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            available: item.available,
            owner_id: item.owner_id,
            request_id: item.request_id,
            created_at: item.created_at,
            updated_at: item.updated_at,
            last_booking,
            next_booking,
            comments,
        }
    }
}

/// Query parameters for item search
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams, Default)]
pub struct SearchQuery {
    #[serde(default)]
    pub text: String,
}

impl Item {
    /// Apply updates from the UpdateItem DTO
    pub fn apply_update(&mut self, update: UpdateItem) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(available) = update.available {
            self.available = available;
        }
        self.updated_at = chrono::Utc::now();
    }
}
