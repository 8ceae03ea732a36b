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

/// Item request entity - a wish for something not yet offered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemRequest {
    /// Unique identifier
    pub id: Uuid,
    /// What the requester is looking for
    pub description: String,
    /// Requesting user
    pub requester_id: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// DTO for posting a request
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateRequest {
    #[validate(custom(function = "non_blank"))]
    pub description: String,
}

/// Item listed in answer to a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnswerItem {
    pub id: Uuid,
    pub name: String,
    pub owner_id: Uuid,
    pub request_id: Uuid,
}

/// Request enriched with the items offered in answer to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RequestView {
    pub id: Uuid,
    pub description: String,
    pub requester_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub items: Vec<AnswerItem>,
}

impl RequestView {
    pub fn new(request: ItemRequest, items: Vec<AnswerItem>) -> Self {
        Self {
            id: request.id,
            description: request.description,
            requester_id: request.requester_id,
            created_at: request.created_at,
            items,
        }
    }
}

/// Pagination parameters for browsing other users' requests
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct PageQuery {
    /// Offset into the result set, zero-based
    #[serde(default)]
    pub from: i64,
    /// Page size
    #[serde(default = "default_size")]
    pub size: i64,
}

fn default_size() -> i64 {
    10
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            from: 0,
            size: default_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_blank_description_rejected() {
        let input = CreateRequest {
            description: " \t".to_string(),
        };
        assert!(input.validate().is_err());

        let input = CreateRequest {
            description: "A sturdy ladder".to_string(),
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_page_query_defaults() {
        let query: PageQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.from, 0);
        assert_eq!(query.size, 10);
    }
}
