use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Rejects values that are empty or whitespace-only
pub(crate) fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("non_blank").with_message("must not be blank".into()));
    }
    Ok(())
}

/// User entity - a registered account that can own and book items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Email address, unique across all users
    pub email: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for registering a new user
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(custom(function = "non_blank"))]
    #[validate(length(max = 255))]
    pub name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
}

/// DTO for updating an existing user
///
/// Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(custom(function = "non_blank"))]
    pub name: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
}

impl User {
    /// Apply updates from the UpdateUser DTO
    pub fn apply_update(&mut self, update: UpdateUser) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        self.updated_at = chrono::Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_valid() {
        let input = CreateUser {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_create_user_blank_name_rejected() {
        let input = CreateUser {
            name: "   ".to_string(),
            email: "alice@example.com".to_string(),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_create_user_malformed_email_rejected() {
        let input = CreateUser {
            name: "Alice".to_string(),
            email: "not-an-email".to_string(),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_update_user_empty_is_valid() {
        assert!(UpdateUser::default().validate().is_ok());
    }

    #[test]
    fn test_update_user_malformed_email_rejected() {
        let update = UpdateUser {
            name: None,
            email: Some("nope".to_string()),
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_apply_update_merges_present_fields() {
        let mut user = User {
            id: Uuid::now_v7(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let before = user.updated_at;

        user.apply_update(UpdateUser {
            name: Some("Alicia".to_string()),
            email: None,
        });

        assert_eq!(user.name, "Alicia");
        assert_eq!(user.email, "alice@example.com");
        assert!(user.updated_at >= before);
    }
}
