use domain_users::{CreateUser, PgUserRepository, UpdateUser, UserError, UserService};
use test_utils::{TestDatabase, TestDataBuilder};

fn create_input(name: &str, email: &str) -> CreateUser {
    CreateUser {
        name: name.to_string(),
        email: email.to_string(),
    }
}

#[tokio::test]
async fn test_create_and_fetch_user() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("test_create_and_fetch_user");
    let service = UserService::new(PgUserRepository::new(db.connection()));

    let created = service
        .create_user(create_input("Alice", &builder.email("alice")))
        .await
        .unwrap();

    let fetched = service.get_user(created.id).await.unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.email, builder.email("alice"));
}

#[tokio::test]
async fn test_duplicate_email_is_rejected_case_insensitively() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("test_duplicate_email");
    let service = UserService::new(PgUserRepository::new(db.connection()));

    let email = builder.email("alice");
    service
        .create_user(create_input("Alice", &email))
        .await
        .unwrap();

    let result = service
        .create_user(create_input("Impostor", &email.to_uppercase()))
        .await;

    assert!(matches!(result, Err(UserError::AlreadyExists(_))));
}

#[tokio::test]
async fn test_update_merges_and_rechecks_email() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("test_update_merges");
    let service = UserService::new(PgUserRepository::new(db.connection()));

    let alice = service
        .create_user(create_input("Alice", &builder.email("alice")))
        .await
        .unwrap();
    let bob = service
        .create_user(create_input("Bob", &builder.email("bob")))
        .await
        .unwrap();

    // Name-only update keeps the stored email
    let updated = service
        .update_user(
            alice.id,
            UpdateUser {
                name: Some("Alicia".to_string()),
                email: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Alicia");
    assert_eq!(updated.email, alice.email);

    // Claiming bob's email conflicts
    let result = service
        .update_user(
            alice.id,
            UpdateUser {
                name: None,
                email: Some(bob.email.clone()),
            },
        )
        .await;
    assert!(matches!(result, Err(UserError::AlreadyExists(_))));

    // Re-submitting her own email does not
    let result = service
        .update_user(
            alice.id,
            UpdateUser {
                name: None,
                email: Some(alice.email.clone()),
            },
        )
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_delete_user() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("test_delete_user");
    let service = UserService::new(PgUserRepository::new(db.connection()));

    let user = service
        .create_user(create_input("Alice", &builder.email("alice")))
        .await
        .unwrap();

    service.delete_user(user.id).await.unwrap();

    let result = service.get_user(user.id).await;
    assert!(matches!(result, Err(UserError::NotFound(_))));

    let result = service.delete_user(user.id).await;
    assert!(matches!(result, Err(UserError::NotFound(_))));
}

#[tokio::test]
async fn test_list_users_returns_all() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("test_list_users");
    let service = UserService::new(PgUserRepository::new(db.connection()));

    service
        .create_user(create_input("Alice", &builder.email("alice")))
        .await
        .unwrap();
    service
        .create_user(create_input("Bob", &builder.email("bob")))
        .await
        .unwrap();

    let users = service.get_users().await.unwrap();
    assert_eq!(users.len(), 2);
}
