use domain_requests::{CreateRequest, PgRequestRepository, RequestError, RequestService};
use test_utils::{TestDatabase, TestDataBuilder};
use uuid::Uuid;

struct Fixture {
    alice: Uuid,
    bob: Uuid,
}

async fn seed(db: &TestDatabase, builder: &TestDataBuilder) -> Fixture {
    let alice = db
        .create_test_user(builder.uuid("alice"), "Alice", &builder.email("alice"))
        .await;
    let bob = db
        .create_test_user(builder.uuid("bob"), "Bob", &builder.email("bob"))
        .await;
    Fixture { alice, bob }
}

fn input(text: &str) -> CreateRequest {
    CreateRequest {
        description: text.to_string(),
    }
}

#[tokio::test]
async fn test_create_request_requires_existing_user() {
    let db = TestDatabase::new().await;
    let service = RequestService::new(PgRequestRepository::new(db.connection()));

    let result = service.create_request(Uuid::now_v7(), input("A ladder")).await;

    assert!(matches!(result, Err(RequestError::UserNotFound(_))));
}

#[tokio::test]
async fn test_create_and_fetch_request() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("test_create_and_fetch_request");
    let service = RequestService::new(PgRequestRepository::new(db.connection()));
    let fx = seed(&db, &builder).await;

    let created = service
        .create_request(fx.alice, input("A sturdy ladder"))
        .await
        .unwrap();
    assert_eq!(created.requester_id, fx.alice);

    let fetched = service.get_request(fx.bob, created.id).await.unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.description, "A sturdy ladder");
    assert!(fetched.items.is_empty());
}

#[tokio::test]
async fn test_list_own_requests_newest_first() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("test_list_own_requests");
    let service = RequestService::new(PgRequestRepository::new(db.connection()));
    let fx = seed(&db, &builder).await;

    let first = service.create_request(fx.alice, input("A ladder")).await.unwrap();
    let second = service.create_request(fx.alice, input("A drill")).await.unwrap();
    service.create_request(fx.bob, input("A saw")).await.unwrap();

    let mine = service.get_own_requests(fx.alice).await.unwrap();

    let ids: Vec<Uuid> = mine.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[tokio::test]
async fn test_list_other_requests_excludes_own_and_paginates() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("test_list_other_requests");
    let service = RequestService::new(PgRequestRepository::new(db.connection()));
    let fx = seed(&db, &builder).await;

    service.create_request(fx.alice, input("A ladder")).await.unwrap();
    let second = service.create_request(fx.bob, input("A drill")).await.unwrap();
    let third = service.create_request(fx.bob, input("A saw")).await.unwrap();

    let others = service.get_other_requests(fx.alice, 0, 10).await.unwrap();
    let ids: Vec<Uuid> = others.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![third.id, second.id]);

    let page = service.get_other_requests(fx.alice, 1, 1).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id, second.id);

    let own_view = service.get_other_requests(fx.bob, 0, 10).await.unwrap();
    assert_eq!(own_view.len(), 1);
}

#[tokio::test]
async fn test_views_carry_answer_items() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("test_views_carry_answer_items");
    let service = RequestService::new(PgRequestRepository::new(db.connection()));
    let fx = seed(&db, &builder).await;

    let request = service.create_request(fx.alice, input("A ladder")).await.unwrap();
    db.create_test_answer_item(
        builder.uuid("answer"),
        "Aluminium ladder",
        fx.bob,
        request.id,
    )
    .await;

    let view = service.get_request(fx.bob, request.id).await.unwrap();
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].name, "Aluminium ladder");
    assert_eq!(view.items[0].owner_id, fx.bob);

    let mine = service.get_own_requests(fx.alice).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].items.len(), 1);
}

#[tokio::test]
async fn test_get_request_unknown_id_not_found() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("test_get_request_unknown");
    let service = RequestService::new(PgRequestRepository::new(db.connection()));
    let fx = seed(&db, &builder).await;

    let result = service.get_request(fx.alice, Uuid::now_v7()).await;

    assert!(matches!(result, Err(RequestError::RequestNotFound(_))));
}
