use chrono::{Duration, Utc};
use domain_bookings::{
    BookingError, BookingService, BookingStatus, CreateBooking, PgBookingRepository,
};
use test_utils::{TestDatabase, TestDataBuilder};
use uuid::Uuid;

struct Fixture {
    owner: Uuid,
    booker: Uuid,
    item: Uuid,
}

async fn seed(db: &TestDatabase, builder: &TestDataBuilder) -> Fixture {
    let owner = db
        .create_test_user(builder.uuid("owner"), "Alice", &builder.email("alice"))
        .await;
    let booker = db
        .create_test_user(builder.uuid("booker"), "Bob", &builder.email("bob"))
        .await;
    let item = db
        .create_test_item(builder.uuid("item"), "Drill", "Cordless drill", true, owner)
        .await;
    Fixture {
        owner,
        booker,
        item,
    }
}

fn future_input(item_id: Uuid) -> CreateBooking {
    CreateBooking {
        item_id,
        start_date: Utc::now() + Duration::hours(1),
        end_date: Utc::now() + Duration::hours(2),
    }
}

#[tokio::test]
async fn test_booking_walkthrough() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("test_booking_walkthrough");
    let service = BookingService::new(PgBookingRepository::new(db.connection()));
    let fx = seed(&db, &builder).await;

    let booking = service
        .create_booking(fx.booker, future_input(fx.item))
        .await
        .unwrap();
    assert_eq!(booking.status, BookingStatus::Waiting);
    assert_eq!(booking.item.name, "Drill");
    assert_eq!(booking.booker.name, "Bob");

    let approved = service
        .decide_booking(fx.owner, booking.id, true)
        .await
        .unwrap();
    assert_eq!(approved.status, BookingStatus::Approved);

    let result = service.decide_booking(fx.owner, booking.id, true).await;
    assert!(matches!(result, Err(BookingError::InvalidState(_))));
}

#[tokio::test]
async fn test_self_booking_is_hidden() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("test_self_booking");
    let service = BookingService::new(PgBookingRepository::new(db.connection()));
    let fx = seed(&db, &builder).await;

    let result = service.create_booking(fx.owner, future_input(fx.item)).await;

    assert!(matches!(result, Err(BookingError::ItemNotFound(_))));
}

#[tokio::test]
async fn test_unavailable_item_rejected() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("test_unavailable_item");
    let service = BookingService::new(PgBookingRepository::new(db.connection()));
    let fx = seed(&db, &builder).await;

    let broken = db
        .create_test_item(builder.uuid("broken"), "Broken saw", "Rusty", false, fx.owner)
        .await;

    let result = service.create_booking(fx.booker, future_input(broken)).await;

    assert!(matches!(result, Err(BookingError::Validation(_))));
}

#[tokio::test]
async fn test_rejection_then_filters() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("test_rejection_filters");
    let service = BookingService::new(PgBookingRepository::new(db.connection()));
    let fx = seed(&db, &builder).await;

    let booking = service
        .create_booking(fx.booker, future_input(fx.item))
        .await
        .unwrap();
    service
        .decide_booking(fx.owner, booking.id, false)
        .await
        .unwrap();

    let rejected = service
        .get_bookings_by_booker(fx.booker, Some("REJECTED".to_string()))
        .await
        .unwrap();
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].status, BookingStatus::Rejected);

    let waiting = service
        .get_bookings_by_booker(fx.booker, Some("WAITING".to_string()))
        .await
        .unwrap();
    assert!(waiting.is_empty());
}

#[tokio::test]
async fn test_time_filters_and_ordering() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("test_time_filters");
    let service = BookingService::new(PgBookingRepository::new(db.connection()));
    let fx = seed(&db, &builder).await;

    let past = db
        .create_test_booking(
            builder.uuid("past"),
            fx.item,
            fx.booker,
            Utc::now() - Duration::days(3),
            Utc::now() - Duration::days(2),
            "approved",
        )
        .await;
    let current = db
        .create_test_booking(
            builder.uuid("current"),
            fx.item,
            fx.booker,
            Utc::now() - Duration::hours(1),
            Utc::now() + Duration::hours(1),
            "approved",
        )
        .await;
    let future = service
        .create_booking(fx.booker, future_input(fx.item))
        .await
        .unwrap()
        .id;

    let all = service
        .get_bookings_by_booker(fx.booker, None)
        .await
        .unwrap();
    let ids: Vec<Uuid> = all.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![future, current, past]);

    let current_only = service
        .get_bookings_by_booker(fx.booker, Some("CURRENT".to_string()))
        .await
        .unwrap();
    assert_eq!(current_only.len(), 1);
    assert_eq!(current_only[0].id, current);

    let past_only = service
        .get_bookings_by_owner(fx.owner, Some("PAST".to_string()))
        .await
        .unwrap();
    assert_eq!(past_only.len(), 1);
    assert_eq!(past_only[0].id, past);
}

#[tokio::test]
async fn test_get_booking_visibility() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("test_get_visibility");
    let service = BookingService::new(PgBookingRepository::new(db.connection()));
    let fx = seed(&db, &builder).await;
    let stranger = db
        .create_test_user(builder.uuid("stranger"), "Mallory", &builder.email("mallory"))
        .await;

    let booking = service
        .create_booking(fx.booker, future_input(fx.item))
        .await
        .unwrap();

    assert!(service.get_booking(fx.owner, booking.id).await.is_ok());
    assert!(service.get_booking(fx.booker, booking.id).await.is_ok());

    let result = service.get_booking(stranger, booking.id).await;
    assert!(matches!(result, Err(BookingError::BookingNotFound(_))));
}
