//! Database-backed integration tests.
//!
//! These need a PostgreSQL instance with the rental schema loaded.
//! Run with: DATABASE_URL=postgres://... cargo test -- --ignored

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use stayfinder_db::models::{NewProperty, NewUser};
use stayfinder_db::{
    create_pool, DbConfig, DbError, PropertyRepo, PropertySearch, ReservationRepo, SearchQuery,
    UserRepo,
};

async fn test_pool() -> PgPool {
    tracing_subscriber::fmt().with_test_writer().try_init().ok();
    create_pool(&DbConfig::from_env())
        .await
        .expect("pool creation failed")
}

/// Unique-enough email so repeated test runs don't collide on the
/// users.email constraint.
fn fresh_email(tag: &str) -> String {
    format!("{tag}+{}@test.example", chrono::Utc::now().timestamp_micros())
}

fn sample_listing(owner_id: i32) -> NewProperty {
    NewProperty {
        owner_id,
        title: "Harbourview loft".to_string(),
        description: "Two blocks from the seawall".to_string(),
        thumbnail_photo_url: "https://img.test.example/loft-thumb.jpg".to_string(),
        cover_photo_url: "https://img.test.example/loft-cover.jpg".to_string(),
        cost_per_night: 9300,
        parking_spaces: 1,
        number_of_bathrooms: 1,
        number_of_bedrooms: 2,
        country: "Canada".to_string(),
        street: "1200 Cordova St".to_string(),
        city: "Vancouver".to_string(),
        province: "BC".to_string(),
        post_code: "V6C 3T7".to_string(),
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn unfiltered_search_executes() {
    let pool = test_pool().await;
    let repo = PropertyRepo::new(&pool);

    let listings = repo
        .search(&PropertySearch::default(), None)
        .await
        .expect("search failed");

    // Default limit caps the page regardless of table size.
    assert!(listings.len() <= 10);

    // Ascending price order is part of the statement, not the caller's job.
    let prices: Vec<i32> = listings
        .iter()
        .map(|listing| listing.property.cost_per_night)
        .collect();
    let mut sorted = prices.clone();
    sorted.sort();
    assert_eq!(prices, sorted);
}

#[tokio::test]
#[ignore = "requires database"]
async fn email_lookup_is_case_insensitive() {
    let pool = test_pool().await;
    let repo = UserRepo::new(&pool);

    let email = fresh_email("casefold");
    let created = repo
        .create(&NewUser {
            name: "A".to_string(),
            email: email.clone(),
            password: "p".to_string(),
        })
        .await
        .expect("user insert failed");

    assert_eq!(created.name, "A");
    assert_eq!(created.email, email);

    let found = repo
        .find_by_email(&email.to_uppercase())
        .await
        .expect("lookup failed")
        .expect("user not found via uppercased email");
    assert_eq!(found.id, created.id);

    let by_id = repo
        .find_by_id(created.id)
        .await
        .expect("lookup failed")
        .expect("user not found by id");
    assert_eq!(by_id.email, created.email);
}

#[tokio::test]
#[ignore = "requires database"]
async fn duplicate_email_is_a_distinct_error() {
    let pool = test_pool().await;
    let repo = UserRepo::new(&pool);

    let email = fresh_email("dupe");
    let new_user = NewUser {
        name: "First".to_string(),
        email: email.clone(),
        password: "p".to_string(),
    };
    repo.create(&new_user).await.expect("first insert failed");

    let err = repo
        .create(&new_user)
        .await
        .expect_err("second insert should hit the unique constraint");
    assert!(matches!(err, DbError::DuplicateEmail(e) if e == email));
}

#[tokio::test]
#[ignore = "requires database"]
async fn created_listing_is_searchable_by_owner() {
    let pool = test_pool().await;
    let users = UserRepo::new(&pool);
    let properties = PropertyRepo::new(&pool);

    let owner = users
        .create(&NewUser {
            name: "Owner".to_string(),
            email: fresh_email("owner"),
            password: "p".to_string(),
        })
        .await
        .expect("owner insert failed");

    let created = properties
        .create(&sample_listing(owner.id))
        .await
        .expect("property insert failed");
    assert_eq!(created.owner_id, owner.id);
    assert!(created.active);

    let options = PropertySearch {
        owner_id: Some(owner.id),
        ..Default::default()
    };
    let listings = properties.search(&options, None).await.expect("search failed");

    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].property.id, created.id);
    // A fresh listing has no reviews to average.
    assert_eq!(listings[0].average_rating, None);
}

#[tokio::test]
#[ignore = "requires database"]
async fn filtered_search_binds_cleanly() {
    let pool = test_pool().await;
    let repo = PropertyRepo::new(&pool);

    // Exercise every filter at once; asserting execution (not contents)
    // since the seed data varies. Clause shape is covered by unit tests
    // on SearchQuery.
    let options = PropertySearch {
        city: Some("van".to_string()),
        owner_id: Some(1),
        minimum_price_per_night: Some(50),
        maximum_price_per_night: Some(500),
        minimum_rating: Some(4),
    };
    let query = SearchQuery::build(&options, Some(25));
    assert_eq!(query.params().len(), 6);

    repo.search(&options, Some(25)).await.expect("search failed");
}

#[tokio::test]
async fn unreachable_database_surfaces_errors_from_every_query() {
    // Lazy pool: no connection is attempted until a repo runs a query,
    // and nothing listens on port 1. Every operation must come back as
    // Err, never panic.
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(1))
        .connect_lazy("postgres://postgres@127.0.0.1:1/stayfinder")
        .expect("lazy pool construction failed");

    let users = UserRepo::new(&pool);
    let properties = PropertyRepo::new(&pool);
    let reservations = ReservationRepo::new(&pool);

    let err = users
        .find_by_email("a@x.com")
        .await
        .expect_err("lookup should fail without a database");
    assert!(matches!(err, DbError::Sqlx(_)));

    let err = users
        .find_by_id(1)
        .await
        .expect_err("lookup should fail without a database");
    assert!(matches!(err, DbError::Sqlx(_)));

    let err = users
        .create(&NewUser {
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            password: "p".to_string(),
        })
        .await
        .expect_err("insert should fail without a database");
    assert!(matches!(err, DbError::Sqlx(_)));

    let err = properties
        .search(&PropertySearch::default(), None)
        .await
        .expect_err("search should fail without a database");
    assert!(matches!(err, DbError::Sqlx(_)));

    let err = properties
        .create(&sample_listing(1))
        .await
        .expect_err("insert should fail without a database");
    assert!(matches!(err, DbError::Sqlx(_)));

    let err = reservations
        .list_for_guest(1, None)
        .await
        .expect_err("listing should fail without a database");
    assert!(matches!(err, DbError::Sqlx(_)));
}

#[tokio::test]
#[ignore = "requires database"]
async fn absent_user_converts_to_not_found() {
    let pool = test_pool().await;
    let repo = UserRepo::new(&pool);

    // id 0 is below the serial range, so it never matches.
    let result = repo
        .find_by_id(0)
        .await
        .expect("lookup failed")
        .ok_or_else(|| DbError::NotFound {
            resource: "user",
            id: "0".to_string(),
        });

    assert!(matches!(
        result,
        Err(DbError::NotFound { resource: "user", .. })
    ));
}

#[tokio::test]
#[ignore = "requires database"]
async fn guest_with_no_trips_gets_an_empty_list() {
    let pool = test_pool().await;
    let users = UserRepo::new(&pool);
    let reservations = ReservationRepo::new(&pool);

    let guest = users
        .create(&NewUser {
            name: "Guest".to_string(),
            email: fresh_email("guest"),
            password: "p".to_string(),
        })
        .await
        .expect("guest insert failed");

    let trips = reservations
        .list_for_guest(guest.id, None)
        .await
        .expect("listing failed");
    assert!(trips.is_empty());
}
