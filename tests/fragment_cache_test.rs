/// Tests that cached page fragments carry no per-user markup.
///
/// The product and transaction caches are keyed by view arguments only,
/// so anything user-specific in the cached bytes would leak between
/// signed-in users within the TTL.

mod common;

use common::*;
use serial_test::serial;
use std::time::Duration;
use storefront::aspects::cache;
use storefront::web::products::cached_product_rows;
use storefront::web::transactions::cached_transaction_page;

#[actix_rt::test]
#[serial]
async fn test_cached_product_rows_hold_no_user_chrome() {
    cache::clear();
    let db = setup_test_database()
        .await
        .expect("Failed to set up test database");

    create_test_user(&db, "admin", "admin123", "admin")
        .await
        .expect("Failed to create user");
    create_test_product(&db, "Espresso Machine", 249.99, 12)
        .await
        .expect("Failed to create product");

    let html = cached_product_rows(&db, Duration::from_secs(60))
        .await
        .unwrap();

    assert!(html.contains("Espresso Machine"));
    assert!(!html.contains("<nav"), "fragment must not include the nav");
    assert!(!html.contains("admin"), "fragment must not name any user");
    assert!(!html.contains("Log out"));
}

#[actix_rt::test]
#[serial]
async fn test_cached_transaction_page_holds_no_user_chrome() {
    cache::clear();
    let db = setup_test_database()
        .await
        .expect("Failed to set up test database");

    create_test_user(&db, "clerk", "clerk123", "user")
        .await
        .expect("Failed to create user");
    seed_test_transactions(&db, 15).await.expect("seed failed");

    let html = cached_transaction_page(&db, 1, 10, Duration::from_secs(120))
        .await
        .unwrap();

    assert!(html.contains("txn-000"));
    assert!(html.contains("/transactions?page=2"), "pager is cacheable");
    assert!(!html.contains("<nav"), "fragment must not include the nav");
    assert!(!html.contains("clerk"), "fragment must not name any user");
    assert!(!html.contains("Log out"));
}
