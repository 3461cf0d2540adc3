/// Integration tests for the order detail lookup

mod common;

use common::*;
use storefront::web::orders::find_order;

#[actix_rt::test]
async fn test_existing_order_found() {
    let db = setup_test_database()
        .await
        .expect("Failed to set up test database");

    let order = create_test_order(&db, "Alice Novak", 258.49, "shipped")
        .await
        .expect("Failed to create order");

    let found = find_order(&db, order.id)
        .await
        .unwrap()
        .expect("order should exist");
    assert_eq!(found.customer_name, "Alice Novak");
    assert_eq!(found.total_amount, 258.49);
    assert_eq!(found.status, "shipped");
}

#[actix_rt::test]
async fn test_missing_order_returns_none() {
    let db = setup_test_database()
        .await
        .expect("Failed to set up test database");

    assert!(find_order(&db, 9999).await.unwrap().is_none());
}
