/// Integration tests for transaction history pagination

mod common;

use common::*;
use storefront::web::transactions::page_of_transactions;

#[actix_rt::test]
async fn test_first_page_is_newest_and_full() {
    let db = setup_test_database()
        .await
        .expect("Failed to set up test database");

    seed_test_transactions(&db, 25).await.expect("seed failed");

    let (rows, has_next) = page_of_transactions(&db, 1, 10).await.unwrap();
    assert_eq!(rows.len(), 10);
    assert!(has_next);
    assert_eq!(rows[0].description, "txn-000", "newest row comes first");
    assert_eq!(rows[9].description, "txn-009");
}

#[actix_rt::test]
async fn test_tail_page_is_partial() {
    let db = setup_test_database()
        .await
        .expect("Failed to set up test database");

    seed_test_transactions(&db, 25).await.expect("seed failed");

    let (rows, has_next) = page_of_transactions(&db, 3, 10).await.unwrap();
    assert_eq!(rows.len(), 5);
    assert!(!has_next);
    assert_eq!(rows[4].description, "txn-024", "oldest row comes last");
}

#[actix_rt::test]
async fn test_page_past_the_end_is_empty() {
    let db = setup_test_database()
        .await
        .expect("Failed to set up test database");

    seed_test_transactions(&db, 5).await.expect("seed failed");

    let (rows, has_next) = page_of_transactions(&db, 4, 10).await.unwrap();
    assert!(rows.is_empty());
    assert!(!has_next);
}

#[actix_rt::test]
async fn test_huge_page_number_does_not_overflow() {
    let db = setup_test_database()
        .await
        .expect("Failed to set up test database");

    seed_test_transactions(&db, 5).await.expect("seed failed");

    // The page number comes straight from the query string.
    let (rows, has_next) = page_of_transactions(&db, u64::MAX, 10).await.unwrap();
    assert!(rows.is_empty());
    assert!(!has_next);
}

#[actix_rt::test]
async fn test_exact_page_boundary_has_no_phantom_next() {
    let db = setup_test_database()
        .await
        .expect("Failed to set up test database");

    seed_test_transactions(&db, 20).await.expect("seed failed");

    let (rows, has_next) = page_of_transactions(&db, 2, 10).await.unwrap();
    assert_eq!(rows.len(), 10);
    assert!(!has_next);
}
