/// Integration tests for credential checking

mod common;

use common::*;
use storefront::web::login::{login, LoginResultStatus};

#[actix_rt::test]
async fn test_valid_credentials_accepted() {
    let db = setup_test_database()
        .await
        .expect("Failed to set up test database");

    let user = create_test_user(&db, "validuser", "ValidPass123!", "user")
        .await
        .expect("Failed to create test user");

    let result = login(&db, "validuser", "ValidPass123!")
        .await
        .expect("Login function failed");

    assert!(
        matches!(result.result, LoginResultStatus::Success),
        "Valid credentials should be accepted"
    );
    assert_eq!(result.user_id, Some(user.id));
}

#[actix_rt::test]
async fn test_wrong_password_rejected() {
    let db = setup_test_database()
        .await
        .expect("Failed to set up test database");

    create_test_user(&db, "validuser", "correct-password", "user")
        .await
        .expect("Failed to create test user");

    let result = login(&db, "validuser", "wrong-password")
        .await
        .expect("Login function failed");

    assert!(matches!(result.result, LoginResultStatus::BadPassword));
    assert!(result.user_id.is_none());
}

#[actix_rt::test]
async fn test_unknown_user_rejected() {
    let db = setup_test_database()
        .await
        .expect("Failed to set up test database");

    let result = login(&db, "nobody", "whatever")
        .await
        .expect("Login function failed");

    assert!(matches!(result.result, LoginResultStatus::BadName));
}

#[actix_rt::test]
async fn test_username_whitespace_trimmed() {
    let db = setup_test_database()
        .await
        .expect("Failed to set up test database");

    create_test_user(&db, "trimmed", "password123", "user")
        .await
        .expect("Failed to create test user");

    let result = login(&db, "  trimmed  ", "password123")
        .await
        .expect("Login function failed");

    assert!(matches!(result.result, LoginResultStatus::Success));
}
