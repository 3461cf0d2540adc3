/// Tests for the access-control aspect's allow-list decision

use storefront::aspects::secure::{check_role, Denial};

#[test]
fn test_guest_denied_as_unauthenticated() {
    assert_eq!(check_role(None, &["admin"]), Err(Denial::Unauthenticated));
}

#[test]
fn test_wrong_role_denied_as_forbidden() {
    assert_eq!(check_role(Some("user"), &["admin"]), Err(Denial::Forbidden));
    assert_eq!(
        check_role(Some("user"), &["admin", "editor"]),
        Err(Denial::Forbidden)
    );
}

#[test]
fn test_matching_role_allowed() {
    assert_eq!(check_role(Some("admin"), &["admin"]), Ok(()));
    assert_eq!(check_role(Some("editor"), &["admin", "editor"]), Ok(()));
}

#[test]
fn test_empty_allow_list_admits_any_authenticated_user() {
    assert_eq!(check_role(Some("user"), &[]), Ok(()));
    assert_eq!(check_role(Some("admin"), &[]), Ok(()));
}
