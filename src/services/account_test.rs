use super::*;
use crate::state::test_helpers;

// =============================================================================
// normalize_username
// =============================================================================

#[test]
fn normalize_username_trims_whitespace() {
    assert_eq!(normalize_username("  alice  "), Some("alice".into()));
}

#[test]
fn normalize_username_preserves_case() {
    assert_eq!(normalize_username("Alice"), Some("Alice".into()));
}

#[test]
fn normalize_username_rejects_empty() {
    assert_eq!(normalize_username(""), None);
    assert_eq!(normalize_username("   "), None);
}

#[test]
fn normalize_username_rejects_overlong() {
    assert_eq!(normalize_username(&"a".repeat(51)), None);
    assert!(normalize_username(&"a".repeat(50)).is_some());
}

// =============================================================================
// normalize_email
// =============================================================================

#[test]
fn normalize_email_lowercases_and_trims() {
    assert_eq!(
        normalize_email("  Alice@Example.COM  "),
        Some("alice@example.com".into())
    );
}

#[test]
fn normalize_email_rejects_missing_at() {
    assert_eq!(normalize_email("alice.example.com"), None);
}

#[test]
fn normalize_email_rejects_multiple_ats() {
    assert_eq!(normalize_email("alice@@example.com"), None);
    assert_eq!(normalize_email("a@b@c"), None);
}

#[test]
fn normalize_email_rejects_empty_parts() {
    assert_eq!(normalize_email("@example.com"), None);
    assert_eq!(normalize_email("alice@"), None);
}

#[test]
fn normalize_email_rejects_empty_and_overlong() {
    assert_eq!(normalize_email(""), None);
    let local = "a".repeat(EMAIL_MAX_LEN);
    assert_eq!(normalize_email(&format!("{local}@example.com")), None);
}

// =============================================================================
// hash_password / verify_password
// =============================================================================

#[test]
fn hash_then_verify_round_trip() {
    let hash = hash_password("hunter2").unwrap();
    assert!(verify_password("hunter2", &hash));
}

#[test]
fn verify_rejects_wrong_password() {
    let hash = hash_password("hunter2").unwrap();
    assert!(!verify_password("hunter3", &hash));
}

#[test]
fn verify_rejects_malformed_hash() {
    assert!(!verify_password("hunter2", "not-a-bcrypt-hash"));
}

#[test]
fn hashes_are_salted() {
    let a = hash_password("hunter2").unwrap();
    let b = hash_password("hunter2").unwrap();
    assert_ne!(a, b);
}

// =============================================================================
// create_user
// =============================================================================

#[tokio::test]
async fn create_user_persists_normalized_fields() {
    let state = test_helpers::test_app_state().await;
    let id = create_user(&state.pool, "  Alice  ", "Alice@Example.COM", "hunter2")
        .await
        .unwrap();

    let (username, email): (String, String) =
        sqlx::query_as("SELECT username, email FROM users WHERE id = ?")
            .bind(id)
            .fetch_one(&state.pool)
            .await
            .unwrap();
    assert_eq!(username, "Alice");
    assert_eq!(email, "alice@example.com");
}

#[tokio::test]
async fn create_user_never_stores_the_raw_password() {
    let state = test_helpers::test_app_state().await;
    let id = create_user(&state.pool, "alice", "alice@example.com", "hunter2")
        .await
        .unwrap();

    let hash: String = sqlx::query_scalar("SELECT password_hash FROM users WHERE id = ?")
        .bind(id)
        .fetch_one(&state.pool)
        .await
        .unwrap();
    assert_ne!(hash, "hunter2");
    assert!(verify_password("hunter2", &hash));
}

#[tokio::test]
async fn create_user_rejects_duplicate_username() {
    let state = test_helpers::test_app_state().await;
    create_user(&state.pool, "alice", "alice@example.com", "hunter2")
        .await
        .unwrap();

    let err = create_user(&state.pool, "alice", "other@example.com", "hunter2")
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::Duplicate));
}

#[tokio::test]
async fn create_user_rejects_duplicate_email() {
    let state = test_helpers::test_app_state().await;
    create_user(&state.pool, "alice", "alice@example.com", "hunter2")
        .await
        .unwrap();

    let err = create_user(&state.pool, "bob", "alice@example.com", "hunter2")
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::Duplicate));
}

#[tokio::test]
async fn duplicate_detection_sees_through_email_case() {
    let state = test_helpers::test_app_state().await;
    create_user(&state.pool, "alice", "alice@example.com", "hunter2")
        .await
        .unwrap();

    let err = create_user(&state.pool, "bob", "ALICE@EXAMPLE.COM", "hunter2")
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::Duplicate));
}

#[tokio::test]
async fn create_user_rejects_blank_username() {
    let state = test_helpers::test_app_state().await;
    let err = create_user(&state.pool, "   ", "alice@example.com", "hunter2")
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::InvalidUsername));
}

#[tokio::test]
async fn create_user_rejects_malformed_email() {
    let state = test_helpers::test_app_state().await;
    let err = create_user(&state.pool, "alice", "not-an-email", "hunter2")
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::InvalidEmail));
}

#[tokio::test]
async fn create_user_rejects_empty_password() {
    let state = test_helpers::test_app_state().await;
    let err = create_user(&state.pool, "alice", "alice@example.com", "")
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::EmptyPassword));
}

// =============================================================================
// verify_credentials
// =============================================================================

#[tokio::test]
async fn verify_credentials_accepts_the_right_password() {
    let state = test_helpers::test_app_state().await;
    let id = create_user(&state.pool, "alice", "alice@example.com", "hunter2")
        .await
        .unwrap();

    let user = verify_credentials(&state.pool, "alice", "hunter2")
        .await
        .unwrap()
        .expect("valid credentials should resolve");
    assert_eq!(user.id, id);
    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "alice@example.com");
}

#[tokio::test]
async fn verify_credentials_rejects_a_wrong_password() {
    let state = test_helpers::test_app_state().await;
    create_user(&state.pool, "alice", "alice@example.com", "hunter2")
        .await
        .unwrap();

    let user = verify_credentials(&state.pool, "alice", "hunter3").await.unwrap();
    assert!(user.is_none());
}

#[tokio::test]
async fn verify_credentials_rejects_an_unknown_username() {
    let state = test_helpers::test_app_state().await;
    let user = verify_credentials(&state.pool, "nobody", "hunter2").await.unwrap();
    assert!(user.is_none());
}

#[tokio::test]
async fn verify_credentials_trims_the_submitted_username() {
    let state = test_helpers::test_app_state().await;
    create_user(&state.pool, "alice", "alice@example.com", "hunter2")
        .await
        .unwrap();

    let user = verify_credentials(&state.pool, "  alice  ", "hunter2").await.unwrap();
    assert!(user.is_some());
}
