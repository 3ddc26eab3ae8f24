//! Integration tests for users and refresh tokens


use openmusic_core::MusicError;
use test_helpers::*;

#[tokio::test]
async fn test_create_and_fetch_user() {
    let test_db = TestDb::new().await;
    let storage = &test_db.storage;

    let id = storage
        .create_user("dicoding", "$2b$12$hash", "Dicoding Indonesia")
        .await
        .unwrap();
    assert!(id.as_str().starts_with("user-"));

    let user = storage.get_user(&id).await.unwrap().unwrap();
    assert_eq!(user.username, "dicoding");
    assert_eq!(user.fullname, "Dicoding Indonesia");

    let (credential_id, hash) = storage.get_credentials("dicoding").await.unwrap().unwrap();
    assert_eq!(credential_id, id);
    assert_eq!(hash, "$2b$12$hash");

    assert!(storage.get_credentials("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_username_is_invariant() {
    let test_db = TestDb::new().await;
    let storage = &test_db.storage;

    storage.create_user("taken", "h", "First").await.unwrap();
    let err = storage.create_user("taken", "h", "Second").await.unwrap_err();

    assert!(matches!(err, MusicError::Invariant(msg) if msg.contains("username")));
}

#[tokio::test]
async fn test_list_users_sorted_by_username() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_test_user(pool, "zed").await;
    create_test_user(pool, "amy").await;

    let users = test_db.storage.get_all_users().await.unwrap();
    let names: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["amy", "zed"]);
}

#[tokio::test]
async fn test_refresh_token_lifecycle() {
    let test_db = TestDb::new().await;
    let storage = &test_db.storage;
    let user = create_test_user(test_db.pool(), "alice").await;

    storage.add_refresh_token("token-1", &user).await.unwrap();
    storage.verify_refresh_token("token-1").await.unwrap();

    assert!(storage.delete_refresh_token("token-1").await.unwrap());
    let err = storage.verify_refresh_token("token-1").await.unwrap_err();
    assert!(err.is_invariant());
    assert!(!storage.delete_refresh_token("token-1").await.unwrap());
}
