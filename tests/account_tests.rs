mod common;

use common::{transport_for, unreachable_url, MockService};
use serde_json::json;
use sign_translate::account::{AccountClient, Credentials, Registration};
use sign_translate::ClientError;

#[tokio::test]
async fn login_posts_credentials() {
    let mock = MockService::builder()
        .json("/api/auth/login", 200, json!({"token": "t-1"}))
        .start()
        .await;
    let accounts = AccountClient::new(transport_for(&mock.base_url));

    let reply = accounts
        .login(&Credentials {
            email: "ana@example.com".to_string(),
            password: "secret".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(reply, json!({"token": "t-1"}));
    assert_eq!(
        mock.body_json("/api/auth/login"),
        json!({"email": "ana@example.com", "password": "secret"})
    );
}

#[tokio::test]
async fn register_and_profile_are_single_calls() {
    let mock = MockService::builder()
        .json("/api/auth/register", 200, json!({"id": 7}))
        .json("/api/user/profile", 200, json!({"name": "Ana"}))
        .start()
        .await;
    let accounts = AccountClient::new(transport_for(&mock.base_url));

    let registration = Registration {
        name: "Ana".to_string(),
        email: "ana@example.com".to_string(),
        password: "secret".to_string(),
    };
    assert_eq!(accounts.register(&registration).await.unwrap()["id"], 7);
    assert_eq!(accounts.profile().await.unwrap()["name"], "Ana");
    assert_eq!(mock.hits("/api/auth/register"), 1);
    assert_eq!(mock.hits("/api/user/profile"), 1);
}

#[tokio::test]
async fn failures_name_the_operation_and_are_not_retried() {
    let mock = MockService::builder()
        .json("/api/translation-history", 401, json!({"error": "unauthorized"}))
        .start()
        .await;
    let accounts = AccountClient::new(transport_for(&mock.base_url));

    let err = accounts.translation_history().await.unwrap_err();
    match &err {
        ClientError::Request { operation, .. } => {
            assert_eq!(*operation, "Fetching translation history")
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(err.to_string().starts_with("Fetching translation history failed"));
    assert_eq!(mock.hits("/api/translation-history"), 1);

    let offline = AccountClient::new(transport_for(&unreachable_url()));
    assert!(offline.profile().await.is_err());
}
