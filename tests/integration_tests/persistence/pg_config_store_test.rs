use serde_json::json;

use lexitutor::application::ports::{ConfigKey, ConfigStore};

use crate::test_postgres::TestPostgres;

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn given_missing_key_when_reading_then_none() {
    let test_pg = TestPostgres::new().await;

    let value = test_pg
        .config_store
        .get(ConfigKey::SystemPrompt)
        .await
        .expect("Failed to read config");

    assert_eq!(value, None);
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn given_existing_key_when_putting_if_absent_then_original_value_is_kept() {
    let test_pg = TestPostgres::new().await;

    let first = test_pg
        .config_store
        .put_if_absent(ConfigKey::BlockedKeywords, &json!(["poker"]), "blocked")
        .await
        .unwrap();
    let second = test_pg
        .config_store
        .put_if_absent(ConfigKey::BlockedKeywords, &json!(["chess"]), "blocked")
        .await
        .unwrap();

    assert!(first);
    assert!(!second);
    assert_eq!(
        test_pg
            .config_store
            .get(ConfigKey::BlockedKeywords)
            .await
            .unwrap(),
        Some(json!(["poker"]))
    );
}
