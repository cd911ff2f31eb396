//! Health check and company list tests.

use library_tests::create_test_client;

#[tokio::test]
async fn test_health_check() {
    let client = create_test_client().expect("Failed to create client");

    let health = client.health_check().await.expect("Health check failed");

    assert_eq!(health.status, "healthy");
    assert!(!health.version.is_empty());
    assert!(health.storage == "postgres" || health.storage == "memory");
}

#[tokio::test]
async fn test_list_companies() {
    let client = create_test_client().expect("Failed to create client");

    let response = client
        .list_companies()
        .await
        .expect("Failed to list companies");

    assert!(!response.companies.is_empty());
    assert!(response.companies.iter().all(|c| !c.symbol.is_empty()));
}
