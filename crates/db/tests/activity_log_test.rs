//! Integration tests for the activity-log repository.
//!
//! These tests need a running Postgres with migrations applied; run them
//! with `cargo test -- --ignored`.

mod common;

use cashcall_db::entities::sea_orm_active_enums::UserRole;
use cashcall_db::repositories::{ActivityLogFilter, ActivityLogRepository};
use sea_orm::Database;
use uuid::Uuid;

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_record_and_filter_by_resource() {
    let db = Database::connect(&common::get_database_url())
        .await
        .expect("Failed to connect to database");

    let repo = ActivityLogRepository::new(db.clone());
    let user_id = common::create_test_user(&db, UserRole::Admin, None).await;
    let resource_id = Uuid::new_v4();

    repo.record(
        Some(user_id),
        "cash_call_approved",
        "cash_call",
        resource_id,
        serde_json::json!({"notes": "Within budget"}),
    )
    .await
    .expect("Failed to record entry");

    // Anonymous entry, e.g. a public account-request submission
    repo.record(
        None,
        "account_request_submitted",
        "account_request",
        Uuid::new_v4(),
        serde_json::json!({}),
    )
    .await
    .expect("Failed to record entry");

    let entries = repo
        .list(
            ActivityLogFilter {
                resource_type: Some("cash_call".to_string()),
                resource_id: Some(resource_id),
            },
            50,
        )
        .await
        .expect("Failed to list entries");

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, "cash_call_approved");
    assert_eq!(entries[0].user_id, Some(user_id));
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_list_respects_limit_and_order() {
    let db = Database::connect(&common::get_database_url())
        .await
        .expect("Failed to connect to database");

    let repo = ActivityLogRepository::new(db.clone());
    let resource_id = Uuid::new_v4();

    for i in 0..5 {
        repo.record(
            None,
            "cash_call_submitted",
            "cash_call",
            resource_id,
            serde_json::json!({"seq": i}),
        )
        .await
        .expect("Failed to record entry");
    }

    let entries = repo
        .list(
            ActivityLogFilter {
                resource_type: Some("cash_call".to_string()),
                resource_id: Some(resource_id),
            },
            3,
        )
        .await
        .expect("Failed to list entries");

    assert_eq!(entries.len(), 3);
    // Newest first
    assert!(entries.windows(2).all(|w| w[0].created_at >= w[1].created_at));
}
