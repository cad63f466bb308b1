//! Integration tests for the account-request repository.
//!
//! These tests need a running Postgres with migrations applied; run them
//! with `cargo test -- --ignored`.

mod common;

use cashcall_core::lifecycle::{AccountRequestReview, LifecycleError};
use cashcall_core::role::UserRole as CoreUserRole;
use cashcall_db::entities::sea_orm_active_enums::{RequestStatus, UserRole};
use cashcall_db::repositories::{
    AccountRequestError, AccountRequestRepository, CreateAccountRequestInput,
};
use sea_orm::Database;
use uuid::Uuid;

fn request_input(email: String, affiliate_company_id: Option<Uuid>) -> CreateAccountRequestInput {
    CreateAccountRequestInput {
        email,
        full_name: "Jordan Doe".to_string(),
        position: "Financial Analyst".to_string(),
        department: "Treasury".to_string(),
        phone: "+1 555 0100".to_string(),
        affiliate_company_id,
        reason_for_access: "Needs to raise funding requests".to_string(),
        manager_name: "Alex Roe".to_string(),
        manager_email: "alex.roe@example.com".to_string(),
    }
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_create_and_duplicate_pending() {
    let db = Database::connect(&common::get_database_url())
        .await
        .expect("Failed to connect to database");

    let repo = AccountRequestRepository::new(db.clone());
    let email = format!("request-{}@example.com", Uuid::new_v4());

    let request = repo
        .create(request_input(email.clone(), None))
        .await
        .expect("Failed to create request");
    assert_eq!(request.status, RequestStatus::Pending);
    assert!(request.reviewed_at.is_none());

    let duplicate = repo.create(request_input(email.clone(), None)).await;
    assert!(matches!(
        duplicate,
        Err(AccountRequestError::DuplicatePending(e)) if e == email
    ));
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_reject_pending_request() {
    let db = Database::connect(&common::get_database_url())
        .await
        .expect("Failed to connect to database");

    let repo = AccountRequestRepository::new(db.clone());
    let email = format!("request-{}@example.com", Uuid::new_v4());
    let request = repo
        .create(request_input(email, None))
        .await
        .expect("Failed to create request");

    let (updated, action) = repo
        .reject(request.id, "Manager approval missing", None)
        .await
        .expect("Failed to reject request");

    assert_eq!(updated.status, RequestStatus::Rejected);
    assert_eq!(
        updated.review_notes.as_deref(),
        Some("Rejected: Manager approval missing")
    );
    assert!(updated.reviewed_at.is_some());
    assert_eq!(action.action_name(), "account_request_rejected");

    // Terminal: a second decision is refused
    let again = repo.reject(request.id, "again", None).await;
    assert!(matches!(
        again,
        Err(AccountRequestError::Lifecycle(
            LifecycleError::RequestNotPending(_)
        ))
    ));
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_request_info_leaves_no_decision_stamp() {
    let db = Database::connect(&common::get_database_url())
        .await
        .expect("Failed to connect to database");

    let repo = AccountRequestRepository::new(db.clone());
    let email = format!("request-{}@example.com", Uuid::new_v4());
    let request = repo
        .create(request_input(email, None))
        .await
        .expect("Failed to create request");

    let (updated, action) = repo
        .request_info(request.id, "Which affiliate do you work for?")
        .await
        .expect("Failed to request info");

    assert_eq!(updated.status, RequestStatus::InReview);
    assert!(updated.reviewed_at.is_none());
    assert_eq!(
        updated.review_notes.as_deref(),
        Some("Additional information requested: Which affiliate do you work for?")
    );
    assert_eq!(action.action_name(), "account_request_info_requested");
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_apply_approval_persists_assigned_role() {
    let db = Database::connect(&common::get_database_url())
        .await
        .expect("Failed to connect to database");

    let repo = AccountRequestRepository::new(db.clone());
    let email = format!("request-{}@example.com", Uuid::new_v4());
    let request = repo
        .create(request_input(email, None))
        .await
        .expect("Failed to create request");

    let action = AccountRequestReview::approve(
        request.status.to_core(),
        CoreUserRole::Affiliate,
        None,
    )
    .expect("Approval should validate");

    let updated = repo
        .apply_review(request.id, &action)
        .await
        .expect("Failed to apply approval");

    assert_eq!(updated.status, RequestStatus::Approved);
    assert_eq!(updated.assigned_role, Some(UserRole::Affiliate));
    assert!(updated.reviewed_at.is_some());
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_list_includes_affiliate_name() {
    let db = Database::connect(&common::get_database_url())
        .await
        .expect("Failed to connect to database");

    let affiliate_id = common::create_test_affiliate(&db).await;
    let repo = AccountRequestRepository::new(db.clone());
    let email = format!("request-{}@example.com", Uuid::new_v4());
    let request = repo
        .create(request_input(email, Some(affiliate_id)))
        .await
        .expect("Failed to create request");

    let listed = repo.list().await.expect("Failed to list requests");
    let row = listed
        .iter()
        .find(|r| r.request.id == request.id)
        .expect("Created request should be listed");
    assert!(row.affiliate_name.is_some());
}
