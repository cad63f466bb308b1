//! Integration tests for the cash-call repository.
//!
//! These tests need a running Postgres with migrations applied; run them
//! with `cargo test -- --ignored`.

mod common;

use cashcall_core::access::AccessScope;
use cashcall_core::lifecycle::LifecycleError;
use cashcall_db::entities::sea_orm_active_enums::{CallPriority, CashCallStatus, UserRole};
use cashcall_db::repositories::{CashCallError, CashCallRepository, CreateCashCallInput};
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

fn call_input(affiliate_id: Uuid, created_by: Uuid) -> CreateCashCallInput {
    CreateCashCallInput {
        call_number: format!("CC-{}", Uuid::new_v4()),
        affiliate_id,
        amount_requested: dec!(125000.00),
        currency: "USD".to_string(),
        exchange_rate: dec!(1),
        priority: CallPriority::Medium,
        description: Some("Q3 drilling program funding".to_string()),
        justification: Some("Approved work program item 4".to_string()),
        attachments: serde_json::json!([]),
        created_by,
    }
}

async fn connect() -> DatabaseConnection {
    Database::connect(&common::get_database_url())
        .await
        .expect("Failed to connect to database")
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_create_and_find() {
    let db = connect().await;
    let affiliate_id = common::create_test_affiliate(&db).await;
    let user_id = common::create_test_user(&db, UserRole::Affiliate, Some(affiliate_id)).await;

    let repo = CashCallRepository::new(db.clone());
    let call = repo
        .create(call_input(affiliate_id, user_id))
        .await
        .expect("Failed to create cash call");

    assert_eq!(call.status, CashCallStatus::Draft);
    assert_eq!(call.amount_requested, dec!(125000.00));
    assert!(call.approved_at.is_none());

    let found = repo
        .find_by_id(call.id)
        .await
        .expect("Failed to find cash call")
        .expect("Cash call should exist");
    assert_eq!(found.call_number, call.call_number);
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_duplicate_call_number() {
    let db = connect().await;
    let affiliate_id = common::create_test_affiliate(&db).await;
    let user_id = common::create_test_user(&db, UserRole::Affiliate, Some(affiliate_id)).await;

    let repo = CashCallRepository::new(db.clone());
    let input = call_input(affiliate_id, user_id);
    let call_number = input.call_number.clone();
    repo.create(input)
        .await
        .expect("Failed to create cash call");

    let mut duplicate = call_input(affiliate_id, user_id);
    duplicate.call_number.clone_from(&call_number);
    let result = repo.create(duplicate).await;
    assert!(matches!(
        result,
        Err(CashCallError::DuplicateCallNumber(n)) if n == call_number
    ));
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_full_workflow_to_paid() {
    let db = connect().await;
    let affiliate_id = common::create_test_affiliate(&db).await;
    let creator = common::create_test_user(&db, UserRole::Affiliate, Some(affiliate_id)).await;
    let reviewer = common::create_test_user(&db, UserRole::Finance, None).await;

    let repo = CashCallRepository::new(db.clone());
    let call = repo
        .create(call_input(affiliate_id, creator))
        .await
        .expect("Failed to create cash call");

    let (call, action) = repo
        .submit(call.id, creator)
        .await
        .expect("Failed to submit");
    assert_eq!(call.status, CashCallStatus::UnderReview);
    assert_eq!(action.action_name(), "cash_call_submitted");

    let (call, _) = repo
        .approve(call.id, reviewer, Some("Within budget".to_string()))
        .await
        .expect("Failed to approve");
    assert_eq!(call.status, CashCallStatus::Approved);
    assert!(call.approved_at.is_some());

    let (call, action) = repo
        .mark_paid(call.id, reviewer)
        .await
        .expect("Failed to mark paid");
    assert_eq!(call.status, CashCallStatus::Paid);
    assert_eq!(action.action_name(), "cash_call_paid");
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_illegal_transitions_rejected() {
    let db = connect().await;
    let affiliate_id = common::create_test_affiliate(&db).await;
    let creator = common::create_test_user(&db, UserRole::Affiliate, Some(affiliate_id)).await;
    let reviewer = common::create_test_user(&db, UserRole::Finance, None).await;

    let repo = CashCallRepository::new(db.clone());
    let call = repo
        .create(call_input(affiliate_id, creator))
        .await
        .expect("Failed to create cash call");

    // Draft cannot be approved or paid directly
    let result = repo.approve(call.id, reviewer, None).await;
    assert!(matches!(
        result,
        Err(CashCallError::Lifecycle(
            LifecycleError::InvalidTransition { .. }
        ))
    ));
    let result = repo.mark_paid(call.id, reviewer).await;
    assert!(matches!(
        result,
        Err(CashCallError::Lifecycle(
            LifecycleError::InvalidTransition { .. }
        ))
    ));

    // Rejection needs a reason
    let (call, _) = repo
        .submit(call.id, creator)
        .await
        .expect("Failed to submit");
    let result = repo.reject(call.id, reviewer, "  ".to_string()).await;
    assert!(matches!(
        result,
        Err(CashCallError::Lifecycle(
            LifecycleError::RejectionReasonRequired
        ))
    ));

    // Rejection is terminal
    let (call, _) = repo
        .reject(call.id, reviewer, "Budget exceeded".to_string())
        .await
        .expect("Failed to reject");
    assert_eq!(call.status, CashCallStatus::Rejected);
    let result = repo.submit(call.id, creator).await;
    assert!(matches!(result, Err(CashCallError::Lifecycle(_))));
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_list_scoped() {
    let db = connect().await;
    let affiliate_id = common::create_test_affiliate(&db).await;
    let other_affiliate_id = common::create_test_affiliate(&db).await;
    let creator = common::create_test_user(&db, UserRole::Affiliate, Some(affiliate_id)).await;
    let colleague = common::create_test_user(&db, UserRole::Affiliate, Some(affiliate_id)).await;
    let outsider = common::create_test_user(&db, UserRole::Affiliate, None).await;

    let repo = CashCallRepository::new(db.clone());
    let mine = repo
        .create(call_input(affiliate_id, creator))
        .await
        .expect("Failed to create cash call");
    let elsewhere = repo
        .create(call_input(other_affiliate_id, colleague))
        .await
        .expect("Failed to create cash call");

    // Mine: only calls created by the caller
    let listed = repo
        .list_scoped(creator, AccessScope::Mine)
        .await
        .expect("Failed to list");
    assert!(listed.iter().any(|c| c.id == mine.id));
    assert!(!listed.iter().any(|c| c.id == elsewhere.id));

    // Affiliate: calls for the caller's company, regardless of creator
    let listed = repo
        .list_scoped(colleague, AccessScope::Affiliate)
        .await
        .expect("Failed to list");
    assert!(listed.iter().any(|c| c.id == mine.id));
    assert!(!listed.iter().any(|c| c.id == elsewhere.id));

    // Affiliate scope without a company yields nothing
    let listed = repo
        .list_scoped(outsider, AccessScope::Affiliate)
        .await
        .expect("Failed to list");
    assert!(listed.is_empty());

    // All: everything
    let listed = repo
        .list_scoped(outsider, AccessScope::All)
        .await
        .expect("Failed to list");
    assert!(listed.iter().any(|c| c.id == mine.id));
    assert!(listed.iter().any(|c| c.id == elsewhere.id));
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_assign_validates_assignee() {
    let db = connect().await;
    let affiliate_id = common::create_test_affiliate(&db).await;
    let creator = common::create_test_user(&db, UserRole::Affiliate, Some(affiliate_id)).await;
    let reviewer = common::create_test_user(&db, UserRole::Approver, None).await;

    let repo = CashCallRepository::new(db.clone());
    let call = repo
        .create(call_input(affiliate_id, creator))
        .await
        .expect("Failed to create cash call");

    // Unknown assignee
    let missing = Uuid::new_v4();
    let result = repo.assign(call.id, Some(missing)).await;
    assert!(matches!(result, Err(CashCallError::AssigneeNotFound(id)) if id == missing));

    // Valid assignee
    let updated = repo
        .assign(call.id, Some(reviewer))
        .await
        .expect("Failed to assign");
    assert_eq!(updated.assignee_user_id, Some(reviewer));

    // Deactivated assignee
    let inactive = common::create_test_user(&db, UserRole::Approver, None).await;
    let mut active: cashcall_db::entities::users::ActiveModel =
        cashcall_db::entities::users::Entity::find_by_id(inactive)
            .one(&db)
            .await
            .expect("Failed to load user")
            .expect("User should exist")
            .into();
    active.is_active = Set(false);
    active.update(&db).await.expect("Failed to deactivate");

    let result = repo.assign(call.id, Some(inactive)).await;
    assert!(matches!(result, Err(CashCallError::AssigneeInactive(id)) if id == inactive));

    // Clearing the assignee
    let updated = repo
        .assign(call.id, None)
        .await
        .expect("Failed to clear assignee");
    assert_eq!(updated.assignee_user_id, None);
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_assign_refused_on_closed_call() {
    let db = connect().await;
    let affiliate_id = common::create_test_affiliate(&db).await;
    let creator = common::create_test_user(&db, UserRole::Affiliate, Some(affiliate_id)).await;
    let reviewer = common::create_test_user(&db, UserRole::Approver, None).await;

    let repo = CashCallRepository::new(db.clone());
    let call = repo
        .create(call_input(affiliate_id, creator))
        .await
        .expect("Failed to create cash call");
    repo.submit(call.id, creator).await.expect("Failed to submit");
    repo.reject(call.id, reviewer, "Out of budget".to_string())
        .await
        .expect("Failed to reject");

    let result = repo.assign(call.id, Some(reviewer)).await;
    assert!(matches!(result, Err(CashCallError::Closed(id)) if id == call.id));
}
