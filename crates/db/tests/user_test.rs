//! Integration tests for the user and credential repositories.
//!
//! These tests need a running Postgres with migrations applied; run them
//! with `cargo test -- --ignored`.

mod common;

use cashcall_db::entities::sea_orm_active_enums::UserRole;
use cashcall_db::repositories::{
    CreateUserInput, CredentialRepository, UpdateUserInput, UserError, UserRepository,
};
use sea_orm::Database;
use uuid::Uuid;

fn user_input(id: Uuid, email: String, role: UserRole) -> CreateUserInput {
    CreateUserInput {
        id,
        email,
        full_name: "Provisioned User".to_string(),
        role,
        department: Some("Treasury".to_string()),
        position: Some("Analyst".to_string()),
        phone: Some("+1 555 0100".to_string()),
        affiliate_company_id: None,
    }
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_credential_then_profile_share_id() {
    let db = Database::connect(&common::get_database_url())
        .await
        .expect("Failed to connect to database");

    let credentials = CredentialRepository::new(db.clone());
    let users = UserRepository::new(db.clone());
    let email = format!("provision-{}@example.com", Uuid::new_v4());

    let credential = credentials
        .create(&email, "$argon2id$v=19$m=19456,t=2,p=1$dGVzdA$dGVzdA")
        .await
        .expect("Failed to create credential");
    assert!(credentials
        .email_exists(&email)
        .await
        .expect("Query should succeed"));

    let user = users
        .create(user_input(credential.id, email.clone(), UserRole::Finance))
        .await
        .expect("Failed to create user");
    assert_eq!(user.id, credential.id);
    assert!(user.is_active);

    let found = users
        .find_by_email(&email)
        .await
        .expect("Failed to find user")
        .expect("User should exist");
    assert_eq!(found.id, credential.id);
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_create_duplicate_email_rejected() {
    let db = Database::connect(&common::get_database_url())
        .await
        .expect("Failed to connect to database");

    let users = UserRepository::new(db.clone());
    let email = format!("dup-{}@example.com", Uuid::new_v4());

    users
        .create(user_input(Uuid::new_v4(), email.clone(), UserRole::Viewer))
        .await
        .expect("Failed to create user");

    let result = users
        .create(user_input(Uuid::new_v4(), email.clone(), UserRole::Viewer))
        .await;
    assert!(matches!(result, Err(UserError::EmailExists(e)) if e == email));
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_list_filters_by_role() {
    let db = Database::connect(&common::get_database_url())
        .await
        .expect("Failed to connect to database");

    let users = UserRepository::new(db.clone());
    let cfo_id = common::create_test_user(&db, UserRole::Cfo, None).await;
    common::create_test_user(&db, UserRole::Viewer, None).await;

    let cfos = users
        .list(Some(UserRole::Cfo))
        .await
        .expect("Failed to list users");
    assert!(cfos.iter().any(|u| u.id == cfo_id));
    assert!(cfos.iter().all(|u| u.role == UserRole::Cfo));
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_update_allow_listed_fields() {
    let db = Database::connect(&common::get_database_url())
        .await
        .expect("Failed to connect to database");

    let users = UserRepository::new(db.clone());
    let id = common::create_test_user(&db, UserRole::Viewer, None).await;
    let before = users
        .find_by_id(id)
        .await
        .expect("Failed to load user")
        .expect("User should exist");

    let updated = users
        .update(
            id,
            UpdateUserInput {
                role: Some(UserRole::Approver),
                department: Some(Some("Finance Ops".to_string())),
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to update user");

    assert_eq!(updated.role, UserRole::Approver);
    assert_eq!(updated.department.as_deref(), Some("Finance Ops"));
    assert!(!updated.is_active);

    // Fields outside the allow-list stay untouched
    assert_eq!(updated.full_name, before.full_name);
    assert_eq!(updated.email, before.email);
    assert_eq!(updated.affiliate_company_id, before.affiliate_company_id);

    // Empty updates are refused
    let result = users.update(id, UpdateUserInput::default()).await;
    assert!(matches!(result, Err(UserError::EmptyUpdate)));

    // Unknown users are refused
    let missing = Uuid::new_v4();
    let result = users
        .update(
            missing,
            UpdateUserInput {
                is_active: Some(true),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(UserError::NotFound(u)) if u == missing));
}
