//! Database seeder for cash-call portal development and testing.
//!
//! Seeds a set of affiliate companies and an admin account (credential
//! plus profile) for local development and testing purposes.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use cashcall_core::auth::hash_password;
use cashcall_db::entities::{
    affiliates, auth_credentials,
    sea_orm_active_enums::{AffiliateStatus, RiskLevel, UserRole},
    users,
};

/// Admin user ID (consistent for all seeds)
const ADMIN_USER_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Admin login for local development
const ADMIN_EMAIL: &str = "admin@cashcall.dev";
/// Admin password for local development
const ADMIN_PASSWORD: &str = "ChangeMe123!";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = cashcall_db::connect(&database_url, 5, 1)
        .await
        .expect("Failed to connect to database");

    println!("Seeding affiliates...");
    seed_affiliates(&db).await;

    println!("Seeding admin user...");
    seed_admin_user(&db).await;

    println!("Seeding complete!");
}

fn admin_user_id() -> Uuid {
    Uuid::parse_str(ADMIN_USER_ID).unwrap()
}

/// Seeds a fixed set of affiliate companies.
async fn seed_affiliates(db: &DatabaseConnection) {
    let affiliates_data = [
        (
            "a0000000-0000-0000-0000-000000000001",
            "Borealis Energy",
            "Borealis Energy Partners Ltd",
            "BOREA",
            RiskLevel::Low,
            "Oslo",
            "Norway",
        ),
        (
            "a0000000-0000-0000-0000-000000000002",
            "Meridian Drilling",
            "Meridian Drilling Services SA",
            "MERID",
            RiskLevel::Medium,
            "Luanda",
            "Angola",
        ),
        (
            "a0000000-0000-0000-0000-000000000003",
            "Southern Cross Petrochem",
            "Southern Cross Petrochemicals Pty",
            "SCROSS",
            RiskLevel::Medium,
            "Perth",
            "Australia",
        ),
        (
            "a0000000-0000-0000-0000-000000000004",
            "Cordillera Exploration",
            "Cordillera Exploration y Produccion SA",
            "CORDEX",
            RiskLevel::High,
            "Bogota",
            "Colombia",
        ),
        (
            "a0000000-0000-0000-0000-000000000005",
            "Jade Basin Operations",
            "Jade Basin Operations Co",
            "JADEB",
            RiskLevel::Low,
            "Kuala Lumpur",
            "Malaysia",
        ),
    ];

    let mut inserted = 0;
    for (id, name, legal_name, code, risk_level, city, country) in affiliates_data {
        let affiliate_id = Uuid::parse_str(id).unwrap();

        // Check if affiliate already exists
        if affiliates::Entity::find_by_id(affiliate_id)
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some()
        {
            continue;
        }

        let affiliate = affiliates::ActiveModel {
            id: Set(affiliate_id),
            name: Set(name.to_string()),
            legal_name: Set(legal_name.to_string()),
            company_code: Set(code.to_string()),
            status: Set(AffiliateStatus::Active),
            risk_level: Set(risk_level),
            financial_rating: Set(None),
            city: Set(Some(city.to_string())),
            country: Set(Some(country.to_string())),
            website: Set(None),
            created_at: Set(Utc::now().into()),
        };

        if let Err(e) = affiliate.insert(db).await {
            eprintln!("Failed to insert affiliate {code}: {e}");
        } else {
            inserted += 1;
        }
    }

    println!("  Inserted {inserted} affiliates");
}

/// Seeds an admin credential and profile for development.
async fn seed_admin_user(db: &DatabaseConnection) {
    // Check if admin already exists
    if users::Entity::find_by_id(admin_user_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Admin user already exists, skipping...");
        return;
    }

    let password_hash = hash_password(ADMIN_PASSWORD).expect("Failed to hash admin password");

    let credential = auth_credentials::ActiveModel {
        id: Set(admin_user_id()),
        email: Set(ADMIN_EMAIL.to_string()),
        password_hash: Set(password_hash),
        created_at: Set(Utc::now().into()),
    };

    if let Err(e) = credential.insert(db).await {
        eprintln!("Failed to insert admin credential: {e}");
        return;
    }

    let user = users::ActiveModel {
        id: Set(admin_user_id()),
        email: Set(ADMIN_EMAIL.to_string()),
        full_name: Set("Portal Admin".to_string()),
        role: Set(UserRole::Admin),
        department: Set(Some("IT".to_string())),
        position: Set(Some("System Administrator".to_string())),
        phone: Set(None),
        affiliate_company_id: Set(None),
        is_active: Set(true),
        created_at: Set(Utc::now().into()),
        updated_at: Set(Utc::now().into()),
    };

    if let Err(e) = user.insert(db).await {
        eprintln!("Failed to insert admin user: {e}");
    } else {
        println!("  Created admin user: {ADMIN_EMAIL}");
    }
}
