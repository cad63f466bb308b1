//! `SeaORM` entity definitions.

pub mod account_requests;
pub mod activity_logs;
pub mod affiliates;
pub mod auth_credentials;
pub mod cash_calls;
pub mod sea_orm_active_enums;
pub mod users;
