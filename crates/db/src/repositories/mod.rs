//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod account_request;
pub mod activity_log;
pub mod affiliate;
pub mod cash_call;
pub mod credential;
pub mod user;

pub use account_request::{
    AccountRequestError, AccountRequestRepository, AccountRequestWithAffiliate,
    CreateAccountRequestInput,
};
pub use activity_log::{ActivityLogFilter, ActivityLogRepository};
pub use affiliate::AffiliateRepository;
pub use cash_call::{CashCallError, CashCallRepository, CreateCashCallInput};
pub use credential::CredentialRepository;
pub use user::{CreateUserInput, UpdateUserInput, UserError, UserRepository};
