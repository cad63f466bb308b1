//! Lifecycle state machines for cash calls and account requests.
//!
//! # Modules
//!
//! - `types` - Status enums (`CashCallStatus`, `RequestStatus`)
//! - `error` - Lifecycle-specific error types
//! - `cash_call` - Cash-call transition logic
//! - `account_request` - Account-request review logic

pub mod account_request;
pub mod cash_call;
pub mod error;
pub mod types;

#[cfg(test)]
mod cash_call_props;

pub use account_request::{AccountRequestReview, ReviewAction};
pub use cash_call::{CashCallAction, CashCallWorkflow};
pub use error::LifecycleError;
pub use types::{CashCallStatus, RequestStatus};
