//! Lifecycle-specific error types.

use thiserror::Error;

use crate::lifecycle::types::{CashCallStatus, RequestStatus};

/// Errors raised by the lifecycle state machines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// The requested cash-call transition is not in the transition table.
    #[error("invalid cash call transition: {from} -> {to}")]
    InvalidTransition {
        /// Current status.
        from: CashCallStatus,
        /// Requested status.
        to: CashCallStatus,
    },

    /// A rejection was attempted without a reason.
    #[error("rejection reason is required")]
    RejectionReasonRequired,

    /// An information request was attempted without a message.
    #[error("information request message is required")]
    InfoMessageRequired,

    /// The account request is no longer pending.
    #[error("account request is not pending (current status: {0})")]
    RequestNotPending(RequestStatus),
}
