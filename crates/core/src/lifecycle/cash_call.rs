//! Cash-call workflow state machine.
//!
//! The original system let any authorized caller write any status value.
//! This implementation hardens that into an explicit transition table:
//! every transition is validated here before the persistence layer is
//! touched, and illegal pairs are rejected.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::lifecycle::error::LifecycleError;
use crate::lifecycle::types::CashCallStatus;

/// Workflow action representing a validated transition with audit data.
#[derive(Debug, Clone, PartialEq)]
pub enum CashCallAction {
    /// Submit a draft cash call for review.
    Submit {
        /// The new status after submission.
        new_status: CashCallStatus,
        /// The user who submitted the cash call.
        submitted_by: Uuid,
        /// When the cash call was submitted.
        submitted_at: DateTime<Utc>,
    },
    /// Approve a cash call under review.
    Approve {
        /// The new status after approval.
        new_status: CashCallStatus,
        /// The user who approved the cash call.
        approved_by: Uuid,
        /// When the cash call was approved.
        approved_at: DateTime<Utc>,
        /// Optional notes from the reviewer.
        notes: Option<String>,
    },
    /// Reject a cash call under review.
    Reject {
        /// The new status after rejection.
        new_status: CashCallStatus,
        /// The user who rejected the cash call.
        rejected_by: Uuid,
        /// The reason for rejection.
        rejection_reason: String,
        /// When the decision was made.
        decided_at: DateTime<Utc>,
    },
    /// Mark an approved cash call as paid.
    MarkPaid {
        /// The new status after settlement.
        new_status: CashCallStatus,
        /// The user who recorded the payment.
        paid_by: Uuid,
        /// When the payment was recorded.
        paid_at: DateTime<Utc>,
    },
}

impl CashCallAction {
    /// Returns the new status resulting from this action.
    #[must_use]
    pub const fn new_status(&self) -> CashCallStatus {
        match self {
            Self::Submit { new_status, .. }
            | Self::Approve { new_status, .. }
            | Self::Reject { new_status, .. }
            | Self::MarkPaid { new_status, .. } => *new_status,
        }
    }

    /// Returns the audit action name written to the activity log.
    #[must_use]
    pub const fn action_name(&self) -> &'static str {
        match self {
            Self::Submit { .. } => "cash_call_submitted",
            Self::Approve { .. } => "cash_call_approved",
            Self::Reject { .. } => "cash_call_rejected",
            Self::MarkPaid { .. } => "cash_call_paid",
        }
    }
}

/// Stateless service validating cash-call workflow transitions.
pub struct CashCallWorkflow;

impl CashCallWorkflow {
    /// Submit a draft cash call for review.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::InvalidTransition` if the cash call is not
    /// in `Draft` status.
    pub fn submit(
        current_status: CashCallStatus,
        submitted_by: Uuid,
    ) -> Result<CashCallAction, LifecycleError> {
        match current_status {
            CashCallStatus::Draft => Ok(CashCallAction::Submit {
                new_status: CashCallStatus::UnderReview,
                submitted_by,
                submitted_at: Utc::now(),
            }),
            _ => Err(LifecycleError::InvalidTransition {
                from: current_status,
                to: CashCallStatus::UnderReview,
            }),
        }
    }

    /// Approve a cash call under review.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::InvalidTransition` if the cash call is not
    /// in `UnderReview` status.
    pub fn approve(
        current_status: CashCallStatus,
        approved_by: Uuid,
        notes: Option<String>,
    ) -> Result<CashCallAction, LifecycleError> {
        match current_status {
            CashCallStatus::UnderReview => Ok(CashCallAction::Approve {
                new_status: CashCallStatus::Approved,
                approved_by,
                approved_at: Utc::now(),
                notes,
            }),
            _ => Err(LifecycleError::InvalidTransition {
                from: current_status,
                to: CashCallStatus::Approved,
            }),
        }
    }

    /// Reject a cash call under review.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::RejectionReasonRequired` if the reason is
    /// empty, or `LifecycleError::InvalidTransition` if the cash call is not
    /// in `UnderReview` status.
    pub fn reject(
        current_status: CashCallStatus,
        rejected_by: Uuid,
        rejection_reason: String,
    ) -> Result<CashCallAction, LifecycleError> {
        if rejection_reason.trim().is_empty() {
            return Err(LifecycleError::RejectionReasonRequired);
        }

        match current_status {
            CashCallStatus::UnderReview => Ok(CashCallAction::Reject {
                new_status: CashCallStatus::Rejected,
                rejected_by,
                rejection_reason,
                decided_at: Utc::now(),
            }),
            _ => Err(LifecycleError::InvalidTransition {
                from: current_status,
                to: CashCallStatus::Rejected,
            }),
        }
    }

    /// Mark an approved cash call as paid.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::InvalidTransition` if the cash call is not
    /// in `Approved` status.
    pub fn mark_paid(
        current_status: CashCallStatus,
        paid_by: Uuid,
    ) -> Result<CashCallAction, LifecycleError> {
        match current_status {
            CashCallStatus::Approved => Ok(CashCallAction::MarkPaid {
                new_status: CashCallStatus::Paid,
                paid_by,
                paid_at: Utc::now(),
            }),
            _ => Err(LifecycleError::InvalidTransition {
                from: current_status,
                to: CashCallStatus::Paid,
            }),
        }
    }

    /// Check if a status transition is in the transition table.
    ///
    /// Valid transitions:
    /// - Draft → UnderReview (submit)
    /// - UnderReview → Approved (approve)
    /// - UnderReview → Rejected (reject)
    /// - Approved → Paid (mark paid)
    #[must_use]
    pub const fn is_valid_transition(from: CashCallStatus, to: CashCallStatus) -> bool {
        matches!(
            (from, to),
            (CashCallStatus::Draft, CashCallStatus::UnderReview)
                | (
                    CashCallStatus::UnderReview,
                    CashCallStatus::Approved | CashCallStatus::Rejected
                )
                | (CashCallStatus::Approved, CashCallStatus::Paid)
        )
    }
}
