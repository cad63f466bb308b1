//! Account-request review logic.
//!
//! Account requests only ever leave `Pending` through one of the three
//! admin actions here. Approval is special: it is performed as part of user
//! provisioning and makes the request terminal.

use chrono::{DateTime, Utc};

use crate::lifecycle::error::LifecycleError;
use crate::lifecycle::types::RequestStatus;
use crate::role::UserRole;

/// A validated review decision with the fields to persist.
#[derive(Debug, Clone)]
pub enum ReviewAction {
    /// Reject the request (terminal decision).
    Reject {
        /// The new status after rejection.
        new_status: RequestStatus,
        /// Notes recorded on the request.
        review_notes: String,
        /// Decision timestamp.
        reviewed_at: DateTime<Utc>,
    },
    /// Ask the applicant for more information (not a terminal decision,
    /// so no `reviewed_at` stamp).
    RequestInfo {
        /// The new status while awaiting information.
        new_status: RequestStatus,
        /// The information-request note recorded on the request.
        review_notes: String,
    },
    /// Approve the request as part of user provisioning.
    Approve {
        /// The new status after approval.
        new_status: RequestStatus,
        /// The role assigned to the provisioned user.
        assigned_role: UserRole,
        /// Notes recorded on the request.
        review_notes: String,
        /// Decision timestamp.
        reviewed_at: DateTime<Utc>,
    },
}

impl ReviewAction {
    /// Returns the new status resulting from this action.
    #[must_use]
    pub const fn new_status(&self) -> RequestStatus {
        match self {
            Self::Reject { new_status, .. }
            | Self::RequestInfo { new_status, .. }
            | Self::Approve { new_status, .. } => *new_status,
        }
    }

    /// Returns the audit action name written to the activity log.
    #[must_use]
    pub const fn action_name(&self) -> &'static str {
        match self {
            Self::Reject { .. } => "account_request_rejected",
            Self::RequestInfo { .. } => "account_request_info_requested",
            Self::Approve { .. } => "account_request_approved",
        }
    }
}

/// Stateless service validating account-request review decisions.
pub struct AccountRequestReview;

impl AccountRequestReview {
    /// Reject a pending request.
    ///
    /// The review notes default to a note composed from the reason when no
    /// explicit notes are supplied.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::RejectionReasonRequired` if the reason is
    /// empty, or `LifecycleError::RequestNotPending` if the request already
    /// left `Pending`.
    pub fn reject(
        current_status: RequestStatus,
        reason: &str,
        notes: Option<String>,
    ) -> Result<ReviewAction, LifecycleError> {
        if reason.trim().is_empty() {
            return Err(LifecycleError::RejectionReasonRequired);
        }
        if current_status != RequestStatus::Pending {
            return Err(LifecycleError::RequestNotPending(current_status));
        }

        let review_notes = notes
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| format!("Rejected: {reason}"));

        Ok(ReviewAction::Reject {
            new_status: RequestStatus::Rejected,
            review_notes,
            reviewed_at: Utc::now(),
        })
    }

    /// Ask the applicant for additional information.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::InfoMessageRequired` if the message is
    /// empty, or `LifecycleError::RequestNotPending` if the request already
    /// left `Pending`.
    pub fn request_info(
        current_status: RequestStatus,
        message: &str,
    ) -> Result<ReviewAction, LifecycleError> {
        if message.trim().is_empty() {
            return Err(LifecycleError::InfoMessageRequired);
        }
        if current_status != RequestStatus::Pending {
            return Err(LifecycleError::RequestNotPending(current_status));
        }

        Ok(ReviewAction::RequestInfo {
            new_status: RequestStatus::InReview,
            review_notes: format!("Additional information requested: {message}"),
        })
    }

    /// Approve a pending request for user provisioning.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::RequestNotPending` if the request already
    /// left `Pending`.
    pub fn approve(
        current_status: RequestStatus,
        assigned_role: UserRole,
        notes: Option<String>,
    ) -> Result<ReviewAction, LifecycleError> {
        if current_status != RequestStatus::Pending {
            return Err(LifecycleError::RequestNotPending(current_status));
        }

        let review_notes = notes
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| format!("Approved with role {assigned_role}"));

        Ok(ReviewAction::Approve {
            new_status: RequestStatus::Approved,
            assigned_role,
            review_notes,
            reviewed_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_pending_with_reason() {
        let action =
            AccountRequestReview::reject(RequestStatus::Pending, "No manager approval", None)
                .unwrap();
        assert_eq!(action.new_status(), RequestStatus::Rejected);
        if let ReviewAction::Reject { review_notes, .. } = action {
            assert_eq!(review_notes, "Rejected: No manager approval");
        } else {
            panic!("expected Reject action");
        }
    }

    #[test]
    fn test_reject_uses_supplied_notes() {
        let action = AccountRequestReview::reject(
            RequestStatus::Pending,
            "No manager approval",
            Some("Resubmit with your manager in copy".to_string()),
        )
        .unwrap();
        if let ReviewAction::Reject { review_notes, .. } = action {
            assert_eq!(review_notes, "Resubmit with your manager in copy");
        } else {
            panic!("expected Reject action");
        }
    }

    #[test]
    fn test_reject_without_reason_fails() {
        let result = AccountRequestReview::reject(RequestStatus::Pending, "", None);
        assert_eq!(result.unwrap_err(), LifecycleError::RejectionReasonRequired);

        let result = AccountRequestReview::reject(RequestStatus::Pending, "  ", None);
        assert_eq!(result.unwrap_err(), LifecycleError::RejectionReasonRequired);
    }

    #[test]
    fn test_reject_non_pending_fails() {
        let result = AccountRequestReview::reject(RequestStatus::Approved, "reason", None);
        assert_eq!(
            result.unwrap_err(),
            LifecycleError::RequestNotPending(RequestStatus::Approved)
        );
    }

    #[test]
    fn test_request_info_sets_note() {
        let action =
            AccountRequestReview::request_info(RequestStatus::Pending, "Which affiliate?")
                .unwrap();
        assert_eq!(action.new_status(), RequestStatus::InReview);
        if let ReviewAction::RequestInfo { review_notes, .. } = action {
            assert_eq!(
                review_notes,
                "Additional information requested: Which affiliate?"
            );
        } else {
            panic!("expected RequestInfo action");
        }
    }

    #[test]
    fn test_request_info_without_message_fails() {
        let result = AccountRequestReview::request_info(RequestStatus::Pending, " ");
        assert_eq!(result.unwrap_err(), LifecycleError::InfoMessageRequired);
    }

    #[test]
    fn test_approve_pending() {
        let action =
            AccountRequestReview::approve(RequestStatus::Pending, UserRole::Affiliate, None)
                .unwrap();
        assert_eq!(action.new_status(), RequestStatus::Approved);
        if let ReviewAction::Approve {
            assigned_role,
            review_notes,
            ..
        } = action
        {
            assert_eq!(assigned_role, UserRole::Affiliate);
            assert_eq!(review_notes, "Approved with role affiliate");
        } else {
            panic!("expected Approve action");
        }
    }

    #[test]
    fn test_approve_non_pending_fails() {
        for status in [
            RequestStatus::InReview,
            RequestStatus::Approved,
            RequestStatus::Rejected,
        ] {
            let result = AccountRequestReview::approve(status, UserRole::Viewer, None);
            assert_eq!(
                result.unwrap_err(),
                LifecycleError::RequestNotPending(status)
            );
        }
    }
}
