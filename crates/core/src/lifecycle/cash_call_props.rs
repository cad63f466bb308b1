//! Property-based tests for the cash-call workflow.
//!
//! Validates the transition table against randomized inputs using proptest.

use proptest::prelude::*;
use uuid::Uuid;

use crate::lifecycle::cash_call::{CashCallAction, CashCallWorkflow};
use crate::lifecycle::error::LifecycleError;
use crate::lifecycle::types::CashCallStatus;

/// Strategy for generating random `CashCallStatus` values.
fn arb_status() -> impl Strategy<Value = CashCallStatus> {
    prop_oneof![
        Just(CashCallStatus::Draft),
        Just(CashCallStatus::UnderReview),
        Just(CashCallStatus::Approved),
        Just(CashCallStatus::Rejected),
        Just(CashCallStatus::Paid),
    ]
}

/// Strategy for generating random UUIDs.
fn arb_uuid() -> impl Strategy<Value = Uuid> {
    any::<u128>().prop_map(Uuid::from_u128)
}

/// Strategy for generating non-empty reasons.
fn arb_reason() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9 ]{0,80}".prop_map(|s| s.trim().to_string())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Submit succeeds exactly when the source status is Draft.
    #[test]
    fn prop_submit_only_from_draft(status in arb_status(), user_id in arb_uuid()) {
        let result = CashCallWorkflow::submit(status, user_id);
        if status == CashCallStatus::Draft {
            let action = result.unwrap();
            prop_assert_eq!(action.new_status(), CashCallStatus::UnderReview);
            if let CashCallAction::Submit { submitted_by, .. } = action {
                prop_assert_eq!(submitted_by, user_id);
            } else {
                prop_assert!(false, "expected Submit action");
            }
        } else {
            prop_assert!(
                matches!(result, Err(LifecycleError::InvalidTransition { .. })),
                "expected InvalidTransition, got {:?}",
                result
            );
        }
    }

    /// Approve succeeds exactly when the source status is UnderReview.
    #[test]
    fn prop_approve_only_from_under_review(status in arb_status(), user_id in arb_uuid()) {
        let result = CashCallWorkflow::approve(status, user_id, None);
        if status == CashCallStatus::UnderReview {
            prop_assert_eq!(result.unwrap().new_status(), CashCallStatus::Approved);
        } else {
            prop_assert!(
                matches!(result, Err(LifecycleError::InvalidTransition { .. })),
                "expected InvalidTransition, got {:?}",
                result
            );
        }
    }

    /// Reject with a non-empty reason succeeds exactly from UnderReview.
    #[test]
    fn prop_reject_only_from_under_review(
        status in arb_status(),
        user_id in arb_uuid(),
        reason in arb_reason(),
    ) {
        prop_assume!(!reason.is_empty());
        let result = CashCallWorkflow::reject(status, user_id, reason.clone());
        if status == CashCallStatus::UnderReview {
            let action = result.unwrap();
            prop_assert_eq!(action.new_status(), CashCallStatus::Rejected);
            if let CashCallAction::Reject { rejection_reason, .. } = action {
                prop_assert_eq!(rejection_reason, reason);
            } else {
                prop_assert!(false, "expected Reject action");
            }
        } else {
            prop_assert!(
                matches!(result, Err(LifecycleError::InvalidTransition { .. })),
                "expected InvalidTransition, got {:?}",
                result
            );
        }
    }

    /// Terminal statuses admit no outgoing transition.
    #[test]
    fn prop_terminal_statuses_are_sinks(to in arb_status()) {
        for from in [CashCallStatus::Rejected, CashCallStatus::Paid] {
            prop_assert!(!CashCallWorkflow::is_valid_transition(from, to));
        }
    }

    /// Every action the services emit corresponds to a table-valid pair.
    #[test]
    fn prop_actions_agree_with_table(status in arb_status(), user_id in arb_uuid()) {
        if let Ok(action) = CashCallWorkflow::submit(status, user_id) {
            prop_assert!(CashCallWorkflow::is_valid_transition(status, action.new_status()));
        }
        if let Ok(action) = CashCallWorkflow::approve(status, user_id, None) {
            prop_assert!(CashCallWorkflow::is_valid_transition(status, action.new_status()));
        }
        if let Ok(action) = CashCallWorkflow::mark_paid(status, user_id) {
            prop_assert!(CashCallWorkflow::is_valid_transition(status, action.new_status()));
        }
    }
}
