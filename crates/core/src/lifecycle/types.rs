//! Status enums for the cash-call and account-request lifecycles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cash call status in the approval workflow.
///
/// The valid transitions are:
/// - Draft → UnderReview (submit)
/// - UnderReview → Approved (approve)
/// - UnderReview → Rejected (reject)
/// - Approved → Paid (mark paid)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashCallStatus {
    /// Being drafted by the requester; can still be edited.
    Draft,
    /// Submitted and awaiting a reviewer decision.
    UnderReview,
    /// Approved and awaiting settlement.
    Approved,
    /// Rejected by a reviewer (terminal).
    Rejected,
    /// Settled (terminal).
    Paid,
}

impl CashCallStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::UnderReview => "under_review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Paid => "paid",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "under_review" => Some(Self::UnderReview),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "paid" => Some(Self::Paid),
            _ => None,
        }
    }

    /// Returns true if no further transition can leave this status.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Paid)
    }
}

impl fmt::Display for CashCallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Account request status.
///
/// Requests are created `Pending`; an admin decision moves them to
/// `InReview`, `Approved` (via user provisioning, terminal) or `Rejected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Awaiting an admin decision.
    Pending,
    /// Additional information was requested from the applicant.
    InReview,
    /// Approved; a user account was provisioned (terminal).
    Approved,
    /// Rejected (terminal).
    Rejected,
}

impl RequestStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InReview => "in_review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "in_review" => Some(Self::InReview),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
