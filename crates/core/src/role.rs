//! Unified user role model.
//!
//! The original system carried two diverging role sets; this enum collapses
//! them into one closed enumeration used everywhere a role is read or
//! written.

use serde::{Deserialize, Serialize};
use std::fmt;

/// User role within the cash-call system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Full access: user management, assignment, all scopes.
    Admin,
    /// Finance team: reviews and settles cash calls, sees everything.
    Finance,
    /// Can approve or reject cash calls under review.
    Approver,
    /// Executive sign-off; same review powers as finance.
    Cfo,
    /// Affiliate company member; raises cash calls for their affiliate.
    Affiliate,
    /// Read-only access to dashboards and reports.
    Viewer,
}

impl UserRole {
    /// Every recognized role, in display order.
    pub const ALL: [Self; 6] = [
        Self::Admin,
        Self::Finance,
        Self::Approver,
        Self::Cfo,
        Self::Affiliate,
        Self::Viewer,
    ];

    /// Parses a role from a string, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "finance" => Some(Self::Finance),
            "approver" => Some(Self::Approver),
            "cfo" => Some(Self::Cfo),
            "affiliate" => Some(Self::Affiliate),
            "viewer" => Some(Self::Viewer),
            _ => None,
        }
    }

    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Finance => "finance",
            Self::Approver => "approver",
            Self::Cfo => "cfo",
            Self::Affiliate => "affiliate",
            Self::Viewer => "viewer",
        }
    }

    /// Whether this role may advance a cash call through review
    /// (approve, reject, mark paid).
    #[must_use]
    pub const fn can_review_cash_calls(&self) -> bool {
        matches!(self, Self::Admin | Self::Finance | Self::Approver | Self::Cfo)
    }

    /// Whether this role administers users and assignments.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
