//! Access scoping rules for cash-call queries.
//!
//! A scope decides which cash calls a query returns. The repository layer
//! mirrors the `allows` predicate as SQL filters; this module is the
//! database-free source of truth used by tests and the analytics path.
//!
//! The gateway does not enforce that a caller's role matches the requested
//! scope; that check belongs to the platform layer in front of this service.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Access-filtering mode for cash-call queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessScope {
    /// Cash calls created by the caller.
    Mine,
    /// Cash calls belonging to the caller's affiliate company.
    Affiliate,
    /// Every cash call; intended for finance/admin/CFO callers.
    All,
}

impl AccessScope {
    /// Parses a scope from a string, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mine" => Some(Self::Mine),
            "affiliate" => Some(Self::Affiliate),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    /// Returns the string representation of the scope.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mine => "mine",
            Self::Affiliate => "affiliate",
            Self::All => "all",
        }
    }

    /// Whether a cash call is visible under this scope.
    ///
    /// * `caller` - The requesting user's id.
    /// * `caller_affiliate` - The affiliate company on the caller's profile.
    /// * `created_by` - The cash call's creator.
    /// * `affiliate_id` - The cash call's affiliate company.
    #[must_use]
    pub fn allows(
        &self,
        caller: Uuid,
        caller_affiliate: Option<Uuid>,
        created_by: Uuid,
        affiliate_id: Uuid,
    ) -> bool {
        match self {
            Self::Mine => created_by == caller,
            Self::Affiliate => caller_affiliate == Some(affiliate_id),
            Self::All => true,
        }
    }
}

impl fmt::Display for AccessScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (Uuid, Uuid, Uuid) {
        (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4())
    }

    #[test]
    fn test_parse() {
        assert_eq!(AccessScope::parse("mine"), Some(AccessScope::Mine));
        assert_eq!(AccessScope::parse("AFFILIATE"), Some(AccessScope::Affiliate));
        assert_eq!(AccessScope::parse("all"), Some(AccessScope::All));
        assert_eq!(AccessScope::parse("everything"), None);
        assert_eq!(AccessScope::parse(""), None);
    }

    #[test]
    fn test_mine_matches_creator_only() {
        let (caller, other, affiliate) = ids();
        assert!(AccessScope::Mine.allows(caller, None, caller, affiliate));
        assert!(!AccessScope::Mine.allows(caller, None, other, affiliate));
    }

    #[test]
    fn test_affiliate_requires_matching_company() {
        let (caller, creator, affiliate) = ids();
        assert!(AccessScope::Affiliate.allows(caller, Some(affiliate), creator, affiliate));
        assert!(!AccessScope::Affiliate.allows(caller, Some(Uuid::new_v4()), creator, affiliate));
    }

    #[test]
    fn test_affiliate_scope_empty_without_company() {
        // A caller with no affiliate on their profile sees nothing.
        let (caller, creator, affiliate) = ids();
        assert!(!AccessScope::Affiliate.allows(caller, None, creator, affiliate));
    }

    #[test]
    fn test_all_sees_everything() {
        let (caller, creator, affiliate) = ids();
        assert!(AccessScope::All.allows(caller, None, creator, affiliate));
    }
}
