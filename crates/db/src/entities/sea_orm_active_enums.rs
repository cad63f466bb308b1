//! String-backed enums stored in the database.
//!
//! Each enum mirrors a core domain enum where one exists; the `to_core` /
//! `from_core` helpers convert at the repository boundary so core stays free
//! of `SeaORM` types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use cashcall_core::lifecycle::{
    CashCallStatus as CoreCashCallStatus, RequestStatus as CoreRequestStatus,
};
use cashcall_core::role::UserRole as CoreUserRole;

/// User role column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Full access.
    #[sea_orm(string_value = "admin")]
    Admin,
    /// Finance team.
    #[sea_orm(string_value = "finance")]
    Finance,
    /// Cash-call approver.
    #[sea_orm(string_value = "approver")]
    Approver,
    /// Executive sign-off.
    #[sea_orm(string_value = "cfo")]
    Cfo,
    /// Affiliate company member.
    #[sea_orm(string_value = "affiliate")]
    Affiliate,
    /// Read-only access.
    #[sea_orm(string_value = "viewer")]
    Viewer,
}

impl UserRole {
    /// Converts to the core role enum.
    #[must_use]
    pub const fn to_core(self) -> CoreUserRole {
        match self {
            Self::Admin => CoreUserRole::Admin,
            Self::Finance => CoreUserRole::Finance,
            Self::Approver => CoreUserRole::Approver,
            Self::Cfo => CoreUserRole::Cfo,
            Self::Affiliate => CoreUserRole::Affiliate,
            Self::Viewer => CoreUserRole::Viewer,
        }
    }

    /// Converts from the core role enum.
    #[must_use]
    pub const fn from_core(role: CoreUserRole) -> Self {
        match role {
            CoreUserRole::Admin => Self::Admin,
            CoreUserRole::Finance => Self::Finance,
            CoreUserRole::Approver => Self::Approver,
            CoreUserRole::Cfo => Self::Cfo,
            CoreUserRole::Affiliate => Self::Affiliate,
            CoreUserRole::Viewer => Self::Viewer,
        }
    }
}

/// Cash-call status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum CashCallStatus {
    /// Being drafted.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Awaiting a reviewer decision.
    #[sea_orm(string_value = "under_review")]
    UnderReview,
    /// Approved, awaiting settlement.
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Rejected (terminal).
    #[sea_orm(string_value = "rejected")]
    Rejected,
    /// Settled (terminal).
    #[sea_orm(string_value = "paid")]
    Paid,
}

impl CashCallStatus {
    /// Converts to the core status enum.
    #[must_use]
    pub const fn to_core(self) -> CoreCashCallStatus {
        match self {
            Self::Draft => CoreCashCallStatus::Draft,
            Self::UnderReview => CoreCashCallStatus::UnderReview,
            Self::Approved => CoreCashCallStatus::Approved,
            Self::Rejected => CoreCashCallStatus::Rejected,
            Self::Paid => CoreCashCallStatus::Paid,
        }
    }

    /// Converts from the core status enum.
    #[must_use]
    pub const fn from_core(status: CoreCashCallStatus) -> Self {
        match status {
            CoreCashCallStatus::Draft => Self::Draft,
            CoreCashCallStatus::UnderReview => Self::UnderReview,
            CoreCashCallStatus::Approved => Self::Approved,
            CoreCashCallStatus::Rejected => Self::Rejected,
            CoreCashCallStatus::Paid => Self::Paid,
        }
    }
}

/// Account-request status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Awaiting an admin decision.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Additional information requested.
    #[sea_orm(string_value = "in_review")]
    InReview,
    /// Approved (terminal).
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Rejected (terminal).
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl RequestStatus {
    /// Converts to the core status enum.
    #[must_use]
    pub const fn to_core(self) -> CoreRequestStatus {
        match self {
            Self::Pending => CoreRequestStatus::Pending,
            Self::InReview => CoreRequestStatus::InReview,
            Self::Approved => CoreRequestStatus::Approved,
            Self::Rejected => CoreRequestStatus::Rejected,
        }
    }

    /// Converts from the core status enum.
    #[must_use]
    pub const fn from_core(status: CoreRequestStatus) -> Self {
        match status {
            CoreRequestStatus::Pending => Self::Pending,
            CoreRequestStatus::InReview => Self::InReview,
            CoreRequestStatus::Approved => Self::Approved,
            CoreRequestStatus::Rejected => Self::Rejected,
        }
    }
}

/// Cash-call priority column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum CallPriority {
    /// Low priority.
    #[sea_orm(string_value = "low")]
    Low,
    /// Medium priority.
    #[sea_orm(string_value = "medium")]
    Medium,
    /// High priority.
    #[sea_orm(string_value = "high")]
    High,
}

/// Compliance status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    /// Compliance review pending.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Cleared by compliance.
    #[sea_orm(string_value = "compliant")]
    Compliant,
    /// Flagged by compliance.
    #[sea_orm(string_value = "non_compliant")]
    NonCompliant,
}

/// Affiliate status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum AffiliateStatus {
    /// Active partner.
    #[sea_orm(string_value = "active")]
    Active,
    /// Dormant partner.
    #[sea_orm(string_value = "inactive")]
    Inactive,
    /// Suspended partner.
    #[sea_orm(string_value = "suspended")]
    Suspended,
}

/// Affiliate risk level column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Low risk.
    #[sea_orm(string_value = "low")]
    Low,
    /// Medium risk.
    #[sea_orm(string_value = "medium")]
    Medium,
    /// High risk.
    #[sea_orm(string_value = "high")]
    High,
    /// Critical risk.
    #[sea_orm(string_value = "critical")]
    Critical,
}
