//! Core business logic for the cash-call service.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and calculations live
//! here.
//!
//! # Modules
//!
//! - `role` - Unified user role model and capabilities
//! - `lifecycle` - Cash-call and account-request state machines
//! - `access` - Access scoping rules (mine / affiliate / all)
//! - `analytics` - Derived aggregation over cash-call records
//! - `auth` - Password hashing

pub mod access;
pub mod analytics;
pub mod auth;
pub mod lifecycle;
pub mod role;
