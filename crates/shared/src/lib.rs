//! Shared types, errors, and configuration for the cash-call service.
//!
//! This crate provides common pieces used across all other crates:
//! - Application-wide error taxonomy
//! - Configuration management
//! - SMTP notification service

pub mod config;
pub mod email;
pub mod error;

pub use config::AppConfig;
pub use email::{EmailError, EmailService};
pub use error::{AppError, AppResult};
