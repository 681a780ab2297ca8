//! # OTP Login Core
//!
//! Core lifecycle logic for the one-time-password login flow.
//! This crate contains the domain entities, the key-value storage interface,
//! the OTP manager with its expiry and attempt rules, and the analytics and
//! session services that sit around it.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
