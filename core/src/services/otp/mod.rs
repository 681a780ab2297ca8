//! OTP manager module for email-based login
//!
//! This module provides the full one-time-code lifecycle:
//! - Code generation behind a swappable generator
//! - Issuance with a fixed lifetime, replacing any earlier code
//! - Verification with attempt tracking and lockout
//! - Expiry handling and best-effort persistence

mod generator;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use generator::{CodeGenerator, RandomCodeGenerator, SequenceCodeGenerator};
pub use service::OtpManager;
pub use types::IssuedOtp;
