//! Post-login session tracking
//!
//! Starts a session once a code is verified, reports elapsed time as a pure
//! function of the clock, and records the session length on logout.

mod service;

#[cfg(test)]
mod tests;

pub use service::SessionService;
