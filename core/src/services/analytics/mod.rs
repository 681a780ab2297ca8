//! Analytics event logging module
//!
//! This module provides the fire-and-forget event sink used by the login flow:
//! - The `EventLogger` collaborator trait
//! - A bounded, persisted event log (most recent events only)
//! - No-op, tracing-only and recording implementations

mod mock;
mod noop;
mod service;
mod traits;


pub use mock::MockEventLogger;
pub use noop::{NoOpEventLogger, TracingEventLogger};
pub use service::StoredEventLogger;
pub use traits::EventLogger;
