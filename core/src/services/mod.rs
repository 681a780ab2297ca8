//! Business services containing domain logic and use cases.

pub mod analytics;
pub mod clock;
pub mod otp;
pub mod session_tracker;

// Re-export commonly used types
pub use analytics::{
    EventLogger, MockEventLogger, NoOpEventLogger, StoredEventLogger, TracingEventLogger,
};
pub use clock::{Clock, MockClock, SystemClock};
pub use otp::{
    CodeGenerator, IssuedOtp, OtpManager, RandomCodeGenerator, SequenceCodeGenerator,
};
pub use session_tracker::SessionService;
