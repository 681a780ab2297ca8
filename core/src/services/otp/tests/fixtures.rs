//! Shared setup for OTP manager tests

use std::sync::Arc;

use otp_shared::config::OtpConfig;

use crate::repositories::InMemoryKeyValueStore;
use crate::services::analytics::MockEventLogger;
use crate::services::clock::MockClock;
use crate::services::otp::{OtpManager, SequenceCodeGenerator};

pub const EMAIL: &str = "user@example.com";
pub const START: i64 = 1_700_000_000_000;

pub type TestManager = OtpManager<InMemoryKeyValueStore, MockEventLogger>;

pub struct Harness {
    pub store: InMemoryKeyValueStore,
    pub clock: Arc<MockClock>,
    pub events: MockEventLogger,
    pub generator: Arc<SequenceCodeGenerator>,
    pub manager: TestManager,
}

impl Harness {
    pub fn new() -> Self {
        Self::on_store(InMemoryKeyValueStore::new())
    }

    /// Build a manager over an existing store, e.g. to simulate a restart
    pub fn on_store(store: InMemoryKeyValueStore) -> Self {
        let clock = Arc::new(MockClock::new(START));
        let events = MockEventLogger::new();
        let generator = Arc::new(SequenceCodeGenerator::new(Vec::<String>::new()));

        let manager = OtpManager::new(
            Arc::new(store.clone()),
            Arc::new(events.clone()),
            OtpConfig::default(),
        )
        .with_clock(clock.clone())
        .with_code_generator(generator.clone());

        Self {
            store,
            clock,
            events,
            generator,
            manager,
        }
    }

    /// Issue a known code for `identity`
    pub async fn issue_code(&self, identity: &str, code: &str) -> String {
        self.generator.push(code);
        self.manager.issue(identity).await
    }
}
