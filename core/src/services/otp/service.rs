//! Main OTP manager implementation

use serde_json::json;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use otp_shared::config::OtpConfig;
use otp_shared::utils::validation::{mask_identity, parse_identity};

use crate::domain::entities::analytics_event::{event_metadata, events};
use crate::domain::entities::otp_record::{OtpRecord, OtpStore};
use crate::domain::value_objects::VerificationResult;
use crate::errors::{DomainResult, OtpFailureReason};
use crate::repositories::{KeyValueStore, OtpStoreRepository};
use crate::services::analytics::{EventLogger, NoOpEventLogger};
use crate::services::clock::{Clock, SystemClock};

use super::generator::{CodeGenerator, RandomCodeGenerator};
use super::types::IssuedOtp;

/// OTP manager for the email login flow
///
/// Owns the identity -> record map persisted as one blob. Every operation
/// runs a full load-modify-store cycle; mutating operations are serialized
/// behind a single async mutex because all identities share that blob.
/// Storage failures never reach the caller: reads degrade to an empty map
/// and writes are logged and dropped.
pub struct OtpManager<S: KeyValueStore, L: EventLogger = NoOpEventLogger> {
    /// Persistence for the record map
    repository: OtpStoreRepository<S>,
    /// Analytics sink
    event_logger: Arc<L>,
    /// Time source for expiry
    clock: Arc<dyn Clock>,
    /// Source of fresh codes
    generator: Arc<dyn CodeGenerator>,
    /// Lifetime, attempt limit and storage key
    config: OtpConfig,
    /// Serializes load-modify-store cycles
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> OtpManager<S, NoOpEventLogger> {
    /// Create a manager that emits no analytics events
    pub fn without_analytics(store: Arc<S>, config: OtpConfig) -> Self {
        Self::new(store, Arc::new(NoOpEventLogger), config)
    }
}

impl<S: KeyValueStore, L: EventLogger> OtpManager<S, L> {
    /// Create a new OTP manager
    ///
    /// # Arguments
    ///
    /// * `store` - Key-value store the record map is persisted in
    /// * `event_logger` - Analytics sink for lifecycle events
    /// * `config` - Lifetime, attempt limit, code length and storage key
    pub fn new(store: Arc<S>, event_logger: Arc<L>, config: OtpConfig) -> Self {
        Self {
            repository: OtpStoreRepository::new(store, config.storage_key.clone()),
            event_logger,
            clock: Arc::new(SystemClock),
            generator: Arc::new(RandomCodeGenerator::new(config.code_length)),
            config,
            write_lock: Mutex::new(()),
        }
    }

    /// Use a custom time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Use a custom code generator
    pub fn with_code_generator(mut self, generator: Arc<dyn CodeGenerator>) -> Self {
        self.generator = generator;
        self
    }

    /// Configuration in use
    pub fn config(&self) -> &OtpConfig {
        &self.config
    }

    /// Issue a fresh code for an already normalized identity
    ///
    /// Any previous record for the identity is replaced, so an earlier code
    /// can never be verified again. Returns the code for out-of-band
    /// delivery.
    pub async fn issue(&self, identity: &str) -> String {
        let code = self.generator.generate();

        {
            let _guard = self.write_lock.lock().await;
            let now = self.clock.now_millis();
            let mut store = self.repository.load().await;

            let record = OtpRecord::new(code.clone(), now, self.config.expiry_millis());
            let expires_at = record.expires_at_utc();
            let replaced = store.insert(identity.to_string(), record).is_some();
            self.repository.save(&store).await;

            info!(
                identity = %mask_identity(identity),
                replaced_previous = replaced,
                expires_in_seconds = self.config.expiry_seconds,
                expires_at = ?expires_at,
                event = "otp_generated",
                "Generated new OTP"
            );
        }

        self.event_logger
            .log_event(events::OTP_GENERATED, event_metadata([("email", json!(identity))]))
            .await;

        code
    }

    /// Validate and normalize a raw email, then issue a code for it
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedOtp)` - The normalized identity and its new code
    /// * `Err(DomainError::InvalidIdentity)` - If the input is empty or not an email
    pub async fn issue_for_email(&self, raw_email: &str) -> DomainResult<IssuedOtp> {
        let identity = parse_identity(raw_email).map_err(|e| {
            debug!(field = %e.field, code = %e.code, "Rejected login identity");
            e
        })?;

        let code = self.issue(&identity).await;

        Ok(IssuedOtp {
            identity,
            code,
            expires_in_seconds: self.config.expiry_seconds,
        })
    }

    /// Verify a candidate code
    ///
    /// Checks run in order: missing record, expiry, attempt limit, then
    /// comparison. Only the comparison step consumes an attempt. Failures
    /// are returned in the result, never as errors.
    pub async fn verify(&self, identity: &str, candidate: &str) -> VerificationResult {
        let result = {
            let _guard = self.write_lock.lock().await;
            self.verify_locked(identity, candidate).await
        };

        match result.reason {
            None => {
                info!(
                    identity = %mask_identity(identity),
                    event = "otp_verified_success",
                    "OTP successfully verified"
                );
                self.event_logger
                    .log_event(
                        events::OTP_VALIDATION_SUCCESS,
                        event_metadata([("email", json!(identity))]),
                    )
                    .await;
            }
            Some(reason) => {
                warn!(
                    identity = %mask_identity(identity),
                    reason = reason.analytics_reason(),
                    attempts_remaining = ?result.attempts_remaining(),
                    event = "otp_verification_failed",
                    "OTP verification failed"
                );
                let mut metadata = event_metadata([
                    ("email", json!(identity)),
                    ("reason", json!(reason.analytics_reason())),
                ]);
                if let OtpFailureReason::Incorrect { attempts_remaining } = reason {
                    metadata.insert("attemptsRemaining".to_string(), json!(attempts_remaining));
                }
                self.event_logger
                    .log_event(events::OTP_VALIDATION_FAILED, metadata)
                    .await;
            }
        }

        result
    }

    async fn verify_locked(&self, identity: &str, candidate: &str) -> VerificationResult {
        let now = self.clock.now_millis();
        let mut store = self.repository.load().await;

        let Some(mut record) = store.get(identity).cloned() else {
            return VerificationResult::failure(OtpFailureReason::NotFound);
        };

        if record.is_expired(now) {
            store.remove(identity);
            self.repository.save(&store).await;
            return VerificationResult::failure(OtpFailureReason::Expired);
        }

        if record.is_locked(self.config.max_attempts) {
            return VerificationResult::failure(OtpFailureReason::AttemptsExceeded);
        }

        record.attempt_count += 1;
        let matched = record.matches(candidate);
        let attempts_remaining = record.remaining_attempts(self.config.max_attempts);
        store.insert(identity.to_string(), record);
        self.repository.save(&store).await;

        if matched {
            store.remove(identity);
            self.repository.save(&store).await;
            VerificationResult::success()
        } else {
            VerificationResult::failure(OtpFailureReason::Incorrect { attempts_remaining })
        }
    }

    /// Whole seconds until the identity's code expires, 0 if none
    ///
    /// Pure read; never evicts.
    pub async fn remaining_seconds(&self, identity: &str) -> i64 {
        let now = self.clock.now_millis();
        self.repository
            .load()
            .await
            .get(identity)
            .map(|record| record.remaining_seconds(now))
            .unwrap_or(0)
    }

    /// Attempts consumed on the identity's live code, 0 if none or expired
    ///
    /// An expired record reports 0, not the stale count it was persisted
    /// with, even before `verify` or `purge_expired` evicts it.
    pub async fn attempts_used(&self, identity: &str) -> u32 {
        self.live_record(identity)
            .await
            .map(|record| record.attempt_count)
            .unwrap_or(0)
    }

    /// Attempts left before lockout on the identity's live code
    pub async fn attempts_remaining(&self, identity: &str) -> u32 {
        self.config
            .max_attempts
            .saturating_sub(self.attempts_used(identity).await)
    }

    /// Whether the identity holds an unexpired code
    pub async fn has_active(&self, identity: &str) -> bool {
        self.live_record(identity).await.is_some()
    }

    /// Drop every stored record for every identity
    pub async fn invalidate_all(&self) {
        let _guard = self.write_lock.lock().await;
        self.repository.clear().await;
        info!(
            key = %self.repository.key(),
            event = "otp_invalidate_all",
            "Cleared all OTP records"
        );
    }

    /// Remove every expired record and return how many were dropped
    pub async fn purge_expired(&self) -> usize {
        let _guard = self.write_lock.lock().await;
        let now = self.clock.now_millis();
        let mut store: OtpStore = self.repository.load().await;

        let before = store.len();
        store.retain(|_, record| !record.is_expired(now));
        let purged = before - store.len();

        if purged > 0 {
            self.repository.save(&store).await;
            debug!(purged = purged, event = "otp_purge_expired", "Purged expired OTP records");
        }

        purged
    }

    async fn live_record(&self, identity: &str) -> Option<OtpRecord> {
        let now = self.clock.now_millis();
        self.repository
            .load()
            .await
            .remove(identity)
            .filter(|record| !record.is_expired(now))
    }
}
