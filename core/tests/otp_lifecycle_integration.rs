//! Integration tests for the login flow: OTP issuance, verification,
//! analytics and session tracking wired together through the public API.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use otp_core::{
        events, InMemoryKeyValueStore, MockClock, OtpFailureReason, OtpManager,
        SequenceCodeGenerator, SessionService, StoredEventLogger,
    };
    use otp_shared::config::{AnalyticsConfig, OtpConfig};

    struct Flow {
        store: InMemoryKeyValueStore,
        clock: Arc<MockClock>,
        analytics: Arc<StoredEventLogger<InMemoryKeyValueStore>>,
        manager: OtpManager<InMemoryKeyValueStore, StoredEventLogger<InMemoryKeyValueStore>>,
        sessions: SessionService<StoredEventLogger<InMemoryKeyValueStore>>,
    }

    fn flow(codes: &[&str]) -> Flow {
        let store = InMemoryKeyValueStore::new();
        let shared = Arc::new(store.clone());
        let clock = Arc::new(MockClock::new(1_700_000_000_000));

        let analytics = Arc::new(
            StoredEventLogger::new(shared.clone(), AnalyticsConfig::default())
                .with_clock(clock.clone()),
        );
        let manager = OtpManager::new(shared, analytics.clone(), OtpConfig::default())
            .with_clock(clock.clone())
            .with_code_generator(Arc::new(SequenceCodeGenerator::new(codes.to_vec())));
        let sessions = SessionService::new(analytics.clone()).with_clock(clock.clone());

        Flow {
            store,
            clock,
            analytics,
            manager,
            sessions,
        }
    }

    #[tokio::test]
    async fn test_login_to_logout() {
        let f = flow(&["482913"]);
        assert!(f.analytics.initialize().await);

        let issued = f.manager.issue_for_email("User@Example.com").await.unwrap();
        assert_eq!(issued.code, "482913");

        f.clock.advance_secs(10);
        assert_eq!(f.manager.remaining_seconds(&issued.identity).await, 50);

        let wrong = f.manager.verify(&issued.identity, "123456").await;
        assert_eq!(wrong.message().unwrap(), "Incorrect OTP. 2 attempts remaining.");

        let ok = f.manager.verify(&issued.identity, "482913").await;
        assert!(ok.valid);

        let session = f.sessions.start(&issued.identity).await;
        f.clock.advance_secs(125);
        assert_eq!(f.sessions.formatted_elapsed(&session), "02:05");
        assert_eq!(f.sessions.end(&session).await, 125);

        let names: Vec<_> = f
            .analytics
            .events()
            .await
            .into_iter()
            .map(|e| e.event_name)
            .collect();
        assert_eq!(
            names,
            vec![
                events::OTP_GENERATED,
                events::OTP_VALIDATION_FAILED,
                events::OTP_VALIDATION_SUCCESS,
                events::SESSION_STARTED,
                events::LOGOUT,
            ]
        );

        // OTP state and analytics share the store under separate keys
        assert!(f.store.raw("@otp_storage").is_some());
        assert!(f.store.raw("@analytics_events").is_some());
    }

    #[tokio::test]
    async fn test_expired_code_then_resend() {
        let f = flow(&["111111", "222222"]);
        let identity = f.manager.issue_for_email("user@example.com").await.unwrap().identity;

        f.clock.advance_secs(61);
        let expired = f.manager.verify(&identity, "111111").await;
        assert_eq!(expired.reason, Some(OtpFailureReason::Expired));
        assert!(expired.reason.unwrap().requires_new_code());

        f.manager.issue(&identity).await;
        assert_eq!(f.manager.attempts_remaining(&identity).await, 3);
        assert!(f.manager.verify(&identity, "222222").await.valid);
    }

    #[tokio::test]
    async fn test_scenario_482913() {
        let f = flow(&["482913"]);

        let code = f.manager.issue("user@example.com").await;
        assert_eq!(code, "482913");

        let first = f.manager.verify("user@example.com", "482913").await;
        assert!(first.valid);

        let second = f.manager.verify("user@example.com", "482913").await;
        assert!(!second.valid);
        assert_eq!(second.reason, Some(OtpFailureReason::NotFound));
    }
}
