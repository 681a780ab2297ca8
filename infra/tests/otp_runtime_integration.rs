//! Integration tests for the assembled runtime on a durable backend

use std::io::Write;
use tempfile::TempDir;

use otp_core::OtpFailureReason;
use otp_infra::config::load_config;
use otp_infra::OtpRuntime;
use otp_shared::config::StorageBackend;

fn write_config(dir: &TempDir, store_path: &std::path::Path) -> std::path::PathBuf {
    let path = dir.path().join("otp.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(
        file,
        r#"
        [otp]
        max_attempts = 2

        [analytics]
        max_events = 3

        [storage]
        backend = "file"
        file_path = "{}"
        "#,
        store_path.display().to_string().replace('\\', "\\\\")
    )
    .unwrap();
    path
}

#[tokio::test]
async fn test_configured_runtime_survives_restart() {
    let dir = TempDir::new().unwrap();
    let store_path = dir.path().join("data").join("store.json");
    let config_path = write_config(&dir, &store_path);

    let config = load_config(Some(&config_path)).unwrap();
    assert_eq!(config.storage.backend, StorageBackend::File);
    assert_eq!(config.otp.max_attempts, 2);

    let issued = {
        let runtime = OtpRuntime::from_config(config.clone()).await.unwrap();
        let issued = runtime.manager.issue_for_email("User@Example.com").await.unwrap();

        let wrong = runtime.manager.verify(&issued.identity, "not-it").await;
        assert_eq!(
            wrong.reason,
            Some(OtpFailureReason::Incorrect { attempts_remaining: 1 })
        );
        issued
    };
    assert!(store_path.exists());

    let runtime = OtpRuntime::from_config(config).await.unwrap();
    assert_eq!(runtime.manager.attempts_used(&issued.identity).await, 1);
    assert!(runtime.manager.verify(&issued.identity, &issued.code).await.valid);

    let session = runtime.sessions.start(&issued.identity).await;
    runtime.sessions.end(&session).await;

    // Capped at the configured three most recent events
    let names: Vec<_> = runtime
        .analytics
        .events()
        .await
        .into_iter()
        .map(|e| e.event_name)
        .collect();
    assert_eq!(
        names,
        vec!["otp_validation_success", "session_started", "logout"]
    );
}
