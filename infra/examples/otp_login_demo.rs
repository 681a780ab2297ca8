//! Example walking through the email OTP login flow
//!
//! This example shows how to:
//! - Load layered configuration and initialize logging
//! - Issue a code for an email address
//! - Verify a wrong code, then the right one
//! - Start and end a session and inspect the analytics log
//!
//! Run with `cargo run -p otp_infra --example otp_login_demo -- [config.toml]`.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

use otp_infra::config::load_config;
use otp_infra::{logging, OtpRuntime};

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = load_config(config_path.as_deref()).context("loading configuration")?;
    logging::init(&config.logging).context("initializing logging")?;

    println!("OTP Login Demo");
    println!("==============\n");

    let echo_codes = config.environment.echoes_codes();
    let runtime = OtpRuntime::from_config(config)
        .await
        .context("building runtime")?;
    println!("✓ Storage backend: {}\n", runtime.config.storage.backend);

    // 1. Login screen: validate the email and issue a code
    if let Err(e) = runtime.manager.issue_for_email("   ").await {
        println!("✗ Empty input rejected: {}", e);
    }
    let issued = runtime
        .manager
        .issue_for_email("Demo.User@Example.com")
        .await
        .context("issuing code")?;
    println!("✓ Code issued for {}", issued.identity);
    if echo_codes {
        println!("  Code: {} (valid for {}s)", issued.code, issued.expires_in_seconds);
    }

    // 2. OTP screen: a wrong guess, then the real code
    let wrong = runtime.manager.verify(&issued.identity, "000000").await;
    if let Some(message) = wrong.message() {
        println!("✗ {}", message);
    }
    println!(
        "  {}s remaining, {} attempts left",
        runtime.manager.remaining_seconds(&issued.identity).await,
        runtime.manager.attempts_remaining(&issued.identity).await
    );

    let result = runtime.manager.verify(&issued.identity, &issued.code).await;
    if !result.valid {
        anyhow::bail!("verification failed: {:?}", result.message());
    }
    println!("✓ Code verified\n");

    // 3. Session screen
    let session = runtime.sessions.start(&issued.identity).await;
    tokio::time::sleep(Duration::from_millis(1_200)).await;
    println!("  Session running for {}", runtime.sessions.formatted_elapsed(&session));
    let duration = runtime.sessions.end(&session).await;
    println!("✓ Logged out after {}s\n", duration);

    println!("Analytics events:");
    for event in runtime.analytics.events().await.iter().rev().take(5).rev() {
        println!("  {} {}", event.timestamp, event.event_name);
    }

    Ok(())
}
