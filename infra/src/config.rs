//! Configuration loading for the OTP runtime
//!
//! Sources, lowest precedence first:
//! 1. Built-in defaults for the detected environment (`AppConfig::from_env`)
//! 2. An optional TOML file
//! 3. `OTP__`-prefixed environment variables, `__` separating nested keys
//!    (e.g. `OTP__OTP__EXPIRY_SECONDS=120`, `OTP__STORAGE__BACKEND=file`)
//!
//! `.env` files for the current environment are loaded with `dotenvy` first.

use config::{Config, File, FileFormat};
use std::path::Path;
use tracing::{debug, info};

use otp_shared::config::{AppConfig, Environment};

use crate::InfrastructureError;

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "OTP";

/// Separator for nested keys in environment overrides
pub const ENV_SEPARATOR: &str = "__";

/// Load `.env` files for the detected environment, ignoring missing files
pub fn load_dotenv() -> Environment {
    dotenvy::dotenv().ok();
    let environment = Environment::from_env();
    if dotenvy::from_filename(environment.env_file()).is_ok() {
        debug!(file = environment.env_file(), "Loaded environment file");
    }
    environment
}

/// Load configuration, layering `path` (if given and present) and
/// environment overrides over the environment defaults
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, InfrastructureError> {
    let environment = load_dotenv();
    let defaults = AppConfig::from_env();

    let mut builder = Config::builder().add_source(
        Config::try_from(&defaults).map_err(|e| InfrastructureError::Config(e.to_string()))?,
    );

    if let Some(path) = path {
        debug!(path = %path.display(), "Adding configuration file");
        builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        )
        .build()
        .map_err(|e| InfrastructureError::Config(format!("Building configuration: {}", e)))?;

    let config: AppConfig = settings
        .try_deserialize()
        .map_err(|e| InfrastructureError::Config(format!("Loading configuration: {}", e)))?;

    config
        .otp
        .validate()
        .map_err(|e| InfrastructureError::Config(format!("Invalid configuration: {}", e)))?;

    info!(
        environment = %environment,
        storage = %config.storage.backend,
        expiry_seconds = config.otp.expiry_seconds,
        max_attempts = config.otp.max_attempts,
        "Configuration loaded"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use otp_shared::config::StorageBackend;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn toml_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = toml_file(
            r#"
            [otp]
            expiry_seconds = 90
            max_attempts = 5

            [storage]
            backend = "file"
            file_path = "/var/lib/otp/store.json"
            "#,
        );

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.otp.expiry_seconds, 90);
        assert_eq!(config.otp.max_attempts, 5);
        assert_eq!(config.otp.code_length, 6);
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(
            config.storage.file_path.as_deref(),
            Some(Path::new("/var/lib/otp/store.json"))
        );
    }

    #[test]
    fn test_missing_file_is_optional() {
        let config = load_config(Some(Path::new("/definitely/not/here.toml"))).unwrap();
        assert_eq!(config.otp.storage_key, "@otp_storage");
    }

    #[test]
    fn test_out_of_range_otp_settings_are_rejected() {
        let cases = [
            ("expiry_seconds = -5", "otp.expiry_seconds"),
            ("expiry_seconds = 9223372036854775807", "otp.expiry_seconds"),
            ("max_attempts = 0", "otp.max_attempts"),
            ("code_length = 0", "otp.code_length"),
        ];

        for (setting, field) in cases {
            let file = toml_file(&format!("[otp]\n{}\n", setting));
            match load_config(Some(file.path())) {
                Err(InfrastructureError::Config(message)) => {
                    assert!(message.contains(field), "{}: {}", setting, message)
                }
                other => panic!("{} was accepted: {:?}", setting, other.map(|c| c.otp)),
            }
        }
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let file = toml_file("[otp\nexpiry_seconds = ");
        assert!(matches!(
            load_config(Some(file.path())),
            Err(InfrastructureError::Config(_))
        ));
    }
}
