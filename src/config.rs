//! Configuration management for the anvil client.
//!
//! This module handles loading the ConnectWise Manage connection values from
//! environment variables, with validation to ensure all required values are
//! present.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::error::AnvilError;
use std::env;

/// Configuration for connecting to ConnectWise Manage.
///
/// All fields are required and loaded from environment variables.
/// The private key is stored but never logged or exposed in error messages.
#[derive(Clone)]
pub struct Config {
    /// Manage server host (e.g. `na.myconnectwise.net`), without a scheme.
    pub server: String,

    /// Company identifier used at login.
    pub company: String,

    /// Public API key.
    pub public_key: String,

    /// Private API key.
    /// This value must never be logged or included in error messages.
    pub private_key: String,

    /// Vendor-issued client ID, sent on every request.
    pub client_id: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Required Environment Variables
    ///
    /// - `CWM_SERVER`: Manage server host (e.g. `na.myconnectwise.net`)
    /// - `CWM_COMPANY`: company identifier
    /// - `CWM_PUBLIC_KEY`: public API key
    /// - `CWM_PRIVATE_KEY`: private API key
    /// - `CWM_CLIENT_ID`: vendor-issued client ID
    ///
    /// # Errors
    ///
    /// Returns `AnvilError::Config` if any required variable is missing
    /// or if values fail validation.
    ///
    /// # Example
    ///
    /// ```ignore
    /// dotenvy::dotenv().ok();
    /// let config = Config::from_env()?;
    /// ```
    pub fn from_env() -> Result<Self, AnvilError> {
        let server = Self::get_required_env("CWM_SERVER")?;
        let company = Self::get_required_env("CWM_COMPANY")?;
        let public_key = Self::get_required_env("CWM_PUBLIC_KEY")?;
        let private_key = Self::get_required_env("CWM_PRIVATE_KEY")?;
        let client_id = Self::get_required_env("CWM_CLIENT_ID")?;

        let server = Self::validate_server(server)?;

        // Catch keys copied straight out of the vendor documentation
        Self::validate_key(&public_key, "CWM_PUBLIC_KEY")?;
        Self::validate_key(&private_key, "CWM_PRIVATE_KEY")?;

        Ok(Config {
            server,
            company,
            public_key,
            private_key,
            client_id,
        })
    }

    /// Returns the Base64 Basic-Auth token for this configuration.
    ///
    /// Manage authenticates API members with `company+publicKey` as the
    /// username and the private key as the password.
    #[must_use]
    pub fn auth_token(&self) -> String {
        BASE64.encode(format!(
            "{}+{}:{}",
            self.company, self.public_key, self.private_key
        ))
    }

    /// Gets a required environment variable, returning an error if missing or empty.
    fn get_required_env(name: &str) -> Result<String, AnvilError> {
        env::var(name)
            .map_err(|_| AnvilError::missing_env(name))
            .and_then(|value| {
                if value.trim().is_empty() {
                    Err(AnvilError::missing_env(name))
                } else {
                    Ok(value)
                }
            })
    }

    /// Validates and normalizes the server host.
    ///
    /// The host is interpolated into `https://{server}/...`, so it must not
    /// carry its own scheme or path components.
    fn validate_server(server: String) -> Result<String, AnvilError> {
        let server = server.trim().trim_end_matches('/').to_string();

        if server.starts_with("http://") || server.starts_with("https://") {
            return Err(AnvilError::invalid_config(
                "CWM_SERVER must be a bare host without a scheme (e.g. na.myconnectwise.net)",
            ));
        }

        if server.contains('/') {
            return Err(AnvilError::invalid_config(
                "CWM_SERVER must not contain a path",
            ));
        }

        Ok(server)
    }

    /// Validates an API key is not a placeholder value.
    fn validate_key(key: &str, var_name: &str) -> Result<(), AnvilError> {
        let key_lower = key.to_lowercase();
        let placeholder_patterns = [
            "yourpublickey",
            "yourprivatekey",
            "your_key",
            "placeholder",
            "xxx",
            "changeme",
        ];

        for pattern in placeholder_patterns {
            if key_lower.contains(pattern) {
                return Err(AnvilError::invalid_config(format!(
                    "{} appears to be a placeholder value",
                    var_name
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Note: Tests that modify environment variables should not run in parallel.
    // Use `cargo test -- --test-threads=1` for full integration tests.

    fn test_config() -> Config {
        Config {
            server: "na.myconnectwise.net".to_string(),
            company: "acme".to_string(),
            public_key: "pubkey".to_string(),
            private_key: "privkey".to_string(),
            client_id: "client-id-guid".to_string(),
        }
    }

    #[test]
    fn test_auth_token_encodes_company_and_keys() {
        // base64("acme+pubkey:privkey")
        assert_eq!(test_config().auth_token(), "YWNtZStwdWJrZXk6cHJpdmtleQ==");
    }

    #[test]
    fn test_validate_server_strips_trailing_slash() {
        let result = Config::validate_server("na.myconnectwise.net/".to_string()).unwrap();
        assert_eq!(result, "na.myconnectwise.net");
    }

    #[test]
    fn test_validate_server_rejects_scheme() {
        let result = Config::validate_server("https://na.myconnectwise.net".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_server_rejects_path() {
        let result = Config::validate_server("na.myconnectwise.net/v4_6_release".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_key_rejects_placeholder() {
        let result = Config::validate_key("YourPublicKey", "CWM_PUBLIC_KEY");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_key_accepts_real_key() {
        let result = Config::validate_key("abc123def456", "CWM_PUBLIC_KEY");
        assert!(result.is_ok());
    }
}
