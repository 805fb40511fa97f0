//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML persistence.
//! Every field has a sensible default so the application works out of the box.

use crate::client::offline::Account;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Simulated round-trip time of every remote call.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
    /// TOML fixture replacing the built-in sample catalog.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            catalog: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Session token of a previous login. Its presence skips the login view.
    #[serde(default)]
    pub token: Option<String>,
    /// Accounts accepted by the offline backend; the catalog's own are used
    /// when empty.
    #[serde(default)]
    pub accounts: Vec<Account>,
}

impl AuthConfig {
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.trim().is_empty())
    }
}

/// UI appearance and behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
    /// Ticks (100 ms each) before a notice disappears; 0 keeps it forever.
    #[serde(default = "default_notice_ticks")]
    pub notice_ticks: u32,
    #[serde(default = "default_password_mask")]
    pub password_mask: char,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            timestamp_format: default_timestamp_format(),
            notice_ticks: default_notice_ticks(),
            password_mask: default_password_mask(),
        }
    }
}

/// Diagnostic log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: default_log_level(),
            log_dir: default_log_dir(),
        }
    }
}

fn default_latency_ms() -> u64 {
    250
}
fn default_timestamp_format() -> String {
    "%H:%M:%S".to_string()
}
fn default_notice_ticks() -> u32 {
    40
}
fn default_password_mask() -> char {
    '♥'
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_dir() -> String {
    "~/.local/share/greenmine/logs".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_yields_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.client.latency_ms, 250);
        assert_eq!(cfg.ui.notice_ticks, 40);
        assert!(!cfg.logging.enabled);
        assert!(!cfg.auth.is_authenticated());
    }

    #[test]
    fn test_partial_sections() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [client]
            catalog = "/tmp/catalog.toml"

            [auth]
            token = "abc"

            [[auth.accounts]]
            username = "ana"
            password = "pw"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.client.latency_ms, 250);
        assert_eq!(cfg.client.catalog, Some(PathBuf::from("/tmp/catalog.toml")));
        assert!(cfg.auth.is_authenticated());
        assert_eq!(cfg.auth.accounts[0].username, "ana");
    }

    #[test]
    fn test_blank_token_is_not_authenticated() {
        let auth = AuthConfig {
            token: Some("   ".into()),
            accounts: vec![],
        };
        assert!(!auth.is_authenticated());
    }
}
