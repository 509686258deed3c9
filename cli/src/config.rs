//! Application configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use luvpay_shell::DEFAULT_DASHBOARD_PATH;
use luvpay_types::{Chain, ChainAddress};
use luvpay_utils::LogFormat;
use luvpay_wallet_core::DEFAULT_LENS_API_URL;
use luvpay_wizard::DEFAULT_SEARCH_DEBOUNCE_MS;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Configuration for the `luvpay` front-end.
///
/// Can be loaded from a TOML file via [`AppConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// JSON-RPC endpoint of a node that manages the paying account.
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    /// The connected account. Without one, only profile search works.
    #[serde(default)]
    pub account: Option<ChainAddress>,

    /// Chain the node is on; picks the currency symbol and explorer.
    #[serde(default = "default_chain")]
    pub chain: Chain,

    /// Lens GraphQL endpoint.
    #[serde(default = "default_lens_api_url")]
    pub lens_api_url: String,

    /// Quiet period before a profile search is sent.
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Interval between transaction receipt polls.
    #[serde(default = "default_receipt_poll_ms")]
    pub receipt_poll_ms: u64,

    /// Where "home" and backing out of the wizard lead.
    #[serde(default = "default_dashboard_path")]
    pub dashboard_path: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_rpc_url() -> String {
    "http://127.0.0.1:8545".to_string()
}

fn default_chain() -> Chain {
    Chain::Polygon
}

fn default_lens_api_url() -> String {
    DEFAULT_LENS_API_URL.to_string()
}

fn default_search_debounce_ms() -> u64 {
    DEFAULT_SEARCH_DEBOUNCE_MS
}

fn default_receipt_poll_ms() -> u64 {
    2_000
}

fn default_dashboard_path() -> String {
    DEFAULT_DASHBOARD_PATH.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            account: None,
            chain: default_chain(),
            lens_api_url: default_lens_api_url(),
            search_debounce_ms: default_search_debounce_ms(),
            receipt_poll_ms: default_receipt_poll_ms(),
            dashboard_path: default_dashboard_path(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = AppConfig {
            account: Some(
                ChainAddress::parse("0x1111111111111111111111111111111111111111").unwrap(),
            ),
            ..AppConfig::default()
        };
        let toml_str = config.to_toml_string().unwrap();
        let parsed = AppConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = AppConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.chain, Chain::Polygon);
        assert_eq!(config.search_debounce_ms, 1_000);
        assert_eq!(config.dashboard_path, "/dashboard");
        assert_eq!(config.log_format, LogFormat::Human);
        assert!(config.account.is_none());
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            chain = "sepolia"
            search_debounce_ms = 250
            log_format = "json"
        "#;
        let config = AppConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.chain, Chain::Sepolia);
        assert_eq!(config.search_debounce_ms, 250);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.rpc_url, "http://127.0.0.1:8545"); // default
    }

    #[test]
    fn malformed_account_is_rejected() {
        let err = AppConfig::from_toml_str(r#"account = "0x123""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "receipt_poll_ms = 500").unwrap();
        let config = AppConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.receipt_poll_ms, 500);
    }

    #[test]
    fn missing_file_returns_read_error() {
        let result = AppConfig::from_toml_file("/nonexistent/luvpay.toml");
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
