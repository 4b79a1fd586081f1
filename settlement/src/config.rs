//! Configuration for the settlement engine

use serde::{Deserialize, Serialize};

/// Settlement engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Base currency used when the caller does not specify one
    pub default_base_currency: String,

    /// Reject expenses whose participant shares do not sum to the
    /// expense total instead of aggregating them as-is
    pub strict_share_validation: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_base_currency: "USD".to_string(),
            strict_share_validation: false,
        }
    }
}

impl EngineConfig {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: EngineConfig = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = EngineConfig::default();

        if let Ok(currency) = std::env::var("SETTLEMENT_BASE_CURRENCY") {
            config.default_base_currency = currency;
        }

        if let Ok(strict) = std::env::var("SETTLEMENT_STRICT_SHARES") {
            config.strict_share_validation = strict == "1" || strict.eq_ignore_ascii_case("true");
        }

        Ok(config)
    }
}
