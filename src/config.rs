/// Coordinator settings stored in chrome.storage.local
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CoordinatorError, Result};
use crate::menu::MenuPolicy;

pub const CONFIG_STORAGE_KEY: &str = "bookmark_helper_config";

pub const DEFAULT_HOST_TIMEOUT_MS: u32 = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoordinatorConfig {
    pub menu_policy: MenuPolicy,
    pub host_timeout_ms: u32,
    pub log_level: String,
}

impl CoordinatorConfig {
    pub fn new() -> Self {
        CoordinatorConfig {
            menu_policy: MenuPolicy::default(),
            host_timeout_ms: DEFAULT_HOST_TIMEOUT_MS,
            log_level: "info".to_string(),
        }
    }

    /// Build from whatever `chrome.storage.local.get` returned for [`CONFIG_STORAGE_KEY`].
    /// Nothing stored yet means defaults.
    pub fn from_storage(value: Option<Value>) -> Result<Self> {
        let config = match value {
            None | Some(Value::Null) => CoordinatorConfig::new(),
            Some(value) => serde_json::from_value(value)
                .map_err(|e| CoordinatorError::Config(e.to_string()))?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.host_timeout_ms == 0 {
            return Err(CoordinatorError::Config(
                "hostTimeoutMs must be greater than zero".to_string(),
            ));
        }
        self.level_filter()?;
        Ok(())
    }

    pub fn level_filter(&self) -> Result<LevelFilter> {
        self.log_level
            .parse::<LevelFilter>()
            .map_err(|_| CoordinatorError::Config(format!("unknown logLevel {:?}", self.log_level)))
    }
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self::new()
    }
}
