//! TOML configuration for a ledger instance and its logging.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use zkbatch_primitives::{Address, StateRoot};

use crate::{ConfigError, ConfigResult};

/// Default prefix for log file names.
const DEFAULT_LOG_FILE_PREFIX: &str = "zkbatch";

fn default_log_file_prefix() -> String {
    DEFAULT_LOG_FILE_PREFIX.to_owned()
}

/// Ledger instance parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerParams {
    /// The only identity allowed to submit batches and rotate the verifier.
    pub sequencer: Address,

    /// State root before the first batch. Defaults to all zeroes.
    #[serde(default)]
    pub genesis_state_root: StateRoot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Service label to append to the service name (e.g., "prod", "dev").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_label: Option<String>,

    /// Directory path for file-based logging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    /// Prefix for log file names.
    #[serde(default = "default_log_file_prefix")]
    pub log_file_prefix: String,

    /// Use JSON format for logs instead of compact format.
    #[serde(default)]
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            service_label: None,
            log_dir: None,
            log_file_prefix: default_log_file_prefix(),
            json_format: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollupConfig {
    pub ledger: LedgerParams,

    /// Logging configuration (optional section in TOML).
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RollupConfig {
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> ConfigResult<Self> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.ledger.sequencer.is_zero() {
            return Err(ConfigError::ZeroSequencer);
        }
        Ok(())
    }
}
