//! Configuration for a zkbatch ledger instance.

mod config;
mod errors;

pub use config::{LedgerParams, LoggingConfig, RollupConfig};
pub use errors::{ConfigError, ConfigResult};
