//! Offline tooling for the zkbatch rollup ledger: raw proof decoding, public-input
//! derivation and event stream replay.

mod args;
mod util;

use std::process;

use anyhow::Context;
use zkbatch_common::logging::{self, format_service_name, FileLoggingConfig, LoggerConfig};
use zkbatch_config::{LoggingConfig, RollupConfig};

use crate::args::Args;

const SERVICE_NAME: &str = "zkbatch-cli";

fn main() {
    let args: Args = argh::from_env();
    if let Err(e) = run(args) {
        eprintln!("ERROR\n{e:?}");
        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = args
        .config
        .as_deref()
        .map(RollupConfig::load)
        .transpose()
        .context("failed to load configuration")?;

    let default_logging = LoggingConfig::default();
    let logging_config = config.as_ref().map_or(&default_logging, |c| &c.logging);
    init_logging(logging_config, args.json_logs);

    let out = util::exec_subc(args.subc, config.as_ref())?;
    println!("{out}");
    Ok(())
}

fn init_logging(config: &LoggingConfig, json_logs: bool) {
    let service_name = format_service_name(SERVICE_NAME, config.service_label.as_deref());
    let mut logger = LoggerConfig::new(service_name)
        .with_json_logging(json_logs || config.json_format)
        .with_stderr(true);

    if let Some(dir) = &config.log_dir {
        logger = logger.with_file_logging(
            FileLoggingConfig::new(dir.clone(), config.log_file_prefix.clone())
                .with_json_format(config.json_format),
        );
    }

    logging::init(logger);
}
