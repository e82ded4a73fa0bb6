//! Logging initialization.

use std::io;

use tracing::*;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{fmt::layer, layer::SubscriberExt, util::SubscriberInitExt, Layer};

use super::types::LoggerConfig;

/// Initializes the logging subsystem with the provided config.
///
/// Defaults to `INFO`; `RUST_LOG` overrides it.
pub fn init(config: LoggerConfig) {
    let filt = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    // Configure console logging with JSON or compact format
    let stdout = &config.stdout_config;
    let stdout_sub = match (stdout.json_format, stdout.stderr) {
        (true, false) => layer()
            .json()
            .with_span_events(stdout.fmt_span.clone())
            .with_filter(filt.clone())
            .boxed(),
        (true, true) => layer()
            .json()
            .with_writer(io::stderr)
            .with_span_events(stdout.fmt_span.clone())
            .with_filter(filt.clone())
            .boxed(),
        (false, false) => layer()
            .compact()
            .with_span_events(stdout.fmt_span.clone())
            .with_filter(filt.clone())
            .boxed(),
        (false, true) => layer()
            .compact()
            .with_writer(io::stderr)
            .with_span_events(stdout.fmt_span.clone())
            .with_filter(filt.clone())
            .boxed(),
    };

    // Build optional file logging layer
    let file_layer = config.file_logging_config.as_ref().map(|file_config| {
        let file_appender = RollingFileAppender::new(
            file_config.rotation.clone(),
            &file_config.directory,
            &file_config.file_name_prefix,
        );

        if file_config.json_format {
            layer()
                .json()
                .with_writer(file_appender)
                .with_ansi(false) // No color codes in files
                .with_filter(filt.clone())
                .boxed()
        } else {
            layer()
                .compact()
                .with_writer(file_appender)
                .with_ansi(false) // No color codes in files
                .with_filter(filt.clone())
                .boxed()
        }
    });

    tracing_subscriber::registry()
        .with(stdout_sub)
        .with(file_layer)
        .init();

    info!(
        service_name = %config.service_name,
        file_logging = config.file_logging_config.is_some(),
        "logging initialized"
    );
}
