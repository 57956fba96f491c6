//! Structured logging and tracing for tesla-fleet
//!
//! Console output through `tracing-subscriber`, filtered by `RUST_LOG` when
//! set and by the configured level otherwise.

use crate::config::LoggingConfig;
use crate::error::{FleetError, Result};
use once_cell::sync::OnceCell;
use std::sync::Once;
use tracing::{Level, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod level;
mod structured;

pub use level::parse_log_level;
pub use structured::{LogContext, StructuredLogger, get_logger, get_logger_with_context};

static INIT_ONCE: Once = Once::new();
static INIT_ERROR: OnceCell<String> = OnceCell::new();

/// Initialize logging system based on configuration
///
/// Only the first call installs a subscriber; later calls report the outcome
/// of that first attempt.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    INIT_ONCE.call_once(|| {
        let init_result = (|| -> Result<()> {
            let level = parse_log_level(&config.level)?;
            let filter = build_env_filter(level);

            let console_layer = {
                let layer = fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false);
                if config.json_format {
                    layer
                        .json()
                        .with_filter(LevelFilter::from_level(level))
                        .boxed()
                } else {
                    layer.with_filter(LevelFilter::from_level(level)).boxed()
                }
            };

            tracing_subscriber::registry()
                .with(filter)
                .with(console_layer)
                .try_init()
                .map_err(|e| FleetError::config(format!("failed to install subscriber: {}", e)))?;

            info!("Logging initialized - level: {:?}, json: {}", level, config.json_format);
            Ok(())
        })();

        if let Err(e) = init_result {
            let _ = INIT_ERROR.set(e.to_string());
        }
    });

    if let Some(err) = INIT_ERROR.get() {
        return Err(FleetError::config(err.clone()));
    }
    Ok(())
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("tesla_fleet={},reqwest=warn", level).into())
}
