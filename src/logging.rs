//! Logger initialization
//!
//! Everything logs through the `log` facade; the binary installs
//! `env_logger` once at startup.

use std::sync::Once;

/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "mode13=debug,macroquad=warn").
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Install the global logger. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder.write_style(config.write_style);
        builder.init();

        log::debug!("logging initialized");
    });
}
