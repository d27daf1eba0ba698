use std::sync::Once;

/// Logger configuration.
///
/// `filter` follows the `env_logger` directive syntax
/// (e.g. `"debug"`, `"bindery_engine=trace,warn"`). When unset, `RUST_LOG` is
/// consulted, then `default_level`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub filter: Option<String>,
    pub default_level: log::LevelFilter,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            default_level: log::LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// Config with an explicit filter string.
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self {
            filter: Some(filter.into()),
            ..Self::default()
        }
    }
}

static INIT: Once = Once::new();

/// Installs the global logger.
///
/// Idempotent: only the first call has any effect. Uses `try_init` so a logger
/// installed by a test harness or host application is left in place.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.filter {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => match std::env::var("RUST_LOG") {
                Ok(filter) => {
                    builder.parse_filters(&filter);
                }
                Err(_) => {
                    builder.filter_level(config.default_level);
                }
            },
        }

        builder.write_style(config.write_style);

        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        init_logging(LoggingConfig::with_filter("warn"));
        init_logging(LoggingConfig::default());
    }

    #[test]
    fn default_level_is_info() {
        let config = LoggingConfig::default();
        assert_eq!(config.default_level, log::LevelFilter::Info);
        assert!(config.filter.is_none());
    }
}
