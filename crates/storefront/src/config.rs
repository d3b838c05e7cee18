//! Application configuration loaded from environment variables.

use std::time::Duration;

use checkout::CheckoutConfig;
use orders::TrackerConfig;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// Storefront configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT`: `pretty` or `json` (default: `pretty`)
/// - `CHECKOUT_PROCESSING_DELAY_MS`: simulated order processing (default: `2000`)
/// - `ORDER_LOOKUP_DELAY_MS`: simulated order lookup (default: `1000`)
/// - `ORDER_CANCEL_DELAY_MS`: simulated order cancellation (default: `1000`)
/// - `CANCELLATION_WINDOW_MINUTES`: how long orders stay cancellable (default: `120`)
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub log_format: LogFormat,
    pub checkout: CheckoutConfig,
    pub tracker: TrackerConfig,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, falling back to defaults for
    /// missing or unparsable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let millis = |key: &str, default: Duration| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(default)
        };

        let checkout = CheckoutConfig {
            processing_delay: millis(
                "CHECKOUT_PROCESSING_DELAY_MS",
                defaults.checkout.processing_delay,
            ),
        };
        let tracker = TrackerConfig {
            lookup_delay: millis("ORDER_LOOKUP_DELAY_MS", defaults.tracker.lookup_delay),
            cancel_delay: millis("ORDER_CANCEL_DELAY_MS", defaults.tracker.cancel_delay),
            cancellation_window: lookup("CANCELLATION_WINDOW_MINUTES")
                .and_then(|v| v.trim().parse::<i64>().ok())
                .filter(|minutes| *minutes >= 0)
                .map(chrono::Duration::minutes)
                .unwrap_or(defaults.tracker.cancellation_window),
        };

        Self {
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: lookup("LOG_FORMAT")
                .map(|v| LogFormat::parse(&v))
                .unwrap_or_default(),
            checkout,
            tracker,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            checkout: CheckoutConfig::default(),
            tracker: TrackerConfig::default(),
        }
    }
}
