use log::Level;
use serde_json::Value;

use crate::app::RelayConfig;

/// Lifecycle hooks the relay reports through. Handed to the relay so tests
/// can observe them without capturing process output.
pub trait RelayLogger: Send + Sync {
    fn event(&self, event: &Value);
    fn response(&self, status: u16, body: &str);
    fn request_error(&self, message: &str);
}

/// Writes through the `log` facade at a single level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelLogger {
    level: Level,
}

impl LevelLogger {
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    /// `debug` in debug mode, `info` otherwise.
    pub fn for_config(config: &RelayConfig) -> Self {
        Self::new(if config.debug { Level::Debug } else { Level::Info })
    }

    pub fn level(&self) -> Level {
        self.level
    }
}

impl RelayLogger for LevelLogger {
    fn event(&self, event: &Value) {
        let pretty = serde_json::to_string_pretty(event).unwrap_or_else(|_| event.to_string());
        log::log!(self.level, "Event: {}", pretty);
    }

    fn response(&self, status: u16, body: &str) {
        log::log!(self.level, "Response Status: {}", status);
        log::log!(self.level, "Response Body: {}", body);
    }

    fn request_error(&self, message: &str) {
        log::log!(self.level, "Request Error: {}", message);
    }
}

/// Installs `env_logger` once per process. `RUST_LOG` wins over the default.
pub fn init(debug: bool) {
    let default_filter = if debug { "debug" } else { "info" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .try_init();
}
