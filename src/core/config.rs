//! Logger configuration
//!
//! [`LoggerConfig`] is a plain serde value so a host application can embed it
//! in whatever configuration it already loads. Missing fields take their
//! defaults. Apply it with [`LoggerBuilder::from_config`](super::LoggerBuilder::from_config).

use super::formatter::Preset;
use super::log_level::LogLevel;
use super::worker::DEFAULT_QUEUE_CAPACITY;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub enabled: bool,
    pub min_level: LogLevel,
    pub preset: Preset,
    pub queue_capacity: usize,
    /// Colour console output by level
    pub colors: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_level: LogLevel::Debug,
            preset: Preset::Default,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            colors: false,
        }
    }
}
