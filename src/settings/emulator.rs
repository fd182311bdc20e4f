use config::ConfigError;
use serde::Deserialize;

use crate::Result;

/// Tuning for the in-process emulator stub
#[derive(Debug, Deserialize, Clone)]
pub struct EmulatorConfig {
    /// Rows buffered between the producer task and a read stream
    #[serde(default = "default_stream_buffer")]
    pub stream_buffer: usize,

    /// Approximate bytes between two sampled row keys
    #[serde(default = "default_sample_interval_bytes")]
    pub sample_interval_bytes: u64,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            stream_buffer: default_stream_buffer(),
            sample_interval_bytes: default_sample_interval_bytes(),
        }
    }
}

impl EmulatorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.stream_buffer == 0 {
            return Err(ConfigError::Message(
                "emulator.stream_buffer must be greater than 0".into(),
            )
            .into());
        }
        if self.sample_interval_bytes == 0 {
            return Err(ConfigError::Message(
                "emulator.sample_interval_bytes must be greater than 0".into(),
            )
            .into());
        }
        Ok(())
    }
}

fn default_stream_buffer() -> usize {
    64
}
fn default_sample_interval_bytes() -> u64 {
    64 * 1024
}
