use serde::{Deserialize, Serialize};

use crate::header::HeaderFormat;
use crate::{Result, StreamError, DEFAULT_BUFFER_CAPACITY};

/// Settings for building the backing buffer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Size of the backing buffer in bytes, must be positive.
    pub buffer_capacity: usize,
    pub header_format: HeaderFormat,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            header_format: HeaderFormat::default(),
        }
    }
}

impl GeneratorConfig {
    /// Parses and validates a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GeneratorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.buffer_capacity == 0 {
            return Err(StreamError::InvalidCapacity(self.buffer_capacity));
        }
        Ok(())
    }
}
