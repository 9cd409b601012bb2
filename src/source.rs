use crate::buffer::{BufferFactory, SharedBuffer};
use crate::config::GeneratorConfig;
use crate::header::ImageHeaderEncoder;
use crate::stream::CircularStream;
use crate::Result;

/// Owns one [`SharedBuffer`] and hands out streams reading from it.
#[derive(Clone, Debug)]
pub struct StreamSource {
    buffer: SharedBuffer,
}

impl StreamSource {
    /// Validates `config` and builds the buffer once.
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        config.validate()?;
        let buffer = BufferFactory::new(config.buffer_capacity)?
            .with_encoder(ImageHeaderEncoder::new(config.header_format))
            .build();
        Ok(Self::from_buffer(buffer))
    }

    pub fn from_buffer(buffer: SharedBuffer) -> Self {
        Self { buffer }
    }

    /// Stream of exactly `declared_size` bytes.
    pub fn stream(&self, declared_size: u64) -> CircularStream {
        CircularStream::new(self.buffer.clone(), declared_size)
    }

    /// Stream as long as the buffer itself.
    pub fn default_stream(&self) -> CircularStream {
        CircularStream::with_buffer_size(self.buffer.clone())
    }

    pub fn buffer(&self) -> &SharedBuffer {
        &self.buffer
    }
}

impl Default for StreamSource {
    fn default() -> Self {
        Self::from_buffer(SharedBuffer::process_default())
    }
}
