use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::header::{HeaderEncoder, ImageHeaderEncoder};
use crate::{Result, StreamError, DEFAULT_BUFFER_CAPACITY};

static PROCESS_BUFFER: OnceCell<SharedBuffer> = OnceCell::new();

/// Immutable backing bytes shared by any number of streams.
///
/// The first `header_len` bytes hold the encoded image header, the rest
/// is random filler. Cloning only bumps a reference count.
#[derive(Clone)]
pub struct SharedBuffer {
    bytes: Arc<[u8]>,
    header_len: usize,
}

impl SharedBuffer {
    /// Wraps caller-provided bytes with no header. Fails on empty input,
    /// a stream cannot wrap around nothing.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes: Vec<u8> = bytes.into();
        if bytes.is_empty() {
            return Err(StreamError::InvalidCapacity(0));
        }
        Ok(Self {
            bytes: bytes.into(),
            header_len: 0,
        })
    }

    /// The default 2 MiB buffer, built on first use and shared for the
    /// rest of the process lifetime.
    pub fn process_default() -> Self {
        PROCESS_BUFFER
            .get_or_init(|| {
                log::debug!("Building process-wide buffer");
                BufferFactory::default().build()
            })
            .clone()
    }

    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    pub fn header_len(&self) -> usize {
        self.header_len
    }

    pub fn header(&self) -> &[u8] {
        &self.bytes[..self.header_len]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for SharedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedBuffer")
            .field("capacity", &self.capacity())
            .field("header_len", &self.header_len)
            .finish()
    }
}

/// Builds a [`SharedBuffer`] of a fixed capacity.
pub struct BufferFactory {
    capacity: usize,
    encoder: Box<dyn HeaderEncoder>,
}

impl Default for BufferFactory {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_BUFFER_CAPACITY,
            encoder: Box::new(ImageHeaderEncoder::default()),
        }
    }
}

impl BufferFactory {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(StreamError::InvalidCapacity(capacity));
        }
        Ok(Self {
            capacity,
            ..Self::default()
        })
    }

    /// Replaces the header collaborator.
    pub fn with_encoder(mut self, encoder: impl HeaderEncoder + 'static) -> Self {
        self.encoder = Box::new(encoder);
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Encodes the header and fills the remainder with random bytes.
    ///
    /// Never fails: a broken encoder yields an empty header, and a header
    /// longer than the capacity is truncated to fit.
    pub fn build(&self) -> SharedBuffer {
        let mut header = match self.encoder.encode() {
            Ok(header) => header,
            Err(e) => {
                log::warn!("Header encoding failed, using random bytes only: {}", e);
                Vec::new()
            }
        };

        if header.len() > self.capacity {
            log::warn!(
                "Header of {} bytes exceeds buffer capacity {}, truncating",
                header.len(),
                self.capacity
            );
            header.truncate(self.capacity);
        }

        let header_len = header.len();
        let mut bytes = header;
        bytes.resize(self.capacity, 0);
        fastrand::fill(&mut bytes[header_len..]);

        log::debug!(
            "Built buffer of {} bytes ({} header, {} filler)",
            self.capacity,
            header_len,
            self.capacity - header_len
        );

        SharedBuffer {
            bytes: bytes.into(),
            header_len,
        }
    }
}
