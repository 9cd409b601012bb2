//! Readable byte streams of any length backed by one reused buffer.
//!
//! The buffer starts with a minimal single-pixel image and is padded
//! with random bytes. Streams copy from it circularly until their
//! declared size is served, which makes them cheap stand-ins for large
//! uploads in load tests.

pub mod buffer;
pub mod config;
pub mod errors;
pub mod header;
pub mod source;
pub mod stream;

pub use buffer::{BufferFactory, SharedBuffer};
pub use config::GeneratorConfig;
pub use errors::{Result, StreamError};
pub use header::{HeaderEncoder, HeaderFormat, ImageHeaderEncoder, NoHeader};
pub use source::StreamSource;
pub use stream::{CircularStream, ReadOutcome};

pub const KILOBYTE: usize = 1024;
pub const MEGABYTE: usize = 1024 * KILOBYTE;
pub const DEFAULT_BUFFER_CAPACITY: usize = 2 * MEGABYTE;
