use std::cmp::min;
use std::io::{self, Read};

use crate::buffer::SharedBuffer;

/// Result of a single bulk read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// This many bytes were written into the destination.
    Read(usize),
    /// Nothing is left, the stream is exhausted.
    Eof,
}

impl ReadOutcome {
    pub fn is_eof(&self) -> bool {
        matches!(self, ReadOutcome::Eof)
    }
}

/// Linear, EOF-terminated view over a [`SharedBuffer`] of any declared
/// length. Bytes past the buffer end are taken again from its start, so
/// output position `i` always holds `buffer[i % capacity]`.
#[derive(Debug, Clone)]
pub struct CircularStream {
    buffer: SharedBuffer,
    declared_size: u64,
    cursor: u64,
}

impl CircularStream {
    pub fn new(buffer: SharedBuffer, declared_size: u64) -> Self {
        log::trace!(
            "New stream of {} bytes over a {} bytes buffer",
            declared_size,
            buffer.capacity()
        );
        Self {
            buffer,
            declared_size,
            cursor: 0,
        }
    }

    /// Stream yielding the buffer exactly once.
    pub fn with_buffer_size(buffer: SharedBuffer) -> Self {
        let size = buffer.capacity() as u64;
        Self::new(buffer, size)
    }

    /// Copies up to `max_length` bytes into `destination[offset..]`.
    ///
    /// Returns [`ReadOutcome::Eof`] once the declared size has been served,
    /// without touching `destination`. A zero-length request on an active
    /// stream is `Read(0)`.
    ///
    /// # Panics
    ///
    /// If `offset + max_length` exceeds `destination.len()`.
    pub fn read_into(
        &mut self,
        destination: &mut [u8],
        offset: usize,
        max_length: usize,
    ) -> ReadOutcome {
        assert!(
            offset
                .checked_add(max_length)
                .map_or(false, |end| end <= destination.len()),
            "read of {} bytes at offset {} overflows destination of {} bytes",
            max_length,
            offset,
            destination.len()
        );

        if self.is_exhausted() {
            return ReadOutcome::Eof;
        }

        let amount = min(max_length as u64, self.bytes_remaining()) as usize;
        let target = &mut destination[offset..offset + amount];
        let source = self.buffer.as_bytes();
        let capacity = source.len();

        let mut position = (self.cursor % capacity as u64) as usize;
        let mut copied = 0;
        while copied < amount {
            let segment = min(amount - copied, capacity - position);
            target[copied..copied + segment]
                .copy_from_slice(&source[position..position + segment]);
            copied += segment;
            position = 0;
        }

        self.cursor += amount as u64;
        log::trace!(
            "Read {} bytes, {} of {} remaining",
            amount,
            self.bytes_remaining(),
            self.declared_size
        );
        if self.is_exhausted() {
            log::debug!("Stream of {} bytes exhausted", self.declared_size);
        }

        ReadOutcome::Read(amount)
    }

    /// Next byte, or `None` at end of stream.
    pub fn read_byte(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        match self.read_into(&mut byte, 0, 1) {
            ReadOutcome::Read(1) => Some(byte[0]),
            _ => None,
        }
    }

    pub fn bytes_remaining(&self) -> u64 {
        self.declared_size - self.cursor
    }

    pub fn declared_size(&self) -> u64 {
        self.declared_size
    }

    pub fn position(&self) -> u64 {
        self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor == self.declared_size
    }

    pub fn buffer(&self) -> &SharedBuffer {
        &self.buffer
    }
}

impl Read for CircularStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let len = buf.len();
        match self.read_into(buf, 0, len) {
            ReadOutcome::Read(n) => Ok(n),
            ReadOutcome::Eof => Ok(0),
        }
    }
}
