use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use serde::{Deserialize, Serialize};

use crate::Result;

/// Produces the bytes placed at the very beginning of a generated buffer.
///
/// The output length is not fixed, callers must measure it. Implemented
/// for plain closures so tests can substitute a stub.
pub trait HeaderEncoder: Send + Sync {
    fn encode(&self) -> Result<Vec<u8>>;
}

impl<F> HeaderEncoder for F
where
    F: Fn() -> Result<Vec<u8>> + Send + Sync,
{
    fn encode(&self) -> Result<Vec<u8>> {
        self()
    }
}

/// Image container used for the buffer header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderFormat {
    #[default]
    Gif,
    Png,
    Bmp,
}

impl From<HeaderFormat> for ImageFormat {
    fn from(value: HeaderFormat) -> Self {
        match value {
            HeaderFormat::Gif => ImageFormat::Gif,
            HeaderFormat::Png => ImageFormat::Png,
            HeaderFormat::Bmp => ImageFormat::Bmp,
        }
    }
}

/// Encodes a single black pixel with the `image` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageHeaderEncoder {
    pub format: HeaderFormat,
}

impl ImageHeaderEncoder {
    pub fn new(format: HeaderFormat) -> Self {
        Self { format }
    }
}

impl HeaderEncoder for ImageHeaderEncoder {
    fn encode(&self) -> Result<Vec<u8>> {
        let canvas = GrayImage::from_pixel(1, 1, Luma([0u8]));
        let mut cursor = Cursor::new(Vec::new());
        DynamicImage::ImageLuma8(canvas)
            .write_to(&mut cursor, ImageFormat::from(self.format))?;

        let bytes = cursor.into_inner();
        log::trace!(
            "Encoded {:?} header of {} bytes",
            self.format,
            bytes.len()
        );
        Ok(bytes)
    }
}

/// Encoder yielding nothing, so the whole buffer is random filler.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHeader;

impl HeaderEncoder for NoHeader {
    fn encode(&self) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }
}
