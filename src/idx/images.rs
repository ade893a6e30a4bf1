use super::header::{Header, RecordKind};
use super::resolve_count;
use super::stream::RawStream;
use crate::error::{IdxError, Result};
use std::io::Read;

/// Grey ramp from background (0) to full ink (255)
const ASCII_RAMP: &[u8] = b" .:-=+*#%@";

/// Rows and columns every image in a file must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageShape {
    pub rows: u32,
    pub cols: u32,
}

impl ImageShape {
    /// 28x28, the only size the MNIST family ships
    pub const MNIST: ImageShape = ImageShape { rows: 28, cols: 28 };

    pub fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    pub fn pixel_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

impl Default for ImageShape {
    fn default() -> Self {
        Self::MNIST
    }
}

/// One image: `rows * cols` pixel intensities (0-255), row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pixels: Vec<u8>,
}

impl ImageRecord {
    pub fn new(pixels: Vec<u8>) -> Self {
        Self { pixels }
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Draw the image as text, one line per pixel row, darker characters
    /// for higher intensities.
    pub fn render_ascii(&self, shape: ImageShape) -> String {
        let cols = (shape.cols as usize).max(1);
        let mut out = String::with_capacity(self.pixels.len() + shape.rows as usize);
        for row in self.pixels.chunks(cols) {
            for &p in row {
                let level = p as usize * (ASCII_RAMP.len() - 1) / 255;
                out.push(ASCII_RAMP[level] as char);
            }
            out.push('\n');
        }
        out
    }
}

/// Decode the image records of an IDX image file.
///
/// `requested = None` reads every record the file declares. Records are
/// returned in file order.
pub fn decode_images<R: Read>(
    stream: &mut RawStream<R>,
    requested: Option<usize>,
    shape: ImageShape,
) -> Result<Vec<ImageRecord>> {
    let header = Header::read(stream, RecordKind::Image)?;
    let (rows, cols) = (header.dimensions[0], header.dimensions[1]);

    if rows != shape.rows || cols != shape.cols || shape.pixel_count() == 0 {
        return Err(IdxError::UnsupportedDimensions {
            file: stream.file().to_string(),
            rows,
            cols,
            expected_rows: shape.rows,
            expected_cols: shape.cols,
        });
    }

    let count = resolve_count(stream.file(), requested, header.count)?;
    let record_len = shape.pixel_count();
    let payload = stream.read_bytes(count * record_len)?;

    Ok(payload
        .chunks_exact(record_len)
        .map(|chunk| ImageRecord::new(chunk.to_vec()))
        .collect())
}

/// Build an IDX image file in memory from `records`.
///
/// Every record must hold exactly `shape.pixel_count()` bytes; the decoder
/// will reject the result otherwise.
pub fn encode_images(records: &[ImageRecord], shape: ImageShape) -> Vec<u8> {
    let header = Header::new(
        RecordKind::Image,
        records.len() as u32,
        vec![shape.rows, shape.cols],
    );
    let mut bytes = header.to_bytes();
    bytes.reserve(records.len() * shape.pixel_count());
    for record in records {
        bytes.extend_from_slice(record.pixels());
    }
    bytes
}
