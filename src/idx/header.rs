//! IDX header: magic number, record count and per-record dimensions.
//!
//! Layout (big-endian throughout):
//!   - image file: `[magic=0x00000803][count][rows][cols]`
//!   - label file: `[magic=0x00000801][count]`

use super::stream::RawStream;
use crate::error::{IdxError, Result};
use std::io::Read;

/// Magic number of an image file (unsigned bytes, 3 dimensions)
pub const IMAGE_MAGIC: u32 = 0x0000_0803;

/// Magic number of a label file (unsigned bytes, 1 dimension)
pub const LABEL_MAGIC: u32 = 0x0000_0801;

/// Size of a header field in bytes
pub const FIELD_SIZE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Image,
    Label,
}

impl RecordKind {
    pub fn magic(&self) -> u32 {
        match self {
            RecordKind::Image => IMAGE_MAGIC,
            RecordKind::Label => LABEL_MAGIC,
        }
    }

    /// Number of dimension fields following the record count
    pub fn dimension_count(&self) -> usize {
        match self {
            RecordKind::Image => 2,
            RecordKind::Label => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Image => "image",
            RecordKind::Label => "label",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub magic: u32,
    /// Number of records the file declares
    pub count: u32,
    /// `[rows, cols]` for image files, empty for label files
    pub dimensions: Vec<u32>,
}

impl Header {
    pub fn new(kind: RecordKind, count: u32, dimensions: Vec<u32>) -> Self {
        Self {
            magic: kind.magic(),
            count,
            dimensions,
        }
    }

    /// Read a full header, validating the magic number first.
    pub fn read<R: Read>(stream: &mut RawStream<R>, kind: RecordKind) -> Result<Self> {
        validate_magic(stream, kind)?;
        let count = stream.read_u32()?;
        let dimensions = (0..kind.dimension_count())
            .map(|_| stream.read_u32())
            .collect::<Result<Vec<u32>>>()?;

        tracing::debug!(
            "{}: {} header, {} records, dimensions {:?}",
            stream.file(),
            kind.as_str(),
            count,
            dimensions
        );

        Ok(Self {
            magic: kind.magic(),
            count,
            dimensions,
        })
    }

    /// Size of one record in bytes (product of the dimensions, 1 for labels)
    pub fn record_len(&self) -> usize {
        self.dimensions.iter().map(|&d| d as usize).product()
    }

    /// Serialize back to the on-disk layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(FIELD_SIZE * (2 + self.dimensions.len()));
        bytes.extend_from_slice(&self.magic.to_be_bytes());
        bytes.extend_from_slice(&self.count.to_be_bytes());
        for dim in &self.dimensions {
            bytes.extend_from_slice(&dim.to_be_bytes());
        }
        bytes
    }
}

/// Check the leading magic number against the expected record kind.
///
/// Nothing past the first 4 bytes is read, whatever the outcome.
pub fn validate_magic<R: Read>(stream: &mut RawStream<R>, kind: RecordKind) -> Result<()> {
    let found = stream.read_u32()?;
    if found != kind.magic() {
        return Err(IdxError::InvalidFormat {
            file: stream.file().to_string(),
            expected: kind.magic(),
            found,
        });
    }
    Ok(())
}
