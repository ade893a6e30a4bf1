use crate::error::{IdxError, Result};
use byteorder::{BigEndian, ByteOrder};
use std::io::Read;

/// Forward-only reader over a decompressed IDX byte stream.
///
/// The stream remembers which file it came from and how far it has been read,
/// so decode errors can point at the offending file and offset.
pub struct RawStream<R> {
    file: String,
    inner: R,
    offset: u64,
}

impl<R: Read> RawStream<R> {
    pub fn new(file: impl Into<String>, inner: R) -> Self {
        Self {
            file: file.into(),
            inner,
            offset: 0,
        }
    }

    /// Name of the file this stream was opened from
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Number of bytes consumed so far
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Read a big-endian `u32` and advance the cursor by 4 bytes.
    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(BigEndian::read_u32(&bytes))
    }

    /// Read exactly `len` bytes.
    ///
    /// Fails with `TruncatedStream` if the stream ends first. The cursor only
    /// moves on success.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        (&mut self.inner)
            .take(len as u64)
            .read_to_end(&mut buf)
            .map_err(|e| IdxError::io(&self.file, e))?;

        if buf.len() < len {
            return Err(IdxError::TruncatedStream {
                file: self.file.clone(),
                offset: self.offset,
                needed: len,
                available: buf.len(),
            });
        }

        self.offset += len as u64;
        Ok(buf)
    }
}
