//! IDX binary format decoding
//!
//! A decode call owns one `RawStream` and makes a single forward pass over it:
//! header first, then the record payload. Nothing is returned unless every
//! check passes.

pub mod header;
pub mod images;
pub mod labels;
pub mod stream;

pub use header::{validate_magic, Header, RecordKind, IMAGE_MAGIC, LABEL_MAGIC};
pub use images::{decode_images, encode_images, ImageRecord, ImageShape};
pub use labels::{decode_labels, encode_labels, one_hot_all, LabelRecord, OneHot, CLASS_COUNT};
pub use stream::RawStream;

use crate::error::{IdxError, Result};

/// Number of records to read: everything when `requested` is `None`, otherwise
/// `requested` as long as the file declares at least that many.
pub(crate) fn resolve_count(file: &str, requested: Option<usize>, declared: u32) -> Result<usize> {
    let declared = declared as usize;
    match requested {
        None => Ok(declared),
        Some(n) if n > declared => Err(IdxError::InsufficientData {
            file: file.to_string(),
            requested: n,
            available: declared,
        }),
        Some(n) => Ok(n),
    }
}
