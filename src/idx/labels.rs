use super::header::{Header, RecordKind};
use super::resolve_count;
use super::stream::RawStream;
use crate::error::{IdxError, Result};
use std::io::Read;

/// Number of digit classes
pub const CLASS_COUNT: usize = 10;

/// One-hot encoding of a label: 1.0 at the class index, 0.0 elsewhere
pub type OneHot = [f32; CLASS_COUNT];

/// A class identifier, stored as read from the file.
///
/// Decoding does not check the value range; `one_hot` does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelRecord(u8);

impl LabelRecord {
    pub fn new(value: u8) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn one_hot(&self) -> Result<OneHot> {
        let index = self.0 as usize;
        if index >= CLASS_COUNT {
            return Err(IdxError::LabelOutOfRange {
                label: self.0,
                classes: CLASS_COUNT,
            });
        }
        let mut e = [0.0; CLASS_COUNT];
        e[index] = 1.0;
        Ok(e)
    }
}

/// Decode the label records of an IDX label file, one byte per label.
pub fn decode_labels<R: Read>(
    stream: &mut RawStream<R>,
    requested: Option<usize>,
) -> Result<Vec<LabelRecord>> {
    let header = Header::read(stream, RecordKind::Label)?;
    let count = resolve_count(stream.file(), requested, header.count)?;
    let payload = stream.read_bytes(count)?;

    Ok(payload.into_iter().map(LabelRecord::new).collect())
}

/// Expand every label into its one-hot vector, failing on the first label
/// outside `0..CLASS_COUNT`.
pub fn one_hot_all(labels: &[LabelRecord]) -> Result<Vec<OneHot>> {
    labels.iter().map(LabelRecord::one_hot).collect()
}

/// Build an IDX label file in memory from raw label values.
pub fn encode_labels(labels: &[u8]) -> Vec<u8> {
    let header = Header::new(RecordKind::Label, labels.len() as u32, Vec::new());
    let mut bytes = header.to_bytes();
    bytes.extend_from_slice(labels);
    bytes
}
