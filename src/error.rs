//! Error types for IDX decoding and dataset assembly

use std::io;
use thiserror::Error;

/// Everything that can go wrong while turning IDX files into a dataset.
///
/// All variants are terminal for the call that raised them: no partial
/// dataset is ever returned alongside an error.
#[derive(Error, Debug)]
pub enum IdxError {
    #[error("{file}: invalid IDX file, expected magic 0x{expected:08X}, got 0x{found:08X}")]
    InvalidFormat {
        file: String,
        expected: u32,
        found: u32,
    },

    #[error(
        "{file}: unsupported image dimensions {rows}x{cols}, expected {expected_rows}x{expected_cols}"
    )]
    UnsupportedDimensions {
        file: String,
        rows: u32,
        cols: u32,
        expected_rows: u32,
        expected_cols: u32,
    },

    #[error("{file}: unable to read {requested} entries, file declares {available}")]
    InsufficientData {
        file: String,
        requested: usize,
        available: usize,
    },

    #[error("{file}: stream truncated at offset {offset}, needed {needed} bytes but only {available} remain")]
    TruncatedStream {
        file: String,
        offset: u64,
        needed: usize,
        available: usize,
    },

    #[error("label {label} has no one-hot encoding over {classes} classes")]
    LabelOutOfRange { label: u8, classes: usize },

    #[error("expected {expected} samples, {image_file} yielded {images} images and {label_file} yielded {labels} labels")]
    CountMismatch {
        image_file: String,
        label_file: String,
        expected: usize,
        images: usize,
        labels: usize,
    },

    #[error("no sample at index {index} in the {split} split")]
    SampleOutOfRange { split: String, index: usize },

    #[error("{file} is unavailable: {reason}")]
    SourceUnavailable { file: String, reason: String },

    #[error("I/O error while reading {file}: {source}")]
    Io { file: String, source: io::Error },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl IdxError {
    pub(crate) fn io(file: &str, source: io::Error) -> Self {
        IdxError::Io {
            file: file.to_string(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, IdxError>;
