//! Source acquisition: turning a file name into a `RawStream`.
//!
//! The decoders never see where bytes come from. `LocalSource` reads (and if
//! needed downloads) gzip files from a data directory; `InMemorySource` serves
//! byte buffers, which is what synthetic fixtures use.

use crate::config::DatasetConfig;
use crate::error::{IdxError, Result};
use crate::idx::RawStream;
use flate2::read::GzDecoder;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufReader, Cursor, Read};
use std::path::{Path, PathBuf};
use std::process::Command;

pub type BoxedReader = Box<dyn Read + Send>;

/// Anything that can hand out the byte stream of a named dataset file
pub trait Source {
    fn open(&self, file: &str) -> Result<RawStream<BoxedReader>>;
}

/// Retrieves a remote file to a local path
pub trait Fetch: Send + Sync {
    fn fetch(&self, url: &str, dest: &Path) -> io::Result<()>;
}

/// Downloads with the system `curl` binary.
///
/// The file is written next to `dest` first and renamed once complete, so an
/// interrupted download never looks like a present file.
pub struct CurlFetcher;

impl Fetch for CurlFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> io::Result<()> {
        let partial = dest.with_extension("part");
        let status = Command::new("curl")
            .args(["--fail", "--silent", "--show-error", "--location", "--output"])
            .arg(&partial)
            .arg(url)
            .status()?;

        if !status.success() {
            let _ = fs::remove_file(&partial);
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("curl exited with {}", status),
            ));
        }
        fs::rename(&partial, dest)
    }
}

/// Files under a local directory, fetched from `base_url` when missing.
///
/// Names ending in `.gz` are decompressed on the fly.
pub struct LocalSource {
    data_dir: PathBuf,
    base_url: String,
    fetcher: Option<Box<dyn Fetch>>,
}

impl LocalSource {
    /// A source that only reads what is already on disk
    pub fn new(data_dir: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            base_url: base_url.into(),
            fetcher: None,
        }
    }

    pub fn from_config(config: &DatasetConfig) -> Self {
        Self::new(config.data_dir.clone(), config.base_url.clone())
    }

    pub fn with_fetcher(mut self, fetcher: impl Fetch + 'static) -> Self {
        self.fetcher = Some(Box::new(fetcher));
        self
    }

    pub fn path_for(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    fn url_for(&self, file: &str) -> String {
        if self.base_url.ends_with('/') {
            format!("{}{}", self.base_url, file)
        } else {
            format!("{}/{}", self.base_url, file)
        }
    }

    fn ensure_present(&self, file: &str, path: &Path) -> Result<()> {
        if path.exists() {
            return Ok(());
        }

        let fetcher = self.fetcher.as_ref().ok_or_else(|| IdxError::SourceUnavailable {
            file: file.to_string(),
            reason: format!("{} does not exist and downloading is disabled", path.display()),
        })?;

        let url = self.url_for(file);
        let unavailable = |e: io::Error| IdxError::SourceUnavailable {
            file: file.to_string(),
            reason: format!("download from {} failed: {}", url, e),
        };

        fs::create_dir_all(&self.data_dir).map_err(unavailable)?;
        tracing::info!("Downloading {}", url);
        fetcher.fetch(&url, path).map_err(unavailable)?;
        tracing::info!("Done.");
        Ok(())
    }
}

impl Source for LocalSource {
    fn open(&self, file: &str) -> Result<RawStream<BoxedReader>> {
        let path = self.path_for(file);
        self.ensure_present(file, &path)?;

        let handle = File::open(&path).map_err(|e| IdxError::SourceUnavailable {
            file: file.to_string(),
            reason: format!("cannot open {}: {}", path.display(), e),
        })?;
        let reader = BufReader::new(handle);

        let inner: BoxedReader = if file.ends_with(".gz") {
            Box::new(GzDecoder::new(reader))
        } else {
            Box::new(reader)
        };
        Ok(RawStream::new(file, inner))
    }
}

/// Named in-memory buffers holding already-decompressed IDX bytes
#[derive(Debug, Default, Clone)]
pub struct InMemorySource {
    files: HashMap<String, Vec<u8>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, file: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.files.insert(file.into(), bytes);
        self
    }
}

impl Source for InMemorySource {
    fn open(&self, file: &str) -> Result<RawStream<BoxedReader>> {
        let bytes = self
            .files
            .get(file)
            .ok_or_else(|| IdxError::SourceUnavailable {
                file: file.to_string(),
                reason: "no such in-memory file".to_string(),
            })?;
        Ok(RawStream::new(file, Box::new(Cursor::new(bytes.clone()))))
    }
}
