use crate::error::{IdxError, Result};
use crate::idx::ImageShape;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Where the MNIST files are fetched from when they are not found locally
pub const DEFAULT_BASE_URL: &str = "http://yann.lecun.com/exdb/mnist/";

/// Local directory the dataset files live in
pub const DEFAULT_DATA_DIR: &str = "data/";

/// Loader configuration.
///
/// Defaults to the MNIST constants; every field can be overridden from a JSON
/// file (missing fields keep their default) or from the command line.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DatasetConfig {
    pub base_url: String,
    pub data_dir: PathBuf,
    /// Expected rows per image
    pub rows: u32,
    /// Expected columns per image
    pub cols: u32,
    /// Training samples to load, `None` for the whole file
    pub train_count: Option<usize>,
    /// Test samples to load, `None` for the whole file
    pub test_count: Option<usize>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            rows: ImageShape::MNIST.rows,
            cols: ImageShape::MNIST.cols,
            train_count: None,
            test_count: None,
        }
    }
}

impl DatasetConfig {
    /// Load a configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json_str = fs::read_to_string(path)
            .map_err(|e| IdxError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let config: DatasetConfig = serde_json::from_str(&json_str)
            .map_err(|e| IdxError::Config(format!("cannot parse {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(IdxError::Config(format!(
                "image dimensions must be non-zero, got {}x{}",
                self.rows, self.cols
            )));
        }
        Ok(())
    }

    pub fn shape(&self) -> ImageShape {
        ImageShape::new(self.rows, self.cols)
    }
}
