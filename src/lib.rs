pub mod config;
pub mod error;
pub mod idx;
pub mod mnist_dataset;
pub mod source;

pub use config::DatasetConfig;
pub use error::{IdxError, Result};
pub use mnist_dataset::{Dataset, DatasetLoader, Split};
