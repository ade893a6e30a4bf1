use crate::config::DatasetConfig;
use crate::error::{IdxError, Result};
use crate::idx::{
    decode_images, decode_labels, ImageRecord, ImageShape, LabelRecord, CLASS_COUNT,
};
use crate::source::{CurlFetcher, LocalSource, Source};
use ndarray::prelude::*;
use std::collections::BTreeMap;

pub const TRAIN_IMAGES: &str = "train-images-idx3-ubyte.gz";
pub const TRAIN_LABELS: &str = "train-labels-idx1-ubyte.gz";
pub const TEST_IMAGES: &str = "t10k-images-idx3-ubyte.gz";
pub const TEST_LABELS: &str = "t10k-labels-idx1-ubyte.gz";

pub const TRAIN_LEN: usize = 60_000;
pub const TEST_LEN: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    Train,
    Test,
}

impl Split {
    /// (image file, label file)
    pub fn files(&self) -> (&'static str, &'static str) {
        match self {
            Split::Train => (TRAIN_IMAGES, TRAIN_LABELS),
            Split::Test => (TEST_IMAGES, TEST_LABELS),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Test => "test",
        }
    }

    /// Number of samples the published MNIST files hold
    pub fn standard_len(&self) -> usize {
        match self {
            Split::Train => TRAIN_LEN,
            Split::Test => TEST_LEN,
        }
    }
}

/// Image/label pairs in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    samples: Vec<(ImageRecord, LabelRecord)>,
    shape: ImageShape,
}

impl Dataset {
    pub fn new(samples: Vec<(ImageRecord, LabelRecord)>, shape: ImageShape) -> Self {
        Self { samples, shape }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn shape(&self) -> ImageShape {
        self.shape
    }

    pub fn get(&self, index: usize) -> Option<&(ImageRecord, LabelRecord)> {
        self.samples.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(ImageRecord, LabelRecord)> {
        self.samples.iter()
    }

    /// Raw label values in sample order
    pub fn labels(&self) -> Vec<u8> {
        self.samples.iter().map(|(_, label)| label.value()).collect()
    }

    /// (n_samples, rows * cols) array of raw pixel values
    pub fn raw_images_array(&self) -> Array2<u8> {
        let pixels = self.shape.pixel_count();
        Array2::from_shape_fn((self.len(), pixels), |(i, j)| {
            self.samples[i].0.pixels()[j]
        })
    }

    /// (n_samples, rows * cols) array with pixels scaled to [0, 1]
    pub fn images_array(&self) -> Array2<f32> {
        self.raw_images_array().mapv(|x| x as f32 / 255.0)
    }

    /// (n_samples, CLASS_COUNT) array of one-hot label vectors.
    ///
    /// Fails on the first label outside the class range.
    pub fn one_hot_labels(&self) -> Result<Array2<f32>> {
        let mut out = Array2::<f32>::zeros((self.len(), CLASS_COUNT));
        for (mut row, (_, label)) in out.rows_mut().into_iter().zip(&self.samples) {
            let hot = label.one_hot()?;
            row.assign(&ArrayView1::from(&hot));
        }
        Ok(out)
    }

    /// Number of samples per label value
    pub fn label_counts(&self) -> BTreeMap<u8, usize> {
        let mut counts = BTreeMap::new();
        for (_, label) in &self.samples {
            *counts.entry(label.value()).or_insert(0) += 1;
        }
        counts
    }

    /// Draw one image as text, one line per pixel row.
    pub fn render_ascii(&self, index: usize) -> Option<String> {
        let (image, _) = self.get(index)?;
        Some(image.render_ascii(self.shape))
    }
}

/// Pairs image and label files into datasets.
///
/// Holds the configuration explicitly (expected image shape, default counts)
/// together with the source the files are read from.
pub struct DatasetLoader<S> {
    config: DatasetConfig,
    source: S,
}

impl DatasetLoader<LocalSource> {
    /// Loader over `config.data_dir`, downloading missing files with `curl`
    /// when `download` is set.
    pub fn from_config(config: DatasetConfig, download: bool) -> Self {
        let source = LocalSource::from_config(&config);
        let source = if download {
            source.with_fetcher(CurlFetcher)
        } else {
            source
        };
        Self::new(config, source)
    }
}

impl<S: Source> DatasetLoader<S> {
    pub fn new(config: DatasetConfig, source: S) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// Load the first `count` samples of an image/label file pair
    pub fn load_dataset(
        &self,
        image_file: &str,
        label_file: &str,
        count: usize,
    ) -> Result<Dataset> {
        self.assemble(image_file, label_file, Some(count))
    }

    /// Load every sample of an image/label file pair
    pub fn load_all(&self, image_file: &str, label_file: &str) -> Result<Dataset> {
        self.assemble(image_file, label_file, None)
    }

    pub fn load_split(&self, split: Split, count: Option<usize>) -> Result<Dataset> {
        let (image_file, label_file) = split.files();
        tracing::info!("Loading {} split", split.as_str());
        self.assemble(image_file, label_file, count)
    }

    /// Load the sample at `index` of a split, reading only the records up to it.
    pub fn load_sample(&self, split: Split, index: usize) -> Result<(ImageRecord, LabelRecord)> {
        let out_of_range = || IdxError::SampleOutOfRange {
            split: split.as_str().to_string(),
            index,
        };
        let count = index.checked_add(1).ok_or_else(out_of_range)?;
        let mut dataset = self.load_split(split, Some(count))?;
        dataset.samples.pop().ok_or_else(out_of_range)
    }

    fn assemble(
        &self,
        image_file: &str,
        label_file: &str,
        count: Option<usize>,
    ) -> Result<Dataset> {
        let shape = self.config.shape();

        let mut image_stream = self.source.open(image_file)?;
        let images = decode_images(&mut image_stream, count, shape)?;

        let mut label_stream = self.source.open(label_file)?;
        let labels = decode_labels(&mut label_stream, count)?;

        let expected = count.unwrap_or(images.len());
        if images.len() != expected || labels.len() != expected {
            return Err(IdxError::CountMismatch {
                image_file: image_file.to_string(),
                label_file: label_file.to_string(),
                expected,
                images: images.len(),
                labels: labels.len(),
            });
        }

        let samples = images.into_iter().zip(labels).collect();
        Ok(Dataset::new(samples, shape))
    }
}

impl<S: Source + Sync> DatasetLoader<S> {
    /// Loads the MNIST training and test datasets.
    /// Returns: (train, test)
    ///
    /// Both splits are decoded concurrently; they read disjoint files.
    pub fn load_mnist(&self) -> Result<(Dataset, Dataset)> {
        let (train, test) = rayon::join(
            || self.load_split(Split::Train, self.config.train_count),
            || self.load_split(Split::Test, self.config.test_count),
        );
        let (train, test) = (train?, test?);
        tracing::info!("[TRAIN] len: {}", train.len());
        tracing::info!("[TEST] len: {}", test.len());
        Ok((train, test))
    }
}
