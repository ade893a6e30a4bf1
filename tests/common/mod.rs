#![allow(dead_code)]

use mnist_idx::idx::{encode_images, encode_labels, ImageRecord, ImageShape};
use rand::{distributions::Uniform, thread_rng, Rng};

/// Generate `count` random images of the given shape.
pub fn gen_images(count: usize, shape: ImageShape) -> Vec<ImageRecord> {
    let mut rng = thread_rng();
    let pixels_distrib = Uniform::new_inclusive(0u8, 255u8);
    (0..count)
        .map(|_| {
            let pixels: Vec<u8> = (0..shape.pixel_count())
                .map(|_| rng.sample(pixels_distrib))
                .collect();
            ImageRecord::new(pixels)
        })
        .collect()
}

/// Generate `count` random labels in 0..10.
pub fn gen_labels(count: usize) -> Vec<u8> {
    let mut rng = thread_rng();
    let labels_distrib = Uniform::new(0u8, 10u8);
    (0..count).map(|_| rng.sample(labels_distrib)).collect()
}

/// A well-formed 28x28 image file holding `count` random images.
pub fn image_file(count: usize) -> (Vec<ImageRecord>, Vec<u8>) {
    let images = gen_images(count, ImageShape::MNIST);
    let bytes = encode_images(&images, ImageShape::MNIST);
    (images, bytes)
}

/// A well-formed label file holding `labels`.
pub fn label_file(labels: &[u8]) -> Vec<u8> {
    encode_labels(labels)
}
