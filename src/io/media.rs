// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image file loading.
//!
//! This module validates and decodes the image the regions are drawn over,
//! converting it to RGBA pixels suitable for display in egui.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// File extensions offered in the open dialog.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff"];

/// A decoded image.
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    /// RGBA8, row-major
    pub pixels: Vec<u8>,
}

/// Errors that can occur while loading an image.
#[derive(Error, Debug)]
pub enum MediaError {
    #[error("{path:?} is not an image file")]
    NotAnImage { path: PathBuf },

    #[error("Image is {size} bytes, larger than the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Load and decode an image, rejecting files that are not images or that
/// exceed `max_bytes`.
pub fn load_image(path: &Path, max_bytes: Option<u64>) -> Result<LoadedImage, MediaError> {
    let size = std::fs::metadata(path)?.len();
    if let Some(limit) = max_bytes {
        if size > limit {
            return Err(MediaError::TooLarge { size, limit });
        }
    }

    let bytes = std::fs::read(path)?;
    // Sniff the contents rather than trusting the extension
    let format = image::guess_format(&bytes).map_err(|_| MediaError::NotAnImage {
        path: path.to_path_buf(),
    })?;
    let rgba = image::load_from_memory_with_format(&bytes, format)?.to_rgba8();

    Ok(LoadedImage {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("areamap-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_load_png() {
        let path = temp_path("load.png");
        image::RgbaImage::new(4, 3).save(&path).unwrap();

        let loaded = load_image(&path, None).unwrap();
        assert_eq!((loaded.width, loaded.height), (4, 3));
        assert_eq!(loaded.pixels.len(), 4 * 3 * 4);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_rejects_non_image() {
        let path = temp_path("notes.png");
        std::fs::write(&path, "just some text").unwrap();

        let err = load_image(&path, None).err().unwrap();
        assert!(matches!(err, MediaError::NotAnImage { .. }));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_rejects_oversized_file() {
        let path = temp_path("big.png");
        image::RgbaImage::new(16, 16).save(&path).unwrap();

        let err = load_image(&path, Some(8)).err().unwrap();
        assert!(matches!(err, MediaError::TooLarge { limit: 8, .. }));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file() {
        let err = load_image(&temp_path("missing.png"), None).err().unwrap();
        assert!(matches!(err, MediaError::Io(_)));
    }
}
