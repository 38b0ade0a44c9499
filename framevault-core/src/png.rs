//! PNG frame persistence
//!
//! Frames are stored as 8-bit grayscale PNG files named
//! `frame_<index>.png`. Reads and writes run on the rayon pool; each frame
//! depends only on its own byte range, and results are ordered by index.

use crate::constants::frame_file_name;
use crate::error::CodecError;
use crate::transport::{enumerate_frame_files, FramePersistence};
use crate::types::{FrameDimensions, FrameGrid};
use crate::Result;
use bytes::Bytes;
use image::{GrayImage, ImageFormat};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

#[cfg(feature = "logging")]
use tracing::debug;

/// Persists frames as lossless grayscale PNG images
#[derive(Debug, Clone, Copy, Default)]
pub struct PngPersistence;

impl PngPersistence {
    /// Create a new PNG persistence
    pub fn new() -> Self {
        Self
    }

    /// Read a single frame image, checking the agreed dimensions
    pub fn read_frame(&self, path: &Path, index: usize, dimensions: FrameDimensions) -> Result<FrameGrid> {
        let img = image::open(path)
            .map_err(|e| CodecError::Image(format!("{}: {}", path.display(), e)))?;

        if img.width() != dimensions.width || img.height() != dimensions.height {
            return Err(CodecError::FrameShapeMismatch {
                index,
                expected: dimensions.total_pixels(),
                actual: img.width() as usize * img.height() as usize,
            });
        }

        let pixels = img.into_luma8().into_raw();
        FrameGrid::new(index, dimensions, Bytes::from(pixels))
    }
}

impl FramePersistence for PngPersistence {
    fn write_frame(&self, dir: &Path, frame: &FrameGrid) -> Result<PathBuf> {
        frame.validate()?;

        let path = dir.join(frame_file_name(frame.index));
        let img = GrayImage::from_raw(
            frame.dimensions.width,
            frame.dimensions.height,
            frame.pixels.to_vec(),
        )
        .ok_or_else(|| CodecError::Image(format!("Frame {} does not fill its grid", frame.index)))?;

        img.save_with_format(&path, ImageFormat::Png)
            .map_err(|e| CodecError::Image(format!("{}: {}", path.display(), e)))?;

        #[cfg(feature = "logging")]
        debug!("Wrote frame {} to {}", frame.index, path.display());

        Ok(path)
    }

    fn write_frames(&self, dir: &Path, frames: &[FrameGrid]) -> Result<Vec<PathBuf>> {
        frames
            .par_iter()
            .map(|frame| self.write_frame(dir, frame))
            .collect()
    }

    fn read_frames(&self, dir: &Path, dimensions: FrameDimensions) -> Result<Vec<FrameGrid>> {
        dimensions.validate()?;
        let files = enumerate_frame_files(dir)?;

        #[cfg(feature = "logging")]
        debug!("Reading {} frames from {}", files.len(), dir.display());

        files
            .par_iter()
            .enumerate()
            .map(|(index, path)| self.read_frame(path, index, dimensions))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode_payload;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_png_round_trip_is_lossless() {
        let td = tempdir().unwrap();
        let dims = FrameDimensions::new(16, 8);
        let payload: Vec<u8> = (0..=255u8).cycle().take(300).collect();
        let frames = encode_payload(&payload, dims).unwrap();

        let paths = PngPersistence.write_frames(td.path(), &frames).unwrap();
        assert_eq!(paths.len(), 3);
        assert!(paths[2].ends_with("frame_000002.png"));

        let read = PngPersistence.read_frames(td.path(), dims).unwrap();
        assert_eq!(read, frames);
    }

    #[test]
    fn test_read_rejects_wrong_dimensions() {
        let td = tempdir().unwrap();
        let frames = encode_payload(b"abc", FrameDimensions::new(4, 4)).unwrap();
        PngPersistence.write_frames(td.path(), &frames).unwrap();

        let err = PngPersistence
            .read_frames(td.path(), FrameDimensions::new(8, 2))
            .unwrap_err();
        assert!(matches!(err, CodecError::FrameShapeMismatch { index: 0, .. }));
    }

    #[test]
    fn test_read_reindexes_from_one_based_names() {
        let td = tempdir().unwrap();
        let dims = FrameDimensions::new(2, 2);
        let frames = encode_payload(&[9, 8, 7, 6, 5], dims).unwrap();
        let paths = PngPersistence.write_frames(td.path(), &frames).unwrap();

        // Shift names to 1-based, highest first so nothing is overwritten.
        for (i, path) in paths.iter().enumerate().rev() {
            fs::rename(path, td.path().join(frame_file_name(i + 1))).unwrap();
        }

        let read = PngPersistence.read_frames(td.path(), dims).unwrap();
        assert_eq!(read, frames);
    }

    #[test]
    fn test_corrupt_image_reports_image_error() {
        let td = tempdir().unwrap();
        fs::write(td.path().join(frame_file_name(0)), b"not a png").unwrap();

        let err = PngPersistence
            .read_frames(td.path(), FrameDimensions::new(2, 2))
            .unwrap_err();
        assert!(matches!(err, CodecError::Image(_)));
    }
}
