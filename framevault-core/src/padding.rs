//! Padding that aligns a payload to a whole number of frames

use crate::error::CodecError;
use crate::types::FrameDimensions;
use alloc::string::ToString;

/// Number of filler bytes needed to align `original_length` to `total_pixels`
///
/// Returns the unique value in `[0, total_pixels)` such that
/// `(original_length + pad) % total_pixels == 0`. A payload that is already
/// aligned gets no padding.
pub fn compute_padding(original_length: usize, total_pixels: usize) -> Result<usize, CodecError> {
    if total_pixels == 0 {
        return Err(CodecError::Configuration(
            "Frame pixel count must be positive".to_string(),
        ));
    }

    Ok((total_pixels - original_length % total_pixels) % total_pixels)
}

/// Padding plan for one payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaddingSpec {
    /// Length of the payload before padding
    pub original_length: usize,

    /// Bytes per frame
    pub total_pixels: usize,

    /// Filler bytes appended after the payload
    pub pad_length: usize,
}

impl PaddingSpec {
    /// Plan the padding of a payload for the given frame dimensions
    pub fn new(original_length: usize, dimensions: FrameDimensions) -> Result<Self, CodecError> {
        let total_pixels = dimensions.validate()?;
        let pad_length = compute_padding(original_length, total_pixels)?;

        Ok(Self {
            original_length,
            total_pixels,
            pad_length,
        })
    }

    /// Length after padding, a multiple of `total_pixels`
    pub fn padded_length(&self) -> usize {
        self.original_length + self.pad_length
    }

    /// Number of frames the padded payload fills
    ///
    /// An empty payload still occupies one zero-filled frame, since a video
    /// container cannot hold zero frames.
    pub fn frame_count(&self) -> usize {
        (self.padded_length() / self.total_pixels).max(1)
    }
}
