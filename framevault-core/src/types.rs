//! Core types for Framevault frames and descriptors

use crate::constants::{
    DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH, EXPLICIT_BASE_NAME, MAX_FRAME_PIXELS,
    MAX_FRAME_SIDE, NAME_FIELD_SEPARATOR, RECOVERED_PREFIX,
};
use crate::error::CodecError;
use alloc::format;
use alloc::string::{String, ToString};
use bytes::Bytes;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Width and height of every frame in a sequence
///
/// Dimensions are a codec-wide agreement: they are not stored per frame, so
/// the decoder must be configured with the same values the encoder used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameDimensions {
    /// Pixels per row
    pub width: u32,

    /// Number of rows
    pub height: u32,
}

impl FrameDimensions {
    /// Create new frame dimensions
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Validate the dimensions and return the pixel count of one frame
    pub fn validate(&self) -> Result<usize, CodecError> {
        if self.width == 0 || self.height == 0 {
            return Err(CodecError::Configuration(format!(
                "Frame dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }

        if self.width > MAX_FRAME_SIDE || self.height > MAX_FRAME_SIDE {
            return Err(CodecError::Configuration(format!(
                "Frame dimensions {}x{} exceed the maximum side of {} pixels",
                self.width, self.height, MAX_FRAME_SIDE
            )));
        }

        (self.width as usize)
            .checked_mul(self.height as usize)
            .filter(|&pixels| pixels <= MAX_FRAME_PIXELS)
            .ok_or_else(|| {
                CodecError::Configuration(format!(
                    "Frame dimensions {}x{} exceed the limit of {} pixels per frame",
                    self.width, self.height, MAX_FRAME_PIXELS
                ))
            })
    }

    /// Pixels (and therefore payload bytes) per frame
    ///
    /// Saturates on overflow; call [`validate`](Self::validate) first when the
    /// dimensions come from user input.
    pub fn total_pixels(&self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }
}

impl Default for FrameDimensions {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_WIDTH, DEFAULT_FRAME_HEIGHT)
    }
}

impl core::fmt::Display for FrameDimensions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// One single-channel 8-bit frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameGrid {
    /// Position of this frame in the sequence, starting at 0
    pub index: usize,

    /// Dimensions shared by the whole sequence
    pub dimensions: FrameDimensions,

    /// Row-major intensity values, `width * height` bytes
    pub pixels: Bytes,
}

impl FrameGrid {
    /// Create a frame, checking that the pixel buffer fills the grid exactly
    pub fn new(index: usize, dimensions: FrameDimensions, pixels: Bytes) -> Result<Self, CodecError> {
        let frame = Self {
            index,
            dimensions,
            pixels,
        };
        frame.validate()?;
        Ok(frame)
    }

    /// Validate that the pixel buffer matches the dimensions
    pub fn validate(&self) -> Result<(), CodecError> {
        let expected = self.dimensions.validate()?;
        if self.pixels.len() != expected {
            return Err(CodecError::FrameShapeMismatch {
                index: self.index,
                expected,
                actual: self.pixels.len(),
            });
        }
        Ok(())
    }

    /// Intensity at `row`, `col`, or `None` outside the grid
    pub fn pixel(&self, row: u32, col: u32) -> Option<u8> {
        if row >= self.dimensions.height || col >= self.dimensions.width {
            return None;
        }
        let offset = row as usize * self.dimensions.width as usize + col as usize;
        self.pixels.get(offset).copied()
    }

    /// Iterate over the rows of the frame
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.pixels.chunks(self.dimensions.width.max(1) as usize)
    }
}

/// What a decoder needs to reconstruct the original file
///
/// Serializes as the one-entry metadata record
/// `{"<base>.<ext>": <original_length>}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerDescriptor {
    /// Original file name without its extension
    pub base_name: String,

    /// Original extension without the leading dot (may be empty)
    pub extension: String,

    /// Exact byte length of the original file
    pub original_length: u64,
}

impl ContainerDescriptor {
    /// Create a new descriptor
    pub fn new(base_name: impl Into<String>, extension: impl Into<String>, original_length: u64) -> Self {
        Self {
            base_name: base_name.into(),
            extension: extension.into(),
            original_length,
        }
    }

    /// Descriptor for explicitly supplied size and format
    ///
    /// Used when the container name does not follow the naming convention.
    pub fn explicit(extension: impl Into<String>, original_length: u64) -> Self {
        Self::new(EXPLICIT_BASE_NAME, extension, original_length)
    }

    /// Build a descriptor from an input path and its byte length
    ///
    /// The extension is everything after the last dot of the file name. A
    /// leading dot (hidden files) does not start an extension.
    #[cfg(feature = "std")]
    pub fn from_path(path: &std::path::Path, original_length: u64) -> Result<Self, CodecError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                CodecError::Configuration(format!(
                    "Input path {} has no valid UTF-8 file name",
                    path.display()
                ))
            })?;

        let (base_name, extension) = match file_name.rfind('.') {
            Some(pos) if pos > 0 => (&file_name[..pos], &file_name[pos + 1..]),
            _ => (file_name, ""),
        };

        Ok(Self::new(base_name, extension, original_length))
    }

    /// Original file name, e.g. `movie.txt`
    pub fn original_file_name(&self) -> String {
        join_extension(&self.base_name, &self.extension)
    }

    /// Name the decoder writes the payload to, e.g. `recovered_movie.txt`
    pub fn recovered_file_name(&self) -> String {
        join_extension(&format!("{}{}", RECOVERED_PREFIX, self.base_name), &self.extension)
    }

    /// Whether the encoded container name decodes back to this descriptor
    ///
    /// Parsing runs right to left, so dashes in the base name are fine, but a
    /// dash in the extension moves the field boundaries.
    pub fn is_name_safe(&self) -> bool {
        !self.extension.contains(NAME_FIELD_SEPARATOR)
    }
}

impl Serialize for ContainerDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.original_file_name(), &self.original_length)?;
        map.end()
    }
}

fn join_extension(stem: &str, extension: &str) -> String {
    if extension.is_empty() {
        stem.to_string()
    } else {
        format!("{}.{}", stem, extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_dimensions_validate() {
        assert_eq!(FrameDimensions::new(640, 480).validate().unwrap(), 307_200);
        assert!(matches!(
            FrameDimensions::new(0, 480).validate(),
            Err(CodecError::Configuration(_))
        ));
        assert!(matches!(
            FrameDimensions::new(640, 0).validate(),
            Err(CodecError::Configuration(_))
        ));
    }

    #[test]
    fn test_dimensions_reject_oversized() {
        assert!(matches!(
            FrameDimensions::new(u32::MAX, u32::MAX).validate(),
            Err(CodecError::Configuration(_))
        ));
        assert!(matches!(
            FrameDimensions::new(u32::MAX, 1).validate(),
            Err(CodecError::Configuration(_))
        ));
        assert!(matches!(
            FrameDimensions::new(1 << 15, 1 << 14).validate(),
            Err(CodecError::Configuration(_))
        ));
        assert_eq!(FrameDimensions::new(1 << 14, 1 << 14).validate().unwrap(), 1 << 28);
    }

    #[test]
    fn test_frame_grid_shape_checked() {
        let dims = FrameDimensions::new(2, 2);
        assert!(FrameGrid::new(0, dims, Bytes::from_static(&[1, 2, 3, 4])).is_ok());

        let err = FrameGrid::new(3, dims, Bytes::from_static(&[1, 2, 3])).unwrap_err();
        assert_eq!(
            err,
            CodecError::FrameShapeMismatch {
                index: 3,
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_pixel_is_row_major() {
        let dims = FrameDimensions::new(3, 2);
        let frame = FrameGrid::new(0, dims, Bytes::from_static(&[0, 1, 2, 10, 11, 12])).unwrap();

        assert_eq!(frame.pixel(0, 2), Some(2));
        assert_eq!(frame.pixel(1, 0), Some(10));
        assert_eq!(frame.pixel(2, 0), None);
        assert_eq!(frame.rows().count(), 2);
    }

    #[test]
    fn test_descriptor_from_path() {
        let d = ContainerDescriptor::from_path(Path::new("/tmp/archive.tar.gz"), 10).unwrap();
        assert_eq!(d, ContainerDescriptor::new("archive.tar", "gz", 10));

        let d = ContainerDescriptor::from_path(Path::new("README"), 3).unwrap();
        assert_eq!(d, ContainerDescriptor::new("README", "", 3));

        let d = ContainerDescriptor::from_path(Path::new(".bashrc"), 1).unwrap();
        assert_eq!(d, ContainerDescriptor::new(".bashrc", "", 1));
    }

    #[test]
    fn test_recovered_file_name() {
        assert_eq!(
            ContainerDescriptor::new("movie", "txt", 1).recovered_file_name(),
            "recovered_movie.txt"
        );
        assert_eq!(
            ContainerDescriptor::explicit("zip", 1).recovered_file_name(),
            "recovered_file.zip"
        );
        assert_eq!(
            ContainerDescriptor::new("notes", "", 1).recovered_file_name(),
            "recovered_notes"
        );
    }

    #[test]
    fn test_name_safety() {
        assert!(ContainerDescriptor::new("my-movie", "txt", 1).is_name_safe());
        assert!(!ContainerDescriptor::new("movie", "tar-gz", 1).is_name_safe());
        assert!(ContainerDescriptor::new("archive", "tar.gz", 1).is_name_safe());
    }

    #[test]
    fn test_descriptor_serializes_as_metadata_record() {
        let json = serde_json::to_string(&ContainerDescriptor::new("photo", "jpg", 1234)).unwrap();
        assert_eq!(json, r#"{"photo.jpg":1234}"#);

        let json = serde_json::to_string(&ContainerDescriptor::new("Makefile", "", 42)).unwrap();
        assert_eq!(json, r#"{"Makefile":42}"#);
    }
}
