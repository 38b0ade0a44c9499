//! Payload to frame encoding

use crate::constants::PAD_BYTE;
use crate::error::CodecError;
use crate::padding::PaddingSpec;
use crate::types::{FrameDimensions, FrameGrid};
use alloc::format;
use alloc::vec::Vec;
use bytes::{BufMut, Bytes, BytesMut};

#[cfg(feature = "logging")]
use tracing::debug;

/// Encode a payload into an ordered sequence of frames
///
/// The payload is padded to a whole number of frames and split into
/// consecutive chunks of `width * height` bytes. Chunk `i` becomes frame `i`,
/// filled row-major.
pub fn encode_payload(payload: &[u8], dimensions: FrameDimensions) -> Result<Vec<FrameGrid>, CodecError> {
    Ok(FrameEncoder::new(dimensions).frames(payload)?.collect())
}

/// Builder for encoding payloads with non-default options
#[derive(Debug, Clone)]
pub struct FrameEncoder {
    dimensions: FrameDimensions,
    pad_byte: u8,
}

impl FrameEncoder {
    /// Create a new encoder for the given frame dimensions
    pub fn new(dimensions: FrameDimensions) -> Self {
        Self {
            dimensions,
            pad_byte: PAD_BYTE,
        }
    }

    /// Set the filler value used for padding
    ///
    /// The decoder trims by length, so any value round-trips.
    pub fn pad_byte(mut self, value: u8) -> Self {
        self.pad_byte = value;
        self
    }

    /// Padding plan this encoder would use for a payload of `len` bytes
    pub fn plan(&self, len: usize) -> Result<PaddingSpec, CodecError> {
        PaddingSpec::new(len, self.dimensions)
    }

    /// Lazily encode a payload
    ///
    /// The payload is copied once into a padded buffer; every frame is a
    /// slice of that buffer.
    pub fn frames(&self, payload: &[u8]) -> Result<Frames, CodecError> {
        let spec = self.plan(payload.len())?;
        let frame_count = spec.frame_count();
        let total_len = frame_count
            .checked_mul(spec.total_pixels)
            .filter(|&len| len <= isize::MAX as usize)
            .ok_or_else(|| {
                CodecError::Configuration(format!(
                    "Padded payload of {} frames of {} does not fit in memory",
                    frame_count, self.dimensions
                ))
            })?;

        let mut buf = BytesMut::with_capacity(total_len);
        buf.put_slice(payload);
        buf.put_bytes(self.pad_byte, total_len - payload.len());

        #[cfg(feature = "logging")]
        debug!(
            "Encoding {} bytes into {} frames of {} ({} padding bytes)",
            payload.len(),
            frame_count,
            self.dimensions,
            total_len - payload.len()
        );

        Ok(Frames {
            buf: buf.freeze(),
            dimensions: self.dimensions,
            padding: spec,
            next: 0,
            count: frame_count,
        })
    }
}

/// Iterator over the frames of an encoded payload
#[derive(Debug, Clone)]
pub struct Frames {
    buf: Bytes,
    dimensions: FrameDimensions,
    padding: PaddingSpec,
    next: usize,
    count: usize,
}

impl Frames {
    /// Padding plan the frames were built from
    pub fn padding(&self) -> PaddingSpec {
        self.padding
    }
}

impl Iterator for Frames {
    type Item = FrameGrid;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }

        let total_pixels = self.padding.total_pixels;
        let start = self.next * total_pixels;
        let frame = FrameGrid {
            index: self.next,
            dimensions: self.dimensions,
            pixels: self.buf.slice(start..start + total_pixels),
        };
        self.next += 1;
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Frames {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_pads_last_frame() {
        let frames = encode_payload(&[1, 2, 3, 4, 5], FrameDimensions::new(2, 2)).unwrap();

        assert_eq!(frames.len(), 2);
        assert_eq!(&frames[0].pixels[..], &[1, 2, 3, 4]);
        assert_eq!(&frames[1].pixels[..], &[5, 0, 0, 0]);
        assert_eq!(frames[1].index, 1);
    }

    #[test]
    fn test_encode_exact_multiple_adds_no_frame() {
        let payload: Vec<u8> = (1..=8).collect();
        let frames = encode_payload(&payload, FrameDimensions::new(2, 2)).unwrap();

        assert_eq!(frames.len(), 2);
        assert_eq!(&frames[1].pixels[..], &[5, 6, 7, 8]);
    }

    #[test]
    fn test_encode_empty_payload_yields_one_frame() {
        let frames = encode_payload(&[], FrameDimensions::new(3, 3)).unwrap();

        assert_eq!(frames.len(), 1);
        assert!(frames[0].pixels.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_encoder_custom_pad_byte() {
        let frames: Vec<_> = FrameEncoder::new(FrameDimensions::new(4, 1))
            .pad_byte(0xAA)
            .frames(b"xy")
            .unwrap()
            .collect();

        assert_eq!(&frames[0].pixels[..], &[b'x', b'y', 0xAA, 0xAA]);
    }

    #[test]
    fn test_frames_iterator_len() {
        let frames = FrameEncoder::new(FrameDimensions::new(2, 2))
            .frames(&[0u8; 9])
            .unwrap();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames.padding().pad_length, 3);
        assert_eq!(frames.padding().padded_length(), 12);
    }

    #[test]
    fn test_encode_rejects_oversized_dimensions() {
        assert!(matches!(
            encode_payload(b"x", FrameDimensions::new(u32::MAX, u32::MAX)),
            Err(CodecError::Configuration(_))
        ));
    }

    #[test]
    fn test_encode_rejects_zero_dimensions() {
        assert!(matches!(
            encode_payload(b"data", FrameDimensions::new(0, 2)),
            Err(CodecError::Configuration(_))
        ));
    }
}
