//! Frame to payload reconstruction (strict mode)

use crate::error::CodecError;
use crate::types::{FrameDimensions, FrameGrid};
use bytes::{BufMut, Bytes, BytesMut};

#[cfg(feature = "logging")]
use tracing::debug;

/// Reconstruct the original payload from an ordered frame sequence
///
/// This function performs strict validation:
/// - Every frame must match the agreed dimensions
/// - Frame `i` must carry index `i` (numeric order, no gaps)
/// - The frames must hold at least `original_length` bytes
///
/// The concatenated pixels are truncated to `original_length`, which drops
/// the padding.
pub fn decode_frames(
    frames: &[FrameGrid],
    original_length: u64,
    dimensions: FrameDimensions,
) -> Result<Bytes, CodecError> {
    let mut assembler = FrameAssembler::with_capacity(dimensions, frames.len())?;
    for frame in frames {
        assembler.push(frame)?;
    }
    assembler.finish(original_length)
}

/// Incremental frame decoder
///
/// Frames are pushed one at a time in index order, and the payload is
/// trimmed when the sequence is finished.
#[derive(Debug)]
pub struct FrameAssembler {
    dimensions: FrameDimensions,
    total_pixels: usize,
    next_index: usize,
    buf: BytesMut,
}

impl FrameAssembler {
    /// Create an assembler for frames of the given dimensions
    pub fn new(dimensions: FrameDimensions) -> Result<Self, CodecError> {
        Self::with_capacity(dimensions, 0)
    }

    /// Create an assembler with room for `frame_count` frames
    pub fn with_capacity(dimensions: FrameDimensions, frame_count: usize) -> Result<Self, CodecError> {
        let total_pixels = dimensions.validate()?;

        Ok(Self {
            dimensions,
            total_pixels,
            next_index: 0,
            buf: BytesMut::with_capacity(total_pixels.saturating_mul(frame_count)),
        })
    }

    /// Append the next frame of the sequence
    pub fn push(&mut self, frame: &FrameGrid) -> Result<(), CodecError> {
        if frame.index != self.next_index {
            return Err(CodecError::FrameOutOfOrder {
                position: self.next_index,
                index: frame.index,
            });
        }

        if frame.dimensions != self.dimensions || frame.pixels.len() != self.total_pixels {
            return Err(CodecError::FrameShapeMismatch {
                index: frame.index,
                expected: self.total_pixels,
                actual: frame.pixels.len(),
            });
        }

        self.buf.put_slice(&frame.pixels);
        self.next_index += 1;
        Ok(())
    }

    /// Number of frames pushed so far
    pub fn frame_count(&self) -> usize {
        self.next_index
    }

    /// Bytes collected so far, padding included
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether no frame has been pushed yet
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Trim the collected bytes to `original_length`
    ///
    /// Fails with [`CodecError::TruncatedInput`] rather than returning a
    /// short payload.
    pub fn finish(mut self, original_length: u64) -> Result<Bytes, CodecError> {
        let available = self.buf.len() as u64;
        if available < original_length {
            return Err(CodecError::TruncatedInput {
                expected: original_length,
                actual: available,
            });
        }

        #[cfg(feature = "logging")]
        debug!(
            "Reassembled {} frames, trimming {} padding bytes",
            self.next_index,
            available - original_length
        );

        self.buf.truncate(original_length as usize);
        Ok(self.buf.freeze())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode_payload;

    fn dims() -> FrameDimensions {
        FrameDimensions::new(2, 2)
    }

    fn frame(index: usize, pixels: &'static [u8]) -> FrameGrid {
        FrameGrid {
            index,
            dimensions: dims(),
            pixels: Bytes::from_static(pixels),
        }
    }

    #[test]
    fn test_decode_trims_padding() {
        let frames = [frame(0, &[1, 2, 3, 4]), frame(1, &[5, 0, 0, 0])];
        let decoded = decode_frames(&frames, 5, dims()).unwrap();
        assert_eq!(&decoded[..], &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_decode_truncated_input() {
        let frames = [frame(0, &[1, 2, 3, 4])];
        let err = decode_frames(&frames, 5, dims()).unwrap_err();
        assert_eq!(
            err,
            CodecError::TruncatedInput {
                expected: 5,
                actual: 4
            }
        );
    }

    #[test]
    fn test_decode_rejects_out_of_order() {
        let frames = [frame(1, &[5, 0, 0, 0]), frame(0, &[1, 2, 3, 4])];
        let err = decode_frames(&frames, 5, dims()).unwrap_err();
        assert_eq!(err, CodecError::FrameOutOfOrder { position: 0, index: 1 });
    }

    #[test]
    fn test_decode_rejects_wrong_shape() {
        let bad = FrameGrid {
            index: 0,
            dimensions: FrameDimensions::new(3, 1),
            pixels: Bytes::from_static(&[1, 2, 3]),
        };
        let err = decode_frames(&[bad], 3, dims()).unwrap_err();
        assert_eq!(
            err,
            CodecError::FrameShapeMismatch {
                index: 0,
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_assembler_incremental() {
        let frames = encode_payload(b"hello world", dims()).unwrap();
        let mut assembler = FrameAssembler::new(dims()).unwrap();
        assert!(assembler.is_empty());

        for f in &frames {
            assembler.push(f).unwrap();
        }

        assert_eq!(assembler.frame_count(), 3);
        assert_eq!(assembler.len(), 12);
        assert_eq!(&assembler.finish(11).unwrap()[..], b"hello world");
    }

    #[test]
    fn test_decode_zero_length() {
        let frames = encode_payload(&[], dims()).unwrap();
        assert!(decode_frames(&frames, 0, dims()).unwrap().is_empty());
    }
}
