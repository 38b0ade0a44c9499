//! Error types for Framevault operations

use alloc::string::String;

/// Errors that can occur while encoding, decoding or transporting frames
#[cfg_attr(feature = "std", derive(thiserror::Error))]
#[derive(Debug, Clone, PartialEq)]
pub enum CodecError {
    /// Invalid frame dimensions or missing/contradictory options
    #[cfg_attr(feature = "std", error("Configuration error: {0}"))]
    Configuration(String),

    /// Container name lacks the `<base>-<ext>-<length>` structure
    #[cfg_attr(
        feature = "std",
        error("Container name {0:?} is not in the expected format '<name>-<extension>-<size>.<container>'")
    )]
    MalformedContainerName(String),

    /// Size token in the container name is not a non-negative integer
    #[cfg_attr(feature = "std", error("Unable to parse file size {token:?} from container name {name:?}"))]
    MalformedSizeToken {
        /// The full container name.
        name: String,
        /// The offending size token.
        token: String,
    },

    /// Container name does not end with the expected extension
    #[cfg_attr(feature = "std", error("Container name {name:?} does not end with '.{expected}'"))]
    UnexpectedContainerExtension {
        /// The full container name.
        name: String,
        /// The extension the decoder was configured for.
        expected: String,
    },

    /// Frame pixel count differs from the agreed dimensions
    #[cfg_attr(
        feature = "std",
        error("Frame {index} has {actual} pixels, expected {expected}")
    )]
    FrameShapeMismatch {
        /// Index of the offending frame.
        index: usize,
        /// Pixels per frame for the agreed dimensions.
        expected: usize,
        /// Pixels actually present.
        actual: usize,
    },

    /// Frame supplied at a position that does not match its index
    #[cfg_attr(feature = "std", error("Frame with index {index} supplied at position {position}"))]
    FrameOutOfOrder {
        /// Position in the supplied sequence.
        position: usize,
        /// Index carried by the frame.
        index: usize,
    },

    /// Persisted frame files skip an index
    #[cfg_attr(feature = "std", error("Gap in frame sequence: expected frame {expected}, found {found}"))]
    FrameSequenceGap {
        /// The next index that should have been present.
        expected: u64,
        /// The index that was found instead.
        found: u64,
    },

    /// Frames hold fewer bytes than the declared original length
    #[cfg_attr(
        feature = "std",
        error("Truncated input: expected {expected} bytes, frames hold {actual}")
    )]
    TruncatedInput {
        /// The declared original length.
        expected: u64,
        /// The number of bytes the frames provide.
        actual: u64,
    },

    /// External tool failed to run or returned a failure status
    #[cfg_attr(feature = "std", error("{tool} failed: {detail}"))]
    ExternalToolFailure {
        /// Name of the tool or collaborator.
        tool: String,
        /// Exit status and captured diagnostics.
        detail: String,
    },

    /// Raster image encode/decode error
    #[cfg_attr(feature = "std", error("Image error: {0}"))]
    Image(String),

    /// IO error during read/write
    #[cfg_attr(feature = "std", error("IO error: {0}"))]
    Io(String),
}

#[cfg(feature = "std")]
impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::Io(err.to_string())
    }
}

#[cfg(feature = "png")]
impl From<image::ImageError> for CodecError {
    fn from(err: image::ImageError) -> Self {
        CodecError::Image(err.to_string())
    }
}
