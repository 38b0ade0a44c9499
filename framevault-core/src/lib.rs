//! # Framevault Core
//!
//! Lossless storage of arbitrary binary files as sequences of fixed-size grayscale frames.
//!
//! ## Modules
//!
//! - `constants`: Codec-wide constants and defaults
//! - `types`: Core types (FrameDimensions, FrameGrid, ContainerDescriptor)
//! - `padding`: Frame alignment padding
//! - `encoder`: Payload to frame encoding
//! - `decoder`: Frame to payload reconstruction
//! - `name`: Container file name codec carrying the descriptor
//! - `transport`: Frame persistence and video transport traits
//! - `workdir`: Scoped intermediate frame directory
//! - `pipeline`: End-to-end encode/decode orchestration
//! - `png`: PNG frame persistence (feature `png`)
//! - `ffmpeg`: ffmpeg subprocess transport

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod constants;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod name;
pub mod padding;
pub mod types;

#[cfg(feature = "std")]
pub mod ffmpeg;
#[cfg(feature = "std")]
pub mod pipeline;
#[cfg(feature = "png")]
pub mod png;
#[cfg(feature = "std")]
pub mod transport;
#[cfg(feature = "std")]
pub mod workdir;

// Re-export commonly used types
pub use error::CodecError;
pub use types::{ContainerDescriptor, FrameDimensions, FrameGrid};

/// Result type alias for Framevault operations
pub type Result<T> = core::result::Result<T, CodecError>;
