//! Constants and defaults shared by the Framevault encoder and decoder
//!
//! Frame dimensions are not stored in the container, so both sides of a
//! transfer must use the same values.

/// Default frame width in pixels
pub const DEFAULT_FRAME_WIDTH: u32 = 640;

/// Default frame height in pixels
pub const DEFAULT_FRAME_HEIGHT: u32 = 480;

/// Largest accepted frame width or height, the PNG limit
pub const MAX_FRAME_SIDE: u32 = i32::MAX as u32;

/// Largest accepted pixel count of one frame (256 MiB)
pub const MAX_FRAME_PIXELS: usize = 1 << 28;

/// Value of the filler bytes appended to the last frame
pub const PAD_BYTE: u8 = 0x00;

/// Extension of the container file produced by the default transport
pub const DEFAULT_CONTAINER_EXTENSION: &str = "mkv";

/// Frame rate passed to the video muxer
pub const DEFAULT_FRAMERATE: u32 = 24;

/// Separator between the fields of a container name
pub const NAME_FIELD_SEPARATOR: char = '-';

/// Prefix of the file written by the decoder
pub const RECOVERED_PREFIX: &str = "recovered_";

/// Base name used when size and format are supplied explicitly
pub const EXPLICIT_BASE_NAME: &str = "file";

/// Prefix of persisted frame image files
pub const FRAME_FILE_PREFIX: &str = "frame_";

/// Extension of persisted frame image files
pub const FRAME_FILE_EXTENSION: &str = "png";

/// Zero-padded width of the index in frame file names
pub const FRAME_INDEX_DIGITS: usize = 6;

/// Default working directory for frames produced while encoding
pub const DEFAULT_ENCODE_WORK_DIR: &str = "output_images";

/// Default working directory for frames extracted while decoding
pub const DEFAULT_DECODE_WORK_DIR: &str = "decoded_images";

/// File name of the frame with the given index, e.g. `frame_000042.png`
#[cfg(feature = "std")]
pub fn frame_file_name(index: usize) -> String {
    format!(
        "{}{:0width$}.{}",
        FRAME_FILE_PREFIX,
        index,
        FRAME_FILE_EXTENSION,
        width = FRAME_INDEX_DIGITS
    )
}

/// ffmpeg-style printf pattern matching [`frame_file_name`]
#[cfg(feature = "std")]
pub fn frame_file_pattern() -> String {
    format!(
        "{}%0{}d.{}",
        FRAME_FILE_PREFIX, FRAME_INDEX_DIGITS, FRAME_FILE_EXTENSION
    )
}

/// Parse the numeric index out of a frame file name
///
/// Returns `None` for names that are not frame files. Only the digits are
/// interpreted, so `frame_10.png` and `frame_000010.png` both yield 10.
pub fn parse_frame_index(file_name: &str) -> Option<u64> {
    let digits = file_name
        .strip_prefix(FRAME_FILE_PREFIX)?
        .strip_suffix(FRAME_FILE_EXTENSION)?
        .strip_suffix('.')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
