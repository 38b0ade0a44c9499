//! Fuzzing entry points for framevault-core
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Run fuzzer: cargo fuzz run fuzz_decode_name

use framevault_core::types::{FrameDimensions, FrameGrid};

pub fn fuzz_decode_name(data: &[u8]) {
    use framevault_core::name::decode_name;

    // Try to parse - should never panic
    if let Ok(name) = std::str::from_utf8(data) {
        let _ = decode_name(name, "mkv");
    }
}

pub fn fuzz_decode_frames(data: &[u8]) {
    use framevault_core::decoder::decode_frames;

    // First two bytes pick the geometry, the next eight the declared length.
    if data.len() < 10 {
        return;
    }
    let dims = FrameDimensions::new(u32::from(data[0]) + 1, u32::from(data[1]) + 1);
    let mut len_bytes = [0u8; 8];
    len_bytes.copy_from_slice(&data[2..10]);
    let declared = u64::from_le_bytes(len_bytes);

    let frames: Vec<FrameGrid> = data[10..]
        .chunks(dims.total_pixels())
        .enumerate()
        .map(|(index, chunk)| FrameGrid {
            index,
            dimensions: dims,
            pixels: chunk.to_vec().into(),
        })
        .collect();

    // Short final chunks and oversized lengths must surface as errors
    let _ = decode_frames(&frames, declared, dims);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzz_decode_name_empty() {
        fuzz_decode_name(&[]);
    }

    #[test]
    fn test_fuzz_decode_name_random() {
        fuzz_decode_name(b"--.-mkv.-");
        fuzz_decode_name(&[0xFF, 0xFE, b'-']);
    }

    #[test]
    fn test_fuzz_decode_frames_short() {
        fuzz_decode_frames(&[0x12, 0x34, 0x56]);
    }

    #[test]
    fn test_fuzz_decode_frames_random() {
        let mut data = vec![1, 1];
        data.extend_from_slice(&u64::MAX.to_le_bytes());
        data.extend_from_slice(&[0xAB; 1023]);
        fuzz_decode_frames(&data);
    }
}
