//! Property-based tests using proptest

use framevault_core::{
    decoder::decode_frames,
    encoder::encode_payload,
    name::{decode_name, encode_name},
    padding::compute_padding,
    types::{ContainerDescriptor, FrameDimensions},
};
use proptest::prelude::*;

fn small_dimensions() -> impl Strategy<Value = FrameDimensions> {
    (1u32..16, 1u32..16).prop_map(|(w, h)| FrameDimensions::new(w, h))
}

proptest! {
    #[test]
    fn prop_round_trip_encode_decode(
        dims in small_dimensions(),
        payload in prop::collection::vec(any::<u8>(), 0..2048)
    ) {
        let frames = encode_payload(&payload, dims).unwrap();
        let decoded = decode_frames(&frames, payload.len() as u64, dims).unwrap();

        prop_assert_eq!(&decoded[..], &payload[..]);
    }

    #[test]
    fn prop_padding_law(
        len in 0usize..1_000_000,
        total_pixels in 1usize..400_000
    ) {
        let pad = compute_padding(len, total_pixels).unwrap();

        prop_assert!(pad < total_pixels);
        prop_assert_eq!((len + pad) % total_pixels, 0);
    }

    #[test]
    fn prop_frame_count_law(
        dims in small_dimensions(),
        payload in prop::collection::vec(any::<u8>(), 0..2048)
    ) {
        let total_pixels = dims.total_pixels();
        let pad = compute_padding(payload.len(), total_pixels).unwrap();
        let frames = encode_payload(&payload, dims).unwrap();

        let expected = ((payload.len() + pad) / total_pixels).max(1);
        prop_assert_eq!(frames.len(), expected);
        for (i, frame) in frames.iter().enumerate() {
            prop_assert_eq!(frame.index, i);
            prop_assert_eq!(frame.pixels.len(), total_pixels);
        }
    }

    #[test]
    fn prop_short_frames_never_decode(
        dims in small_dimensions(),
        payload in prop::collection::vec(any::<u8>(), 1..2048)
    ) {
        let frames = encode_payload(&payload, dims).unwrap();
        let kept = &frames[..frames.len() - 1];

        prop_assert!(decode_frames(kept, payload.len() as u64, dims).is_err());
    }

    #[test]
    fn prop_name_round_trip(
        base in "[A-Za-z0-9_. -]{1,24}",
        ext in "[A-Za-z0-9_.]{0,8}",
        length in any::<u64>()
    ) {
        let descriptor = ContainerDescriptor::new(base, ext, length);
        prop_assume!(descriptor.is_name_safe());

        let name = encode_name(&descriptor, "mkv");
        prop_assert_eq!(decode_name(&name, "mkv").unwrap(), descriptor);
    }

    #[test]
    fn prop_decode_name_never_panics(name in "\\PC{0,64}") {
        // Should either parse or return an error, never panic
        let _ = decode_name(&name, "mkv");
    }
}
