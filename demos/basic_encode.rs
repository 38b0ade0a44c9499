//! Basic encoding example

use framevault_core::{
    decoder::decode_frames,
    encoder::FrameEncoder,
    name::{decode_name, encode_name},
    types::{ContainerDescriptor, FrameDimensions},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Framevault Basic Encoding Example\n");

    let dims = FrameDimensions::new(8, 4);
    let payload = b"This payload spans more than one tiny frame.".to_vec();

    let encoder = FrameEncoder::new(dims);
    let plan = encoder.plan(payload.len())?;
    println!(
        "{} bytes -> {} frames of {} ({} padding bytes)",
        payload.len(),
        plan.frame_count(),
        dims,
        plan.pad_length
    );

    let frames: Vec<_> = encoder.frames(&payload)?.collect();
    for frame in &frames {
        println!("Frame {}:", frame.index);
        for row in frame.rows() {
            println!("  {:02x?}", row);
        }
    }

    let descriptor = ContainerDescriptor::new("example", "txt", payload.len() as u64);
    let name = encode_name(&descriptor, "mkv");
    println!("\nContainer name: {}", name);

    let parsed = decode_name(&name, "mkv")?;
    let recovered = decode_frames(&frames, parsed.original_length, dims)?;
    assert_eq!(&recovered[..], &payload[..]);

    println!("Recovered {} bytes as {}", recovered.len(), parsed.recovered_file_name());

    Ok(())
}
