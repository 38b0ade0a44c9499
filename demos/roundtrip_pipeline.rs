//! Full pipeline with PNG frames and the in-memory transport
//!
//! Swap `MemoryTransport` for `FfmpegTransport` to produce a real mkv file.

use framevault_core::{
    pipeline::{DescriptorOverride, Pipeline, PipelineConfig},
    png::PngPersistence,
    transport::MemoryTransport,
};
use std::fs;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let root = std::env::temp_dir().join("framevault-demo");
    fs::create_dir_all(&root)?;

    let input = root.join("greeting.txt");
    fs::write(&input, "Hello from a grayscale frame!\n".repeat(20_000))?;

    let config = PipelineConfig::default()
        .with_encode_work_dir(root.join("output_images"))
        .with_decode_work_dir(root.join("decoded_images"));
    let pipeline = Pipeline::new(config, PngPersistence, MemoryTransport::new());

    let encoded = pipeline.encode_file(&input, &root)?;
    println!(
        "Encoded {} into {} ({} frames, {} padding bytes)",
        input.display(),
        encoded.container.display(),
        encoded.frame_count,
        encoded.pad_length
    );

    let decoded = pipeline.decode_file(&encoded.container, &DescriptorOverride::default(), &root)?;
    println!("Recovered {}", decoded.output.display());

    assert_eq!(fs::read(&input)?, fs::read(&decoded.output)?);
    println!("Round trip is bit-exact");

    Ok(())
}
