use std::path::{Path, PathBuf};

use image::{GrayImage, RgbImage};
use segment_core::config::Config;
use segment_core::detection::detect_colors;
use segment_core::frame::{Frame, PixelFormat};

// Boundary glue: decode an image file, run the preset pipelines, write
// the mask and segmented PNGs. Everything file- and display-shaped lives
// here; the library stays pure.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let input = match args.next() {
        Some(path) => PathBuf::from(path),
        None => {
            eprintln!("usage: segment-core <image> [output-dir]");
            std::process::exit(2);
        }
    };
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| ".".to_string()));

    let config = Config::load_default().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Using default configuration");
        Config::default()
    });

    let decoded = image::open(&input)?.to_rgb8();
    let (width, height) = decoded.dimensions();
    let frame = Frame::new(decoded.into_raw(), width, height, PixelFormat::Rgb8)?;
    tracing::info!(width, height, "Decoded input image");

    std::fs::create_dir_all(&out_dir)?;
    for (name, detection) in detect_colors(&frame, &config.presets)? {
        tracing::info!(
            range = %name,
            matched_pixels = detection.matched_pixels(),
            "Segmented range"
        );
        let stem = name.to_lowercase();
        write_mask(&out_dir.join(format!("{stem}_mask.png")), &detection.mask)?;
        write_rgb(
            &out_dir.join(format!("{stem}_segmented.png")),
            &detection.segmented,
        )?;
    }

    Ok(())
}

fn write_mask(path: &Path, mask: &Frame) -> Result<(), Box<dyn std::error::Error>> {
    let img = GrayImage::from_raw(mask.width(), mask.height(), mask.data().to_vec())
        .ok_or("mask buffer does not match its dimensions")?;
    img.save(path)?;
    Ok(())
}

fn write_rgb(path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
    let img = RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
        .ok_or("frame buffer does not match its dimensions")?;
    img.save(path)?;
    Ok(())
}
