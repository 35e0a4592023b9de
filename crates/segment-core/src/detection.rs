use rayon::prelude::*;
use segment_detection::color::{ColorRange, RangeError};
use thiserror::Error;

use crate::frame::{Frame, FrameError, PixelFormat};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DetectionError {
    #[error(transparent)]
    Range(#[from] RangeError),

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error("expected a {expected:?} frame, got {actual:?}")]
    UnsupportedFormat {
        expected: PixelFormat,
        actual: PixelFormat,
    },

    #[error("image is {image_width}x{image_height} but mask is {mask_width}x{mask_height}")]
    DimensionMismatch {
        image_width: u32,
        image_height: u32,
        mask_width: u32,
        mask_height: u32,
    },
}

// One range's worth of pipeline output: the color-preserved segmented
// frame and the binary mask it was cut with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Detection {
    pub segmented: Frame,
    pub mask: Frame,
}

impl Detection {
    // Number of mask pixels classified as in-range.
    pub fn matched_pixels(&self) -> usize {
        self.mask.data().iter().filter(|&&b| b == 255).count()
    }
}

// Classifies every HSV pixel against an inclusive range, producing a
// GRAY8 mask of 0/255 bytes. Pixels are independent, so rows are fanned
// out across threads.
pub fn threshold(hsv: &Frame, range: &ColorRange) -> Result<Frame, DetectionError> {
    range.validate()?;
    if hsv.format() != PixelFormat::Hsv {
        return Err(DetectionError::UnsupportedFormat {
            expected: PixelFormat::Hsv,
            actual: hsv.format(),
        });
    }

    let mask_data: Vec<u8> = hsv
        .data()
        .par_chunks_exact(3)
        .map(|px| {
            if range.in_range(px[0], px[1], px[2]) {
                255
            } else {
                0
            }
        })
        .collect();

    Ok(Frame::new(
        mask_data,
        hsv.width(),
        hsv.height(),
        PixelFormat::Gray8,
    )?)
}

// Keeps image pixels where the mask byte is 255 and zeroes the rest.
pub fn composite(image: &Frame, mask: &Frame) -> Result<Frame, DetectionError> {
    if mask.format() != PixelFormat::Gray8 {
        return Err(DetectionError::UnsupportedFormat {
            expected: PixelFormat::Gray8,
            actual: mask.format(),
        });
    }
    if image.width() != mask.width() || image.height() != mask.height() {
        return Err(DetectionError::DimensionMismatch {
            image_width: image.width(),
            image_height: image.height(),
            mask_width: mask.width(),
            mask_height: mask.height(),
        });
    }

    let bpp = image.format().bytes_per_pixel() as usize;
    let mut data = vec![0u8; image.data().len()];
    data.par_chunks_exact_mut(bpp)
        .zip(image.data().par_chunks_exact(bpp))
        .zip(mask.data().par_iter())
        .for_each(|((dst, src), &m)| {
            if m == 255 {
                dst.copy_from_slice(src);
            }
        });

    Ok(Frame::new(
        data,
        image.width(),
        image.height(),
        image.format(),
    )?)
}

// Runs convert -> threshold -> composite for a single range.
pub fn detect_color(image: &Frame, range: &ColorRange) -> Result<Detection, DetectionError> {
    let hsv = image.to_hsv()?;
    let mask = threshold(&hsv, range)?;
    let segmented = composite(image, &mask)?;
    Ok(Detection { segmented, mask })
}

// Runs the pipeline for a set of ranges over one source image. The HSV
// conversion happens once; each range's threshold + composite is
// independent and runs in parallel. Fails fast on the first typed error.
pub fn detect_colors(
    image: &Frame,
    ranges: &[ColorRange],
) -> Result<Vec<(String, Detection)>, DetectionError> {
    let hsv = image.to_hsv()?;
    ranges
        .par_iter()
        .map(|range| {
            let mask = threshold(&hsv, range)?;
            let segmented = composite(image, &mask)?;
            Ok((range.name.clone(), Detection { segmented, mask }))
        })
        .collect()
}
