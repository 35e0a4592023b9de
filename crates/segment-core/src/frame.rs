use segment_detection::color::rgb_to_hsv;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
// An image buffer with raw pixel data and dimensions. RGB8 is the canonical
// channel order; BGR8 sources are normalized once at the boundary.
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    format: PixelFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
// Describes how pixels are laid out and how many bytes each uses.
pub enum PixelFormat {
    Rgb8,  // 3 bytes per pixel (R, G, B)
    Bgr8,  // 3 bytes per pixel (B, G, R)
    Hsv,   // 3 bytes per pixel (H 0-179, S, V)
    Gray8, // 1 byte per pixel (masks)
}

impl PixelFormat {
    // Returns how many bytes each pixel uses for this format.
    pub const fn bytes_per_pixel(&self) -> u32 {
        match self {
            PixelFormat::Gray8 => 1,
            PixelFormat::Rgb8 | PixelFormat::Bgr8 | PixelFormat::Hsv => 3,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("buffer holds {actual} bytes but dimensions require {expected}")]
    InvalidDimensions { expected: usize, actual: usize },

    #[error("frame dimensions must be at least 1x1")]
    ZeroDimensions,

    #[error("no conversion from {from:?} to {to:?}")]
    UnsupportedConversion { from: PixelFormat, to: PixelFormat },
}

impl Frame {
    // Validates buffer size against dimensions and constructs a frame.
    pub fn new(
        data: Vec<u8>,
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::ZeroDimensions);
        }

        let expected = width as usize * height as usize * format.bytes_per_pixel() as usize;
        if data.len() != expected {
            return Err(FrameError::InvalidDimensions {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            data,
            width,
            height,
            format,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    // Returns the pixel bytes at (x, y) if inside bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let bytes_per_pixel = self.format.bytes_per_pixel() as usize;
        let index = ((y * self.width + x) as usize) * bytes_per_pixel;
        self.data.get(index..index + bytes_per_pixel)
    }

    // Converts the frame into an 8-bit RGB frame. HSV input is rejected;
    // rendering HSV is the display layer's job, not the core's.
    pub fn to_rgb8(&self) -> Result<Frame, FrameError> {
        if self.format == PixelFormat::Rgb8 {
            return Ok(self.clone());
        }

        let capacity = (self.height * self.width * 3) as usize;
        let mut new_data = Vec::with_capacity(capacity);

        match self.format {
            PixelFormat::Bgr8 => {
                for pixel in self.data.chunks_exact(3) {
                    new_data.extend([pixel[2], pixel[1], pixel[0]]);
                }
            }
            PixelFormat::Gray8 => {
                for pixel in &self.data {
                    new_data.extend([*pixel, *pixel, *pixel]);
                }
            }
            _ => {
                return Err(FrameError::UnsupportedConversion {
                    from: self.format,
                    to: PixelFormat::Rgb8,
                });
            }
        }

        Ok(Frame {
            data: new_data,
            width: self.width,
            height: self.height,
            format: PixelFormat::Rgb8,
        })
    }

    // Converts an RGB8 or BGR8 frame into HSV pixel format.
    pub fn to_hsv(&self) -> Result<Frame, FrameError> {
        let capacity = (self.height * self.width * 3) as usize;
        let mut new_data = Vec::with_capacity(capacity);

        match self.format {
            PixelFormat::Rgb8 | PixelFormat::Bgr8 => {
                for pixel in self.data.chunks_exact(3) {
                    let (r, g, b) = self.extract_rgb(pixel);
                    let (h, s, v) = rgb_to_hsv(r, g, b);
                    new_data.extend([h, s, v]);
                }
            }
            _ => {
                return Err(FrameError::UnsupportedConversion {
                    from: self.format,
                    to: PixelFormat::Hsv,
                });
            }
        }

        Ok(Frame {
            data: new_data,
            width: self.width,
            height: self.height,
            format: PixelFormat::Hsv,
        })
    }

    // Normalizes a 3-byte pixel into (r, g, b) ordering.
    fn extract_rgb(&self, pixel: &[u8]) -> (u8, u8, u8) {
        match self.format {
            PixelFormat::Bgr8 => (pixel[2], pixel[1], pixel[0]),
            _ => (pixel[0], pixel[1], pixel[2]),
        }
    }
}
