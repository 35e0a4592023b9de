pub mod config;
pub mod detection;
pub mod frame;

pub use config::Config;
pub use detection::{composite, detect_color, detect_colors, threshold, Detection, DetectionError};
pub use frame::{Frame, FrameError, PixelFormat};
pub use segment_detection::color::{rgb_to_hsv, ColorRange, RangeError};
