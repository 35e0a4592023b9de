use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("range '{name}': lower bound {lower} exceeds upper bound {upper} on channel {channel}")]
    LowerAboveUpper {
        name: String,
        channel: usize,
        lower: u8,
        upper: u8,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
// A named inclusive HSV bound. Hue lives on the 0-179 half-circle scale,
// saturation and value on 0-255. Hue wraparound is not modeled; callers
// that need it run two ranges and OR the masks themselves.
pub struct ColorRange {
    pub name: String,
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl ColorRange {
    pub fn new(name: impl Into<String>, lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self {
            name: name.into(),
            lower,
            upper,
        }
    }

    // Rejects bounds where any channel's lower exceeds its upper.
    pub fn validate(&self) -> Result<(), RangeError> {
        for channel in 0..3 {
            if self.lower[channel] > self.upper[channel] {
                return Err(RangeError::LowerAboveUpper {
                    name: self.name.clone(),
                    channel,
                    lower: self.lower[channel],
                    upper: self.upper[channel],
                });
            }
        }
        Ok(())
    }

    pub fn in_range(&self, h: u8, s: u8, v: u8) -> bool {
        h >= self.lower[0]
            && h <= self.upper[0]
            && s >= self.lower[1]
            && s <= self.upper[1]
            && v >= self.lower[2]
            && v <= self.upper[2]
    }
}

// Converts an RGB triple to HSV components scaled to bytes, hue on 0-179.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta) % 6.0)
    } else if max == g {
        60.0 * (((b - r) / delta) + 2.0)
    } else {
        60.0 * (((r - g) / delta) + 4.0)
    };

    // Half the degree scale so hue fits a byte; negatives wrap by +180,
    // and rounding at the wrap point folds 180 back onto 0.
    let h = h / 2.0;
    let h = if h < 0.0 { h + 180.0 } else { h };
    let h_byte = (h.round() as u16 % 180) as u8;

    let s = if max == 0.0 { 0.0 } else { delta / max };
    let s_byte = (s * 255.0).round() as u8;
    let v_byte = (max * 255.0).round() as u8;

    (h_byte, s_byte, v_byte)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_colors_land_on_expected_hues() {
        assert_eq!(rgb_to_hsv(255, 0, 0), (0, 255, 255));
        assert_eq!(rgb_to_hsv(0, 255, 0), (60, 255, 255));
        assert_eq!(rgb_to_hsv(0, 0, 255), (120, 255, 255));
    }

    #[test]
    fn black_converts_to_all_zero() {
        assert_eq!(rgb_to_hsv(0, 0, 0), (0, 0, 0));
    }

    #[test]
    fn achromatic_pixels_have_zero_saturation() {
        assert_eq!(rgb_to_hsv(255, 255, 255), (0, 0, 255));
        assert_eq!(rgb_to_hsv(128, 128, 128), (0, 0, 128));
    }

    #[test]
    fn near_red_wraps_onto_low_hue() {
        // A slightly magenta-leaning red sits just below 360 degrees; the
        // byte scale folds it back near zero instead of emitting 180.
        let (h, _, _) = rgb_to_hsv(255, 0, 1);
        assert!(h == 0 || h > 170, "hue {h} should sit at the wrap point");
    }

    #[test]
    fn in_range_is_inclusive_at_both_bounds() {
        let range = ColorRange::new("test", [10, 20, 30], [20, 40, 60]);
        assert!(range.in_range(10, 20, 30));
        assert!(range.in_range(20, 40, 60));
        assert!(range.in_range(15, 30, 45));
        assert!(!range.in_range(9, 30, 45));
        assert!(!range.in_range(21, 30, 45));
        assert!(!range.in_range(15, 19, 45));
        assert!(!range.in_range(15, 30, 61));
    }

    #[test]
    fn validate_rejects_inverted_bounds() {
        let range = ColorRange::new("bad", [50, 0, 0], [40, 255, 255]);
        assert_eq!(
            range.validate(),
            Err(RangeError::LowerAboveUpper {
                name: "bad".to_string(),
                channel: 0,
                lower: 50,
                upper: 40,
            })
        );
    }

    #[test]
    fn validate_accepts_degenerate_single_value_range() {
        let range = ColorRange::new("point", [5, 5, 5], [5, 5, 5]);
        assert!(range.validate().is_ok());
        assert!(range.in_range(5, 5, 5));
    }
}
