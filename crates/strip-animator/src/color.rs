//! Color space helpers
//!
//! Integer-only HSV to RGB conversion used by the rainbow chase.
//! Hue is in degrees, saturation and value are percentages.

use smart_leds::RGB8;

pub type Rgb = RGB8;

/// Black, all channels off
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

const HUE_RANGE: u32 = 360;
const SEXTANT: u32 = 60;
const PERCENT: u32 = 100;

/// Convert HSV to RGB
///
/// # Arguments
/// * `hue` - Hue in degrees, normalized modulo 360
/// * `saturation` - Saturation in percent (clamped to 0-100)
/// * `value` - Value in percent (clamped to 0-100)
///
/// The only rounding happens when scaling `value` to the 0-255 range and
/// when deriving the channel floor from saturation.
#[allow(clippy::cast_possible_truncation)]
pub fn hsv_to_rgb(hue: u32, saturation: u8, value: u8) -> Rgb {
    let hue = hue % HUE_RANGE;
    let saturation = u32::from(saturation).min(PERCENT);
    let value = u32::from(value).min(PERCENT);

    // round(v * 2.55) and round(max * (100 - s) / 100)
    let rgb_max = (value * 255 + PERCENT / 2) / PERCENT;
    let rgb_min = (rgb_max * (PERCENT - saturation) + PERCENT / 2) / PERCENT;

    let sextant = hue / SEXTANT;
    let frac = hue % SEXTANT;
    let adj = (rgb_max - rgb_min) * frac / SEXTANT;

    let (r, g, b) = match sextant {
        0 => (rgb_max, rgb_min + adj, rgb_min),
        1 => (rgb_max - adj, rgb_max, rgb_min),
        2 => (rgb_min, rgb_max, rgb_min + adj),
        3 => (rgb_min, rgb_max - adj, rgb_max),
        4 => (rgb_min + adj, rgb_min, rgb_max),
        _ => (rgb_max, rgb_min, rgb_max - adj),
    };

    // All channels are bounded by rgb_max <= 255
    Rgb {
        r: r as u8,
        g: g as u8,
        b: b as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primaries_and_secondaries_are_exact() {
        let expected = [
            (0, (255, 0, 0)),
            (60, (255, 255, 0)),
            (120, (0, 255, 0)),
            (180, (0, 255, 255)),
            (240, (0, 0, 255)),
            (300, (255, 0, 255)),
        ];
        for (hue, (r, g, b)) in expected {
            assert_eq!(hsv_to_rgb(hue, 100, 100), Rgb::new(r, g, b), "hue {hue}");
        }
    }

    #[test]
    fn hue_is_periodic() {
        for hue in 0..720 {
            assert_eq!(hsv_to_rgb(hue, 100, 100), hsv_to_rgb(hue + 360, 100, 100));
            assert_eq!(hsv_to_rgb(hue, 40, 70), hsv_to_rgb(hue + 360, 40, 70));
        }
    }

    #[test]
    fn intermediate_hue_interpolates_within_sextant() {
        // adj = 255 * 30 / 60 = 127
        assert_eq!(hsv_to_rgb(30, 100, 100), Rgb::new(255, 127, 0));
        assert_eq!(hsv_to_rgb(90, 100, 100), Rgb::new(128, 255, 0));
    }

    #[test]
    fn zero_saturation_is_gray() {
        for hue in [0, 45, 170, 359] {
            assert_eq!(hsv_to_rgb(hue, 0, 50), Rgb::new(128, 128, 128));
        }
    }

    #[test]
    fn zero_value_is_black() {
        assert_eq!(hsv_to_rgb(200, 100, 0), BLACK);
    }

    #[test]
    fn out_of_range_percentages_are_clamped() {
        assert_eq!(hsv_to_rgb(120, 250, 255), hsv_to_rgb(120, 100, 100));
    }
}
