//! Breathing pulse envelope
//!
//! A fast doubling rise (`1 << tick`) followed by a halving decay
//! (`255 >> tick`). The tick counter restarts on the phase switch and stops
//! once the envelope reaches zero, so the strip settles dark until the next
//! pulse command.

use crate::color::Rgb;

/// Highest rise ceiling whose last step (`1 << 7`) still fits 8 bits
pub const MAX_RISE_CEILING: u8 = 8;

const FULL_INTENSITY: u8 = u8::MAX;

#[derive(Debug, Clone)]
pub struct PulseState {
    tick: u8,
    rising: bool,
    rise_ceiling: u8,
    fall_ceiling: Option<u8>,
}

impl PulseState {
    pub fn new(rise_ceiling: u8, fall_ceiling: Option<u8>) -> Self {
        Self {
            tick: 0,
            rising: true,
            rise_ceiling: rise_ceiling.min(MAX_RISE_CEILING),
            fall_ceiling,
        }
    }

    /// Restart the envelope from the bottom of the rise
    pub fn reset(&mut self) {
        self.tick = 0;
        self.rising = true;
    }

    pub fn tick(&self) -> u8 {
        self.tick
    }

    pub fn is_rising(&self) -> bool {
        self.rising
    }

    /// Intensity for the next frame (0-255)
    pub fn next_intensity(&mut self) -> u8 {
        if self.rising && self.tick >= self.rise_ceiling {
            self.rising = false;
            self.tick = 0;
        }

        let intensity = if self.rising {
            1u8 << self.tick
        } else if self.fall_ceiling.is_some_and(|ceiling| self.tick >= ceiling) {
            0
        } else {
            FULL_INTENSITY.checked_shr(u32::from(self.tick)).unwrap_or(0)
        };

        if intensity > 0 {
            self.tick += 1;
        }
        intensity
    }
}

/// Scale one channel by an intensity (truncating)
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub fn scale_channel(channel: u8, intensity: u8) -> u8 {
    // channel * intensity / 255 <= channel
    (u16::from(channel) * u16::from(intensity) / u16::from(FULL_INTENSITY)) as u8
}

/// Scale every channel of a color by an intensity
#[inline]
pub fn scale_color(color: Rgb, intensity: u8) -> Rgb {
    Rgb {
        r: scale_channel(color.r, intensity),
        g: scale_channel(color.g, intensity),
        b: scale_channel(color.b, intensity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn take<const K: usize>(pulse: &mut PulseState) -> [u8; K] {
        let mut out = [0; K];
        for value in &mut out {
            *value = pulse.next_intensity();
        }
        out
    }

    #[test]
    fn envelope_rises_then_falls_to_dark() {
        let mut pulse = PulseState::new(7, None);
        assert_eq!(take::<7>(&mut pulse), [1, 2, 4, 8, 16, 32, 64]);
        assert!(pulse.is_rising());
        assert_eq!(take::<9>(&mut pulse), [255, 127, 63, 31, 15, 7, 3, 1, 0]);
        assert!(!pulse.is_rising());
    }

    #[test]
    fn tick_freezes_once_dark() {
        let mut pulse = PulseState::new(7, None);
        take::<16>(&mut pulse);
        let frozen = pulse.tick();
        assert_eq!(take::<4>(&mut pulse), [0; 4]);
        assert_eq!(pulse.tick(), frozen);
    }

    #[test]
    fn reset_restarts_the_rise() {
        let mut pulse = PulseState::new(7, None);
        take::<10>(&mut pulse);
        pulse.reset();
        assert!(pulse.is_rising());
        assert_eq!(take::<3>(&mut pulse), [1, 2, 4]);
    }

    #[test]
    fn rise_ceiling_is_clamped() {
        let mut pulse = PulseState::new(200, None);
        assert_eq!(
            take::<9>(&mut pulse),
            [1, 2, 4, 8, 16, 32, 64, 128, 255]
        );
    }

    #[test]
    fn fall_ceiling_cuts_the_decay() {
        let mut pulse = PulseState::new(2, Some(3));
        assert_eq!(take::<6>(&mut pulse), [1, 2, 255, 127, 63, 0]);
    }

    #[test]
    fn channels_scale_by_truncating_division() {
        assert_eq!(scale_channel(255, 255), 255);
        assert_eq!(scale_channel(200, 64), 50);
        assert_eq!(scale_channel(255, 1), 1);
        assert_eq!(scale_channel(100, 1), 0);
        assert_eq!(
            scale_color(Rgb::new(255, 128, 0), 127),
            Rgb::new(127, 63, 0)
        );
    }
}
