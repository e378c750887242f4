//! Rainbow chase
//!
//! The strip is lit in three interleaved passes. Pass `i` paints every pixel
//! `j` with `j % 3 == i` using a hue spread evenly along the strip. After all
//! passes the whole rainbow is rotated by one hue step.

use crate::color::{Rgb, hsv_to_rgb};

/// Number of interleaved lighting passes per cycle
pub const CHASE_SUB_PHASES: usize = 3;

const FULL_SATURATION: u8 = 100;
const FULL_VALUE: u8 = 100;

#[derive(Debug, Clone)]
pub struct ChaseState {
    /// Hue added to every pixel, in degrees
    rotation_offset: u16,
    /// Hue advance per completed cycle, in degrees
    hue_step: u16,
}

impl ChaseState {
    pub const fn new(hue_step: u16) -> Self {
        Self {
            rotation_offset: 0,
            hue_step,
        }
    }

    pub fn rotation_offset(&self) -> u16 {
        self.rotation_offset
    }

    /// Paint the pixels belonging to `sub_phase`
    ///
    /// Pixels of other residue classes keep their previous value.
    pub fn light_sub_phase<const N: usize>(&self, pixels: &mut [Rgb; N], sub_phase: usize) {
        let offset = u32::from(self.rotation_offset);
        for (j, pixel) in pixels
            .iter_mut()
            .enumerate()
            .skip(sub_phase)
            .step_by(CHASE_SUB_PHASES)
        {
            let hue = pixel_hue(j, N) + offset;
            *pixel = hsv_to_rgb(hue, FULL_SATURATION, FULL_VALUE);
        }
    }

    /// Rotate the rainbow after a full cycle
    pub fn advance(&mut self) {
        self.rotation_offset = self.rotation_offset.wrapping_add(self.hue_step);
    }
}

#[allow(clippy::cast_possible_truncation)]
fn pixel_hue(index: usize, len: usize) -> u32 {
    // index < len, so the quotient is below 360
    (index * 360 / len) as u32
}
