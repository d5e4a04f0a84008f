//! Colors and color spaces.

use core::fmt::{self, Debug, Formatter};

use crate::math::vec::Vector;

/// The RGB color space.
///
/// Channels are unnormalized, nominally in the range 0 to 255, and may be
/// combined linearly like any other vector; they are only clamped when
/// converted to a packed pixel value.
#[derive(Copy, Clone, Default, Eq, PartialEq)]
pub struct Rgb;

/// An RGB color with `f64` channels.
pub type Color3 = Vector<[f64; 3], Rgb>;

/// Returns a new RGB color with `r`, `g`, and `b` channels.
pub const fn rgb(r: f64, g: f64, b: f64) -> Color3 {
    Vector::new([r, g, b])
}

/// Black, `rgb(0, 0, 0)`.
pub const BLACK: Color3 = rgb(0.0, 0.0, 0.0);
/// White, `rgb(255, 255, 255)`.
pub const WHITE: Color3 = rgb(255.0, 255.0, 255.0);

impl Color3 {
    /// Returns the red channel of `self`.
    pub const fn r(&self) -> f64 {
        self.0[0]
    }
    /// Returns the green channel of `self`.
    pub const fn g(&self) -> f64 {
        self.0[1]
    }
    /// Returns the blue channel of `self`.
    pub const fn b(&self) -> f64 {
        self.0[2]
    }

    /// Returns the channels of `self` clamped to 0..=255 and truncated
    /// to bytes.
    pub fn to_u8(self) -> [u8; 3] {
        self.0.map(|c| {
            // NaN clamps to NaN and then casts to 0
            c.clamp(0.0, 255.0) as u8
        })
    }

    /// Returns a `u32` containing the channel bytes of `self`
    /// in format `0x00_RR_GG_BB`.
    ///
    /// # Examples
    /// ```
    /// # use mathy_core::math::rgb;
    /// assert_eq!(rgb(255.0, 128.0, 0.0).to_rgb_u32(), 0x00_FF_80_00);
    /// assert_eq!(rgb(300.0, -5.0, 17.9).to_rgb_u32(), 0x00_FF_00_11);
    /// ```
    pub fn to_rgb_u32(self) -> u32 {
        let [r, g, b] = self.to_u8();
        u32::from_be_bytes([0x00, r, g, b])
    }
}

impl Debug for Rgb {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("Rgb")
    }
}
