//! Color conversion between normalized RGBA and host-packed integers
//!
//! Colors are stored as four normalized `f32` channels in canonical
//! red-green-blue-alpha order. Hosts exchange colors as packed 32-bit
//! integers, either `0xRRGGBBAA` (with alpha) or `0x??RRGGBB` (without alpha,
//! where the high byte may carry host flag bits).

use crate::host::HostPlatform;
use serde::{Deserialize, Serialize};

/// Normalized RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel (0.0 - 1.0)
    pub r: f32,
    /// Green channel (0.0 - 1.0)
    pub g: f32,
    /// Blue channel (0.0 - 1.0)
    pub b: f32,
    /// Alpha channel (0.0 - 1.0)
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    /// Opaque black
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Create a color from normalized channels
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Decompose a packed host color into normalized channels
    ///
    /// With `alpha` the layout is `0xRRGGBBAA`. Without it the layout is
    /// `0x??RRGGBB` and alpha is forced to fully opaque.
    pub fn unpack(packed: u32, alpha: bool) -> Self {
        let mut shift = 0;
        let mut next = || {
            let channel = (packed >> shift) & 0xFF;
            shift += 8;
            channel as f32 / 255.0
        };

        let a = if alpha { next() } else { 1.0 };
        let b = next();
        let g = next();
        let r = next();

        Self { r, g, b, a }
    }

    /// Pack normalized channels into a host color
    ///
    /// Channels are clamped and rounded half away from zero. When `alpha` is
    /// false the high byte of `extra` is carried over unchanged (hosts use it
    /// for flag bits such as "custom color enabled").
    pub fn pack(&self, alpha: bool, extra: u32) -> u32 {
        let mut packed = 0;
        let mut shift = 0;
        let mut push = |value: f32| {
            packed |= to_byte(value) << shift;
            shift += 8;
        };

        if alpha {
            push(self.a);
        }
        push(self.b);
        push(self.g);
        push(self.r);

        if !alpha {
            packed |= extra & 0xFF00_0000;
        }

        packed
    }

    /// Convert a host theme color into canonical channel order
    ///
    /// Windows hosts store theme colors as `0x00BBGGRR`.
    pub fn from_theme(native: u32, platform: HostPlatform) -> Self {
        let rgb = if platform == HostPlatform::Windows {
            (native >> 16 & 0x00_00FF) | (native & 0x00_FF00) | (native << 16 & 0xFF_0000)
        } else {
            native
        };

        Self::unpack(rgb, false)
    }

    /// Reverse the byte order of a packed `0xRRGGBBAA` value
    pub const fn rgba_to_abgr(rgba: u32) -> u32 {
        rgba.swap_bytes()
    }

    /// Build a color from an RGBA array, forcing opaque alpha unless `alpha`
    pub const fn from_array(rgba: [f32; 4], alpha: bool) -> Self {
        Self {
            r: rgba[0],
            g: rgba[1],
            b: rgba[2],
            a: if alpha { rgba[3] } else { 1.0 },
        }
    }

    /// Channels as an RGBA array
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

fn to_byte(value: f32) -> u32 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u32
}
