// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Defines the `LinearRgb` color type used for color settings.

use serde::{Deserialize, Serialize};

/// Represents a color in a **linear RGB** color space using `f32` components.
///
/// Components may exceed `1.0` for High Dynamic Range (HDR) colors such as
/// light intensities. Packed as a 12-byte `float3`.
#[derive(
    Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize,
)]
#[repr(C)]
pub struct LinearRgb {
    /// The red component in linear space.
    pub r: f32,
    /// The green component in linear space.
    pub g: f32,
    /// The blue component in linear space.
    pub b: f32,
}

impl LinearRgb {
    /// White (`[1.0, 1.0, 1.0]`).
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    /// Creates a new `LinearRgb` with explicit RGB values.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Creates a color from `[r, g, b]`.
    #[inline]
    pub const fn from_array(a: [f32; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }

    /// Returns the components as `[r, g, b]`.
    #[inline]
    pub const fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Converts this linear color to sRGB components, for display swatches.
    #[inline]
    pub fn to_srgb(&self) -> [f32; 3] {
        [
            linear_to_srgb(self.r),
            linear_to_srgb(self.g),
            linear_to_srgb(self.b),
        ]
    }

    /// Converts this linear color to an sRGB hex string (`#RRGGBB`).
    ///
    /// HDR components are clamped to `[0.0, 1.0]` after the transfer function.
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_srgb().map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
        format!("#{r:02X}{g:02X}{b:02X}")
    }
}

impl Default for LinearRgb {
    /// Returns white by default.
    #[inline]
    fn default() -> Self {
        Self::WHITE
    }
}

// --- Helper function for sRGB display ---

#[inline]
fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_srgb_transfer() {
        let [r, g, b] = LinearRgb::new(0.0, 0.214_041, 1.0).to_srgb();
        assert_eq!(r, 0.0);
        assert_relative_eq!(g, 0.5, epsilon = 1e-4);
        assert_relative_eq!(b, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_hdr_hex_is_clamped() {
        assert_eq!(LinearRgb::new(20.0, 16.0, 10.0).to_hex(), "#FFFFFF");
        assert_eq!(LinearRgb::new(0.0, 0.0, 0.0).to_hex(), "#000000");
        assert_eq!(LinearRgb::WHITE.to_hex(), "#FFFFFF");
    }
}
