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

//! Defines the `Vec3` type used for direction settings.

use super::MIN_LENGTH_SQUARED;
use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// A 3-dimensional vector with `f32` components.
///
/// Occupies 12 bytes; constant-buffer layouts place it as a `float3`.
#[derive(
    Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize,
)]
#[repr(C)]
pub struct Vec3 {
    /// The x component of the vector.
    pub x: f32,
    /// The y component of the vector.
    pub y: f32,
    /// The z component of the vector.
    pub z: f32,
}

impl Vec3 {
    /// A vector with all components set to `0.0`.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// The unit vector pointing along the positive Y-axis.
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);

    /// Creates a new `Vec3` with the specified components.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Creates a `Vec3` from an array of components.
    #[inline]
    pub const fn from_array(a: [f32; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }

    /// Returns the components as an array.
    #[inline]
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Calculates the squared length (magnitude) of the vector.
    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.dot(*self)
    }

    /// Calculates the length (magnitude) of the vector.
    #[inline]
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Returns the vector scaled to a length of 1.
    ///
    /// Returns `None` when the vector is too short (or not finite) to have a
    /// meaningful direction.
    #[inline]
    pub fn try_normalize(&self) -> Option<Self> {
        let len_sq = self.length_squared();
        if len_sq.is_finite() && len_sq > MIN_LENGTH_SQUARED {
            Some(*self * (1.0 / len_sq.sqrt()))
        } else {
            None
        }
    }

    /// Calculates the dot product of this vector and another.
    #[inline]
    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl Default for Vec3 {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32) -> Self::Output {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_try_normalize_unit_length() {
        let v = Vec3::new(-0.75, 0.977, -0.4).try_normalize().unwrap();
        assert_relative_eq!(v.length(), 1.0, epsilon = 1e-5);
        assert!(v.x < 0.0 && v.y > 0.0 && v.z < 0.0);
    }

    #[test]
    fn test_try_normalize_degenerate() {
        assert!(Vec3::ZERO.try_normalize().is_none());
        assert!(Vec3::new(f32::NAN, 1.0, 0.0).try_normalize().is_none());
    }

    #[test]
    fn test_short_but_valid_direction_normalizes() {
        let v = Vec3::new(0.0, 1e-4, 0.0).try_normalize().unwrap();
        assert_relative_eq!(v.y, 1.0, epsilon = 1e-6);
        assert!(Vec3::new(0.0, 5e-6, 0.0).try_normalize().is_none());
    }

    #[test]
    fn test_array_roundtrip_and_bytes() {
        let v = Vec3::from_array([1.0, 2.0, 3.0]);
        assert_eq!(v.to_array(), [1.0, 2.0, 3.0]);
        assert_eq!(bytemuck::bytes_of(&v).len(), 12);
    }
}
