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

//! Provides a Quaternion type for orientation settings.

use serde::{Deserialize, Serialize};

use super::MIN_LENGTH_SQUARED;

/// Represents a quaternion for 3D rotations.
///
/// Stored as `(x, y, z, w)`, where `[x, y, z]` is the vector part and `w` is
/// the scalar part. Orientation settings always hold a unit quaternion
/// (`x² + y² + z² + w² = 1`); the settings write path re-normalizes after
/// clamping components. Packed as a 16-byte `float4`.
#[derive(
    Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize,
)]
#[repr(C)]
pub struct Quaternion {
    /// The x component of the vector part.
    pub x: f32,
    /// The y component of the vector part.
    pub y: f32,
    /// The z component of the vector part.
    pub z: f32,
    /// The scalar (real) part.
    pub w: f32,
}

impl Quaternion {
    /// The identity quaternion, representing no rotation.
    pub const IDENTITY: Quaternion = Quaternion::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a new quaternion from its raw components.
    ///
    /// Note: This does not guarantee a unit quaternion.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Creates a quaternion from `[x, y, z, w]`.
    #[inline]
    pub const fn from_array(a: [f32; 4]) -> Self {
        Self::new(a[0], a[1], a[2], a[3])
    }

    /// Returns the components as `[x, y, z, w]`.
    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Calculates the squared length (magnitude) of the quaternion.
    #[inline]
    pub fn magnitude_squared(&self) -> f32 {
        self.dot(*self)
    }

    /// Calculates the length (magnitude) of the quaternion.
    #[inline]
    pub fn magnitude(&self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    /// Returns the quaternion scaled to unit length.
    ///
    /// Returns `None` for a near-zero or non-finite quaternion, which has no
    /// meaningful orientation.
    pub fn try_normalize(&self) -> Option<Self> {
        let mag_sq = self.magnitude_squared();
        if mag_sq.is_finite() && mag_sq > MIN_LENGTH_SQUARED {
            let inv_mag = 1.0 / mag_sq.sqrt();
            Some(Self::new(
                self.x * inv_mag,
                self.y * inv_mag,
                self.z * inv_mag,
                self.w * inv_mag,
            ))
        } else {
            None
        }
    }

    /// Computes the dot product of two quaternions.
    #[inline]
    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }
}

impl Default for Quaternion {
    /// Returns the identity quaternion, representing no rotation.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_is_unit() {
        assert_relative_eq!(Quaternion::IDENTITY.magnitude(), 1.0);
        assert_eq!(Quaternion::default(), Quaternion::IDENTITY);
    }

    #[test]
    fn test_try_normalize() {
        let q = Quaternion::new(0.41, -0.55, -0.29, 0.67).try_normalize().unwrap();
        assert_relative_eq!(q.magnitude(), 1.0, epsilon = 1e-5);
        assert!(Quaternion::new(0.0, 0.0, 0.0, 0.0).try_normalize().is_none());
    }

    #[test]
    fn test_degenerate_threshold_matches_vec3() {
        let short = Quaternion::new(0.0, 0.0, 0.0, 1e-4).try_normalize().unwrap();
        assert_relative_eq!(short.w, 1.0, epsilon = 1e-6);
        assert!(Quaternion::new(0.0, 0.0, 0.0, 5e-6).try_normalize().is_none());
    }
}
