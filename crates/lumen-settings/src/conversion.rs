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

//! Conversions from the stored (perceptual) value of a float field to the
//! physical value handed to consumers.

use crate::error::DeclarationError;
use lumen_core::math::degrees_to_radians;
use std::fmt;
use std::str::FromStr;

/// A pure function applied when a consumer reads a float field.
///
/// The stored value is never converted; the UI keeps editing the perceptual
/// range while shaders and rendering code receive physical values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConversionMode {
    /// `physical = stored`.
    #[default]
    None,
    /// `physical = stored²`, e.g. perceptual roughness to physical roughness.
    /// Monotonic for `stored >= 0`; negative values fold onto the positive side.
    Square,
    /// `physical = √stored`. Only monotonic for `stored >= 0`, so the field
    /// must declare `min >= 0`.
    SquareRoot,
    /// `physical = stored * π / 180`, for angles edited in degrees.
    DegreesToRadians,
}

impl ConversionMode {
    /// All defined modes, in declaration order.
    pub const ALL: [ConversionMode; 4] = [
        ConversionMode::None,
        ConversionMode::Square,
        ConversionMode::SquareRoot,
        ConversionMode::DegreesToRadians,
    ];

    /// Applies the conversion to a stored value.
    #[inline]
    pub fn apply(self, stored: f32) -> f32 {
        match self {
            ConversionMode::None => stored,
            ConversionMode::Square => stored * stored,
            ConversionMode::SquareRoot => stored.sqrt(),
            ConversionMode::DegreesToRadians => degrees_to_radians(stored),
        }
    }

    /// The lowest stored value for which the conversion is defined and
    /// monotonic, if it has one.
    pub fn domain_min(self) -> Option<f32> {
        match self {
            ConversionMode::SquareRoot => Some(0.0),
            _ => None,
        }
    }

    /// The mode's name as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            ConversionMode::None => "None",
            ConversionMode::Square => "Square",
            ConversionMode::SquareRoot => "SquareRoot",
            ConversionMode::DegreesToRadians => "DegreesToRadians",
        }
    }
}

impl fmt::Display for ConversionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConversionMode {
    type Err = DeclarationError;

    /// Parses a mode name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DeclarationError::UndefinedConversion {
                name: s.to_string(),
            })
    }
}
