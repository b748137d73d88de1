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

//! Field descriptors: the immutable, validated metadata of one settings field.
//!
//! Descriptors are only created by [`discover`](crate::discovery::discover)
//! and are the single contract shared by the UI layer and the packer.

use crate::conversion::ConversionMode;
use crate::value::ValueKind;

/// Inclusive value range. A side that was not declared is infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Lower bound (`f32::NEG_INFINITY` when only `max` was declared).
    pub min: f32,
    /// Upper bound (`f32::INFINITY` when only `min` was declared).
    pub max: f32,
}

impl Bounds {
    /// A range with no limits on either side.
    pub const UNBOUNDED: Bounds = Bounds {
        min: f32::NEG_INFINITY,
        max: f32::INFINITY,
    };

    /// Returns `true` if both sides are finite (slider-friendly).
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Returns `true` if `value` lies within the range.
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Immutable metadata record describing one settings field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub(crate) index: usize,
    pub(crate) name: &'static str,
    pub(crate) kind: ValueKind,
    pub(crate) bounds: Option<Bounds>,
    pub(crate) step: Option<f32>,
    pub(crate) display_name: &'static str,
    pub(crate) help_text: &'static str,
    pub(crate) hdr: bool,
    pub(crate) conversion: ConversionMode,
    pub(crate) shader_visible: bool,
    pub(crate) enum_labels: Option<&'static [&'static str]>,
}

impl FieldDescriptor {
    /// Position of the field in its category (declaration order).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Identifier, unique within the category.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The field's value type.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Declared range, if any.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Quantization step, if any.
    pub fn step(&self) -> Option<f32> {
        self.step
    }

    /// Human-readable label; the field name unless overridden.
    pub fn display_name(&self) -> &'static str {
        self.display_name
    }

    /// Tooltip text; empty unless declared.
    pub fn help_text(&self) -> &'static str {
        self.help_text
    }

    /// Whether a color field accepts values beyond `[0, 1]` in the UI.
    pub fn is_hdr(&self) -> bool {
        self.hdr
    }

    /// Conversion applied when consumers read the value.
    pub fn conversion(&self) -> ConversionMode {
        self.conversion
    }

    /// Whether the field is packed into the constant buffer.
    pub fn is_shader_visible(&self) -> bool {
        self.shader_visible
    }

    /// One label per variant, for enum fields.
    pub fn enum_labels(&self) -> Option<&'static [&'static str]> {
        self.enum_labels
    }

    /// Label of the variant at `index`, for enum fields.
    pub fn enum_label(&self, index: u32) -> Option<&'static str> {
        self.enum_labels
            .and_then(|labels| labels.get(index as usize).copied())
    }
}
