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

//! Value types: the closed set of field kinds and the type-erased value that
//! travels between categories, the UI layer and the packer.

use lumen_core::math::{LinearRgb, Quaternion, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The type of a settings field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// A checkbox-style flag.
    Bool,
    /// A signed integer.
    Int,
    /// A scalar float.
    Float,
    /// An integer-backed enum whose values are `0..variant_count`.
    Enum {
        /// Number of variants; valid indices are `0..variant_count`.
        variant_count: u32,
    },
    /// A unit-length direction vector.
    Direction,
    /// A linear RGB color, possibly HDR.
    Color,
    /// A unit quaternion.
    Orientation,
}

impl ValueKind {
    /// A short, stable name used in error messages and diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Enum { .. } => "enum",
            ValueKind::Direction => "direction",
            ValueKind::Color => "color",
            ValueKind::Orientation => "orientation",
        }
    }

    /// Returns `true` for scalar numeric kinds (`Int`, `Float`).
    pub fn is_numeric(&self) -> bool {
        matches!(self, ValueKind::Int | ValueKind::Float)
    }

    /// Returns `true` for multi-component numeric kinds.
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            ValueKind::Direction | ValueKind::Color | ValueKind::Orientation
        )
    }

    /// Returns `true` if `value` is of this kind.
    pub fn accepts(&self, value: &SettingValue) -> bool {
        matches!(
            (self, value),
            (ValueKind::Bool, SettingValue::Bool(_))
                | (ValueKind::Int, SettingValue::Int(_))
                | (ValueKind::Float, SettingValue::Float(_))
                | (ValueKind::Enum { .. }, SettingValue::Enum(_))
                | (ValueKind::Direction, SettingValue::Direction(_))
                | (ValueKind::Color, SettingValue::Color(_))
                | (ValueKind::Orientation, SettingValue::Orientation(_))
        )
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Enum { variant_count } => write!(f, "enum ({variant_count} variants)"),
            other => f.write_str(other.name()),
        }
    }
}

/// A type-erased settings value.
///
/// Stored values are always the UI-facing (perceptual) ones; see
/// [`ConversionMode`](crate::ConversionMode) for the physical view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SettingValue {
    /// A flag.
    Bool(bool),
    /// A signed integer.
    Int(i32),
    /// A scalar float.
    Float(f32),
    /// An enum variant index.
    Enum(u32),
    /// A direction vector.
    Direction(Vec3),
    /// A linear RGB color.
    Color(LinearRgb),
    /// An orientation quaternion.
    Orientation(Quaternion),
}

impl SettingValue {
    /// The name of this value's kind, matching [`ValueKind::name`].
    pub fn kind_name(&self) -> &'static str {
        match self {
            SettingValue::Bool(_) => "bool",
            SettingValue::Int(_) => "int",
            SettingValue::Float(_) => "float",
            SettingValue::Enum(_) => "enum",
            SettingValue::Direction(_) => "direction",
            SettingValue::Color(_) => "color",
            SettingValue::Orientation(_) => "orientation",
        }
    }

    /// Returns the flag if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the scalar if this is a `Float`.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            SettingValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the integer if this is an `Int`.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            SettingValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the variant index if this is an `Enum`.
    pub fn as_enum_index(&self) -> Option<u32> {
        match self {
            SettingValue::Enum(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the floating-point components of the value, in packing order.
    ///
    /// Flags and enum indices have no float components and yield an empty
    /// vector.
    pub fn components(&self) -> Vec<f32> {
        match self {
            SettingValue::Bool(_) | SettingValue::Enum(_) => Vec::new(),
            SettingValue::Int(v) => vec![*v as f32],
            SettingValue::Float(v) => vec![*v],
            SettingValue::Direction(v) => v.to_array().to_vec(),
            SettingValue::Color(c) => c.to_array().to_vec(),
            SettingValue::Orientation(q) => q.to_array().to_vec(),
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Bool(b) => write!(f, "{b}"),
            SettingValue::Int(v) => write!(f, "{v}"),
            SettingValue::Float(v) => write!(f, "{v}"),
            SettingValue::Enum(i) => write!(f, "#{i}"),
            SettingValue::Direction(v) => write!(f, "({}, {}, {})", v.x, v.y, v.z),
            SettingValue::Color(c) => write!(f, "rgb({}, {}, {})", c.r, c.g, c.b),
            SettingValue::Orientation(q) => write!(f, "quat({}, {}, {}, {})", q.x, q.y, q.z, q.w),
        }
    }
}

/// A Rust type that can be stored in a settings field.
///
/// Implemented here for the built-in kinds and by `#[derive(SettingEnum)]`
/// for enums.
pub trait SettingType: Copy + 'static {
    /// The field kind this type maps to.
    fn kind() -> ValueKind;

    /// The enum label table, for enum types only.
    fn labels() -> Option<&'static [&'static str]> {
        None
    }

    /// Converts the typed value into a [`SettingValue`].
    fn to_value(self) -> SettingValue;

    /// Converts back; `None` if `value` is of another kind or out of range.
    fn from_value(value: SettingValue) -> Option<Self>;
}

/// An integer-backed enum with one display label per variant.
///
/// Usually derived: `#[derive(SettingEnum)]` with optional `#[label("...")]`
/// on each variant.
pub trait SettingEnum: Copy + 'static {
    /// One label per variant, indexed by variant position.
    const LABELS: &'static [&'static str];

    /// The variant's index (`0..LABELS.len()`).
    fn index(self) -> u32;

    /// The variant at `index`, if any.
    fn from_index(index: u32) -> Option<Self>;

    /// The display label of this variant.
    fn label(self) -> &'static str {
        Self::LABELS
            .get(self.index() as usize)
            .copied()
            .unwrap_or_default()
    }
}

impl SettingType for bool {
    fn kind() -> ValueKind {
        ValueKind::Bool
    }
    fn to_value(self) -> SettingValue {
        SettingValue::Bool(self)
    }
    fn from_value(value: SettingValue) -> Option<Self> {
        value.as_bool()
    }
}

impl SettingType for i32 {
    fn kind() -> ValueKind {
        ValueKind::Int
    }
    fn to_value(self) -> SettingValue {
        SettingValue::Int(self)
    }
    fn from_value(value: SettingValue) -> Option<Self> {
        value.as_i32()
    }
}

impl SettingType for f32 {
    fn kind() -> ValueKind {
        ValueKind::Float
    }
    fn to_value(self) -> SettingValue {
        SettingValue::Float(self)
    }
    fn from_value(value: SettingValue) -> Option<Self> {
        value.as_f32()
    }
}

impl SettingType for Vec3 {
    fn kind() -> ValueKind {
        ValueKind::Direction
    }
    fn to_value(self) -> SettingValue {
        SettingValue::Direction(self)
    }
    fn from_value(value: SettingValue) -> Option<Self> {
        match value {
            SettingValue::Direction(v) => Some(v),
            _ => None,
        }
    }
}

impl SettingType for LinearRgb {
    fn kind() -> ValueKind {
        ValueKind::Color
    }
    fn to_value(self) -> SettingValue {
        SettingValue::Color(self)
    }
    fn from_value(value: SettingValue) -> Option<Self> {
        match value {
            SettingValue::Color(c) => Some(c),
            _ => None,
        }
    }
}

impl SettingType for Quaternion {
    fn kind() -> ValueKind {
        ValueKind::Orientation
    }
    fn to_value(self) -> SettingValue {
        SettingValue::Orientation(self)
    }
    fn from_value(value: SettingValue) -> Option<Self> {
        match value {
            SettingValue::Orientation(q) => Some(q),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, crate::SettingEnum)]
    enum Quality {
        Low,
        #[label("Medium quality")]
        Medium,
        High = 2,
    }

    #[test]
    fn test_kind_accepts_matching_values_only() {
        assert!(ValueKind::Float.accepts(&SettingValue::Float(1.0)));
        assert!(!ValueKind::Float.accepts(&SettingValue::Int(1)));
        assert!(ValueKind::Enum { variant_count: 3 }.accepts(&SettingValue::Enum(7)));
    }

    #[test]
    fn test_derived_enum_labels_and_indices() {
        assert_eq!(Quality::LABELS, &["Low", "Medium quality", "High"]);
        assert_eq!(Quality::High.index(), 2);
        assert_eq!(Quality::from_index(1), Some(Quality::Medium));
        assert_eq!(Quality::from_index(3), None);
        assert_eq!(Quality::Medium.label(), "Medium quality");
    }

    #[test]
    fn test_derived_enum_setting_type() {
        assert_eq!(Quality::kind(), ValueKind::Enum { variant_count: 3 });
        assert_eq!(Quality::High.to_value(), SettingValue::Enum(2));
        assert_eq!(Quality::from_value(SettingValue::Enum(0)), Some(Quality::Low));
        assert_eq!(Quality::from_value(SettingValue::Bool(true)), None);
    }

    #[test]
    fn test_value_serializes_with_kind_tag() {
        let json = serde_json::to_string(&SettingValue::Float(0.5)).unwrap();
        assert_eq!(json, r#"{"Float":0.5}"#);
        let back: SettingValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SettingValue::Float(0.5));
    }
}
