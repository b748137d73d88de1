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

//! The attribute model: the closed set of per-field metadata kinds and the
//! raw field declarations they are attached to.

use crate::conversion::ConversionMode;
use crate::value::{SettingType, ValueKind};

/// One piece of metadata attached to a settings field.
///
/// | Attribute | Legal on |
/// |---|---|
/// | `Min` / `Max` | int, float, direction, color, orientation |
/// | `Step` | int, float, color |
/// | `DisplayName` / `HelpText` / `ShaderVisible` | any |
/// | `Hdr` | color |
/// | `Conversion` | float |
/// | `EnumLabels` | enum |
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Attribute {
    /// Lower bound, componentwise for composite kinds.
    Min(f32),
    /// Upper bound, componentwise for composite kinds.
    Max(f32),
    /// Quantization granularity, measured from the lower bound.
    Step(f32),
    /// Label shown by the UI instead of the field name.
    DisplayName(&'static str),
    /// Tooltip text.
    HelpText(&'static str),
    /// Lets a color picker go beyond `[0, 1]`.
    Hdr(bool),
    /// Conversion applied when consumers read the value.
    Conversion(ConversionMode),
    /// `false` keeps the field out of the constant buffer.
    ShaderVisible(bool),
    /// One label per enum variant.
    EnumLabels(&'static [&'static str]),
}

impl Attribute {
    /// The attribute's name, as written in `#[setting(...)]`.
    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Min(_) => "min",
            Attribute::Max(_) => "max",
            Attribute::Step(_) => "step",
            Attribute::DisplayName(_) => "display_name",
            Attribute::HelpText(_) => "help",
            Attribute::Hdr(_) => "hdr",
            Attribute::Conversion(_) => "conversion",
            Attribute::ShaderVisible(_) => "shader",
            Attribute::EnumLabels(_) => "enum_labels",
        }
    }

    /// Returns `true` if this attribute may be attached to a field of `kind`.
    pub fn applies_to(&self, kind: &ValueKind) -> bool {
        match self {
            Attribute::Min(_) | Attribute::Max(_) => kind.is_numeric() || kind.is_composite(),
            // Unit-length kinds are re-normalized after clamping, which would
            // immediately leave the step grid.
            Attribute::Step(_) => kind.is_numeric() || *kind == ValueKind::Color,
            Attribute::DisplayName(_) | Attribute::HelpText(_) | Attribute::ShaderVisible(_) => {
                true
            }
            Attribute::Hdr(_) => *kind == ValueKind::Color,
            Attribute::Conversion(_) => *kind == ValueKind::Float,
            Attribute::EnumLabels(_) => matches!(kind, ValueKind::Enum { .. }),
        }
    }
}

/// The raw declaration of one field: its name, kind and attached attributes,
/// in the order they were written.
///
/// Produced by `#[derive(Settings)]`; turned into a
/// [`FieldDescriptor`](crate::FieldDescriptor) by [`discover`](crate::discovery::discover).
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    name: &'static str,
    kind: ValueKind,
    attributes: Vec<Attribute>,
}

impl FieldDecl {
    /// Declares a field of an explicit kind with no attributes.
    pub fn new(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            kind,
            attributes: Vec::new(),
        }
    }

    /// Declares a field stored as `T`. Enum types contribute their label table.
    pub fn of<T: SettingType>(name: &'static str) -> Self {
        let decl = Self::new(name, T::kind());
        match T::labels() {
            Some(labels) => decl.with(Attribute::EnumLabels(labels)),
            None => decl,
        }
    }

    /// Attaches an attribute.
    #[must_use]
    pub fn with(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// The field name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The field kind.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// The attached attributes, in declaration order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }
}
