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

//! Defines the error types of the settings subsystem.
//!
//! [`DeclarationError`] is raised while descriptors are built and means the
//! settings declaration itself is wrong; startup should abort. [`AccessError`]
//! is returned by the read/write API when a caller names a field that does
//! not exist or passes a value of the wrong kind. Out-of-range input is never
//! an error: it is clamped.

use crate::conversion::ConversionMode;
use crate::value::{SettingValue, ValueKind};
use std::fmt;

/// A malformed settings declaration, detected when descriptors are built.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclarationError {
    /// Two fields of the same category share a name.
    DuplicateField {
        /// The category being declared.
        category: &'static str,
        /// The repeated field name.
        field: &'static str,
    },
    /// The same attribute was attached twice to one field.
    DuplicateAttribute {
        /// The category being declared.
        category: &'static str,
        /// The offending field.
        field: &'static str,
        /// The repeated attribute.
        attribute: &'static str,
    },
    /// An attribute was attached to a field kind it does not apply to.
    IncompatibleAttribute {
        /// The category being declared.
        category: &'static str,
        /// The offending field.
        field: &'static str,
        /// The attribute that does not apply.
        attribute: &'static str,
        /// The field's kind.
        kind: ValueKind,
    },
    /// `min`/`max` are not finite, `min > max`, or (for directions and
    /// orientations) no unit-length value fits inside them.
    InvalidBounds {
        /// The category being declared.
        category: &'static str,
        /// The offending field.
        field: &'static str,
        /// The declared minimum.
        min: f32,
        /// The declared maximum.
        max: f32,
    },
    /// The step is not finite and positive, or not integral on an int field.
    InvalidStep {
        /// The category being declared.
        category: &'static str,
        /// The offending field.
        field: &'static str,
        /// The declared step.
        step: f32,
    },
    /// An enum field has no label table.
    MissingEnumLabels {
        /// The category being declared.
        category: &'static str,
        /// The offending field.
        field: &'static str,
    },
    /// The label table does not have exactly one entry per variant.
    EnumLabelCount {
        /// The category being declared.
        category: &'static str,
        /// The offending field.
        field: &'static str,
        /// The number of variants.
        expected: u32,
        /// The number of labels.
        found: usize,
    },
    /// A label is empty, leaving a gap in the table.
    EmptyEnumLabel {
        /// The category being declared.
        category: &'static str,
        /// The offending field.
        field: &'static str,
        /// The variant index whose label is empty.
        index: usize,
    },
    /// A conversion mode name does not match any defined mode.
    UndefinedConversion {
        /// The unrecognized name.
        name: String,
    },
    /// The field's range reaches outside the domain where its conversion is defined.
    ConversionDomain {
        /// The category being declared.
        category: &'static str,
        /// The offending field.
        field: &'static str,
        /// The conversion.
        mode: ConversionMode,
        /// The declared (or implied) minimum.
        min: f32,
    },
    /// The declared default is out of bounds, off the step grid, of the wrong
    /// kind, or cannot be normalized.
    InvalidDefault {
        /// The category being declared.
        category: &'static str,
        /// The offending field.
        field: &'static str,
        /// The declared default, if it could be read.
        value: Option<SettingValue>,
    },
}

impl fmt::Display for DeclarationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationError::DuplicateField { category, field } => {
                write!(f, "Field '{category}.{field}' is declared more than once")
            }
            DeclarationError::DuplicateAttribute {
                category,
                field,
                attribute,
            } => write!(
                f,
                "Attribute '{attribute}' is attached more than once to '{category}.{field}'"
            ),
            DeclarationError::IncompatibleAttribute {
                category,
                field,
                attribute,
                kind,
            } => write!(
                f,
                "Attribute '{attribute}' cannot be attached to '{category}.{field}' of kind {kind}"
            ),
            DeclarationError::InvalidBounds {
                category,
                field,
                min,
                max,
            } => write!(
                f,
                "Invalid bounds for '{category}.{field}': min {min} / max {max}"
            ),
            DeclarationError::InvalidStep {
                category,
                field,
                step,
            } => write!(f, "Invalid step size {step} for '{category}.{field}'"),
            DeclarationError::MissingEnumLabels { category, field } => {
                write!(f, "Enum field '{category}.{field}' has no label table")
            }
            DeclarationError::EnumLabelCount {
                category,
                field,
                expected,
                found,
            } => write!(
                f,
                "Enum field '{category}.{field}' has {found} labels for {expected} variants"
            ),
            DeclarationError::EmptyEnumLabel {
                category,
                field,
                index,
            } => write!(
                f,
                "Enum field '{category}.{field}' has an empty label for variant {index}"
            ),
            DeclarationError::UndefinedConversion { name } => {
                write!(f, "Undefined conversion mode '{name}'")
            }
            DeclarationError::ConversionDomain {
                category,
                field,
                mode,
                min,
            } => write!(
                f,
                "Conversion {mode} on '{category}.{field}' is undefined below the field minimum {min}"
            ),
            DeclarationError::InvalidDefault {
                category,
                field,
                value,
            } => match value {
                Some(value) => write!(
                    f,
                    "Default value {value} of '{category}.{field}' violates its declaration"
                ),
                None => write!(f, "Default value of '{category}.{field}' cannot be read"),
            },
        }
    }
}

impl std::error::Error for DeclarationError {}

/// A read or write naming a field that does not exist, or passing the wrong kind.
#[derive(Debug, Clone, PartialEq)]
pub enum AccessError {
    /// No field with this name exists in the category.
    UnknownField {
        /// The category that was addressed.
        category: &'static str,
        /// The requested name.
        field: String,
    },
    /// No field exists at this index.
    IndexOutOfRange {
        /// The category that was addressed.
        category: &'static str,
        /// The requested index.
        index: usize,
    },
    /// The value's kind does not match the field's kind.
    TypeMismatch {
        /// The category that was addressed.
        category: &'static str,
        /// The field that was written.
        field: &'static str,
        /// The field's kind.
        expected: ValueKind,
        /// The kind of the value that was passed.
        found: &'static str,
    },
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessError::UnknownField { category, field } => {
                write!(f, "Category '{category}' has no field named '{field}'")
            }
            AccessError::IndexOutOfRange { category, index } => {
                write!(f, "Category '{category}' has no field at index {index}")
            }
            AccessError::TypeMismatch {
                category,
                field,
                expected,
                found,
            } => write!(
                f,
                "Cannot write a {found} value to '{category}.{field}' of kind {expected}"
            ),
        }
    }
}

impl std::error::Error for AccessError {}
