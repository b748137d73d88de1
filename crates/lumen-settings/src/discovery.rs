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

//! The discovery engine: turns the raw field declarations of a category into
//! its ordered, validated descriptor list.
//!
//! Absent metadata gets its default (unbounded, continuous, shader-visible,
//! display name = field name). Any malformed or incompatible metadata fails
//! the whole category; nothing is silently ignored.

use crate::attribute::{Attribute, FieldDecl};
use crate::conversion::ConversionMode;
use crate::descriptor::{Bounds, FieldDescriptor};
use crate::error::DeclarationError;
use crate::value::ValueKind;

/// Builds the descriptor list of `category` from its declarations, preserving
/// declaration order.
///
/// # Errors
///
/// Returns the first [`DeclarationError`] found, in field order.
pub fn discover(
    category: &'static str,
    decls: Vec<FieldDecl>,
) -> Result<Vec<FieldDescriptor>, DeclarationError> {
    let mut descriptors: Vec<FieldDescriptor> = Vec::with_capacity(decls.len());

    for (index, decl) in decls.iter().enumerate() {
        if descriptors.iter().any(|d| d.name == decl.name()) {
            return Err(DeclarationError::DuplicateField {
                category,
                field: decl.name(),
            });
        }
        descriptors.push(describe(category, index, decl)?);
    }

    log::debug!(
        "Discovered {} fields for category '{}' ({} shader-visible)",
        descriptors.len(),
        category,
        descriptors.iter().filter(|d| d.shader_visible).count()
    );

    Ok(descriptors)
}

fn describe(
    category: &'static str,
    index: usize,
    decl: &FieldDecl,
) -> Result<FieldDescriptor, DeclarationError> {
    let field = decl.name();
    let kind = decl.kind();

    let mut seen: Vec<&'static str> = Vec::with_capacity(decl.attributes().len());
    let mut min = None;
    let mut max = None;
    let mut step = None;
    let mut display_name = None;
    let mut help_text = None;
    let mut hdr = false;
    let mut conversion = ConversionMode::None;
    let mut shader_visible = true;
    let mut enum_labels = None;

    for attribute in decl.attributes() {
        let attribute_name = attribute.name();
        if seen.contains(&attribute_name) {
            return Err(DeclarationError::DuplicateAttribute {
                category,
                field,
                attribute: attribute_name,
            });
        }
        seen.push(attribute_name);

        if !attribute.applies_to(&kind) {
            return Err(DeclarationError::IncompatibleAttribute {
                category,
                field,
                attribute: attribute_name,
                kind,
            });
        }

        match *attribute {
            Attribute::Min(v) => min = Some(v),
            Attribute::Max(v) => max = Some(v),
            Attribute::Step(v) => step = Some(v),
            Attribute::DisplayName(text) => display_name = Some(text),
            Attribute::HelpText(text) => help_text = Some(text),
            Attribute::Hdr(enabled) => hdr = enabled,
            Attribute::Conversion(mode) => conversion = mode,
            Attribute::ShaderVisible(visible) => shader_visible = visible,
            Attribute::EnumLabels(labels) => enum_labels = Some(labels),
        }
    }

    let bounds = resolve_bounds(category, field, kind, min, max)?;

    if let Some(step) = step {
        let integral = kind != ValueKind::Int || step.fract() == 0.0;
        if !step.is_finite() || step <= 0.0 || !integral {
            return Err(DeclarationError::InvalidStep {
                category,
                field,
                step,
            });
        }
    }

    if let Some(domain_min) = conversion.domain_min() {
        let lowest = bounds.map_or(f32::NEG_INFINITY, |b| b.min);
        if lowest < domain_min {
            return Err(DeclarationError::ConversionDomain {
                category,
                field,
                mode: conversion,
                min: lowest,
            });
        }
    }

    if let ValueKind::Enum { variant_count } = kind {
        let labels =
            enum_labels.ok_or(DeclarationError::MissingEnumLabels { category, field })?;
        if labels.len() != variant_count as usize {
            return Err(DeclarationError::EnumLabelCount {
                category,
                field,
                expected: variant_count,
                found: labels.len(),
            });
        }
        if let Some(index) = labels.iter().position(|label| label.trim().is_empty()) {
            return Err(DeclarationError::EmptyEnumLabel {
                category,
                field,
                index,
            });
        }
    }

    Ok(FieldDescriptor {
        index,
        name: field,
        kind,
        bounds,
        step,
        display_name: display_name.unwrap_or(field),
        help_text: help_text.unwrap_or_default(),
        hdr,
        conversion,
        shader_visible,
        enum_labels,
    })
}

/// Merges `min`/`max` into [`Bounds`]. Declared sides must be finite, ordered,
/// and integral on int fields.
fn resolve_bounds(
    category: &'static str,
    field: &'static str,
    kind: ValueKind,
    min: Option<f32>,
    max: Option<f32>,
) -> Result<Option<Bounds>, DeclarationError> {
    if min.is_none() && max.is_none() {
        return Ok(None);
    }

    let bounds = Bounds {
        min: min.unwrap_or(Bounds::UNBOUNDED.min),
        max: max.unwrap_or(Bounds::UNBOUNDED.max),
    };
    let integral = |v: f32| kind != ValueKind::Int || v.fract() == 0.0;
    let valid_side = |side: Option<f32>| side.is_none_or(|v| v.is_finite() && integral(v));

    if !valid_side(min)
        || !valid_side(max)
        || bounds.min > bounds.max
        || !admits_unit_length(kind, bounds)
    {
        return Err(DeclarationError::InvalidBounds {
            category,
            field,
            min: bounds.min,
            max: bounds.max,
        });
    }
    Ok(Some(bounds))
}

/// Directions and orientations are stored at unit length, so their
/// componentwise box must reach the unit sphere without enclosing it.
fn admits_unit_length(kind: ValueKind, bounds: Bounds) -> bool {
    let components = match kind {
        ValueKind::Direction => 3.0,
        ValueKind::Orientation => 4.0,
        _ => return true,
    };
    let nearest = if bounds.contains(0.0) {
        0.0
    } else {
        bounds.min.abs().min(bounds.max.abs())
    };
    let farthest = bounds.min.abs().max(bounds.max.abs());
    components * nearest * nearest <= 1.0 && components * farthest * farthest >= 1.0
}
