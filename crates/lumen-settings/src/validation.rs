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

//! The validation pipeline applied to every write: clamp, quantize, and
//! re-normalize unit-length kinds.
//!
//! [`sanitize`] is idempotent: feeding its output back in returns the same
//! value. Declared defaults are checked once by [`validate_default`].

use crate::descriptor::{Bounds, FieldDescriptor};
use crate::error::DeclarationError;
use crate::value::{SettingValue, ValueKind};
use lumen_core::math::{LinearRgb, Quaternion, Vec3};

/// Tolerance, in step units, for a value to count as lying on the step grid.
const GRID_TOLERANCE: f64 = 1e-3;

/// Tolerance on the squared length of a unit-length value.
const UNIT_TOLERANCE: f32 = 1e-5;

/// Brings a candidate value into the legal set of `descriptor`.
///
/// Returns `None` when the value cannot be repaired: a kind mismatch, a NaN
/// component, or a direction/orientation that collapses to zero length. The
/// caller keeps the previous value in that case.
pub fn sanitize(descriptor: &FieldDescriptor, value: SettingValue) -> Option<SettingValue> {
    if !descriptor.kind.accepts(&value) {
        return None;
    }

    let bounds = descriptor.bounds.unwrap_or(Bounds::UNBOUNDED);
    let step = descriptor.step;

    match value {
        SettingValue::Bool(_) => Some(value),
        SettingValue::Int(v) => sanitize_int(v, bounds, step).map(SettingValue::Int),
        SettingValue::Float(v) => sanitize_scalar(v, bounds, step).map(SettingValue::Float),
        SettingValue::Enum(index) => match descriptor.kind {
            ValueKind::Enum { variant_count } if variant_count > 0 => {
                Some(SettingValue::Enum(index.min(variant_count - 1)))
            }
            _ => None,
        },
        SettingValue::Color(c) => {
            let [r, g, b] = sanitize_components(c.to_array(), bounds, step)?;
            Some(SettingValue::Color(LinearRgb::new(r, g, b)))
        }
        SettingValue::Direction(v) => {
            let components = v.to_array();
            if is_settled_unit(&components, bounds) {
                return Some(value);
            }
            let unit = Vec3::from_array(clamp_components(components, bounds)?).try_normalize()?;
            let fitted = fit_unit_to_bounds(unit.to_array(), bounds)?;
            Some(SettingValue::Direction(Vec3::from_array(fitted)))
        }
        SettingValue::Orientation(q) => {
            let components = q.to_array();
            if is_settled_unit(&components, bounds) {
                return Some(value);
            }
            let unit =
                Quaternion::from_array(clamp_components(components, bounds)?).try_normalize()?;
            let fitted = fit_unit_to_bounds(unit.to_array(), bounds)?;
            Some(SettingValue::Orientation(Quaternion::from_array(fitted)))
        }
    }
}

/// Snaps `value` to the nearest point of the grid `origin + k * step`, where
/// the origin is the lower bound (or zero when unbounded below).
///
/// A value already on the grid (within tolerance) is returned unchanged, and
/// a snap landing on an on-grid `max` returns `max` exactly. A snap that
/// overshoots the upper bound falls back one step. The result is always
/// inside `bounds`.
pub fn quantize(value: f32, bounds: Bounds, step: f32) -> f32 {
    let value = value.clamp(bounds.min, bounds.max);
    if on_grid(value, bounds, step) {
        return value;
    }

    let origin = grid_origin(bounds);
    let grid_step = f64::from(step);
    let mut snapped = origin + ((f64::from(value) - origin) / grid_step).round() * grid_step;
    if bounds.max.is_finite() && on_grid(bounds.max, bounds, step) {
        let steps_to_max = (f64::from(bounds.max) - snapped) / grid_step;
        if steps_to_max.abs() <= GRID_TOLERANCE {
            return bounds.max;
        }
    }
    if snapped as f32 > bounds.max {
        snapped -= grid_step;
    }
    (snapped as f32).clamp(bounds.min, bounds.max)
}

/// Checks a declared default against its descriptor and returns the canonical
/// value to store.
///
/// The default must be readable, of the field's kind, inside the bounds, on
/// the step grid, and (for unit-length kinds) normalizable. Scalar and color
/// defaults are stored exactly as declared; directions and orientations are
/// stored normalized.
///
/// # Errors
///
/// Returns [`DeclarationError::InvalidDefault`] on any violation.
pub fn validate_default(
    category: &'static str,
    descriptor: &FieldDescriptor,
    value: Option<SettingValue>,
) -> Result<SettingValue, DeclarationError> {
    let invalid = || DeclarationError::InvalidDefault {
        category,
        field: descriptor.name,
        value,
    };

    let value = value.ok_or_else(invalid)?;
    if !descriptor.kind.accepts(&value) {
        return Err(invalid());
    }

    if let (SettingValue::Enum(index), ValueKind::Enum { variant_count }) = (value, descriptor.kind)
    {
        if index >= variant_count {
            return Err(invalid());
        }
    }

    let components = value.components();
    if let Some(bounds) = descriptor.bounds {
        if !components.iter().all(|c| bounds.contains(*c)) {
            return Err(invalid());
        }
    }
    if let Some(step) = descriptor.step {
        let bounds = descriptor.bounds.unwrap_or(Bounds::UNBOUNDED);
        if !components.iter().all(|c| on_grid(*c, bounds, step)) {
            return Err(invalid());
        }
    }

    match value {
        SettingValue::Direction(_) | SettingValue::Orientation(_) => {
            sanitize(descriptor, value).ok_or_else(invalid)
        }
        _ => Ok(value),
    }
}

fn grid_origin(bounds: Bounds) -> f64 {
    if bounds.min.is_finite() {
        f64::from(bounds.min)
    } else {
        0.0
    }
}

fn on_grid(value: f32, bounds: Bounds, step: f32) -> bool {
    let steps = (f64::from(value) - grid_origin(bounds)) / f64::from(step);
    (steps - steps.round()).abs() <= GRID_TOLERANCE
}

fn sanitize_scalar(value: f32, bounds: Bounds, step: Option<f32>) -> Option<f32> {
    if value.is_nan() {
        return None;
    }
    let clamped = value.clamp(bounds.min, bounds.max);
    let result = match step {
        Some(step) => quantize(clamped, bounds, step),
        None => clamped,
    };
    result.is_finite().then_some(result)
}

fn sanitize_int(value: i32, bounds: Bounds, step: Option<f32>) -> Option<i32> {
    let result = sanitize_scalar(value as f32, bounds, step)?;
    // `as` saturates at the i32 range.
    Some(result.round() as i32)
}

fn sanitize_components<const N: usize>(
    components: [f32; N],
    bounds: Bounds,
    step: Option<f32>,
) -> Option<[f32; N]> {
    let mut out = [0.0; N];
    for (slot, value) in out.iter_mut().zip(components) {
        *slot = sanitize_scalar(value, bounds, step)?;
    }
    Some(out)
}

fn clamp_components<const N: usize>(components: [f32; N], bounds: Bounds) -> Option<[f32; N]> {
    sanitize_components(components, bounds, None)
}

/// Whether a direction or orientation is already a legal stored value.
fn is_settled_unit(components: &[f32], bounds: Bounds) -> bool {
    let length_sq: f32 = components.iter().map(|c| c * c).sum();
    (length_sq - 1.0).abs() <= UNIT_TOLERANCE && components.iter().all(|c| bounds.contains(*c))
}

/// Moves a unit-length value inside `bounds` while keeping its length.
///
/// Components that fall outside are pinned to the bound they crossed, and the
/// free ones are rescaled to make up the remaining length. Every round pins at
/// least one more component, so the loop ends after at most `N + 1` rounds.
/// Returns `None` when no unit-length value can be reached this way.
fn fit_unit_to_bounds<const N: usize>(unit: [f32; N], bounds: Bounds) -> Option<[f32; N]> {
    let mut pinned: [Option<f32>; N] = [None; N];

    for _ in 0..=N {
        let remaining = 1.0 - pinned.iter().flatten().map(|p| p * p).sum::<f32>();
        let free_count = pinned.iter().filter(|p| p.is_none()).count();
        if free_count == 0 {
            return (remaining.abs() <= UNIT_TOLERANCE).then(|| pinned.map(|p| p.unwrap_or(0.0)));
        }
        if remaining < -UNIT_TOLERANCE {
            return None;
        }
        let remaining = remaining.max(0.0);

        let free_sq: f32 = unit
            .iter()
            .zip(&pinned)
            .filter(|(_, p)| p.is_none())
            .map(|(u, _)| u * u)
            .sum();
        // All remaining length sits on pinned axes; spread it evenly over the
        // free ones, on whichever side the bounds allow.
        let spread = free_sq <= f32::EPSILON;
        let scale = if spread {
            (remaining / free_count as f32).sqrt()
        } else {
            (remaining / free_sq).sqrt()
        };

        let mut out = [0.0; N];
        let mut settled = true;
        for ((slot, pin), u) in out.iter_mut().zip(pinned.iter_mut()).zip(unit) {
            *slot = match *pin {
                Some(p) => p,
                None => {
                    let candidate = match (spread, bounds.contains(scale)) {
                        (false, _) => u * scale,
                        (true, true) => scale,
                        (true, false) => -scale,
                    };
                    if !bounds.contains(candidate) {
                        *pin = Some(candidate.clamp(bounds.min, bounds.max));
                        settled = false;
                    }
                    candidate
                }
            };
        }
        if settled {
            return Some(out);
        }
    }
    None
}
