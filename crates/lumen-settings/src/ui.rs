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

//! The contract between settings categories and an external UI layer.
//!
//! The registry never draws anything. It tells the UI which widget a field
//! calls for and accepts edited values back through the write path.

use crate::descriptor::FieldDescriptor;
use crate::value::{SettingValue, ValueKind};

/// The widget a UI layer should use for a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidgetKind {
    /// A checkbox for flags.
    Checkbox,
    /// A slider over a finite float range.
    Slider {
        /// Lower end of the slider.
        min: f32,
        /// Upper end of the slider.
        max: f32,
        /// Snap increment, if any.
        step: Option<f32>,
    },
    /// An unbounded (or half-bounded) float input.
    DragValue {
        /// Drag increment, if any.
        step: Option<f32>,
    },
    /// A slider over a finite integer range.
    IntSlider {
        /// Lower end of the slider.
        min: i32,
        /// Upper end of the slider.
        max: i32,
        /// Snap increment (1 when undeclared).
        step: i32,
    },
    /// An unbounded (or half-bounded) integer input.
    IntDragValue {
        /// Drag increment (1 when undeclared).
        step: i32,
    },
    /// A dropdown listing one label per enum variant.
    Dropdown {
        /// The labels, indexed by variant.
        labels: &'static [&'static str],
    },
    /// A color picker.
    ColorPicker {
        /// Whether components may exceed `1.0`.
        hdr: bool,
    },
    /// A gizmo editing a unit direction.
    DirectionGizmo,
    /// A gizmo editing a rotation.
    OrientationGizmo,
}

impl FieldDescriptor {
    /// The widget this field calls for.
    pub fn widget(&self) -> WidgetKind {
        let finite = self.bounds.filter(|b| b.is_finite());
        match self.kind {
            ValueKind::Bool => WidgetKind::Checkbox,
            ValueKind::Int => {
                let step = self.step.map_or(1, |s| s as i32);
                match finite {
                    Some(b) => WidgetKind::IntSlider {
                        min: b.min as i32,
                        max: b.max as i32,
                        step,
                    },
                    None => WidgetKind::IntDragValue { step },
                }
            }
            ValueKind::Float => match finite {
                Some(b) => WidgetKind::Slider {
                    min: b.min,
                    max: b.max,
                    step: self.step,
                },
                None => WidgetKind::DragValue { step: self.step },
            },
            ValueKind::Enum { .. } => WidgetKind::Dropdown {
                labels: self.enum_labels.unwrap_or_default(),
            },
            ValueKind::Color => WidgetKind::ColorPicker { hdr: self.hdr },
            ValueKind::Direction => WidgetKind::DirectionGizmo,
            ValueKind::Orientation => WidgetKind::OrientationGizmo,
        }
    }

    /// Formats a value of this field for display: enum values by label, LDR
    /// colors as hex.
    pub fn format_value(&self, value: SettingValue) -> String {
        match value {
            SettingValue::Enum(index) => self
                .enum_label(index)
                .map_or_else(|| value.to_string(), str::to_string),
            SettingValue::Color(c) if !self.hdr => c.to_hex(),
            other => other.to_string(),
        }
    }
}

/// An immediate-mode UI that edits settings.
///
/// [`Category::edit`](crate::Category::edit) calls `begin_category`, then
/// `field` once per field in declaration order, then `end_category`.
pub trait SettingsUi {
    /// Opens a category section; returning `false` skips it (e.g. a collapsed
    /// header).
    fn begin_category(&mut self, _name: &str) -> bool {
        true
    }

    /// Shows one field with its current value. Returns `Some(edited)` when the
    /// user changed it; the value is sanitized before being stored.
    fn field(&mut self, descriptor: &FieldDescriptor, current: SettingValue)
        -> Option<SettingValue>;

    /// Closes the section opened by `begin_category`.
    fn end_category(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::{Attribute, FieldDecl};
    use crate::discovery::discover;
    use lumen_core::math::LinearRgb;

    fn widget_of(decl: FieldDecl) -> WidgetKind {
        discover("Test", vec![decl]).unwrap()[0].widget()
    }

    #[test]
    fn test_bounded_numbers_get_sliders() {
        let float = FieldDecl::new("x", ValueKind::Float)
            .with(Attribute::Min(0.0))
            .with(Attribute::Max(6.0))
            .with(Attribute::Step(0.01));
        assert_eq!(
            widget_of(float),
            WidgetKind::Slider {
                min: 0.0,
                max: 6.0,
                step: Some(0.01)
            }
        );

        let int = FieldDecl::new("n", ValueKind::Int)
            .with(Attribute::Min(1.0))
            .with(Attribute::Max(16.0));
        assert_eq!(
            widget_of(int),
            WidgetKind::IntSlider {
                min: 1,
                max: 16,
                step: 1
            }
        );
    }

    #[test]
    fn test_half_bounded_numbers_get_drag_values() {
        let float = FieldDecl::new("x", ValueKind::Float).with(Attribute::Min(0.0));
        assert_eq!(widget_of(float), WidgetKind::DragValue { step: None });
        let int = FieldDecl::new("n", ValueKind::Int).with(Attribute::Step(2.0));
        assert_eq!(widget_of(int), WidgetKind::IntDragValue { step: 2 });
    }

    #[test]
    fn test_other_kinds() {
        assert_eq!(
            widget_of(FieldDecl::new("b", ValueKind::Bool)),
            WidgetKind::Checkbox
        );
        assert_eq!(
            widget_of(FieldDecl::new("c", ValueKind::Color).with(Attribute::Hdr(true))),
            WidgetKind::ColorPicker { hdr: true }
        );
        assert_eq!(
            widget_of(FieldDecl::new("d", ValueKind::Direction)),
            WidgetKind::DirectionGizmo
        );
        let labels: &'static [&'static str] = &["Box", "Triangle"];
        assert_eq!(
            widget_of(
                FieldDecl::new("e", ValueKind::Enum { variant_count: 2 })
                    .with(Attribute::EnumLabels(labels))
            ),
            WidgetKind::Dropdown { labels }
        );
    }

    #[test]
    fn test_format_value() {
        let descriptors = discover(
            "Test",
            vec![
                FieldDecl::new("e", ValueKind::Enum { variant_count: 2 })
                    .with(Attribute::EnumLabels(&["None", "2x"])),
                FieldDecl::new("c", ValueKind::Color),
            ],
        )
        .unwrap();
        assert_eq!(descriptors[0].format_value(SettingValue::Enum(1)), "2x");
        assert_eq!(
            descriptors[1].format_value(SettingValue::Color(LinearRgb::WHITE)),
            "#FFFFFF"
        );
    }
}
