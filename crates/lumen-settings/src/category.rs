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

//! The category registry: a named group of typed fields plus its live state.

use crate::attribute::FieldDecl;
use crate::descriptor::FieldDescriptor;
use crate::discovery::discover;
use crate::error::{AccessError, DeclarationError};
use crate::ui::SettingsUi;
use crate::validation::{sanitize, validate_default};
use crate::value::{SettingValue, ValueKind};

/// A struct whose fields are settings.
///
/// Implemented by `#[derive(Settings)]`. `Default` provides the declared
/// default values.
pub trait SettingsCategory: Clone + Default + 'static {
    /// The category name, used in diagnostics and as the offset-map prefix.
    const NAME: &'static str;

    /// The raw declarations of every field, in declaration order.
    fn fields() -> Vec<FieldDecl>;

    /// Reads the field at `index`.
    fn get(&self, index: usize) -> Option<SettingValue>;

    /// Writes the field at `index`; `false` if the index or the kind is wrong.
    /// Performs no validation.
    fn set(&mut self, index: usize, value: SettingValue) -> bool;
}

/// The object-safe view of a category used by the packer, the snapshot and
/// any code that handles heterogeneous categories together.
pub trait CategoryState {
    /// The category name.
    fn name(&self) -> &'static str;

    /// The ordered descriptor list.
    fn descriptors(&self) -> &[FieldDescriptor];

    /// The stored value of the field at `index`.
    ///
    /// # Errors
    ///
    /// [`AccessError::IndexOutOfRange`] if no such field exists.
    fn value_at(&self, index: usize) -> Result<SettingValue, AccessError>;

    /// Sanitizes and stores `value` in the field at `index`, returning the
    /// value actually stored.
    ///
    /// # Errors
    ///
    /// [`AccessError::IndexOutOfRange`] or [`AccessError::TypeMismatch`].
    fn write_at(&mut self, index: usize, value: SettingValue) -> Result<SettingValue, AccessError>;

    /// Restores every field to its default.
    fn reset(&mut self);

    /// Forgets which fields changed.
    fn clear_changes(&mut self);

    /// Presents every field to `ui` and applies its edits; returns the number
    /// of fields whose stored value changed.
    fn edit(&mut self, ui: &mut dyn SettingsUi) -> usize;
}

/// The live state of one settings category.
///
/// Holds the descriptors discovered for `T`, the validated defaults and the
/// current values. Every write goes through [`sanitize`], so the current
/// values always satisfy their descriptors.
#[derive(Debug, Clone)]
pub struct Category<T: SettingsCategory> {
    descriptors: Box<[FieldDescriptor]>,
    defaults: T,
    current: T,
    changed: Vec<bool>,
}

impl<T: SettingsCategory> Category<T> {
    /// Discovers the fields of `T` and starts from `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns a [`DeclarationError`] if any field metadata or any default is
    /// invalid.
    pub fn new() -> Result<Self, DeclarationError> {
        Self::with_defaults(T::default())
    }

    /// Like [`Category::new`], with explicit defaults.
    ///
    /// Directions and orientations are normalized before being stored as the
    /// canonical defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`DeclarationError`] if any field metadata or any default is
    /// invalid.
    pub fn with_defaults(defaults: T) -> Result<Self, DeclarationError> {
        let descriptors = discover(T::NAME, T::fields())?;

        let mut canonical = defaults;
        for descriptor in &descriptors {
            let value = validate_default(T::NAME, descriptor, canonical.get(descriptor.index))?;
            if !canonical.set(descriptor.index, value) {
                return Err(DeclarationError::InvalidDefault {
                    category: T::NAME,
                    field: descriptor.name,
                    value: Some(value),
                });
            }
        }

        Ok(Self {
            changed: vec![false; descriptors.len()],
            descriptors: descriptors.into_boxed_slice(),
            current: canonical.clone(),
            defaults: canonical,
        })
    }

    /// The category name.
    pub fn name(&self) -> &'static str {
        T::NAME
    }

    /// The ordered descriptor list.
    pub fn descriptors(&self) -> &[FieldDescriptor] {
        &self.descriptors
    }

    /// The descriptor of the field called `name`.
    pub fn descriptor(&self, name: &str) -> Option<&FieldDescriptor> {
        self.descriptors.iter().find(|d| d.name == name)
    }

    /// A fresh copy of the default value set.
    pub fn defaults(&self) -> T {
        self.defaults.clone()
    }

    /// The live, typed value set.
    pub fn current(&self) -> &T {
        &self.current
    }

    /// The stored (perceptual) value of the field called `name`.
    ///
    /// # Errors
    ///
    /// [`AccessError::UnknownField`] if no such field exists.
    pub fn value(&self, name: &str) -> Result<SettingValue, AccessError> {
        let index = self.index_of(name)?;
        self.value_at(index)
    }

    /// The stored (perceptual) value of the field at `index`.
    ///
    /// # Errors
    ///
    /// [`AccessError::IndexOutOfRange`] if no such field exists.
    pub fn value_at(&self, index: usize) -> Result<SettingValue, AccessError> {
        self.current.get(index).ok_or(AccessError::IndexOutOfRange {
            category: T::NAME,
            index,
        })
    }

    /// The value handed to consumers: the stored value with the field's
    /// conversion applied.
    ///
    /// # Errors
    ///
    /// [`AccessError::UnknownField`] if no such field exists.
    pub fn physical_value(&self, name: &str) -> Result<SettingValue, AccessError> {
        let index = self.index_of(name)?;
        let stored = self.value_at(index)?;
        Ok(physical(&self.descriptors[index], stored))
    }

    /// The UI write path for the field called `name`. See [`Category::write_at`].
    ///
    /// # Errors
    ///
    /// [`AccessError::UnknownField`] or [`AccessError::TypeMismatch`].
    pub fn write(&mut self, name: &str, value: SettingValue) -> Result<SettingValue, AccessError> {
        let index = self.index_of(name)?;
        self.write_at(index, value)
    }

    /// Clamps, quantizes and stores `value`, returning the value actually
    /// stored so the UI can reflect it back.
    ///
    /// A value that cannot be repaired (NaN, zero-length vector) is dropped;
    /// the previous value is kept and returned.
    ///
    /// # Errors
    ///
    /// [`AccessError::IndexOutOfRange`] or [`AccessError::TypeMismatch`].
    pub fn write_at(
        &mut self,
        index: usize,
        value: SettingValue,
    ) -> Result<SettingValue, AccessError> {
        let descriptor = self
            .descriptors
            .get(index)
            .ok_or(AccessError::IndexOutOfRange {
                category: T::NAME,
                index,
            })?;

        if !descriptor.kind.accepts(&value) {
            return Err(AccessError::TypeMismatch {
                category: T::NAME,
                field: descriptor.name,
                expected: descriptor.kind,
                found: value.kind_name(),
            });
        }

        let previous = self.value_at(index)?;
        let Some(stored) = sanitize(descriptor, value) else {
            log::warn!(
                "Dropped write of {} to '{}.{}'; keeping {}",
                value,
                T::NAME,
                descriptor.name,
                previous
            );
            return Ok(previous);
        };

        if stored != value {
            log::trace!(
                "Adjusted write to '{}.{}': {} -> {}",
                T::NAME,
                descriptor.name,
                value,
                stored
            );
        }

        if stored != previous && self.current.set(index, stored) {
            self.changed[index] = true;
        }
        Ok(stored)
    }

    /// Restores every field to its default. Fields whose value differed are
    /// marked as changed.
    pub fn reset(&mut self) {
        for descriptor in self.descriptors.iter() {
            let index = descriptor.index;
            if self.current.get(index) != self.defaults.get(index) {
                self.changed[index] = true;
            }
        }
        self.current = self.defaults.clone();
    }

    /// Whether the field called `name` changed since the last
    /// [`clear_changes`](Category::clear_changes).
    ///
    /// # Errors
    ///
    /// [`AccessError::UnknownField`] if no such field exists.
    pub fn is_changed(&self, name: &str) -> Result<bool, AccessError> {
        let index = self.index_of(name)?;
        Ok(self.changed[index])
    }

    /// The descriptors of every changed field, in declaration order.
    pub fn changed_fields(&self) -> impl Iterator<Item = &FieldDescriptor> + '_ {
        self.descriptors
            .iter()
            .zip(&self.changed)
            .filter_map(|(descriptor, changed)| changed.then_some(descriptor))
    }

    /// Forgets which fields changed.
    pub fn clear_changes(&mut self) {
        self.changed.fill(false);
    }

    /// Presents every field to `ui` and routes its edits through the write
    /// path. Returns the number of fields whose stored value changed.
    pub fn edit(&mut self, ui: &mut dyn SettingsUi) -> usize {
        if !ui.begin_category(T::NAME) {
            return 0;
        }

        let mut edited = 0;
        for index in 0..self.descriptors.len() {
            let Ok(current) = self.value_at(index) else {
                continue;
            };
            let Some(candidate) = ui.field(&self.descriptors[index], current) else {
                continue;
            };
            match self.write_at(index, candidate) {
                Ok(stored) if stored != current => edited += 1,
                Ok(_) => {}
                Err(err) => log::warn!("Ignored UI edit: {err}"),
            }
        }

        ui.end_category();
        edited
    }

    fn index_of(&self, name: &str) -> Result<usize, AccessError> {
        self.descriptor(name)
            .map(|d| d.index)
            .ok_or_else(|| AccessError::UnknownField {
                category: T::NAME,
                field: name.to_string(),
            })
    }
}

impl<T: SettingsCategory> CategoryState for Category<T> {
    fn name(&self) -> &'static str {
        T::NAME
    }

    fn descriptors(&self) -> &[FieldDescriptor] {
        &self.descriptors
    }

    fn value_at(&self, index: usize) -> Result<SettingValue, AccessError> {
        Category::value_at(self, index)
    }

    fn write_at(&mut self, index: usize, value: SettingValue) -> Result<SettingValue, AccessError> {
        Category::write_at(self, index, value)
    }

    fn reset(&mut self) {
        Category::reset(self);
    }

    fn clear_changes(&mut self) {
        Category::clear_changes(self);
    }

    fn edit(&mut self, ui: &mut dyn SettingsUi) -> usize {
        Category::edit(self, ui)
    }
}

/// Applies the descriptor's conversion to a stored value. Only float fields
/// carry a conversion.
pub(crate) fn physical(descriptor: &FieldDescriptor, stored: SettingValue) -> SettingValue {
    match (descriptor.kind, stored) {
        (ValueKind::Float, SettingValue::Float(v)) => {
            SettingValue::Float(descriptor.conversion.apply(v))
        }
        _ => stored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConversionMode, Settings};
    use approx::assert_relative_eq;
    use lumen_core::math::Vec3;

    #[derive(Debug, Clone, PartialEq, Settings)]
    #[settings(name = "Material")]
    struct Material {
        #[setting(min = 0.001, max = 1.0, step = 0.001, conversion = Square)]
        roughness: f32,
        #[setting(min = 0, max = 8, step = 1)]
        layers: i32,
        #[setting(shader = false)]
        wireframe: bool,
        up: Vec3,
    }

    impl Default for Material {
        fn default() -> Self {
            Self {
                roughness: 0.1,
                layers: 2,
                wireframe: false,
                up: Vec3::new(0.0, 2.0, 0.0),
            }
        }
    }

    #[derive(Debug, Clone, Default, Settings)]
    struct OffGrid {
        #[setting(min = 0.0, max = 1.0, step = 0.25)]
        amount: f32,
        #[setting(min = 0.0, max = 1.0, step = 0.25)]
        other: f32,
    }

    /// Answers every field with a fixed edit.
    struct Scripted(Option<SettingValue>);

    impl SettingsUi for Scripted {
        fn field(&mut self, descriptor: &FieldDescriptor, _: SettingValue) -> Option<SettingValue> {
            match descriptor.name() {
                "roughness" => self.0,
                _ => None,
            }
        }
    }

    #[test]
    fn test_new_discovers_and_canonicalizes() {
        let category = Category::<Material>::new().unwrap();
        assert_eq!(category.name(), "Material");
        assert_eq!(category.descriptors().len(), 4);
        assert_eq!(category.current().up, Vec3::Y);
        assert_eq!(category.defaults().up, Vec3::Y);
        assert_eq!(
            category.descriptor("roughness").map(|d| d.conversion()),
            Some(ConversionMode::Square)
        );
    }

    #[test]
    fn test_off_grid_default_is_rejected() {
        let err = Category::with_defaults(OffGrid {
            amount: 0.5,
            other: 0.3,
        })
        .unwrap_err();
        assert!(matches!(
            err,
            DeclarationError::InvalidDefault { field: "other", .. }
        ));
    }

    #[test]
    fn test_write_clamps_and_tracks_changes() {
        let mut category = Category::<Material>::new().unwrap();
        let stored = category.write("layers", SettingValue::Int(12)).unwrap();
        assert_eq!(stored, SettingValue::Int(8));
        assert_eq!(category.current().layers, 8);
        assert!(category.is_changed("layers").unwrap());
        assert!(!category.is_changed("roughness").unwrap());

        let changed: Vec<_> = category.changed_fields().map(|d| d.name()).collect();
        assert_eq!(changed, ["layers"]);

        category.clear_changes();
        assert_eq!(category.changed_fields().count(), 0);
    }

    #[test]
    fn test_write_errors() {
        let mut category = Category::<Material>::new().unwrap();
        assert!(matches!(
            category.write("missing", SettingValue::Bool(true)),
            Err(AccessError::UnknownField { .. })
        ));
        assert!(matches!(
            category.write("roughness", SettingValue::Bool(true)),
            Err(AccessError::TypeMismatch { found: "bool", .. })
        ));
        assert!(matches!(
            category.write_at(9, SettingValue::Bool(true)),
            Err(AccessError::IndexOutOfRange { index: 9, .. })
        ));
    }

    #[test]
    fn test_unrepairable_write_keeps_previous_value() {
        let mut category = Category::<Material>::new().unwrap();
        let kept = category
            .write("up", SettingValue::Direction(Vec3::ZERO))
            .unwrap();
        assert_eq!(kept, SettingValue::Direction(Vec3::Y));
        assert!(!category.is_changed("up").unwrap());
    }

    #[test]
    fn test_physical_value_applies_conversion() {
        let category = Category::<Material>::new().unwrap();
        let Ok(SettingValue::Float(physical)) = category.physical_value("roughness") else {
            panic!("roughness should be a float");
        };
        assert_relative_eq!(physical, 0.01, epsilon = 1e-6);
        let Ok(SettingValue::Float(stored)) = category.value("roughness") else {
            panic!("roughness should be a float");
        };
        assert_relative_eq!(stored, 0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut category = Category::<Material>::new().unwrap();
        category.write("layers", SettingValue::Int(5)).unwrap();
        category.write("wireframe", SettingValue::Bool(true)).unwrap();
        category.clear_changes();

        category.reset();
        assert_eq!(category.current(), &category.defaults());
        assert!(category.is_changed("layers").unwrap());
        assert!(category.is_changed("wireframe").unwrap());
        assert!(!category.is_changed("roughness").unwrap());
    }

    #[test]
    fn test_edit_routes_through_write_path() {
        let mut category = Category::<Material>::new().unwrap();
        let edited = category.edit(&mut Scripted(Some(SettingValue::Float(2.0))));
        assert_eq!(edited, 1);
        assert_eq!(category.current().roughness, 1.0);

        let unchanged = category.edit(&mut Scripted(None));
        assert_eq!(unchanged, 0);
    }
}
