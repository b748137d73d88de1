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

//! Owned, serializable copies of settings values.
//!
//! A snapshot is what a host hands to another thread, or dumps for
//! diagnostics. It carries stored (perceptual) values only.

use crate::category::CategoryState;
use crate::value::SettingValue;
use serde::{Deserialize, Serialize};

/// The value of one field at capture time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSnapshot {
    /// Field name.
    pub name: String,
    /// Stored value.
    pub value: SettingValue,
}

/// Every field of one category, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySnapshot {
    /// Category name.
    pub name: String,
    /// The captured fields.
    pub fields: Vec<FieldSnapshot>,
}

/// A consistent copy of several categories.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsSnapshot {
    /// The captured categories, in the order they were given.
    pub categories: Vec<CategorySnapshot>,
}

impl SettingsSnapshot {
    /// Copies the current values of `sources`.
    pub fn capture(sources: &[&dyn CategoryState]) -> Self {
        let categories = sources
            .iter()
            .map(|source| CategorySnapshot {
                name: source.name().to_string(),
                fields: source
                    .descriptors()
                    .iter()
                    .filter_map(|d| {
                        source.value_at(d.index()).ok().map(|value| FieldSnapshot {
                            name: d.name().to_string(),
                            value,
                        })
                    })
                    .collect(),
            })
            .collect();
        Self { categories }
    }

    /// The captured value of `field` in `category`.
    pub fn get(&self, category: &str, field: &str) -> Option<SettingValue> {
        self.categories
            .iter()
            .find(|c| c.name == category)?
            .fields
            .iter()
            .find(|f| f.name == field)
            .map(|f| f.value)
    }

    /// Writes every captured value back into the matching fields of
    /// `targets` through the normal write path. Unknown categories and fields
    /// are skipped. Returns the number of fields written.
    pub fn apply(&self, targets: &mut [&mut dyn CategoryState]) -> usize {
        let mut written = 0;
        for target in targets.iter_mut() {
            let Some(category) = self.categories.iter().find(|c| c.name == target.name()) else {
                continue;
            };
            for field in &category.fields {
                let index = target
                    .descriptors()
                    .iter()
                    .find(|d| d.name() == field.name)
                    .map(|d| d.index());
                let Some(index) = index else {
                    log::debug!(
                        "Snapshot field '{}.{}' no longer exists",
                        category.name,
                        field.name
                    );
                    continue;
                };
                match target.write_at(index, field.value) {
                    Ok(_) => written += 1,
                    Err(err) => log::warn!("Skipped snapshot value: {err}"),
                }
            }
        }
        written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, Settings};

    #[derive(Debug, Clone, Settings)]
    struct Bloom {
        #[setting(min = 0.0, max = 2.0, step = 0.01)]
        magnitude: f32,
        enabled: bool,
    }

    impl Default for Bloom {
        fn default() -> Self {
            Self {
                magnitude: 1.0,
                enabled: true,
            }
        }
    }

    #[test]
    fn test_capture_and_get() {
        let bloom = Category::<Bloom>::new().unwrap();
        let snapshot = SettingsSnapshot::capture(&[&bloom]);
        assert_eq!(snapshot.get("Bloom", "enabled"), Some(SettingValue::Bool(true)));
        assert_eq!(snapshot.get("Bloom", "missing"), None);
        assert_eq!(snapshot.get("Other", "enabled"), None);
    }

    #[test]
    fn test_json_round_trip_restores_values() {
        let mut bloom = Category::<Bloom>::new().unwrap();
        bloom.write("enabled", SettingValue::Bool(false)).unwrap();
        let json = serde_json::to_string(&SettingsSnapshot::capture(&[&bloom])).unwrap();

        bloom.reset();
        let snapshot: SettingsSnapshot = serde_json::from_str(&json).unwrap();
        let written = snapshot.apply(&mut [&mut bloom]);

        assert_eq!(written, 2);
        assert!(!bloom.current().enabled);
    }
}
