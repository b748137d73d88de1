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

//! # Lumen Settings
//!
//! A metadata-driven settings registry that sits between human-editable
//! parameters and the numeric inputs of a real-time rendering pipeline.
//!
//! * Categories are plain structs deriving [`Settings`]; each field's
//!   metadata is written next to it with `#[setting(...)]`.
//! * [`Category`] discovers the fields once, validates every attribute and
//!   default, and owns the live values.
//! * Every UI write goes through [`validation::sanitize`] (clamp, quantize,
//!   re-normalize); reads for consumers apply the field's [`ConversionMode`].
//! * [`pack_constants`] turns the shader-visible fields of a list of
//!   categories into a GPU constant buffer.
//!
//! ```
//! use lumen_settings::{AppSettings, PackingRules, SettingValue};
//!
//! let mut settings = AppSettings::new().expect("valid declarations");
//! let stored = settings
//!     .post_processing
//!     .write("bloom_magnitude", SettingValue::Float(3.0))
//!     .unwrap();
//! assert_eq!(stored, SettingValue::Float(2.0));
//!
//! let packed = settings.pack(PackingRules::Std140);
//! assert_eq!(packed.bytes().len() % 16, 0);
//! ```

#![warn(missing_docs)]

// Lets the derive macros refer to `::lumen_settings` from inside this crate.
extern crate self as lumen_settings;

pub mod app;
pub mod attribute;
pub mod category;
pub mod conversion;
pub mod descriptor;
pub mod discovery;
pub mod error;
pub mod packer;
pub mod snapshot;
pub mod ui;
pub mod validation;
pub mod value;

pub use app::AppSettings;
pub use attribute::{Attribute, FieldDecl};
pub use category::{Category, CategoryState, SettingsCategory};
pub use conversion::ConversionMode;
pub use descriptor::{Bounds, FieldDescriptor};
pub use error::{AccessError, DeclarationError};
pub use packer::{pack_constants, ConstantBufferLayout, LayoutEntry, PackedConstants, PackingRules};
pub use snapshot::SettingsSnapshot;
pub use ui::{SettingsUi, WidgetKind};
pub use value::{SettingEnum, SettingType, SettingValue, ValueKind};

pub use lumen_core::math::{LinearRgb, Quaternion, Vec3};
pub use lumen_macros::{SettingEnum, Settings};
