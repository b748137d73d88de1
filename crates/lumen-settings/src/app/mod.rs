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

//! The application's settings: the three categories the renderer is
//! parametrized with, owned by a single [`AppSettings`] value.

mod anti_aliasing;
mod post_processing;
mod scene;

pub use anti_aliasing::{AntiAliasing, FilterType, JitterMode, MsaaMode};
pub use post_processing::PostProcessing;
pub use scene::{Scene, SceneControls};

use crate::category::{Category, CategoryState};
use crate::error::DeclarationError;
use crate::packer::{ConstantBufferLayout, PackedConstants, PackingRules};
use crate::snapshot::SettingsSnapshot;
use crate::ui::SettingsUi;

/// Auto-exposure is not implemented; exposure is manual.
pub const ENABLE_AUTO_EXPOSURE: bool = false;
/// Middle-grey key value used by tone mapping.
pub const KEY_VALUE: f32 = 0.115;
/// Eye adaptation rate.
pub const ADAPTATION_RATE: f32 = 0.5;

/// All settings categories of the application.
///
/// Built once at startup and passed by reference to the UI and rendering
/// code. The category order is also the constant-buffer order.
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// MSAA resolve and temporal AA.
    pub anti_aliasing: Category<AntiAliasing>,
    /// Lighting, material and model parameters.
    pub scene: Category<SceneControls>,
    /// Bloom and exposure.
    pub post_processing: Category<PostProcessing>,
}

impl AppSettings {
    /// Discovers and validates every category.
    ///
    /// # Errors
    ///
    /// Returns the first [`DeclarationError`]; startup should abort on it.
    pub fn new() -> Result<Self, DeclarationError> {
        let settings = Self {
            anti_aliasing: Category::new()?,
            scene: Category::new()?,
            post_processing: Category::new()?,
        };

        let categories = settings.categories();
        let fields: usize = categories.iter().map(|c| c.descriptors().len()).sum();
        let shader_visible = categories
            .iter()
            .flat_map(|c| c.descriptors())
            .filter(|d| d.is_shader_visible())
            .count();
        log::info!(
            "Initialized settings: {} categories, {} fields ({} shader-visible)",
            categories.len(),
            fields,
            shader_visible
        );

        Ok(settings)
    }

    /// Every category, in packing order.
    pub fn categories(&self) -> [&dyn CategoryState; 3] {
        [&self.anti_aliasing, &self.scene, &self.post_processing]
    }

    /// Every category, mutably, in packing order.
    pub fn categories_mut(&mut self) -> [&mut dyn CategoryState; 3] {
        [
            &mut self.anti_aliasing,
            &mut self.scene,
            &mut self.post_processing,
        ]
    }

    /// The constant-buffer layout of the shader-visible fields.
    pub fn layout(&self, rules: PackingRules) -> ConstantBufferLayout {
        ConstantBufferLayout::new(rules, &self.categories())
    }

    /// Packs the current values into a constant buffer.
    pub fn pack(&self, rules: PackingRules) -> PackedConstants {
        let sources = self.categories();
        ConstantBufferLayout::new(rules, &sources).pack(&sources)
    }

    /// Runs `ui` over every category; returns the number of fields changed.
    pub fn edit(&mut self, ui: &mut dyn SettingsUi) -> usize {
        let mut changed = 0;
        for category in self.categories_mut() {
            changed += category.edit(ui);
        }
        changed
    }

    /// Restores every category to its defaults.
    pub fn reset(&mut self) {
        for category in self.categories_mut() {
            category.reset();
        }
    }

    /// Whether any field changed since the last [`end_frame`](Self::end_frame).
    pub fn has_changes(&self) -> bool {
        self.anti_aliasing.changed_fields().next().is_some()
            || self.scene.changed_fields().next().is_some()
            || self.post_processing.changed_fields().next().is_some()
    }

    /// Clears the change flags of every category. Call once per frame after
    /// consumers have reacted to changes.
    pub fn end_frame(&mut self) {
        for category in self.categories_mut() {
            category.clear_changes();
        }
    }

    /// A serializable copy of every category's values.
    pub fn snapshot(&self) -> SettingsSnapshot {
        SettingsSnapshot::capture(&self.categories())
    }

    /// Writes a snapshot back through the validation pipeline; returns the
    /// number of fields written.
    pub fn restore(&mut self, snapshot: &SettingsSnapshot) -> usize {
        snapshot.apply(&mut self.categories_mut())
    }

    /// Samples per pixel of the current MSAA mode.
    pub fn num_msaa_samples(&self) -> u32 {
        self.anti_aliasing.current().msaa_mode.sample_count()
    }

    /// Whether the projection is jittered for temporal AA.
    pub fn enable_jitter(&self) -> bool {
        self.anti_aliasing.current().jitter_mode != JitterMode::None
    }
}
