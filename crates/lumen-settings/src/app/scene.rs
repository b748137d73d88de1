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

//! Scene controls: lighting, material and model parameters.

use crate::{SettingEnum, Settings};
use lumen_core::math::{LinearRgb, Quaternion, Vec3};

/// The scene being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, SettingEnum)]
pub enum Scene {
    /// The robot hand model.
    #[label("Robo Hand")]
    RoboHand,
    /// A single ground plane.
    Plane,
}

/// Scene controls category.
#[derive(Debug, Clone, PartialEq, Settings)]
#[allow(missing_docs)]
#[settings(name = "SceneControls")]
pub struct SceneControls {
    pub current_scene: Scene,
    #[setting(display_name = "Light Direction", help = "The direction of the light")]
    pub light_direction: Vec3,
    #[setting(
        display_name = "Light Color",
        help = "The color of the light",
        min = 0.0,
        max = 20.0,
        step = 0.1,
        hdr
    )]
    pub light_color: LinearRgb,
    #[setting(help = "Enables direct lighting")]
    pub enable_direct_lighting: bool,
    #[setting(help = "Enables ambient lighting from the environment")]
    pub enable_ambient_lighting: bool,
    pub render_background: bool,
    pub enable_shadows: bool,
    pub enable_normal_maps: bool,
    #[setting(min = 0.0, max = 1.0)]
    pub normal_map_intensity: f32,
    #[setting(
        display_name = "Diffuse Intensity",
        help = "Diffuse albedo intensity parameter for the material",
        min = 0.0,
        max = 1.0,
        step = 0.001
    )]
    pub diffuse_intensity: f32,
    #[setting(
        help = "Specular roughness parameter for the material",
        min = 0.001,
        max = 1.0,
        step = 0.001,
        conversion = Square
    )]
    pub roughness: f32,
    #[setting(
        display_name = "Specular Intensity",
        help = "Specular intensity parameter for the material",
        min = 0.0,
        max = 1.0,
        step = 0.001
    )]
    pub specular_intensity: f32,
    pub model_orientation: Quaternion,
    #[setting(min = 0.0, max = 10.0, step = 0.01)]
    pub model_rotation_speed: f32,
    pub double_sync_interval: bool,
    #[setting(min = -16.0, max = 16.0)]
    pub exposure_scale: f32,
}

impl Default for SceneControls {
    fn default() -> Self {
        Self {
            current_scene: Scene::RoboHand,
            light_direction: Vec3::new(-0.75, 0.977, -0.4),
            light_color: LinearRgb::new(20.0, 16.0, 10.0),
            enable_direct_lighting: true,
            enable_ambient_lighting: true,
            render_background: true,
            enable_shadows: true,
            enable_normal_maps: true,
            normal_map_intensity: 1.0,
            diffuse_intensity: 0.5,
            roughness: 0.1,
            specular_intensity: 0.05,
            model_orientation: Quaternion::new(0.41, -0.55, -0.29, 0.67),
            model_rotation_speed: 0.0,
            double_sync_interval: false,
            exposure_scale: 0.0,
        }
    }
}
