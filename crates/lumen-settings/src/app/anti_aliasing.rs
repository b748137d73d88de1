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

//! Anti-aliasing settings: MSAA resolve filtering and temporal AA.

use crate::{SettingEnum, Settings};

/// Multisample count of the main render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, SettingEnum)]
pub enum MsaaMode {
    /// Single-sampled.
    #[label("None")]
    None,
    /// 2 samples per pixel.
    #[label("2x")]
    X2,
    /// 4 samples per pixel.
    #[label("4x")]
    X4,
    /// 8 samples per pixel.
    #[label("8x")]
    X8,
}

impl MsaaMode {
    /// Samples per pixel for this mode.
    pub fn sample_count(self) -> u32 {
        match self {
            MsaaMode::None => 1,
            MsaaMode::X2 => 2,
            MsaaMode::X4 => 4,
            MsaaMode::X8 => 8,
        }
    }
}

/// Reconstruction filter used by the custom MSAA resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, SettingEnum)]
#[allow(missing_docs)]
pub enum FilterType {
    Box,
    Triangle,
    Gaussian,
    #[label("Blackman-Harris")]
    BlackmanHarris,
    Smoothstep,
    #[label("B-Spline")]
    BSpline,
    #[label("Catmull-Rom")]
    CatmullRom,
    Mitchell,
    #[label("Generalized Cubic")]
    GeneralizedCubic,
    Sinc,
}

/// Sub-pixel jitter pattern applied to the projection for temporal AA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, SettingEnum)]
pub enum JitterMode {
    /// No jitter.
    None,
    /// Two alternating offsets.
    Uniform2x,
    /// 16-point Hammersley sequence.
    Hammersly16,
}

/// Anti-aliasing category.
#[derive(Debug, Clone, PartialEq, Settings)]
#[allow(missing_docs)]
pub struct AntiAliasing {
    #[setting(display_name = "MSAA Mode")]
    pub msaa_mode: MsaaMode,
    pub filter_type: FilterType,
    #[setting(min = 0.0, max = 6.0, step = 0.01)]
    pub filter_size: f32,
    #[setting(min = 0.01, max = 1.0, step = 0.01)]
    pub gaussian_sigma: f32,
    #[setting(min = 0.0, max = 1.0, step = 0.01, display_name = "Cubic B")]
    pub cubic_b: f32,
    #[setting(min = 0.0, max = 1.0, step = 0.01, display_name = "Cubic C")]
    pub cubic_c: f32,
    pub use_standard_resolve: bool,
    pub inverse_luminance_filtering: bool,
    pub use_exposure_filtering: bool,
    #[setting(min = -16.0, max = 16.0)]
    pub exposure_filter_offset: f32,
    pub use_gradient_mip_level: bool,
    #[setting(shader = false)]
    pub centroid_sampling: bool,
    #[setting(display_name = "Enable Temporal AA")]
    pub enable_temporal_aa: bool,
    #[setting(min = 0.0, max = 1.0)]
    pub temporal_aa_blend_factor: f32,
    pub use_temporal_color_weighting: bool,
    pub clamp_prev_color: bool,
    #[setting(shader = false)]
    pub jitter_mode: JitterMode,
    #[setting(min = 0.0, max = 100.0)]
    pub low_freq_weight: f32,
    #[setting(min = 0.0, max = 100.0)]
    pub hi_freq_weight: f32,
    #[setting(min = 0.0, max = 1.0)]
    pub sharpening_amount: f32,
}

impl Default for AntiAliasing {
    fn default() -> Self {
        Self {
            msaa_mode: MsaaMode::X4,
            filter_type: FilterType::Smoothstep,
            filter_size: 2.0,
            gaussian_sigma: 0.5,
            cubic_b: 0.33,
            cubic_c: 0.33,
            use_standard_resolve: false,
            inverse_luminance_filtering: true,
            use_exposure_filtering: true,
            exposure_filter_offset: 2.0,
            use_gradient_mip_level: false,
            centroid_sampling: true,
            enable_temporal_aa: true,
            temporal_aa_blend_factor: 0.5,
            use_temporal_color_weighting: true,
            clamp_prev_color: true,
            jitter_mode: JitterMode::Uniform2x,
            low_freq_weight: 0.25,
            hi_freq_weight: 0.85,
            sharpening_amount: 0.0,
        }
    }
}
