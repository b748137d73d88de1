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

use crate::Settings;

/// Bloom and manual exposure.
#[derive(Debug, Clone, PartialEq, Settings)]
#[allow(missing_docs)]
pub struct PostProcessing {
    #[setting(
        display_name = "Bloom Exposure Offset",
        help = "Exposure offset applied to generate the input of the bloom pass",
        min = -10.0,
        max = 0.0,
        step = 0.01
    )]
    pub bloom_exposure: f32,
    #[setting(
        display_name = "Bloom Magnitude",
        help = "Scale factor applied to the bloom results when combined with tone-mapped result",
        min = 0.0,
        max = 2.0,
        step = 0.01
    )]
    pub bloom_magnitude: f32,
    #[setting(
        display_name = "Bloom Blur Sigma",
        help = "Sigma parameter of the Gaussian filter used in the bloom pass",
        min = 0.5,
        max = 5.0,
        step = 0.01
    )]
    pub bloom_blur_sigma: f32,
    #[setting(
        help = "Manual exposure value when auto-exposure is disabled",
        min = -10.0,
        max = 10.0,
        step = 0.01
    )]
    pub manual_exposure: f32,
}

impl Default for PostProcessing {
    fn default() -> Self {
        Self {
            bloom_exposure: -4.0,
            bloom_magnitude: 1.0,
            bloom_blur_sigma: 5.0,
            manual_exposure: -2.5,
        }
    }
}
