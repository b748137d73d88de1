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

use lumen_settings::{
    AppSettings, Category, ConversionMode, DeclarationError, LinearRgb, SettingEnum, Settings,
    SettingsCategory, ValueKind, WidgetKind,
};

// --- DUMMY CATEGORIES FOR THIS TEST ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, SettingEnum)]
enum Tonemapper {
    #[label("Filmic (ACES)")]
    Aces,
    Reinhard,
}

#[derive(Debug, Clone, Settings)]
#[settings(name = "Tonemapping")]
struct Tonemapping {
    operator: Tonemapper,
    #[setting(min = 0, max = 16, step = 2, help = "Histogram bins, in multiples of two")]
    bins: i32,
    #[setting(min = 0.0, max = 180.0, conversion = DegreesToRadians)]
    hue_shift: f32,
    #[setting(hdr = false, display_name = "Tint")]
    tint: LinearRgb,
}

impl Default for Tonemapping {
    fn default() -> Self {
        Self {
            operator: Tonemapper::Reinhard,
            bins: 8,
            hue_shift: 90.0,
            tint: LinearRgb::WHITE,
        }
    }
}

#[derive(Debug, Clone, Default, Settings)]
struct BoundedFlag {
    #[setting(min = 0.0, max = 1.0)]
    flag: bool,
}

#[derive(Debug, Clone, Settings)]
struct OutOfRange {
    #[setting(min = 0.0, max = 1.0)]
    amount: f32,
}

impl Default for OutOfRange {
    fn default() -> Self {
        Self { amount: 1.5 }
    }
}

#[derive(Debug, Clone, Default, Settings)]
struct NegativeSqrt {
    #[setting(min = -1.0, max = 1.0, conversion = SquareRoot)]
    amount: f32,
}

#[test]
fn test_derive_generates_ordered_declarations() {
    // --- 1. ARRANGE / ACT ---
    let decls = Tonemapping::fields();

    // --- 2. ASSERT ---
    assert_eq!(Tonemapping::NAME, "Tonemapping");
    let names: Vec<_> = decls.iter().map(|d| d.name()).collect();
    assert_eq!(names, ["operator", "bins", "hue_shift", "tint"]);
    assert_eq!(decls[0].kind(), ValueKind::Enum { variant_count: 2 });
    assert_eq!(decls[3].kind(), ValueKind::Color);
}

#[test]
fn test_descriptors_carry_metadata() {
    let category = Category::<Tonemapping>::new().expect("valid declaration");

    let operator = category.descriptor("operator").unwrap();
    assert_eq!(operator.enum_labels(), Some(Tonemapper::LABELS));
    assert_eq!(operator.enum_label(0), Some("Filmic (ACES)"));
    assert_eq!(operator.enum_label(1), Some("Reinhard"));

    let bins = category.descriptor("bins").unwrap();
    assert_eq!(bins.help_text(), "Histogram bins, in multiples of two");
    assert_eq!(bins.display_name(), "bins");
    assert_eq!(
        bins.widget(),
        WidgetKind::IntSlider {
            min: 0,
            max: 16,
            step: 2
        }
    );

    let hue = category.descriptor("hue_shift").unwrap();
    assert_eq!(hue.conversion(), ConversionMode::DegreesToRadians);
    assert!(hue.step().is_none());

    let tint = category.descriptor("tint").unwrap();
    assert_eq!(tint.display_name(), "Tint");
    assert_eq!(tint.widget(), WidgetKind::ColorPicker { hdr: false });
}

#[test]
fn test_bounds_on_bool_abort_construction() {
    let err = Category::<BoundedFlag>::new().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Attribute 'min' cannot be attached to 'BoundedFlag.flag' of kind bool"
    );
}

#[test]
fn test_out_of_range_default_aborts_construction() {
    let err = Category::<OutOfRange>::new().unwrap_err();
    assert!(matches!(
        err,
        DeclarationError::InvalidDefault {
            category: "OutOfRange",
            field: "amount",
            ..
        }
    ));
}

#[test]
fn test_square_root_below_zero_aborts_construction() {
    let err = Category::<NegativeSqrt>::new().unwrap_err();
    assert!(matches!(
        err,
        DeclarationError::ConversionDomain {
            mode: ConversionMode::SquareRoot,
            ..
        }
    ));
}

#[test]
fn test_application_descriptors() {
    let settings = AppSettings::new().unwrap();

    let light_color = settings.scene.descriptor("light_color").unwrap();
    assert!(light_color.is_hdr());
    assert_eq!(light_color.display_name(), "Light Color");
    assert_eq!(light_color.step(), Some(0.1));

    let msaa = settings.anti_aliasing.descriptor("msaa_mode").unwrap();
    assert_eq!(
        msaa.widget(),
        WidgetKind::Dropdown {
            labels: &["None", "2x", "4x", "8x"]
        }
    );

    let roughness = settings.scene.descriptor("roughness").unwrap();
    assert_eq!(roughness.conversion(), ConversionMode::Square);

    let host_only: Vec<_> = settings
        .anti_aliasing
        .descriptors()
        .iter()
        .filter(|d| !d.is_shader_visible())
        .map(|d| d.name())
        .collect();
    assert_eq!(host_only, ["centroid_sampling", "jitter_mode"]);
}
