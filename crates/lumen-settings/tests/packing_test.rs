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

use approx::assert_relative_eq;
use lumen_settings::{AppSettings, PackingRules, SettingValue, ValueKind};

fn read_f32(bytes: &[u8], offset: u32) -> f32 {
    let start = offset as usize;
    bytemuck::pod_read_unaligned(&bytes[start..start + 4])
}

fn read_i32(bytes: &[u8], offset: u32) -> i32 {
    let start = offset as usize;
    bytemuck::pod_read_unaligned(&bytes[start..start + 4])
}

#[test]
fn test_only_shader_visible_fields_are_packed() {
    // --- 1. ARRANGE ---
    let settings = AppSettings::new().unwrap();

    // --- 2. ACT ---
    let packed = settings.pack(PackingRules::Std140);
    let offsets = packed.offsets();

    // --- 3. ASSERT ---
    // 20 + 16 + 4 fields, minus the two host-only ones.
    assert_eq!(offsets.len(), 38);
    assert!(!offsets.contains_key("AntiAliasing.centroid_sampling"));
    assert!(!offsets.contains_key("AntiAliasing.jitter_mode"));
    assert!(offsets.contains_key("SceneControls.model_orientation"));
    assert_eq!(offsets.get("AntiAliasing.msaa_mode"), Some(&0));
}

#[test]
fn test_packed_values_are_physical() {
    let settings = AppSettings::new().unwrap();
    let packed = settings.pack(PackingRules::Std140);
    let bytes = packed.bytes();

    let roughness = packed.offset_of("roughness").unwrap();
    assert_relative_eq!(read_f32(bytes, roughness), 0.01, epsilon = 1e-6);

    let msaa = packed.offset_of("msaa_mode").unwrap();
    assert_eq!(read_i32(bytes, msaa), 2);

    let shadows = packed.offset_in("SceneControls", "enable_shadows").unwrap();
    assert_eq!(read_i32(bytes, shadows), 1);

    let bloom = packed.offset_of("bloom_exposure").unwrap();
    assert_relative_eq!(read_f32(bytes, bloom), -4.0, epsilon = 1e-5);
}

#[test]
fn test_packing_tracks_writes() {
    // --- 1. ARRANGE ---
    let mut settings = AppSettings::new().unwrap();
    let before = settings.pack(PackingRules::HlslCbuffer);

    // --- 2. ACT ---
    settings
        .scene
        .write("roughness", SettingValue::Float(0.5))
        .unwrap();
    let after = settings.pack(PackingRules::HlslCbuffer);

    // --- 3. ASSERT ---
    assert_ne!(before.bytes(), after.bytes());
    let offset = after.offset_of("roughness").unwrap();
    assert_relative_eq!(read_f32(after.bytes(), offset), 0.25, epsilon = 1e-6);
    assert_eq!(before.offsets(), after.offsets());
}

#[test]
fn test_packing_is_deterministic() {
    let settings = AppSettings::new().unwrap();
    for rules in [PackingRules::Std140, PackingRules::HlslCbuffer] {
        assert_eq!(settings.pack(rules), settings.pack(rules));
    }
}

#[test]
fn test_layout_respects_alignment_rules() {
    let settings = AppSettings::new().unwrap();

    for rules in [PackingRules::Std140, PackingRules::HlslCbuffer] {
        let layout = settings.layout(rules);
        assert_eq!(layout.size() % 16, 0);

        let mut end = 0;
        for entry in layout.entries() {
            assert!(entry.offset >= end, "{} overlaps its predecessor", entry.key());
            assert_eq!(entry.offset % 4, 0);
            match rules {
                PackingRules::Std140 if entry.size > 4 => assert_eq!(entry.offset % 16, 0),
                PackingRules::HlslCbuffer => assert_eq!(
                    entry.offset / 16,
                    (entry.offset + entry.size - 1) / 16,
                    "{} straddles a register",
                    entry.key()
                ),
                _ => {}
            }
            end = entry.offset + entry.size;
        }
        assert!(end <= layout.size());
    }
}

#[test]
fn test_hlsl_is_at_most_as_large_as_std140() {
    let settings = AppSettings::new().unwrap();
    let std140 = settings.layout(PackingRules::Std140);
    let hlsl = settings.layout(PackingRules::HlslCbuffer);
    assert!(hlsl.size() <= std140.size());
    assert_eq!(std140.entries().len(), hlsl.entries().len());
}

#[test]
fn test_shader_declaration_lists_every_packed_field() {
    let settings = AppSettings::new().unwrap();
    let layout = settings.layout(PackingRules::HlslCbuffer);
    let declaration = layout.shader_declaration("AppSettings");

    assert!(declaration.starts_with("cbuffer AppSettings"));
    assert!(declaration.contains("float3 light_color;"));
    assert!(declaration.contains("float4 model_orientation;"));
    assert!(declaration.contains("int filter_type;"));
    assert!(!declaration.contains("centroid_sampling"));
    assert_eq!(
        declaration.matches("// offset").count(),
        layout.entries().len()
    );
    let bools = layout
        .entries()
        .iter()
        .filter(|e| e.kind == ValueKind::Bool)
        .count();
    assert_eq!(declaration.matches("    bool ").count(), bools);
}
