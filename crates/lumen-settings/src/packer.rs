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

//! The constant-buffer packer.
//!
//! Selects the shader-visible fields of a list of categories, assigns byte
//! offsets under a [`PackingRules`] convention and writes the physical
//! (converted) values into a zero-padded byte buffer. Values are written in
//! native byte order.
//!
//! | Kind | Size | Std140 alignment | HLSL cbuffer |
//! |---|---|---|---|
//! | bool, int, float, enum | 4 | 4 | 4 |
//! | direction, color | 12 | 16 | may not straddle 16 |
//! | orientation | 16 | 16 | may not straddle 16 |

use crate::category::{physical, CategoryState};
use crate::conversion::ConversionMode;
use crate::value::{SettingValue, ValueKind};
use std::collections::{BTreeMap, HashMap};
use std::fmt::{self, Write as _};

/// Size of one shader constant register; buffers are rounded up to it.
pub const REGISTER_SIZE: u32 = 16;

/// The alignment convention used to lay out the constant buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PackingRules {
    /// std140 / WGSL uniform layout: 3- and 4-component vectors are aligned
    /// to 16 bytes, scalars to 4. A scalar may fill the tail of a `float3`.
    #[default]
    Std140,
    /// D3D constant-buffer packing: elements are packed tightly, but no
    /// element may straddle a 16-byte register boundary.
    HlslCbuffer,
}

impl PackingRules {
    /// Returns the offset at which an element of `size` bytes is placed when
    /// the write cursor is at `cursor`.
    pub fn place(self, cursor: u32, size: u32) -> u32 {
        match self {
            PackingRules::Std140 => {
                let alignment = if size > 4 { REGISTER_SIZE } else { 4 };
                align_up(cursor, alignment)
            }
            PackingRules::HlslCbuffer => {
                let offset = align_up(cursor, 4);
                let straddles = offset / REGISTER_SIZE != (offset + size - 1) / REGISTER_SIZE;
                if straddles {
                    align_up(offset, REGISTER_SIZE)
                } else {
                    offset
                }
            }
        }
    }
}

impl fmt::Display for PackingRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackingRules::Std140 => f.write_str("std140"),
            PackingRules::HlslCbuffer => f.write_str("hlsl-cbuffer"),
        }
    }
}

/// Number of bytes a field of `kind` occupies in the buffer.
pub fn packed_size(kind: ValueKind) -> u32 {
    match kind {
        ValueKind::Bool | ValueKind::Int | ValueKind::Float | ValueKind::Enum { .. } => 4,
        ValueKind::Direction | ValueKind::Color => 12,
        ValueKind::Orientation => 16,
    }
}

#[inline]
fn align_up(value: u32, alignment: u32) -> u32 {
    (value + alignment - 1) & !(alignment - 1)
}

/// The placement of one shader-visible field.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutEntry {
    /// Position of the owning category in the `sources` slice.
    pub source: usize,
    /// Owning category.
    pub category: &'static str,
    /// Field name.
    pub field: &'static str,
    /// Field index within its category.
    pub index: usize,
    /// Byte offset in the buffer.
    pub offset: u32,
    /// Byte size in the buffer.
    pub size: u32,
    /// The field kind.
    pub kind: ValueKind,
    /// The conversion applied before writing.
    pub conversion: ConversionMode,
}

impl LayoutEntry {
    /// The qualified key used by the offset map: `"Category.field"`.
    pub fn key(&self) -> String {
        format!("{}.{}", self.category, self.field)
    }
}

/// The byte layout of the shader-visible fields of a list of categories.
///
/// Category order is the order of the `sources` slice; within a category,
/// declaration order. The layout depends only on descriptors, so it can be
/// built once and reused for every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantBufferLayout {
    rules: PackingRules,
    entries: Vec<LayoutEntry>,
    size: u32,
}

impl ConstantBufferLayout {
    /// Lays out the shader-visible fields of `sources`.
    pub fn new(rules: PackingRules, sources: &[&dyn CategoryState]) -> Self {
        let mut entries = Vec::new();
        let mut owners: HashMap<&'static str, &'static str> = HashMap::new();
        let mut cursor = 0;

        for (position, source) in sources.iter().enumerate() {
            if sources[..position].iter().any(|s| s.name() == source.name()) {
                log::warn!(
                    "Category '{}' appears more than once; qualified offsets will collide",
                    source.name()
                );
            }
            for descriptor in source.descriptors().iter().filter(|d| d.is_shader_visible()) {
                if let Some(owner) = owners.insert(descriptor.name(), source.name()) {
                    log::warn!(
                        "Field '{}' is shader-visible in both '{}' and '{}'; use qualified offsets",
                        descriptor.name(),
                        owner,
                        source.name()
                    );
                }

                let size = packed_size(descriptor.kind());
                let offset = rules.place(cursor, size);
                entries.push(LayoutEntry {
                    source: position,
                    category: source.name(),
                    field: descriptor.name(),
                    index: descriptor.index(),
                    offset,
                    size,
                    kind: descriptor.kind(),
                    conversion: descriptor.conversion(),
                });
                cursor = offset + size;
            }
        }

        let size = align_up(cursor, REGISTER_SIZE);
        log::debug!(
            "Built {} constant-buffer layout: {} fields, {} bytes",
            rules,
            entries.len(),
            size
        );

        Self {
            rules,
            entries,
            size,
        }
    }

    /// The packing convention.
    pub fn rules(&self) -> PackingRules {
        self.rules
    }

    /// Total buffer size in bytes, a multiple of [`REGISTER_SIZE`].
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Every placed field, in buffer order.
    pub fn entries(&self) -> &[LayoutEntry] {
        &self.entries
    }

    /// The entry for `field` of `category`.
    pub fn entry(&self, category: &str, field: &str) -> Option<&LayoutEntry> {
        self.entries
            .iter()
            .find(|e| e.category == category && e.field == field)
    }

    /// Writes the current physical values of `sources` into a new buffer.
    ///
    /// `sources` must be in the order the layout was built with. An entry
    /// whose source is missing, or is a different category, stays zeroed.
    pub fn pack(&self, sources: &[&dyn CategoryState]) -> PackedConstants {
        let mut bytes = vec![0u8; self.size as usize];

        for entry in &self.entries {
            let Some(source) = sources
                .get(entry.source)
                .filter(|s| s.name() == entry.category)
            else {
                log::warn!(
                    "No source for category '{}' at position {}; leaving it zeroed",
                    entry.category,
                    entry.source
                );
                continue;
            };
            let (Some(descriptor), Ok(stored)) = (
                source.descriptors().get(entry.index),
                source.value_at(entry.index),
            ) else {
                continue;
            };

            let value = physical(descriptor, stored);
            if !entry.kind.accepts(&value) {
                continue;
            }
            let start = entry.offset as usize;
            write_value(&mut bytes[start..start + entry.size as usize], value);
        }

        PackedConstants {
            bytes,
            layout: self.clone(),
        }
    }

    /// Emits the shader-side declaration matching this layout: an HLSL
    /// `cbuffer` for [`PackingRules::HlslCbuffer`], a WGSL `struct` for
    /// [`PackingRules::Std140`].
    ///
    /// Member names are field names, prefixed with the category when a name
    /// occurs in more than one category.
    pub fn shader_declaration(&self, struct_name: &str) -> String {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for entry in &self.entries {
            *counts.entry(entry.field).or_default() += 1;
        }
        let member_name = |entry: &LayoutEntry| {
            if counts.get(entry.field).copied().unwrap_or_default() > 1 {
                format!("{}_{}", entry.category, entry.field)
            } else {
                entry.field.to_string()
            }
        };

        let mut out = String::new();
        match self.rules {
            PackingRules::HlslCbuffer => {
                let _ = writeln!(out, "cbuffer {struct_name}\n{{");
                for entry in &self.entries {
                    let _ = writeln!(
                        out,
                        "    {} {}; // offset {}",
                        hlsl_type(entry.kind),
                        member_name(entry),
                        entry.offset
                    );
                }
                out.push_str("};\n");
            }
            PackingRules::Std140 => {
                let _ = writeln!(out, "struct {struct_name} {{");
                for entry in &self.entries {
                    let _ = writeln!(
                        out,
                        "    {}: {}, // offset {}",
                        member_name(entry),
                        wgsl_type(entry.kind),
                        entry.offset
                    );
                }
                out.push_str("};\n");
            }
        }
        out
    }
}

fn hlsl_type(kind: ValueKind) -> &'static str {
    match kind {
        ValueKind::Bool => "bool",
        ValueKind::Int | ValueKind::Enum { .. } => "int",
        ValueKind::Float => "float",
        ValueKind::Direction | ValueKind::Color => "float3",
        ValueKind::Orientation => "float4",
    }
}

fn wgsl_type(kind: ValueKind) -> &'static str {
    match kind {
        ValueKind::Bool => "u32",
        ValueKind::Int | ValueKind::Enum { .. } => "i32",
        ValueKind::Float => "f32",
        ValueKind::Direction | ValueKind::Color => "vec3<f32>",
        ValueKind::Orientation => "vec4<f32>",
    }
}

fn write_value(dst: &mut [u8], value: SettingValue) {
    match value {
        SettingValue::Bool(b) => dst.copy_from_slice(bytemuck::bytes_of(&u32::from(b))),
        SettingValue::Int(v) => dst.copy_from_slice(bytemuck::bytes_of(&v)),
        SettingValue::Float(v) => dst.copy_from_slice(bytemuck::bytes_of(&v)),
        SettingValue::Enum(index) => {
            let index = i32::try_from(index).unwrap_or(i32::MAX);
            dst.copy_from_slice(bytemuck::bytes_of(&index));
        }
        SettingValue::Direction(v) => dst.copy_from_slice(bytemuck::bytes_of(&v)),
        SettingValue::Color(c) => dst.copy_from_slice(bytemuck::bytes_of(&c)),
        SettingValue::Orientation(q) => dst.copy_from_slice(bytemuck::bytes_of(&q)),
    }
}

/// A packed constant buffer together with the layout that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedConstants {
    bytes: Vec<u8>,
    layout: ConstantBufferLayout,
}

impl PackedConstants {
    /// The buffer contents, ready for upload.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the buffer and returns its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// The layout the buffer was packed with.
    pub fn layout(&self) -> &ConstantBufferLayout {
        &self.layout
    }

    /// Every packed field's offset, keyed by `"Category.field"`.
    pub fn offsets(&self) -> BTreeMap<String, u32> {
        self.layout
            .entries
            .iter()
            .map(|e| (e.key(), e.offset))
            .collect()
    }

    /// Offset of the first packed field called `field`, in buffer order.
    pub fn offset_of(&self, field: &str) -> Option<u32> {
        self.layout
            .entries
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.offset)
    }

    /// Offset of `field` within `category`.
    pub fn offset_in(&self, category: &str, field: &str) -> Option<u32> {
        self.layout.entry(category, field).map(|e| e.offset)
    }
}

/// Lays out and packs `sources` in one call.
///
/// Equivalent to `ConstantBufferLayout::new(rules, sources).pack(sources)`.
pub fn pack_constants(rules: PackingRules, sources: &[&dyn CategoryState]) -> PackedConstants {
    ConstantBufferLayout::new(rules, sources).pack(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, Settings};
    use approx::assert_relative_eq;
    use lumen_core::math::{LinearRgb, Quaternion, Vec3};

    #[derive(Debug, Clone, Settings)]
    struct Lighting {
        exposure: f32,
        light_direction: Vec3,
        shadows: bool,
        #[setting(min = 0.001, max = 1.0, conversion = Square)]
        roughness: f32,
        #[setting(shader = false)]
        vsync: bool,
        orientation: Quaternion,
        tint: LinearRgb,
    }

    impl Default for Lighting {
        fn default() -> Self {
            Self {
                exposure: 1.5,
                light_direction: Vec3::Y,
                shadows: true,
                roughness: 0.5,
                vsync: true,
                orientation: Quaternion::IDENTITY,
                tint: LinearRgb::new(1.0, 0.5, 0.25),
            }
        }
    }

    #[derive(Debug, Clone, Settings)]
    #[settings(name = "Post")]
    struct Post {
        exposure: f32,
    }

    impl Default for Post {
        fn default() -> Self {
            Self { exposure: -2.0 }
        }
    }

    fn read_f32(bytes: &[u8], offset: u32) -> f32 {
        bytemuck::pod_read_unaligned(&bytes[offset as usize..offset as usize + 4])
    }

    fn read_u32(bytes: &[u8], offset: u32) -> u32 {
        bytemuck::pod_read_unaligned(&bytes[offset as usize..offset as usize + 4])
    }

    #[test]
    fn test_placement_rules() {
        assert_eq!(PackingRules::Std140.place(4, 12), 16);
        assert_eq!(PackingRules::Std140.place(28, 4), 28);
        assert_eq!(PackingRules::HlslCbuffer.place(4, 12), 4);
        assert_eq!(PackingRules::HlslCbuffer.place(8, 12), 16);
        assert_eq!(PackingRules::HlslCbuffer.place(4, 16), 16);
        assert_eq!(PackingRules::HlslCbuffer.place(0, 16), 0);
    }

    #[test]
    fn test_std140_offsets() {
        let lighting = Category::<Lighting>::new().unwrap();
        let layout = ConstantBufferLayout::new(PackingRules::Std140, &[&lighting]);
        let offsets: Vec<_> = layout.entries().iter().map(|e| (e.field, e.offset)).collect();
        assert_eq!(
            offsets,
            [
                ("exposure", 0),
                ("light_direction", 16),
                ("shadows", 28),
                ("roughness", 32),
                ("orientation", 48),
                ("tint", 64),
            ]
        );
        assert_eq!(layout.size(), 80);
    }

    #[test]
    fn test_hlsl_offsets() {
        let lighting = Category::<Lighting>::new().unwrap();
        let layout = ConstantBufferLayout::new(PackingRules::HlslCbuffer, &[&lighting]);
        let offsets: Vec<_> = layout.entries().iter().map(|e| (e.field, e.offset)).collect();
        assert_eq!(
            offsets,
            [
                ("exposure", 0),
                ("light_direction", 4),
                ("shadows", 16),
                ("roughness", 20),
                ("orientation", 32),
                ("tint", 48),
            ]
        );
        assert_eq!(layout.size(), 64);
    }

    #[test]
    fn test_pack_writes_physical_values() {
        let lighting = Category::<Lighting>::new().unwrap();
        let packed = pack_constants(PackingRules::Std140, &[&lighting]);
        let bytes = packed.bytes();

        assert_eq!(bytes.len(), 80);
        assert_relative_eq!(read_f32(bytes, 0), 1.5);
        assert_relative_eq!(read_f32(bytes, 20), 1.0);
        assert_eq!(read_u32(bytes, 28), 1);
        assert_relative_eq!(read_f32(bytes, 32), 0.25);
        assert_relative_eq!(read_f32(bytes, 60), 1.0);
        assert_relative_eq!(read_f32(bytes, 68), 0.5);
        // Padding between exposure and light_direction.
        assert!(bytes[4..16].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_host_only_fields_are_excluded() {
        let lighting = Category::<Lighting>::new().unwrap();
        let packed = pack_constants(PackingRules::Std140, &[&lighting]);
        assert_eq!(packed.offset_of("vsync"), None);
        assert_eq!(packed.offsets().len(), 6);
    }

    #[test]
    fn test_offsets_are_qualified_by_category() {
        let lighting = Category::<Lighting>::new().unwrap();
        let post = Category::<Post>::new().unwrap();
        let packed = pack_constants(PackingRules::Std140, &[&lighting, &post]);

        let offsets = packed.offsets();
        assert_eq!(offsets.get("Lighting.exposure"), Some(&0));
        assert_eq!(offsets.get("Post.exposure"), Some(&76));
        assert_eq!(packed.offset_of("exposure"), Some(0));
        assert_eq!(packed.offset_in("Post", "exposure"), Some(76));
        assert_relative_eq!(read_f32(packed.bytes(), 76), -2.0);
    }

    #[test]
    fn test_same_named_sources_keep_their_own_values() {
        let first = Category::<Post>::new().unwrap();
        let mut second = Category::<Post>::new().unwrap();
        second.write("exposure", SettingValue::Float(3.0)).unwrap();

        let packed = pack_constants(PackingRules::Std140, &[&first, &second]);
        let sources: Vec<_> = packed.layout().entries().iter().map(|e| e.source).collect();

        assert_eq!(sources, [0, 1]);
        assert_relative_eq!(read_f32(packed.bytes(), 0), -2.0);
        assert_relative_eq!(read_f32(packed.bytes(), 4), 3.0);
    }

    #[test]
    fn test_mismatched_sources_leave_entries_zeroed() {
        let lighting = Category::<Lighting>::new().unwrap();
        let post = Category::<Post>::new().unwrap();
        let layout = ConstantBufferLayout::new(PackingRules::Std140, &[&lighting, &post]);

        let packed = layout.pack(&[&post]);
        assert!(packed.bytes().iter().all(|b| *b == 0));
    }

    #[test]
    fn test_pack_is_deterministic() {
        let lighting = Category::<Lighting>::new().unwrap();
        let a = pack_constants(PackingRules::HlslCbuffer, &[&lighting]);
        let b = pack_constants(PackingRules::HlslCbuffer, &[&lighting]);
        assert_eq!(a.bytes(), b.bytes());
    }

    #[test]
    fn test_empty_buffer() {
        let packed = pack_constants(PackingRules::Std140, &[]);
        assert!(packed.bytes().is_empty());
        assert!(packed.offsets().is_empty());
    }

    #[test]
    fn test_shader_declarations() {
        let lighting = Category::<Lighting>::new().unwrap();
        let post = Category::<Post>::new().unwrap();

        let hlsl = ConstantBufferLayout::new(PackingRules::HlslCbuffer, &[&lighting, &post])
            .shader_declaration("Settings");
        assert!(hlsl.starts_with("cbuffer Settings\n{"));
        assert!(hlsl.contains("    float3 light_direction; // offset 4\n"));
        assert!(hlsl.contains("    float Lighting_exposure; // offset 0\n"));
        assert!(hlsl.contains("    float Post_exposure;"));
        assert!(!hlsl.contains("vsync"));

        let wgsl = ConstantBufferLayout::new(PackingRules::Std140, &[&lighting])
            .shader_declaration("Settings");
        assert!(wgsl.contains("    orientation: vec4<f32>, // offset 48\n"));
        assert!(wgsl.contains("    shadows: u32, // offset 28\n"));
    }
}
