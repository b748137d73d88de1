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

// Lumen Settings Sandbox
// Builds the application settings, plays a scripted UI session against them
// and prints what the renderer would receive.

use anyhow::{Context, Result};
use lumen_settings::{
    AppSettings, CategoryState, FieldDescriptor, PackedConstants, PackingRules, SettingValue,
    SettingsUi, Vec3,
};

/// A console "UI" that lists every field and replays a fixed set of edits.
struct ScriptedUi {
    category: String,
    edits: Vec<(&'static str, &'static str, SettingValue)>,
}

impl ScriptedUi {
    fn new(edits: Vec<(&'static str, &'static str, SettingValue)>) -> Self {
        Self {
            category: String::new(),
            edits,
        }
    }
}

impl SettingsUi for ScriptedUi {
    fn begin_category(&mut self, name: &str) -> bool {
        println!("[{name}]");
        self.category = name.to_string();
        true
    }

    fn field(
        &mut self,
        descriptor: &FieldDescriptor,
        current: SettingValue,
    ) -> Option<SettingValue> {
        println!(
            "  {:<28} {:<24} {:?}",
            descriptor.display_name(),
            descriptor.format_value(current),
            descriptor.widget()
        );

        let position = self
            .edits
            .iter()
            .position(|(c, f, _)| *c == self.category && *f == descriptor.name())?;
        let (_, _, value) = self.edits.remove(position);
        println!("    -> user enters {value}");
        Some(value)
    }

    fn end_category(&mut self) {
        println!();
    }
}

fn print_registers(packed: &PackedConstants) {
    for (register, chunk) in packed.bytes().chunks_exact(16).enumerate() {
        let row: [f32; 4] = bytemuck::pod_read_unaligned(chunk);
        println!(
            "  c{register:<3} {:>10.4} {:>10.4} {:>10.4} {:>10.4}",
            row[0], row[1], row[2], row[3]
        );
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut settings = AppSettings::new().context("invalid settings declaration")?;

    let mut ui = ScriptedUi::new(vec![
        ("AntiAliasing", "msaa_mode", SettingValue::Enum(7)),
        ("AntiAliasing", "filter_size", SettingValue::Float(2.3456)),
        ("SceneControls", "roughness", SettingValue::Float(0.734)),
        (
            "SceneControls",
            "light_direction",
            SettingValue::Direction(Vec3::ZERO),
        ),
        ("PostProcessing", "bloom_magnitude", SettingValue::Float(3.0)),
    ]);
    let changed = settings.edit(&mut ui);
    log::info!("UI session changed {changed} fields");

    for category in settings.categories() {
        for descriptor in category.descriptors() {
            let value = category.value_at(descriptor.index())?;
            log::debug!("{}.{} = {}", category.name(), descriptor.name(), value);
        }
    }

    println!(
        "MSAA samples: {}, jitter: {}",
        settings.num_msaa_samples(),
        settings.enable_jitter()
    );
    println!(
        "Roughness (physical): {}",
        settings.scene.physical_value("roughness")?
    );
    println!();

    for rules in [PackingRules::Std140, PackingRules::HlslCbuffer] {
        let packed = settings.pack(rules);
        println!("{rules}: {} bytes", packed.bytes().len());
        print_registers(&packed);
        println!();
        print!("{}", packed.layout().shader_declaration("AppSettings"));
        println!();
    }

    let snapshot = serde_json::to_string_pretty(&settings.snapshot())?;
    println!("{snapshot}");

    settings.end_frame();
    Ok(())
}
