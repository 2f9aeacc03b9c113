//! `envali presets`: list the built-in regex presets.

use serde::Serialize;

use envali_core::domain::RegexPreset;

use crate::{
    cli::{PresetFormat, PresetsArgs},
    error::CliResult,
    output::OutputManager,
};

/// One preset as printed by the command.
#[derive(Debug, Serialize)]
struct PresetEntry {
    name: &'static str,
    pattern: String,
    /// Classes the value must also contain, e.g. `[0-9]`.
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    requires: &'static [&'static str],
}

pub fn execute(args: PresetsArgs, output: OutputManager) -> CliResult<()> {
    let presets = entries();

    if args.format == PresetFormat::Json || output.is_json() {
        return output.json(&presets);
    }

    let width = presets.iter().map(|p| p.name.len()).max().unwrap_or(0);
    output.header("Regex presets:")?;
    for preset in &presets {
        let mut line = format!("  {:<width$}  {}", preset.name, preset.pattern);
        if !preset.requires.is_empty() {
            line.push_str(&format!("  (also contains {})", preset.requires.join(" ")));
        }
        output.data(&line)?;
    }
    Ok(())
}

fn entries() -> Vec<PresetEntry> {
    RegexPreset::ALL
        .iter()
        .filter_map(|preset| {
            preset.pattern().map(|pattern| PresetEntry {
                name: preset.name(),
                pattern,
                requires: preset.required_classes(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_is_listed_once() {
        let entries = entries();
        assert_eq!(entries.len(), RegexPreset::ALL.len());
        assert!(entries.iter().all(|e| e.name != "NONE"));
    }

    #[test]
    fn entries_serialise_as_name_and_pattern() {
        let json = serde_json::to_value(&entries()[0]).unwrap();
        assert_eq!(json["name"], "EMAIL_ADDRESS");
        assert!(json["pattern"].as_str().unwrap().contains('@'));
        assert!(json.get("requires").is_none());
    }

    #[test]
    fn password_lists_its_required_classes() {
        let entries = entries();
        let password = entries.iter().find(|e| e.name == "PASSWORD").unwrap();
        let json = serde_json::to_value(password).unwrap();
        assert_eq!(json["requires"], serde_json::json!(["[a-z]", "[A-Z]", "[0-9]"]));
    }
}
