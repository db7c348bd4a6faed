use super::render;
use anyhow::Result;
use console::style;
use promptcraft_core::{PresetRegistry, Technique};

/// One line per technique: key and what it adds to the document
pub fn technique_legend() -> Vec<String> {
    Technique::ALL
        .iter()
        .map(|technique| format!("{:<10} {}", technique.key(), technique.description()))
        .collect()
}

/// Handle the presets command
pub fn handle_presets_command() -> Result<()> {
    println!("{}", style("Built-in presets").blue().bold());
    for preset in PresetRegistry::new().list() {
        println!(
            "  {:<20} {}",
            style(&preset.name).bold(),
            render::flag_marks(&preset.flags)
        );
    }
    println!();
    println!("{}", style("Techniques").blue().bold());
    for line in technique_legend() {
        println!("  {line}");
    }
    println!();
    println!(
        "{}",
        style("Use --preset <name>, or `manual` to use your own switches.").dim()
    );
    Ok(())
}
