use anyhow::{Context, Result};
use console::style;
use promptcraft_core::PromptCraftConfig;
use std::path::Path;

/// Handle the init command
pub fn handle_init_command(workspace: &Path, force: bool) -> Result<()> {
    println!("{}", style("Initialize PromptCraft configuration").blue().bold());
    println!("Workspace: {}", workspace.display());

    let created = PromptCraftConfig::bootstrap_project(workspace, force)
        .context("failed to initialize configuration files")?;

    for file in created {
        println!("  {} {file}", style("created").green());
    }
    println!(
        "{}",
        style("Copy .env.example to .env and set your Gemini API key.").dim()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();

        handle_init_command(dir.path(), false).unwrap();
        assert!(dir.path().join("promptcraft.toml").exists());
        assert!(dir.path().join(".env.example").exists());

        assert!(handle_init_command(dir.path(), false).is_err());
        handle_init_command(dir.path(), true).unwrap();
    }
}
