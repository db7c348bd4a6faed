//! CLI argument parsing

use clap::{Args, Parser, Subcommand};
use promptcraft_core::Technique;
use promptcraft_core::config::constants::defaults;
use std::path::PathBuf;

/// Main CLI structure for promptcraft
#[derive(Parser, Debug)]
#[command(
    name = "promptcraft",
    version,
    about = "Turn rough instructions into structured prompts and enhance them with Gemini"
)]
pub struct Cli {
    /// Configuration file path (default: ./promptcraft.toml, ./.promptcraft/, ~/.promptcraft/)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Gemini model ID, e.g. gemini-2.5-flash
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Sampling temperature between 0.0 and 2.0
    #[arg(long, global = true, value_parser = parse_temperature)]
    pub temperature: Option<f32>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Enhance a prompt once
    Enhance(EnhanceArgs),

    /// Generate three variations at temperatures 0.7, 1.0 and 1.5
    Variations(EnhanceArgs),

    /// Print the composed document without calling the API
    Compose(EnhanceArgs),

    /// List the built-in presets
    Presets,

    /// Interactive session with history, presets and exports
    Interactive,

    /// Write a default promptcraft.toml and .env.example
    Init {
        /// Overwrite an existing promptcraft.toml
        #[arg(long)]
        force: bool,
    },
}

/// Options shared by enhance, variations and compose
#[derive(Args, Debug, Clone, Default)]
pub struct EnhanceArgs {
    /// The raw task to enhance
    pub task: Vec<String>,

    /// Apply a preset (content-writer, code-generator, learning-assistant, all-techniques)
    #[arg(long)]
    pub preset: Option<String>,

    /// Assign a role/expertise
    #[arg(long, overrides_with = "no_role")]
    pub role: bool,
    #[arg(long, overrides_with = "role")]
    pub no_role: bool,

    /// Ask for step-by-step reasoning
    #[arg(long, overrides_with = "no_cot")]
    pub cot: bool,
    #[arg(long, overrides_with = "cot")]
    pub no_cot: bool,

    /// Constrain the output format
    #[arg(long, overrides_with = "no_format")]
    pub format: bool,
    #[arg(long, overrides_with = "format")]
    pub no_format: bool,

    /// Inject the context file
    #[arg(long, overrides_with = "no_context")]
    pub context: bool,
    #[arg(long, overrides_with = "context")]
    pub no_context: bool,

    /// Add refinement instructions
    #[arg(long, overrides_with = "no_iterate")]
    pub iterate: bool,
    #[arg(long, overrides_with = "iterate")]
    pub no_iterate: bool,

    /// Exclude content from the response
    #[arg(long, overrides_with = "no_negative")]
    pub negative: bool,
    #[arg(long, overrides_with = "negative")]
    pub no_negative: bool,

    /// Output format details
    #[arg(long)]
    pub format_details: Option<String>,

    /// Refinement instructions
    #[arg(long)]
    pub iterate_instructions: Option<String>,

    /// What to exclude from the response
    #[arg(long = "exclude")]
    pub negative_details: Option<String>,

    /// Role persona
    #[arg(long)]
    pub persona: Option<String>,

    /// Tone and style
    #[arg(long)]
    pub tone: Option<String>,

    /// UTF-8 text file injected into the CONTEXT section
    #[arg(long)]
    pub context_file: Option<PathBuf>,

    /// Also write the result to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl EnhanceArgs {
    pub fn task_text(&self) -> String {
        self.task.join(" ")
    }

    /// Explicit technique switches given on the command line
    pub fn toggles(&self) -> Vec<(Technique, bool)> {
        [
            (Technique::Role, self.role, self.no_role),
            (Technique::ChainOfThought, self.cot, self.no_cot),
            (Technique::Format, self.format, self.no_format),
            (Technique::Context, self.context, self.no_context),
            (Technique::Iterate, self.iterate, self.no_iterate),
            (Technique::Negative, self.negative, self.no_negative),
        ]
        .into_iter()
        .filter_map(|(technique, on, off)| match (on, off) {
            (true, _) => Some((technique, true)),
            (_, true) => Some((technique, false)),
            _ => None,
        })
        .collect()
    }
}

fn parse_temperature(value: &str) -> Result<f32, String> {
    let temperature: f32 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if (defaults::MIN_TEMPERATURE..=defaults::MAX_TEMPERATURE).contains(&temperature) {
        Ok(temperature)
    } else {
        Err(format!(
            "temperature must be between {} and {}",
            defaults::MIN_TEMPERATURE,
            defaults::MAX_TEMPERATURE
        ))
    }
}
