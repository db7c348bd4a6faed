//! Terminal rendering helpers

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use promptcraft_core::config::constants::model_helpers;
use promptcraft_core::{
    GenerationError, GenerationWarning, Generated, PresetFlags, Technique, TechniqueConfig,
};
use std::time::Duration;

/// Character and word counts of the raw input
pub fn input_stats(task: &str) -> (usize, usize) {
    (task.chars().count(), task.split_whitespace().count())
}

pub fn print_input_stats(task: &str) {
    let (chars, words) = input_stats(task);
    eprintln!(
        "{}",
        style(format!("Input: {chars} characters, {words} words")).dim()
    );
}

pub fn active_techniques_line(config: &TechniqueConfig) -> String {
    let active = config.active();
    if active.is_empty() {
        "none".to_string()
    } else {
        active
            .iter()
            .map(|technique| technique.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub fn print_active_techniques(config: &TechniqueConfig) {
    eprintln!(
        "{} {}",
        style("Active techniques:").cyan(),
        active_techniques_line(config)
    );
}

/// Spinner on stderr while waiting for Gemini
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(spinner_style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub fn model_label(model: &str) -> String {
    match model_helpers::display_name(model) {
        Some(name) => format!("{name} [{model}]"),
        None => model.to_string(),
    }
}

pub fn print_warnings(warnings: &[GenerationWarning]) {
    for warning in warnings {
        eprintln!("{} {warning}", style("Warning:").yellow().bold());
    }
}

/// Print generated text to stdout, metadata to stderr
pub fn print_generated(generated: &Generated) {
    print_warnings(&generated.warnings);
    eprintln!(
        "{}",
        style(format!(
            "Enhanced with {} at temperature {}",
            model_label(&generated.model),
            generated.temperature
        ))
        .green()
        .bold()
    );
    println!("{}", generated.text);
}

pub fn print_generation_error(err: &GenerationError) {
    match err {
        GenerationError::Validation(message) => {
            eprintln!("{} {message}", style("Input error:").yellow().bold());
        }
        GenerationError::Client { message, .. } => {
            eprintln!(
                "{}",
                style("API Error: Invalid API Key or Request").red().bold()
            );
            eprintln!("{} {message}", style("Details:").bold());
            eprintln!("{}", style("Please verify your API key configuration.").dim());
        }
        GenerationError::Unclassified { message, detail } => {
            eprintln!("{}", style(message).red().bold());
            if !detail.is_empty() {
                eprintln!("{} {detail}", style("Details:").bold());
            }
        }
        GenerationError::Configuration(message) => {
            eprintln!("{} {message}", style("Configuration error:").red().bold());
        }
    }
}

pub fn flag_marks(flags: &PresetFlags) -> String {
    Technique::ALL
        .iter()
        .map(|technique| {
            let mark = if flags.is_enabled(*technique) { "x" } else { " " };
            format!("[{mark}] {}", technique.key())
        })
        .collect::<Vec<_>>()
        .join("  ")
}
