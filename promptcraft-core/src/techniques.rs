//! Prompting techniques and the configuration record that toggles them
//!
//! A [`TechniqueConfig`] holds six independent switches plus three free-text
//! details. A detail only matters while its switch is on; the composer never
//! reads detail text for a disabled technique.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One optional rhetorical instruction block of the composed document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Technique {
    Role,
    ChainOfThought,
    Format,
    Context,
    Iterate,
    Negative,
}

impl Technique {
    pub const ALL: [Technique; 6] = [
        Technique::Role,
        Technique::ChainOfThought,
        Technique::Format,
        Technique::Context,
        Technique::Iterate,
        Technique::Negative,
    ];

    /// Short key recorded in history entries and exports
    pub fn key(self) -> &'static str {
        match self {
            Self::Role => "role",
            Self::ChainOfThought => "cot",
            Self::Format => "format",
            Self::Context => "context",
            Self::Iterate => "iterate",
            Self::Negative => "negative",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Role => "Role",
            Self::ChainOfThought => "Chain-of-Thought",
            Self::Format => "Format",
            Self::Context => "Context",
            Self::Iterate => "Iteration",
            Self::Negative => "Negative",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Role => "Establishes the LLM's expertise and authority",
            Self::ChainOfThought => "Forces step-by-step logical reasoning",
            Self::Format => "Defines exact structure and style of output",
            Self::Context => "Uses the supplied context file if available",
            Self::Iterate => "Refines previous answers",
            Self::Negative => "Excludes specific content from response",
        }
    }

    /// Parse a key or label, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase().replace(['-', '_', ' '], "");
        match normalized.as_str() {
            "role" => Some(Self::Role),
            "cot" | "chainofthought" | "reasoning" => Some(Self::ChainOfThought),
            "format" => Some(Self::Format),
            "context" => Some(Self::Context),
            "iterate" | "iteration" | "refine" => Some(Self::Iterate),
            "negative" | "exclude" => Some(Self::Negative),
            _ => None,
        }
    }
}

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Resolved technique selection handed to the composer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechniqueConfig {
    pub role: bool,
    pub chain_of_thought: bool,
    pub format: bool,
    pub context: bool,
    pub iterate: bool,
    pub negative: bool,
    pub format_details: String,
    pub iterate_instructions: String,
    pub negative_details: String,
}

impl TechniqueConfig {
    /// Merge a partial record over the defaults: missing flags are `false`,
    /// missing details are empty.
    pub fn validate(patch: TechniquePatch) -> Self {
        Self {
            role: patch.role.unwrap_or(false),
            chain_of_thought: patch.chain_of_thought.unwrap_or(false),
            format: patch.format.unwrap_or(false),
            context: patch.context.unwrap_or(false),
            iterate: patch.iterate.unwrap_or(false),
            negative: patch.negative.unwrap_or(false),
            format_details: patch.format_details.unwrap_or_default(),
            iterate_instructions: patch.iterate_instructions.unwrap_or_default(),
            negative_details: patch.negative_details.unwrap_or_default(),
        }
    }

    pub fn is_enabled(&self, technique: Technique) -> bool {
        match technique {
            Technique::Role => self.role,
            Technique::ChainOfThought => self.chain_of_thought,
            Technique::Format => self.format,
            Technique::Context => self.context,
            Technique::Iterate => self.iterate,
            Technique::Negative => self.negative,
        }
    }

    pub fn set_enabled(&mut self, technique: Technique, enabled: bool) {
        match technique {
            Technique::Role => self.role = enabled,
            Technique::ChainOfThought => self.chain_of_thought = enabled,
            Technique::Format => self.format = enabled,
            Technique::Context => self.context = enabled,
            Technique::Iterate => self.iterate = enabled,
            Technique::Negative => self.negative = enabled,
        }
    }

    /// Enabled techniques, in declaration order
    pub fn active(&self) -> Vec<Technique> {
        Technique::ALL
            .into_iter()
            .filter(|technique| self.is_enabled(*technique))
            .collect()
    }

    /// Keys of the enabled techniques, as stored in history
    pub fn active_keys(&self) -> Vec<String> {
        self.active()
            .into_iter()
            .map(|technique| technique.key().to_string())
            .collect()
    }

    /// Detail text for the format section, empty while the flag is off
    pub fn effective_format_details(&self) -> &str {
        if self.format { &self.format_details } else { "" }
    }

    pub fn effective_iterate_instructions(&self) -> &str {
        if self.iterate {
            &self.iterate_instructions
        } else {
            ""
        }
    }

    pub fn effective_negative_details(&self) -> &str {
        if self.negative {
            &self.negative_details
        } else {
            ""
        }
    }
}

/// A technique record where any field may be missing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechniquePatch {
    pub role: Option<bool>,
    #[serde(alias = "cot")]
    pub chain_of_thought: Option<bool>,
    pub format: Option<bool>,
    pub context: Option<bool>,
    pub iterate: Option<bool>,
    pub negative: Option<bool>,
    pub format_details: Option<String>,
    pub iterate_instructions: Option<String>,
    pub negative_details: Option<String>,
}
