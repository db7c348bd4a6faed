//! Named technique presets and resolution of the active configuration
//!
//! A preset fixes the six technique switches but never the free-text details.
//! When a preset is selected, detail text comes from whatever the user
//! currently holds for the techniques that preset enables.

use crate::config::constants::defaults;
use crate::error::GenerationError;
use crate::techniques::{Technique, TechniqueConfig};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Keywords that select the manual (live toggles) configuration
pub const MANUAL_KEYWORDS: &[&str] = &["manual", "custom"];

/// The six switches a preset fixes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresetFlags {
    pub role: bool,
    #[serde(alias = "chain_of_thought")]
    pub cot: bool,
    pub format: bool,
    pub context: bool,
    pub iterate: bool,
    pub negative: bool,
}

impl PresetFlags {
    pub const fn new(
        role: bool,
        cot: bool,
        format: bool,
        context: bool,
        iterate: bool,
        negative: bool,
    ) -> Self {
        Self {
            role,
            cot,
            format,
            context,
            iterate,
            negative,
        }
    }

    pub fn is_enabled(&self, technique: Technique) -> bool {
        match technique {
            Technique::Role => self.role,
            Technique::ChainOfThought => self.cot,
            Technique::Format => self.format,
            Technique::Context => self.context,
            Technique::Iterate => self.iterate,
            Technique::Negative => self.negative,
        }
    }

    pub fn set(&mut self, technique: Technique, enabled: bool) {
        match technique {
            Technique::Role => self.role = enabled,
            Technique::ChainOfThought => self.cot = enabled,
            Technique::Format => self.format = enabled,
            Technique::Context => self.context = enabled,
            Technique::Iterate => self.iterate = enabled,
            Technique::Negative => self.negative = enabled,
        }
    }
}

/// A built-in preset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinPreset {
    pub name: &'static str,
    pub slug: &'static str,
    pub flags: PresetFlags,
}

pub const BUILTIN_PRESETS: [BuiltinPreset; 4] = [
    BuiltinPreset {
        name: "Content Writer",
        slug: "content-writer",
        flags: PresetFlags::new(true, false, true, true, false, true),
    },
    BuiltinPreset {
        name: "Code Generator",
        slug: "code-generator",
        flags: PresetFlags::new(true, true, true, true, false, true),
    },
    BuiltinPreset {
        name: "Learning Assistant",
        slug: "learning-assistant",
        flags: PresetFlags::new(true, true, false, true, false, false),
    },
    BuiltinPreset {
        name: "All Techniques",
        slug: "all-techniques",
        flags: PresetFlags::new(true, true, true, true, true, true),
    },
];

/// The user-editable technique state: manual switches plus held detail text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveTechniques {
    #[serde(flatten)]
    pub flags: PresetFlags,
    pub format_details: String,
    pub iterate_instructions: String,
    pub negative_details: String,
}

impl Default for LiveTechniques {
    fn default() -> Self {
        Self {
            flags: PresetFlags::new(true, false, false, true, false, false),
            format_details: defaults::DEFAULT_FORMAT_DETAILS.to_string(),
            iterate_instructions: defaults::DEFAULT_ITERATE_INSTRUCTIONS.to_string(),
            negative_details: String::new(),
        }
    }
}

impl LiveTechniques {
    /// The manual configuration, taken verbatim
    pub fn to_config(&self) -> TechniqueConfig {
        TechniqueConfig {
            role: self.flags.role,
            chain_of_thought: self.flags.cot,
            format: self.flags.format,
            context: self.flags.context,
            iterate: self.flags.iterate,
            negative: self.flags.negative,
            format_details: self.format_details.clone(),
            iterate_instructions: self.iterate_instructions.clone(),
            negative_details: self.negative_details.clone(),
        }
    }
}

/// How the active technique configuration is chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Preset { name: String, flags: PresetFlags },
    Manual,
}

impl Selection {
    pub fn name(&self) -> &str {
        match self {
            Self::Preset { name, .. } => name,
            Self::Manual => "Custom (Manual)",
        }
    }

    pub fn is_manual(&self) -> bool {
        matches!(self, Self::Manual)
    }
}

/// Resolve the configuration the composer will see.
///
/// For a preset, the flags come from the preset and each detail comes from
/// `live` only when the preset enables that technique. For manual selection
/// everything comes from `live`.
pub fn resolve_config(selection: &Selection, live: &LiveTechniques) -> TechniqueConfig {
    match selection {
        Selection::Manual => live.to_config(),
        Selection::Preset { flags, .. } => {
            let detail_if = |enabled: bool, text: &str| {
                if enabled { text.to_string() } else { String::new() }
            };
            TechniqueConfig {
                role: flags.role,
                chain_of_thought: flags.cot,
                format: flags.format,
                context: flags.context,
                iterate: flags.iterate,
                negative: flags.negative,
                format_details: detail_if(flags.format, &live.format_details),
                iterate_instructions: detail_if(flags.iterate, &live.iterate_instructions),
                negative_details: detail_if(flags.negative, &live.negative_details),
            }
        }
    }
}

/// A listed preset, built-in or user-saved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetSummary {
    pub name: String,
    pub flags: PresetFlags,
    pub builtin: bool,
}

/// Built-in presets plus the session's custom ones.
///
/// Custom presets are append-only: saving an existing name replaces its
/// flags, nothing is ever removed.
#[derive(Debug, Clone, Default)]
pub struct PresetRegistry {
    custom: IndexMap<String, PresetFlags>,
}

impl PresetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a selection by preset name, slug, or a manual keyword
    pub fn select(&self, name: &str) -> Option<Selection> {
        let wanted = name.trim();
        if MANUAL_KEYWORDS
            .iter()
            .any(|keyword| wanted.eq_ignore_ascii_case(keyword))
        {
            return Some(Selection::Manual);
        }

        if let Some(builtin) = find_builtin(wanted) {
            return Some(Selection::Preset {
                name: builtin.name.to_string(),
                flags: builtin.flags,
            });
        }

        self.custom
            .iter()
            .find(|(custom_name, _)| custom_name.eq_ignore_ascii_case(wanted))
            .map(|(custom_name, flags)| Selection::Preset {
                name: custom_name.clone(),
                flags: *flags,
            })
    }

    /// Save the given switches under `name`
    pub fn save_custom(&mut self, name: &str, flags: PresetFlags) -> Result<(), GenerationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GenerationError::validation("Please enter a preset name"));
        }
        if find_builtin(name).is_some()
            || MANUAL_KEYWORDS
                .iter()
                .any(|keyword| name.eq_ignore_ascii_case(keyword))
        {
            return Err(GenerationError::validation(format!(
                "'{name}' is reserved by a built-in preset"
            )));
        }

        tracing::info!(preset = name, "saved custom preset");
        match self
            .custom
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some((_, existing_flags)) => *existing_flags = flags,
            None => {
                self.custom.insert(name.to_string(), flags);
            }
        }
        Ok(())
    }

    pub fn custom(&self) -> &IndexMap<String, PresetFlags> {
        &self.custom
    }

    /// Built-ins first, then custom presets in save order
    pub fn list(&self) -> Vec<PresetSummary> {
        BUILTIN_PRESETS
            .iter()
            .map(|preset| PresetSummary {
                name: preset.name.to_string(),
                flags: preset.flags,
                builtin: true,
            })
            .chain(self.custom.iter().map(|(name, flags)| PresetSummary {
                name: name.clone(),
                flags: *flags,
                builtin: false,
            }))
            .collect()
    }
}

fn find_builtin(name: &str) -> Option<&'static BuiltinPreset> {
    BUILTIN_PRESETS
        .iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name) || preset.slug.eq_ignore_ascii_case(name))
}
