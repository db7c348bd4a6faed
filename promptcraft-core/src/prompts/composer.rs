//! Assembly of the structured prompt document
//!
//! Sections always appear in the order of [`Section`]. Optional sections are
//! gated on their technique flag, and detail-bearing sections also need
//! non-empty detail text.

use crate::config::constants::document;
use crate::techniques::TechniqueConfig;

/// One block of the composed document, in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Preamble,
    Role,
    Context,
    OutputFormat,
    Tone,
    Reasoning,
    Refinement,
    Exclude,
    Task,
    Closing,
}

impl Section {
    pub fn label(self) -> &'static str {
        match self {
            Self::Preamble => "Preamble",
            Self::Role => "Role/Expertise",
            Self::Context => "Context",
            Self::OutputFormat => "Output Format",
            Self::Tone => "Tone/Style",
            Self::Reasoning => "Reasoning",
            Self::Refinement => "Refinement Instructions",
            Self::Exclude => "Exclude",
            Self::Task => "Task",
            Self::Closing => "Closing",
        }
    }
}

/// Whether `context_text` carries anything worth sending
fn has_usable_context(context_text: &str) -> bool {
    !context_text.is_empty() && context_text != document::NO_CONTEXT_SENTINEL
}

/// The sections `compose` will emit for `config` and `context_text`
pub fn sections(config: &TechniqueConfig, context_text: &str) -> Vec<Section> {
    let mut included = vec![Section::Preamble];

    if config.role {
        included.push(Section::Role);
    }
    if config.context && has_usable_context(context_text) {
        included.push(Section::Context);
    }
    if !config.effective_format_details().is_empty() {
        included.push(Section::OutputFormat);
    }
    included.push(Section::Tone);
    if config.chain_of_thought {
        included.push(Section::Reasoning);
    }
    if !config.effective_iterate_instructions().is_empty() {
        included.push(Section::Refinement);
    }
    if !config.effective_negative_details().is_empty() {
        included.push(Section::Exclude);
    }
    included.push(Section::Task);
    included.push(Section::Closing);

    included
}

/// Build the document sent to the generation service.
///
/// Pure: equal inputs give byte-identical output.
pub fn compose(
    raw_task: &str,
    config: &TechniqueConfig,
    role_persona: &str,
    tone_style: &str,
    context_text: &str,
) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(24);

    for section in sections(config, context_text) {
        match section {
            Section::Preamble => lines.push(document::PREAMBLE.to_string()),
            Section::Role => lines.push(format!("{} {role_persona}", document::ROLE_LABEL)),
            Section::Context => {
                lines.push(document::CONTEXT_LABEL.to_string());
                lines.push(context_text.to_string());
            }
            Section::OutputFormat => lines.push(format!(
                "{} {}",
                document::FORMAT_LABEL,
                config.effective_format_details()
            )),
            Section::Tone => lines.push(format!("{} {tone_style}", document::TONE_LABEL)),
            Section::Reasoning => lines.push(format!(
                "{} {}",
                document::REASONING_LABEL,
                document::REASONING_INSTRUCTION
            )),
            Section::Refinement => lines.push(format!(
                "{} {}",
                document::REFINEMENT_LABEL,
                config.effective_iterate_instructions()
            )),
            Section::Exclude => lines.push(format!(
                "{} {}",
                document::EXCLUDE_LABEL,
                config.effective_negative_details()
            )),
            Section::Task => {
                lines.push(document::TASK_LABEL.to_string());
                lines.push(raw_task.to_string());
            }
            Section::Closing => {
                lines.push(document::CLOSING_RULE.to_string());
                lines.push(document::CLOSING_INSTRUCTION.to_string());
                continue;
            }
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagline_config() -> TechniqueConfig {
        TechniqueConfig {
            role: true,
            format: true,
            format_details: "bullet points".into(),
            ..Default::default()
        }
    }

    fn everything_on() -> TechniqueConfig {
        TechniqueConfig {
            role: true,
            chain_of_thought: true,
            format: true,
            context: true,
            iterate: true,
            negative: true,
            format_details: "FORMAT-DETAIL".into(),
            iterate_instructions: "ITERATE-DETAIL".into(),
            negative_details: "NEGATIVE-DETAIL".into(),
        }
    }

    #[test]
    fn tagline_example() {
        let doc = compose(
            "Write a tagline",
            &tagline_config(),
            "A branding expert",
            "Playful",
            "",
        );

        assert!(doc.contains("**ROLE/EXPERTISE:** A branding expert"));
        assert!(doc.contains("**OUTPUT FORMAT:** bullet points"));
        assert!(doc.contains("**TONE/STYLE:** Playful"));
        assert!(doc.contains("**TASK:**\nWrite a tagline"));
        for absent in ["**CONTEXT:**", "**REASONING:**", "**REFINEMENT INSTRUCTIONS:**", "**EXCLUDE:**"] {
            assert!(!doc.contains(absent), "unexpected section {absent}");
        }
    }

    #[test]
    fn full_document_layout() {
        let doc = compose("Do it", &everything_on(), "Expert", "Calm", "Some context");
        let expected = [
            "Create an enhanced, professional prompt based on the following specifications:",
            "",
            "**ROLE/EXPERTISE:** Expert",
            "",
            "**CONTEXT:**",
            "Some context",
            "",
            "**OUTPUT FORMAT:** FORMAT-DETAIL",
            "",
            "**TONE/STYLE:** Calm",
            "",
            "**REASONING:** Show your step-by-step thought process and reasoning before providing the final answer.",
            "",
            "**REFINEMENT INSTRUCTIONS:** ITERATE-DETAIL",
            "",
            "**EXCLUDE:** NEGATIVE-DETAIL",
            "",
            "**TASK:**",
            "Do it",
            "",
            "---",
            "Based on the above specifications, create a clear, structured, and professional prompt.",
        ]
        .join("\n");
        assert_eq!(doc, expected);
    }

    #[test]
    fn disabled_flags_never_leak_detail_text() {
        let mut config = everything_on();
        config.format = false;
        config.iterate = false;
        config.negative = false;

        let doc = compose("task", &config, "p", "t", "ctx");
        assert!(!doc.contains("FORMAT-DETAIL"));
        assert!(!doc.contains("ITERATE-DETAIL"));
        assert!(!doc.contains("NEGATIVE-DETAIL"));
    }

    #[test]
    fn enabled_flag_with_empty_detail_omits_section() {
        let config = TechniqueConfig {
            format: true,
            negative: true,
            iterate: true,
            ..Default::default()
        };
        let doc = compose("task", &config, "p", "t", "");
        assert!(!doc.contains("**OUTPUT FORMAT:**"));
        assert!(!doc.contains("**REFINEMENT INSTRUCTIONS:**"));
        assert!(!doc.contains("**EXCLUDE:**"));
    }

    #[test]
    fn context_sentinel_and_empty_context_are_skipped() {
        let config = TechniqueConfig {
            context: true,
            ..Default::default()
        };
        assert!(!compose("t", &config, "p", "s", document::NO_CONTEXT_SENTINEL).contains("**CONTEXT:**"));
        assert!(!compose("t", &config, "p", "s", "").contains("**CONTEXT:**"));
        assert!(compose("t", &config, "p", "s", "notes").contains("**CONTEXT:**\nnotes"));
    }

    #[test]
    fn context_is_ignored_when_flag_off() {
        let doc = compose("t", &TechniqueConfig::default(), "p", "s", "secret notes");
        assert!(!doc.contains("secret notes"));
    }

    #[test]
    fn sections_keep_fixed_order() {
        let order = sections(&everything_on(), "ctx");
        assert_eq!(
            order,
            vec![
                Section::Preamble,
                Section::Role,
                Section::Context,
                Section::OutputFormat,
                Section::Tone,
                Section::Reasoning,
                Section::Refinement,
                Section::Exclude,
                Section::Task,
                Section::Closing,
            ]
        );

        let doc = compose("t", &everything_on(), "p", "s", "ctx");
        let positions: Vec<usize> = [
            "**ROLE/EXPERTISE:**",
            "**CONTEXT:**",
            "**OUTPUT FORMAT:**",
            "**TONE/STYLE:**",
            "**REASONING:**",
            "**REFINEMENT INSTRUCTIONS:**",
            "**EXCLUDE:**",
            "**TASK:**",
        ]
        .iter()
        .map(|label| doc.find(label).unwrap())
        .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn tone_and_task_always_present() {
        let doc = compose("only task", &TechniqueConfig::default(), "p", "Neutral", "");
        assert!(doc.contains("**TONE/STYLE:** Neutral"));
        assert!(doc.contains("**TASK:**\nonly task"));
        assert!(!doc.contains("**ROLE/EXPERTISE:**"));
    }

    #[test]
    fn compose_is_deterministic() {
        let config = everything_on();
        let first = compose("t", &config, "p", "s", "c");
        let second = compose("t", &config, "p", "s", "c");
        assert_eq!(first, second);
    }
}
