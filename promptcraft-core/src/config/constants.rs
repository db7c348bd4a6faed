/// Model ID constants offered by the model picker
pub mod models {
    // Google/Gemini models
    pub mod google {
        pub const DEFAULT_MODEL: &str = GEMINI_2_5_FLASH;
        pub const SUPPORTED_MODELS: &[&str] =
            &[GEMINI_2_5_FLASH, GEMINI_1_5_FLASH, GEMINI_1_5_PRO];

        // Convenience constants for commonly used models
        pub const GEMINI_2_5_FLASH: &str = "gemini-2.5-flash";
        pub const GEMINI_1_5_FLASH: &str = "gemini-1.5-flash";
        pub const GEMINI_1_5_PRO: &str = "gemini-1.5-pro";
    }

    pub const GEMINI_2_5_FLASH: &str = google::GEMINI_2_5_FLASH;
    pub const GEMINI_1_5_FLASH: &str = google::GEMINI_1_5_FLASH;
    pub const GEMINI_1_5_PRO: &str = google::GEMINI_1_5_PRO;
}

/// Model validation and helper functions
pub mod model_helpers {
    use super::models;

    /// Human readable label shown next to a model id
    pub fn display_name(model: &str) -> Option<&'static str> {
        match model {
            models::GEMINI_2_5_FLASH => Some("Gemini 2.5 Flash (Fast)"),
            models::GEMINI_1_5_FLASH => Some("Gemini 1.5 Flash (Fastest)"),
            models::GEMINI_1_5_PRO => Some("Gemini 1.5 Pro (Most Capable)"),
            _ => None,
        }
    }

    /// Validate if a model is one of the curated Gemini models
    pub fn is_supported(model: &str) -> bool {
        models::google::SUPPORTED_MODELS.contains(&model)
    }
}

/// Default configuration values
pub mod defaults {
    use super::models;

    pub const DEFAULT_MODEL: &str = models::google::DEFAULT_MODEL;
    pub const DEFAULT_PROVIDER: &str = "gemini";
    pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
    pub const FALLBACK_API_KEY_ENV: &str = "GOOGLE_API_KEY";
    pub const DEFAULT_CONFIG_FILE: &str = "promptcraft.toml";
    pub const DEFAULT_CONFIG_DIR: &str = ".promptcraft";

    pub const DEFAULT_TEMPERATURE: f32 = 1.0;
    pub const MIN_TEMPERATURE: f32 = 0.0;
    pub const MAX_TEMPERATURE: f32 = 2.0;

    pub const DEFAULT_MIN_INTERVAL_MS: u64 = 1_000;
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
    pub const DEFAULT_MAX_INPUT_LENGTH: usize = 10_000;

    pub const DEFAULT_ROLE_PERSONA: &str = "A Senior AI Prompt Engineering Expert specialized in business-to-business (B2B) content marketing.";
    pub const DEFAULT_TONE_STYLE: &str =
        "Formal, Actionable, and structured using markdown headings.";
    pub const DEFAULT_FORMAT_DETAILS: &str = "Respond in clear markdown with headings";
    pub const DEFAULT_ITERATE_INSTRUCTIONS: &str = "Review and improve clarity and structure";

    pub const HISTORY_EXPORT_FILE: &str = "prompt_history.json";
    pub const OUTPUT_DOWNLOAD_FILE: &str = "enhanced_prompt.md";
}

/// Session limits
pub mod session {
    /// Most recent generations kept in the history log
    pub const HISTORY_CAPACITY: usize = 5;
    /// Temperatures used by the "3 variations" mode, in call order
    pub const VARIATION_TEMPERATURES: [f32; 3] = [0.7, 1.0, 1.5];
}

/// Credential values shipped in templates that must never reach the API
pub mod credentials {
    pub const PLACEHOLDER_KEYS: &[&str] = &["YOUR_API_KEY_HERE", "your_actual_api_key_here"];
}

/// Fixed text used when assembling the composed document
pub mod document {
    pub const PREAMBLE: &str =
        "Create an enhanced, professional prompt based on the following specifications:";
    pub const REASONING_INSTRUCTION: &str = "Show your step-by-step thought process and reasoning before providing the final answer.";
    pub const CLOSING_RULE: &str = "---";
    pub const CLOSING_INSTRUCTION: &str =
        "Based on the above specifications, create a clear, structured, and professional prompt.";

    /// Context text meaning "the user supplied nothing"
    pub const NO_CONTEXT_SENTINEL: &str = "No external context file was provided.";
    /// Context text substituted when the supplied context cannot be decoded
    pub const CONTEXT_READ_ERROR_MARKER: &str = "Error reading context file.";

    pub const ROLE_LABEL: &str = "**ROLE/EXPERTISE:**";
    pub const CONTEXT_LABEL: &str = "**CONTEXT:**";
    pub const FORMAT_LABEL: &str = "**OUTPUT FORMAT:**";
    pub const TONE_LABEL: &str = "**TONE/STYLE:**";
    pub const REASONING_LABEL: &str = "**REASONING:**";
    pub const REFINEMENT_LABEL: &str = "**REFINEMENT INSTRUCTIONS:**";
    pub const EXCLUDE_LABEL: &str = "**EXCLUDE:**";
    pub const TASK_LABEL: &str = "**TASK:**";
}

/// URL constants for API endpoints
pub mod urls {
    pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
}

/// HTTP header names used by provider adapters
pub mod headers {
    pub const GOOG_API_KEY: &str = "x-goog-api-key";
}
