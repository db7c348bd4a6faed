/// Cleaned user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitized {
    pub text: String,
    /// Whether characters beyond `max_length` were dropped
    pub truncated: bool,
}

/// Strip null characters, cut to `max_length` characters, then trim.
pub fn sanitize(text: &str, max_length: usize) -> Sanitized {
    let without_nulls: String = text.chars().filter(|c| *c != '\0').collect();

    let truncated = without_nulls.chars().count() > max_length;
    let kept: String = if truncated {
        without_nulls.chars().take(max_length).collect()
    } else {
        without_nulls
    };

    Sanitized {
        text: kept.trim().to_string(),
        truncated,
    }
}
