use console::style;
use promptcraft_core::History;

/// Longest input preview shown in the history listing
const PREVIEW_CHARS: usize = 60;

pub fn preview(text: &str) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() > PREVIEW_CHARS {
        let cut: String = single_line.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}...")
    } else {
        single_line
    }
}

pub fn print_history(history: &History) {
    if history.is_empty() {
        println!("{}", style("No history yet.").dim());
        return;
    }

    println!(
        "{}",
        style(format!("Recent prompts ({})", history.len())).blue().bold()
    );
    for (index, entry) in history.iter().enumerate() {
        println!(
            "{} {} {}",
            style(format!("#{}", index + 1)).bold(),
            preview(&entry.input),
            style(format!(
                "[{} | temp {} | {}]",
                entry.model,
                entry.temperature,
                entry.techniques.join(", ")
            ))
            .dim()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_collapses_whitespace_and_truncates() {
        assert_eq!(preview("a\n  b"), "a b");
        let long = "x".repeat(80);
        let shown = preview(&long);
        assert_eq!(shown.chars().count(), PREVIEW_CHARS + 3);
        assert!(shown.ends_with("..."));
    }
}
