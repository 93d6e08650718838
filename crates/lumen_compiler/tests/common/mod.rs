//! Shared helpers for compiler integration tests.

use lumen_core::TextSpan;

/// Source text with expected spans marked by `[` and `]`.
///
/// The brackets are removed from `text`; `spans` lists the marked ranges in
/// the order their closing brackets appear.
pub struct AnnotatedText {
    pub text: String,
    pub spans: Vec<TextSpan>,
}

impl AnnotatedText {
    pub fn parse(text: &str) -> Self {
        let text = unindent(text);
        let mut output = String::with_capacity(text.len());
        let mut spans = Vec::new();
        let mut starts = Vec::new();

        for c in text.chars() {
            match c {
                '[' => starts.push(output.len() as u32),
                ']' => {
                    let start = starts.pop().expect("too many ']' in text");
                    spans.push(TextSpan::from_bounds(start, output.len() as u32));
                }
                _ => output.push(c),
            }
        }

        assert!(starts.is_empty(), "too few ']' in text");
        Self { text: output, spans }
    }
}

/// Strip the common leading indentation and surrounding blank lines.
pub fn unindent(text: &str) -> String {
    let mut lines: Vec<&str> = text
        .lines()
        .map(|line| if line.trim().is_empty() { "" } else { line })
        .collect();

    let indent = lines
        .iter()
        .filter(|line| !line.is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    for line in &mut lines {
        if !line.is_empty() {
            *line = &line[indent..];
        }
    }

    while lines.first().is_some_and(|line| line.is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}
