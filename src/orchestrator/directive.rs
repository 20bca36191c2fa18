//! `@image: <prompt>` lines embedded in a reply.

const MARKER: &str = "@image:";

/// The prompt of a directive line, possibly empty. `None` for ordinary lines.
fn directive(line: &str) -> Option<&str> {
    line.trim_start()
        .strip_prefix(MARKER)
        .map(|prompt| prompt.trim())
}

/// Prompts in line order. A bare `@image:` line names nothing and is skipped.
pub fn extract_prompts(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(directive)
        .filter(|prompt| !prompt.is_empty())
        .map(str::to_string)
        .collect()
}

/// Drops every directive line and trims what is left.
pub fn strip_directives(text: &str) -> String {
    text.lines()
        .filter(|line| directive(line).is_none())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
