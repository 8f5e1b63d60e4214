/// Truncates `text` to at most `max_chars` characters for embedding in error
/// messages, appending an ellipsis marker when anything was dropped.
pub fn truncate_for_error(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated = text.chars().take(max_chars).collect::<String>();
    truncated.push_str("...");
    truncated
}
