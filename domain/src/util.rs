//! Shared utility functions.

/// Shorten `s` to at most `max_chars` characters for log lines and
/// status output, marking the cut with an ellipsis.
pub fn preview(s: &str, max_chars: usize) -> String {
    let mut chars = s.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

/// Collapse runs of whitespace (including newlines) into single spaces.
pub fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_short_string_is_unchanged() {
        assert_eq!(preview("hi", 10), "hi");
        assert_eq!(preview("exact", 5), "exact");
    }

    #[test]
    fn preview_counts_characters_not_bytes() {
        assert_eq!(preview("あのね", 2), "あの...");
    }

    #[test]
    fn single_line_collapses_newlines() {
        assert_eq!(single_line("User Score: 7\n\nFeedback:  ok"), "User Score: 7 Feedback: ok");
    }
}
