//! Shared utility functions.

/// Single-line preview of `s` for log output.
///
/// Collapses runs of whitespace and cuts after `max_chars` characters,
/// appending `...` when something was cut.
pub fn preview(s: &str, max_chars: usize) -> String {
    let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let cut: String = collapsed.chars().take(max_chars).collect();
    format!("{}...", cut)
}
