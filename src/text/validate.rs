//! Candidate cleaning and validation shared by every recovery strategy.

use super::config::RecoveryConfig;

/// Normalize a candidate string.
///
/// NUL characters and control characters other than `\n`, `\r` and `\t` are
/// dropped, then surrounding whitespace is trimmed.
///
/// # Examples
///
/// ```
/// use aepkit::text::clean_text;
/// assert_eq!(clean_text("\0 Hello\x07 \0"), "Hello");
/// assert_eq!(clean_text("a\tb\n"), "a\tb");
/// ```
pub fn clean_text(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|&c| !c.is_control() || matches!(c, '\n' | '\r' | '\t'))
        .collect();
    kept.trim().to_string()
}

/// Whether a cleaned candidate looks like user text rather than an internal
/// identifier or binary noise.
pub fn is_valid_text(text: &str, config: &RecoveryConfig) -> bool {
    if text.is_empty() {
        return false;
    }
    if config.rejected_prefixes.iter().any(|p| text.starts_with(p.as_str())) {
        return false;
    }
    if config.rejected_substrings.iter().any(|s| text.contains(s.as_str())) {
        return false;
    }

    let (printable, total) = text.chars().fold((0usize, 0usize), |(printable, total), c| {
        (printable + usize::from(matches!(c, ' '..='~')), total + 1)
    });
    printable as f64 / total as f64 >= config.min_printable_ratio
}

/// Clean `raw` and return it if it passes validation.
#[inline]
pub fn accept(raw: &str, config: &RecoveryConfig) -> Option<String> {
    let text = clean_text(raw);
    is_valid_text(&text, config).then_some(text)
}
