//! Input validation for user-supplied command arguments.

/// Longest accepted search term; anything longer is cut, not rejected.
pub const MAX_SEARCH_TERM_LEN: usize = 64;

/// Normalize a raw search term: trim whitespace, drop control characters,
/// cap the length. Returns `None` when nothing usable remains.
pub fn normalize_search_term(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !c.is_control())
        .take(MAX_SEARCH_TERM_LEN)
        .collect();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Clamp a user-requested result count into `1..=cap`, falling back to
/// `default` when absent.
pub fn clamp_limit(requested: Option<usize>, default: usize, cap: usize) -> usize {
    requested.unwrap_or(default).clamp(1, cap)
}
