//! Helpers for the case-insensitive substring filter offered by list endpoints.

/// Turn a user-supplied filter into an `ILIKE` pattern matching it anywhere.
///
/// Returns `None` for a blank filter. `%`, `_` and `\` are escaped so they
/// match literally (Postgres' default `LIKE` escape character is `\`).
pub fn contains_pattern(filter: &str) -> Option<String> {
    let trimmed = filter.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut pattern = String::with_capacity(trimmed.len() + 2);
    pattern.push('%');
    for c in trimmed.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    Some(pattern)
}
