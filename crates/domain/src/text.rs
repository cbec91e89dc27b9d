//! Small helpers shared by the entity validators.

/// Trims `value` and returns it, or `None` when nothing is left.
pub(crate) fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Length in characters, not bytes. Korean names are multi-byte in UTF-8.
pub(crate) fn char_len(value: &str) -> usize {
    value.chars().count()
}
