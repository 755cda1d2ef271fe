/// Leading characters that are irrelevant for sorting.
const SORT_STRIP_CHARS: &str = " `~!@#$%^&*()_+-={}|[]\\\";'<>?,./";

/// Strip special chars off the beginning of a field for sorting.
///
/// If stripping the chars leaves nothing, the lowercased field is returned
/// with only leading whitespace removed, so all-punctuation values still
/// sort among themselves.
pub fn lstrip_special(field: &str) -> String {
    let lowered = field.to_lowercase();
    let stripped = lowered.trim_start_matches(|c: char| SORT_STRIP_CHARS.contains(c));
    if stripped.is_empty() {
        lowered.trim_start().to_string()
    } else {
        stripped.to_string()
    }
}

/// A derived, comparable representation of a tag field.
///
/// Numeric columns (track number) compare as integers, everything else as
/// normalized text, so callers get stable human-friendly orderings without
/// lexicographic surprises like "10" < "2".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Number(i64),
    Text(String),
}
