//! Normalized containment matching between claim text and reference text.

/// Below this normalized length, matching falls back to exact equality so that
/// short tokens do not match everything.
const MIN_CONTAINMENT_LEN: usize = 5;

/// Lower-case and drop everything except ASCII letters and digits.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// True if either normalized string contains the other. Symmetric.
pub fn fuzzy_match(a: &str, b: &str) -> bool {
    let a = normalize(a);
    let b = normalize(b);
    if a.len() < MIN_CONTAINMENT_LEN || b.len() < MIN_CONTAINMENT_LEN {
        return a == b;
    }
    a.contains(&b) || b.contains(&a)
}

/// True if any reference string fuzzy-matches the needle.
pub fn fuzzy_contains<S: AsRef<str>>(haystack: &[S], needle: &str) -> bool {
    haystack.iter().any(|item| fuzzy_match(item.as_ref(), needle))
}
