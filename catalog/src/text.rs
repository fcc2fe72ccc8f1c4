use unicode_normalization::UnicodeNormalization;

/// Fold text for case-insensitive matching: NFKC normalization, then lowercase.
pub fn fold(text: &str) -> String {
    text.nfkc().collect::<String>().to_lowercase()
}

/// Fold a user-typed search term. Returns `None` when nothing is left after
/// trimming, which callers treat as "no text filter".
pub fn fold_term(term: &str) -> Option<String> {
    let trimmed = term.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(fold(trimmed))
}
