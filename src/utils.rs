//! Text normalization helpers shared by extraction and reporting.

/// Collapse newline/tab runs and space runs into single spaces, trim, and lowercase.
///
/// Other whitespace (carriage returns, form feeds) is kept in the interior and
/// only removed when it sits at either end of the text.
///
/// Lowercasing is the locale-independent Unicode mapping of
/// [`str::to_lowercase`], not full case folding: characters whose fold expands
/// are kept, so "Straße" becomes "straße" rather than "strasse".
pub fn normalize_element_text<T: AsRef<str>>(text: T) -> String {
    let mut normalized = String::new();
    let mut seen_space = false;
    for ch in text.as_ref().trim().chars() {
        if matches!(ch, ' ' | '\n' | '\t') {
            if !seen_space {
                normalized.push(' ');
                seen_space = true;
            }
        } else {
            normalized.push(ch);
            seen_space = false;
        }
    }
    normalized.trim().to_lowercase()
}

/// Number of space-separated words in normalized text (0 for empty text).
pub fn word_count(normalized: &str) -> usize {
    if normalized.is_empty() {
        0
    } else {
        normalized.split(' ').count()
    }
}

/// Length of normalized text in Unicode scalar values.
pub fn char_count(normalized: &str) -> usize {
    normalized.chars().count()
}

/// True if every character is alphabetic (and there is at least one).
pub fn is_alphabetic_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(char::is_alphabetic)
}

/// Append `piece` to `buffer`, inserting a single space between non-empty pieces.
pub(crate) fn push_spaced(buffer: &mut String, piece: &str) {
    if piece.is_empty() {
        return;
    }
    if !buffer.is_empty() {
        buffer.push(' ');
    }
    buffer.push_str(piece);
}
