//! Token lemmatization
//!
//! Reduces inflected (mostly plural) word forms to a dictionary base form using an
//! irregular-form table and suffix detachment rules. Rules are applied until the
//! word stops changing, so every output is a fixed point and lemmatizing twice is
//! the same as lemmatizing once.

use crate::utils::is_alphabetic_word;

/// Maps a corpus token to the form used for n-gram counting.
pub trait TokenNormalizer {
    /// Normalize one token.
    fn normalize(&self, token: &str) -> String;
}

/// Leaves tokens untouched (lemmatization disabled).
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityNormalizer;

impl TokenNormalizer for IdentityNormalizer {
    #[inline]
    fn normalize(&self, token: &str) -> String {
        token.to_string()
    }
}

/// Rule-based noun lemmatizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lemmatizer;

impl TokenNormalizer for Lemmatizer {
    fn normalize(&self, token: &str) -> String {
        lemmatize(token)
    }
}

/// Lemmatize a single token. Non-alphabetic tokens are returned unchanged.
pub fn lemmatize(token: &str) -> String {
    if !is_alphabetic_word(token) {
        return token.to_string();
    }
    let mut current = token.to_string();
    loop {
        match reduce_once(&current) {
            Some(next) if next != current => current = next,
            _ => return current,
        }
    }
}

/// Irregular forms checked before any suffix rule. Every value is a fixed point.
const IRREGULAR_FORMS: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("geese", "goose"),
    ("mice", "mouse"),
    ("oxen", "ox"),
    ("data", "datum"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("indices", "index"),
    ("appendices", "appendix"),
    ("matrices", "matrix"),
    ("theses", "thesis"),
    ("analyses", "analysis"),
    ("crises", "crisis"),
    ("hypotheses", "hypothesis"),
    ("wives", "wife"),
    ("lives", "life"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("shelves", "shelf"),
    ("halves", "half"),
    ("selves", "self"),
    ("thieves", "thief"),
    ("wolves", "wolf"),
    ("calves", "calf"),
    ("loaves", "loaf"),
    ("series", "series"),
    ("species", "species"),
    ("news", "news"),
    ("movies", "movie"),
    ("cookies", "cookie"),
    ("cases", "case"),
    ("bases", "base"),
    ("houses", "house"),
    ("causes", "cause"),
    ("purposes", "purpose"),
    ("courses", "course"),
    ("responses", "response"),
    ("uses", "use"),
    ("buses", "bus"),
];

fn irregular(word: &str) -> Option<&'static str> {
    IRREGULAR_FORMS
        .iter()
        .find(|(form, _)| *form == word)
        .map(|(_, lemma)| *lemma)
}

/// Apply the first matching rule, or `None` when the word is already a base form.
///
/// Rewritten words come back lowercased.
fn reduce_once(word: &str) -> Option<String> {
    let lower = word.to_lowercase();
    if let Some(lemma) = irregular(&lower) {
        return Some(lemma.to_string());
    }
    let len = lower.len();
    let strip = |suffix: &str, replacement: &str| -> String {
        format!("{}{}", &lower[..len - suffix.len()], replacement)
    };

    if lower.ends_with("sses") {
        return Some(strip("sses", "ss"));
    }
    if lower.ends_with("zzes") {
        return Some(strip("zzes", "zz"));
    }
    if lower.ends_with("xes") && len > 4 {
        return Some(strip("xes", "x"));
    }
    if (lower.ends_with("ches") || lower.ends_with("shes")) && len > 5 {
        return Some(strip("es", ""));
    }
    if lower.ends_with("ies") && len > 4 {
        return Some(strip("ies", "y"));
    }
    if is_compound_men(&lower) {
        return Some(strip("men", "man"));
    }
    if lower.ends_with('s') && len > 3 && !keeps_final_s(&lower) {
        return Some(strip("s", ""));
    }
    None
}

/// `chairmen`, `statesmen`, `foremen`, `gentlemen` and similar compounds.
fn is_compound_men(word: &str) -> bool {
    if word.len() < 6 || !word.ends_with("men") || word.ends_with("imen") || word.ends_with("omen")
    {
        return false;
    }
    matches!(
        word.as_bytes()[word.len() - 4],
        b's' | b'r' | b'e' | b'l' | b'h'
    )
}

fn keeps_final_s(word: &str) -> bool {
    ["ss", "us", "is", "ics"]
        .iter()
        .any(|suffix| word.ends_with(suffix))
}
