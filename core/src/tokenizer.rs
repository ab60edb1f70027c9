use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_ALNUM: Regex = Regex::new(r"[^a-z0-9 ]+").expect("valid regex");
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("valid regex");
}

/// Normalize text into the form both the corpus and queries are matched in:
/// lowercase, anything outside `[a-z0-9 ]` replaced by a space, whitespace
/// collapsed and trimmed.
pub fn clean_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let replaced = NON_ALNUM.replace_all(&lowered, " ");
    WHITESPACE.replace_all(&replaced, " ").trim().to_string()
}

/// Like [`clean_text`], but an absent value normalizes to the empty string.
pub fn normalize(text: Option<&str>) -> String {
    text.map(clean_text).unwrap_or_default()
}

/// Split cleaned text into unigrams followed by space-joined bigrams.
pub fn ngrams(cleaned: &str) -> Vec<String> {
    let words: Vec<&str> = cleaned.split_whitespace().collect();
    let mut terms: Vec<String> = words.iter().map(|w| w.to_string()).collect();
    terms.extend(words.windows(2).map(|pair| format!("{} {}", pair[0], pair[1])));
    terms
}
