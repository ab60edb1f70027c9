use coursematch_core::tokenizer::{clean_text, ngrams, normalize};

#[test]
fn it_normalizes_idempotently() {
    for s in ["Intro to Python (2024)!", "  ALL\tCAPS\n", "naïve   café", "already clean", "!!!", ""] {
        let once = clean_text(s);
        assert_eq!(clean_text(&once), once, "input {s:?}");
        assert!(once.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' '));
        assert!(!once.contains("  ") && once.trim() == once);
    }
}

#[test]
fn it_treats_missing_and_symbol_only_text_as_empty() {
    assert_eq!(normalize(None), "");
    assert_eq!(clean_text("!!!???"), "");
    assert!(ngrams(&clean_text("---")).is_empty());
}

#[test]
fn it_emits_bigrams_after_unigrams() {
    let terms = ngrams(&clean_text("Data-Science 101"));
    assert_eq!(terms, vec!["data", "science", "101", "data science", "science 101"]);
}
