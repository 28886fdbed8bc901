use sitekeys_core::tokenizer::{tokenize, Tokenizer, TokenizerConfig};

#[test]
fn it_normalizes_and_lowercases() {
    let words = tokenize("Running Runners RUN! The ｃａｆé menu.");
    assert!(words.contains(&"run".to_string()));
    assert!(words.contains(&"running".to_string()));
    // NFKC folds full-width letters
    assert!(words.contains(&"café".to_string()));
    assert!(words.iter().all(|w| w.chars().all(|c| !c.is_uppercase())));
}

#[test]
fn it_filters_stopwords_when_asked() {
    let text = "The quick brown fox and the lazy dog";
    assert!(tokenize(text).contains(&"the".to_string()));

    let tok = Tokenizer::new(TokenizerConfig { remove_stopwords: true, ..Default::default() });
    let words = tok.tokenize(text);
    assert!(!words.contains(&"the".to_string()));
    assert!(!words.contains(&"and".to_string()));
    assert_eq!(words, vec!["quick", "brown", "fox", "lazy", "dog"]);
}

#[test]
fn it_splits_on_punctuation() {
    assert_eq!(tokenize("don't stop-me now_please"), vec!["don", "t", "stop", "me", "now", "please"]);
    assert!(tokenize("  ...  !!! ").is_empty());
}
