use pagedex_core::tokenize;
use std::collections::HashSet;
use std::thread;

#[test]
fn it_normalizes_and_stems() {
    let words = tokenize("Running Runners RUN! The driver's manual.");
    assert!(words.contains("run"));
    assert!(words.contains("runner"));
    assert!(words.contains("driver"));
    assert!(words.contains("manual"));
}

#[test]
fn it_filters_stopwords() {
    let words = tokenize("The quick brown fox and the lazy dog");
    assert!(!words.contains("the"));
    assert!(!words.contains("and"));
    assert!(words.contains("quick"));
}

#[test]
fn stop_words_alone_yield_nothing() {
    assert!(tokenize("the and of").is_empty());
    assert!(tokenize("Wikipedia, from THE").is_empty());
}

#[test]
fn empty_input() {
    assert!(tokenize("").is_empty());
    assert!(tokenize("   \n\t ").is_empty());
}

#[test]
fn contractions_are_split_before_stripping() {
    let words = tokenize("Don't touch");
    // "do" is a stop word; the clitic survives as "nt"
    assert!(!words.contains("do"));
    assert!(!words.contains("dont"));
    assert!(words.contains("nt"));
    assert!(words.contains("touch"));
}

#[test]
fn concurrent_tokenization_is_deterministic() {
    let text = "Check the tire pressure monthly. Tires lose pressure in cold weather.";
    let handles: Vec<_> = (0..4)
        .map(|_| thread::spawn(move || tokenize(text)))
        .collect();
    let results: Vec<HashSet<String>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for r in &results[1..] {
        assert_eq!(r, &results[0]);
    }
}
