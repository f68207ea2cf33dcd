use crate::config::TokenizerConfig;
use crate::stemmer::Stemmer;
use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

/// Words dropped before stemming. "I" is listed in its written form; whether it
/// matches the lowercased pronoun depends on `TokenizerConfig::literal_stop_words`.
pub const STOP_WORDS: &[&str] = &[
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "I", "it", "for", "not", "on",
    "with", "he", "as", "you", "do", "at", "this", "but", "his", "by", "from", "wikipedia",
];

/// Treebank-style splits for words that are not marked by an apostrophe.
const FIXED_SPLITS: &[(&str, usize)] = &[
    ("cannot", 3),
    ("gimme", 3),
    ("gonna", 3),
    ("gotta", 3),
    ("lemme", 3),
    ("wanna", 3),
];

lazy_static! {
    static ref PUNCT: Regex = Regex::new(r"[[:punct:]]").expect("valid regex");
    static ref CLITIC: Regex =
        Regex::new(r"(?i)^(.+?)(n['’]t|['’]s|['’]m|['’]d|['’]ll|['’]re|['’]ve)$").expect("valid regex");
    static ref DEFAULT_TOKENIZER: Tokenizer = Tokenizer::default();
}

/// Normalizes page text into index terms.
///
/// Construction compiles the stop-word set and stemmer once; the tokenizer is
/// immutable afterwards and can be shared across threads.
pub struct Tokenizer {
    stop_words: HashSet<String>,
    stemmer: Stemmer,
    keep_empty: bool,
    unicode_normalize: bool,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(&TokenizerConfig::default())
    }
}

impl Tokenizer {
    pub fn new(cfg: &TokenizerConfig) -> Self {
        let fold = |w: &str| if cfg.literal_stop_words { w.to_string() } else { w.to_lowercase() };
        let stop_words = STOP_WORDS
            .iter()
            .copied()
            .chain(cfg.extra_stop_words.iter().map(String::as_str))
            .map(fold)
            .collect();
        Self {
            stop_words,
            stemmer: Stemmer::new(cfg.stemmer),
            keep_empty: cfg.keep_empty,
            unicode_normalize: cfg.unicode_normalize,
        }
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    /// Segment, lowercase, strip ASCII punctuation, drop stop words, stem, dedupe.
    pub fn tokenize(&self, text: &str) -> HashSet<String> {
        let text: Cow<str> = if self.unicode_normalize {
            Cow::Owned(text.nfkc().collect())
        } else {
            Cow::Borrowed(text)
        };
        let text = fold_apostrophes(text);
        segment(&text)
            .into_iter()
            .map(|w| w.to_lowercase())
            .map(|w| PUNCT.replace_all(&w, "").into_owned())
            .filter(|w| self.keep_empty || !w.is_empty())
            .filter(|w| !self.is_stopword(w))
            .map(|w| self.stemmer.stem(&w))
            .collect()
    }
}

/// The process-wide tokenizer built from the default config.
pub fn default_tokenizer() -> &'static Tokenizer {
    &DEFAULT_TOKENIZER
}

/// Tokenize one page with the default tokenizer.
pub fn tokenize(text: &str) -> HashSet<String> {
    DEFAULT_TOKENIZER.tokenize(text)
}

/// Typographic apostrophes become ASCII so the punctuation strip removes them.
fn fold_apostrophes(text: Cow<str>) -> Cow<str> {
    if text.contains('\u{2019}') {
        Cow::Owned(text.replace('\u{2019}', "'"))
    } else {
        text
    }
}

fn is_wordlike(seg: &str) -> bool {
    seg.chars().any(char::is_alphanumeric)
}

/// Split text into raw words on UAX#29 word boundaries, then detach English
/// clitics ("don't" -> "do" "n't", "cannot" -> "can" "not").
/// Hyphenated words ("anti-lock") stay one segment. Whitespace segments are
/// dropped; punctuation segments are kept.
pub fn segment(text: &str) -> Vec<&str> {
    let bounds: Vec<(usize, &str)> = text.split_word_bound_indices().collect();
    let mut out = Vec::new();
    let mut i = 0;
    while i < bounds.len() {
        let (start, seg) = bounds[i];
        i += 1;
        if seg.chars().all(char::is_whitespace) {
            continue;
        }
        let mut end = start + seg.len();
        if is_wordlike(seg) {
            while i + 1 < bounds.len() && bounds[i].1 == "-" && is_wordlike(bounds[i + 1].1) {
                let (next_start, next) = bounds[i + 1];
                end = next_start + next.len();
                i += 2;
            }
        }
        split_clitics(&text[start..end], &mut out);
    }
    out
}

fn split_clitics<'a>(seg: &'a str, out: &mut Vec<&'a str>) {
    if let Some(caps) = CLITIC.captures(seg) {
        if let (Some(head), Some(tail)) = (caps.get(1), caps.get(2)) {
            out.push(head.as_str());
            out.push(tail.as_str());
            return;
        }
    }
    match FIXED_SPLITS.iter().find(|(word, _)| seg.eq_ignore_ascii_case(word)) {
        Some(&(_, at)) => {
            out.push(&seg[..at]);
            out.push(&seg[at..]);
        }
        None => out.push(seg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_tokenize() {
        let t = tokenize("Running, runner's run!");
        assert!(t.contains("run"));
        assert!(t.contains("runner"));
    }

    #[test]
    fn segment_detaches_punctuation_and_clitics() {
        assert_eq!(segment("The car runs fast."), vec!["The", "car", "runs", "fast", "."]);
        assert_eq!(segment("don't stop"), vec!["do", "n't", "stop"]);
        assert_eq!(segment("Runner's high"), vec!["Runner", "'s", "high"]);
        assert_eq!(segment("we'll see"), vec!["we", "'ll", "see"]);
        assert_eq!(segment("Cannot"), vec!["Can", "not"]);
    }

    #[test]
    fn segment_keeps_hyphenated_words_whole() {
        assert_eq!(segment("Anti-lock brakes"), vec!["Anti-lock", "brakes"]);
        assert_eq!(segment("a four-wheel-drive car"), vec!["a", "four-wheel-drive", "car"]);
        assert_eq!(segment("brakes - see below"), vec!["brakes", "-", "see", "below"]);
        assert_eq!(segment("oil--filter"), vec!["oil", "-", "-", "filter"]);
    }

    #[test]
    fn hyphenated_words_index_as_one_term() {
        let t = tokenize("Anti-lock brakes and four-wheel drive; e-mail us.");
        assert!(t.contains("antilock"));
        assert!(t.contains("fourwheel"));
        assert!(t.contains("email"));
        for part in ["anti", "lock", "four", "wheel", "e", "mail"] {
            assert!(!t.contains(part), "{part} should not be a term");
        }
    }

    #[test]
    fn curly_apostrophes_split_like_ascii() {
        assert_eq!(segment("Don\u{2019}t"), vec!["Do", "n\u{2019}t"]);
        let t = tokenize("Don\u{2019}t check the driver\u{2019}s seat");
        assert!(!t.contains("don\u{2019}t"));
        assert!(!t.contains("dont"));
        assert!(t.contains("nt"));
        assert!(t.contains("check"));
        assert!(t.contains("driver"));
        assert!(t.iter().all(|w| !w.contains('\u{2019}')));
    }

    #[test]
    fn segment_keeps_numerals_whole() {
        assert_eq!(segment("pi is 3.14, roughly"), vec!["pi", "is", "3.14", ",", "roughly"]);
    }

    #[test]
    fn pronoun_i_filtered_by_default() {
        assert!(!tokenize("I drive").contains("i"));
    }

    #[test]
    fn literal_stop_words_keep_lowercase_i() {
        let cfg = TokenizerConfig { literal_stop_words: true, ..Default::default() };
        let t = Tokenizer::new(&cfg).tokenize("I drive");
        assert!(t.contains("i"));
        assert!(t.contains("drive"));
    }

    #[test]
    fn punctuation_only_segments_dropped_unless_kept() {
        assert!(tokenize("... !!! ---").is_empty());
        let cfg = TokenizerConfig { keep_empty: true, ..Default::default() };
        let t = Tokenizer::new(&cfg).tokenize("hello, world");
        assert!(t.contains(""));
    }

    #[test]
    fn extra_stop_words_are_folded() {
        let cfg = TokenizerConfig { extra_stop_words: vec!["Engine".into()], ..Default::default() };
        let t = Tokenizer::new(&cfg).tokenize("engine oil");
        assert!(!t.contains("engin"));
        assert!(t.contains("oil"));
    }

    #[test]
    fn unicode_normalize_folds_ligatures() {
        let plain = tokenize("\u{FB01}lter");
        assert!(!plain.contains("filter"));
        let cfg = TokenizerConfig { unicode_normalize: true, ..Default::default() };
        let t = Tokenizer::new(&cfg).tokenize("\u{FB01}lter");
        assert!(t.contains("filter"));
    }
}
