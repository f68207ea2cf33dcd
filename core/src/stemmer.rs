//! Suffix-stripping stemmers.
//!
//! The default is the classical Porter algorithm (M.F. Porter, 1980, as in the
//! reference ANSI C release). Snowball English from `rust-stemmers` is
//! available as an alternative; it agrees with Porter on most inflections but
//! not all, so indexes built with different stemmers are not interchangeable.

use rust_stemmers::{Algorithm, Stemmer as SnowballStemmer};
use serde::{Deserialize, Serialize};

/// Which stemming algorithm a tokenizer applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StemmerKind {
    #[default]
    Porter,
    English,
    None,
}

pub enum Stemmer {
    Porter,
    Snowball(SnowballStemmer),
    Identity,
}

impl Stemmer {
    pub fn new(kind: StemmerKind) -> Self {
        match kind {
            StemmerKind::Porter => Stemmer::Porter,
            StemmerKind::English => Stemmer::Snowball(SnowballStemmer::create(Algorithm::English)),
            StemmerKind::None => Stemmer::Identity,
        }
    }

    pub fn stem(&self, word: &str) -> String {
        match self {
            Stemmer::Porter => porter_stem(word),
            Stemmer::Snowball(s) => s.stem(word).into_owned(),
            Stemmer::Identity => word.to_string(),
        }
    }
}

/// Stem a lowercase word with the classical Porter rules.
///
/// Words of two characters or fewer are returned unchanged.
pub fn porter_stem(word: &str) -> String {
    let mut w = Word { chars: word.chars().collect() };
    if w.chars.len() <= 2 {
        return word.to_string();
    }
    w.step1ab();
    w.step1c();
    w.step2();
    w.step3();
    w.step4();
    w.step5();
    w.chars.into_iter().collect()
}

const STEP2: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("bli", "ble"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
    ("logi", "log"),
];

const STEP3: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

const STEP4: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ion", "ou",
    "ism", "ate", "iti", "ous", "ive", "ize",
];

struct Word {
    chars: Vec<char>,
}

impl Word {
    fn is_consonant(&self, i: usize) -> bool {
        match self.chars[i] {
            'a' | 'e' | 'i' | 'o' | 'u' => false,
            'y' => i == 0 || !self.is_consonant(i - 1),
            _ => true,
        }
    }

    /// Number of vowel-consonant sequences in the first `len` characters,
    /// i.e. `m` in `[C](VC)^m[V]`.
    fn measure(&self, len: usize) -> usize {
        let mut m = 0;
        let mut prev_vowel = false;
        for i in 0..len {
            let vowel = !self.is_consonant(i);
            if prev_vowel && !vowel {
                m += 1;
            }
            prev_vowel = vowel;
        }
        m
    }

    fn has_vowel(&self, len: usize) -> bool {
        (0..len).any(|i| !self.is_consonant(i))
    }

    fn ends_double_consonant(&self, len: usize) -> bool {
        len >= 2 && self.chars[len - 1] == self.chars[len - 2] && self.is_consonant(len - 1)
    }

    /// consonant-vowel-consonant ending, where the last consonant is not w, x or y.
    fn ends_cvc(&self, len: usize) -> bool {
        len >= 3
            && self.is_consonant(len - 1)
            && !self.is_consonant(len - 2)
            && self.is_consonant(len - 3)
            && !matches!(self.chars[len - 1], 'w' | 'x' | 'y')
    }

    /// Length of the stem preceding `suffix`, if the word ends with it.
    fn stem_len(&self, suffix: &str) -> Option<usize> {
        let n = suffix.chars().count();
        if n > self.chars.len() {
            return None;
        }
        let start = self.chars.len() - n;
        self.chars[start..]
            .iter()
            .copied()
            .eq(suffix.chars())
            .then_some(start)
    }

    fn set_suffix(&mut self, stem_len: usize, replacement: &str) {
        self.chars.truncate(stem_len);
        self.chars.extend(replacement.chars());
    }

    fn ends_with(&self, c: char) -> bool {
        self.chars.last() == Some(&c)
    }

    fn step1ab(&mut self) {
        if self.ends_with('s') {
            if let Some(j) = self.stem_len("sses") {
                self.set_suffix(j, "ss");
            } else if let Some(j) = self.stem_len("ies") {
                self.set_suffix(j, "i");
            } else if self.chars.len() >= 2 && self.chars[self.chars.len() - 2] != 's' {
                self.chars.pop();
            }
        }

        if let Some(j) = self.stem_len("eed") {
            if self.measure(j) > 0 {
                self.chars.pop();
            }
            return;
        }

        let stem = self
            .stem_len("ed")
            .or_else(|| self.stem_len("ing"))
            .filter(|&j| self.has_vowel(j));
        let Some(j) = stem else { return };
        self.chars.truncate(j);

        if let Some(j) = self.stem_len("at") {
            self.set_suffix(j, "ate");
        } else if let Some(j) = self.stem_len("bl") {
            self.set_suffix(j, "ble");
        } else if let Some(j) = self.stem_len("iz") {
            self.set_suffix(j, "ize");
        } else if self.ends_double_consonant(self.chars.len()) {
            if !matches!(self.chars.last(), Some('l' | 's' | 'z')) {
                self.chars.pop();
            }
        } else {
            let len = self.chars.len();
            if self.measure(len) == 1 && self.ends_cvc(len) {
                self.chars.push('e');
            }
        }
    }

    fn step1c(&mut self) {
        if let Some(j) = self.stem_len("y") {
            if self.has_vowel(j) {
                self.chars[j] = 'i';
            }
        }
    }

    /// Replace the first matching suffix from `rules` when the remaining stem
    /// has a measure above zero. Only the first match is considered.
    fn replace_first(&mut self, rules: &[(&str, &str)]) {
        for (suffix, replacement) in rules {
            if let Some(j) = self.stem_len(suffix) {
                if self.measure(j) > 0 {
                    self.set_suffix(j, replacement);
                }
                return;
            }
        }
    }

    fn step2(&mut self) {
        self.replace_first(STEP2);
    }

    fn step3(&mut self) {
        self.replace_first(STEP3);
    }

    fn step4(&mut self) {
        for suffix in STEP4 {
            let Some(j) = self.stem_len(suffix) else { continue };
            if *suffix == "ion" && !(j > 0 && matches!(self.chars[j - 1], 's' | 't')) {
                continue;
            }
            if self.measure(j) > 1 {
                self.chars.truncate(j);
            }
            return;
        }
    }

    fn step5(&mut self) {
        let len = self.chars.len();
        if self.ends_with('e') {
            let m = self.measure(len);
            if m > 1 || (m == 1 && !self.ends_cvc(len - 1)) {
                self.chars.pop();
            }
        }
        let len = self.chars.len();
        if self.ends_with('l') && self.ends_double_consonant(len) && self.measure(len) > 1 {
            self.chars.pop();
        }
    }
}
