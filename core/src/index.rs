use crate::tokenizer::{default_tokenizer, Tokenizer};
use crate::PageNo;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Inverted index from normalized term to the pages it occurs on.
///
/// Terms iterate in lexicographic order; each page list is ascending.
/// Serializes as a plain `{term: [page, ...]}` map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageIndex {
    pub(crate) postings: BTreeMap<String, Vec<PageNo>>,
}

impl PageIndex {
    pub fn new() -> Self { Self::default() }

    pub fn get(&self, term: &str) -> Option<&[PageNo]> {
        self.postings.get(term).map(Vec::as_slice)
    }

    pub fn contains(&self, term: &str) -> bool { self.postings.contains_key(term) }

    /// Number of distinct terms.
    pub fn len(&self) -> usize { self.postings.len() }

    pub fn is_empty(&self) -> bool { self.postings.is_empty() }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.postings.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PageNo])> {
        self.postings.iter().map(|(t, p)| (t.as_str(), p.as_slice()))
    }

    /// Record that every term in `terms` occurs on `page`.
    fn add_page(&mut self, page: PageNo, terms: HashSet<String>) {
        for term in terms {
            self.postings.entry(term).or_default().push(page);
        }
    }
}

/// Builds a `PageIndex` from pages supplied in document order.
pub struct IndexBuilder<'t> {
    tokenizer: &'t Tokenizer,
    parallel: bool,
}

impl Default for IndexBuilder<'static> {
    fn default() -> Self {
        Self::with_tokenizer(default_tokenizer())
    }
}

impl IndexBuilder<'static> {
    pub fn new() -> Self { Self::default() }
}

impl<'t> IndexBuilder<'t> {
    pub fn with_tokenizer(tokenizer: &'t Tokenizer) -> Self {
        Self { tokenizer, parallel: false }
    }

    /// Tokenize pages on the rayon pool. The fold into the index still runs on
    /// the calling thread in page order, so the result is identical.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn build<S: AsRef<str> + Sync>(&self, pages: &[S]) -> PageIndex {
        let tokenizer = self.tokenizer;
        let page_terms: Vec<HashSet<String>> = if self.parallel {
            pages.par_iter().map(|p| tokenizer.tokenize(p.as_ref())).collect()
        } else {
            pages.iter().map(|p| tokenizer.tokenize(p.as_ref())).collect()
        };

        let mut index = PageIndex::new();
        for (page, terms) in page_terms.into_iter().enumerate() {
            index.add_page(page, terms);
        }
        tracing::debug!(pages = pages.len(), terms = index.len(), parallel = self.parallel, "built page index");
        index
    }
}

/// Build an index over `pages` with the default tokenizer, one page at a time.
pub fn index_by_page<S: AsRef<str> + Sync>(pages: &[S]) -> PageIndex {
    IndexBuilder::new().build(pages)
}

/// Same result as `index_by_page`, with tokenization spread across threads.
pub fn index_by_page_parallel<S: AsRef<str> + Sync>(pages: &[S]) -> PageIndex {
    IndexBuilder::new().parallel(true).build(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TokenizerConfig;

    #[test]
    fn accumulates_pages_per_term() {
        let idx = index_by_page(&["The car runs fast.", "Cars running everywhere."]);
        assert_eq!(idx.get("run"), Some(&[0, 1][..]));
        assert_eq!(idx.get("car"), Some(&[0, 1][..]));
        assert_eq!(idx.get("fast"), Some(&[0][..]));
        assert!(!idx.contains("the"));
    }

    #[test]
    fn empty_document() {
        let pages: [&str; 0] = [];
        let idx = index_by_page(&pages);
        assert!(idx.is_empty());
    }

    #[test]
    fn blank_pages_keep_their_ordinals() {
        let idx = index_by_page(&["", "engine", "", "engine"]);
        assert_eq!(idx.get("engin"), Some(&[1, 3][..]));
    }

    #[test]
    fn serializes_as_plain_term_map() {
        let idx = index_by_page(&["brake", "brake fluid"]);
        let json = serde_json::to_value(&idx).unwrap();
        assert_eq!(json, serde_json::json!({"brake": [0, 1], "fluid": [1]}));
        let back: PageIndex = serde_json::from_value(json).unwrap();
        assert_eq!(back, idx);
    }

    #[test]
    fn one_entry_per_page_per_term() {
        let idx = index_by_page(&["oil oil OIL", "oil"]);
        assert_eq!(idx.get("oil"), Some(&[0, 1][..]));
    }

    #[test]
    fn custom_config_builder() {
        let cfg = TokenizerConfig { extra_stop_words: vec!["car".into()], ..Default::default() };
        let tokenizer = Tokenizer::new(&cfg);
        let idx = IndexBuilder::with_tokenizer(&tokenizer).build(&["car engine"]);
        assert!(!idx.contains("car"));
        assert!(idx.contains("engin"));
    }
}
