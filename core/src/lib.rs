//! Page-level inverted indexing: normalize each page's text into stemmed terms
//! and map every term to the pages it appears on.

pub mod config;
pub mod index;
pub mod persist;
pub mod stemmer;
pub mod tokenizer;

/// Zero-based position of a page within its document.
pub type PageNo = usize;

pub use config::{load_config, TokenizerConfig};
pub use index::{index_by_page, index_by_page_parallel, IndexBuilder, PageIndex};
pub use stemmer::{porter_stem, StemmerKind};
pub use tokenizer::{tokenize, Tokenizer};
