use crate::stemmer::StemmerKind;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Knobs for the page tokenizer. Every field has a default, so an empty JSON
/// object is a valid config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    pub stemmer: StemmerKind,
    /// Compare tokens against the stop-word list exactly as written, so the
    /// mixed-case entry "I" never matches a lowercased token.
    pub literal_stop_words: bool,
    /// Keep tokens that became empty after punctuation stripping.
    pub keep_empty: bool,
    pub extra_stop_words: Vec<String>,
    /// NFKC-normalize page text before segmentation.
    pub unicode_normalize: bool,
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<TokenizerConfig> {
    let path = path.as_ref();
    let buf = fs::read_to_string(path)
        .with_context(|| format!("reading tokenizer config {}", path.display()))?;
    let cfg: TokenizerConfig = serde_json::from_str(&buf)
        .with_context(|| format!("parsing tokenizer config {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        let cfg: TokenizerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, TokenizerConfig::default());
        assert_eq!(cfg.stemmer, StemmerKind::Porter);
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokenizer.json");
        fs::write(&path, r#"{"stemmer": "english", "extra_stop_words": ["page"]}"#).unwrap();
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.stemmer, StemmerKind::English);
        assert_eq!(cfg.extra_stop_words, vec!["page".to_string()]);
        assert!(!cfg.keep_empty);
    }

    #[test]
    fn missing_file_names_path() {
        let err = load_config("/nonexistent/tokenizer.json").unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/tokenizer.json"));
    }
}
