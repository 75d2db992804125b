//! Text normalization.
//!
//! The classifier only sees what a [`Normalizer`] returns. [`LexiconNormalizer`] is the
//! default implementation, driven by a [`NormalizerConfig`]: lowercasing, Unicode word
//! segmentation (UAX #29, punctuation dropped), slang expansion, domain keyword canonicalisation, stopword removal and an
//! optional [`Stemmer`].

pub mod profile;

use std::collections::HashSet;
use std::fmt::Debug;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// raw text -> normalized token sequence
pub trait Normalizer: Send + Sync + Debug {
    fn normalize(&self, text: &str) -> Vec<String>;
}

pub trait Stemmer: Send + Sync + Debug {
    fn stem(&self, token: &str) -> String;
}

/// Leaves tokens untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityStemmer;

impl Stemmer for IdentityStemmer {
    #[inline]
    fn stem(&self, token: &str) -> String {
        token.to_string()
    }
}

/// Strips the first matching suffix when enough of the word remains.
#[derive(Debug, Clone, Default)]
pub struct SuffixStemmer {
    /// longest first
    suffixes: Vec<String>,
    min_stem_len: usize,
}

impl SuffixStemmer {
    pub fn new<S: AsRef<str>>(suffixes: &[S], min_stem_len: usize) -> Self {
        let mut suffixes: Vec<String> = suffixes.iter().map(|s| s.as_ref().to_string()).collect();
        suffixes.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        Self { suffixes, min_stem_len }
    }
}

impl Stemmer for SuffixStemmer {
    fn stem(&self, token: &str) -> String {
        for suffix in &self.suffixes {
            if let Some(stem) = token.strip_suffix(suffix.as_str()) {
                if stem.chars().count() >= self.min_stem_len {
                    return stem.to_string();
                }
            }
        }
        token.to_string()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NormalizerConfig {
    /// informal word -> replacement (may expand to several words)
    pub slang: IndexMap<String, String>,
    /// word -> canonical domain term
    pub domain_terms: IndexMap<String, String>,
    pub stopwords: Vec<String>,
    /// never removed as stopwords and never stemmed
    pub preserve: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct LexiconNormalizer {
    slang: IndexMap<String, Vec<String>>,
    domain_terms: IndexMap<String, String>,
    stopwords: HashSet<String>,
    preserve: HashSet<String>,
    stemmer: Arc<dyn Stemmer>,
}

impl LexiconNormalizer {
    pub fn new(config: &NormalizerConfig) -> Self {
        let slang = config
            .slang
            .iter()
            .map(|(k, v)| (k.to_lowercase(), v.split_whitespace().map(str::to_lowercase).collect()))
            .collect();
        let domain_terms = config
            .domain_terms
            .iter()
            .map(|(k, v)| (k.to_lowercase(), v.to_lowercase()))
            .collect();
        let mut preserve: HashSet<String> = config.preserve.iter().map(|s| s.to_lowercase()).collect();
        preserve.extend(config.domain_terms.values().map(|s| s.to_lowercase()));
        Self {
            slang,
            domain_terms,
            stopwords: config.stopwords.iter().map(|s| s.to_lowercase()).collect(),
            preserve,
            stemmer: Arc::new(IdentityStemmer),
        }
    }

    pub fn with_stemmer(mut self, stemmer: Arc<dyn Stemmer>) -> Self {
        self.stemmer = stemmer;
        self
    }

    fn push_token(&self, token: String, out: &mut Vec<String>) {
        if self.preserve.contains(&token) {
            out.push(token);
            return;
        }
        if self.stopwords.contains(&token) {
            return;
        }
        let stemmed = self.stemmer.stem(&token);
        if !stemmed.is_empty() {
            out.push(stemmed);
        }
    }
}

impl Default for LexiconNormalizer {
    fn default() -> Self {
        Self::new(&NormalizerConfig::default())
    }
}

impl Normalizer for LexiconNormalizer {
    fn normalize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let mut out = Vec::new();
        for word in lowered.unicode_words() {
            if let Some(expansion) = self.slang.get(word) {
                for part in expansion {
                    let part = self.domain_terms.get(part).cloned().unwrap_or_else(|| part.clone());
                    self.push_token(part, &mut out);
                }
            } else if let Some(canonical) = self.domain_terms.get(word) {
                out.push(canonical.clone());
            } else {
                self.push_token(word.to_string(), &mut out);
            }
        }
        out
    }
}
