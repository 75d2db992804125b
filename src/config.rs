//! Classifier configuration.
//!
//! Every section has defaults, so an empty TOML document is a valid config:
//!
//! ```toml
//! [vectorizer]
//! max_features = 10000
//! ngram_max = 3
//!
//! [search]
//! folds = 5
//! alpha = [0.1, 0.3, 1.0]
//!
//! [policy]
//! unknown_below = 0.45
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classify::policy::{CLOSE_CALL_MARGIN, CONFIDENT_THRESHOLD, SHORTLIST_LEN, UNKNOWN_THRESHOLD};
use crate::error::{ClassifierError, Result};
use crate::model::NbStrategy;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClassifierConfig {
    pub vectorizer: VectorizerConfig,
    pub model: ModelConfig,
    pub augment: AugmentConfig,
    pub search: SearchConfig,
    pub ensemble: EnsembleConfig,
    pub policy: PolicyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VectorizerConfig {
    /// upper bound of the vocabulary size
    pub max_features: usize,
    /// n-grams of order 1..=ngram_max become features
    pub ngram_max: usize,
    /// minimum number of documents a term must occur in
    pub min_df: usize,
    /// maximum fraction of documents a term may occur in
    pub max_df: f64,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            max_features: 10_000,
            ngram_max: 3,
            min_df: 1,
            max_df: 0.95,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
    /// smoothing comes from `search.alpha`; the first value is used when cross validation is skipped
    pub strategy: NbStrategy,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self { strategy: NbStrategy::Multinomial }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AugmentConfig {
    pub enabled: bool,
    /// word placed between the two texts of a synthetic pair
    pub connective: String,
    /// keep at most this many synthetic rows per label (first pairs in (i, j) order)
    pub max_pairs_per_label: Option<usize>,
    pub oversample: bool,
    pub seed: u64,
}

impl Default for AugmentConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            connective: "dan".to_string(),
            max_pairs_per_label: None,
            oversample: true,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    pub folds: usize,
    pub max_features: Vec<usize>,
    pub ngram_max: Vec<usize>,
    pub alpha: Vec<f64>,
    pub seed: u64,
    /// evaluate grid points on the rayon pool
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            folds: 5,
            max_features: vec![5_000, 10_000],
            ngram_max: vec![2, 3],
            alpha: vec![0.1, 0.3, 1.0],
            seed: 42,
            parallel: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnsembleConfig {
    /// original input included
    pub max_variants: usize,
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self { max_variants: 6 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PolicyConfig {
    pub confident_at: f64,
    pub close_margin: f64,
    pub unknown_below: f64,
    pub shortlist_len: usize,
    pub unknown_label: String,
    /// substituted when the confidence profile has no entry for a label
    pub neutral_baseline: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            confident_at: CONFIDENT_THRESHOLD,
            close_margin: CLOSE_CALL_MARGIN,
            unknown_below: UNKNOWN_THRESHOLD,
            shortlist_len: SHORTLIST_LEN,
            unknown_label: "Unknown".to_string(),
            neutral_baseline: 0.5,
        }
    }
}

impl ClassifierConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: ClassifierConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        let v = &self.vectorizer;
        if v.ngram_max == 0 {
            return Err(ClassifierError::invalid_config("vectorizer.ngram_max must be >= 1"));
        }
        if v.max_features == 0 {
            return Err(ClassifierError::invalid_config("vectorizer.max_features must be >= 1"));
        }
        if !(v.max_df > 0.0 && v.max_df <= 1.0) {
            return Err(ClassifierError::invalid_config("vectorizer.max_df must be in (0, 1]"));
        }

        let s = &self.search;
        if s.max_features.is_empty() || s.ngram_max.is_empty() || s.alpha.is_empty() {
            return Err(ClassifierError::invalid_config("search grid axes must not be empty"));
        }
        if s.alpha.iter().any(|a| !(*a > 0.0)) {
            return Err(ClassifierError::invalid_config("search.alpha values must be > 0"));
        }
        if s.ngram_max.contains(&0) || s.max_features.contains(&0) {
            return Err(ClassifierError::invalid_config("search.ngram_max / max_features must be >= 1"));
        }

        if self.ensemble.max_variants == 0 {
            return Err(ClassifierError::invalid_config("ensemble.max_variants must be >= 1"));
        }

        let p = &self.policy;
        for (name, value) in [
            ("confident_at", p.confident_at),
            ("close_margin", p.close_margin),
            ("unknown_below", p.unknown_below),
            ("neutral_baseline", p.neutral_baseline),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ClassifierError::invalid_config(format!("policy.{name} must be in [0, 1]")));
            }
        }
        if p.shortlist_len == 0 {
            return Err(ClassifierError::invalid_config("policy.shortlist_len must be >= 1"));
        }
        Ok(())
    }
}
