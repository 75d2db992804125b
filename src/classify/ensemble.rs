//! Synonym-substitution ensemble.
//!
//! Short inputs often miss the exact wording the model was trained on. The input is
//! normalized once, then expanded into variants that each swap one token for a synonym;
//! the final distribution is the mean of the variant distributions.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::Pipeline;

/// Ordered word -> synonyms table.
///
/// Both the words and each synonym list keep insertion order, which fixes the order
/// variants are generated in. Synonyms may be phrases; they are split on whitespace when
/// substituted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SynonymTable {
    entries: IndexMap<String, Vec<String>>,
}

impl SynonymTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, word: &str, synonyms: &[&str]) -> Self {
        self.insert(word, synonyms);
        self
    }

    /// Appends to the synonyms already known for `word`.
    pub fn insert(&mut self, word: &str, synonyms: &[&str]) {
        let entry = self.entries.entry(word.to_string()).or_default();
        for s in synonyms {
            if !entry.iter().any(|e| e == s) {
                entry.push(s.to_string());
            }
        }
    }

    pub fn get(&self, word: &str) -> Option<&[String]> {
        self.entries.get(word).map(Vec::as_slice)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The original tokens first, then one single-substitution variant per
/// (position left to right, synonym in table order), at most `max_variants` in total.
pub fn variants(tokens: &[String], table: &SynonymTable, max_variants: usize) -> Vec<Vec<String>> {
    let max_variants = max_variants.max(1);
    let mut out = vec![tokens.to_vec()];
    for (pos, token) in tokens.iter().enumerate() {
        let Some(synonyms) = table.get(token) else {
            continue;
        };
        for synonym in synonyms {
            if out.len() >= max_variants {
                return out;
            }
            let mut variant = Vec::with_capacity(tokens.len() + 1);
            variant.extend_from_slice(&tokens[..pos]);
            variant.extend(synonym.split_whitespace().map(str::to_string));
            variant.extend_from_slice(&tokens[pos + 1..]);
            out.push(variant);
        }
    }
    out
}

/// Element-wise mean of the variant distributions.
pub fn mean_distribution(pipeline: &Pipeline, variants: &[Vec<String>]) -> Result<Vec<f64>> {
    let mut acc = vec![0.0f64; pipeline.classes().len()];
    for variant in variants {
        let proba = pipeline.predict_proba(variant)?;
        for (a, p) in acc.iter_mut().zip(proba) {
            *a += p;
        }
    }
    let total: f64 = acc.iter().sum();
    if total > 0.0 {
        for a in acc.iter_mut() {
            *a /= total;
        }
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VectorizerConfig;
    use crate::model::NbStrategy;

    fn tokens(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    fn table() -> SynonymTable {
        SynonymTable::new()
            .with("demam", &["panas", "meriang"])
            .with("pusing", &["sakit kepala"])
    }

    #[test]
    fn variants_follow_position_then_table_order() {
        let v = variants(&tokens("demam pusing"), &table(), 6);
        assert_eq!(
            v,
            vec![
                tokens("demam pusing"),
                tokens("panas pusing"),
                tokens("meriang pusing"),
                tokens("demam sakit kepala"),
            ]
        );
    }

    #[test]
    fn variants_are_capped() {
        let v = variants(&tokens("demam pusing"), &table(), 2);
        assert_eq!(v, vec![tokens("demam pusing"), tokens("panas pusing")]);
        assert_eq!(variants(&tokens("demam"), &table(), 0).len(), 1);
        assert_eq!(variants(&tokens("batuk"), &table(), 6), vec![tokens("batuk")]);
    }

    #[test]
    fn insert_merges_without_duplicates() {
        let mut t = table();
        t.insert("demam", &["panas", "hangat"]);
        assert_eq!(t.get("demam").unwrap(), &["panas", "meriang", "hangat"]);
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn mean_distribution_sums_to_one() {
        let docs = vec![tokens("demam pilek"), tokens("panas batuk"), tokens("haus kencing")];
        let pipeline = Pipeline::fit(
            &docs,
            &["Flu", "Flu", "Diabetes"],
            VectorizerConfig { max_df: 1.0, ..Default::default() },
            NbStrategy::Multinomial,
            0.1,
        )
        .unwrap();
        let v = variants(&tokens("demam"), &table(), 6);
        let dist = mean_distribution(&pipeline, &v).unwrap();
        assert!((dist.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        // "panas" variant carries Flu evidence the original shares
        assert!(dist[1] > dist[0]);
    }
}
