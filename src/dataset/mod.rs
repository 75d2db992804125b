//! Training corpora.
//!
//! A [`TrainingSet`] is an ordered list of `(text, label)` rows. Row order matters: it
//! fixes pair order during augmentation and fold assignment during cross validation.

pub mod augment;
pub mod sample;

use std::path::Path;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ClassifierError, Result};
use crate::text::profile::Profile;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrainingExample {
    #[serde(alias = "symptoms", alias = "preferences")]
    pub text: String,
    #[serde(alias = "disease", alias = "film_genre")]
    pub label: String,
}

impl TrainingExample {
    pub fn new<T: Into<String>, L: Into<String>>(text: T, label: L) -> Self {
        Self { text: text.into(), label: label.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrainingSet {
    pub examples: Vec<TrainingExample>,
}

impl TrainingSet {
    pub fn new(examples: Vec<TrainingExample>) -> Self {
        Self { examples }
    }

    pub fn from_pairs<T: AsRef<str>, L: AsRef<str>>(pairs: &[(T, L)]) -> Self {
        pairs
            .iter()
            .map(|(t, l)| TrainingExample::new(t.as_ref(), l.as_ref()))
            .collect()
    }

    /// Reads a JSON array of `{ "text": .., "label": .. }` objects.
    /// `symptoms`/`disease` and `preferences`/`film_genre` are accepted as field names.
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClassifierError::empty_corpus(format!("{}: {e}", path.display()))
        })?;
        let set: TrainingSet = serde_json::from_str(&content)?;
        if set.is_empty() {
            return Err(ClassifierError::empty_corpus(path.display().to_string()));
        }
        info!(path = %path.display(), rows = set.len(), labels = set.labels().len(), "corpus loaded");
        Ok(set)
    }

    /// Like [`from_json_path`](Self::from_json_path), but falls back to the profile's
    /// sample corpus when the file is missing or empty. Malformed JSON is still an error.
    pub fn load_or_sample<P: AsRef<Path>>(path: P, profile: &Profile) -> Result<Self> {
        match Self::from_json_path(path.as_ref()) {
            Ok(set) => Ok(set),
            Err(ClassifierError::EmptyOrMissingCorpus(reason)) => {
                let sample = profile.sample_corpus();
                warn!(%reason, profile = %profile.kind, rows = sample.len(), "falling back to sample corpus");
                if sample.is_empty() {
                    return Err(ClassifierError::EmptyOrMissingCorpus(reason));
                }
                Ok(sample)
            }
            Err(e) => Err(e),
        }
    }

    /// One row per label for rows labelled like `"Action|Comedy"`.
    /// Empty label parts are dropped.
    pub fn split_multi_label(&self, separator: char) -> Self {
        self.examples
            .iter()
            .flat_map(|ex| {
                ex.label
                    .split(separator)
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(move |l| TrainingExample::new(ex.text.clone(), l))
            })
            .collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    pub fn push(&mut self, example: TrainingExample) {
        self.examples.push(example);
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrainingExample> + '_ {
        self.examples.iter()
    }

    /// Distinct labels, sorted lexicographically.
    pub fn labels(&self) -> Vec<String> {
        let set: IndexSet<&str> = self.examples.iter().map(|e| e.label.as_str()).collect();
        let mut labels: Vec<String> = set.into_iter().map(str::to_string).collect();
        labels.sort_unstable();
        labels
    }

    /// label -> row count, in first-seen order
    pub fn label_counts(&self) -> IndexMap<&str, usize> {
        let mut counts = IndexMap::new();
        for ex in &self.examples {
            *counts.entry(ex.label.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// label -> raw texts, in first-seen order
    pub fn texts_by_label(&self) -> IndexMap<String, Vec<String>> {
        let mut groups: IndexMap<String, Vec<String>> = IndexMap::new();
        for ex in &self.examples {
            groups.entry(ex.label.clone()).or_default().push(ex.text.clone());
        }
        groups
    }

    /// Rows at `indices`, in that order.
    pub fn subset(&self, indices: &[usize]) -> Self {
        indices.iter().map(|&i| self.examples[i].clone()).collect()
    }
}

impl FromIterator<TrainingExample> for TrainingSet {
    fn from_iter<I: IntoIterator<Item = TrainingExample>>(iter: I) -> Self {
        Self { examples: iter.into_iter().collect() }
    }
}

impl IntoIterator for TrainingSet {
    type Item = TrainingExample;
    type IntoIter = std::vec::IntoIter<TrainingExample>;

    fn into_iter(self) -> Self::IntoIter {
        self.examples.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn labels_are_sorted_and_distinct() {
        let set = TrainingSet::from_pairs(&[("a", "Maag"), ("b", "Flu"), ("c", "Maag")]);
        assert_eq!(set.labels(), vec!["Flu", "Maag"]);
        assert_eq!(set.label_counts()["Maag"], 2);
    }

    #[test]
    fn split_multi_label_emits_one_row_per_label() {
        let set = TrainingSet::from_pairs(&[("ledakan lucu", "Action|Comedy"), ("hantu", "Horror")]);
        let split = set.split_multi_label('|');
        assert_eq!(
            split.examples,
            vec![
                TrainingExample::new("ledakan lucu", "Action"),
                TrainingExample::new("ledakan lucu", "Comedy"),
                TrainingExample::new("hantu", "Horror"),
            ]
        );
    }

    #[test]
    fn json_accepts_original_field_names() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"symptoms": "demam pilek", "disease": "Flu"}}, {{"text": "haus", "label": "Diabetes"}}]"#
        )
        .unwrap();
        let set = TrainingSet::from_json_path(file.path()).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.examples[0], TrainingExample::new("demam pilek", "Flu"));
    }

    #[test]
    fn missing_or_empty_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(
            TrainingSet::from_json_path(&missing),
            Err(ClassifierError::EmptyOrMissingCorpus(_))
        ));

        let empty = dir.path().join("empty.json");
        std::fs::write(&empty, "[]").unwrap();
        assert!(matches!(
            TrainingSet::from_json_path(&empty),
            Err(ClassifierError::EmptyOrMissingCorpus(_))
        ));

        let fallback = TrainingSet::load_or_sample(&missing, &Profile::disease()).unwrap();
        assert_eq!(fallback, sample::disease_corpus());
    }

    #[test]
    fn malformed_json_is_not_replaced_by_sample() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{ not json").unwrap();
        assert!(matches!(
            TrainingSet::load_or_sample(&bad, &Profile::disease()),
            Err(ClassifierError::Json(_))
        ));
    }
}
