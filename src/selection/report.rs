use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};
use crate::selection::metrics::ClassMetrics;

/// One point of the hyperparameter grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    pub max_features: usize,
    pub ngram_max: usize,
    pub alpha: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridScore {
    pub params: SearchParams,
    pub mean_accuracy: f64,
    pub fold_accuracy: Vec<f64>,
}

/// label -> mean held-out probability of the true class.
///
/// Diagnostic baseline: how confident the model typically is when the answer really is
/// that label. Labels are kept in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfidenceProfile {
    baselines: IndexMap<String, f64>,
}

impl ConfidenceProfile {
    /// Mean of `p_true` per label.
    pub fn from_observations<L: AsRef<str>>(labels: &[L], p_true: &[f64]) -> Self {
        let mut sums: IndexMap<String, (f64, usize)> = IndexMap::new();
        for (label, p) in labels.iter().zip(p_true) {
            let entry = sums.entry(label.as_ref().to_string()).or_insert((0.0, 0));
            entry.0 += p;
            entry.1 += 1;
        }
        sums.sort_keys();
        Self {
            baselines: sums.into_iter().map(|(l, (sum, n))| (l, sum / n as f64)).collect(),
        }
    }

    pub fn get(&self, label: &str) -> Result<f64> {
        self.baselines
            .get(label)
            .copied()
            .ok_or_else(|| ClassifierError::UnknownLabel(label.to_string()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.baselines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.baselines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.baselines.iter().map(|(l, p)| (l.as_str(), *p))
    }
}

/// Everything learned while choosing and fitting the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub best: SearchParams,
    /// mean CV accuracy of `best`, or resubstitution accuracy when CV was skipped
    pub accuracy: f64,
    /// folds actually used; 0 when CV was skipped
    pub folds: usize,
    /// grid order; empty when CV was skipped
    pub grid: Vec<GridScore>,
    /// from out-of-fold predictions of `best`
    pub class_metrics: Vec<ClassMetrics>,
    pub confidence_profile: ConfidenceProfile,
    pub rows: usize,
    /// rows after augmentation of the full set
    pub training_rows: usize,
}

impl TrainingReport {
    #[inline]
    pub fn cv_skipped(&self) -> bool {
        self.folds == 0
    }
}
