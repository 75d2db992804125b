//! Naive Bayes over TF-IDF vectors.
//!
//! Feature values are treated as fractional counts. `fit` accumulates the per-class
//! feature totals `F[c][i]` and turns them into one weight row per class:
//!
//! - multinomial: `w[c][i] = ln((F[c][i] + a) / (sum_j F[c][j] + a * V))`,
//!   score = `ln P(c) + x . w[c]`
//! - complement: `w[c][i] = -ln(C[c][i] / sum_j C[c][j])` with
//!   `C[c][i] = a + sum over c' != c of F[c'][i]`, score = `x . w[c]`
//!   (plus the prior when only one class exists)
//!
//! Scores become probabilities through a log-sum-exp softmax.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClassifierError, Result};
use crate::model::NbStrategy;
use crate::utils::math::vector::ZeroSpVec;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NaiveBayes {
    pub strategy: NbStrategy,
    pub alpha: f64,
    /// sorted; index = class id
    classes: Vec<String>,
    class_log_prior: Vec<f64>,
    /// [class][feature]
    weights: Vec<Vec<f64>>,
    n_features: usize,
}

impl NaiveBayes {
    pub fn new(strategy: NbStrategy, alpha: f64) -> Self {
        Self {
            strategy,
            alpha,
            classes: Vec::new(),
            class_log_prior: Vec::new(),
            weights: Vec::new(),
            n_features: 0,
        }
    }

    #[inline]
    pub fn is_fitted(&self) -> bool {
        !self.classes.is_empty()
    }

    /// Class labels in score order (lexicographic).
    #[inline]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn fit<L: AsRef<str>>(&mut self, x: &[ZeroSpVec<f64>], labels: &[L]) -> Result<()> {
        if x.is_empty() {
            return Err(ClassifierError::empty_corpus("no rows to fit"));
        }
        if x.len() != labels.len() {
            return Err(ClassifierError::invalid_config(format!(
                "{} feature rows but {} labels",
                x.len(),
                labels.len()
            )));
        }
        if !(self.alpha > 0.0) {
            return Err(ClassifierError::invalid_config("alpha must be > 0"));
        }

        let mut classes: Vec<String> = labels.iter().map(|l| l.as_ref().to_string()).collect();
        classes.sort_unstable();
        classes.dedup();

        let n_features = x[0].len();
        let n_classes = classes.len();
        let mut class_count = vec![0usize; n_classes];
        let mut feature_count = vec![vec![0.0f64; n_features]; n_classes];
        for (row, label) in x.iter().zip(labels) {
            // classes were built from these labels
            let Ok(c) = classes.binary_search_by(|probe| probe.as_str().cmp(label.as_ref())) else {
                continue;
            };
            class_count[c] += 1;
            row.add_into(&mut feature_count[c]);
        }

        let total = x.len() as f64;
        let class_log_prior: Vec<f64> = class_count.iter().map(|&n| (n as f64 / total).ln()).collect();

        let alpha = self.alpha;
        let weights = match self.strategy {
            NbStrategy::Multinomial => feature_count
                .iter()
                .map(|fc| {
                    let denom = (fc.iter().sum::<f64>() + alpha * n_features as f64).ln();
                    fc.iter().map(|f| (f + alpha).ln() - denom).collect()
                })
                .collect(),
            NbStrategy::Complement => {
                let mut feature_total = vec![0.0f64; n_features];
                for fc in &feature_count {
                    for (t, f) in feature_total.iter_mut().zip(fc) {
                        *t += f;
                    }
                }
                feature_count
                    .iter()
                    .map(|fc| {
                        let comp: Vec<f64> = feature_total
                            .iter()
                            .zip(fc)
                            .map(|(t, f)| alpha + (t - f).max(0.0))
                            .collect();
                        let denom = comp.iter().sum::<f64>().ln();
                        comp.iter().map(|c| -(c.ln() - denom)).collect()
                    })
                    .collect()
            }
        };

        debug!(
            strategy = ?self.strategy,
            alpha,
            classes = n_classes,
            features = n_features,
            rows = x.len(),
            "naive bayes fitted"
        );
        self.classes = classes;
        self.class_log_prior = class_log_prior;
        self.weights = weights;
        self.n_features = n_features;
        Ok(())
    }

    /// Unnormalised per-class scores.
    pub fn joint_log_likelihood(&self, x: &ZeroSpVec<f64>) -> Result<Vec<f64>> {
        if !self.is_fitted() {
            return Err(ClassifierError::NotFitted("NaiveBayes"));
        }
        debug_assert_eq!(x.len(), self.n_features(), "feature dimension mismatch");
        let single = self.classes.len() == 1;
        Ok(self
            .weights
            .iter()
            .zip(&self.class_log_prior)
            .map(|(w, prior)| {
                let score = x.dot_dense(w);
                match self.strategy {
                    NbStrategy::Multinomial => prior + score,
                    NbStrategy::Complement if single => prior + score,
                    NbStrategy::Complement => score,
                }
            })
            .collect())
    }

    /// Probability per class, index-aligned with [`classes`](Self::classes). Sums to 1.
    pub fn predict_proba(&self, x: &ZeroSpVec<f64>) -> Result<Vec<f64>> {
        let jll = self.joint_log_likelihood(x)?;
        Ok(softmax(&jll))
    }

    pub fn predict(&self, x: &ZeroSpVec<f64>) -> Result<&str> {
        let proba = self.predict_proba(x)?;
        let best = crate::utils::sort::argsort_desc(&proba)[0];
        Ok(&self.classes[best])
    }
}

/// log-sum-exp softmax, renormalised so the output sums to 1
pub fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        let uniform = 1.0 / scores.len().max(1) as f64;
        return vec![uniform; scores.len()];
    }
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vec(len: usize, pairs: &[(u32, f64)]) -> ZeroSpVec<f64> {
        ZeroSpVec::from_unsorted(len, pairs.iter().copied())
    }

    /// features: 0 demam, 1 pilek, 2 haus, 3 kencing
    fn data() -> (Vec<ZeroSpVec<f64>>, Vec<&'static str>) {
        (
            vec![
                vec(4, &[(0, 0.7), (1, 0.7)]),
                vec(4, &[(0, 1.0)]),
                vec(4, &[(2, 0.7), (3, 0.7)]),
                vec(4, &[(3, 1.0)]),
            ],
            vec!["Flu", "Flu", "Diabetes", "Diabetes"],
        )
    }

    #[test]
    fn predict_before_fit_fails() {
        let nb = NaiveBayes::new(NbStrategy::Multinomial, 0.1);
        let err = nb.predict_proba(&vec(4, &[(0, 1.0)])).unwrap_err();
        assert!(matches!(err, ClassifierError::NotFitted(_)));
    }

    #[test]
    fn classes_are_sorted() {
        let (x, y) = data();
        let mut nb = NaiveBayes::new(NbStrategy::Multinomial, 0.1);
        nb.fit(&x, &y).unwrap();
        assert_eq!(nb.classes(), &["Diabetes".to_string(), "Flu".to_string()]);
    }

    #[test]
    fn both_strategies_separate_classes() {
        let (x, y) = data();
        for strategy in [NbStrategy::Multinomial, NbStrategy::Complement] {
            let mut nb = NaiveBayes::new(strategy, 0.1);
            nb.fit(&x, &y).unwrap();
            let proba = nb.predict_proba(&vec(4, &[(0, 0.7), (1, 0.7)])).unwrap();
            assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-9);
            assert!(proba[1] > 0.6, "{strategy:?}: {proba:?}");
            assert_eq!(nb.predict(&vec(4, &[(3, 1.0)])).unwrap(), "Diabetes");
        }
    }

    #[test]
    fn multinomial_matches_closed_form() {
        let x = vec![vec(2, &[(0, 1.0)]), vec(2, &[(1, 1.0)])];
        let mut nb = NaiveBayes::new(NbStrategy::Multinomial, 1.0);
        nb.fit(&x, &["A", "B"]).unwrap();
        // theta_A = (2/3, 1/3), theta_B = (1/3, 2/3), equal priors
        let proba = nb.predict_proba(&vec(2, &[(0, 1.0)])).unwrap();
        assert!((proba[0] - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn unknown_only_input_falls_back_to_priors() {
        let (x, y) = data();
        let mut nb = NaiveBayes::new(NbStrategy::Multinomial, 0.1);
        nb.fit(&x, &y).unwrap();
        let proba = nb.predict_proba(&ZeroSpVec::new(4)).unwrap();
        assert!((proba[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn single_class_has_probability_one() {
        let x = vec![vec(2, &[(0, 1.0)]), vec(2, &[(1, 1.0)])];
        for strategy in [NbStrategy::Multinomial, NbStrategy::Complement] {
            let mut nb = NaiveBayes::new(strategy, 0.1);
            nb.fit(&x, &["Flu", "Flu"]).unwrap();
            assert_eq!(nb.predict_proba(&vec(2, &[(1, 1.0)])).unwrap(), vec![1.0]);
        }
    }

    #[test]
    fn softmax_is_stable() {
        let p = softmax(&[1000.0, 1000.0]);
        assert_eq!(p, vec![0.5, 0.5]);
        assert_eq!(softmax(&[f64::NEG_INFINITY, f64::NEG_INFINITY]), vec![0.5, 0.5]);
    }
}
