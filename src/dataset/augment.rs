//! Training-set augmentation and class balancing.
//!
//! Two steps, always in this order:
//! 1. [`augment_pairs`] joins every unordered pair of same-label texts with a connective
//!    word, so a description of two symptoms also looks like each of them alone.
//! 2. [`oversample`] draws rows with replacement until every class has as many rows as
//!    the largest one.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::config::AugmentConfig;
use crate::dataset::{TrainingExample, TrainingSet};

/// Original rows followed by the synthetic pairs.
///
/// Pairs are produced per label in first-seen label order, and within a label for every
/// `(i, j)` with `i < j` in input order. `max_pairs` keeps only the first pairs of each label.
pub fn augment_pairs(set: &TrainingSet, connective: &str, max_pairs: Option<usize>) -> TrainingSet {
    let mut out = set.clone();
    for (label, texts) in set.texts_by_label() {
        let limit = max_pairs.unwrap_or(usize::MAX);
        let mut made = 0usize;
        'pairs: for i in 0..texts.len() {
            for j in (i + 1)..texts.len() {
                if made >= limit {
                    break 'pairs;
                }
                out.push(TrainingExample::new(
                    format!("{} {} {}", texts[i], connective, texts[j]),
                    label.clone(),
                ));
                made += 1;
            }
        }
    }
    out
}

/// Appends randomly drawn rows of each minority class until all classes match the
/// largest class count. Classes are visited in sorted label order, so the result only
/// depends on `set` and `seed`.
pub fn oversample(set: &TrainingSet, seed: u64) -> TrainingSet {
    let groups = set.texts_by_label();
    let Some(max) = groups.values().map(Vec::len).max() else {
        return set.clone();
    };

    let mut labels: Vec<&String> = groups.keys().collect();
    labels.sort_unstable();

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut out = set.clone();
    for label in labels {
        let texts = &groups[label];
        for _ in texts.len()..max {
            let pick = rng.random_range(0..texts.len());
            out.push(TrainingExample::new(texts[pick].clone(), label.clone()));
        }
    }
    out
}

/// Applies the configured steps to a training split.
pub fn augment(set: &TrainingSet, config: &AugmentConfig) -> TrainingSet {
    let before = set.len();
    let paired = if config.enabled {
        augment_pairs(set, &config.connective, config.max_pairs_per_label)
    } else {
        set.clone()
    };
    let pairs = paired.len() - before;
    let balanced = if config.oversample {
        oversample(&paired, config.seed)
    } else {
        paired
    };
    debug!(rows = before, pairs, oversampled = balanced.len() - before - pairs, "training set augmented");
    balanced
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> TrainingSet {
        TrainingSet::from_pairs(&[
            ("demam", "Flu"),
            ("haus", "Diabetes"),
            ("pilek", "Flu"),
            ("batuk", "Flu"),
        ])
    }

    #[test]
    fn pairs_follow_input_order() {
        let out = augment_pairs(&corpus(), "dan", None);
        let synthetic: Vec<&str> = out.examples[4..].iter().map(|e| e.text.as_str()).collect();
        assert_eq!(synthetic, vec!["demam dan pilek", "demam dan batuk", "pilek dan batuk"]);
        assert!(out.examples[4..].iter().all(|e| e.label == "Flu"));
        // a single-example label produces no pairs
        assert_eq!(out.label_counts()["Diabetes"], 1);
    }

    #[test]
    fn pair_cap_keeps_first_pairs() {
        let out = augment_pairs(&corpus(), "dan", Some(1));
        assert_eq!(out.len(), 5);
        assert_eq!(out.examples[4].text, "demam dan pilek");
    }

    #[test]
    fn oversample_equalises_to_pre_balance_max() {
        let paired = augment_pairs(&corpus(), "dan", None);
        let max_before = *paired.label_counts().values().max().unwrap();
        let balanced = oversample(&paired, 7);
        for count in balanced.label_counts().values() {
            assert_eq!(*count, max_before);
        }
        // drawn rows come from their own class
        assert!(balanced.iter().filter(|e| e.label == "Diabetes").all(|e| e.text == "haus"));
    }

    #[test]
    fn oversample_is_seeded() {
        let set = TrainingSet::from_pairs(&[
            ("a", "X"), ("b", "X"), ("c", "X"), ("d", "X"), ("e", "Y"), ("f", "Y"),
        ]);
        assert_eq!(oversample(&set, 1), oversample(&set, 1));
    }

    #[test]
    fn disabled_steps_are_skipped() {
        let config = AugmentConfig { enabled: false, oversample: false, ..Default::default() };
        assert_eq!(augment(&corpus(), &config), corpus());
    }
}
