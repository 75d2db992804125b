use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Stratified k-fold splitter.
///
/// Row indices of each class (classes in sorted order) are shuffled with a seeded RNG,
/// then dealt round-robin over the folds. The deal continues across classes, so fold
/// sizes differ by at most one.
#[derive(Debug, Clone, Copy)]
pub struct StratifiedKFold {
    pub n_splits: usize,
    pub seed: u64,
}

/// (train indices, validation indices), both ascending
pub type Fold = (Vec<usize>, Vec<usize>);

impl StratifiedKFold {
    pub fn new(n_splits: usize, seed: u64) -> Self {
        Self { n_splits, seed }
    }

    /// `min(requested, largest class size, row count)`
    pub fn effective_splits<L: AsRef<str>>(requested: usize, labels: &[L]) -> usize {
        let largest = group(labels).values().map(Vec::len).max().unwrap_or(0);
        requested.min(largest).min(labels.len())
    }

    pub fn split<L: AsRef<str>>(&self, labels: &[L]) -> Vec<Fold> {
        let k = self.n_splits.max(1);
        let mut assignment = vec![0usize; labels.len()];
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut next = 0usize;
        for (_, mut rows) in group(labels) {
            rows.shuffle(&mut rng);
            for row in rows {
                assignment[row] = next % k;
                next += 1;
            }
        }

        (0..k)
            .map(|fold| {
                let (valid, train): (Vec<usize>, Vec<usize>) =
                    (0..labels.len()).partition(|&i| assignment[i] == fold);
                (train, valid)
            })
            .collect()
    }
}

fn group<L: AsRef<str>>(labels: &[L]) -> BTreeMap<&str, Vec<usize>> {
    let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (i, label) in labels.iter().enumerate() {
        groups.entry(label.as_ref()).or_default().push(i);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> Vec<&'static str> {
        vec!["a", "a", "a", "a", "b", "b", "b", "c", "c", "a"]
    }

    #[test]
    fn effective_splits_are_bounded() {
        assert_eq!(StratifiedKFold::effective_splits(10, &labels()), 5);
        assert_eq!(StratifiedKFold::effective_splits(3, &labels()), 3);
        assert_eq!(StratifiedKFold::effective_splits(5, &["x"]), 1);
        assert_eq!(StratifiedKFold::effective_splits::<&str>(5, &[]), 0);
    }

    #[test]
    fn folds_partition_the_rows() {
        let folds = StratifiedKFold::new(3, 42).split(&labels());
        assert_eq!(folds.len(), 3);
        let mut seen: Vec<usize> = folds.iter().flat_map(|(_, v)| v.clone()).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..10).collect::<Vec<_>>());
        for (train, valid) in &folds {
            assert_eq!(train.len() + valid.len(), 10);
            assert!(train.iter().all(|i| !valid.contains(i)));
            assert!(valid.len() >= 3 && valid.len() <= 4);
        }
    }

    #[test]
    fn classes_are_spread_over_folds() {
        let folds = StratifiedKFold::new(3, 1).split(&labels());
        let l = labels();
        for (_, valid) in &folds {
            // 5 rows of "a" over 3 folds: each fold holds 1 or 2
            let a = valid.iter().filter(|&&i| l[i] == "a").count();
            assert!((1..=2).contains(&a));
        }
    }

    #[test]
    fn split_is_seeded() {
        let s = StratifiedKFold::new(3, 9);
        assert_eq!(s.split(&labels()), s.split(&labels()));
    }
}
