use std::fmt::Debug;

/// Labels with their probabilities.
pub struct Hits {
    /// (label, probability)
    pub list: Vec<(String, f64)>,
}

impl Hits {
    /// `labels` and `scores` are index-aligned.
    pub fn new(labels: &[String], scores: &[f64]) -> Self {
        Hits {
            list: labels.iter().cloned().zip(scores.iter().copied()).collect(),
        }
    }

    /// Sort by descending score. The sort is stable, so ties keep label order.
    pub fn sort_by_score(&mut self) -> &mut Self {
        // Remove NaN scores
        self.list.retain(|(_, s)| !s.is_nan());
        self.list.sort_by(|a, b| b.1.total_cmp(&a.1));
        self
    }

    pub fn top(&self, n: usize) -> &[(String, f64)] {
        &self.list[..n.min(self.list.len())]
    }

    /// probability at `rank` (0 = best), 0 past the end
    pub fn score_at(&self, rank: usize) -> f64 {
        self.list.get(rank).map_or(0.0, |(_, s)| *s)
    }
}

impl Debug for Hits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            writeln!(f, "Hits [")?;
            for (label, score) in &self.list {
                writeln!(f, "    {:?}: {:.6}", label, score)?;
            }
            write!(f, "]")
        } else {
            f.debug_list().entries(&self.list).finish()
        }
    }
}
