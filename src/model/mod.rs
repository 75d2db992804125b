pub mod naive_bayes;
pub mod pipeline;

use serde::{Deserialize, Serialize};

pub use naive_bayes::NaiveBayes;
pub use pipeline::Pipeline;

/// Naive Bayes variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NbStrategy {
    /// per-class term distribution
    #[default]
    Multinomial,
    /// weights learned from every other class; steadier on imbalanced data
    Complement,
}
