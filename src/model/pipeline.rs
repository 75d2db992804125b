use serde::{Deserialize, Serialize};

use crate::config::VectorizerConfig;
use crate::error::Result;
use crate::model::{NaiveBayes, NbStrategy};
use crate::vectorizer::TFIDFVectorizer;

/// Vectorizer and classifier fitted together on one token corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    pub vectorizer: TFIDFVectorizer,
    pub model: NaiveBayes,
}

impl Pipeline {
    pub fn fit<T, L>(
        docs: &[Vec<T>],
        labels: &[L],
        vectorizer_config: VectorizerConfig,
        strategy: NbStrategy,
        alpha: f64,
    ) -> Result<Self>
    where
        T: AsRef<str>,
        L: AsRef<str>,
    {
        let mut vectorizer = TFIDFVectorizer::new(vectorizer_config);
        let x = vectorizer.fit_transform(docs)?;
        let mut model = NaiveBayes::new(strategy, alpha);
        model.fit(&x, labels)?;
        Ok(Self { vectorizer, model })
    }

    #[inline]
    pub fn classes(&self) -> &[String] {
        self.model.classes()
    }

    /// Class distribution for one normalized token sequence.
    pub fn predict_proba<T: AsRef<str>>(&self, tokens: &[T]) -> Result<Vec<f64>> {
        let x = self.vectorizer.transform(tokens)?;
        self.model.predict_proba(&x)
    }

    /// Probability assigned to `label`; 0 when the label was not seen at fit time.
    pub fn probability_of<T: AsRef<str>>(&self, tokens: &[T], label: &str) -> Result<f64> {
        let proba = self.predict_proba(tokens)?;
        Ok(self
            .classes()
            .binary_search_by(|c| c.as_str().cmp(label))
            .map_or(0.0, |i| proba[i]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unseen_label_has_zero_probability() {
        let docs = vec![vec!["demam", "pilek"], vec!["haus", "kencing"]];
        let pipeline = Pipeline::fit(
            &docs,
            &["Flu", "Diabetes"],
            VectorizerConfig { max_df: 1.0, ..Default::default() },
            NbStrategy::Multinomial,
            0.1,
        )
        .unwrap();
        assert_eq!(pipeline.probability_of(&["demam"], "Maag").unwrap(), 0.0);
        assert!(pipeline.probability_of(&["demam"], "Flu").unwrap() > 0.5);
    }
}
