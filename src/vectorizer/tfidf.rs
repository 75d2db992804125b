use crate::vectorizer::corpus::Corpus;

/// TF-IDF calculation engine.
///
/// Plugs a weighting scheme into `TFIDFVectorizer<E>`. Implementations are
/// stateless; everything they need comes from the arguments.
pub trait TFIDFEngine {
    /// IDF weight of a term with document frequency `doc_freq` in a corpus of `doc_num` documents
    fn idf(doc_num: u64, doc_freq: u64) -> f64;

    /// TF weight of a term occurring `count` times in one document
    fn tf(count: u32) -> f64;

    /// IDF vector for the vocabulary, index-aligned with `terms`
    fn idf_vec<'a, I>(corpus: &Corpus, terms: I) -> Vec<f64>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let doc_num = corpus.get_doc_num();
        terms
            .into_iter()
            .map(|term| Self::idf(doc_num, corpus.get_term_count(term)))
            .collect()
    }
}

/// Default engine: sublinear TF and smoothed IDF.
/// - tf  = 1 + ln(count)
/// - idf = ln((1 + N) / (1 + df)) + 1
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl TFIDFEngine for DefaultTFIDFEngine {
    #[inline]
    fn idf(doc_num: u64, doc_freq: u64) -> f64 {
        ((1.0 + doc_num as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
    }

    #[inline]
    fn tf(count: u32) -> f64 {
        if count == 0 {
            return 0.0;
        }
        1.0 + (count as f64).ln()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sublinear_tf() {
        assert_eq!(DefaultTFIDFEngine::tf(0), 0.0);
        assert_eq!(DefaultTFIDFEngine::tf(1), 1.0);
        assert!((DefaultTFIDFEngine::tf(3) - (1.0 + 3f64.ln())).abs() < 1e-12);
    }

    #[test]
    fn smoothed_idf() {
        // term in every document still has weight 1
        assert!((DefaultTFIDFEngine::idf(4, 4) - 1.0).abs() < 1e-12);
        assert!((DefaultTFIDFEngine::idf(4, 1) - ((5.0f64 / 2.0).ln() + 1.0)).abs() < 1e-12);
        // rarer terms weigh more
        assert!(DefaultTFIDFEngine::idf(10, 1) > DefaultTFIDFEngine::idf(10, 5));
    }
}
