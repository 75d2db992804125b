pub mod corpus;
pub mod serde;
pub mod tfidf;
pub mod token;

use std::marker::PhantomData;

use ::serde::{Deserialize, Serialize};
use indexmap::IndexSet;
use tracing::debug;

use crate::config::VectorizerConfig;
use crate::error::{ClassifierError, Result};
use crate::utils::math::vector::ZeroSpVec;
use crate::vectorizer::{corpus::Corpus, tfidf::{DefaultTFIDFEngine, TFIDFEngine}, token::TokenFrequency};

/// Frozen term -> index mapping.
/// Indices follow lexicographic term order, so the same corpus and config always
/// produce the same mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    terms: IndexSet<String>,
}

impl Vocabulary {
    pub(crate) fn from_sorted_terms(terms: Vec<String>) -> Self {
        Self { terms: terms.into_iter().collect() }
    }

    #[inline]
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.terms.get_index_of(term)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.terms.iter().map(|s| s.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct IDFVector {
    /// IDF Vector it is not sparse because it is mostly filled
    pub idf_vec: Vec<f64>,
    /// document count at fit time
    pub doc_num: u64,
}

impl IDFVector {
    pub fn new() -> Self {
        Self::default()
    }
}

/// TF-IDF feature extractor.
///
/// `fit` learns the vocabulary and IDF weights from a corpus of token sequences and
/// freezes them; `transform` maps a token sequence to an L2-normalised sparse vector.
/// Refitting replaces the vocabulary, so vectors from an earlier fit are not comparable.
///
/// `E` selects the weighting scheme (see [`TFIDFEngine`]).
#[derive(Debug, Clone)]
pub struct TFIDFVectorizer<E = DefaultTFIDFEngine>
where
    E: TFIDFEngine,
{
    pub config: VectorizerConfig,
    /// `None` until fitted
    pub(crate) vocabulary: Option<Vocabulary>,
    pub(crate) idf_cache: IDFVector,
    pub(crate) _marker: PhantomData<E>,
}

impl<E> TFIDFVectorizer<E>
where
    E: TFIDFEngine,
{
    pub fn new(config: VectorizerConfig) -> Self {
        Self {
            config,
            vocabulary: None,
            idf_cache: IDFVector::new(),
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn is_fitted(&self) -> bool {
        self.vocabulary.is_some()
    }

    pub fn vocabulary(&self) -> Result<&Vocabulary> {
        self.vocabulary.as_ref().ok_or(ClassifierError::NotFitted("TFIDFVectorizer"))
    }

    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.vocabulary.as_ref().map_or(0, |v| v.len())
    }

    /// Learn vocabulary and IDF from `docs`.
    ///
    /// A term enters the vocabulary when it occurs in at least `min_df` documents and in
    /// at most `ceil(max_df * N)` documents. If more than `max_features` terms survive,
    /// the most frequent ones are kept (ties broken by term order).
    pub fn fit<T: AsRef<str>>(&mut self, docs: &[Vec<T>]) -> Result<&Vocabulary> {
        let mut corpus = Corpus::new();
        let mut grams = 0u64;
        for doc in docs {
            let freq = TokenFrequency::from_ngrams(doc, self.config.ngram_max);
            grams += freq.token_sum();
            corpus.add_doc(&freq);
        }

        let doc_num = corpus.get_doc_num();
        let max_df_count = (self.config.max_df * doc_num as f64).ceil() as u64;
        let min_df = self.config.min_df as u64;

        let mut candidates: Vec<(&str, u64)> = corpus
            .iter()
            .filter(|(_, df, _)| *df >= min_df && *df <= max_df_count)
            .map(|(term, _, total)| (term, total))
            .collect();
        let pruned = corpus.vocab_size() - candidates.len();

        if candidates.len() > self.config.max_features {
            candidates.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
            candidates.truncate(self.config.max_features);
        }
        let mut terms: Vec<String> = candidates.into_iter().map(|(t, _)| t.to_string()).collect();
        terms.sort_unstable();

        let vocabulary = Vocabulary::from_sorted_terms(terms);
        self.idf_cache = IDFVector {
            idf_vec: E::idf_vec(&corpus, vocabulary.iter()),
            doc_num,
        };
        debug!(
            docs = doc_num,
            grams,
            vocab = vocabulary.len(),
            pruned,
            ngram_max = self.config.ngram_max,
            "vectorizer fitted"
        );
        let vocabulary: &Vocabulary = self.vocabulary.insert(vocabulary);
        Ok(vocabulary)
    }

    /// Map tokens to a TF-IDF vector of dimension `vocab_size()`.
    /// Terms outside the vocabulary are ignored.
    pub fn transform<T: AsRef<str>>(&self, tokens: &[T]) -> Result<ZeroSpVec<f64>> {
        let vocabulary = self.vocabulary()?;
        let freq = TokenFrequency::from_ngrams(tokens, self.config.ngram_max);
        if freq.is_empty() {
            return Ok(ZeroSpVec::new(vocabulary.len()));
        }
        let pairs = freq.iter().filter_map(|(term, count)| {
            vocabulary
                .index_of(term)
                .map(|idx| (idx as u32, E::tf(count) * self.idf_cache.idf_vec[idx]))
        });
        let mut vec = ZeroSpVec::from_unsorted(vocabulary.len(), pairs);
        vec.l2_normalize();
        Ok(vec)
    }

    pub fn transform_batch<T: AsRef<str>>(&self, docs: &[Vec<T>]) -> Result<Vec<ZeroSpVec<f64>>> {
        docs.iter().map(|doc| self.transform(doc)).collect()
    }

    pub fn fit_transform<T: AsRef<str>>(&mut self, docs: &[Vec<T>]) -> Result<Vec<ZeroSpVec<f64>>> {
        self.fit(docs)?;
        self.transform_batch(docs)
    }
}
