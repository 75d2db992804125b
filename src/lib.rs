/// This crate is a text classification engine built on a TF-IDF Vectorizer and Naive Bayes.
pub mod classify;
pub mod config;
pub mod dataset;
pub mod error;
pub mod model;
pub mod selection;
pub mod store;
pub mod text;
pub mod utils;
pub mod vectorizer;

/// Classifier
/// The top-level struct of this crate. It turns free-form text into a ranked set of
/// probable labels with a confidence and a verdict.
///
/// Internally, it holds:
/// - The configuration (vectorizer, model, augmentation, search, ensemble, policy)
/// - A `Profile`: the normalizer, synonym table and sample corpus of one label space
/// - The current `FittedModel` behind a read-write lock
///
/// Training replaces the model as a whole; the old model keeps serving until the new
/// one is complete. The struct is `Send + Sync` and can be shared through an `Arc`.
///
/// # Serialization
/// The fitted model is saved as a versioned CBOR blob with `save` and restored with `load`.
pub use classify::Classifier;

/// Fitted model snapshot
/// Vectorizer, Naive Bayes weights, chosen hyperparameters, confidence profile and the
/// raw training texts per label.
///
/// # Serialization
/// Supported.
pub use classify::FittedModel;

/// Prediction result
/// Top label, confidence, verdict, top-3 shortlist and the full distribution.
pub use classify::policy::{Prediction, Verdict};

/// Ordered synonym table used by the ensemble step.
pub use classify::ensemble::SynonymTable;

/// Configuration, loadable from TOML.
pub use config::ClassifierConfig;

/// Training corpus
/// `(text, label)` rows. Loadable from JSON, with a fallback to the profile's sample corpus.
pub use dataset::{TrainingExample, TrainingSet};

pub use error::{ClassifierError, Result};

/// Naive Bayes strategy (multinomial or complement).
pub use model::NbStrategy;

/// Training report
/// Grid scores, per-class metrics and the confidence profile produced by `train_with_report`.
pub use selection::{ConfidenceProfile, TrainingReport};

/// Label-space preset (disease or film) and the normalizer contract.
pub use text::{profile::Profile, Normalizer};

/// TF-IDF Vectorizer
/// Learns a vocabulary of n-grams and IDF weights, then maps token sequences to
/// L2-normalized sparse vectors.
///
/// `TFIDFVectorizer<E>` has one generic parameter:
/// - `E`: TF-IDF calculation engine type (e.g., DefaultTFIDFEngine)
///
/// # Serialization
/// Supported. `TFIDFData` is the serialized layout.
pub use vectorizer::TFIDFVectorizer;

/// TF-IDF Vectorizer Data Structure for Serialization
pub use vectorizer::serde::TFIDFData;

/// TF-IDF Calculation Engine Trait
/// Defines the TF and IDF weighting used by `TFIDFVectorizer`.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// Token Frequency
/// Counts of tokens (and n-grams) in one document.
pub use vectorizer::token::TokenFrequency;

/// Corpus statistics: document count and per-term document frequency.
pub use vectorizer::corpus::Corpus;
