//! Error types for the classifier.
//!
//! Every fallible operation returns [`Result`], whose error side is the single
//! [`ClassifierError`] enum.

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifierError {
    /// transform / predict_proba called on a component that was never fitted
    #[error("{0} is not fitted")]
    NotFitted(&'static str),

    /// predict called before any successful train or load
    #[error("model is not trained; call train() or load() first")]
    ModelNotTrained,

    /// corpus file missing, unreadable as a corpus, or with no rows
    #[error("training corpus is empty or missing: {0}")]
    EmptyOrMissingCorpus(String),

    /// persisted blob was written by another format version (or is not a model at all)
    #[error("incompatible model version: found {found}, expected {expected}")]
    IncompatibleModelVersion { found: String, expected: String },

    /// model blob decoded but its parts do not fit together
    #[error("invalid model: {0}")]
    InvalidModel(String),

    /// confidence profile lookup miss
    #[error("unknown label: {0}")]
    UnknownLabel(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_cbor::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ClassifierError>;

impl ClassifierError {
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        ClassifierError::InvalidConfig(msg.into())
    }

    pub fn empty_corpus<S: Into<String>>(msg: S) -> Self {
        ClassifierError::EmptyOrMissingCorpus(msg.into())
    }
}
