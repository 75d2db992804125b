use std::marker::PhantomData;

use serde::{de, ser::SerializeStruct, Deserialize, Deserializer, Serialize};

use crate::config::VectorizerConfig;
use crate::error::{ClassifierError, Result};
use crate::vectorizer::{tfidf::TFIDFEngine, IDFVector, TFIDFVectorizer, Vocabulary};

/// Serializable snapshot of a `TFIDFVectorizer`.
/// The engine type parameter is not stored; it is supplied again by
/// `into_tf_idf_vectorizer`, which also checks that every term has an IDF weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TFIDFData {
    pub config: VectorizerConfig,
    /// vocabulary in index order; `None` for an unfitted vectorizer
    pub terms: Option<Vec<String>>,
    pub idf: IDFVector,
}

impl TFIDFData {
    pub fn into_tf_idf_vectorizer<E: TFIDFEngine>(self) -> Result<TFIDFVectorizer<E>> {
        let vocabulary = self.terms.map(Vocabulary::from_sorted_terms);
        let terms = vocabulary.as_ref().map_or(0, Vocabulary::len);
        if terms != self.idf.idf_vec.len() {
            return Err(ClassifierError::InvalidModel(format!(
                "{} vocabulary terms but {} idf weights",
                terms,
                self.idf.idf_vec.len()
            )));
        }
        Ok(TFIDFVectorizer {
            config: self.config,
            vocabulary,
            idf_cache: self.idf,
            _marker: PhantomData,
        })
    }
}

impl<E: TFIDFEngine> From<&TFIDFVectorizer<E>> for TFIDFData {
    fn from(vectorizer: &TFIDFVectorizer<E>) -> Self {
        TFIDFData {
            config: vectorizer.config.clone(),
            terms: vectorizer
                .vocabulary
                .as_ref()
                .map(|v| v.iter().map(str::to_string).collect()),
            idf: vectorizer.idf_cache.clone(),
        }
    }
}

impl<E: TFIDFEngine> Serialize for TFIDFVectorizer<E> {
    /// Same layout as `TFIDFData`.
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let terms: Option<Vec<&str>> = self.vocabulary.as_ref().map(|v| v.iter().collect());
        let mut state = serializer.serialize_struct("TFIDFData", 3)?;
        state.serialize_field("config", &self.config)?;
        state.serialize_field("terms", &terms)?;
        state.serialize_field("idf", &self.idf_cache)?;
        state.end()
    }
}

impl<'de, E: TFIDFEngine> Deserialize<'de> for TFIDFVectorizer<E> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        TFIDFData::deserialize(deserializer)?
            .into_tf_idf_vectorizer()
            .map_err(de::Error::custom)
    }
}
