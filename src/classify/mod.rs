//! The classification service.
//!
//! [`Classifier`] owns one fitted model at a time. Training and loading build a complete
//! new [`FittedModel`] first and swap it in afterwards, so a failed train or load leaves
//! the previous model serving. Predictions clone the current `Arc` and run without
//! holding the lock.

pub mod ensemble;
pub mod hits;
pub mod policy;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::ClassifierConfig;
use crate::dataset::TrainingSet;
use crate::error::{ClassifierError, Result};
use crate::model::Pipeline;
use crate::selection::{ConfidenceProfile, GridSearch, SearchParams, TrainingReport};
use crate::store;
use crate::text::profile::{Profile, ProfileKind};

use self::ensemble::{mean_distribution, variants};
use self::policy::{ConfidencePolicy, Prediction};

/// Everything a prediction needs, plus what training learned about the corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedModel {
    /// label space the model was trained for
    pub profile: ProfileKind,
    pub pipeline: Pipeline,
    pub params: SearchParams,
    /// mean CV accuracy (resubstitution accuracy when CV was skipped)
    pub accuracy: f64,
    pub confidence_profile: ConfidenceProfile,
    /// label -> raw training texts
    pub examples: IndexMap<String, Vec<String>>,
}

impl FittedModel {
    #[inline]
    pub fn classes(&self) -> &[String] {
        self.pipeline.classes()
    }
}

/// Where the current model came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModelSource {
    Loaded,
    /// trained and saved; carries the training accuracy
    Trained(f64),
}

#[derive(Debug)]
pub struct Classifier {
    config: ClassifierConfig,
    profile: Profile,
    policy: ConfidencePolicy,
    model: RwLock<Option<Arc<FittedModel>>>,
}

impl Classifier {
    pub fn new(config: ClassifierConfig, profile: Profile) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            policy: ConfidencePolicy::new(config.policy.clone()),
            config,
            profile,
            model: RwLock::new(None),
        })
    }

    /// Default configuration for `profile`.
    pub fn with_profile(profile: Profile) -> Self {
        let config = ClassifierConfig::default();
        Self {
            policy: ConfidencePolicy::new(config.policy.clone()),
            config,
            profile,
            model: RwLock::new(None),
        }
    }

    #[inline]
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    #[inline]
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn is_trained(&self) -> bool {
        self.model.read().is_some()
    }

    /// Current model; `ModelNotTrained` before the first successful train or load.
    pub fn model(&self) -> Result<Arc<FittedModel>> {
        self.model.read().clone().ok_or(ClassifierError::ModelNotTrained)
    }

    fn swap(&self, model: FittedModel) {
        *self.model.write() = Some(Arc::new(model));
    }

    /// Retrain from scratch and replace the current model. Returns the training accuracy.
    pub fn train(&self, set: &TrainingSet) -> Result<f64> {
        self.train_with_report(set).map(|report| report.accuracy)
    }

    pub fn train_with_report(&self, set: &TrainingSet) -> Result<TrainingReport> {
        let outcome = GridSearch::new(&self.config, self.profile.normalizer.as_ref()).run(set)?;
        let report = outcome.report;

        let mut examples = set.texts_by_label();
        examples.sort_keys();
        let model = FittedModel {
            profile: self.profile.kind,
            pipeline: outcome.pipeline,
            params: report.best,
            accuracy: report.accuracy,
            confidence_profile: report.confidence_profile.clone(),
            examples,
        };
        info!(
            profile = %self.profile.kind,
            classes = model.classes().len(),
            vocab = model.pipeline.vectorizer.vocab_size(),
            accuracy = report.accuracy,
            "model trained"
        );
        self.swap(model);
        Ok(report)
    }

    /// Class distribution for `text`, averaged over its synonym variants.
    pub fn distribution(&self, text: &str) -> Result<Vec<(String, f64)>> {
        let model = self.model()?;
        let dist = self.ensemble_distribution(&model, text)?;
        Ok(model.classes().iter().cloned().zip(dist).collect())
    }

    fn ensemble_distribution(&self, model: &FittedModel, text: &str) -> Result<Vec<f64>> {
        let tokens = self.profile.normalizer.normalize(text);
        let variants = variants(&tokens, &self.profile.synonyms, self.config.ensemble.max_variants);
        debug!(tokens = tokens.len(), variants = variants.len(), "ensemble input");
        mean_distribution(&model.pipeline, &variants)
    }

    pub fn predict(&self, text: &str) -> Result<Prediction> {
        let model = self.model()?;
        let dist = self.ensemble_distribution(&model, text)?;
        let prediction = self.policy.decide(model.classes(), &dist, &model.confidence_profile);
        debug!(
            label = %prediction.label,
            confidence = prediction.confidence,
            verdict = %prediction.verdict,
            "prediction"
        );
        Ok(prediction)
    }

    /// [`predict`](Self::predict) for callers that cannot handle errors: any failure
    /// becomes the unknown label with confidence 0.
    pub fn classify(&self, text: &str) -> Prediction {
        match self.predict(text) {
            Ok(prediction) => prediction,
            Err(e) => {
                warn!(error = %e, "classification failed");
                Prediction::unclassified(&self.config.policy.unknown_label)
            }
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<PathBuf> {
        let model = self.model()?;
        store::save(model.as_ref(), path)
    }

    /// Replace the current model with the one at `path`. On error the current model stays.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let model: FittedModel = store::load(path.as_ref())?;
        if model.profile != self.profile.kind {
            warn!(
                stored = %model.profile,
                active = %self.profile.kind,
                "model was trained for another profile"
            );
        }
        info!(path = %path.as_ref().display(), classes = model.classes().len(), "model loaded");
        self.swap(model);
        Ok(())
    }

    /// Load `path` if it holds a usable model, otherwise train on `set` and save to `path`.
    pub fn load_or_train<P: AsRef<Path>>(&self, path: P, set: &TrainingSet) -> Result<ModelSource> {
        let path = path.as_ref();
        if path.exists() {
            match self.load(path) {
                Ok(()) => return Ok(ModelSource::Loaded),
                Err(e) => warn!(error = %e, path = %path.display(), "stored model unusable; retraining"),
            }
        }
        let accuracy = self.train(set)?;
        self.save(path)?;
        Ok(ModelSource::Trained(accuracy))
    }

    /// Labels of the current model, in class order.
    pub fn labels(&self) -> Result<Vec<String>> {
        Ok(self.model()?.classes().to_vec())
    }

    /// Raw training texts of `label`.
    pub fn examples_for(&self, label: &str) -> Result<Vec<String>> {
        self.model()?
            .examples
            .get(label)
            .cloned()
            .ok_or_else(|| ClassifierError::UnknownLabel(label.to_string()))
    }

    pub fn confidence_profile(&self) -> Result<ConfidenceProfile> {
        Ok(self.model()?.confidence_profile.clone())
    }

    /// Mean held-out confidence for `label`.
    pub fn baseline_for(&self, label: &str) -> Result<f64> {
        self.model()?.confidence_profile.get(label)
    }
}
