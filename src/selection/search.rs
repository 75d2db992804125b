//! Grid search with stratified cross validation.
//!
//! Each fold's training part is augmented and balanced on its own; validation rows are
//! always raw examples. Grid points are independent and run on the rayon pool; their
//! scores are collected in grid order and the first best mean accuracy wins.

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::{ClassifierConfig, SearchConfig, VectorizerConfig};
use crate::dataset::{augment::augment, TrainingSet};
use crate::error::{ClassifierError, Result};
use crate::model::Pipeline;
use crate::selection::kfold::StratifiedKFold;
use crate::selection::metrics::{accuracy, per_class};
use crate::selection::report::{ConfidenceProfile, GridScore, SearchParams, TrainingReport};
use crate::text::Normalizer;
use crate::utils::sort::argsort_desc;

/// `max_features x ngram_max x alpha`, outermost axis first.
pub fn param_grid(config: &SearchConfig) -> Vec<SearchParams> {
    let mut grid = Vec::with_capacity(config.max_features.len() * config.ngram_max.len() * config.alpha.len());
    for &max_features in &config.max_features {
        for &ngram_max in &config.ngram_max {
            for &alpha in &config.alpha {
                grid.push(SearchParams { max_features, ngram_max, alpha });
            }
        }
    }
    grid
}

/// Winning pipeline, refit on the whole training set.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub pipeline: Pipeline,
    pub report: TrainingReport,
}

/// One CV fold, normalized once and shared by every grid point.
struct FoldData {
    train_docs: Vec<Vec<String>>,
    train_labels: Vec<String>,
    valid_docs: Vec<Vec<String>>,
    valid_labels: Vec<String>,
}

/// Out-of-fold predictions of one parameter set, in fold order.
struct OutOfFold {
    truth: Vec<String>,
    predicted: Vec<String>,
    p_true: Vec<f64>,
}

pub struct GridSearch<'a> {
    config: &'a ClassifierConfig,
    normalizer: &'a dyn Normalizer,
}

impl<'a> GridSearch<'a> {
    pub fn new(config: &'a ClassifierConfig, normalizer: &'a dyn Normalizer) -> Self {
        Self { config, normalizer }
    }

    pub fn run(&self, set: &TrainingSet) -> Result<SearchOutcome> {
        if set.is_empty() {
            return Err(ClassifierError::empty_corpus("training set has no rows"));
        }
        let grid = param_grid(&self.config.search);
        let first = *grid
            .first()
            .ok_or_else(|| ClassifierError::invalid_config("search grid is empty"))?;

        let labels: Vec<&str> = set.iter().map(|e| e.label.as_str()).collect();
        let classes = set.labels();
        let k = StratifiedKFold::effective_splits(self.config.search.folds, &labels);
        info!(rows = set.len(), classes = classes.len(), folds = k, grid = grid.len(), "training started");

        let raw_docs: Vec<Vec<String>> = set.iter().map(|e| self.normalizer.normalize(&e.text)).collect();

        if classes.len() < 2 || k < 2 {
            warn!(
                classes = classes.len(),
                folds = k,
                "too little data for cross validation; using first grid point"
            );
            return self.resubstitution(set, &raw_docs, &labels, &classes, first);
        }

        let splitter = StratifiedKFold::new(k, self.config.search.seed);
        let folds: Vec<FoldData> = splitter
            .split(&labels)
            .into_iter()
            .map(|(train, valid)| self.prepare_fold(set, &raw_docs, &train, &valid))
            .collect();

        let scores: Vec<GridScore> = if self.config.search.parallel {
            grid.par_iter().map(|p| self.score(*p, &folds)).collect::<Result<_>>()?
        } else {
            grid.iter().map(|p| self.score(*p, &folds)).collect::<Result<_>>()?
        };

        let mut best = &scores[0];
        for score in &scores[1..] {
            if score.mean_accuracy > best.mean_accuracy {
                best = score;
            }
        }
        let best_params = best.params;
        let best_accuracy = best.mean_accuracy;
        info!(
            max_features = best_params.max_features,
            ngram_max = best_params.ngram_max,
            alpha = best_params.alpha,
            accuracy = best_accuracy,
            "best parameters selected"
        );

        let oof = self.out_of_fold(best_params, &folds)?;
        let (pipeline, training_rows) = self.fit_full(set, best_params)?;

        Ok(SearchOutcome {
            pipeline,
            report: TrainingReport {
                best: best_params,
                accuracy: best_accuracy,
                folds: k,
                grid: scores,
                class_metrics: per_class(&classes, &oof.truth, &oof.predicted),
                confidence_profile: ConfidenceProfile::from_observations(&oof.truth, &oof.p_true),
                rows: set.len(),
                training_rows,
            },
        })
    }

    fn vectorizer_config(&self, params: SearchParams) -> VectorizerConfig {
        VectorizerConfig {
            max_features: params.max_features,
            ngram_max: params.ngram_max,
            ..self.config.vectorizer.clone()
        }
    }

    fn fit(&self, docs: &[Vec<String>], labels: &[String], params: SearchParams) -> Result<Pipeline> {
        Pipeline::fit(
            docs,
            labels,
            self.vectorizer_config(params),
            self.config.model.strategy,
            params.alpha,
        )
    }

    /// Augments `set` and normalizes the result.
    fn augmented_docs(&self, set: &TrainingSet) -> (Vec<Vec<String>>, Vec<String>) {
        augment(set, &self.config.augment)
            .into_iter()
            .map(|e| (self.normalizer.normalize(&e.text), e.label))
            .unzip()
    }

    fn prepare_fold(&self, set: &TrainingSet, raw_docs: &[Vec<String>], train: &[usize], valid: &[usize]) -> FoldData {
        let (train_docs, train_labels) = self.augmented_docs(&set.subset(train));
        FoldData {
            train_docs,
            train_labels,
            valid_docs: valid.iter().map(|&i| raw_docs[i].clone()).collect(),
            valid_labels: valid.iter().map(|&i| set.examples[i].label.clone()).collect(),
        }
    }

    fn score(&self, params: SearchParams, folds: &[FoldData]) -> Result<GridScore> {
        let mut fold_accuracy = Vec::with_capacity(folds.len());
        for fold in folds {
            let pipeline = self.fit(&fold.train_docs, &fold.train_labels, params)?;
            let predicted = fold
                .valid_docs
                .iter()
                .map(|doc| predict_label(&pipeline, doc))
                .collect::<Result<Vec<_>>>()?;
            fold_accuracy.push(accuracy(&fold.valid_labels, &predicted));
        }
        let mean_accuracy = fold_accuracy.iter().sum::<f64>() / fold_accuracy.len() as f64;
        debug!(
            max_features = params.max_features,
            ngram_max = params.ngram_max,
            alpha = params.alpha,
            accuracy = mean_accuracy,
            "grid point scored"
        );
        Ok(GridScore { params, mean_accuracy, fold_accuracy })
    }

    fn out_of_fold(&self, params: SearchParams, folds: &[FoldData]) -> Result<OutOfFold> {
        let mut oof = OutOfFold { truth: Vec::new(), predicted: Vec::new(), p_true: Vec::new() };
        for fold in folds {
            let pipeline = self.fit(&fold.train_docs, &fold.train_labels, params)?;
            for (doc, label) in fold.valid_docs.iter().zip(&fold.valid_labels) {
                let proba = pipeline.predict_proba(doc)?;
                let best = argsort_desc(&proba)[0];
                oof.predicted.push(pipeline.classes()[best].clone());
                oof.p_true.push(
                    pipeline
                        .classes()
                        .binary_search(label)
                        .map_or(0.0, |i| proba[i]),
                );
                oof.truth.push(label.clone());
            }
        }
        Ok(oof)
    }

    fn fit_full(&self, set: &TrainingSet, params: SearchParams) -> Result<(Pipeline, usize)> {
        let (docs, labels) = self.augmented_docs(set);
        let pipeline = self.fit(&docs, &labels, params)?;
        Ok((pipeline, docs.len()))
    }

    /// Fit on everything and score on the training rows themselves.
    fn resubstitution(
        &self,
        set: &TrainingSet,
        raw_docs: &[Vec<String>],
        labels: &[&str],
        classes: &[String],
        params: SearchParams,
    ) -> Result<SearchOutcome> {
        let (pipeline, training_rows) = self.fit_full(set, params)?;
        let mut predicted = Vec::with_capacity(raw_docs.len());
        let mut p_true = Vec::with_capacity(raw_docs.len());
        for (doc, label) in raw_docs.iter().zip(labels) {
            let proba = pipeline.predict_proba(doc)?;
            predicted.push(pipeline.classes()[argsort_desc(&proba)[0]].clone());
            p_true.push(pipeline.probability_of(doc, label)?);
        }
        let acc = accuracy(labels, &predicted);
        info!(accuracy = acc, "resubstitution accuracy");
        Ok(SearchOutcome {
            pipeline,
            report: TrainingReport {
                best: params,
                accuracy: acc,
                folds: 0,
                grid: Vec::new(),
                class_metrics: per_class(classes, labels, &predicted),
                confidence_profile: ConfidenceProfile::from_observations(labels, &p_true),
                rows: set.len(),
                training_rows,
            },
        })
    }
}

fn predict_label(pipeline: &Pipeline, doc: &[String]) -> Result<String> {
    let proba = pipeline.predict_proba(doc)?;
    Ok(pipeline.classes()[argsort_desc(&proba)[0]].clone())
}
