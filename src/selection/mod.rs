//! Model selection: stratified folds, metrics and the hyperparameter grid search.

pub mod kfold;
pub mod metrics;
pub mod report;
pub mod search;

pub use kfold::StratifiedKFold;
pub use report::{ConfidenceProfile, GridScore, SearchParams, TrainingReport};
pub use search::{param_grid, GridSearch, SearchOutcome};
