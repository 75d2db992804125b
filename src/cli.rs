//! CLI command definitions and handlers

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use tf_idf_classifier::classify::ModelSource;
use tf_idf_classifier::text::profile::ProfileKind;
use tf_idf_classifier::{Classifier, ClassifierConfig, Prediction, Profile, TrainingReport, TrainingSet};

fn parse_profile(s: &str) -> Result<ProfileKind, String> {
    match s {
        "disease" => Ok(ProfileKind::Disease),
        "film" => Ok(ProfileKind::Film),
        other => Err(format!("unknown profile '{other}' (expected disease or film)")),
    }
}

/// Classify symptom descriptions into diseases or viewing preferences into film genres.
#[derive(Parser, Debug)]
#[command(name = "tfidf-classifier", version)]
#[command(after_help = "\
Examples:
  tfidf-classifier train --data symptoms.json
  tfidf-classifier predict \"demam tinggi dan pilek\"
  tfidf-classifier --profile film predict \"suka film yang seram\" --json
  tfidf-classifier inspect")]
pub struct Cli {
    /// Label space: disease or film
    #[arg(long, global = true, default_value = "disease", value_parser = parse_profile)]
    pub profile: ProfileKind,

    /// TOML config file (defaults are used for missing keys)
    #[arg(long, global = true, env = "TFIDF_CLASSIFIER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Model file
    #[arg(long, short = 'm', global = true, default_value = "model.cbor")]
    pub model: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train a model and save it
    Train {
        /// JSON corpus; the built-in sample corpus is used when missing
        #[arg(long, short = 'd')]
        data: Option<PathBuf>,

        /// Split labels like "Action|Comedy" into one row per label
        #[arg(long)]
        multi_label_sep: Option<char>,

        /// Print the training report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify text (trains first when no model file exists)
    Predict {
        /// Text to classify
        #[arg(required = true)]
        text: Vec<String>,

        /// JSON corpus used if a model has to be trained
        #[arg(long, short = 'd')]
        data: Option<PathBuf>,

        /// Print the prediction as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show what a saved model contains
    Inspect,
}

pub fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ClassifierConfig::from_path(path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => ClassifierConfig::default(),
    };
    let classifier = Classifier::new(config, Profile::from_kind(cli.profile))?;

    match cli.command {
        Commands::Train { data, multi_label_sep, json } => {
            let mut set = corpus(&classifier, data.as_deref())?;
            if let Some(sep) = multi_label_sep {
                set = set.split_multi_label(sep);
            }
            let report = classifier.train_with_report(&set)?;
            let path = classifier.save(&cli.model)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
                println!("saved to {}", path.display());
            }
        }
        Commands::Predict { text, data, json } => {
            let set = corpus(&classifier, data.as_deref())?;
            if let ModelSource::Trained(accuracy) = classifier.load_or_train(&cli.model, &set)? {
                eprintln!("trained new model (accuracy {:.1}%)", accuracy * 100.0);
            }
            let prediction = classifier.predict(&text.join(" "))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&prediction)?);
            } else {
                print_prediction(&prediction);
            }
        }
        Commands::Inspect => {
            classifier
                .load(&cli.model)
                .with_context(|| format!("failed to load {}", cli.model.display()))?;
            let model = classifier.model()?;
            println!("profile:   {}", model.profile);
            println!("accuracy:  {:.1}%", model.accuracy * 100.0);
            println!(
                "params:    max_features={} ngram_max={} alpha={}",
                model.params.max_features, model.params.ngram_max, model.params.alpha
            );
            println!("vocab:     {}", model.pipeline.vectorizer.vocab_size());
            println!("labels:");
            for (label, baseline) in model.confidence_profile.iter() {
                let examples = model.examples.get(label).map_or(0, Vec::len);
                println!("  {label:<24} baseline {baseline:.3}  examples {examples}");
            }
        }
    }
    Ok(())
}

fn corpus(classifier: &Classifier, data: Option<&Path>) -> Result<TrainingSet> {
    Ok(match data {
        Some(path) => TrainingSet::load_or_sample(path, classifier.profile())?,
        None => classifier.profile().sample_corpus(),
    })
}

fn print_report(report: &TrainingReport) {
    if report.cv_skipped() {
        println!("cross validation skipped; resubstitution accuracy {:.1}%", report.accuracy * 100.0);
    } else {
        println!("{}-fold accuracy {:.1}%", report.folds, report.accuracy * 100.0);
    }
    println!(
        "best: max_features={} ngram_max={} alpha={}",
        report.best.max_features, report.best.ngram_max, report.best.alpha
    );
    for m in &report.class_metrics {
        println!(
            "  {:<24} p={:.2} r={:.2} f1={:.2} n={}",
            m.label, m.precision, m.recall, m.f1, m.support
        );
    }
}

fn print_prediction(prediction: &Prediction) {
    if prediction.is_unknown() {
        println!("no label is likely enough ({:.1}% at best)", prediction.confidence * 100.0);
        for (label, p) in &prediction.shortlist {
            println!("  {label:<24} {:.1}%", p * 100.0);
        }
        return;
    }
    println!(
        "{} ({:.1}%, {})",
        prediction.label,
        prediction.confidence * 100.0,
        prediction.verdict
    );
    for (label, p) in &prediction.shortlist {
        println!("  {label:<24} {:.1}%", p * 100.0);
    }
}
