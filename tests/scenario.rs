use serde::Serialize;
use tf_idf_classifier::classify::ModelSource;
use tf_idf_classifier::store::MAGIC;
use tf_idf_classifier::{
    Classifier, ClassifierConfig, ClassifierError, Profile, TrainingSet, Verdict,
};

fn quick_config() -> ClassifierConfig {
    ClassifierConfig::from_toml_str(
        r#"
        [search]
        folds = 3
        max_features = [5000]
        ngram_max = [2]
        alpha = [0.1, 1.0]
        "#,
    )
    .unwrap()
}

fn flu_diabetes() -> TrainingSet {
    TrainingSet::from_pairs(&[
        ("demam, batuk, pilek", "Flu"),
        ("demam tinggi dan batuk", "Flu"),
        ("pilek dan bersin, sedikit demam", "Flu"),
        ("batuk pilek berhari-hari", "Flu"),
        ("badan demam, hidung pilek, batuk kering", "Flu"),
        ("sering kencing, haus", "Diabetes"),
        ("sering haus dan kencing malam hari", "Diabetes"),
        ("kencing terus, selalu haus", "Diabetes"),
        ("haus berlebihan, sering kencing", "Diabetes"),
        ("sering buang air kecil dan haus", "Diabetes"),
    ])
}

fn trained_on_sample() -> Classifier {
    let classifier = Classifier::new(quick_config(), Profile::disease()).unwrap();
    classifier.train(&Profile::disease().sample_corpus()).unwrap();
    classifier
}

#[test]
fn flu_and_diabetes_are_told_apart() {
    let classifier = Classifier::new(quick_config(), Profile::disease()).unwrap();
    let accuracy = classifier.train(&flu_diabetes()).unwrap();
    assert!(accuracy > 0.9);

    let prediction = classifier.predict("demam dan pilek").unwrap();
    assert_eq!(prediction.label, "Flu");
    assert!(prediction.confidence > 0.6, "{prediction:?}");
    assert_eq!(prediction.verdict, Verdict::Confident);

    assert_eq!(classifier.predict("sering haus, kencing terus").unwrap().label, "Diabetes");
}

#[test]
fn single_label_corpus_always_predicts_it() {
    let classifier = Classifier::new(quick_config(), Profile::disease()).unwrap();
    classifier
        .train(&TrainingSet::from_pairs(&[("demam pilek", "Flu"), ("batuk bersin", "Flu")]))
        .unwrap();
    for text in ["demam", "haus kencing", ""] {
        let prediction = classifier.predict(text).unwrap();
        assert_eq!(prediction.label, "Flu");
        assert_eq!(prediction.confidence, 1.0);
        assert_eq!(prediction.shortlist, vec![("Flu".to_string(), 1.0)]);
    }
}

#[test]
fn distributions_sum_to_one_and_shortlists_are_sorted() {
    let classifier = trained_on_sample();
    for text in [
        "perut kembung dan mual setelah makan",
        "sakit kepala sebelah, sensitif cahaya",
        "xyz qwerty",
        "",
    ] {
        let prediction = classifier.predict(text).unwrap();
        let sum: f64 = prediction.distribution.iter().map(|(_, p)| p).sum();
        assert!((sum - 1.0).abs() < 1e-6, "{text}: {sum}");
        assert!(prediction.shortlist.len() <= 3);
        assert!(prediction.shortlist.windows(2).all(|w| w[0].1 >= w[1].1));
        assert_eq!(prediction.shortlist[0].1, prediction.confidence);
    }
}

#[test]
fn predictions_are_deterministic() {
    let a = trained_on_sample();
    let b = trained_on_sample();
    let text = "nyeri sendi, bintik merah, demam tinggi";
    assert_eq!(a.predict(text).unwrap(), a.predict(text).unwrap());
    assert_eq!(a.predict(text).unwrap(), b.predict(text).unwrap());
    assert_eq!(a.confidence_profile().unwrap(), b.confidence_profile().unwrap());
}

#[test]
fn save_and_load_predict_identically() {
    let classifier = trained_on_sample();
    let dir = tempfile::tempdir().unwrap();
    let path = classifier.save(dir.path().join("disease.cbor")).unwrap();

    let restored = Classifier::new(quick_config(), Profile::disease()).unwrap();
    restored.load(&path).unwrap();
    for text in ["demam dan pilek", "sesak napas malam hari", "bab cair terus", "haus"] {
        assert_eq!(classifier.predict(text).unwrap(), restored.predict(text).unwrap());
    }
    assert_eq!(
        classifier.examples_for("Maag").unwrap(),
        restored.examples_for("Maag").unwrap()
    );
}

#[test]
fn label_order_survives_save_and_load() {
    let classifier = trained_on_sample();
    let dir = tempfile::tempdir().unwrap();
    let path = classifier.save(dir.path().join("ordered.cbor")).unwrap();
    let restored = Classifier::new(quick_config(), Profile::disease()).unwrap();
    restored.load(&path).unwrap();

    let before = classifier.confidence_profile().unwrap();
    let after = restored.confidence_profile().unwrap();
    let labels = |p: &tf_idf_classifier::ConfidenceProfile| -> Vec<String> {
        p.iter().map(|(l, _)| l.to_string()).collect()
    };
    assert_eq!(labels(&after), labels(&before));
    let mut sorted = labels(&before);
    sorted.sort();
    assert_eq!(labels(&after), sorted);

    let example_keys = |c: &Classifier| -> Vec<String> {
        c.model().unwrap().examples.keys().cloned().collect()
    };
    assert_eq!(example_keys(&restored), example_keys(&classifier));
}

#[test]
fn failed_retrain_keeps_the_current_model() {
    let classifier = trained_on_sample();
    let before = classifier.predict("perut kembung dan mual").unwrap();
    let profile_before = classifier.confidence_profile().unwrap();

    let err = classifier.train(&TrainingSet::default()).unwrap_err();
    assert!(matches!(err, ClassifierError::EmptyOrMissingCorpus(_)), "{err:?}");
    assert_eq!(classifier.predict("perut kembung dan mual").unwrap(), before);
    assert_eq!(classifier.confidence_profile().unwrap(), profile_before);
}

#[derive(Serialize)]
struct ForeignEnvelope {
    magic: &'static str,
    version: u32,
    payload: Vec<u8>,
}

#[test]
fn incompatible_model_keeps_the_current_one() {
    let classifier = trained_on_sample();
    let before = classifier.predict("mual muntah").unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.cbor");
    let blob = ForeignEnvelope { magic: MAGIC, version: 99, payload: vec![1, 2, 3] };
    std::fs::write(&path, serde_cbor::to_vec(&blob).unwrap()).unwrap();

    let err = classifier.load(&path).unwrap_err();
    assert!(matches!(err, ClassifierError::IncompatibleModelVersion { .. }), "{err:?}");
    assert_eq!(classifier.predict("mual muntah").unwrap(), before);
}

#[test]
fn load_or_train_trains_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.cbor");
    let corpus = flu_diabetes();

    let first = Classifier::new(quick_config(), Profile::disease()).unwrap();
    assert!(matches!(first.load_or_train(&path, &corpus).unwrap(), ModelSource::Trained(_)));
    assert!(path.exists());

    let second = Classifier::new(quick_config(), Profile::disease()).unwrap();
    assert_eq!(second.load_or_train(&path, &corpus).unwrap(), ModelSource::Loaded);
    assert_eq!(second.predict("demam").unwrap(), first.predict("demam").unwrap());
}

#[test]
fn film_profile_with_multi_label_rows() {
    let mut corpus = Profile::film().sample_corpus();
    corpus.push(tf_idf_classifier::TrainingExample::new("hantu yang lucu dan kocak", "Horror|Comedy"));
    let corpus = corpus.split_multi_label('|');
    assert_eq!(corpus.labels().len(), 6);

    let classifier = Classifier::new(quick_config(), Profile::film()).unwrap();
    classifier.train(&corpus).unwrap();
    let prediction = classifier.predict("film horor dengan hantu dan setan").unwrap();
    assert_eq!(prediction.shortlist[0].0, "Horror");
}
