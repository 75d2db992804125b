//! Label-space presets.
//!
//! A [`Profile`] bundles everything that differs between the disease and the film
//! classifier: the normalizer lexicon, the synonym table used by the ensemble, and the
//! sample corpus used when no training data is available.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::classify::ensemble::SynonymTable;
use crate::dataset::{sample, TrainingSet};
use crate::text::{LexiconNormalizer, Normalizer, NormalizerConfig, SuffixStemmer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    Disease,
    Film,
    Custom,
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileKind::Disease => write!(f, "disease"),
            ProfileKind::Film => write!(f, "film"),
            ProfileKind::Custom => write!(f, "custom"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Profile {
    pub kind: ProfileKind,
    pub normalizer: Arc<dyn Normalizer>,
    pub synonyms: SynonymTable,
}

impl Profile {
    pub fn custom(normalizer: Arc<dyn Normalizer>, synonyms: SynonymTable) -> Self {
        Self { kind: ProfileKind::Custom, normalizer, synonyms }
    }

    pub fn from_kind(kind: ProfileKind) -> Self {
        match kind {
            ProfileKind::Disease => Self::disease(),
            ProfileKind::Film => Self::film(),
            ProfileKind::Custom => Self::custom(Arc::new(LexiconNormalizer::default()), SynonymTable::default()),
        }
    }

    /// Indonesian symptom descriptions -> disease.
    pub fn disease() -> Self {
        let mut config = NormalizerConfig {
            slang: pairs(COMMON_SLANG),
            stopwords: words(INDONESIAN_STOPWORDS),
            ..Default::default()
        };
        config.slang.extend(pairs(&[
            ("bab", "buang air besar"),
            ("bak", "buang air kecil"),
            ("pipis", "kencing"),
            ("meler", "pilek"),
            ("mampet", "tersumbat"),
        ]));
        // symptom words that collide with the generic stopword list
        config.preserve = words(&["sakit", "panas", "berat", "lama", "terus"]);

        let normalizer = LexiconNormalizer::new(&config)
            .with_stemmer(Arc::new(SuffixStemmer::new(&["nya"], 3)));

        let synonyms = SynonymTable::new()
            .with("demam", &["panas", "meriang"])
            .with("pusing", &["sakit kepala"])
            .with("pilek", &["hidung tersumbat"])
            .with("mual", &["enek"])
            .with("diare", &["mencret"])
            .with("kencing", &["buang air kecil"])
            .with("sesak", &["sulit bernapas"])
            .with("lemas", &["lelah"]);

        Self { kind: ProfileKind::Disease, normalizer: Arc::new(normalizer), synonyms }
    }

    /// Indonesian viewing preferences -> film genre.
    pub fn film() -> Self {
        let config = NormalizerConfig {
            slang: pairs(COMMON_SLANG),
            domain_terms: pairs(FILM_KEYWORDS),
            stopwords: words(INDONESIAN_STOPWORDS),
            preserve: words(&["film", "cerita", "alur"]),
        };
        let normalizer = LexiconNormalizer::new(&config);

        let synonyms = SynonymTable::new()
            .with("hantu", &["horror"])
            .with("tegang", &["thriller"])
            .with("ketawa", &["comedy"])
            .with("superhero", &["action"])
            .with("detektif", &["mystery", "crime"])
            .with("anak", &["family", "animation"])
            .with("robot", &["scifi"])
            .with("pacar", &["romance"]);

        Self { kind: ProfileKind::Film, normalizer: Arc::new(normalizer), synonyms }
    }

    /// built-in fallback corpus for this label space
    pub fn sample_corpus(&self) -> TrainingSet {
        match self.kind {
            ProfileKind::Disease => sample::disease_corpus(),
            ProfileKind::Film => sample::film_corpus(),
            ProfileKind::Custom => TrainingSet::default(),
        }
    }
}

fn pairs(src: &[(&str, &str)]) -> IndexMap<String, String> {
    src.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

fn words(src: &[&str]) -> Vec<String> {
    src.iter().map(|s| s.to_string()).collect()
}

const COMMON_SLANG: &[(&str, &str)] = &[
    ("gak", "tidak"), ("ga", "tidak"), ("ngga", "tidak"), ("nggak", "tidak"), ("gk", "tidak"),
    ("tdk", "tidak"), ("enggak", "tidak"), ("engga", "tidak"),
    ("bgt", "banget"), ("bgd", "banget"), ("baget", "banget"),
    ("yg", "yang"), ("dgn", "dengan"), ("utk", "untuk"), ("pd", "pada"),
    ("dr", "dari"), ("dlm", "dalam"), ("jg", "juga"), ("trs", "terus"),
    ("krn", "karena"), ("karna", "karena"), ("krna", "karena"),
    ("udh", "sudah"), ("udah", "sudah"), ("dah", "sudah"), ("sdh", "sudah"),
    ("blm", "belum"), ("blum", "belum"), ("belom", "belum"),
    ("tp", "tapi"), ("tpi", "tapi"), ("tetapi", "tapi"),
    ("kmrn", "kemarin"), ("bs", "bisa"), ("bsa", "bisa"), ("klo", "kalau"), ("kl", "kalau"),
];

const INDONESIAN_STOPWORDS: &[&str] = &[
    "dan", "atau", "yang", "di", "ke", "dari", "pada", "dalam", "untuk", "dengan",
    "ini", "itu", "saya", "aku", "kamu", "dia", "kami", "kita", "mereka",
    "ada", "adalah", "akan", "sudah", "belum", "juga", "karena", "kalau", "tapi",
    "sangat", "banget", "sekali", "terus", "lagi", "bisa", "ingin", "mau", "suka",
    "seperti", "saat", "ketika", "sejak", "hari", "sering", "kadang", "sedang",
    "tidak", "bukan", "punya", "merasa", "rasa", "terasa", "mengalami", "sakit",
    "panas", "berat", "lama", "nya", "lah", "kah", "pun", "yg",
];

const FILM_KEYWORDS: &[(&str, &str)] = &[
    ("aksi", "action"), ("laga", "action"),
    ("petualangan", "adventure"),
    ("animasi", "animation"), ("kartun", "animation"),
    ("komedi", "comedy"), ("lucu", "comedy"),
    ("kriminal", "crime"), ("kejahatan", "crime"),
    ("dokumenter", "documentary"),
    ("keluarga", "family"),
    ("fantasi", "fantasy"),
    ("horor", "horror"), ("seram", "horror"), ("menakutkan", "horror"),
    ("musik", "musical"),
    ("misteri", "mystery"), ("misterius", "mystery"),
    ("romantis", "romance"), ("cinta", "romance"),
    ("menegangkan", "thriller"),
    ("perang", "war"),
    ("koboi", "western"),
    ("movie", "film"), ("movies", "film"),
    ("plot", "alur"),
    ("scifi", "scifi"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disease_profile_keeps_symptom_words() {
        let profile = Profile::disease();
        let tokens = profile.normalizer.normalize("Saya demam dan sakit kepala, gak bisa tidur");
        assert_eq!(tokens, vec!["demam", "sakit", "kepala", "tidur"]);
    }

    #[test]
    fn disease_profile_expands_abbreviations() {
        let tokens = Profile::disease().normalizer.normalize("BAB cair terus");
        assert_eq!(tokens, vec!["buang", "air", "besar", "cair", "terus"]);
    }

    #[test]
    fn film_profile_canonicalises_genres() {
        let tokens = Profile::film().normalizer.normalize("Aku suka film horor yang lucu");
        assert_eq!(tokens, vec!["film", "horror", "comedy"]);
    }

    #[test]
    fn sample_corpora_are_not_empty() {
        assert!(!Profile::disease().sample_corpus().is_empty());
        assert!(!Profile::film().sample_corpus().is_empty());
        assert!(Profile::from_kind(ProfileKind::Custom).sample_corpus().is_empty());
    }
}
