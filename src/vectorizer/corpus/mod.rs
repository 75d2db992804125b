use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::vectorizer::token::TokenFrequency;

/// Document statistics of a training corpus.
/// It does not keep document text; it only tracks:
/// - the number of documents
/// - for each term, the number of documents containing it (document frequency)
/// - for each term, its total count over all documents
///
/// Base data for IDF and for vocabulary pruning.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Corpus {
    doc_num: u64,
    /// term -> (document frequency, total count)
    #[serde(with = "indexmap::map::serde_seq")]
    term_counts: IndexMap<String, (u64, u64)>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one document's term frequencies.
    pub fn add_doc(&mut self, doc: &TokenFrequency) {
        self.doc_num += 1;
        for (term, count) in doc.iter() {
            let entry = self.term_counts.entry(term.to_string()).or_insert((0, 0));
            entry.0 += 1;
            entry.1 += count as u64;
        }
    }

    #[inline]
    pub fn get_doc_num(&self) -> u64 {
        self.doc_num
    }

    /// number of documents containing `term`
    #[inline]
    pub fn get_term_count(&self, term: &str) -> u64 {
        self.term_counts.get(term).map_or(0, |(df, _)| *df)
    }

    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.term_counts.len()
    }

    /// iterate (term, document frequency, total count) in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64, u64)> + '_ {
        self.term_counts.iter().map(|(t, (df, total))| (t.as_str(), *df, *total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_documents_not_occurrences() {
        let mut corpus = Corpus::new();
        let mut a = TokenFrequency::new();
        a.add_tokens(&["demam", "demam", "batuk"]);
        let mut b = TokenFrequency::new();
        b.add_tokens(&["demam"]);
        corpus.add_doc(&a);
        corpus.add_doc(&b);

        assert_eq!(corpus.get_doc_num(), 2);
        assert_eq!(corpus.get_term_count("demam"), 2);
        let demam = corpus.iter().find(|(t, _, _)| *t == "demam").unwrap();
        assert_eq!(demam, ("demam", 2, 3));
        assert_eq!(corpus.get_term_count("batuk"), 1);
        assert_eq!(corpus.get_term_count("pilek"), 0);
        assert_eq!(corpus.vocab_size(), 2);
    }
}
