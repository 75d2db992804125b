use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Expand a token sequence into its n-grams of order `1..=max_n`.
/// Tokens of an n-gram are joined with a single space.
///
/// Order: all unigrams left to right, then all bigrams, and so on.
pub fn ngrams<T: AsRef<str>>(tokens: &[T], max_n: usize) -> Vec<String> {
    let mut out = Vec::new();
    for n in 1..=max_n.max(1) {
        if n > tokens.len() {
            break;
        }
        for window in tokens.windows(n) {
            let mut term = String::with_capacity(window.iter().map(|t| t.as_ref().len() + 1).sum());
            for (i, tok) in window.iter().enumerate() {
                if i > 0 {
                    term.push(' ');
                }
                term.push_str(tok.as_ref());
            }
            out.push(term);
        }
    }
    out
}

///  TokenFrequency
/// Counts token occurrences inside one document.
/// Tokens keep first-insertion order, which keeps every derived view deterministic.
///
/// # Examples
/// ```
/// use tf_idf_classifier::TokenFrequency;
/// let mut token_freq = TokenFrequency::new();
/// token_freq.add_token("demam");
/// token_freq.add_token("batuk");
/// token_freq.add_token("demam");
/// assert_eq!(token_freq.token_count("demam"), 2);
/// assert_eq!(token_freq.token_sum(), 3);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TokenFrequency {
    #[serde(with = "indexmap::map::serde_seq")]
    token_count: IndexMap<String, u32>,
    total_token_count: u64,
}

impl TokenFrequency {
    pub fn new() -> Self {
        TokenFrequency {
            token_count: IndexMap::new(),
            total_token_count: 0,
        }
    }

    /// Count every n-gram (order `1..=max_n`) of `tokens`.
    pub fn from_ngrams<T: AsRef<str>>(tokens: &[T], max_n: usize) -> Self {
        let mut freq = Self::new();
        freq.add_tokens(&ngrams(tokens, max_n));
        freq
    }

    #[inline]
    pub fn add_token(&mut self, token: &str) -> &mut Self {
        let count = self.token_count.entry(token.to_string()).or_insert(0);
        *count += 1;
        self.total_token_count += 1;
        self
    }

    #[inline]
    pub fn add_tokens<T>(&mut self, tokens: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for token in tokens {
            self.add_token(token.as_ref());
        }
        self
    }

    #[inline]
    pub fn token_count(&self, token: &str) -> u32 {
        self.token_count.get(token).copied().unwrap_or(0)
    }

    /// total number of counted tokens (with repetition)
    #[inline]
    pub fn token_sum(&self) -> u64 {
        self.total_token_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.token_count.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.token_count.iter().map(|(t, c)| (t.as_str(), *c))
    }
}
