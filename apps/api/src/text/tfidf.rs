//! TF-IDF vectorizer with smooth idf and L2-normalized sparse output.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::text::stop_words::is_english_stop_word;

/// Sparse vector: `(column, weight)` pairs sorted by column.
pub type SparseVector = Vec<(usize, f64)>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StopWords {
    #[default]
    None,
    English,
}

/// Lowercases and splits on anything that is not a word character.
/// Runs shorter than two characters are dropped.
pub fn tokenize(text: &str, stop_words: StopWords) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    let flush = |current: &mut String, tokens: &mut Vec<String>| {
        if current.chars().count() >= 2
            && !(stop_words == StopWords::English && is_english_stop_word(current))
        {
            tokens.push(std::mem::take(current));
        } else {
            current.clear();
        }
    };

    for ch in text.chars() {
        if ch.is_alphanumeric() || ch == '_' {
            current.extend(ch.to_lowercase());
        } else if !current.is_empty() {
            flush(&mut current, &mut tokens);
        }
    }
    if !current.is_empty() {
        flush(&mut current, &mut tokens);
    }

    tokens
}

#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer {
    stop_words: StopWords,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn new(stop_words: StopWords) -> Self {
        Self {
            stop_words,
            ..Self::default()
        }
    }

    /// Learns the vocabulary and idf weights from `corpus`.
    /// Columns are assigned in alphabetical term order.
    pub fn fit<S: AsRef<str>>(&mut self, corpus: &[S]) -> &mut Self {
        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        for doc in corpus {
            let unique: BTreeSet<String> = tokenize(doc.as_ref(), self.stop_words)
                .into_iter()
                .collect();
            for term in unique {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let n = corpus.len() as f64;
        self.vocabulary = HashMap::with_capacity(document_frequency.len());
        self.idf = Vec::with_capacity(document_frequency.len());
        for (column, (term, df)) in document_frequency.into_iter().enumerate() {
            self.idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
            self.vocabulary.insert(term, column);
        }
        self
    }

    /// Term counts weighted by idf, L2-normalized. Unknown terms are ignored.
    pub fn transform(&self, doc: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in tokenize(doc, self.stop_words) {
            if let Some(&column) = self.vocabulary.get(&token) {
                *counts.entry(column).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(column, tf)| (column, tf * self.idf[column]))
            .collect();

        let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in vector.iter_mut() {
                *w /= norm;
            }
        }
        vector
    }

    pub fn fit_transform<S: AsRef<str>>(&mut self, corpus: &[S]) -> Vec<SparseVector> {
        self.fit(corpus);
        corpus.iter().map(|d| self.transform(d.as_ref())).collect()
    }

    #[cfg(test)]
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    #[cfg(test)]
    pub fn column_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    #[cfg(test)]
    pub fn idf_of(&self, term: &str) -> Option<f64> {
        self.column_of(term).map(|c| self.idf[c])
    }
}
