//! Cosine similarity and the single ranking routine used by every recommender.

use serde::Serialize;

use crate::text::tfidf::{SparseVector, StopWords, TfidfVectorizer};

/// Cosine similarity of two sparse vectors. Zero-norm input yields 0.0.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let (mut i, mut j) = (0, 0);
    let mut dot = 0.0;
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                dot += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }

    let norm_a = a.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Cosine similarity of two dense embeddings. Length mismatch or zero norm yields 0.0.
pub fn cosine_dense(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RankOptions {
    pub stop_words: StopWords,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredDocument {
    /// Position of the document in the ranked corpus.
    pub index: usize,
    pub score: f64,
}

/// Fits TF-IDF on `corpus`, scores each document against `query`, and returns
/// every document ordered by score descending. Equal scores keep corpus order.
pub fn rank_documents<S: AsRef<str>>(
    corpus: &[S],
    query: &str,
    options: &RankOptions,
) -> Vec<ScoredDocument> {
    let mut vectorizer = TfidfVectorizer::new(options.stop_words);
    let matrix = vectorizer.fit_transform(corpus);
    let query_vector = vectorizer.transform(query);

    let mut scored: Vec<ScoredDocument> = matrix
        .iter()
        .enumerate()
        .map(|(index, doc)| ScoredDocument {
            index,
            score: cosine_similarity(&query_vector, doc),
        })
        .collect();

    // sort_by is stable, so ties stay in corpus order
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

/// Keeps at most `n` ranked documents that pass `keep`.
pub fn top_n<F>(scored: &[ScoredDocument], n: usize, mut keep: F) -> Vec<ScoredDocument>
where
    F: FnMut(&ScoredDocument) -> bool,
{
    scored.iter().filter(|s| keep(s)).take(n).copied().collect()
}

/// Rescales scores to [0, 1]. A constant input maps to 1.0 when positive, else 0.0.
pub fn min_max_normalize(scores: &[f64]) -> Vec<f64> {
    let Some(min) = scores.iter().copied().reduce(f64::min) else {
        return Vec::new();
    };
    let max = scores.iter().copied().fold(min, f64::max);
    let range = max - min;

    if range == 0.0 {
        let constant = if max > 0.0 { 1.0 } else { 0.0 };
        return vec![constant; scores.len()];
    }
    scores.iter().map(|s| (s - min) / range).collect()
}
