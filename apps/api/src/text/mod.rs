//! Text vectorization and similarity ranking shared by both recommenders.

pub mod similarity;
pub mod stop_words;
pub mod tfidf;
