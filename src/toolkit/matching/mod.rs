

pub mod category;
pub mod lexicon;
pub mod normalizer;
pub mod scorer;
pub mod tfidf;

pub use category::{CategoryMatch, CategoryMatcher};
pub use lexicon::{Lexicon, LEXICON};
pub use normalizer::TextNormalizer;
pub use scorer::{ProfileScorer, ScoreBreakdown, ScoringConfig, SimilarityScore};
pub use tfidf::{count_similar_pairs, TfidfModel};
