
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::normalizer::TextNormalizer;
use super::tfidf::count_similar_pairs;


#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMatch {
    /// Normalized items present on both sides.
    pub exact: usize,
    /// Cross pairs of leftover items above the similarity threshold.
    pub near: usize,
}

impl CategoryMatch {
    pub fn points(&self) -> usize {
        self.exact + self.near
    }
}


/// Compares two item lists of one interest category.
#[derive(Clone, Copy)]
pub struct CategoryMatcher {
    normalizer: TextNormalizer,
    near_match_threshold: f64,
}

impl CategoryMatcher {
    pub fn new(normalizer: TextNormalizer, near_match_threshold: f64) -> Self {
        Self {
            normalizer,
            near_match_threshold,
        }
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    pub fn threshold(&self) -> f64 {
        self.near_match_threshold
    }

    fn normalized_set<S: AsRef<str>>(&self, items: &[S]) -> BTreeSet<String> {
        items
            .iter()
            .map(|item| self.normalizer.normalize(item.as_ref()))
            .collect()
    }

    pub fn compare<S: AsRef<str>>(&self, left: &[S], right: &[S]) -> CategoryMatch {
        if left.is_empty() || right.is_empty() {
            return CategoryMatch::default();
        }

        let left = self.normalized_set(left);
        let right = self.normalized_set(right);

        let exact = left.intersection(&right).count();

        let remaining_left: Vec<&str> = left.difference(&right).map(String::as_str).collect();
        let remaining_right: Vec<&str> = right.difference(&left).map(String::as_str).collect();

        let near = count_similar_pairs(&remaining_left, &remaining_right, self.near_match_threshold);

        CategoryMatch { exact, near }
    }
}
