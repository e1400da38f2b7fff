
use std::collections::{BTreeMap, HashSet};

use super::lexicon::terms;


/// Smooth-idf TF-IDF model fitted on a small batch of documents.
///
/// Rows are L2-normalized, so the cosine of two rows is their dot product.
#[derive(Debug, Clone)]
pub struct TfidfModel {
    vocabulary: BTreeMap<String, usize>,
    rows: Vec<Vec<f64>>,
}

impl TfidfModel {
    /// Fit on `documents` and vectorize them. Returns `None` when the
    /// combined vocabulary has fewer than `min_vocabulary` terms.
    pub fn fit_transform<S: AsRef<str>>(documents: &[S], min_vocabulary: usize) -> Option<Self> {
        let tokenized: Vec<Vec<&str>> = documents.iter().map(|d| terms(d.as_ref())).collect();

        let vocabulary: BTreeMap<String, usize> = tokenized
            .iter()
            .flatten()
            .map(|t| t.to_string())
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term, idx))
            .collect();

        if vocabulary.len() < min_vocabulary.max(1) {
            return None;
        }

        let n_docs = documents.len() as f64;
        let mut doc_freq = vec![0usize; vocabulary.len()];
        for doc in &tokenized {
            let unique: HashSet<&str> = doc.iter().copied().collect();
            for term in unique {
                if let Some(&idx) = vocabulary.get(term) {
                    doc_freq[idx] += 1;
                }
            }
        }

        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let rows = tokenized
            .iter()
            .map(|doc| {
                let mut row = vec![0.0; vocabulary.len()];
                for term in doc {
                    if let Some(&idx) = vocabulary.get(*term) {
                        row[idx] += 1.0;
                    }
                }
                for (value, weight) in row.iter_mut().zip(&idf) {
                    *value *= weight;
                }
                l2_normalize(&mut row);
                row
            })
            .collect();

        Some(Self { vocabulary, rows })
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Cosine similarity between two fitted documents; 0 for empty rows.
    pub fn similarity(&self, left: usize, right: usize) -> f64 {
        match (self.row(left), self.row(right)) {
            (Some(a), Some(b)) => dot(a, b),
            _ => 0.0,
        }
    }
}


fn l2_normalize(row: &mut [f64]) {
    let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        for value in row.iter_mut() {
            *value /= norm;
        }
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}


/// Number of `(left, right)` pairs whose TF-IDF cosine similarity exceeds
/// `threshold`, with the model fitted on both sides together.
pub fn count_similar_pairs<S: AsRef<str>>(left: &[S], right: &[S], threshold: f64) -> usize {
    if left.is_empty() || right.is_empty() {
        return 0;
    }

    let documents: Vec<&str> = left.iter().chain(right).map(|s| s.as_ref()).collect();
    let Some(model) = TfidfModel::fit_transform(&documents, 2) else {
        return 0;
    };

    let offset = left.len();
    (0..left.len())
        .flat_map(|i| (0..right.len()).map(move |j| (i, offset + j)))
        .filter(|&(i, j)| model.similarity(i, j) > threshold)
        .count()
}
