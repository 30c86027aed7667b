use std::collections::{BTreeMap, BTreeSet, HashMap};

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::tokenize;
use crate::{MlErr, Result, dataset::SparseRow};

/// Converts documents into L2-normalized TF-IDF feature vectors.
///
/// The inverse document frequency is smoothed as if an extra document containing every term
/// had been seen: `idf(t) = ln((1 + n) / (1 + df(t))) + 1`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    vocabulary: BTreeMap<String, usize>,
    idf: Array1<f32>,
}

impl TfidfVectorizer {
    /// Returns a new unfitted `TfidfVectorizer`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Learns the vocabulary and the idf weights of the given documents.
    ///
    /// # Arguments
    /// * `docs` - The training documents.
    ///
    /// # Returns
    /// `EmptyDataset` if there are no documents or `EmptyVocabulary` if none of them yields
    /// a single token.
    pub fn fit<S: AsRef<str>>(&mut self, docs: &[S]) -> Result<()> {
        if docs.is_empty() {
            return Err(MlErr::EmptyDataset);
        }

        let mut df: BTreeMap<String, usize> = BTreeMap::new();
        for doc in docs {
            let terms: BTreeSet<String> = tokenize(doc.as_ref()).collect();
            for term in terms {
                *df.entry(term).or_default() += 1;
            }
        }

        if df.is_empty() {
            return Err(MlErr::EmptyVocabulary);
        }

        let n = docs.len() as f32;
        let idf = df
            .values()
            .map(|&df| ((1.0 + n) / (1.0 + df as f32)).ln() + 1.0)
            .collect();

        self.vocabulary = df
            .into_keys()
            .enumerate()
            .map(|(col, term)| (term, col))
            .collect();
        self.idf = idf;

        Ok(())
    }

    /// Fits the vectorizer and transforms the very same documents.
    pub fn fit_transform<S: AsRef<str>>(&mut self, docs: &[S]) -> Result<Vec<SparseRow>> {
        self.fit(docs)?;
        Ok(self.transform(docs))
    }

    /// Transforms documents into TF-IDF vectors. Terms outside the vocabulary are ignored.
    pub fn transform<S: AsRef<str>>(&self, docs: &[S]) -> Vec<SparseRow> {
        docs.iter().map(|doc| self.transform_one(doc.as_ref())).collect()
    }

    /// Transforms a single document into its TF-IDF vector.
    pub fn transform_one(&self, doc: &str) -> SparseRow {
        let mut counts: HashMap<usize, f32> = HashMap::new();
        for term in tokenize(doc) {
            if let Some(&col) = self.vocabulary.get(&term) {
                *counts.entry(col).or_default() += 1.0;
            }
        }

        let entries = counts
            .into_iter()
            .map(|(col, tf)| (col, tf * self.idf[col]))
            .collect();

        let mut row = SparseRow::new(entries);
        let norm = row.squared_norm().sqrt();
        if norm > 0.0 {
            row.scale(1.0 / norm);
        }

        row
    }

    /// The dimension of the produced vectors.
    pub fn n_features(&self) -> usize {
        self.vocabulary.len()
    }

    /// The learned term to column mapping.
    pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
        &self.vocabulary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    #[test]
    fn test_fit_builds_sorted_vocabulary() {
        let mut vectorizer = TfidfVectorizer::new();
        vectorizer.fit(&["the cat", "the dog"]).unwrap();

        let vocab: Vec<_> = vectorizer.vocabulary().iter().collect();
        assert_eq!(
            vocab,
            [
                (&"cat".to_string(), &0),
                (&"dog".to_string(), &1),
                (&"the".to_string(), &2)
            ]
        );
    }

    #[test]
    fn test_smoothed_idf_and_l2_norm() {
        let mut vectorizer = TfidfVectorizer::new();
        let rows = vectorizer.fit_transform(&["the cat", "the dog"]).unwrap();

        // cat: idf = ln(3 / 2) + 1, the: idf = ln(3 / 3) + 1 = 1.
        let cat = (1.5f32).ln() + 1.0;
        let norm = (cat * cat + 1.0).sqrt();

        let entries = rows[0].entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, 0);
        assert!((entries[0].1 - cat / norm).abs() < EPS);
        assert_eq!(entries[1].0, 2);
        assert!((entries[1].1 - 1.0 / norm).abs() < EPS);
        assert!((rows[1].squared_norm() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_transform_ignores_unknown_terms() {
        let mut vectorizer = TfidfVectorizer::new();
        vectorizer.fit(&["hola mundo"]).unwrap();

        assert!(vectorizer.transform_one("adios amigos").is_empty());
        assert_eq!(vectorizer.transform_one("hola extraño").entries().len(), 1);
    }

    #[test]
    fn test_repeated_terms_count_twice() {
        let mut vectorizer = TfidfVectorizer::new();
        vectorizer.fit(&["uno dos", "uno"]).unwrap();

        let row = vectorizer.transform_one("dos dos uno");
        let dos = row.entries()[0].1;
        let uno = row.entries()[1].1;
        let idf_dos = (3.0f32 / 2.0).ln() + 1.0;
        assert!((dos / uno - 2.0 * idf_dos).abs() < 1e-5);
    }

    #[test]
    fn test_fit_errors() {
        let mut vectorizer = TfidfVectorizer::new();
        let empty: [&str; 0] = [];
        assert_eq!(vectorizer.fit(&empty), Err(MlErr::EmptyDataset));
        assert_eq!(vectorizer.fit(&["a", "b c"]), Err(MlErr::EmptyVocabulary));
    }
}
