use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{MlErr, Result};

/// A sparse feature vector, a list of `(column, value)` pairs sorted by column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseRow {
    entries: Vec<(usize, f32)>,
}

impl SparseRow {
    /// Creates a new `SparseRow`.
    ///
    /// # Arguments
    /// * `entries` - The non zero `(column, value)` pairs, in any order.
    ///
    /// # Returns
    /// A new `SparseRow` instance with its entries sorted by column.
    pub fn new(mut entries: Vec<(usize, f32)>) -> Self {
        entries.sort_unstable_by_key(|&(col, _)| col);
        Self { entries }
    }

    pub fn entries(&self) -> &[(usize, f32)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the squared euclidean norm of this row.
    pub fn squared_norm(&self) -> f32 {
        self.entries.iter().map(|(_, v)| v * v).sum()
    }

    /// Scales every value of this row in place.
    pub fn scale(&mut self, factor: f32) {
        self.entries.iter_mut().for_each(|(_, v)| *v *= factor);
    }

    /// Computes the dot product against a dense vector.
    ///
    /// Columns beyond the length of `dense` are ignored.
    pub fn dot(&self, dense: &[f32]) -> f32 {
        self.entries
            .iter()
            .filter_map(|&(col, v)| dense.get(col).map(|w| w * v))
            .sum()
    }

    /// Adds `alpha * self` to the dense vector `dense`.
    pub fn axpy(&self, alpha: f32, dense: &mut [f32]) {
        for &(col, v) in &self.entries {
            if let Some(w) = dense.get_mut(col) {
                *w += alpha * v;
            }
        }
    }
}

/// A labeled dataset of sparse samples, with its labels encoded as class indices.
#[derive(Debug, Clone)]
pub struct Dataset {
    x: Vec<SparseRow>,
    y: Vec<usize>,
    classes: Vec<String>,
    n_features: usize,
}

impl Dataset {
    /// Creates a new `Dataset`.
    ///
    /// # Arguments
    /// * `x` - The samples.
    /// * `labels` - The label of each sample, in the same order.
    /// * `n_features` - The dimension of the feature space.
    ///
    /// # Returns
    /// A new `Dataset` or an error if there are no samples or the lengths differ.
    pub fn new<S: AsRef<str>>(x: Vec<SparseRow>, labels: &[S], n_features: usize) -> Result<Self> {
        if x.is_empty() {
            return Err(MlErr::EmptyDataset);
        }

        if x.len() != labels.len() {
            return Err(MlErr::SizeMismatch {
                a: "samples",
                b: "labels",
                got: labels.len(),
                expected: x.len(),
            });
        }

        let classes: Vec<String> = labels
            .iter()
            .map(|l| l.as_ref().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        // classes is sorted, so the binary search always succeeds.
        let y = labels
            .iter()
            .map(|l| classes.binary_search_by(|c| c.as_str().cmp(l.as_ref())).unwrap_or(0))
            .collect();

        Ok(Self {
            x,
            y,
            classes,
            n_features,
        })
    }

    pub fn samples(&self) -> &[SparseRow] {
        &self.x
    }

    pub fn targets(&self) -> &[usize] {
        &self.y
    }

    /// The distinct labels in ascending order. A target `i` refers to `classes()[i]`.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Encodes the targets as `+1.0` for `positive` and `-1.0` for every other class.
    pub fn binary_targets(&self, positive: usize) -> Vec<f32> {
        self.y
            .iter()
            .map(|&c| if c == positive { 1.0 } else { -1.0 })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(entries: &[(usize, f32)]) -> SparseRow {
        SparseRow::new(entries.to_vec())
    }

    #[test]
    fn test_sparse_row_sorted_and_dot() {
        let r = row(&[(3, 2.0), (0, 1.0)]);
        assert_eq!(r.entries(), &[(0, 1.0), (3, 2.0)]);
        assert_eq!(r.dot(&[1.0, 0.0, 0.0, 0.5]), 2.0);
        assert_eq!(r.squared_norm(), 5.0);
    }

    #[test]
    fn test_sparse_row_axpy_ignores_out_of_range() {
        let r = row(&[(1, 1.0), (7, 1.0)]);
        let mut w = [0.0; 3];
        r.axpy(2.0, &mut w);
        assert_eq!(w, [0.0, 2.0, 0.0]);
    }

    #[test]
    fn test_dataset_encodes_sorted_classes() {
        let x = vec![row(&[(0, 1.0)]), row(&[(1, 1.0)]), row(&[(0, 1.0)])];
        let dataset = Dataset::new(x, &["b", "a", "b"], 2).unwrap();

        assert_eq!(dataset.classes(), &["a".to_string(), "b".to_string()]);
        assert_eq!(dataset.targets(), &[1, 0, 1]);
        assert_eq!(dataset.binary_targets(1), vec![1.0, -1.0, 1.0]);
    }

    #[test]
    fn test_dataset_rejects_empty_and_mismatched() {
        let empty: [&str; 0] = [];
        assert_eq!(
            Dataset::new(vec![], &empty, 0).unwrap_err(),
            MlErr::EmptyDataset
        );

        let err = Dataset::new(vec![row(&[])], &["a", "b"], 0).unwrap_err();
        assert!(matches!(err, MlErr::SizeMismatch { got: 2, expected: 1, .. }));
    }
}
