use ndarray::Array1;

use crate::dataset::SparseRow;

/// A fitted classifier over sparse feature vectors.
pub trait Classifier {
    /// The labels this classifier can output, in ascending order.
    fn classes(&self) -> &[String];

    /// Computes the signed distance of a sample to each decision hyperplane.
    ///
    /// # Arguments
    /// * `x` - The sample.
    ///
    /// # Returns
    /// One score per binary problem: a single score for two classes, one per class otherwise.
    fn decision_function(&self, x: &SparseRow) -> Array1<f32>;

    /// Predicts the index of the class of a sample within `classes()`.
    fn predict_index(&self, x: &SparseRow) -> usize {
        let scores = self.decision_function(x);

        if scores.len() == 1 {
            return usize::from(scores[0] > 0.0);
        }

        scores
            .iter()
            .enumerate()
            .fold((0, f32::NEG_INFINITY), |best, (i, &s)| {
                if s > best.1 { (i, s) } else { best }
            })
            .0
    }

    /// Predicts the label of a sample.
    fn predict(&self, x: &SparseRow) -> &str {
        &self.classes()[self.predict_index(x)]
    }
}
