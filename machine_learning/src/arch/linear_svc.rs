use ndarray::{Array1, Array2, ArrayView1};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::Classifier;
use crate::{
    MlErr, Result,
    dataset::{Dataset, SparseRow},
    optimization::DualCoordinateDescent,
};

/// Hyperparameters of a `LinearSvc`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearSvcParams {
    /// Inverse regularization strength.
    pub c: f32,
    /// Tolerance of the stopping criterion.
    pub tol: f32,
    /// Maximum amount of passes over the data per binary problem.
    pub max_iter: usize,
    /// Seed for the coordinate shuffling, `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for LinearSvcParams {
    fn default() -> Self {
        Self {
            c: 1.0,
            tol: 1e-4,
            max_iter: 1000,
            seed: None,
        }
    }
}

impl LinearSvcParams {
    /// Returns the default parameters with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    fn generate_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// Linear support vector classifier with a squared hinge loss.
///
/// Two classes train a single hyperplane whose positive side is the second class. More than
/// two classes train one hyperplane per class against the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearSvc {
    classes: Vec<String>,
    coef: Array2<f32>,
    intercept: Array1<f32>,
}

impl LinearSvc {
    /// Fits a new `LinearSvc`.
    ///
    /// # Arguments
    /// * `dataset` - The training samples and their labels.
    /// * `params` - The hyperparameters.
    ///
    /// # Returns
    /// The fitted classifier or `TooFewClasses` if the dataset has a single label.
    pub fn fit(dataset: &Dataset, params: &LinearSvcParams) -> Result<Self> {
        let classes = dataset.classes().to_vec();
        if classes.len() < 2 {
            return Err(MlErr::TooFewClasses { got: classes.len() });
        }

        let positives: Vec<usize> = if classes.len() == 2 {
            vec![1]
        } else {
            (0..classes.len()).collect()
        };

        let mut rng = params.generate_rng();
        let seeds: Vec<u64> = positives.iter().map(|_| rng.random()).collect();

        let n_features = dataset.n_features();
        let solver = DualCoordinateDescent::new(params.c, params.tol, params.max_iter);

        let hyperplanes: Vec<Vec<f32>> = positives
            .par_iter()
            .zip(seeds.par_iter())
            .map(|(&positive, &seed)| {
                let y = dataset.binary_targets(positive);
                let mut rng = StdRng::seed_from_u64(seed);
                solver.solve(dataset.samples(), &y, n_features, &mut rng)
            })
            .collect();

        let mut coef = Array2::zeros((hyperplanes.len(), n_features));
        let mut intercept = Array1::zeros(hyperplanes.len());

        for (k, w) in hyperplanes.iter().enumerate() {
            let (weights, bias) = w.split_at(n_features);
            coef.row_mut(k).assign(&ArrayView1::from(weights));
            intercept[k] = bias[0];
        }

        Ok(Self {
            classes,
            coef,
            intercept,
        })
    }
}

impl Classifier for LinearSvc {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn decision_function(&self, x: &SparseRow) -> Array1<f32> {
        self.coef
            .outer_iter()
            .zip(&self.intercept)
            .map(|(w, b)| {
                let score: f32 = x
                    .entries()
                    .iter()
                    .filter_map(|&(col, v)| w.get(col).map(|w| w * v))
                    .sum();
                score + b
            })
            .collect()
    }
}
