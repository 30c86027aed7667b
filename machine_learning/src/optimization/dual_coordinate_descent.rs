use rand::{Rng, seq::SliceRandom};

use crate::dataset::SparseRow;

/// Dual coordinate descent for the L2-regularized squared hinge loss SVM.
///
/// Solves `min_w 0.5 * |w|^2 + C * sum_i max(0, 1 - y_i * w.x_i)^2` through its dual, one
/// coordinate at a time. The bias is handled by augmenting every sample with a constant
/// feature, so the returned vector has one more weight than there are features.
#[derive(Debug, Clone, Copy)]
pub struct DualCoordinateDescent {
    c: f32,
    tol: f32,
    max_iter: usize,
    bias: f32,
}

impl Default for DualCoordinateDescent {
    fn default() -> Self {
        Self::new(1.0, 1e-4, 1000)
    }
}

impl DualCoordinateDescent {
    /// Creates a new `DualCoordinateDescent`.
    ///
    /// # Arguments
    /// * `c` - The inverse regularization strength.
    /// * `tol` - Stop once the projected gradient spread falls below this value.
    /// * `max_iter` - The maximum amount of passes over the samples.
    pub fn new(c: f32, tol: f32, max_iter: usize) -> Self {
        Self {
            c,
            tol,
            max_iter,
            bias: 1.0,
        }
    }

    /// Runs the solver over a binary problem.
    ///
    /// # Arguments
    /// * `x` - The samples.
    /// * `y` - The targets, `+1.0` or `-1.0` for each sample.
    /// * `n_features` - The dimension of the samples.
    /// * `rng` - Used to shuffle the coordinates on every pass.
    ///
    /// # Returns
    /// The primal weights, with the intercept as the last element.
    pub fn solve<R: Rng>(
        &self,
        x: &[SparseRow],
        y: &[f32],
        n_features: usize,
        rng: &mut R,
    ) -> Vec<f32> {
        let l = x.len();
        let diag = 0.5 / self.c;
        let bias_col = n_features;

        let mut w = vec![0.0; n_features + 1];
        let mut alpha = vec![0.0f32; l];
        let qd: Vec<f32> = x
            .iter()
            .map(|xi| xi.squared_norm() + self.bias * self.bias + diag)
            .collect();

        let mut index: Vec<usize> = (0..l).collect();

        for iter in 0..self.max_iter {
            index.shuffle(rng);

            let mut pg_max = f32::NEG_INFINITY;
            let mut pg_min = f32::INFINITY;

            for &i in &index {
                let yi = y[i];
                let xi = &x[i];

                let wx = xi.dot(&w) + w[bias_col] * self.bias;
                let g = yi * wx - 1.0 + diag * alpha[i];

                let pg = if alpha[i] == 0.0 { g.min(0.0) } else { g };
                pg_max = pg_max.max(pg);
                pg_min = pg_min.min(pg);

                if pg.abs() > 1e-12 {
                    let old = alpha[i];
                    alpha[i] = (alpha[i] - g / qd[i]).max(0.0);
                    let d = (alpha[i] - old) * yi;
                    xi.axpy(d, &mut w);
                    w[bias_col] += d * self.bias;
                }
            }

            if pg_max - pg_min <= self.tol {
                log::debug!("dual coordinate descent converged after {} passes", iter + 1);
                break;
            }
        }

        w[bias_col] *= self.bias;
        w
    }
}
