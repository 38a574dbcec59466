//! Binary logistic regression with an L2 penalty on the coefficients (not the intercept).
//!
//! Minimizes `sum_i w_i * logloss_i + ||beta||^2 / (2C)`, where `w_i` is the class
//! weight of row `i` (1.0, or `n / (2 * n_class)` when balanced).

use super::Solver;
use crate::error::{PipelineError, Result};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticParams {
    pub c: f64,
    pub max_iter: usize,
    pub tol: f64,
    pub class_weight_balanced: bool,
    pub solver: Solver,
    pub seed: u64,
}

impl Default for LogisticParams {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iter: 1000,
            tol: 1e-6,
            class_weight_balanced: true,
            solver: Solver::Newton,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub params: LogisticParams,
    pub coef: Array1<f64>,
    pub intercept: f64,
    /// Iterations (Newton steps or SAG epochs) the last fit used
    pub n_iter: usize,
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

fn sample_weights(y: &[u8], balanced: bool) -> Result<Vec<f64>> {
    let n = y.len();
    let pos = y.iter().filter(|l| **l == 1).count();
    let neg = n - pos;
    if pos == 0 || neg == 0 {
        return Err(PipelineError::InvalidParameter(
            "training data must contain both classes".to_string(),
        ));
    }
    if !balanced {
        return Ok(vec![1.0; n]);
    }
    let w_pos = n as f64 / (2.0 * pos as f64);
    let w_neg = n as f64 / (2.0 * neg as f64);
    Ok(y.iter().map(|l| if *l == 1 { w_pos } else { w_neg }).collect())
}

/// Solve `a * x = b` in place by Gaussian elimination with partial pivoting
fn solve(mut a: Array2<f64>, mut b: Array1<f64>) -> Result<Array1<f64>> {
    let n = b.len();
    for col in 0..n {
        let pivot = (col..n)
            .max_by(|i, j| a[[*i, col]].abs().total_cmp(&a[[*j, col]].abs()))
            .unwrap_or(col);
        if a[[pivot, col]].abs() < 1e-12 {
            return Err(PipelineError::InvalidParameter(
                "singular Hessian in Newton step".to_string(),
            ));
        }
        if pivot != col {
            for k in 0..n {
                a.swap([col, k], [pivot, k]);
            }
            b.swap(col, pivot);
        }
        for row in col + 1..n {
            let f = a[[row, col]] / a[[col, col]];
            if f == 0.0 {
                continue;
            }
            for k in col..n {
                a[[row, k]] -= f * a[[col, k]];
            }
            b[row] -= f * b[col];
        }
    }
    let mut x = Array1::zeros(n);
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[[row, k]] * x[k]).sum();
        x[row] = (b[row] - tail) / a[[row, row]];
    }
    Ok(x)
}

impl LogisticRegression {
    pub fn new(params: LogisticParams) -> Self {
        Self {
            params,
            coef: Array1::zeros(0),
            intercept: 0.0,
            n_iter: 0,
        }
    }

    pub fn fit(&mut self, x: ArrayView2<'_, f64>, y: &[u8]) -> Result<()> {
        if x.nrows() == 0 {
            return Err(PipelineError::EmptyDataset);
        }
        if x.nrows() != y.len() {
            return Err(PipelineError::InvalidParameter(format!(
                "{} rows but {} labels",
                x.nrows(),
                y.len()
            )));
        }
        if !(self.params.c > 0.0) {
            return Err(PipelineError::InvalidParameter(format!(
                "C must be positive, got {}",
                self.params.c
            )));
        }
        let w = sample_weights(y, self.params.class_weight_balanced)?;
        let yf: Vec<f64> = y.iter().map(|l| f64::from(*l)).collect();

        // theta = [intercept, coef...]
        let (theta, n_iter) = match self.params.solver {
            Solver::Newton => self.fit_newton(x, &yf, &w)?,
            Solver::Sag => self.fit_sag(x, &yf, &w),
        };
        self.intercept = theta[0];
        self.coef = theta.slice(ndarray::s![1..]).to_owned();
        self.n_iter = n_iter;
        debug!(solver = %self.params.solver, c = self.params.c, n_iter, "logistic regression fitted");
        Ok(())
    }

    fn fit_newton(&self, x: ArrayView2<'_, f64>, y: &[f64], w: &[f64]) -> Result<(Array1<f64>, usize)> {
        let (n, p) = x.dim();
        let lambda = 1.0 / self.params.c;
        let mut theta = Array1::<f64>::zeros(p + 1);

        for iter in 1..=self.params.max_iter {
            let mut grad = Array1::<f64>::zeros(p + 1);
            let mut hess = Array2::<f64>::zeros((p + 1, p + 1));
            for i in 0..n {
                let row = x.row(i);
                let z = theta[0] + row.dot(&theta.slice(ndarray::s![1..]));
                let s = sigmoid(z);
                let g = w[i] * (s - y[i]);
                let h = w[i] * s * (1.0 - s);
                grad[0] += g;
                hess[[0, 0]] += h;
                for a in 0..p {
                    grad[a + 1] += g * row[a];
                    hess[[0, a + 1]] += h * row[a];
                    for b in a..p {
                        hess[[a + 1, b + 1]] += h * row[a] * row[b];
                    }
                }
            }
            for a in 0..=p {
                for b in 0..a {
                    hess[[a, b]] = hess[[b, a]];
                }
            }
            for a in 1..=p {
                grad[a] += lambda * theta[a];
                hess[[a, a]] += lambda;
            }
            hess[[0, 0]] += 1e-10;

            let step = solve(hess, grad)?;
            theta -= &step;
            let change = step.iter().fold(0.0f64, |m, v| m.max(v.abs()));
            if change < self.params.tol {
                return Ok((theta, iter));
            }
        }
        warn!(max_iter = self.params.max_iter, "newton solver did not converge");
        Ok((theta, self.params.max_iter))
    }

    fn fit_sag(&self, x: ArrayView2<'_, f64>, y: &[f64], w: &[f64]) -> (Array1<f64>, usize) {
        let (n, p) = x.dim();
        let lambda = 1.0 / self.params.c;
        let reg = lambda / n as f64;
        let max_sq = x
            .axis_iter(Axis(0))
            .zip(w)
            .map(|(r, wi)| wi * (1.0 + r.dot(&r)))
            .fold(0.0f64, f64::max);
        let step = 1.0 / (0.25 * max_sq + reg);

        let mut rng = StdRng::seed_from_u64(self.params.seed);
        let mut theta = Array1::<f64>::zeros(p + 1);
        let mut grads = vec![0.0f64; n];
        let mut seen = vec![false; n];
        let mut n_seen = 0usize;
        let mut sum = Array1::<f64>::zeros(p + 1);

        for epoch in 1..=self.params.max_iter {
            let before = theta.clone();
            for _ in 0..n {
                let i = rng.gen_range(0..n);
                let row = x.row(i);
                let z = theta[0] + row.dot(&theta.slice(ndarray::s![1..]));
                let g = w[i] * (sigmoid(z) - y[i]);
                let delta = g - grads[i];
                grads[i] = g;
                if !seen[i] {
                    seen[i] = true;
                    n_seen += 1;
                }
                sum[0] += delta;
                sum.slice_mut(ndarray::s![1..]).scaled_add(delta, &row);

                let m = n_seen as f64;
                theta[0] -= step * sum[0] / m;
                for a in 1..=p {
                    theta[a] -= step * (sum[a] / m + reg * theta[a]);
                }
            }
            let change = (&theta - &before).iter().fold(0.0f64, |m, v| m.max(v.abs()));
            let size = theta.iter().fold(1.0f64, |m, v| m.max(v.abs()));
            if change / size < self.params.tol {
                return (theta, epoch);
            }
        }
        warn!(max_iter = self.params.max_iter, "sag solver did not converge");
        (theta, self.params.max_iter)
    }

    pub fn decision_function(&self, x: ArrayView2<'_, f64>) -> Array1<f64> {
        x.dot(&self.coef) + self.intercept
    }

    /// Columns: [p(stay), p(leave)]
    pub fn predict_proba(&self, x: ArrayView2<'_, f64>) -> Array2<f64> {
        let z = self.decision_function(x);
        let mut out = Array2::zeros((z.len(), 2));
        for (i, zi) in z.iter().enumerate() {
            let p = sigmoid(*zi);
            out[[i, 0]] = 1.0 - p;
            out[[i, 1]] = p;
        }
        out
    }

    pub fn coef(&self) -> ArrayView1<'_, f64> {
        self.coef.view()
    }
}
