//! Ordinary Least Squares Regression

use crate::InferenceError;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Relative pivot threshold below which a direction is treated as degenerate
const PIVOT_TOLERANCE: f64 = 1e-12;

/// Linear model `y = x · coefficients + intercept`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegression {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearRegression {
    /// Build from known parameters
    pub fn from_parts(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    /// Least-squares fit with an intercept.
    ///
    /// Solves the normal equations of the centred problem. Columns that are
    /// constant, or exact linear combinations of earlier columns, receive a
    /// zero coefficient.
    pub fn fit(x: ArrayView2<'_, f64>, y: ArrayView1<'_, f64>) -> Result<Self, InferenceError> {
        if x.nrows() == 0 {
            return Err(InferenceError::FitFailed("regression needs at least one row".into()));
        }
        if x.nrows() != y.len() {
            return Err(InferenceError::FitFailed(format!(
                "{} feature rows but {} targets",
                x.nrows(),
                y.len()
            )));
        }

        let x_mean = x.mean_axis(Axis(0)).unwrap_or_else(|| Array1::zeros(x.ncols()));
        let y_mean = y.mean().unwrap_or(0.0);

        let xc = &x - &x_mean;
        let yc = &y - y_mean;

        let gram = xc.t().dot(&xc);
        let rhs = xc.t().dot(&yc);
        let (coefficients, rank) = solve_normal_equations(gram, rhs);

        debug!(
            "Fitted linear regression on {} rows, {} features (rank {})",
            x.nrows(),
            x.ncols(),
            rank
        );

        let intercept = y_mean - coefficients.dot(&x_mean);
        Ok(Self {
            coefficients: coefficients.to_vec(),
            intercept,
        })
    }

    /// Predict one value per row
    pub fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>, InferenceError> {
        if x.ncols() != self.n_features() {
            return Err(InferenceError::InvalidInputShape {
                expected: self.n_features(),
                actual: x.ncols(),
            });
        }
        let coef = ArrayView1::from(&self.coefficients[..]);
        Ok(x.dot(&coef) + self.intercept)
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }
}

/// Gaussian elimination with partial pivoting on a symmetric PSD system.
///
/// Free variables (columns without a usable pivot) are fixed at zero, which
/// still yields an exact least-squares solution for consistent normal
/// equations. Returns the solution and the numerical rank.
fn solve_normal_equations(mut a: Array2<f64>, mut b: Array1<f64>) -> (Array1<f64>, usize) {
    let n = b.len();
    let max_diag = a.diag().iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    let tolerance = max_diag * PIVOT_TOLERANCE;

    let mut pivot_cols = Vec::with_capacity(n);
    let mut row = 0;

    for col in 0..n {
        if row == n {
            break;
        }

        let (best, best_abs) = (row..n)
            .map(|r| (r, a[[r, col]].abs()))
            .fold((row, 0.0), |acc, cur| if cur.1 > acc.1 { cur } else { acc });
        if best_abs <= tolerance {
            continue;
        }

        if best != row {
            for c in 0..n {
                a.swap([row, c], [best, c]);
            }
            b.swap(row, best);
        }

        let pivot = a[[row, col]];
        for r in (row + 1)..n {
            let factor = a[[r, col]] / pivot;
            if factor == 0.0 {
                continue;
            }
            for c in col..n {
                a[[r, c]] -= factor * a[[row, c]];
            }
            b[r] -= factor * b[row];
        }

        pivot_cols.push(col);
        row += 1;
    }

    let mut solution = Array1::zeros(n);
    for (i, &col) in pivot_cols.iter().enumerate().rev() {
        let mut acc = b[i];
        for c in (col + 1)..n {
            acc -= a[[i, c]] * solution[c];
        }
        solution[col] = acc / a[[i, col]];
    }

    (solution, pivot_cols.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_exact_fit() {
        // y = 2a - 3b + 5
        let x = array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0], [0.5, 0.25]];
        let y = x.map_axis(Axis(1), |r| 2.0 * r[0] - 3.0 * r[1] + 5.0);

        let model = LinearRegression::fit(x.view(), y.view()).unwrap();
        assert_close(model.coefficients()[0], 2.0);
        assert_close(model.coefficients()[1], -3.0);
        assert_close(model.intercept(), 5.0);
    }

    #[test]
    fn test_constant_column_gets_zero_coefficient() {
        let x = array![[0.0, 1.0], [0.0, 2.0], [0.0, 3.0], [0.0, 4.0]];
        let y = array![10.0, 8.0, 6.0, 4.0];

        let model = LinearRegression::fit(x.view(), y.view()).unwrap();
        assert_eq!(model.coefficients()[0], 0.0);
        assert_close(model.coefficients()[1], -2.0);
        assert_close(model.intercept(), 12.0);
    }

    #[test]
    fn test_duplicate_columns_still_fit() {
        let x = array![[1.0, 1.0], [2.0, 2.0], [3.0, 3.0]];
        let y = array![2.0, 4.0, 6.0];

        let model = LinearRegression::fit(x.view(), y.view()).unwrap();
        let pred = model.predict(x.view()).unwrap();
        for (p, t) in pred.iter().zip(y.iter()) {
            assert_close(*p, *t);
        }
    }

    #[test]
    fn test_least_squares_residual_orthogonal() {
        let x = array![[0.0], [1.0], [2.0], [3.0]];
        let y = array![1.0, 3.0, 2.0, 5.0];

        let model = LinearRegression::fit(x.view(), y.view()).unwrap();
        let resid = &y - &model.predict(x.view()).unwrap();
        assert_close(resid.sum(), 0.0);
        assert_close(resid.dot(&x.column(0)), 0.0);
    }

    #[test]
    fn test_mismatched_lengths() {
        let x = array![[0.0], [1.0]];
        let y = array![1.0];
        assert!(LinearRegression::fit(x.view(), y.view()).is_err());
    }

    #[test]
    fn test_predict_shape_checked() {
        let model = LinearRegression::from_parts(vec![1.0, 2.0], 0.0);
        let err = model.predict(array![[1.0]].view()).unwrap_err();
        assert!(matches!(err, InferenceError::InvalidInputShape { expected: 2, actual: 1 }));
    }
}
