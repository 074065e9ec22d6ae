//! Regression Evaluation Metrics

use ndarray::ArrayView1;
use serde::Serialize;
use std::fmt;

/// Fit quality on one data subset
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Metrics {
    /// Root mean squared error, in cycles
    pub rmse: f64,
    /// Coefficient of determination
    pub r2: f64,
    /// Number of samples evaluated
    pub samples: usize,
}

impl Metrics {
    /// Compute RMSE and R² for predictions against ground truth
    pub fn compute(y_true: ArrayView1<'_, f64>, y_pred: ArrayView1<'_, f64>) -> Self {
        Self {
            rmse: mean_squared_error(y_true, y_pred).sqrt(),
            r2: r2_score(y_true, y_pred),
            samples: y_true.len(),
        }
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RMSE:{:.4}, R2:{:.4} (n={})", self.rmse, self.r2, self.samples)
    }
}

/// Mean of squared residuals; 0 for empty input
pub fn mean_squared_error(y_true: ArrayView1<'_, f64>, y_pred: ArrayView1<'_, f64>) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }
    let sse: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p) * (t - p))
        .sum();
    sse / y_true.len() as f64
}

/// Coefficient of determination, `1 - SS_res / SS_tot`.
///
/// A constant target gives 1.0 for a perfect fit and 0.0 otherwise.
pub fn r2_score(y_true: ArrayView1<'_, f64>, y_pred: ArrayView1<'_, f64>) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }

    let mean = y_true.iter().sum::<f64>() / y_true.len() as f64;

    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for (&t, &p) in y_true.iter().zip(y_pred.iter()) {
        ss_res += (t - p) * (t - p);
        ss_tot += (t - mean) * (t - mean);
    }

    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_perfect_prediction() {
        let y = array![10.0, 20.0, 30.0];
        let m = Metrics::compute(y.view(), y.view());
        assert_eq!(m.rmse, 0.0);
        assert_eq!(m.r2, 1.0);
        assert_eq!(m.samples, 3);
    }

    #[test]
    fn test_rmse() {
        let t = array![0.0, 0.0, 0.0, 0.0];
        let p = array![2.0, -2.0, 2.0, -2.0];
        assert!((mean_squared_error(t.view(), p.view()) - 4.0).abs() < 1e-12);
        assert!((Metrics::compute(t.view(), p.view()).rmse - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_r2_of_mean_predictor_is_zero() {
        let t = array![1.0, 2.0, 3.0, 4.0];
        let p = array![2.5, 2.5, 2.5, 2.5];
        assert!(r2_score(t.view(), p.view()).abs() < 1e-12);
    }

    #[test]
    fn test_r2_known_value() {
        let t = array![3.0, -0.5, 2.0, 7.0];
        let p = array![2.5, 0.0, 2.0, 8.0];
        assert!((r2_score(t.view(), p.view()) - 0.948_608_137_044_967_9).abs() < 1e-12);
    }

    #[test]
    fn test_constant_target() {
        let t = array![5.0, 5.0];
        assert_eq!(r2_score(t.view(), array![5.0, 5.0].view()), 1.0);
        assert_eq!(r2_score(t.view(), array![4.0, 6.0].view()), 0.0);
    }

    #[test]
    fn test_empty() {
        let e = ndarray::Array1::<f64>::zeros(0);
        assert_eq!(Metrics::compute(e.view(), e.view()), Metrics::default());
    }
}
