//! Min-Max Feature Scaler

use crate::InferenceError;
use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

/// Per-column min-max scaler fitted once on training data.
///
/// Maps each column's training range onto `[0, 1]`. Columns with zero range
/// get a scale of 1, so they transform to 0 instead of dividing by zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    data_min: Vec<f64>,
    data_max: Vec<f64>,
    scale: Vec<f64>,
}

impl MinMaxScaler {
    /// Fit column ranges
    pub fn fit(x: ArrayView2<'_, f64>) -> Result<Self, InferenceError> {
        if x.nrows() == 0 {
            return Err(InferenceError::FitFailed("scaler needs at least one row".into()));
        }

        let data_min: Vec<f64> = x
            .axis_iter(Axis(1))
            .map(|col| col.iter().copied().fold(f64::INFINITY, f64::min))
            .collect();
        let data_max: Vec<f64> = x
            .axis_iter(Axis(1))
            .map(|col| col.iter().copied().fold(f64::NEG_INFINITY, f64::max))
            .collect();

        let scale = data_min
            .iter()
            .zip(&data_max)
            .map(|(lo, hi)| {
                let range = hi - lo;
                if range == 0.0 { 1.0 } else { 1.0 / range }
            })
            .collect();

        Ok(Self {
            data_min,
            data_max,
            scale,
        })
    }

    /// Apply the fitted ranges
    pub fn transform(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>, InferenceError> {
        if x.ncols() != self.n_features() {
            return Err(InferenceError::InvalidInputShape {
                expected: self.n_features(),
                actual: x.ncols(),
            });
        }

        let min = ArrayView1::from(&self.data_min[..]);
        let scale = ArrayView1::from(&self.scale[..]);
        Ok((&x - &min) * &scale)
    }

    pub fn n_features(&self) -> usize {
        self.scale.len()
    }

    /// Per-column minimum seen during fit
    pub fn data_min(&self) -> &[f64] {
        &self.data_min
    }

    /// Per-column maximum seen during fit
    pub fn data_max(&self) -> &[f64] {
        &self.data_max
    }

    pub(crate) fn is_consistent(&self) -> bool {
        self.data_min.len() == self.scale.len() && self.data_max.len() == self.scale.len()
    }
}
