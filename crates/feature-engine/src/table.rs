//! Named Feature Table

use crate::error::FeatureError;
use ndarray::{Array2, ArrayView1, ArrayView2};
use sensor_schema::{sensor_columns, SensorReading, SENSOR_COUNT};

/// Rows of model features with named columns
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    columns: Vec<String>,
    data: Array2<f64>,
}

impl FeatureTable {
    /// Create a table; `data` must have one column per name
    pub fn new(columns: Vec<String>, data: Array2<f64>) -> Result<Self, FeatureError> {
        if data.ncols() != columns.len() {
            return Err(FeatureError::InvalidShape {
                expected: columns.len(),
                actual: data.ncols(),
            });
        }
        Ok(Self { columns, data })
    }

    /// Table with the canonical sensor columns and no rows
    pub fn empty_sensors() -> Self {
        Self {
            columns: sensor_columns(),
            data: Array2::zeros((0, SENSOR_COUNT)),
        }
    }

    /// Build a canonical sensor table from per-row sensor arrays
    pub fn from_sensor_rows(rows: &[[f64; SENSOR_COUNT]]) -> Self {
        let data = Array2::from_shape_fn((rows.len(), SENSOR_COUNT), |(r, c)| rows[r][c]);
        Self {
            columns: sensor_columns(),
            data,
        }
    }

    /// Single-reading path: the validated reading is the feature row.
    /// Values are passed through unscaled.
    pub fn from_reading(reading: &SensorReading) -> Self {
        Self::from_sensor_rows(&[*reading.values()])
    }

    /// Column names in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Feature matrix, one row per sample
    pub fn data(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    /// Consume the table, returning the matrix
    pub fn into_data(self) -> Array2<f64> {
        self.data
    }

    /// One row of features
    pub fn row(&self, index: usize) -> Option<ArrayView1<'_, f64>> {
        (index < self.nrows()).then(|| self.data.row(index))
    }

    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0
    }
}
