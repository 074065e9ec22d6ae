//! Prediction Service

use crate::pipeline::FittedPipeline;
use crate::{InferenceError, ModelLoadError};
use feature_engine::FeatureTable;
use sensor_schema::{sensor_columns, SensorReading};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Round a raw prediction to two decimals.
///
/// Ties go to the even neighbour of the scaled binary value, so `90.005`
/// (stored just below the tie, scaled onto `9000.5`) yields `90.0` and an
/// exact tie such as `0.125` yields `0.12`.
pub fn round_rul(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Owns the fitted pipeline for the lifetime of the process.
///
/// Read-only after construction, so it can be shared across request
/// handlers without locking.
#[derive(Debug)]
pub struct PredictionService {
    pipeline: FittedPipeline,
    model_path: Option<PathBuf>,
}

impl PredictionService {
    /// Load the artifact eagerly. Fails if it is missing, unreadable or was
    /// fitted on anything other than the canonical sensor columns.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelLoadError> {
        let path = path.as_ref();
        let pipeline = FittedPipeline::load(path)?;

        let expected = sensor_columns();
        if pipeline.feature_names() != expected.as_slice() {
            return Err(ModelLoadError::IncompatibleFeatures {
                expected,
                actual: pipeline.feature_names().to_vec(),
            });
        }

        info!("Prediction service ready with model {}", path.display());
        Ok(Self {
            pipeline,
            model_path: Some(path.to_path_buf()),
        })
    }

    /// Wrap an in-memory pipeline
    pub fn from_pipeline(pipeline: FittedPipeline) -> Self {
        Self {
            pipeline,
            model_path: None,
        }
    }

    /// Unrounded model output for one reading
    pub fn predict_raw(&self, reading: &SensorReading) -> Result<f64, InferenceError> {
        let start = Instant::now();
        let features = FeatureTable::from_reading(reading);
        let value = self.pipeline.predict_one(&features)?;
        debug!("Inference completed in {}us", start.elapsed().as_micros());
        Ok(value)
    }

    /// Predicted RUL for one reading, rounded to two decimals
    pub fn predict(&self, reading: &SensorReading) -> Result<f64, InferenceError> {
        self.predict_raw(reading).map(round_rul)
    }

    pub fn pipeline(&self) -> &FittedPipeline {
        &self.pipeline
    }

    /// Artifact path, when loaded from disk
    pub fn model_path(&self) -> Option<&Path> {
        self.model_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2};
    use proptest::prelude::*;
    use sensor_schema::SENSOR_COUNT;

    fn noise(i: usize) -> f64 {
        let v = (i as f64 * 12.9898).sin() * 43758.5453;
        v - v.floor()
    }

    /// Pipeline fitted on synthetic normalized data: RUL = 250 - 200 * s_2 - 40 * s_7
    fn synthetic_pipeline() -> FittedPipeline {
        let n = 64;
        let x = Array2::from_shape_fn((n, SENSOR_COUNT), |(r, c)| noise(r * SENSOR_COUNT + c + 1));
        let y: Array1<f64> = x
            .rows()
            .into_iter()
            .map(|row| 250.0 - 200.0 * row[1] - 40.0 * row[6])
            .collect();
        let table = FeatureTable::new(sensor_columns(), x).unwrap();
        FittedPipeline::fit(&table, y.view()).unwrap()
    }

    #[test]
    fn test_round_half_even_at_xx5() {
        // Half-up would give 90.01
        assert_eq!(round_rul(90.005), 90.0);
        assert_ne!(round_rul(90.005), 90.01);
        // Exact binary ties
        assert_eq!(round_rul(0.125), 0.12);
        assert_eq!(round_rul(0.375), 0.38);
        // Stored below the tie but scaled onto 267.5
        assert_eq!(round_rul(2.675), 2.68);
        assert_eq!(round_rul(112.3456), 112.35);
    }

    #[test]
    fn test_predict_rounds_to_two_decimals() {
        let service = PredictionService::from_pipeline(synthetic_pipeline());
        let reading = SensorReading::from_values([0.5; SENSOR_COUNT]).unwrap();
        let raw = service.predict_raw(&reading).unwrap();
        let rounded = service.predict(&reading).unwrap();

        assert!((raw - 130.0).abs() < 1e-6);
        assert_eq!(rounded, round_rul(raw));
    }

    #[test]
    fn test_wrong_pipeline_surfaces_error() {
        let x = Array2::from_shape_fn((4, 3), |(r, c)| (r + c) as f64);
        let table = FeatureTable::new(vec!["a".into(), "b".into(), "c".into()], x).unwrap();
        let pipeline = FittedPipeline::fit(&table, Array1::from(vec![1.0, 2.0, 3.0, 4.0]).view()).unwrap();
        let service = PredictionService::from_pipeline(pipeline);

        let reading = SensorReading::from_values([0.5; SENSOR_COUNT]).unwrap();
        assert!(matches!(
            service.predict(&reading),
            Err(InferenceError::InvalidInputShape { expected: 3, actual: 21 })
        ));
    }

    #[test]
    fn test_load_rejects_foreign_feature_set() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");
        let x = Array2::from_shape_fn((3, 2), |(r, c)| (r * 2 + c) as f64);
        let table = FeatureTable::new(vec!["a".into(), "b".into()], x).unwrap();
        FittedPipeline::fit(&table, Array1::from(vec![1.0, 2.0, 3.0]).view())
            .unwrap()
            .save(&path)
            .unwrap();

        assert!(matches!(
            PredictionService::load(&path).unwrap_err(),
            ModelLoadError::IncompatibleFeatures { .. }
        ));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lr_rul_pipeline.bin");
        synthetic_pipeline().save(&path).unwrap();

        let service = PredictionService::load(&path).unwrap();
        assert_eq!(service.model_path(), Some(path.as_path()));
        assert!(matches!(
            PredictionService::load(dir.path().join("missing.bin")).unwrap_err(),
            ModelLoadError::NotFound(_)
        ));
    }

    proptest! {
        #[test]
        fn prop_valid_readings_predict_finite_and_deterministic(
            values in proptest::array::uniform21(0.0f64..=1.0)
        ) {
            let service = PredictionService::from_pipeline(synthetic_pipeline());
            let reading = SensorReading::from_values(values).unwrap();
            let first = service.predict(&reading).unwrap();
            prop_assert!(first.is_finite());
            prop_assert_eq!(service.predict(&reading).unwrap(), first);
        }
    }
}
