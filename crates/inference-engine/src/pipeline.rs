//! Fitted Scaling + Regression Pipeline

use crate::regression::LinearRegression;
use crate::scaler::MinMaxScaler;
use crate::{InferenceError, ModelLoadError};
use feature_engine::FeatureTable;
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Artifact file magic
pub const MAGIC: [u8; 4] = *b"RULP";

/// Current artifact format version
pub const FORMAT_VERSION: u16 = 1;

const HEADER_LEN: usize = MAGIC.len() + 2;

/// Scaler and regressor fitted together on the same feature columns.
///
/// Immutable once fitted; inference never refits either stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedPipeline {
    feature_names: Vec<String>,
    scaler: MinMaxScaler,
    regressor: LinearRegression,
}

impl FittedPipeline {
    /// Fit the scaler on `features`, then the regressor on the scaled features
    pub fn fit(features: &FeatureTable, target: ArrayView1<'_, f64>) -> Result<Self, InferenceError> {
        let scaler = MinMaxScaler::fit(features.data())?;
        let scaled = scaler.transform(features.data())?;
        let regressor = LinearRegression::fit(scaled.view(), target)?;

        Ok(Self {
            feature_names: features.columns().to_vec(),
            scaler,
            regressor,
        })
    }

    /// Column names the pipeline was fitted on, in order
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    pub fn scaler(&self) -> &MinMaxScaler {
        &self.scaler
    }

    pub fn regressor(&self) -> &LinearRegression {
        &self.regressor
    }

    /// Features must carry exactly the fitted columns, in the fitted order
    fn check_schema(&self, features: &FeatureTable) -> Result<(), InferenceError> {
        if features.ncols() != self.n_features() {
            return Err(InferenceError::InvalidInputShape {
                expected: self.n_features(),
                actual: features.ncols(),
            });
        }
        let mismatch = self
            .feature_names
            .iter()
            .zip(features.columns())
            .enumerate()
            .find(|(_, (want, got))| want != got);
        if let Some((index, (want, got))) = mismatch {
            return Err(InferenceError::SchemaMismatch {
                index,
                expected: want.clone(),
                actual: got.clone(),
            });
        }
        Ok(())
    }

    /// Scale then regress every row
    pub fn predict(&self, features: &FeatureTable) -> Result<Array1<f64>, InferenceError> {
        self.check_schema(features)?;
        let scaled = self.scaler.transform(features.data())?;
        self.regressor.predict(scaled.view())
    }

    /// Predict a table holding exactly one row
    pub fn predict_one(&self, features: &FeatureTable) -> Result<f64, InferenceError> {
        if features.nrows() != 1 {
            return Err(InferenceError::NotSingleRow(features.nrows()));
        }
        let value = self.predict(features)?[0];
        if !value.is_finite() {
            return Err(InferenceError::NonFinite(value));
        }
        Ok(value)
    }

    /// Encode as `MAGIC | version (u16 LE) | postcard payload`
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        let payload = postcard::to_allocvec(self)?;
        let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
        bytes.extend_from_slice(&MAGIC);
        bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
        bytes.extend_from_slice(&payload);
        Ok(bytes)
    }

    /// Decode an artifact; `path` is only used in error messages
    pub fn from_bytes(bytes: &[u8], path: &Path) -> Result<Self, ModelLoadError> {
        let corrupt = |reason: String| ModelLoadError::Corrupt {
            path: path.to_path_buf(),
            reason,
        };

        if bytes.len() < HEADER_LEN || bytes[..MAGIC.len()] != MAGIC {
            return Err(corrupt("missing artifact header".into()));
        }
        let version = u16::from_le_bytes([bytes[4], bytes[5]]);
        if version != FORMAT_VERSION {
            return Err(ModelLoadError::IncompatibleVersion {
                path: path.to_path_buf(),
                found: version,
                supported: FORMAT_VERSION,
            });
        }

        let (pipeline, rest): (Self, _) =
            postcard::take_from_bytes(&bytes[HEADER_LEN..]).map_err(|e| corrupt(e.to_string()))?;
        if !rest.is_empty() {
            return Err(corrupt(format!("{} trailing bytes", rest.len())));
        }
        if !pipeline.is_consistent() {
            return Err(corrupt("stage dimensions disagree".into()));
        }
        Ok(pipeline)
    }

    fn is_consistent(&self) -> bool {
        self.scaler.is_consistent()
            && self.scaler.n_features() == self.n_features()
            && self.regressor.n_features() == self.n_features()
    }

    /// Persist to `path`, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), InferenceError> {
        let path = path.as_ref();
        let persist = |reason: String| InferenceError::Persist {
            path: path.to_path_buf(),
            reason,
        };

        let bytes = self.to_bytes().map_err(|e| persist(e.to_string()))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| persist(e.to_string()))?;
        }
        std::fs::write(path, bytes).map_err(|e| persist(e.to_string()))?;

        info!("Model saved: {}", path.display());
        Ok(())
    }

    /// Load a persisted pipeline
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelLoadError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => ModelLoadError::NotFound(path.to_path_buf()),
            _ => ModelLoadError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        let pipeline = Self::from_bytes(&bytes, path)?;

        info!(
            "Model loaded from: {} ({} features)",
            path.display(),
            pipeline.n_features()
        );
        Ok(pipeline)
    }
}
