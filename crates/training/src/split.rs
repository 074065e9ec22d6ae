//! Seeded Train/Test Split

use crate::TrainingError;
use feature_engine::FeatureTable;
use ndarray::{Array1, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Features and targets of one subset
#[derive(Debug, Clone)]
pub struct Subset {
    pub features: FeatureTable,
    pub target: Array1<f64>,
}

impl Subset {
    pub fn len(&self) -> usize {
        self.target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }
}

/// Row counts for a split: the test side gets `ceil(n * test_size)` rows
pub fn split_sizes(rows: usize, test_size: f64) -> Result<(usize, usize), TrainingError> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(TrainingError::InvalidTestSize(test_size));
    }
    let n_test = (rows as f64 * test_size).ceil() as usize;
    let n_train = rows.saturating_sub(n_test);
    if n_train == 0 || n_test == 0 {
        return Err(TrainingError::EmptySplit { rows, test_size });
    }
    Ok((n_train, n_test))
}

/// Shuffle rows with `seed` and split into `(train, test)`.
///
/// The same inputs and seed always yield the same partition.
pub fn train_test_split(
    features: &FeatureTable,
    target: &Array1<f64>,
    test_size: f64,
    seed: u64,
) -> Result<(Subset, Subset), TrainingError> {
    let rows = features.nrows();
    let (n_train, _) = split_sizes(rows, test_size)?;

    let mut indices: Vec<usize> = (0..rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);
    let (train_idx, test_idx) = indices.split_at(n_train);

    Ok((subset(features, target, train_idx)?, subset(features, target, test_idx)?))
}

fn subset(
    features: &FeatureTable,
    target: &Array1<f64>,
    indices: &[usize],
) -> Result<Subset, TrainingError> {
    let data = features.data().select(Axis(0), indices);
    Ok(Subset {
        features: FeatureTable::new(features.columns().to_vec(), data)?,
        target: target.select(Axis(0), indices),
    })
}
