//! Training Orchestration

use crate::config::TrainingConfig;
use crate::data::CmapssData;
use crate::metrics::Metrics;
use crate::split::{train_test_split, Subset};
use crate::TrainingError;
use feature_engine::{add_rul, features_and_target, last_cycle_per_unit};
use inference_engine::FittedPipeline;
use serde::Serialize;
use std::fmt;
use tracing::info;

/// Metrics for every evaluated subset
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub train: Metrics,
    pub test: Metrics,
    pub validation: Metrics,
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Train set {}", self.train)?;
        writeln!(f, "Test set {}", self.test)?;
        write!(f, "Validation set {}", self.validation)
    }
}

/// Fitted pipeline together with its evaluation
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub pipeline: FittedPipeline,
    pub report: EvaluationReport,
}

fn evaluate(pipeline: &FittedPipeline, subset: &Subset) -> Result<Metrics, TrainingError> {
    let predicted = pipeline.predict(&subset.features)?;
    Ok(Metrics::compute(subset.target.view(), predicted.view()))
}

/// Label, split, fit and evaluate. Nothing is written to disk.
pub fn fit_and_evaluate(
    data: &CmapssData,
    test_size: f64,
    seed: u64,
) -> Result<TrainingOutcome, TrainingError> {
    let labeled = add_rul(&data.train);
    let (features, target) = features_and_target(&labeled);
    let (train, test) = train_test_split(&features, &target, test_size, seed)?;
    info!("Split {} rows into {} train / {} test", labeled.len(), train.len(), test.len());

    let validation_units = last_cycle_per_unit(&data.validation);
    if validation_units.len() != data.validation_rul.len() {
        return Err(TrainingError::LabelCountMismatch {
            units: validation_units.len(),
            labels: data.validation_rul.len(),
        });
    }
    let validation = Subset {
        features: validation_units.table,
        target: data.validation_rul.clone(),
    };

    info!("Training linear regression pipeline...");
    let pipeline = FittedPipeline::fit(&train.features, train.target.view())?;

    let report = EvaluationReport {
        train: evaluate(&pipeline, &train)?,
        test: evaluate(&pipeline, &test)?,
        validation: evaluate(&pipeline, &validation)?,
    };
    info!("Train set {}", report.train);
    info!("Test set {}", report.test);
    info!("Validation set {}", report.validation);

    Ok(TrainingOutcome { pipeline, report })
}

/// Full offline run: load files, fit, evaluate, persist
pub fn run(config: &TrainingConfig) -> Result<TrainingOutcome, TrainingError> {
    let data = CmapssData::load(config)?;
    let outcome = fit_and_evaluate(&data, config.test_size, config.seed)?;
    outcome.pipeline.save(&config.output_path)?;
    Ok(outcome)
}
