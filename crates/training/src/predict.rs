//! Batch Prediction over Raw Cycle Logs

use feature_engine::{last_cycle_per_unit, RawCycleRow};
use inference_engine::{round_rul, FittedPipeline, InferenceError};
use serde::Serialize;

/// Predicted RUL at the last observed cycle of one unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitPrediction {
    pub unit_number: u32,
    pub predicted_rul: f64,
}

/// Score every unit in `rows` from its last cycle, ordered by unit id
pub fn predict_units(
    pipeline: &FittedPipeline,
    rows: &[RawCycleRow],
) -> Result<Vec<UnitPrediction>, InferenceError> {
    let units = last_cycle_per_unit(rows);
    if units.is_empty() {
        return Ok(Vec::new());
    }

    let predictions = pipeline.predict(&units.table)?;
    Ok(units
        .units
        .iter()
        .zip(predictions.iter())
        .map(|(&unit_number, &raw)| UnitPrediction {
            unit_number,
            predicted_rul: round_rul(raw),
        })
        .collect())
}
