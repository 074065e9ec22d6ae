//! Raw CMAPSS Cycle Records

use crate::error::FeatureError;
use sensor_schema::{SENSOR_COUNT, SENSOR_NAMES};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Number of operating-setting columns
pub const SETTING_COUNT: usize = 3;

/// Identifying columns dropped before modelling
pub const INDEX_NAMES: [&str; 2] = ["unit_number", "time_cycles"];

/// Operating-setting columns dropped before modelling
pub const SETTING_NAMES: [&str; SETTING_COUNT] = ["setting_1", "setting_2", "setting_3"];

/// Total columns in a raw CMAPSS row
pub const RAW_COLUMN_COUNT: usize = INDEX_NAMES.len() + SETTING_COUNT + SENSOR_COUNT;

/// One observed cycle of one engine unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCycleRow {
    /// Engine unit identifier
    pub unit: u32,
    /// Cycle index, increasing per unit
    pub cycle: u32,
    /// Operating settings
    pub settings: [f64; SETTING_COUNT],
    /// Raw sensor values in canonical order
    pub sensors: [f64; SENSOR_COUNT],
}

impl RawCycleRow {
    /// Parse one whitespace-delimited line (`line` is 1-based, for errors)
    pub fn parse_line(text: &str, line: usize) -> Result<Self, FeatureError> {
        let fields: Vec<&str> = text.split_whitespace().collect();
        if fields.len() != RAW_COLUMN_COUNT {
            return Err(FeatureError::ColumnCount {
                line,
                expected: RAW_COLUMN_COUNT,
                found: fields.len(),
            });
        }

        let unit = parse_field::<u32>(fields[0], line, INDEX_NAMES[0])?;
        let cycle = parse_field::<u32>(fields[1], line, INDEX_NAMES[1])?;

        let mut settings = [0.0; SETTING_COUNT];
        for (i, slot) in settings.iter_mut().enumerate() {
            *slot = parse_field::<f64>(fields[2 + i], line, SETTING_NAMES[i])?;
        }

        let offset = INDEX_NAMES.len() + SETTING_COUNT;
        let mut sensors = [0.0; SENSOR_COUNT];
        for (i, slot) in sensors.iter_mut().enumerate() {
            *slot = parse_field::<f64>(fields[offset + i], line, SENSOR_NAMES[i])?;
        }

        Ok(Self {
            unit,
            cycle,
            settings,
            sensors,
        })
    }
}

fn parse_field<T: std::str::FromStr>(
    raw: &str,
    line: usize,
    column: &'static str,
) -> Result<T, FeatureError> {
    raw.parse().map_err(|_| FeatureError::InvalidValue {
        line,
        column,
        value: raw.to_string(),
    })
}

/// Parse a whole CMAPSS table. Blank lines are skipped.
pub fn parse_cycle_rows(text: &str) -> Result<Vec<RawCycleRow>, FeatureError> {
    text.lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, l)| RawCycleRow::parse_line(l, i + 1))
        .collect()
}

/// Read and parse a CMAPSS table from disk
pub fn read_cycle_rows(path: impl AsRef<Path>) -> Result<Vec<RawCycleRow>, FeatureError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| FeatureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = parse_cycle_rows(&text)?;
    debug!("Parsed {} cycle rows from {}", rows.len(), path.display());
    Ok(rows)
}
