//! Validated Sensor Reading

use crate::error::ValidationErrors;
use crate::schema::{sensor_index, SENSOR_COUNT, SENSOR_NAMES};
use crate::validator::SensorValidator;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// One normalized snapshot of all 21 sensors.
///
/// Only obtainable through validation, so every value is finite and inside
/// the configured sensor range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    values: [f64; SENSOR_COUNT],
}

impl SensorReading {
    pub(crate) fn from_checked(values: [f64; SENSOR_COUNT]) -> Self {
        Self { values }
    }

    /// Build a reading from values in canonical `s_1..s_21` order
    pub fn from_values(values: [f64; SENSOR_COUNT]) -> Result<Self, ValidationErrors> {
        SensorValidator::default().validate_values(values)
    }

    /// Values in canonical order
    pub fn values(&self) -> &[f64; SENSOR_COUNT] {
        &self.values
    }

    /// Value of a single sensor by key
    pub fn get(&self, name: &str) -> Option<f64> {
        sensor_index(name).map(|i| self.values[i])
    }

    /// `(key, value)` pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        SENSOR_NAMES.iter().copied().zip(self.values.iter().copied())
    }
}

impl Serialize for SensorReading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(SENSOR_COUNT))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}

impl TryFrom<&serde_json::Value> for SensorReading {
    type Error = ValidationErrors;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        SensorValidator::default().validate_value(value)
    }
}
