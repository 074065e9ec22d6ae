//! Sensor Reading Validator

use crate::error::{ValidationError, ValidationErrors};
use crate::reading::SensorReading;
use crate::schema::{sensor_index, SENSOR_COUNT, SENSOR_NAMES, SENSOR_RANGE};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Valid range for every normalized sensor
    pub sensor_range: (f64, f64),
    /// Reject keys outside `s_1..s_21`
    pub reject_unknown_fields: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            sensor_range: SENSOR_RANGE,
            reject_unknown_fields: true,
        }
    }
}

/// Admission check for incoming sensor readings
#[derive(Debug, Clone)]
pub struct SensorValidator {
    config: ValidationConfig,
}

impl SensorValidator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a single value against a range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite { field });
        }
        if value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Validate one sensor value against the configured range
    pub fn validate_sensor(&self, field: &'static str, value: f64) -> Result<(), ValidationError> {
        self.validate_range(field, value, self.config.sensor_range)
    }

    /// Validate values already laid out in canonical order
    pub fn validate_values(
        &self,
        values: [f64; SENSOR_COUNT],
    ) -> Result<SensorReading, ValidationErrors> {
        let errors: Vec<_> = SENSOR_NAMES
            .iter()
            .zip(values.iter())
            .filter_map(|(&name, &value)| self.validate_sensor(name, value).err())
            .collect();

        if errors.is_empty() {
            Ok(SensorReading::from_checked(values))
        } else {
            Err(ValidationErrors::new(errors))
        }
    }

    /// Validate an arbitrary JSON value; anything but an object is rejected
    pub fn validate_value(&self, value: &Value) -> Result<SensorReading, ValidationErrors> {
        match value {
            Value::Object(map) => self.validate_map(map),
            other => Err(ValidationError::InvalidFormat(format!(
                "expected a JSON object of sensor values, got {}",
                json_kind(other)
            ))
            .into()),
        }
    }

    /// Validate a JSON object keyed by sensor name.
    ///
    /// All problems are collected: per-sensor errors in canonical order,
    /// followed by unknown keys in input order.
    pub fn validate_map(&self, map: &Map<String, Value>) -> Result<SensorReading, ValidationErrors> {
        let mut errors = Vec::new();
        let mut values = [0.0; SENSOR_COUNT];

        for (i, &name) in SENSOR_NAMES.iter().enumerate() {
            let Some(raw) = map.get(name) else {
                errors.push(ValidationError::MissingField(name));
                continue;
            };

            // Numeric strings are rejected, only JSON numbers are accepted
            let Some(value) = raw.as_f64() else {
                errors.push(ValidationError::NotANumber {
                    field: name,
                    found: json_kind(raw),
                });
                continue;
            };

            match self.validate_sensor(name, value) {
                Ok(()) => values[i] = value,
                Err(e) => errors.push(e),
            }
        }

        if self.config.reject_unknown_fields {
            errors.extend(
                map.keys()
                    .filter(|k| sensor_index(k).is_none())
                    .map(|k| ValidationError::UnknownField(k.clone())),
            );
        }

        if errors.is_empty() {
            Ok(SensorReading::from_checked(values))
        } else {
            debug!("Rejected sensor reading with {} error(s)", errors.len());
            Err(ValidationErrors::new(errors))
        }
    }
}

impl Default for SensorValidator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn sample_body() -> Map<String, Value> {
        let body = json!({
            "s_1": 0.0, "s_2": 0.421876, "s_3": 0.512349, "s_4": 0.0,
            "s_5": 1.0, "s_6": 0.492156, "s_7": 0.334521, "s_8": 0.198765,
            "s_9": 0.0, "s_10": 0.389234, "s_11": 0.578912, "s_12": 0.312456,
            "s_13": 0.167890, "s_14": 0.456123, "s_15": 0.0, "s_16": 0.423567,
            "s_17": 0.0, "s_18": 0.0, "s_19": 0.467823, "s_20": 0.534219,
            "s_21": 0.601234
        });
        body.as_object().cloned().unwrap()
    }

    #[test]
    fn test_valid_sample() {
        let validator = SensorValidator::default();
        let reading = validator.validate_map(&sample_body()).unwrap();
        assert_eq!(reading.get("s_2"), Some(0.421876));
        assert_eq!(reading.get("s_21"), Some(0.601234));
    }

    #[test]
    fn test_bounds_inclusive() {
        let validator = SensorValidator::default();
        assert!(validator.validate_sensor("s_1", 0.0).is_ok());
        assert!(validator.validate_sensor("s_1", 1.0).is_ok());
        assert!(validator.validate_sensor("s_1", -0.0001).is_err());
        assert!(validator.validate_sensor("s_1", 1.0001).is_err());
        assert!(matches!(
            validator.validate_sensor("s_1", f64::NAN),
            Err(ValidationError::NotFinite { field: "s_1" })
        ));
    }

    #[test]
    fn test_missing_key_named() {
        let validator = SensorValidator::default();
        let mut body = sample_body();
        body.remove("s_21");

        let err = validator.validate_map(&body).unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err.errors()[0], ValidationError::MissingField("s_21"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let validator = SensorValidator::default();
        let mut body = sample_body();
        body.insert("s_22".to_string(), json!(0.5));

        let err = validator.validate_map(&body).unwrap_err();
        assert!(err.mentions("s_22"));
    }

    #[test]
    fn test_unknown_key_allowed_when_lenient() {
        let validator = SensorValidator::new(ValidationConfig {
            reject_unknown_fields: false,
            ..Default::default()
        });
        let mut body = sample_body();
        body.insert("unit_number".to_string(), json!(3));
        assert!(validator.validate_map(&body).is_ok());
    }

    #[test]
    fn test_non_numeric_values() {
        let validator = SensorValidator::default();
        let mut body = sample_body();
        body.insert("s_3".to_string(), json!("0.5"));
        body.insert("s_4".to_string(), json!(true));
        body.insert("s_5".to_string(), Value::Null);

        let err = validator.validate_map(&body).unwrap_err();
        assert_eq!(err.len(), 3);
        assert_eq!(
            err.errors()[0],
            ValidationError::NotANumber { field: "s_3", found: "string" }
        );
        assert!(err.mentions("s_4"));
        assert!(err.mentions("s_5"));
    }

    #[test]
    fn test_collects_all_errors() {
        let validator = SensorValidator::default();
        let mut body = sample_body();
        body.remove("s_1");
        body.insert("s_9".to_string(), json!(42.0));

        let err = validator.validate_map(&body).unwrap_err();
        assert_eq!(err.len(), 2);
        assert!(err.mentions("s_1"));
        assert!(matches!(
            err.errors()[1],
            ValidationError::OutOfRange { field: "s_9", .. }
        ));
    }

    #[test]
    fn test_non_object_body() {
        let validator = SensorValidator::default();
        let err = validator.validate_value(&json!([0.1, 0.2])).unwrap_err();
        assert!(matches!(err.errors()[0], ValidationError::InvalidFormat(_)));
    }

    proptest! {
        #[test]
        fn prop_in_range_readings_accepted(values in proptest::array::uniform21(0.0f64..=1.0)) {
            let reading = SensorReading::from_values(values).unwrap();
            prop_assert_eq!(reading.values(), &values);
        }

        #[test]
        fn prop_out_of_range_value_rejected(
            idx in 0usize..SENSOR_COUNT,
            bad in prop_oneof![-1e6f64..-1e-9, (1.0f64 + 1e-9)..1e6],
        ) {
            let mut body = sample_body();
            body.insert(SENSOR_NAMES[idx].to_string(), json!(bad));
            let err = SensorValidator::default().validate_map(&body).unwrap_err();
            prop_assert!(err.mentions(SENSOR_NAMES[idx]));
        }

        #[test]
        fn prop_missing_key_rejected(idx in 0usize..SENSOR_COUNT) {
            let mut body = sample_body();
            body.remove(SENSOR_NAMES[idx]);
            let err = SensorValidator::default().validate_map(&body).unwrap_err();
            prop_assert_eq!(err.errors(), &[ValidationError::MissingField(SENSOR_NAMES[idx])][..]);
        }
    }
}
