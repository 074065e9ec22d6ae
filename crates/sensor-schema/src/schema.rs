//! CMAPSS Sensor Schema

/// Number of sensor channels in every CMAPSS record
pub const SENSOR_COUNT: usize = 21;

/// Accepted range for a normalized sensor value (inclusive)
pub const SENSOR_RANGE: (f64, f64) = (0.0, 1.0);

/// Canonical sensor keys, in model feature order
pub const SENSOR_NAMES: [&str; SENSOR_COUNT] = [
    "s_1", "s_2", "s_3", "s_4", "s_5", "s_6", "s_7", "s_8", "s_9", "s_10", "s_11",
    "s_12", "s_13", "s_14", "s_15", "s_16", "s_17", "s_18", "s_19", "s_20", "s_21",
];

const SENSOR_DESCRIPTIONS: [&str; SENSOR_COUNT] = [
    "Fan inlet temperature (°R)",
    "LPC outlet temperature (°R)",
    "HPC outlet temperature (°R)",
    "LPT outlet temperature (°R)",
    "Fan inlet pressure (psia)",
    "Bypass-duct pressure (psia)",
    "HPC outlet pressure (psia)",
    "Physical fan speed (rpm)",
    "Physical core speed (rpm)",
    "Engine pressure ratio (P50/P2)",
    "HPC outlet static pressure (psia)",
    "Ratio of fuel flow to Ps30 (pps/psia)",
    "Corrected fan speed (rpm)",
    "Corrected core speed (rpm)",
    "Bypass ratio",
    "Burner fuel-air ratio",
    "Bleed enthalpy",
    "Required fan speed",
    "Required fan conversion speed",
    "High-pressure turbine cool air flow",
    "Low-pressure turbine cool air flow",
];

/// Position of a sensor key in the canonical order
pub fn sensor_index(name: &str) -> Option<usize> {
    SENSOR_NAMES.iter().position(|&n| n == name)
}

/// Human-readable description of a sensor key
pub fn sensor_description(name: &str) -> Option<&'static str> {
    sensor_index(name).map(|i| SENSOR_DESCRIPTIONS[i])
}

/// Canonical sensor names as owned column labels
pub fn sensor_columns() -> Vec<String> {
    SENSOR_NAMES.iter().map(|n| n.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_sequential() {
        for (i, name) in SENSOR_NAMES.iter().enumerate() {
            assert_eq!(*name, format!("s_{}", i + 1));
        }
    }

    #[test]
    fn test_sensor_index() {
        assert_eq!(sensor_index("s_1"), Some(0));
        assert_eq!(sensor_index("s_21"), Some(20));
        assert_eq!(sensor_index("s_22"), None);
        assert_eq!(sensor_index("S_1"), None);
    }

    #[test]
    fn test_sensor_description() {
        assert_eq!(sensor_description("s_2"), Some("LPC outlet temperature (°R)"));
        assert_eq!(sensor_description("s_21"), Some("Low-pressure turbine cool air flow"));
        assert!(sensor_description("unit_number").is_none());
    }
}
