//! Sensor Schema and Validation
//!
//! Defines the 21 normalized CMAPSS sensor fields and the admission check
//! every prediction request passes before it reaches the model.

mod error;
mod reading;
mod schema;
mod validator;

pub use error::{ValidationError, ValidationErrors};
pub use reading::SensorReading;
pub use schema::{
    sensor_columns, sensor_description, sensor_index, SENSOR_COUNT, SENSOR_NAMES, SENSOR_RANGE,
};
pub use validator::{SensorValidator, ValidationConfig};
