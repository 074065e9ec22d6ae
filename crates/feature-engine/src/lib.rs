//! Feature Engineering Engine
//!
//! Turns raw CMAPSS cycle logs into model-ready feature rows: one row per
//! engine unit for batch scoring, one row per request when serving, and
//! RUL-labeled rows for training.

mod cycle;
mod error;
mod features;
mod labeling;
mod table;

pub use cycle::{
    parse_cycle_rows, read_cycle_rows, RawCycleRow, INDEX_NAMES, RAW_COLUMN_COUNT, SETTING_COUNT,
    SETTING_NAMES,
};
pub use error::FeatureError;
pub use features::{last_cycle_per_unit, UnitFeatures};
pub use labeling::{add_rul, features_and_target, LabeledCycleRow};
pub use table::FeatureTable;
