//! Per-Unit Feature Preparation

use crate::cycle::RawCycleRow;
use crate::table::FeatureTable;
use sensor_schema::SENSOR_COUNT;
use std::collections::BTreeMap;
use tracing::debug;

/// One feature row per engine unit, taken from each unit's last cycle
#[derive(Debug, Clone, PartialEq)]
pub struct UnitFeatures {
    /// Unit ids, ascending, aligned with table rows
    pub units: Vec<u32>,
    /// Sensor columns only
    pub table: FeatureTable,
}

impl UnitFeatures {
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// Keep the row with the highest cycle index for each unit.
///
/// Identifying and setting columns are dropped. Rows come out ordered by unit
/// id ascending. When a unit repeats its maximum cycle index the row that
/// appears last in the input wins.
pub fn last_cycle_per_unit(rows: &[RawCycleRow]) -> UnitFeatures {
    let mut last: BTreeMap<u32, &RawCycleRow> = BTreeMap::new();
    for row in rows {
        last.entry(row.unit)
            .and_modify(|kept| {
                if row.cycle >= kept.cycle {
                    *kept = row;
                }
            })
            .or_insert(row);
    }

    let units: Vec<u32> = last.keys().copied().collect();
    let sensors: Vec<[f64; SENSOR_COUNT]> = last.values().map(|r| r.sensors).collect();

    debug!("Extracted last cycle for {} units from {} rows", units.len(), rows.len());

    UnitFeatures {
        units,
        table: FeatureTable::from_sensor_rows(&sensors),
    }
}
