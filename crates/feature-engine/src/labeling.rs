//! Remaining Useful Life Labeling

use crate::cycle::RawCycleRow;
use crate::table::FeatureTable;
use ndarray::Array1;
use sensor_schema::SENSOR_COUNT;
use std::collections::HashMap;

/// A training row with its RUL target
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledCycleRow {
    pub row: RawCycleRow,
    /// Cycles left until the unit's last observed cycle
    pub rul: u32,
}

/// Attach `rul = max_cycle(unit) - cycle` to every row.
///
/// Row order and count are preserved.
pub fn add_rul(rows: &[RawCycleRow]) -> Vec<LabeledCycleRow> {
    let mut max_cycle: HashMap<u32, u32> = HashMap::new();
    for row in rows {
        let max = max_cycle.entry(row.unit).or_insert(row.cycle);
        *max = (*max).max(row.cycle);
    }

    rows.iter()
        .map(|row| LabeledCycleRow {
            rul: max_cycle[&row.unit] - row.cycle,
            row: row.clone(),
        })
        .collect()
}

/// Drop identifying and setting columns; split into sensor features and RUL target
pub fn features_and_target(rows: &[LabeledCycleRow]) -> (FeatureTable, Array1<f64>) {
    let sensors: Vec<[f64; SENSOR_COUNT]> = rows.iter().map(|r| r.row.sensors).collect();
    let target: Array1<f64> = rows.iter().map(|r| f64::from(r.rul)).collect();
    (FeatureTable::from_sensor_rows(&sensors), target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn row(unit: u32, cycle: u32) -> RawCycleRow {
        RawCycleRow {
            unit,
            cycle,
            settings: [0.0; 3],
            sensors: [cycle as f64; SENSOR_COUNT],
        }
    }

    #[test]
    fn test_rul_counts_down_to_zero() {
        let rows: Vec<_> = (1..=5).map(|c| row(1, c)).collect();
        let labeled = add_rul(&rows);
        let ruls: Vec<u32> = labeled.iter().map(|r| r.rul).collect();
        assert_eq!(ruls, vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_order_preserved_across_units() {
        let rows = vec![row(2, 1), row(1, 1), row(2, 2), row(1, 2), row(1, 3)];
        let labeled = add_rul(&rows);
        let pairs: Vec<(u32, u32)> = labeled.iter().map(|r| (r.row.unit, r.rul)).collect();
        assert_eq!(pairs, vec![(2, 1), (1, 2), (2, 0), (1, 1), (1, 0)]);
    }

    #[test]
    fn test_features_and_target() {
        let labeled = add_rul(&[row(1, 1), row(1, 2)]);
        let (table, target) = features_and_target(&labeled);
        assert_eq!(table.nrows(), 2);
        assert_eq!(table.ncols(), SENSOR_COUNT);
        assert_eq!(target.to_vec(), vec![1.0, 0.0]);
    }

    proptest! {
        #[test]
        fn prop_rul_is_n_minus_cycle(n in 1u32..400) {
            let rows: Vec<_> = (1..=n).map(|c| row(7, c)).collect();
            let labeled = add_rul(&rows);
            prop_assert_eq!(labeled.len(), rows.len());
            for l in &labeled {
                prop_assert_eq!(l.rul, n - l.row.cycle);
            }
            prop_assert_eq!(labeled.last().map(|l| l.rul), Some(0));
        }
    }
}
