//! Splitting a table into per-group series.

use std::collections::HashMap;

use anomaly_spi::{AnomalyError, GroupKey, GroupSeries, Result};
use chrono::NaiveDateTime;
use forecast_spi::Observation;
use table_spi::{CellValue, RawTable};

/// Index of a named column.
pub fn column_index(table: &RawTable, name: &str) -> Result<usize> {
    table
        .column_index(name)
        .ok_or_else(|| AnomalyError::ColumnNotFound {
            column: name.to_string(),
            available: table.columns().to_vec(),
        })
}

/// Identity of a group cell.
///
/// Numbers compare by value, so `7` and `7.0` share a group while the text
/// `"7"` forms its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum GroupToken {
    Number(u64),
    Text(String),
    Time(NaiveDateTime),
}

impl GroupToken {
    /// `None` for null cells.
    pub(crate) fn of(cell: &CellValue) -> Option<Self> {
        match cell {
            CellValue::Null => None,
            CellValue::Float(f) if f.is_nan() => None,
            CellValue::Int(i) => Some(Self::number(*i as f64)),
            CellValue::Float(f) => Some(Self::number(*f)),
            CellValue::Bool(b) => Some(Self::number(if *b { 1.0 } else { 0.0 })),
            CellValue::Text(s) => Some(GroupToken::Text(s.clone())),
            CellValue::DateTime(ts) => Some(GroupToken::Time(*ts)),
        }
    }

    fn number(value: f64) -> Self {
        // -0.0 and 0.0 are the same group.
        let value = if value == 0.0 { 0.0 } else { value };
        GroupToken::Number(value.to_bits())
    }
}

/// Rows of one group after dropping null times and values.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupRows {
    pub key: GroupKey,
    pub observations: Vec<Observation>,
    /// Non-null KPI cells that are not numbers, as displayed.
    pub non_numeric: Vec<String>,
}

impl GroupRows {
    /// Valid points, including values that will fail numeric conversion.
    pub fn valid_points(&self) -> usize {
        self.observations.len() + self.non_numeric.len()
    }

    pub fn into_series(self) -> GroupSeries {
        GroupSeries::new(self.key, self.observations)
    }
}

/// Partition rows by the value of the group column.
///
/// Groups come out in first-seen order; rows with a null group are not
/// assigned to any group. Cells of different types stay apart even when
/// they display alike, so the number `1` and the text `"1"` are two groups
/// whose keys read the same.
pub fn split_groups(table: &RawTable, group: usize, time: usize, kpi: usize) -> Vec<GroupRows> {
    let mut index: HashMap<GroupToken, usize> = HashMap::new();
    let mut groups: Vec<GroupRows> = Vec::new();

    for row in table.rows() {
        let group_cell = &row[group];
        let Some(token) = GroupToken::of(group_cell) else {
            continue;
        };

        let slot = *index.entry(token).or_insert_with(|| {
            groups.push(GroupRows {
                key: GroupKey::new(group_cell.to_string()),
                observations: Vec::new(),
                non_numeric: Vec::new(),
            });
            groups.len() - 1
        });

        let Some(timestamp) = row[time].to_timestamp() else {
            continue;
        };
        let cell = &row[kpi];
        if cell.is_null() {
            continue;
        }
        match cell.as_f64() {
            Some(value) => groups[slot]
                .observations
                .push(Observation::new(timestamp, value)),
            None => groups[slot].non_numeric.push(cell.to_string()),
        }
    }

    groups
}
