//! Per-(group, time) aggregation for coarse-element grouping columns.

use std::collections::HashMap;

use anomaly_api::Reducer;
use anomaly_spi::Result;
use chrono::NaiveDateTime;
use table_spi::{CellValue, RawTable};

use crate::grouping::{column_index, GroupToken};

struct Bucket {
    group: CellValue,
    time: NaiveDateTime,
    values: Vec<f64>,
}

/// Collapse rows sharing a (group, time) pair into one row.
///
/// The result has the columns `[group, time, kpi]`, one row per pair in
/// first-seen order. Rows with a null group or time are dropped, as are
/// KPI cells that are null or not numeric.
pub fn aggregate(
    table: &RawTable,
    group: &str,
    time: &str,
    kpi: &str,
    reducer: Reducer,
) -> Result<RawTable> {
    let group_idx = column_index(table, group)?;
    let time_idx = column_index(table, time)?;
    let kpi_idx = column_index(table, kpi)?;

    let mut index: HashMap<(GroupToken, NaiveDateTime), usize> = HashMap::new();
    let mut buckets: Vec<Bucket> = Vec::new();
    let mut non_numeric = 0usize;

    for row in table.rows() {
        let group_cell = &row[group_idx];
        let Some(token) = GroupToken::of(group_cell) else {
            continue;
        };
        let Some(ts) = row[time_idx].to_timestamp() else {
            continue;
        };

        let slot = *index
            .entry((token, ts))
            .or_insert_with(|| {
                buckets.push(Bucket {
                    group: group_cell.clone(),
                    time: ts,
                    values: Vec::new(),
                });
                buckets.len() - 1
            });

        let cell = &row[kpi_idx];
        if cell.is_null() {
            continue;
        }
        match cell.as_f64() {
            Some(value) => buckets[slot].values.push(value),
            None => non_numeric += 1,
        }
    }

    if non_numeric > 0 {
        tracing::warn!(non_numeric, column = kpi, "non-numeric KPI cells ignored by aggregation");
    }
    tracing::debug!(
        rows = table.row_count(),
        buckets = buckets.len(),
        %reducer,
        "aggregated coarse-element rows"
    );

    let rows = buckets
        .into_iter()
        .map(|b| {
            vec![
                b.group,
                CellValue::DateTime(b.time),
                CellValue::from(reducer.apply(&b.values)),
            ]
        })
        .collect();

    Ok(RawTable::new(
        vec![group.to_string(), time.to_string(), kpi.to_string()],
        rows,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anomaly_spi::AnomalyError;
    use chrono::{Duration, NaiveDate};

    fn at(hour: i64) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, 6)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            + Duration::hours(hour)
    }

    fn row(group: &str, hour: i64, value: CellValue) -> Vec<CellValue> {
        vec![CellValue::from(at(hour)), CellValue::from(group), value]
    }

    fn table(rows: Vec<Vec<CellValue>>) -> RawTable {
        RawTable::new(
            vec!["time".into(), "MRBTS name".into(), "traffic".into()],
            rows,
        )
        .unwrap()
    }

    #[test]
    fn test_sum_matches_arithmetic_sum() {
        let input = table(vec![
            row("site-1", 0, CellValue::Float(1.5)),
            row("site-1", 0, CellValue::Int(2)),
            row("site-1", 0, CellValue::Float(3.25)),
            row("site-1", 1, CellValue::Float(4.0)),
        ]);
        let out = aggregate(&input, "MRBTS name", "time", "traffic", Reducer::Sum).unwrap();

        assert_eq!(out.columns(), &["MRBTS name", "time", "traffic"]);
        assert_eq!(out.row_count(), 2);
        assert_eq!(out.rows()[0][2], CellValue::Float(6.75));
        assert_eq!(out.rows()[1][2], CellValue::Float(4.0));
    }

    #[test]
    fn test_first_seen_order() {
        let input = table(vec![
            row("b", 1, CellValue::Int(1)),
            row("a", 0, CellValue::Int(1)),
            row("b", 0, CellValue::Int(1)),
            row("b", 1, CellValue::Int(1)),
        ]);
        let out = aggregate(&input, "MRBTS name", "time", "traffic", Reducer::Sum).unwrap();

        let keys: Vec<(String, CellValue)> = out
            .rows()
            .iter()
            .map(|r| (r[0].to_string(), r[1].clone()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("b".to_string(), CellValue::from(at(1))),
                ("a".to_string(), CellValue::from(at(0))),
                ("b".to_string(), CellValue::from(at(0))),
            ]
        );
        assert_eq!(out.rows()[0][2], CellValue::Float(2.0));
    }

    #[test]
    fn test_mean_and_median() {
        let input = table(vec![
            row("s", 0, CellValue::Int(1)),
            row("s", 0, CellValue::Int(2)),
            row("s", 0, CellValue::Int(10)),
        ]);
        let mean = aggregate(&input, "MRBTS name", "time", "traffic", Reducer::Mean).unwrap();
        let median = aggregate(&input, "MRBTS name", "time", "traffic", Reducer::Median).unwrap();
        assert_eq!(mean.rows()[0][2], CellValue::Float(13.0 / 3.0));
        assert_eq!(median.rows()[0][2], CellValue::Float(2.0));
    }

    #[test]
    fn test_null_keys_dropped_and_empty_buckets() {
        let input = table(vec![
            vec![CellValue::Null, CellValue::from("s"), CellValue::Int(1)],
            vec![CellValue::from(at(0)), CellValue::Null, CellValue::Int(1)],
            row("s", 1, CellValue::Null),
        ]);
        let sum = aggregate(&input, "MRBTS name", "time", "traffic", Reducer::Sum).unwrap();
        assert_eq!(sum.row_count(), 1);
        assert_eq!(sum.rows()[0][2], CellValue::Float(0.0));

        let mean = aggregate(&input, "MRBTS name", "time", "traffic", Reducer::Mean).unwrap();
        assert_eq!(mean.rows()[0][2], CellValue::Null);
    }

    #[test]
    fn test_numeric_group_keys_merge_by_value() {
        let input = RawTable::new(
            vec!["time".into(), "LNBTS id".into(), "kpi".into()],
            vec![
                vec![CellValue::from(at(0)), CellValue::Int(7), CellValue::Int(1)],
                vec![CellValue::from(at(0)), CellValue::Float(7.0), CellValue::Int(2)],
                vec![CellValue::from(at(0)), CellValue::from("7"), CellValue::Int(4)],
            ],
        )
        .unwrap();
        let out = aggregate(&input, "LNBTS id", "time", "kpi", Reducer::Sum).unwrap();
        assert_eq!(out.row_count(), 2);
        assert_eq!(out.rows()[0][0], CellValue::Int(7));
        assert_eq!(out.rows()[0][2], CellValue::Float(3.0));
        assert_eq!(out.rows()[1][0], CellValue::from("7"));
        assert_eq!(out.rows()[1][2], CellValue::Float(4.0));
    }

    #[test]
    fn test_missing_column() {
        let input = table(vec![]);
        assert!(matches!(
            aggregate(&input, "NRBTS", "time", "traffic", Reducer::Sum),
            Err(AnomalyError::ColumnNotFound { column, .. }) if column == "NRBTS"
        ));
    }
}
