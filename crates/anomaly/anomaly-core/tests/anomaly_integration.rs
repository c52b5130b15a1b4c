//! Integration tests running the default forecaster over tables loaded from
//! CSV files and spreadsheets.

use std::fmt::Write as _;
use std::path::Path;

use anomaly_api::{parse_change_point, DetectionConfigBuilder, Reducer};
use anomaly_core::grouping::column_index;
use anomaly_core::{split_groups, AnomalyPipeline, CollectingSink};
use forecast_api::ForecastConfig;
use rust_xlsxwriter::{ExcelDateTime, Format};
use table_core::Workbook;

/// Two days of hourly rows for three cells under two sites.
fn kpi_csv() -> String {
    let mut csv = String::from("Period start time,traffic,LNCEL name,LNBTS name\n");
    for hour in 0..48 {
        let day = hour / 24 + 5;
        let hh = hour % 24;
        let cycle = (2.0 * std::f64::consts::PI * f64::from(hour) / 24.0).sin();
        for (cell, site, level) in [("c1", "s1", 100.0), ("c2", "s1", 80.0), ("c3", "s2", 60.0)] {
            let mut value = level + 10.0 * cycle;
            if cell == "c3" && (37..=39).contains(&hour) {
                value += 400.0;
            }
            writeln!(csv, "2025-05-{:02} {:02}:00:00,{:.3},{},{}", day, hh, value, cell, site).unwrap();
        }
    }
    csv
}

fn load() -> (tempfile::TempDir, Workbook) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kpi.csv");
    std::fs::write(&path, kpi_csv()).unwrap();
    let workbook = Workbook::open(&path).unwrap();
    (dir, workbook)
}

#[test]
fn test_default_forecaster_run_is_repeatable() {
    let (_dir, mut workbook) = load();
    let table = workbook.select(None).unwrap().clone();

    let pipeline = AnomalyPipeline::with_defaults(ForecastConfig::default()).unwrap();
    let detection = DetectionConfigBuilder::new("LNCEL name")
        .kpi_column("traffic")
        .threshold(1)
        .build()
        .unwrap();

    let mut first_sink = CollectingSink::default();
    let first = pipeline.run(&table, &detection, &mut first_sink).unwrap();
    let mut second_sink = CollectingSink::default();
    let second = pipeline.run(&table, &detection, &mut second_sink).unwrap();

    assert_eq!(first, second);
    assert_eq!(first_sink.charts, second_sink.charts);
    assert_eq!(first.groups, 3);
    assert!(first.failures.is_empty());
    assert!(first.report.iter().all(|e| e.anomaly_count >= 1));
    assert!(first.report.contains("c3"));
}

#[test]
fn test_site_column_is_aggregated() {
    let (_dir, mut workbook) = load();
    let table = workbook.select(None).unwrap().clone();

    let pipeline = AnomalyPipeline::with_defaults(ForecastConfig::default()).unwrap();
    let detection = DetectionConfigBuilder::new("LNBTS name")
        .time_column("Period start time")
        .kpi_column("traffic")
        .reducer(Reducer::Sum)
        .threshold(1)
        .build()
        .unwrap();

    let mut sink = CollectingSink::default();
    let outcome = pipeline.run(&table, &detection, &mut sink).unwrap();

    assert_eq!(outcome.groups, 2);
    for chart in &sink.charts {
        assert_eq!(chart.actual.len(), 48);
    }
    // The cached table is untouched by coercion and aggregation.
    assert_eq!(workbook.select(None).unwrap().row_count(), 144);
}

#[test]
fn test_change_point_on_group_timestamp_injects_break() {
    let (_dir, mut workbook) = load();
    let table = workbook.select(None).unwrap().clone();

    let pipeline = AnomalyPipeline::with_defaults(ForecastConfig::default()).unwrap();
    let detection = DetectionConfigBuilder::new("LNCEL name")
        .kpi_column("traffic")
        .change_point_str("2025-05-06 12:00:00")
        .unwrap()
        .threshold(1)
        .build()
        .unwrap();

    let outcome = pipeline
        .run(&table, &detection, &mut CollectingSink::default())
        .unwrap();
    assert!(outcome.failures.is_empty());
    assert_eq!(outcome.analysed(), 3);
}

/// The c3 series of [`kpi_csv`] as a worksheet with Excel date cells.
fn write_kpi_xlsx(path: &Path) {
    let mut book = rust_xlsxwriter::Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");
    let sheet = book.add_worksheet();
    sheet.set_name("hourly").unwrap();
    sheet.write_string(0, 0, "Period start time").unwrap();
    sheet.write_string(0, 1, "traffic").unwrap();
    sheet.write_string(0, 2, "LNCEL name").unwrap();
    for hour in 0..48u16 {
        let row = u32::from(hour) + 1;
        let when = ExcelDateTime::from_ymd(2025, 5, (hour / 24 + 5) as u8)
            .unwrap()
            .and_hms(hour % 24, 0, 0)
            .unwrap();
        let cycle = (2.0 * std::f64::consts::PI * f64::from(hour) / 24.0).sin();
        let mut value = 60.0 + 10.0 * cycle;
        if (37..=39).contains(&hour) {
            value += 400.0;
        }
        sheet.write_datetime_with_format(row, 0, &when, &date_format).unwrap();
        sheet.write_number(row, 1, value).unwrap();
        sheet.write_string(row, 2, "c3").unwrap();
    }
    book.save(path).unwrap();
}

#[test]
fn test_xlsx_date_cells_match_change_point_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kpi.xlsx");
    write_kpi_xlsx(&path);

    let mut workbook = Workbook::open(&path).unwrap();
    let table = workbook.select(Some("hourly")).unwrap().clone();
    let change_point = parse_change_point("2025-05-06 12:00:00").unwrap();

    let groups = split_groups(
        &table,
        column_index(&table, "LNCEL name").unwrap(),
        column_index(&table, "Period start time").unwrap(),
        column_index(&table, "traffic").unwrap(),
    );
    assert_eq!(groups.len(), 1);
    let series = groups.into_iter().next().unwrap().into_series();
    assert_eq!(series.len(), 48);
    assert!(series.contains_timestamp(change_point));

    let pipeline = AnomalyPipeline::with_defaults(ForecastConfig::default()).unwrap();
    let detection = DetectionConfigBuilder::new("LNCEL name")
        .kpi_column("traffic")
        .change_point(change_point)
        .threshold(1)
        .build()
        .unwrap();
    let mut sink = CollectingSink::default();
    let outcome = pipeline.run(&table, &detection, &mut sink).unwrap();

    assert!(outcome.failures.is_empty());
    assert!(outcome.report.contains("c3"));
    assert_eq!(sink.charts[0].change_point, change_point);
    assert!(sink.charts[0].anomalies.iter().all(|p| p.timestamp >= change_point));
}
