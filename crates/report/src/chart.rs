//! Anomaly chart widget for one flagged group.

use anomaly_spi::GroupChart;
use chrono::NaiveDateTime;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget},
};

use crate::render::buffer_to_string;

fn x_of(timestamp: NaiveDateTime) -> f64 {
    timestamp.and_utc().timestamp() as f64
}

fn label_of(x: f64) -> String {
    chrono::DateTime::from_timestamp(x as i64, 0)
        .map(|ts| ts.naive_utc().format("%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

/// Owned plot series for a [`GroupChart`].
///
/// Chart datasets borrow their points, so the series live here and the
/// widget is built from a reference to them.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub forecast: Vec<(f64, f64)>,
    pub lower: Vec<(f64, f64)>,
    pub upper: Vec<(f64, f64)>,
    pub actual: Vec<(f64, f64)>,
    pub anomalies: Vec<(f64, f64)>,
    pub change_point: Vec<(f64, f64)>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl ChartData {
    pub fn from_chart(chart: &GroupChart) -> Self {
        let forecast: Vec<(f64, f64)> =
            chart.forecast.iter().map(|p| (x_of(p.timestamp), p.yhat)).collect();
        let lower: Vec<(f64, f64)> =
            chart.forecast.iter().map(|p| (x_of(p.timestamp), p.lower)).collect();
        let upper: Vec<(f64, f64)> =
            chart.forecast.iter().map(|p| (x_of(p.timestamp), p.upper)).collect();
        let actual: Vec<(f64, f64)> =
            chart.actual.iter().map(|o| (x_of(o.timestamp), o.value)).collect();
        let anomalies: Vec<(f64, f64)> =
            chart.anomalies.iter().map(|p| (x_of(p.timestamp), p.value)).collect();

        let cp = x_of(chart.change_point);
        let all = forecast
            .iter()
            .chain(&lower)
            .chain(&upper)
            .chain(&actual);

        let (mut x_min, mut x_max) = (cp, cp);
        let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for &(x, y) in all {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            if y.is_finite() {
                y_min = y_min.min(y);
                y_max = y_max.max(y);
            }
        }
        if !y_min.is_finite() {
            (y_min, y_max) = (0.0, 1.0);
        }
        let pad = ((y_max - y_min) * 0.05).max(1e-6);
        let y_bounds = [y_min - pad, y_max + pad];
        let x_bounds = if x_max > x_min {
            [x_min, x_max]
        } else {
            [x_min - 1.0, x_min + 1.0]
        };

        Self {
            forecast,
            lower,
            upper,
            actual,
            anomalies,
            change_point: vec![(cp, y_bounds[0]), (cp, y_bounds[1])],
            x_bounds,
            y_bounds,
        }
    }
}

/// Create the anomaly chart: forecast, band, actuals, anomaly markers and
/// the change point line.
pub fn create_anomaly_chart<'a>(data: &'a ChartData, title: String, kpi: &'a str) -> Chart<'a> {
    let datasets = vec![
        Dataset::default()
            .name("Lower bound")
            .marker(Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::DarkGray))
            .data(&data.lower),
        Dataset::default()
            .name("Upper bound")
            .marker(Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::DarkGray))
            .data(&data.upper),
        Dataset::default()
            .name("Forecast")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Blue))
            .data(&data.forecast),
        Dataset::default()
            .name("Actual")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::White))
            .data(&data.actual),
        Dataset::default()
            .name("Changepoint")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Green))
            .data(&data.change_point),
        Dataset::default()
            .name("Anomaly")
            .marker(Marker::Block)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Red))
            .data(&data.anomalies),
    ];

    let [x_min, x_max] = data.x_bounds;
    let [y_min, y_max] = data.y_bounds;

    Chart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title(title))
        .x_axis(
            Axis::default()
                .title("Time")
                .style(Style::default().fg(Color::Gray))
                .bounds(data.x_bounds)
                .labels(vec![
                    Span::raw(label_of(x_min)),
                    Span::raw(label_of((x_min + x_max) / 2.0)),
                    Span::raw(label_of(x_max)),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(kpi)
                .style(Style::default().fg(Color::Gray))
                .bounds(data.y_bounds)
                .labels(vec![
                    Span::raw(format!("{:.1}", y_min)),
                    Span::raw(format!("{:.1}", (y_min + y_max) / 2.0)),
                    Span::raw(format!("{:.1}", y_max)),
                ]),
        )
}

/// Draw `chart` into a `width` x `height` buffer and return it as text.
pub fn render_chart(chart: &GroupChart, width: u16, height: u16) -> String {
    let data = ChartData::from_chart(chart);
    let title = format!("[{}] - Anomaly Detection", chart.group);
    let area = Rect::new(0, 0, width, height);
    let mut buffer = Buffer::empty(area);
    create_anomaly_chart(&data, title, &chart.kpi).render(area, &mut buffer);
    buffer_to_string(&buffer)
}
