//! Summary table of flagged groups.

use anomaly_spi::{AnomalyReport, ReportEntry};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Row, Table, Widget},
};

use crate::render::buffer_to_string;

const COUNT_HEADER: &str = "anomaly count";

/// Table rows drawn per off-screen buffer.
const ROWS_PER_CHUNK: usize = 1_000;

/// Render `report` as a bordered two-column table headed by `group_label`.
///
/// Long reports are drawn in slices stacked under one another, so the
/// table height is not bounded by a single buffer.
pub fn render_summary(report: &AnomalyReport, group_label: &str) -> String {
    let count_width = COUNT_HEADER.len() as u16;
    let longest = report
        .iter()
        .map(|e| e.group.as_str().chars().count())
        .chain(std::iter::once(group_label.chars().count()))
        .max()
        .unwrap_or(0);
    // Borders and one column gap.
    let group_width = u16::try_from(longest)
        .unwrap_or(u16::MAX)
        .min(u16::MAX - count_width - 3);
    let widths = [group_width, count_width];

    let entries = report.entries();
    let chunks: Vec<&[ReportEntry]> = if entries.is_empty() {
        vec![entries]
    } else {
        entries.chunks(ROWS_PER_CHUNK).collect()
    };
    let last = chunks.len() - 1;

    chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| render_slice(chunk, group_label, widths, i == 0, i == last))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One vertical slice of the summary table. Only the first slice carries
/// the title and header, only the last one the bottom border.
fn render_slice(
    entries: &[ReportEntry],
    group_label: &str,
    [group_width, count_width]: [u16; 2],
    first: bool,
    last: bool,
) -> String {
    let rows: Vec<Row> = entries
        .iter()
        .map(|e| Row::new(vec![e.group.to_string(), e.anomaly_count.to_string()]))
        .collect();

    let mut borders = Borders::LEFT | Borders::RIGHT;
    let mut height = entries.len();
    if first {
        borders |= Borders::TOP;
        height += 2;
    }
    if last {
        borders |= Borders::BOTTOM;
        height += 1;
    }

    let mut block = Block::default().borders(borders);
    let mut table = Table::new(
        rows,
        [Constraint::Length(group_width), Constraint::Length(count_width)],
    );
    if first {
        block = block.title(" Anomalous groups ");
        table = table.header(
            Row::new(vec![group_label.to_string(), COUNT_HEADER.to_string()])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        );
    }
    let table = table.block(block);

    let width = group_width.saturating_add(count_width + 3).max(22);
    let height = u16::try_from(height).unwrap_or(u16::MAX);
    let area = Rect::new(0, 0, width, height);
    let mut buffer = Buffer::empty(area);
    table.render(area, &mut buffer);
    buffer_to_string(&buffer)
}
