use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;

use crate::telemetry::history::HistoryEntry;
use crate::telemetry::TelemetryCollector;
use crate::ui::theme;
use crate::ui::widgets::series_chart::{self, Series};

pub fn render(frame: &mut Frame, area: Rect, telemetry: &TelemetryCollector) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let count = area.width as usize;

    let accel = axes(telemetry, count, theme::ACCEL_AXES, [
        |e: &HistoryEntry| e.accel_x,
        |e: &HistoryEntry| e.accel_y,
        |e: &HistoryEntry| e.accel_z,
    ]);
    series_chart::render(frame, chunks[0], "Accel", &accel);

    let gyro = axes(telemetry, count, theme::GYRO_AXES, [
        |e: &HistoryEntry| e.gyro_x,
        |e: &HistoryEntry| e.gyro_y,
        |e: &HistoryEntry| e.gyro_z,
    ]);
    series_chart::render(frame, chunks[1], "Gyro", &gyro);
}

fn axes(
    telemetry: &TelemetryCollector,
    count: usize,
    colors: [ratatui::style::Color; 3],
    fields: [fn(&HistoryEntry) -> f64; 3],
) -> Vec<Series<'static>> {
    const NAMES: [&str; 3] = ["x", "y", "z"];
    NAMES
        .into_iter()
        .zip(colors)
        .zip(fields)
        .map(|((name, color), field)| Series {
            name,
            color,
            points: indexed(telemetry.history.series(count, field)),
        })
        .collect()
}

fn indexed(values: Vec<f64>) -> Vec<(f64, f64)> {
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| (i as f64, v))
        .collect()
}
