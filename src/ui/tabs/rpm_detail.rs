use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;

use crate::telemetry::TelemetryCollector;
use crate::ui::theme;
use crate::ui::widgets::{sparkline_panel, stats_panel};
use crate::util::format_rpm;

pub fn render(frame: &mut Frame, area: Rect, telemetry: &TelemetryCollector) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(3)])
        .split(area);

    let data = telemetry.history.series(area.width as usize, |e| e.rpm);
    let label = telemetry
        .current
        .map(|s| format_rpm(s.rpm))
        .unwrap_or_else(|| "--".into());
    sparkline_panel::render(frame, chunks[0], "Rotor Speed", &data, theme::BLUE, &label);

    let window = telemetry.history.series(usize::MAX, |e| e.rpm);
    stats_panel::render(frame, chunks[1], &window, &format_rpm);
}
