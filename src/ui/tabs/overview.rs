use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};
use ratatui::Frame;

use crate::telemetry::history::{Capacity, FieldSet};
use crate::telemetry::location::LocationSource;
use crate::telemetry::TelemetryCollector;
use crate::ui::theme;
use crate::ui::widgets::sparkline_panel;
use crate::util::{format_axis, format_rpm, format_tds, format_voltage};

pub fn render(frame: &mut Frame, area: Rect, telemetry: &TelemetryCollector) {
    let has_voltage = telemetry.history.fields() == FieldSet::Extended;

    let mut constraints = vec![
        Constraint::Length(5), // RPM sparkline
        Constraint::Length(5), // TDS sparkline
    ];
    if has_voltage {
        constraints.push(Constraint::Length(5)); // Voltage sparkline
    }
    constraints.push(Constraint::Min(7)); // Latest reading table
    constraints.push(Constraint::Length(3)); // Buffer summary

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let width = area.width as usize;
    let mut idx = 0;

    // RPM sparkline
    let rpm_data = telemetry.history.series(width, |e| e.rpm);
    let rpm_label = telemetry
        .current
        .map(|s| format_rpm(s.rpm))
        .unwrap_or_else(|| "--".into());
    sparkline_panel::render(frame, chunks[idx], "RPM", &rpm_data, theme::BLUE, &rpm_label);
    idx += 1;

    // TDS sparkline
    let tds_data = telemetry.history.series(width, |e| e.tds);
    let tds_label = telemetry
        .current
        .map(|s| format_tds(s.tds))
        .unwrap_or_else(|| "--".into());
    sparkline_panel::render(frame, chunks[idx], "TDS", &tds_data, theme::GREEN, &tds_label);
    idx += 1;

    // Voltage sparkline (derived, extended field set only)
    if has_voltage {
        let volt_data = telemetry.history.series(width, |e| e.voltage.unwrap_or(0.0));
        let volt_label = telemetry
            .history
            .latest()
            .and_then(|e| e.voltage)
            .map(format_voltage)
            .unwrap_or_else(|| "--".into());
        sparkline_panel::render(
            frame,
            chunks[idx],
            "Generated Voltage",
            &volt_data,
            theme::PEACH,
            &volt_label,
        );
        idx += 1;
    }

    // Latest reading
    let rows: Vec<Row> = match &telemetry.current {
        Some(s) => {
            let mut rows = vec![
                Row::new(vec!["RPM".to_string(), format_rpm(s.rpm)]),
                Row::new(vec!["TDS".to_string(), format_tds(s.tds)]),
            ];
            if let Some(v) = telemetry.history.latest().and_then(|e| e.voltage) {
                rows.push(Row::new(vec!["Voltage".to_string(), format_voltage(v)]));
            }
            rows.push(Row::new(vec![
                "Accel".to_string(),
                format!(
                    "x {}  y {}  z {}",
                    format_axis(s.accel.x),
                    format_axis(s.accel.y),
                    format_axis(s.accel.z)
                ),
            ]));
            rows.push(Row::new(vec![
                "Gyro".to_string(),
                format!(
                    "x {}  y {}  z {}",
                    format_axis(s.gyro.x),
                    format_axis(s.gyro.y),
                    format_axis(s.gyro.z)
                ),
            ]));
            rows
        }
        None => vec![Row::new(vec![
            "waiting for first sample...".to_string(),
            String::new(),
        ])],
    };

    let widths = [Constraint::Length(10), Constraint::Min(24)];
    let reading_block = Block::default()
        .title(Line::styled(" Latest Reading ", theme::title_style()))
        .borders(Borders::ALL)
        .border_style(theme::border_style());
    let table = Table::new(rows, &widths).block(reading_block);
    frame.render_widget(table, chunks[idx]);
    idx += 1;

    // Buffer + location summary
    let buffer_info = match telemetry.history.capacity() {
        Capacity::Bounded(cap) => format!("{}/{cap}", telemetry.history.len()),
        Capacity::Unbounded => format!("{} (unbounded)", telemetry.history.len()),
    };
    let loc = telemetry.location;
    let loc_source = match loc.source {
        LocationSource::Resolved => "geoip",
        LocationSource::Fallback => "default",
    };
    let summary = format!(
        " history {buffer_info}  \u{00b7}  location {:.4}, {:.4} ({loc_source}) ",
        loc.lat, loc.lng
    );
    let summary_block = Block::default()
        .title(Line::styled(" Session ", theme::title_style()))
        .borders(Borders::ALL)
        .border_style(theme::border_style());
    frame.render_widget(
        Paragraph::new(Line::styled(summary, theme::value_style())).block(summary_block),
        chunks[idx],
    );
}
