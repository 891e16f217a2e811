use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::telemetry::history::{FieldSet, VOLTS_PER_RPM};
use crate::telemetry::TelemetryCollector;
use crate::ui::theme;
use crate::ui::widgets::{sparkline_panel, stats_panel};
use crate::util::format_voltage;

pub fn render(frame: &mut Frame, area: Rect, telemetry: &TelemetryCollector) {
    if telemetry.history.fields() == FieldSet::Base {
        let block = Block::default()
            .title(Line::styled(" Generated Voltage ", theme::title_style()))
            .borders(Borders::ALL)
            .border_style(theme::border_style());
        frame.render_widget(
            Paragraph::new(Line::styled(
                " the derived voltage field is off (--fields base) ",
                theme::label_style(),
            ))
            .block(block),
            area,
        );
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area);

    let data = telemetry
        .history
        .series(area.width as usize, |e| e.voltage.unwrap_or(0.0));
    let label = telemetry
        .history
        .latest()
        .and_then(|e| e.voltage)
        .map(format_voltage)
        .unwrap_or_else(|| "--".into());
    sparkline_panel::render(
        frame,
        chunks[0],
        "Generated Voltage",
        &data,
        theme::PEACH,
        &label,
    );

    let window = telemetry
        .history
        .series(usize::MAX, |e| e.voltage.unwrap_or(0.0));
    stats_panel::render(frame, chunks[1], &window, &format_voltage);

    let note_block = Block::default()
        .title(Line::styled(" Derivation ", theme::title_style()))
        .borders(Borders::ALL)
        .border_style(theme::border_style());
    frame.render_widget(
        Paragraph::new(Line::styled(
            format!(" estimated from rotor speed at {VOLTS_PER_RPM} V per rpm "),
            theme::label_style(),
        ))
        .block(note_block),
        chunks[2],
    );
}
