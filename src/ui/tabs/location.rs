use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::telemetry::location::LocationSource;
use crate::telemetry::TelemetryCollector;
use crate::ui::theme;

pub fn render(frame: &mut Frame, area: Rect, telemetry: &TelemetryCollector) {
    let loc = telemetry.location;
    let source = match loc.source {
        LocationSource::Resolved => "geoip lookup",
        LocationSource::Fallback => "default (lookup unavailable or disabled)",
    };

    let lines = vec![
        Line::raw(""),
        field("latitude", format!("{:.4}", loc.lat)),
        field("longitude", format!("{:.4}", loc.lng)),
        Line::raw(""),
        field("source", source.to_string()),
        field("device", telemetry.endpoint().to_string()),
    ];

    let block = Block::default()
        .title(Line::styled(" Device Location ", theme::title_style()))
        .borders(Borders::ALL)
        .border_style(theme::border_style());
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn field(label: &str, value: String) -> Line<'_> {
    Line::from(vec![
        Span::styled(format!("  {label:<12}"), theme::label_style()),
        Span::styled(value, theme::value_style()),
    ])
}
