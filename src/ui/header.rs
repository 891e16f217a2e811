use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::tabs::Tab;
use super::theme;
use crate::app::App;
use crate::telemetry::LinkState;
use crate::util::format_uptime;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    // Top line: app name + host + device endpoint + link + counters
    let link_label = match &app.telemetry.link {
        LinkState::Connecting => "connecting",
        LinkState::Online => "online",
        LinkState::Degraded(_) => "degraded",
    };
    let uptime_str = format_uptime(app.session_uptime());
    let info_line = Line::from(vec![
        Span::styled(" wavemon ", theme::title_style()),
        Span::styled(format!("  {}", app.hostname), theme::value_style()),
        Span::styled(
            format!("  \u{2192} {}", app.telemetry.endpoint()),
            theme::label_style(),
        ),
        Span::styled(
            format!("  \u{25cf} {link_label}"),
            Style::default().fg(theme::link_color(&app.telemetry.link)),
        ),
        Span::styled(
            format!(
                "  {} polls / {} errors",
                app.telemetry.poll_count, app.telemetry.error_count
            ),
            theme::label_style(),
        ),
        Span::styled(format!("  up {uptime_str}"), theme::label_style()),
    ]);
    frame.render_widget(
        Paragraph::new(info_line).style(theme::header_style()),
        chunks[0],
    );

    // Tab bar
    let mut tab_spans = vec![Span::raw(" ")];
    for tab in &Tab::ALL {
        let label = format!(" {}:{} ", tab.index() + 1, tab.label());
        if *tab == app.current_tab {
            tab_spans.push(Span::styled(label, theme::active_tab_style()));
        } else {
            tab_spans.push(Span::styled(label, theme::inactive_tab_style()));
        }
        tab_spans.push(Span::raw(" "));
    }
    frame.render_widget(
        Paragraph::new(Line::from(tab_spans)).style(theme::header_style()),
        chunks[1],
    );
}
