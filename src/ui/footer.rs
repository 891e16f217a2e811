use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::time::Duration;

use super::tabs::Tab;
use super::theme;

pub fn render(frame: &mut Frame, area: Rect, current_tab: Tab, poll_interval: Duration) {
    let mut hints = vec![
        Span::styled(" q", theme::key_hint_style()),
        Span::styled(" quit  ", theme::label_style()),
        Span::styled("?", theme::key_hint_style()),
        Span::styled(" help  ", theme::label_style()),
        Span::styled("Tab", theme::key_hint_style()),
        Span::styled(" switch  ", theme::label_style()),
        Span::styled("+/-", theme::key_hint_style()),
        Span::styled(" rate  ", theme::label_style()),
        Span::styled("e", theme::key_hint_style()),
        Span::styled(" export csv  ", theme::label_style()),
    ];

    match current_tab {
        Tab::Activity => {
            hints.extend([
                Span::styled("l", theme::key_hint_style()),
                Span::styled(" level  ", theme::label_style()),
                Span::styled("a", theme::key_hint_style()),
                Span::styled(" autoscroll  ", theme::label_style()),
                Span::styled("j/k", theme::key_hint_style()),
                Span::styled(" scroll", theme::label_style()),
            ]);
        }
        _ => {
            hints.extend([
                Span::styled("j/k", theme::key_hint_style()),
                Span::styled(" scroll", theme::label_style()),
            ]);
        }
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(14)])
        .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(hints)).style(theme::footer_style()),
        chunks[0],
    );

    let rate_ms = poll_interval.as_millis();
    let rate_text = if rate_ms >= 1000 {
        format!("{:.1}s ", rate_ms as f64 / 1000.0)
    } else {
        format!("{rate_ms}ms ")
    };
    let rate_line = Line::from(vec![
        Span::styled("poll ", theme::label_style()),
        Span::styled(rate_text, theme::value_style()),
    ]);
    frame.render_widget(
        Paragraph::new(rate_line)
            .alignment(Alignment::Right)
            .style(theme::footer_style()),
        chunks[1],
    );
}
