use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::ui::theme;
use crate::util::series_stats;

/// One-line min/avg/max summary of the buffered window.
pub fn render(frame: &mut Frame, area: Rect, values: &[f64], fmt: &dyn Fn(f64) -> String) {
    let block = Block::default()
        .title(Line::styled(" Window Stats ", theme::title_style()))
        .borders(Borders::ALL)
        .border_style(theme::border_style());

    let line = match series_stats(values) {
        Some((min, max, mean)) => Line::from(vec![
            Span::styled(" samples ", theme::label_style()),
            Span::styled(values.len().to_string(), theme::value_style()),
            Span::styled("  min ", theme::label_style()),
            Span::styled(fmt(min), theme::value_style()),
            Span::styled("  avg ", theme::label_style()),
            Span::styled(fmt(mean), theme::value_style()),
            Span::styled("  max ", theme::label_style()),
            Span::styled(fmt(max), theme::value_style()),
        ]),
        None => Line::styled(" no samples yet ", theme::label_style()),
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}
