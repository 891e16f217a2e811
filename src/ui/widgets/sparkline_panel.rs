use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Sparkline};
use ratatui::Frame;

use crate::ui::theme;

/// Bordered sparkline over a history tail, with the live reading in the
/// top-right corner. Values are clamped at zero; the sparkline glyphs carry
/// no sign.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    values: &[f64],
    color: Color,
    reading: &str,
) {
    let data: Vec<u64> = values.iter().map(|v| v.max(0.0).round() as u64).collect();
    let max = data.iter().copied().max().unwrap_or(0).max(1);

    let block = Block::default()
        .title(Line::styled(format!(" {title} "), theme::title_style()))
        .title_top(Line::styled(format!(" {reading} "), Style::default().fg(color)).right_aligned())
        .borders(Borders::ALL)
        .border_style(theme::border_style());

    let sparkline = Sparkline::default()
        .block(block)
        .data(&data)
        .max(max)
        .style(Style::default().fg(color));

    frame.render_widget(sparkline, area);
}
