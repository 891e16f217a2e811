use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols;
use ratatui::text::Line;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType};
use ratatui::Frame;

use crate::ui::theme;

pub struct Series<'a> {
    pub name: &'a str,
    pub color: Color,
    /// (sample index, value) points, oldest first.
    pub points: Vec<(f64, f64)>,
}

/// Multi-series line chart over sample index. Signed values are fine; the
/// y bounds track the data with a little headroom.
pub fn render(frame: &mut Frame, area: Rect, title: &str, series: &[Series]) {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    let mut max_x: f64 = 1.0;
    for s in series {
        for &(x, y) in &s.points {
            min_y = min_y.min(y);
            max_y = max_y.max(y);
            max_x = max_x.max(x);
        }
    }
    if min_y > max_y {
        // no data yet
        min_y = 0.0;
        max_y = 1.0;
    }
    let pad = ((max_y - min_y) * 0.1).max(0.5);
    let (lo, hi) = (min_y - pad, max_y + pad);

    let datasets: Vec<Dataset> = series
        .iter()
        .map(|s| {
            Dataset::default()
                .name(s.name)
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(s.color))
                .data(&s.points)
        })
        .collect();

    let block = Block::default()
        .title(Line::styled(format!(" {title} "), theme::title_style()))
        .borders(Borders::ALL)
        .border_style(theme::border_style());

    let mid = (lo + hi) / 2.0;
    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, max_x])
                .style(theme::border_style()),
        )
        .y_axis(
            Axis::default()
                .bounds([lo, hi])
                .labels([
                    format!("{lo:.1}"),
                    format!("{mid:.1}"),
                    format!("{hi:.1}"),
                ])
                .style(theme::label_style()),
        );

    frame.render_widget(chart, area);
}
