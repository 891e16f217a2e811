pub mod footer;
pub mod header;
pub mod help;
pub mod tabs;
pub mod theme;
pub mod widgets;

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

use crate::app::App;
use tabs::Tab;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // header + tab bar
            Constraint::Min(10),   // body
            Constraint::Length(1), // footer
        ])
        .split(area);

    header::render(frame, chunks[0], app);

    match app.current_tab {
        Tab::Overview => tabs::overview::render(frame, chunks[1], &app.telemetry),
        Tab::Rpm => tabs::rpm_detail::render(frame, chunks[1], &app.telemetry),
        Tab::Tds => tabs::tds_detail::render(frame, chunks[1], &app.telemetry),
        Tab::Motion => tabs::motion_detail::render(frame, chunks[1], &app.telemetry),
        Tab::Power => tabs::power_detail::render(frame, chunks[1], &app.telemetry),
        Tab::Location => tabs::location::render(frame, chunks[1], &app.telemetry),
        Tab::Activity => {
            tabs::activity::render(frame, chunks[1], &app.activity, app.scroll_offset)
        }
    }

    footer::render(
        frame,
        chunks[2],
        app.current_tab,
        app.telemetry.poll_interval(),
    );

    if app.show_help {
        help::render(frame, area);
    }
}
