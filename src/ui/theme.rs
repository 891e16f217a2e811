use ratatui::style::{Color, Modifier, Style};

use crate::telemetry::LinkState;

// Catppuccin Mocha-inspired palette
pub const BASE: Color = Color::Rgb(30, 30, 46);
pub const SURFACE0: Color = Color::Rgb(49, 50, 68);
pub const SURFACE1: Color = Color::Rgb(69, 71, 90);
pub const TEXT: Color = Color::Rgb(205, 214, 244);
pub const SUBTEXT: Color = Color::Rgb(166, 173, 200);
pub const BLUE: Color = Color::Rgb(137, 180, 250);
pub const GREEN: Color = Color::Rgb(166, 227, 161);
pub const RED: Color = Color::Rgb(243, 139, 168);
pub const YELLOW: Color = Color::Rgb(249, 226, 175);
pub const PEACH: Color = Color::Rgb(250, 179, 135);
pub const MAUVE: Color = Color::Rgb(203, 166, 247);
pub const SKY: Color = Color::Rgb(137, 220, 235);
pub const PINK: Color = Color::Rgb(245, 194, 231);

/// x/y/z series colors for the accelerometer chart.
pub const ACCEL_AXES: [Color; 3] = [RED, PEACH, GREEN];
/// x/y/z series colors for the gyroscope chart.
pub const GYRO_AXES: [Color; 3] = [MAUVE, PINK, SKY];

pub fn title_style() -> Style {
    Style::default().fg(BLUE).add_modifier(Modifier::BOLD)
}

pub fn active_tab_style() -> Style {
    Style::default()
        .fg(BASE)
        .bg(BLUE)
        .add_modifier(Modifier::BOLD)
}

pub fn inactive_tab_style() -> Style {
    Style::default().fg(SUBTEXT).bg(SURFACE0)
}

pub fn header_style() -> Style {
    Style::default().fg(TEXT).bg(SURFACE0)
}

pub fn footer_style() -> Style {
    Style::default().fg(SUBTEXT).bg(SURFACE0)
}

pub fn key_hint_style() -> Style {
    Style::default().fg(BLUE)
}

pub fn label_style() -> Style {
    Style::default().fg(SUBTEXT)
}

pub fn value_style() -> Style {
    Style::default().fg(TEXT)
}

pub fn border_style() -> Style {
    Style::default().fg(SURFACE1)
}

pub fn link_color(link: &LinkState) -> Color {
    match link {
        LinkState::Connecting => YELLOW,
        LinkState::Online => GREEN,
        LinkState::Degraded(_) => RED,
    }
}
