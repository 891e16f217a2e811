pub mod series_chart;
pub mod sparkline_panel;
pub mod stats_panel;
