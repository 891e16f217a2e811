use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::telemetry::history::{Capacity, FieldSet, DEFAULT_HISTORY_CAP};

#[derive(Parser, Debug)]
#[command(name = "wavemon", version, about = "A real-time terminal dashboard for a water-turbine sensor node")]
pub struct Config {
    /// Base URL of the sensor node
    #[arg(short, long, default_value = "http://10.0.0.39")]
    pub endpoint: String,

    /// Poll interval in milliseconds
    #[arg(short, long, default_value_t = 2000, value_parser = clap::value_parser!(u64).range(250..=60000))]
    pub poll_interval: u64,

    /// Keep at most this many history entries (oldest evicted first)
    #[arg(long, default_value_t = DEFAULT_HISTORY_CAP as u64, value_parser = clap::value_parser!(u64).range(1..))]
    pub history_cap: u64,

    /// Let the history grow without bound for the whole session
    #[arg(long)]
    pub unbounded_history: bool,

    /// Which fields each history entry carries
    #[arg(long, value_enum, default_value_t = FieldsArg::Extended)]
    pub fields: FieldsArg,

    /// Directory CSV exports are written to
    #[arg(long, default_value = ".")]
    pub export_dir: PathBuf,

    /// Skip the network lookup and pin the location card to its default
    #[arg(long)]
    pub no_geolocate: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum FieldsArg {
    /// Raw readings only
    Base,
    /// Raw readings plus the derived voltage estimate
    Extended,
}

impl Config {
    pub fn capacity(&self) -> Capacity {
        if self.unbounded_history {
            Capacity::Unbounded
        } else {
            Capacity::Bounded(self.history_cap as usize)
        }
    }

    pub fn field_set(&self) -> FieldSet {
        match self.fields {
            FieldsArg::Base => FieldSet::Base,
            FieldsArg::Extended => FieldSet::Extended,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_device_setup() {
        let config = Config::parse_from(["wavemon"]);
        assert_eq!(config.endpoint, "http://10.0.0.39");
        assert_eq!(config.poll_interval, 2000);
        assert_eq!(config.capacity(), Capacity::Bounded(20));
        assert_eq!(config.field_set(), FieldSet::Extended);
        assert!(!config.no_geolocate);
    }

    #[test]
    fn unbounded_flag_wins_over_cap() {
        let config = Config::parse_from(["wavemon", "--unbounded-history", "--history-cap", "5"]);
        assert_eq!(config.capacity(), Capacity::Unbounded);
    }

    #[test]
    fn base_fields_map_through() {
        let config = Config::parse_from(["wavemon", "--fields", "base"]);
        assert_eq!(config.field_set(), FieldSet::Base);
    }
}
