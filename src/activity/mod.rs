use std::collections::VecDeque;

use crate::util::clock_stamp;

const MAX_ENTRIES: usize = 1000;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ActivityLevel {
    Info,
    Warn,
    Error,
}

impl ActivityLevel {
    pub fn as_str(&self) -> &str {
        match self {
            ActivityLevel::Info => "INFO",
            ActivityLevel::Warn => "WARN",
            ActivityLevel::Error => "ERROR",
        }
    }
}

#[derive(Clone, Debug)]
pub struct ActivityEntry {
    pub timestamp: String,
    pub level: ActivityLevel,
    pub message: String,
}

/// In-session ring of app events: poll failures, exports, lifecycle.
pub struct ActivityLog {
    pub entries: VecDeque<ActivityEntry>,
    pub auto_scroll: bool,
    pub level_filter: Option<ActivityLevel>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            auto_scroll: true,
            level_filter: None,
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ActivityLevel::Info, message.into());
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(ActivityLevel::Warn, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ActivityLevel::Error, message.into());
    }

    fn push(&mut self, level: ActivityLevel, message: String) {
        self.entries.push_back(ActivityEntry {
            timestamp: clock_stamp(),
            level,
            message,
        });
        while self.entries.len() > MAX_ENTRIES {
            self.entries.pop_front();
        }
    }

    pub fn filtered_entries(&self) -> Vec<&ActivityEntry> {
        self.entries
            .iter()
            .filter(|e| match self.level_filter {
                Some(level) => e.level == level,
                None => true,
            })
            .collect()
    }

    pub fn cycle_level_filter(&mut self) {
        self.level_filter = match self.level_filter {
            None => Some(ActivityLevel::Info),
            Some(ActivityLevel::Info) => Some(ActivityLevel::Warn),
            Some(ActivityLevel::Warn) => Some(ActivityLevel::Error),
            Some(ActivityLevel::Error) => None,
        };
    }

    pub fn toggle_auto_scroll(&mut self) {
        self.auto_scroll = !self.auto_scroll;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_drops_oldest_past_cap() {
        let mut log = ActivityLog::new();
        for n in 0..(MAX_ENTRIES + 10) {
            log.info(format!("event {n}"));
        }
        assert_eq!(log.entries.len(), MAX_ENTRIES);
        assert_eq!(log.entries.front().unwrap().message, "event 10");
    }

    #[test]
    fn level_filter_matches_exactly() {
        let mut log = ActivityLog::new();
        log.info("up");
        log.error("poll failed");
        log.warn("nothing to export");

        log.level_filter = Some(ActivityLevel::Error);
        let filtered = log.filtered_entries();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].message, "poll failed");

        log.level_filter = None;
        assert_eq!(log.filtered_entries().len(), 3);
    }

    #[test]
    fn filter_cycles_back_to_all() {
        let mut log = ActivityLog::new();
        let mut seen = vec![log.level_filter];
        for _ in 0..4 {
            log.cycle_level_filter();
            seen.push(log.level_filter);
        }
        assert_eq!(seen.first(), seen.last());
        assert_eq!(seen.len(), 5);
    }
}
