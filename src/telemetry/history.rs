use std::collections::VecDeque;

use super::sample::Sample;
use crate::util::clock_stamp;

/// Default rolling window: 20 entries, ~40s of data at the stock 2s poll rate.
pub const DEFAULT_HISTORY_CAP: usize = 20;

/// Fixed linear scale from rotor speed to estimated generated voltage.
pub const VOLTS_PER_RPM: f64 = 0.06;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Capacity {
    Unbounded,
    Bounded(usize),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldSet {
    /// Raw readings only.
    Base,
    /// Raw readings plus the derived voltage estimate.
    Extended,
}

/// One timestamped, flattened record derived from a [`Sample`].
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    pub time: String,
    pub rpm: f64,
    pub tds: f64,
    pub accel_x: f64,
    pub accel_y: f64,
    pub accel_z: f64,
    pub gyro_x: f64,
    pub gyro_y: f64,
    pub gyro_z: f64,
    pub voltage: Option<f64>,
}

impl HistoryEntry {
    /// Column names in declaration order, using the device's camelCase
    /// convention. `voltage` appears only when it was derived.
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names = vec![
            "time", "rpm", "tds", "accelX", "accelY", "accelZ", "gyroX", "gyroY", "gyroZ",
        ];
        if self.voltage.is_some() {
            names.push("voltage");
        }
        names
    }

    /// Stringified values in the same order as [`field_names`](Self::field_names).
    pub fn field_values(&self) -> Vec<String> {
        let mut values = vec![
            self.time.clone(),
            self.rpm.to_string(),
            self.tds.to_string(),
            self.accel_x.to_string(),
            self.accel_y.to_string(),
            self.accel_z.to_string(),
            self.gyro_x.to_string(),
            self.gyro_y.to_string(),
            self.gyro_z.to_string(),
        ];
        if let Some(v) = self.voltage {
            values.push(v.to_string());
        }
        values
    }
}

/// Rolling buffer of derived entries. Write-append / read-all only; the
/// newest entry is always last.
pub struct History {
    entries: VecDeque<HistoryEntry>,
    capacity: Capacity,
    fields: FieldSet,
}

impl History {
    pub fn new(capacity: Capacity, fields: FieldSet) -> Self {
        let reserve = match capacity {
            Capacity::Bounded(cap) => cap,
            Capacity::Unbounded => DEFAULT_HISTORY_CAP,
        };
        Self {
            entries: VecDeque::with_capacity(reserve),
            capacity,
            fields,
        }
    }

    /// Derives an entry from `sample`, stamps it with the current wall clock,
    /// and appends it. Under a bounded capacity the oldest entries are evicted
    /// until the cap holds again.
    pub fn append(&mut self, sample: &Sample) {
        self.append_at(sample, clock_stamp());
    }

    /// [`append`](Self::append) with an injected timestamp.
    pub fn append_at(&mut self, sample: &Sample, time: String) {
        let voltage = match self.fields {
            FieldSet::Extended => Some(VOLTS_PER_RPM * sample.rpm),
            FieldSet::Base => None,
        };
        self.entries.push_back(HistoryEntry {
            time,
            rpm: sample.rpm,
            tds: sample.tds,
            accel_x: sample.accel.x,
            accel_y: sample.accel.y,
            accel_z: sample.accel.z,
            gyro_x: sample.gyro.x,
            gyro_y: sample.gyro.y,
            gyro_z: sample.gyro.z,
            voltage,
        });
        if let Capacity::Bounded(cap) = self.capacity {
            while self.entries.len() > cap {
                self.entries.pop_front();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    pub fn fields(&self) -> FieldSet {
        self.fields
    }

    /// Tail of at most `count` values of one field, oldest first.
    pub fn series<F>(&self, count: usize, f: F) -> Vec<f64>
    where
        F: Fn(&HistoryEntry) -> f64,
    {
        let skip = self.entries.len().saturating_sub(count);
        self.entries.iter().skip(skip).map(f).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::sample::Axes;

    fn sample(rpm: f64) -> Sample {
        Sample {
            tds: 12.5,
            rpm,
            accel: Axes { x: 1.0, y: 2.0, z: 3.0 },
            gyro: Axes { x: 0.1, y: 0.2, z: 0.3 },
        }
    }

    #[test]
    fn derives_flattened_entry_with_voltage() {
        let mut history = History::new(Capacity::Bounded(20), FieldSet::Extended);
        history.append_at(&sample(100.0), "12:00:00".into());

        let entry = history.latest().unwrap();
        assert_eq!(entry.time, "12:00:00");
        assert_eq!(entry.rpm, 100.0);
        assert_eq!(entry.tds, 12.5);
        assert_eq!(
            (entry.accel_x, entry.accel_y, entry.accel_z),
            (1.0, 2.0, 3.0)
        );
        assert_eq!(
            (entry.gyro_x, entry.gyro_y, entry.gyro_z),
            (0.1, 0.2, 0.3)
        );
        assert!((entry.voltage.unwrap() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn base_field_set_skips_voltage() {
        let mut history = History::new(Capacity::Bounded(20), FieldSet::Base);
        history.append_at(&sample(100.0), "12:00:00".into());
        assert_eq!(history.latest().unwrap().voltage, None);
    }

    #[test]
    fn voltage_tracks_rpm_scale() {
        let mut history = History::new(Capacity::Unbounded, FieldSet::Extended);
        for rpm in [0.0, 33.0, 250.5] {
            history.append_at(&sample(rpm), "12:00:00".into());
            let got = history.latest().unwrap().voltage.unwrap();
            assert!((got - 0.06 * rpm).abs() < 1e-9);
        }
    }

    #[test]
    fn bounded_buffer_holds_at_most_cap_in_order() {
        let mut history = History::new(Capacity::Bounded(20), FieldSet::Extended);
        for n in 1..=25usize {
            history.append_at(&sample(n as f64), format!("12:00:{n:02}"));
            assert_eq!(history.len(), n.min(20));
        }

        let rpms: Vec<f64> = history.entries().map(|e| e.rpm).collect();
        let expected: Vec<f64> = (6..=25).map(|n| n as f64).collect();
        assert_eq!(rpms, expected);
        assert_eq!(history.latest().unwrap().rpm, 25.0);
    }

    #[test]
    fn unbounded_buffer_never_evicts() {
        let mut history = History::new(Capacity::Unbounded, FieldSet::Extended);
        for n in 0..100 {
            history.append_at(&sample(n as f64), "12:00:00".into());
        }
        assert_eq!(history.len(), 100);
    }

    #[test]
    fn series_returns_tail_oldest_first() {
        let mut history = History::new(Capacity::Unbounded, FieldSet::Extended);
        for n in 1..=10 {
            history.append_at(&sample(n as f64), "12:00:00".into());
        }
        assert_eq!(history.series(3, |e| e.rpm), vec![8.0, 9.0, 10.0]);
        assert_eq!(history.series(50, |e| e.rpm).len(), 10);
    }
}
